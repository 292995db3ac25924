use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use crate::{
    api::{DeleteParams, ListParams, WatchHandlers, WatchParams, WatchState},
    client::Body,
    core::{ObjectMeta, WatchEvent},
    namespace::NamespaceResolver,
    Api, Client, Error, Resource, ResourceExt,
};
use anyhow::Result;
use assert_json_diff::assert_json_include;
use http::{Method, Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

#[derive(Resource, Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[resource(group = "demo.kubent.rs", version = "v1")]
#[resource(crates(kubent_core = "crate::core"))] // for dev-dep test structure
struct Widget {
    metadata: ObjectMeta,
    #[serde(default)]
    size: u32,
}

impl Widget {
    fn test(name: &str, size: u32) -> Self {
        Widget {
            metadata: ObjectMeta {
                name: Some(name.into()),
                namespace: Some("apps".into()),
                ..ObjectMeta::default()
            },
            size,
        }
    }

    fn stored(name: &str, size: u32, rv: &str) -> Value {
        json!({
            "apiVersion": "demo.kubent.rs/v1",
            "kind": "Widget",
            "metadata": {
                "name": name,
                "namespace": "apps",
                "uid": format!("uid-{name}"),
                "resourceVersion": rv,
                "creationTimestamp": "2024-05-01T10:00:00.000000Z"
            },
            "size": size
        })
    }
}

impl Widget {
    fn owned(size: u32, rv: &str) -> Value {
        let mut stored = Widget::stored("blue", size, rv);
        stored["metadata"]["ownerReferences"] = json!([{
            "apiVersion": "demo.kubent.rs/v1",
            "kind": "Gadget",
            "name": "gadget",
            "uid": "uid-gadget",
            "controller": true
        }]);
        stored["metadata"]["managedFields"] = json!([{"manager": "widget-controller", "operation": "Update"}]);
        stored["metadata"]["selfLink"] = json!(format!("{WIDGETS}/blue"));
        stored
    }
}

const WIDGETS: &str = "/apis/demo.kubent.rs/v1/namespaces/apps/widgets";

#[tokio::test]
async fn get_missing_is_none() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::NotFound(Method::GET));

    let api: Api<Widget> = Api::new(client).unwrap();
    assert_eq!(api.get("blue", Some("apps")).await.unwrap(), None);
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn get_propagates_other_failures() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::Forbidden);

    let api: Api<Widget> = Api::new(client).unwrap();
    match api.get("blue", Some("apps")).await {
        Err(Error::Api(e)) => assert_eq!(e.code, 403),
        other => panic!("unexpected {other:?}"),
    }
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn list_across_cluster_with_selector() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::List);

    let api: Api<Widget> = Api::new(client).unwrap();
    let lp = ListParams::default().selector(&[
        crate::core::Expression::exists("tier"),
        crate::core::Expression::not_in("env", ["dev", "qa"]),
    ]);
    let widgets = api.list(None, &lp).await.unwrap();
    let names: Vec<_> = widgets.iter().map(ResourceExt::name_any).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(widgets[1].size, 2);
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn list_without_items_is_a_decode_error() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::ListWithoutItems);

    let api: Api<Widget> = Api::new(client).unwrap();
    match api.list_page(Some("apps"), &ListParams::default()).await {
        Err(Error::SerdeError(e)) => assert!(e.to_string().contains("items")),
        other => panic!("unexpected {other:?}"),
    }
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn update_sends_back_server_metadata() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::UpdateOwned);

    let api: Api<Widget> = Api::new(client).unwrap();
    let mut widget = api.get("blue", Some("apps")).await.unwrap().unwrap();
    let owners = widget.meta().owner_references.clone().unwrap_or_default();
    assert_eq!(owners[0].name, "gadget");
    widget.size = 9;
    let updated = api.update(&widget).await.unwrap();
    assert_eq!(updated.meta().owner_references, Some(owners));
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn create_submits_object_as_is() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::Create);

    let api: Api<Widget> = Api::new(client).unwrap();
    let created = api.create(&Widget::test("blue", 3)).await.unwrap();
    assert_eq!(created.uid().as_deref(), Some("uid-blue"));
    assert_eq!(created.resource_version().as_deref(), Some("1"));
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn save_creates_when_absent() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::SaveAbsent);

    let api: Api<Widget> = Api::new(client).unwrap();
    let mut widget = Widget::test("blue", 3);
    let saved = api.save(&mut widget).await.unwrap();
    assert_eq!(saved.resource_version().as_deref(), Some("1"));
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn save_updates_existing_with_server_version() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::SaveExisting);

    let api: Api<Widget> = Api::new(client).unwrap();
    let mut widget = Widget::test("blue", 4);
    widget.meta_mut().resource_version = Some("stale".into());
    let saved = api.save(&mut widget).await.unwrap();

    assert_eq!(widget.uid().as_deref(), Some("uid-blue"));
    assert_eq!(widget.resource_version().as_deref(), Some("5"));
    assert_eq!(saved.uid(), widget.uid());
    assert_eq!(saved.resource_version().as_deref(), Some("6"));
    assert_eq!(saved.size, 4);
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn update_conflict_is_not_retried() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::Conflict);

    let api: Api<Widget> = Api::new(client).unwrap();
    let mut widget = Widget::test("blue", 4);
    widget.meta_mut().resource_version = Some("4".into());
    let err = api.update(&widget).await.unwrap_err();
    assert!(err.is_conflict());
    // the scenario only answers once, a retry would fail the test with a closed service
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn update_status_refreshes_only_the_version() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::UpdateStatus);

    let api: Api<Widget> = Api::new(client).unwrap();
    let mut widget = Widget::test("blue", 4);
    widget.meta_mut().resource_version = Some("6".into());
    api.update_status(&mut widget).await.unwrap();

    assert_eq!(widget.resource_version().as_deref(), Some("7"));
    assert_eq!(widget.size, 4);
    assert_eq!(widget.uid(), None);
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::NotFound(Method::DELETE));

    let api: Api<Widget> = Api::new(client).unwrap();
    api.delete(&Widget::test("blue", 0)).await.unwrap();
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn delete_with_propagation_sends_options() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::DeleteForeground);

    let api: Api<Widget> = Api::new(client).unwrap();
    api.delete_opts("blue", Some("apps"), &DeleteParams::foreground())
        .await
        .unwrap();
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn batch_delete_tolerates_partial_failure() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::BatchDelete);

    let api: Api<Widget> = Api::new(client).unwrap();
    let widgets = [Widget::test("a", 0), Widget::test("b", 0), Widget::test("c", 0)];
    let outcomes = api.delete_all(&widgets).await;
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_ok());
    assert!(matches!(&outcomes[1], Err(Error::Api(e)) if e.code == 500));
    assert!(outcomes[2].is_ok());
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn watch_dispatches_in_order_and_closes_once() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::WatchEvents);

    let api: Api<Widget> = Api::new(client).unwrap();
    let recorder = Recorder::default();
    let handle = api.watch(
        Some("apps"),
        &WatchParams::default().timeout(30),
        recorder.handlers(),
        CancellationToken::new(),
    );
    assert_eq!(handle.join().await.unwrap(), WatchState::Closed);

    assert_eq!(*recorder.events.lock().unwrap(), [
        "ADDED a",
        "MODIFIED a",
        "DELETED a"
    ]);
    assert_eq!(recorder.errors.load(Ordering::SeqCst), 0);
    assert_eq!(recorder.closes.load(Ordering::SeqCst), 1);
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn watch_skips_undecodable_events() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::WatchGarbage);

    let api: Api<Widget> = Api::new(client).unwrap();
    let recorder = Recorder::default();
    let handle = api.watch(None, &WatchParams::default(), recorder.handlers(), CancellationToken::new());
    assert_eq!(handle.join().await.unwrap(), WatchState::Closed);

    assert_eq!(*recorder.events.lock().unwrap(), ["ADDED a", "DELETED b"]);
    assert_eq!(recorder.errors.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.closes.load(Ordering::SeqCst), 1);
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn watch_open_failure_is_errored() {
    let (client, fakeserver) = testcontext();
    let mocksrv = fakeserver.run(Scenario::WatchRejected);

    let api: Api<Widget> = Api::new(client).unwrap();
    let recorder = Recorder::default();
    let handle = api.watch(Some("apps"), &WatchParams::default(), recorder.handlers(), CancellationToken::new());
    assert_eq!(handle.join().await.unwrap(), WatchState::Errored);

    assert!(recorder.events.lock().unwrap().is_empty());
    assert_eq!(recorder.errors.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.closes.load(Ordering::SeqCst), 0);
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn watch_cancellation_closes_once() {
    let (client, fakeserver) = testcontext();
    let token = CancellationToken::new();
    let mocksrv = fakeserver.run(Scenario::WatchStall(token.clone()));

    let api: Api<Widget> = Api::new(client).unwrap();
    let recorder = Recorder::default();
    let handle = api.watch(Some("apps"), &WatchParams::default(), recorder.handlers(), token);
    assert_eq!(handle.state(), WatchState::Opening);
    handle.cancel();
    assert_eq!(handle.join().await.unwrap(), WatchState::Cancelled);

    assert_eq!(recorder.errors.load(Ordering::SeqCst), 0);
    assert_eq!(recorder.closes.load(Ordering::SeqCst), 1);
    timeout_after_1s(mocksrv).await;
}

#[tokio::test]
async fn client_namespace_feeds_resolution() -> Result<()> {
    let (client, _fakeserver) = testcontext();
    let dir = tempfile::tempdir()?;
    let resolver = NamespaceResolver::default().namespace_file(dir.path().join("namespace"));
    assert_eq!(resolver.resolve_with(client.default_namespace(), |_| None), "apps");
    assert_eq!(
        resolver.resolve_with(client.default_namespace(), |_| Some("env".into())),
        "env"
    );
    Ok(())
}

// ------------------------------------------------------------------------
// mock test setup cruft
// ------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<String>>>,
    errors: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl Recorder {
    fn handlers(&self) -> WatchHandlers<Widget> {
        let (events, errors, closes) = (self.events.clone(), self.errors.clone(), self.closes.clone());
        WatchHandlers::new(move |event: WatchEvent<Widget>| {
            let name = event.object().map(ResourceExt::name_any).unwrap_or_default();
            let kind = format!("{:?}", event.event_type()).to_uppercase();
            events.lock().unwrap().push(format!("{kind} {name}"));
        })
        .on_error(move |_| {
            errors.fetch_add(1, Ordering::SeqCst);
        })
        .on_close(move || {
            closes.fetch_add(1, Ordering::SeqCst);
        })
    }
}

// We wrap tower_test::mock::Handle
type ApiServerHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;
struct ApiServerVerifier(ApiServerHandle);

async fn timeout_after_1s(handle: tokio::task::JoinHandle<()>) {
    tokio::time::timeout(std::time::Duration::from_secs(1), handle)
        .await
        .expect("timeout on mock apiserver")
        .expect("scenario succeeded")
}

/// Scenarios we test for in ApiServerVerifier above
enum Scenario {
    NotFound(Method),
    Forbidden,
    List,
    ListWithoutItems,
    UpdateOwned,
    Create,
    SaveAbsent,
    SaveExisting,
    Conflict,
    UpdateStatus,
    DeleteForeground,
    BatchDelete,
    WatchEvents,
    WatchGarbage,
    WatchRejected,
    WatchStall(CancellationToken),
}

impl ApiServerVerifier {
    /// Tests only get to run specific scenarios that has matching handlers
    ///
    /// NB: If the test is causing more calls than we are handling in the scenario,
    /// you then typically see a `Service(Closed(()))` error from the test.
    ///
    /// You should await the `JoinHandle` (with a timeout) from this function to ensure that the
    /// scenario runs to completion (i.e. all expected calls were responded to),
    /// using the timeout to catch missing api calls.
    fn run(self, scenario: Scenario) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            // moving self => one scenario per test
            match scenario {
                Scenario::NotFound(method) => self.handle_not_found(method).await,
                Scenario::Forbidden => self.handle_forbidden().await,
                Scenario::List => self.handle_list().await,
                Scenario::ListWithoutItems => self.handle_list_without_items().await,
                Scenario::UpdateOwned => self.handle_get_owned().await.unwrap().handle_replace_owned().await,
                Scenario::Create => self.handle_create().await,
                Scenario::SaveAbsent => {
                    self.handle_not_found(Method::GET)
                        .await
                        .unwrap()
                        .handle_create()
                        .await
                }
                Scenario::SaveExisting => self.handle_get_existing().await.unwrap().handle_replace().await,
                Scenario::Conflict => self.handle_conflict().await,
                Scenario::UpdateStatus => self.handle_replace_status().await,
                Scenario::DeleteForeground => self.handle_delete_foreground().await,
                Scenario::BatchDelete => self.handle_batch_delete().await,
                Scenario::WatchEvents => self.handle_watch_events().await,
                Scenario::WatchGarbage => self.handle_watch_garbage().await,
                Scenario::WatchRejected => self.handle_watch_rejected().await,
                Scenario::WatchStall(token) => self.handle_watch_stall(token).await,
            }
            .expect("scenario completed without errors");
        })
    }

    // chainable scenario handlers

    async fn handle_not_found(mut self, method: Method) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), method);
        assert_eq!(request.uri().to_string(), format!("{WIDGETS}/blue"));
        send.send_response(status(StatusCode::NOT_FOUND, "NotFound"));
        Ok(self)
    }

    async fn handle_forbidden(mut self) -> Result<Self> {
        let (_request, send) = self.0.next_request().await.expect("service not called");
        send.send_response(status(StatusCode::FORBIDDEN, "Forbidden"));
        Ok(self)
    }

    async fn handle_list(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::GET);
        assert_eq!(
            request.uri().to_string(),
            "/apis/demo.kubent.rs/v1/widgets?labelSelector=tier%2Cenv+notin+%28dev%2Cqa%29"
        );
        let respdata = json!({
            "kind": "WidgetList",
            "apiVersion": "demo.kubent.rs/v1",
            "metadata": { "resourceVersion": "12" },
            "items": [Widget::stored("a", 1, "10"), Widget::stored("b", 2, "11")]
        });
        send.send_response(ok(&respdata));
        Ok(self)
    }

    async fn handle_list_without_items(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.uri().to_string(), WIDGETS);
        send.send_response(ok(&json!({"kind": "Status", "apiVersion": "v1", "status": "Success", "code": 200})));
        Ok(self)
    }

    async fn handle_get_owned(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri().to_string(), format!("{WIDGETS}/blue"));
        send.send_response(ok(&Widget::owned(3, "5")));
        Ok(self)
    }

    async fn handle_replace_owned(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.uri().to_string(), format!("{WIDGETS}/blue"));
        let body: Value = serde_json::from_slice(&request.into_body().collect_bytes().await?)?;
        let mut expected = Widget::owned(9, "5");
        assert_eq!(body["metadata"], expected["metadata"]);
        assert_eq!(body["size"], 9);
        expected["metadata"]["resourceVersion"] = json!("6");
        send.send_response(ok(&expected));
        Ok(self)
    }

    async fn handle_create(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.uri().to_string(), WIDGETS);
        assert_eq!(request.headers()["content-type"], "application/json");
        let body: Value = serde_json::from_slice(&request.into_body().collect_bytes().await?)?;
        assert!(body["metadata"].get("uid").is_none());
        assert_json_include!(
            actual: body,
            expected: json!({ "metadata": { "name": "blue", "namespace": "apps" }, "size": 3 })
        );
        send.send_response(ok(&Widget::stored("blue", 3, "1")));
        Ok(self)
    }

    async fn handle_get_existing(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri().to_string(), format!("{WIDGETS}/blue"));
        send.send_response(ok(&Widget::stored("blue", 3, "5")));
        Ok(self)
    }

    async fn handle_replace(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.uri().to_string(), format!("{WIDGETS}/blue"));
        let body: Value = serde_json::from_slice(&request.into_body().collect_bytes().await?)?;
        assert_eq!(body["metadata"]["uid"], "uid-blue");
        assert_eq!(body["metadata"]["resourceVersion"], "5");
        assert_eq!(body["size"], 4);
        send.send_response(ok(&Widget::stored("blue", 4, "6")));
        Ok(self)
    }

    async fn handle_conflict(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::PUT);
        send.send_response(status(StatusCode::CONFLICT, "Conflict"));
        Ok(self)
    }

    async fn handle_replace_status(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.uri().to_string(), format!("{WIDGETS}/blue/status"));
        send.send_response(ok(&Widget::stored("blue", 99, "7")));
        Ok(self)
    }

    async fn handle_delete_foreground(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(request.uri().to_string(), format!("{WIDGETS}/blue"));
        let body: Value = serde_json::from_slice(&request.into_body().collect_bytes().await?)?;
        assert_eq!(body, json!({ "propagationPolicy": "Foreground" }));
        send.send_response(ok(&json!({ "kind": "Status", "status": "Success", "code": 200 })));
        Ok(self)
    }

    async fn handle_batch_delete(mut self) -> Result<Self> {
        let mut seen = Vec::new();
        for _ in 0..3 {
            let (request, send) = self.0.next_request().await.expect("service not called");
            assert_eq!(request.method(), Method::DELETE);
            let name = request.uri().path().rsplit('/').next().unwrap_or_default().to_string();
            let response = match name.as_str() {
                "a" => ok(&Widget::stored("a", 0, "3")),
                "b" => status(StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
                _ => status(StatusCode::NOT_FOUND, "NotFound"),
            };
            send.send_response(response);
            seen.push(name);
        }
        seen.sort();
        assert_eq!(seen, ["a", "b", "c"]);
        Ok(self)
    }

    async fn handle_watch_events(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri().to_string(), format!("{WIDGETS}?watch=true&timeoutSeconds=30"));
        let lines = [
            json!({ "type": "ADDED", "object": Widget::stored("a", 1, "20") }),
            json!({ "type": "MODIFIED", "object": Widget::stored("a", 2, "21") }),
            json!({ "type": "DELETED", "object": Widget::stored("a", 2, "22") }),
        ];
        send.send_response(stream_body(&lines.map(|l| l.to_string())));
        Ok(self)
    }

    async fn handle_watch_garbage(mut self) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert_eq!(request.uri().to_string(), "/apis/demo.kubent.rs/v1/widgets?watch=true");
        let lines = [
            json!({ "type": "ADDED", "object": Widget::stored("a", 1, "20") }).to_string(),
            json!({ "type": "ADDED", "object": { "metadata": { "name": 5 } } }).to_string(),
            json!({ "type": "DELETED", "object": Widget::stored("b", 1, "21") }).to_string(),
        ];
        send.send_response(stream_body(&lines));
        Ok(self)
    }

    async fn handle_watch_rejected(mut self) -> Result<Self> {
        let (_request, send) = self.0.next_request().await.expect("service not called");
        send.send_response(status(StatusCode::INTERNAL_SERVER_ERROR, "InternalError"));
        Ok(self)
    }

    async fn handle_watch_stall(mut self, token: CancellationToken) -> Result<Self> {
        let (request, send) = self.0.next_request().await.expect("service not called");
        assert!(request.uri().query().unwrap_or_default().contains("watch=true"));
        // hold the response until the watch is cancelled
        token.cancelled().await;
        drop(send);
        Ok(self)
    }
}

fn ok(data: &impl Serialize) -> Response<Body> {
    let response = serde_json::to_vec(data).unwrap(); // respond as the apiserver would have
    Response::builder().body(Body::from(response)).unwrap()
}

fn status(code: StatusCode, reason: &str) -> Response<Body> {
    let respdata = json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("widgets \"blue\": {reason}"),
        "reason": reason,
        "code": code.as_u16(),
    });
    Response::builder()
        .status(code)
        .body(Body::from(serde_json::to_vec(&respdata).unwrap()))
        .unwrap()
}

fn stream_body(lines: &[String]) -> Response<Body> {
    let mut body = lines.join("\n");
    body.push('\n');
    Response::builder().body(Body::from(body.into_bytes())).unwrap()
}

// Create a test context with a mocked client
fn testcontext() -> (Client, ApiServerVerifier) {
    let (mock_service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
    let mock_client = Client::new(mock_service, "apps");
    (mock_client, ApiServerVerifier(handle))
}
