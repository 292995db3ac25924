//! Callback driven watches
//!
//! A [`Watcher`] drives a stream of [`WatchEvent`]s into caller supplied handlers and
//! moves through `Opening -> Streaming -> {Closed, Errored, Cancelled}`.
//! Exactly one terminal handler fires per watch: `on_close` after a clean end or a
//! cancellation, `on_error` after a transport failure.
use std::{fmt::Debug, future::Future};

use futures::{pin_mut, Stream, StreamExt};
use serde::de::DeserializeOwned;
use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{api::Api, Error, Result};
use kubent_core::{params::WatchParams, Resource, WatchEvent};

/// Lifecycle of a watch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchState {
    /// The watch request is in flight
    Opening,
    /// Events are being dispatched
    Streaming,
    /// The server ended the stream
    Closed,
    /// The connection failed
    Errored,
    /// The caller cancelled the watch
    Cancelled,
}

impl WatchState {
    /// Whether no more events will be dispatched
    pub fn is_terminal(self) -> bool {
        matches!(self, WatchState::Closed | WatchState::Errored | WatchState::Cancelled)
    }
}

type EventHandler<K> = Box<dyn FnMut(WatchEvent<K>) + Send>;
type ErrorHandler = Box<dyn FnMut(&Error) + Send>;
type CloseHandler = Box<dyn FnOnce() + Send>;

/// Handlers invoked by a [`Watcher`]
///
/// `on_event` runs synchronously for each event in arrival order,
/// so a slow handler slows down reading.
pub struct WatchHandlers<K> {
    on_event: EventHandler<K>,
    on_error: Option<ErrorHandler>,
    on_close: Option<CloseHandler>,
}

impl<K> WatchHandlers<K> {
    /// Handlers dispatching every event to `on_event`
    pub fn new(on_event: impl FnMut(WatchEvent<K>) + Send + 'static) -> Self {
        Self {
            on_event: Box::new(on_event),
            on_error: None,
            on_close: None,
        }
    }

    /// Called for undecodable events and once for a terminal failure
    #[must_use]
    pub fn on_error(mut self, f: impl FnMut(&Error) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Called once when the stream ends cleanly or is cancelled
    #[must_use]
    pub fn on_close(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }
}

/// The watch state machine
///
/// Consumes a single event stream; [`Watcher::run`] returns the terminal state.
pub struct Watcher<K> {
    handlers: WatchHandlers<K>,
    state: watch::Sender<WatchState>,
}

impl<K> Watcher<K> {
    /// Create a watcher in the `Opening` state
    pub fn new(handlers: WatchHandlers<K>) -> Self {
        let (state, _) = watch::channel(WatchState::Opening);
        Self { handlers, state }
    }

    /// Observe state changes of this watcher
    pub fn subscribe(&self) -> watch::Receiver<WatchState> {
        self.state.subscribe()
    }

    /// Open the stream and dispatch events until it terminates
    ///
    /// `open` resolves to the event stream. Cancelling `token` stops the watch at the
    /// next read, including while the stream is still opening.
    pub async fn run<F, S>(mut self, open: F, token: CancellationToken) -> WatchState
    where
        F: Future<Output = Result<S>>,
        S: Stream<Item = Result<WatchEvent<K>>>,
    {
        let opened = tokio::select! {
            biased;
            _ = token.cancelled() => return self.close(WatchState::Cancelled),
            opened = open => opened,
        };
        let stream = match opened {
            Ok(stream) => stream,
            Err(err) => return self.fail(err),
        };
        pin_mut!(stream);
        self.transition(WatchState::Streaming);

        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => return self.close(WatchState::Cancelled),
                next = stream.next() => next,
            };
            match next {
                Some(Ok(event)) => (self.handlers.on_event)(event),
                // an undecodable envelope does not end the stream
                Some(Err(err @ (Error::SerdeError(_) | Error::Api(_)))) => {
                    tracing::warn!("skipping watch event: {err}");
                    if let Some(on_error) = self.handlers.on_error.as_mut() {
                        on_error(&err);
                    }
                }
                Some(Err(err)) => return self.fail(err),
                None => return self.close(WatchState::Closed),
            }
        }
    }

    fn transition(&self, state: WatchState) {
        tracing::debug!(?state, "watch state changed");
        self.state.send_replace(state);
    }

    fn close(mut self, state: WatchState) -> WatchState {
        self.transition(state);
        if let Some(on_close) = self.handlers.on_close.take() {
            on_close();
        }
        state
    }

    fn fail(mut self, err: Error) -> WatchState {
        tracing::warn!("watch failed: {err}");
        self.transition(WatchState::Errored);
        if let Some(on_error) = self.handlers.on_error.as_mut() {
            on_error(&err);
        }
        WatchState::Errored
    }
}

/// A running watch
///
/// Dropping the handle does not stop the watch; call [`WatchHandle::cancel`].
pub struct WatchHandle {
    token: CancellationToken,
    state: watch::Receiver<WatchState>,
    task: JoinHandle<WatchState>,
}

impl WatchHandle {
    /// Request cancellation, the watch ends in [`WatchState::Cancelled`] unless it already ended
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The current state
    pub fn state(&self) -> WatchState {
        *self.state.borrow()
    }

    /// Whether the watch task has ended
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the watch to end and return its terminal state
    ///
    /// Fails only if a handler panicked.
    pub async fn join(self) -> std::result::Result<WatchState, tokio::task::JoinError> {
        self.task.await
    }
}

impl<K> Api<K>
where
    K: Resource + Clone + DeserializeOwned + Debug + Send + 'static,
{
    /// Watch resources, dispatching events to `handlers` on a background task
    ///
    /// The server ends the watch after `wp.timeout` seconds when set.
    /// Cancelling `token` (or calling [`WatchHandle::cancel`]) stops it earlier.
    /// Must be called within a tokio runtime.
    ///
    /// ```no_run
    /// # use kubent_client::{api::{WatchHandlers, WatchParams}, Api};
    /// # use kubent_core::{ObjectMeta, WatchEvent};
    /// # use tokio_util::sync::CancellationToken;
    /// # #[derive(Clone, Debug, serde::Deserialize, kubent_derive::Resource)]
    /// # #[resource(version = "v1", crates(kubent_core = "::kubent_core"))]
    /// # struct Widget { metadata: ObjectMeta }
    /// # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client: kubent_client::Client = todo!();
    /// let widgets: Api<Widget> = Api::new(client)?;
    /// let handlers = WatchHandlers::new(|event: WatchEvent<Widget>| println!("{event:?}"))
    ///     .on_error(|err| eprintln!("watch error: {err}"))
    ///     .on_close(|| println!("closed"));
    /// let handle = widgets.watch(Some("apps"), &WatchParams::default().timeout(60), handlers, CancellationToken::new());
    /// let state = handle.join().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn watch(
        &self,
        namespace: Option<&str>,
        wp: &WatchParams,
        handlers: WatchHandlers<K>,
        token: CancellationToken,
    ) -> WatchHandle {
        let api = self.clone();
        let namespace = namespace.map(str::to_string);
        let wp = wp.clone();
        let watcher = Watcher::new(handlers);
        let state = watcher.subscribe();
        let task_token = token.clone();
        let task = tokio::spawn(async move {
            let open = api.watch_events(namespace.as_deref(), &wp);
            watcher.run(open, task_token).await
        });
        WatchHandle { token, state, task }
    }
}
