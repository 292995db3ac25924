use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The server's status envelope for a failed call.
///
/// Also delivered as the payload of `ERROR` watch events.
#[derive(Error, Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[error("{message}: {reason}")]
pub struct ErrorResponse {
    /// The status, usually `Failure`
    pub status: String,
    /// A message about the error
    #[serde(default)]
    pub message: String,
    /// The reason for the error, e.g. `NotFound` or `Conflict`
    #[serde(default)]
    pub reason: String,
    /// The HTTP status code
    pub code: u16,
    /// Extended data associated with the reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,
}

/// Additional properties the server may attach to a status.
///
/// Any attribute may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    /// Detailed causes of the failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub causes: Option<Vec<StatusCause>>,
    /// Group of the resource associated with the status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Kind (or plural) of the resource associated with the status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Name of the resource associated with the status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Suggested wait before retrying
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<i32>,
    /// UID of the resource associated with the status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// A single cause of a failure
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCause {
    /// Offending field in JSON path notation, e.g. `metadata.name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Machine-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFLICT: &str = r#"
    {
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "message": "Operation cannot be fulfilled on configmaps \"settings\": the object has been modified; please apply your changes to the latest version and try again",
      "reason": "Conflict",
      "details": {
        "name": "settings",
        "kind": "configmaps"
      },
      "code": 409
    }
    "#;

    const INVALID: &str = r#"
    {
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "message": "Widget.demo.kubent.rs \"bad_name\" is invalid: metadata.name: Invalid value: \"bad_name\": a lowercase RFC 1123 subdomain must consist of lower case alphanumeric characters",
      "reason": "Invalid",
      "details": {
        "name": "bad_name",
        "group": "demo.kubent.rs",
        "kind": "Widget",
        "retryAfterSeconds": 2,
        "causes": [
          {
            "reason": "FieldValueInvalid",
            "message": "Invalid value: \"bad_name\"",
            "field": "metadata.name"
          }
        ]
      },
      "code": 422
    }
    "#;

    fn error_response(text: &str) -> serde_json::Result<ErrorResponse> {
        serde_json::from_str(text)
    }

    #[test]
    fn conflict_status() {
        let status = error_response(CONFLICT).unwrap();
        assert_eq!(status.code, 409);
        assert_eq!(status.reason, "Conflict");
        assert_eq!(status.details.unwrap().name.as_deref(), Some("settings"));
    }

    #[test]
    fn invalid_status_with_causes() {
        let status = error_response(INVALID).unwrap();
        assert_eq!(status.code, 422);
        let details = status.details.unwrap();
        assert_eq!(details.retry_after_seconds, Some(2));
        let causes = details.causes.unwrap();
        assert_eq!(causes[0].field.as_deref(), Some("metadata.name"));
    }

    #[test]
    fn different() {
        assert_ne!(error_response(CONFLICT).unwrap(), error_response(INVALID).unwrap());
    }
}
