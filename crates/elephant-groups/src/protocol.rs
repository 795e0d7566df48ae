//! Host message contract.
//!
//! Requests arrive as `{"numElephants": <number>}`; every request produces
//! exactly one response:
//!
//! ```json
//! {"success": true, "result": {"numElephants": 2, "minGroups": 2, "k": 1, "encodingsCount": 2, "groups": [[2], [1]]}}
//! {"success": false, "error": "Invalid number of elephants: 2.5"}
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grouping::GroupAssigner;
use crate::model::GroupingResult;

/// A grouping request as sent by the host.
///
/// `num_elephants` stays a raw JSON value so that fractional, negative or
/// missing counts reach the validator and come back as an
/// `InvalidItemCount` failure rather than a decode error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupingRequest {
    #[serde(default)]
    pub num_elephants: serde_json::Value,
}

impl GroupingRequest {
    pub fn new(num_elephants: impl Into<serde_json::Value>) -> Self {
        Self {
            num_elephants: num_elephants.into(),
        }
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireResponse", try_from = "WireResponse")]
pub enum GroupingResponse {
    Success(GroupingResult),
    Failure(String),
}

impl GroupingResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn result(&self) -> Option<&GroupingResult> {
        match self {
            Self::Success(result) => Some(result),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }
}

/// Flat `{success, result?, error?}` shape used on the wire.
#[derive(Serialize, Deserialize)]
struct WireResponse {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<GroupingResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<GroupingResponse> for WireResponse {
    fn from(response: GroupingResponse) -> Self {
        match response {
            GroupingResponse::Success(result) => Self {
                success: true,
                result: Some(result),
                error: None,
            },
            GroupingResponse::Failure(message) => Self {
                success: false,
                result: None,
                error: Some(message),
            },
        }
    }
}

impl TryFrom<WireResponse> for GroupingResponse {
    type Error = String;

    fn try_from(wire: WireResponse) -> Result<Self, String> {
        match (wire.success, wire.result, wire.error) {
            (true, Some(result), _) => Ok(Self::Success(result)),
            (true, None, _) => Err("successful response without result".to_string()),
            (false, _, error) => Ok(Self::Failure(error.unwrap_or_default())),
        }
    }
}

/// Answer a single request.
///
/// Every failure becomes a [`GroupingResponse::Failure`] carrying the error
/// message; no partial result is ever returned.
pub fn respond(assigner: &GroupAssigner, request: &GroupingRequest) -> GroupingResponse {
    match assigner.compute(&request.num_elephants) {
        Ok(result) => GroupingResponse::Success(result),
        Err(err) => {
            debug!(error = %err, "grouping request failed");
            GroupingResponse::failure(err.to_string())
        }
    }
}

/// Answer a raw JSON message with a JSON-encoded response.
///
/// Malformed messages get a failure response like any other bad request.
pub fn respond_json(assigner: &GroupAssigner, message: &str) -> String {
    let response = match parse_request(message) {
        Ok(request) => respond(assigner, &request),
        Err(failure) => failure,
    };
    encode_response(&response)
}

/// Decode a raw JSON message, or produce the failure response for it.
pub fn parse_request(message: &str) -> Result<GroupingRequest, GroupingResponse> {
    serde_json::from_str(message)
        .map_err(|err| GroupingResponse::failure(format!("Malformed request: {err}")))
}

/// Encode a response as a single JSON line.
pub fn encode_response(response: &GroupingResponse) -> String {
    match serde_json::to_string(response) {
        Ok(line) => line,
        Err(err) => {
            let message = serde_json::Value::String(err.to_string());
            format!(r#"{{"success":false,"error":{message}}}"#)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_shape() {
        let response = respond(&GroupAssigner::default(), &GroupingRequest::new(2));
        assert!(response.is_success());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "result": {
                    "numElephants": 2,
                    "minGroups": 2,
                    "k": 1,
                    "encodingsCount": 2,
                    "groups": [[2], [1]],
                },
            })
        );
    }

    #[test]
    fn failure_shape() {
        let response = respond(&GroupAssigner::default(), &GroupingRequest::new(2.5));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": false, "error": "Invalid number of elephants: 2.5"})
        );
    }

    #[test]
    fn missing_count_is_invalid() {
        let line = respond_json(&GroupAssigner::default(), "{}");
        let response: GroupingResponse = serde_json::from_str(&line).unwrap();
        assert_eq!(response.error(), Some("Invalid number of elephants: null"));
    }

    #[test]
    fn malformed_json_is_a_failure() {
        let line = respond_json(&GroupAssigner::default(), "{not json");
        let response: GroupingResponse = serde_json::from_str(&line).unwrap();
        assert!(response.error().unwrap().starts_with("Malformed request:"));
    }

    #[test]
    fn response_roundtrip() {
        let line = respond_json(&GroupAssigner::default(), r#"{"numElephants": 4}"#);
        let response: GroupingResponse = serde_json::from_str(&line).unwrap();
        let result = response.result().unwrap();
        assert_eq!(result.min_groups, 4);
        assert_eq!(result.k, 2);
    }

    #[test]
    fn success_without_result_is_rejected() {
        assert!(serde_json::from_str::<GroupingResponse>(r#"{"success": true}"#).is_err());
    }
}
