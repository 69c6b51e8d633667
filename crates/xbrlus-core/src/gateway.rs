//! The gateway trait through which all API queries flow.
//!
//! Higher-level components (network resolution, concept loading, fact
//! pagination) never talk to the network directly; they depend on
//! [`Gateway`] and decode the JSON envelope it returns via
//! [`decode_envelope`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, XbrlError};

/// Sole network egress point for authenticated XBRL US API queries.
///
/// `endpoint` is the path relative to the API base URL and may carry its own
/// query suffix (e.g. `fact/search?unique`); `params` are appended to it.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issues an authenticated GET and returns the parsed JSON body.
    async fn get(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value>;
}

/// Decodes the `data` array of a query response into typed records.
///
/// Fails with [`XbrlError::Decode`] when the envelope has no `data` array or
/// when any row is missing a required field.
pub fn decode_envelope<T: DeserializeOwned>(body: Value) -> Result<Vec<T>> {
    let rows = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(rows)) => rows,
            Some(other) => {
                return Err(XbrlError::Decode(format!(
                    "expected `data` to be an array, got {other}"
                )));
            }
            None => return Err(XbrlError::Decode("response has no `data` field".to_string())),
        },
        other => {
            return Err(XbrlError::Decode(format!(
                "expected a JSON object envelope, got {other}"
            )));
        }
    };

    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| XbrlError::Decode(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        #[serde(rename = "network.id")]
        id: i64,
    }

    #[test]
    fn decodes_data_rows() {
        let body = json!({"data": [{"network.id": 1}, {"network.id": 2}]});
        let rows: Vec<Row> = decode_envelope(body).unwrap();
        assert_eq!(rows, vec![Row { id: 1 }, Row { id: 2 }]);
    }

    #[test]
    fn missing_data_field_is_a_decode_error() {
        let body = json!({"paging": {}});
        let err = decode_envelope::<Row>(body).unwrap_err();
        assert!(matches!(err, XbrlError::Decode(_)));
    }

    #[test]
    fn missing_required_field_is_a_decode_error() {
        let body = json!({"data": [{"network.role-description": "x"}]});
        let err = decode_envelope::<Row>(body).unwrap_err();
        assert!(matches!(err, XbrlError::Decode(_)));
    }
}
