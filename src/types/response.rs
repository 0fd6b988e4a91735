//! Response type definitions
//!
//! Interprets the JSON object returned by the gateway.

use crate::{Error, Result};
use serde_json::Value;

/// Extract the `result` member of a decoded gateway response.
///
/// A present `result` is returned as is, `null` included. Anything else is a
/// [`Error::Remote`] carrying the service's `fault` member, or the whole body
/// when there is no fault.
pub fn into_result(response: Value) -> Result<Value> {
    let mut body = match response {
        Value::Object(body) => body,
        other => {
            return Err(Error::remote(
                "gateway response is not a JSON object",
                Some(other),
            ));
        }
    };

    if let Some(result) = body.remove("result") {
        return Ok(result);
    }

    match body.remove("fault") {
        Some(fault) => {
            let message = fault
                .get("message")
                .and_then(Value::as_str)
                .map(|m| format!("gateway fault: {}", m))
                .unwrap_or_else(|| "gateway fault".to_string());
            Err(Error::remote(message, Some(fault)))
        }
        None => Err(Error::remote(
            "gateway response has no result",
            Some(Value::Object(body)),
        )),
    }
}
