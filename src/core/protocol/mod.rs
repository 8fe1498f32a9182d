//! Wire types for the line-delimited JSON protocol.
//!
//! Every input line carries one [`Request`]; every request gets exactly one
//! [`Response`] line back, echoing the request `id`. A response holds either
//! a result or a [`ProtocolError`], never both.
//!
//! Error codes follow the JSON-RPC 2.0 numbering:
//!
//! | code     | meaning                              |
//! |----------|--------------------------------------|
//! | `-32700` | line is not a well-formed request    |
//! | `-32601` | unknown method, or unknown tool name |
//! | `-32602` | params rejected by the handler       |
//! | `-32603` | handler or tool failed internally    |

mod dispatcher;
mod methods;

pub use dispatcher::{DispatchError, DispatchResult, Dispatcher, FnHandler, MethodHandler};
pub use methods::{
    CallToolMethod, InitializeMethod, ListResourcesMethod, ListToolsMethod, ReadResourceMethod,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// JSON-RPC version stamped on every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// Protocol revision reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// ============================================================================
// Request
// ============================================================================

/// A decoded client call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Correlation token: string, number or null.
    #[serde(default)]
    pub id: Value,

    /// Method name, never empty.
    pub method: String,

    /// Arbitrary parameters, not interpreted by the dispatcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Request {
    /// Create a request with the given id and method.
    pub fn new(id: impl Into<Value>, method: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            method: method.into(),
            params: None,
        }
    }

    /// Attach params to the request.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Decode one raw input line.
    ///
    /// Anything that is not a JSON object with a non-empty string `method`
    /// and a string/number/null `id` is rejected with a parse error. When the
    /// line is an object with a usable `id`, that id is kept on the failure
    /// so the client can still correlate the error.
    pub fn decode(line: &[u8]) -> Result<Self, ParseFailure> {
        let value: Value = serde_json::from_slice(line)
            .map_err(|e| ParseFailure::new(Value::Null, format!("Parse error: {}", e)))?;

        let Value::Object(mut object) = value else {
            return Err(ParseFailure::new(
                Value::Null,
                "Parse error: request must be a JSON object",
            ));
        };

        let id = match object.remove("id") {
            None | Some(Value::Null) => Value::Null,
            Some(id @ (Value::String(_) | Value::Number(_))) => id,
            Some(_) => {
                return Err(ParseFailure::new(
                    Value::Null,
                    "Parse error: id must be a string, a number or null",
                ));
            }
        };

        let method = match object.remove("method") {
            Some(Value::String(method)) if !method.trim().is_empty() => method,
            Some(Value::String(_)) => {
                return Err(ParseFailure::new(id, "Parse error: method must not be empty"));
            }
            Some(_) => {
                return Err(ParseFailure::new(id, "Parse error: method must be a string"));
            }
            None => return Err(ParseFailure::new(id, "Parse error: missing method")),
        };

        let params = object.remove("params").filter(|params| !params.is_null());

        Ok(Self { id, method, params })
    }
}

/// A line that could not be decoded into a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    /// The id recovered from the line, or null.
    pub id: Value,
    pub error: ProtocolError,
}

impl ParseFailure {
    fn new(id: Value, message: impl Into<String>) -> Self {
        Self {
            id,
            error: ProtocolError::new(PARSE_ERROR, message),
        }
    }

    /// The single error response owed for this line.
    pub fn into_response(self) -> Response {
        Response::error(self.id, self.error)
    }
}

// ============================================================================
// Response
// ============================================================================

/// The single reply to a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,

    /// Echo of the request id, or null when the request was unparsable.
    pub id: Value,

    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Either a result or an error, serialized as the `result` / `error` member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(ProtocolError),
}

impl Response {
    /// Create a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: Outcome::Result(result),
        }
    }

    /// Create an error response.
    pub fn error(id: Value, error: ProtocolError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: Outcome::Error(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(result) => Some(result),
            Outcome::Error(_) => None,
        }
    }

    pub fn error_ref(&self) -> Option<&ProtocolError> {
        match &self.outcome {
            Outcome::Error(error) => Some(error),
            Outcome::Result(_) => None,
        }
    }
}

// ============================================================================
// ProtocolError
// ============================================================================

/// Error object carried by a failed response.
///
/// Messages are meant for the client: they never include internal error
/// detail.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} ({code})")]
pub struct ProtocolError {
    pub code: i32,
    pub message: String,
}

impl ProtocolError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    pub fn tool_not_found(name: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Tool not found: {}", name))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    /// The sanitized internal error. Detail is logged, never sent.
    pub fn internal() -> Self {
        Self::new(INTERNAL_ERROR, "Internal error")
    }
}
