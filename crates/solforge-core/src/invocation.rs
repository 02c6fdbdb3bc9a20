//! Invocation boundary: wraps a pipeline run in a `{statusCode, body}` envelope.
//!
//! Success is `200` with `{"abi": [...], "bytecode": "0x..."}`. Any failure becomes
//! a structured body tagged with its [`crate::error::ErrorKind`]:
//!
//! ```json
//! { "error": { "kind": "compiler_diagnostic", "message": "...", "diagnostics": [...] } }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::artifact::ArtifactResponse;
use crate::error::ForgeError;
use crate::pipeline::Pipeline;

/// Transport-level response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    /// JSON-encoded payload.
    pub body: String,
}

impl Response {
    pub fn ok(artifacts: &ArtifactResponse) -> Self {
        Self {
            status_code: 200,
            body: json!({ "abi": artifacts.abi, "bytecode": artifacts.bytecode }).to_string(),
        }
    }

    pub fn from_error(err: &ForgeError) -> Self {
        let kind = err.kind();
        let mut error = json!({
            "kind": kind,
            "message": error_chain(err),
        });
        if let ForgeError::CompilerDiagnostics(diagnostics) = err {
            error["diagnostics"] = json!(diagnostics);
        }
        Self {
            status_code: kind.status_code(),
            body: json!({ "error": error }).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// `err` followed by each of its sources, separated by `: `.
fn error_chain(err: &ForgeError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Serve one request. The request document is accepted but does not influence the
/// result: the pipeline always compiles its configured template.
pub fn handle(pipeline: &Pipeline, request: &Value) -> Response {
    tracing::debug!(request = %request, "handling compile request");
    match pipeline.run() {
        Ok(artifacts) => Response::ok(&artifacts),
        Err(err) => {
            tracing::error!(kind = ?err.kind(), error = %err, "compile request failed");
            Response::from_error(&err)
        }
    }
}
