use std::path::Path;

use anyhow::Result;
use serde_json::Value;

use solforge_core::error;
use solforge_core::invocation::{self, Response};
use solforge_core::pipeline::Pipeline;
use solforge_core::project;
use solforge_solc::SolcCompiler;

/// Serve one request the way a function host would and print the response envelope.
///
/// Every failure, including a missing config or compiler, ends up as a structured
/// `{statusCode, body}` document on stdout.
pub async fn run(config_path: &Path, request_path: Option<&Path>) -> Result<()> {
    let request = match request_path {
        Some(path) => read_request(path)?,
        None => Value::Null,
    };

    let project_dir = super::project_dir(config_path);
    let response = tokio::task::spawn_blocking(move || match build_pipeline(&project_dir) {
        Ok(pipeline) => invocation::handle(&pipeline, &request),
        Err(err) => Response::from_error(&err),
    })
    .await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn build_pipeline(project_dir: &Path) -> error::Result<Pipeline> {
    let config = project::load_project(project_dir)?;
    let solc = SolcCompiler::locate(config.solc.binary.as_deref())?;
    Ok(Pipeline::from_config(project_dir, &config, Box::new(solc)))
}

/// The request is opaque: JSON is kept as parsed, anything else as a string.
fn read_request(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
}
