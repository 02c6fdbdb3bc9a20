use std::path::{Path, PathBuf};

use anyhow::Result;
use sha2::{Digest, Sha256};

use solforge_core::artifact::ArtifactResponse;
use solforge_core::pipeline::Pipeline;
use solforge_core::project;
use solforge_solc::SolcCompiler;

use crate::output;

/// Compile the configured template and save the ABI + bytecode artifact.
///
/// The artifact goes to `target/<Contract>.json` in the project directory unless
/// `--output` or `--stdout` says otherwise.
pub async fn run(config_path: &Path, output_path: Option<&Path>, to_stdout: bool) -> Result<()> {
    let project_dir = super::project_dir(config_path);
    let config = project::load_project(&project_dir)?;

    if !to_stdout {
        output::print_header("solforge compile");
        output::print_key_value("Template", &config.template.name);
        output::print_key_value("Contract", &config.template.contract);
        output::print_step(1, 2, "Compiling template with solc...");
    }

    let contract = config.template.contract.clone();
    let dir = project_dir.clone();
    let response = tokio::task::spawn_blocking(move || {
        let solc = SolcCompiler::locate(config.solc.binary.as_deref())?;
        Pipeline::from_config(&dir, &config, Box::new(solc)).run()
    })
    .await??;

    let json = serde_json::to_string_pretty(&response)?;
    if to_stdout {
        println!("{json}");
        return Ok(());
    }

    let path = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(&project_dir, &contract));
    output::print_step(2, 2, "Saving artifact...");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, json)?;
    tracing::debug!(path = %path.display(), "wrote artifact");

    output::print_success("Compilation complete");
    let summary = summarize(&response);
    output::print_key_value("ABI entries", &summary.abi_entries.to_string());
    output::print_key_value("Bytecode", &format!("{} bytes", summary.bytecode_bytes));
    output::print_key_value("SHA-256", &summary.fingerprint);
    output::print_key_value("Artifact", &path.display().to_string());

    Ok(())
}

fn default_output(project_dir: &Path, contract: &str) -> PathBuf {
    project_dir.join("target").join(format!("{contract}.json"))
}

struct Summary {
    abi_entries: usize,
    bytecode_bytes: usize,
    /// SHA-256 of the `0x`-prefixed bytecode string; equal across identical builds.
    fingerprint: String,
}

fn summarize(response: &ArtifactResponse) -> Summary {
    let hex_digits = response.bytecode.trim_start_matches("0x").len();
    Summary {
        abi_entries: response.abi.as_array().map_or(0, Vec::len),
        bytecode_bytes: hex_digits / 2,
        fingerprint: hex::encode(Sha256::digest(response.bytecode.as_bytes())),
    }
}
