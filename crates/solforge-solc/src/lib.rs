//! `solc` driver for solforge.
//!
//! Runs a native [solc](https://docs.soliditylang.org/) binary in `--standard-json`
//! mode. Because a separate process cannot call back into the host, imports are
//! resolved on the host before the process starts (see [`sources`]); units the
//! resolver cannot serve are left out and `solc` reports them as diagnostics.
//!
//! **Prerequisites**: `solc` on `PATH`, or an explicit binary path in the config.

mod imports;
mod sources;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use solforge_core::compiler::{CompilerInput, SolidityCompiler};
use solforge_core::error::{ForgeError, Result};
use solforge_core::resolver::ImportResolver;

pub use sources::{resolve_closure, ResolvedInput};

const SOLC: &str = "solc";
const SOLC_INSTALL: &str = "https://docs.soliditylang.org/en/latest/installing-solidity.html";

/// A native `solc` executable.
#[derive(Debug, Clone)]
pub struct SolcCompiler {
    binary: PathBuf,
}

impl SolcCompiler {
    /// Use the given binary without checking it.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Locate `solc`: the configured path if any, otherwise `solc` on `PATH`.
    pub fn locate(configured: Option<&Path>) -> Result<Self> {
        let found = match configured {
            Some(path) => which::which(path),
            None => which::which(SOLC),
        };
        let binary = found.map_err(|_| missing_tool())?;
        tracing::debug!(binary = %binary.display(), "using solc");
        Ok(Self { binary })
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Feed `input` to `solc --standard-json` and return its stdout.
    fn run_standard_json(&self, input: &CompilerInput) -> Result<String> {
        let mut child = Command::new(&self.binary)
            .arg("--standard-json")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => missing_tool(),
                _ => ForgeError::CompilerInvocation(e.to_string()),
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ForgeError::CompilerInvocation("solc stdin unavailable".into()))?;
        // Dropping the writer closes stdin so solc starts compiling.
        serde_json::to_writer(stdin, input)
            .map_err(|e| ForgeError::CompilerInvocation(format!("writing input: {e}")))?;

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(ForgeError::CompilerInvocation(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }
        String::from_utf8(output.stdout)
            .map_err(|e| ForgeError::CompilerInvocation(format!("non UTF-8 output: {e}")))
    }
}

fn missing_tool() -> ForgeError {
    ForgeError::MissingTool {
        name: SOLC.into(),
        install: SOLC_INSTALL.into(),
    }
}

impl SolidityCompiler for SolcCompiler {
    fn compile(&self, input: &CompilerInput, resolver: &dyn ImportResolver) -> Result<String> {
        let resolved = resolve_closure(input, resolver);
        tracing::info!(
            sources = resolved.input.sources.len(),
            unresolved = resolved.unresolved.len(),
            "resolved imports"
        );
        self.run_standard_json(&resolved.input)
    }
}
