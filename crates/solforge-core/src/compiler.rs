//! Compiler boundary: the standard JSON documents exchanged with a Solidity compiler
//! and the [`SolidityCompiler`] trait every compiler driver implements.
//!
//! Request:
//! ```json
//! { "language": "Solidity",
//!   "sources": { "<file>": { "content": "..." } },
//!   "settings": { "outputSelection": { "*": { "*": ["*"] } } } }
//! ```
//! Response:
//! ```json
//! { "contracts": { "<file>": { "<contract>": { "abi": [...], "evm": { "bytecode": { "object": "6080..." } } } } },
//!   "errors": [...] }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ForgeError, Result};
use crate::resolver::ImportResolver;
use crate::templates::renderer::ResolvedSource;

/// Language tag sent to the compiler.
pub const SOLIDITY: &str = "Solidity";

/// Selector matching every file, every contract or every output.
pub const WILDCARD: &str = "*";

/// Compilation Input Document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerInput {
    pub language: String,
    pub sources: BTreeMap<String, Source>,
    pub settings: Settings,
}

/// One inline source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// file -> contract -> list of outputs.
    pub output_selection: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl Settings {
    /// Select every output for every contract in every file.
    pub fn select_all() -> Self {
        let contracts = BTreeMap::from([(WILDCARD.to_string(), vec![WILDCARD.to_string()])]);
        Self {
            output_selection: BTreeMap::from([(WILDCARD.to_string(), contracts)]),
        }
    }
}

impl CompilerInput {
    /// Single-source compilation unit keyed by the source's name, selecting all outputs.
    pub fn new(source: &ResolvedSource) -> Self {
        let sources = BTreeMap::from([(
            source.name.clone(),
            Source {
                content: source.content.clone(),
            },
        )]);
        Self {
            language: SOLIDITY.to_string(),
            sources,
            settings: Settings::select_all(),
        }
    }
}

/// Compilation Output Document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilerOutput {
    /// file -> contract name -> artifacts.
    #[serde(default)]
    pub contracts: BTreeMap<String, BTreeMap<String, Contract>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Diagnostic>,
}

impl CompilerOutput {
    /// Diagnostics with `error` severity.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Artifacts of one compiled contract. Only the parts solforge uses are typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evm: Option<Evm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytecode: Option<Bytecode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bytecode {
    /// Hex without a `0x` prefix.
    pub object: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    #[serde(other)]
    Unknown,
}

/// One entry of the compiler's `errors` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    /// e.g. `ParserError`, `TypeError`, `Warning`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub component: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_location: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub start: i64,
    pub end: i64,
}

/// A Solidity compiler reachable from the host.
///
/// `compile` blocks until the compiler is done. While it runs, the compiler may call
/// `resolver` any number of times for imports missing from `input`. The returned
/// string is the compiler's serialized output document.
pub trait SolidityCompiler {
    fn compile(&self, input: &CompilerInput, resolver: &dyn ImportResolver) -> Result<String>;
}

/// Compile `source` as the only inline source and decode the compiler's answer.
pub fn invoke(
    compiler: &dyn SolidityCompiler,
    source: &ResolvedSource,
    resolver: &dyn ImportResolver,
) -> Result<CompilerOutput> {
    let input = CompilerInput::new(source);

    tracing::info!(source = %source.name, "about to launch solc compiler");
    let raw = compiler.compile(&input, resolver)?;
    tracing::info!(bytes = raw.len(), "solc compiler done");

    let output: CompilerOutput = serde_json::from_str(&raw).map_err(ForgeError::OutputParse)?;
    tracing::debug!(
        files = output.contracts.len(),
        diagnostics = output.errors.len(),
        "decoded compiler output"
    );
    Ok(output)
}
