//! Artifact extraction: picks one contract out of the compiler's multi-contract output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compiler::{CompilerOutput, Severity};
use crate::error::{ForgeError, Result};

/// Terminal output of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactResponse {
    /// ABI descriptor exactly as emitted by the compiler.
    pub abi: Value,
    /// `0x`-prefixed bytecode object.
    pub bytecode: String,
}

/// Prefix the compiler's bytecode object with `0x`. The object is not re-encoded.
pub fn format_bytecode(object: &str) -> String {
    format!("0x{object}")
}

/// Fail with every error-severity diagnostic the compiler reported.
///
/// Warnings and infos are logged and let through.
pub fn check_diagnostics(output: &CompilerOutput) -> Result<()> {
    for diagnostic in &output.errors {
        if diagnostic.severity != Severity::Error {
            tracing::warn!(
                kind = %diagnostic.kind,
                message = %diagnostic.message,
                "compiler diagnostic"
            );
        }
    }

    let errors: Vec<_> = output.errors().cloned().collect();
    if errors.is_empty() {
        return Ok(());
    }
    for e in &errors {
        tracing::error!(kind = %e.kind, message = %e.message, "compiler error");
    }
    Err(ForgeError::CompilerDiagnostics(errors))
}

/// Look up `contracts[source_file][contract]` and build the response payload.
pub fn extract(
    output: &CompilerOutput,
    source_file: &str,
    contract: &str,
) -> Result<ArtifactResponse> {
    let not_found = || ForgeError::ArtifactNotFound {
        source_file: source_file.to_string(),
        contract: contract.to_string(),
    };

    let artifacts = output
        .contracts
        .get(source_file)
        .and_then(|contracts| contracts.get(contract))
        .ok_or_else(not_found)?;

    let abi = artifacts.abi.clone().ok_or_else(not_found)?;
    let object = artifacts
        .evm
        .as_ref()
        .and_then(|evm| evm.bytecode.as_ref())
        .map(|bytecode| bytecode.object.as_str())
        .ok_or_else(not_found)?;

    tracing::info!(source = source_file, contract, bytes = object.len() / 2, "extracted artifacts");
    Ok(ArtifactResponse {
        abi,
        bytecode: format_bytecode(object),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(json: &str) -> CompilerOutput {
        serde_json::from_str(json).unwrap()
    }

    const COMPILED: &str = r#"{
        "contracts": {
            "EthTemplate.sol": {
                "StonerSharks": {
                    "abi": [ { "type": "function", "name": "mint", "inputs": [], "outputs": [],
                               "stateMutability": "nonpayable" } ],
                    "evm": { "bytecode": { "object": "6080604052" } }
                }
            },
            "@openzeppelin/contracts/access/Ownable.sol": {
                "Ownable": { "abi": [], "evm": { "bytecode": { "object": "" } } }
            }
        }
    }"#;

    #[test]
    fn test_extract_formats_response() {
        let response = extract(&output(COMPILED), "EthTemplate.sol", "StonerSharks").unwrap();
        assert_eq!(response.bytecode, "0x6080604052");
        assert!(response.abi.is_array());
        assert_eq!(response.abi[0]["name"], "mint");
    }

    #[test]
    fn test_bytecode_formatting_is_idempotent_over_object() {
        let doc = output(COMPILED);
        let object = &doc.contracts["EthTemplate.sol"]["StonerSharks"]
            .evm
            .as_ref()
            .unwrap()
            .bytecode
            .as_ref()
            .unwrap()
            .object;
        let response = extract(&doc, "EthTemplate.sol", "StonerSharks").unwrap();
        assert_eq!(format_bytecode(object), response.bytecode);
    }

    #[test]
    fn test_renamed_contract_is_not_found() {
        let err = extract(&output(COMPILED), "EthTemplate.sol", "OtherContract").unwrap_err();
        assert!(matches!(
            err,
            ForgeError::ArtifactNotFound { ref contract, .. } if contract == "OtherContract"
        ));
    }

    #[test]
    fn test_missing_source_file_is_not_found() {
        let err = extract(&output(COMPILED), "Other.sol", "StonerSharks").unwrap_err();
        assert!(matches!(err, ForgeError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_missing_bytecode_is_not_found() {
        let doc = output(
            r#"{ "contracts": { "EthTemplate.sol": { "StonerSharks": { "abi": [] } } } }"#,
        );
        let err = extract(&doc, "EthTemplate.sol", "StonerSharks").unwrap_err();
        assert!(matches!(err, ForgeError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_check_diagnostics_reports_errors() {
        let doc = output(
            r#"{ "errors": [
                { "severity": "warning", "type": "Warning", "message": "shadowing" },
                { "severity": "error", "type": "DeclarationError", "message": "Identifier not found" }
            ] }"#,
        );
        match check_diagnostics(&doc).unwrap_err() {
            ForgeError::CompilerDiagnostics(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, "DeclarationError");
            }
            other => panic!("expected diagnostics, got {other:?}"),
        }
    }

    #[test]
    fn test_check_diagnostics_allows_warnings() {
        let doc = output(
            r#"{ "contracts": {}, "errors": [ { "severity": "warning", "message": "unused" } ] }"#,
        );
        assert!(check_diagnostics(&doc).is_ok());
    }
}
