//! Import resolution handed to the external compiler.
//!
//! The compiler asks for every import it cannot find among the inline sources,
//! synchronously and in an order of its own choosing. A resolver answers each request
//! with file contents or a soft error; it never fails the call itself.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Message returned to the compiler for any import that cannot be served.
pub const FILE_NOT_FOUND: &str = "File not found";

/// Answer to a single import request, in the shape the compiler callback expects:
/// `{"contents": "..."}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportResolution {
    Contents(String),
    Error(String),
}

impl ImportResolution {
    pub fn not_found() -> Self {
        Self::Error(FILE_NOT_FOUND.to_string())
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Contents(_))
    }
}

/// A pluggable, synchronous dependency lookup used during compilation.
pub trait ImportResolver {
    /// Resolve one import identifier, e.g. `@openzeppelin/contracts/access/Ownable.sol`.
    fn resolve(&self, identifier: &str) -> ImportResolution;
}

impl<F> ImportResolver for F
where
    F: Fn(&str) -> ImportResolution,
{
    fn resolve(&self, identifier: &str) -> ImportResolution {
        self(identifier)
    }
}

/// Serves imports under an allow-list of namespace prefixes from a fixed root directory.
///
/// `@openzeppelin/contracts/token/ERC721/ERC721.sol` with root `node_modules` reads
/// `node_modules/@openzeppelin/contracts/token/ERC721/ERC721.sol`. Identifiers outside
/// the allow-list, or that would escape the root, are reported as not found.
#[derive(Debug, Clone)]
pub struct NamespaceResolver {
    root: PathBuf,
    namespaces: Vec<String>,
}

impl NamespaceResolver {
    pub fn new(root: impl Into<PathBuf>, namespaces: Vec<String>) -> Self {
        Self {
            root: root.into(),
            namespaces,
        }
    }

    /// Whether `identifier` falls under one of the trusted namespaces.
    pub fn is_trusted(&self, identifier: &str) -> bool {
        self.namespaces
            .iter()
            .any(|ns| identifier.starts_with(ns.as_str()))
    }

    /// On-disk location for a trusted identifier, or `None` if it is not confined to the root.
    fn locate(&self, identifier: &str) -> Option<PathBuf> {
        let relative = Path::new(identifier);
        let confined = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        confined.then(|| self.root.join(relative))
    }
}

impl ImportResolver for NamespaceResolver {
    fn resolve(&self, identifier: &str) -> ImportResolution {
        if !self.is_trusted(identifier) {
            tracing::info!(import = identifier, "import not found");
            return ImportResolution::not_found();
        }

        let Some(path) = self.locate(identifier) else {
            tracing::warn!(import = identifier, "import escapes dependency root, refusing");
            return ImportResolution::not_found();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::info!(import = identifier, bytes = contents.len(), "reading import");
                ImportResolution::Contents(contents)
            }
            Err(e) => {
                tracing::warn!(
                    import = identifier,
                    path = %path.display(),
                    error = %e,
                    "failed to read import"
                );
                ImportResolution::not_found()
            }
        }
    }
}
