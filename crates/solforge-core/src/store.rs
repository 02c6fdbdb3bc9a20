//! Template store: reads the raw template text from disk.
//!
//! The template is read fresh on every request and never written back.

use std::path::PathBuf;

use crate::error::{ForgeError, Result};

/// Raw template text together with the name it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// File name, reused as the source key of the compilation unit.
    pub name: String,
    pub text: String,
}

/// Read-only view of a template directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    base_dir: PathBuf,
}

impl TemplateStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Read `<base_dir>/<name>`.
    pub fn read(&self, name: &str) -> Result<Template> {
        let path = self.base_dir.join(name);
        let text = std::fs::read_to_string(&path).map_err(|e| ForgeError::Storage {
            path: path.clone(),
            source: e,
        })?;
        tracing::info!(template = name, bytes = text.len(), "read template");
        Ok(Template {
            name: name.to_string(),
            text,
        })
    }
}
