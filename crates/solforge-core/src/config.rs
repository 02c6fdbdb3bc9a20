//! Project configuration (`solforge.config.json`).
//!
//! Template and dependency paths are relative to the directory holding the config file.
//! The template name, target contract and dependency root are deploy-time
//! constants: a request never chooses them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ForgeError, Result};

/// Default config file name looked up in the project directory.
pub const CONFIG_FILE: &str = "solforge.config.json";

/// Top-level project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub template: TemplateConfig,
    #[serde(default)]
    pub dependencies: DependencyConfig,
    /// Substitution variables available to the template. This is the complete
    /// set: a template referencing anything else fails to render.
    #[serde(default)]
    pub variables: Map<String, Value>,
    #[serde(default)]
    pub solc: SolcConfig,
}

/// Which template to compile and which contract to extract from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory holding templates.
    pub dir: PathBuf,
    /// Template file name; also the source key in the compiler input.
    pub name: String,
    /// Contract extracted from the compiler output.
    pub contract: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
            name: "EthTemplate.sol".into(),
            contract: "StonerSharks".into(),
        }
    }
}

/// Where trusted dependency sources live and which import namespaces may be read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    pub root: PathBuf,
    pub namespaces: Vec<String>,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("node_modules"),
            namespaces: vec!["@openzeppelin".into()],
        }
    }
}

/// External compiler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolcConfig {
    /// Absolute path or bare name of the `solc` binary; `solc` on `PATH` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<PathBuf>,
    /// Minimum recommended compiler version, `X.Y.Z`.
    pub min_version: String,
}

impl Default for SolcConfig {
    fn default() -> Self {
        Self {
            binary: None,
            min_version: "0.8.20".into(),
        }
    }
}

impl Default for ForgeConfig {
    fn default() -> Self {
        let mut variables = Map::new();
        variables.insert("token_name".into(), Value::String("Stoner Sharks".into()));
        variables.insert("token_symbol".into(), Value::String("SHARK".into()));
        variables.insert("max_supply".into(), Value::from(4200));
        Self {
            template: TemplateConfig::default(),
            dependencies: DependencyConfig::default(),
            variables,
            solc: SolcConfig::default(),
        }
    }
}

impl ForgeConfig {
    /// Load the config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ForgeError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| ForgeError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ForgeError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Template directory for a project rooted at `project_dir`.
    pub fn template_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.template.dir)
    }

    /// Dependency root for a project rooted at `project_dir`.
    pub fn dependency_root(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.dependencies.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_single_template_deployment() {
        let config = ForgeConfig::default();
        assert_eq!(config.template.name, "EthTemplate.sol");
        assert_eq!(config.template.contract, "StonerSharks");
        assert_eq!(config.dependencies.namespaces, vec!["@openzeppelin"]);
        assert!(config.solc.binary.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = ForgeConfig::default();
        config.template.contract = "OtherContract".into();
        config.save(&path).unwrap();

        let loaded = ForgeConfig::load(&path).unwrap();
        assert_eq!(loaded.template.contract, "OtherContract");
        assert_eq!(loaded.variables, config.variables);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "variables": { "token_symbol": "FIN" } }"#).unwrap();

        let loaded = ForgeConfig::load(&path).unwrap();
        assert_eq!(loaded.template.name, "EthTemplate.sol");
        assert_eq!(loaded.variables["token_symbol"], "FIN");
        assert!(!loaded.variables.contains_key("token_name"));
    }

    #[test]
    fn test_partial_section_keeps_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "solc": { "binary": "/opt/solc/0.8.24/solc" } }"#).unwrap();

        let loaded = ForgeConfig::load(&path).unwrap();
        assert_eq!(loaded.solc.binary, Some(PathBuf::from("/opt/solc/0.8.24/solc")));
        assert_eq!(loaded.solc.min_version, "0.8.20");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ForgeConfig::load(Path::new("/tmp/nonexistent_solforge/solforge.config.json"))
            .unwrap_err();
        assert!(matches!(err, ForgeError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ForgeConfig::load(&path).unwrap_err(),
            ForgeError::ConfigParse { .. }
        ));
    }

    #[test]
    fn test_paths_are_relative_to_project() {
        let config = ForgeConfig::default();
        let project = Path::new("/srv/forge");
        assert_eq!(config.template_dir(project), PathBuf::from("/srv/forge/templates"));
        assert_eq!(
            config.dependency_root(project),
            PathBuf::from("/srv/forge/node_modules")
        );
    }
}
