//! Project directory creation and config I/O.
//!
//! ## Directory layout
//!
//! ```text
//! <project>/
//! ├── solforge.config.json      # ForgeConfig
//! ├── templates/
//! │   └── EthTemplate.sol       # Handlebars-templated Solidity source
//! └── node_modules/             # Trusted dependency root (e.g. @openzeppelin/contracts)
//! ```

use std::path::Path;

use crate::config::{ForgeConfig, CONFIG_FILE};
use crate::error::{ForgeError, Result};
use crate::templates::embedded;

/// Create a new project with the default config and the starter template.
pub fn create_project(project_dir: &Path) -> Result<ForgeConfig> {
    if project_dir.exists() {
        return Err(ForgeError::ProjectExists(project_dir.to_path_buf()));
    }

    let config = ForgeConfig::default();
    let template_dir = config.template_dir(project_dir);
    std::fs::create_dir_all(&template_dir)?;
    std::fs::create_dir_all(config.dependency_root(project_dir))?;

    std::fs::write(template_dir.join(&config.template.name), embedded::ETH_TEMPLATE)?;
    config.save(&project_dir.join(CONFIG_FILE))?;

    tracing::info!(project = %project_dir.display(), "created project");
    Ok(config)
}

/// Load the config of an existing project directory.
pub fn load_project(project_dir: &Path) -> Result<ForgeConfig> {
    ForgeConfig::load(&project_dir.join(CONFIG_FILE))
}
