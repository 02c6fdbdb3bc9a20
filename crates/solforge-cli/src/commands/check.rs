use std::path::Path;

use anyhow::Result;

use solforge_core::config::ForgeConfig;
use solforge_core::version::{self, Version};
use solforge_solc::SolcCompiler;

use crate::output;

/// Report whether `solc` is available and at least the configured minimum version.
///
/// Falls back to the default config when run outside a project.
pub fn run(config_path: &Path) -> Result<()> {
    output::print_header("solforge check");

    let config = if config_path.exists() {
        ForgeConfig::load(config_path)?
    } else {
        output::print_key_value("Config", "not found, using defaults");
        ForgeConfig::default()
    };

    let minimum: Version = config
        .solc
        .min_version
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let solc = match SolcCompiler::locate(config.solc.binary.as_deref()) {
        Ok(solc) => solc,
        Err(e) => {
            output::print_error(&e.to_string());
            anyhow::bail!("missing prerequisites");
        }
    };
    output::print_key_value("solc", &solc.binary().display().to_string());

    match version::detect_version(solc.binary()) {
        Some(found) if found < minimum => output::print_warning(&format!(
            "solc: found v{found}, minimum v{minimum} recommended"
        )),
        Some(found) => {
            output::print_key_value("Version", &found.to_string());
            output::print_success("Prerequisites satisfied");
        }
        None => output::print_warning("could not detect solc version"),
    }

    Ok(())
}
