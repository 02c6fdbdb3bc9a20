//! CLI command implementations for solforge.
//!
//! Each module corresponds to a subcommand (`solforge <command>`).

pub mod check;
pub mod compile;
pub mod init;
pub mod invoke;

use std::path::{Path, PathBuf};

/// Directory holding the config file; relative config paths resolve against it.
pub fn project_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_dir() {
        assert_eq!(project_dir(Path::new("solforge.config.json")), PathBuf::from("."));
        assert_eq!(
            project_dir(Path::new("sharks/solforge.config.json")),
            PathBuf::from("sharks")
        );
    }
}
