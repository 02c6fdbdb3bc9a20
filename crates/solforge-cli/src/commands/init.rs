use std::path::Path;

use anyhow::Result;

use solforge_core::project;

use crate::output;

/// Initialize a new solforge project.
///
/// Writes `solforge.config.json`, the starter `templates/EthTemplate.sol` and an empty
/// dependency root. Dependencies themselves are installed separately.
pub fn run(name: &str) -> Result<()> {
    output::print_header(&format!("solforge init: {name}"));

    let project_dir = Path::new(name);
    output::print_step(1, 2, &format!("Creating project directory: {name}/"));
    let config = project::create_project(project_dir)?;

    output::print_step(2, 2, "Checking for solc");
    match solforge_solc::SolcCompiler::locate(config.solc.binary.as_deref()) {
        Ok(solc) => output::print_success(&format!("Found {}", solc.binary().display())),
        Err(e) => output::print_warning(&e.to_string()),
    }

    output::print_success(&format!("Project '{name}' created"));
    output::print_key_value("Template", &config.template.name);
    output::print_key_value("Contract", &config.template.contract);
    output::print_key_value("Dependencies", &config.dependencies.root.display().to_string());
    println!();
    println!("  Next steps:");
    println!("    cd {name}");
    println!("    npm install @openzeppelin/contracts");
    println!("    solforge compile");
    println!();

    Ok(())
}
