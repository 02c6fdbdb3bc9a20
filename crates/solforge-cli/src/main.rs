//! solforge CLI: compile a templated Solidity contract into deployable artifacts.
//!
//! Provides four commands: `init`, `check`, `compile`, and `invoke`.
//!
//! Compilation itself is delegated to `solc` through
//! [`solforge_solc::SolcCompiler`]; the pipeline lives in [`solforge_core`].

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "solforge",
    about = "Render a Solidity template and compile it to ABI + bytecode with solc",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to solforge.config.json (default: ./solforge.config.json)
    #[arg(long, global = true, default_value = "solforge.config.json", env = "SOLFORGE_CONFIG")]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project with a starter template
    Init {
        /// Project name (creates a directory with this name)
        name: String,
    },

    /// Check that solc is installed and recent enough
    Check,

    /// Compile the template and write the ABI + bytecode artifact
    Compile {
        /// Output path for the artifact JSON (default: target/<Contract>.json)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the artifact JSON to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Serve one compile request and print the {statusCode, body} response
    Invoke {
        /// Request document (contents are accepted but not interpreted)
        #[arg(long)]
        request: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so JSON on stdout stays parseable
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { name } => {
            commands::init::run(&name)?;
        }
        Commands::Check => {
            commands::check::run(&cli.config)?;
        }
        Commands::Compile { output, stdout } => {
            commands::compile::run(&cli.config, output.as_deref(), stdout).await?;
        }
        Commands::Invoke { request } => {
            commands::invoke::run(&cli.config, request.as_deref()).await?;
        }
    }

    Ok(())
}
