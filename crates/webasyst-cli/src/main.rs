//! Webasyst CLI.
//!
//! Human-facing shortcuts over the same generators and readers the MCP
//! server exposes.
//!
//! # Examples
//!
//! ```bash
//! # Overview of the installation around the current directory
//! webasyst analyze
//!
//! # New application skeleton
//! webasyst create portfolio "Portfolio"
//!
//! # Directory tree of an application
//! webasyst --root /var/www/webasyst structure shop
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use webasyst_cli::commands;
use webasyst_core::cli::ExitCode;
use webasyst_core::root::find_root_or_start;

/// Webasyst project helper.
#[derive(Parser, Debug)]
#[command(name = "webasyst")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Directory to search upward from for the installation root
    #[arg(long, global = true, env = "WEBASYST_ROOT")]
    root: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List applications and count source files of the installation.
    #[command(visible_alias = "a")]
    Analyze,

    /// Create an application skeleton in wa-apps.
    #[command(visible_alias = "c")]
    Create {
        /// Application identifier
        app_id: String,

        /// Human-readable application name
        app_name: String,

        /// Short description stored in app.php
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Print the directory tree of an application.
    #[command(visible_alias = "s")]
    Structure {
        /// Application identifier
        app_id: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let exit_code = execute_command(cli)?;

    std::process::exit(exit_code.as_i32());
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn execute_command(cli: Cli) -> Result<ExitCode> {
    let start = match cli.root {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let root = find_root_or_start(&start);
    tracing::debug!(root = %root.display(), "resolved installation root");

    match cli.command {
        Commands::Analyze => commands::analyze::run(&root),
        Commands::Create {
            app_id,
            app_name,
            description,
        } => commands::create::run(&root, app_id, app_name, description),
        Commands::Structure { app_id } => commands::structure::run(&root, &app_id),
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_analyze() {
        let cli = Cli::parse_from(["webasyst", "analyze"]);
        assert!(matches!(cli.command, Commands::Analyze));
    }

    #[test]
    fn test_cli_parsing_aliases() {
        let cli = Cli::parse_from(["webasyst", "a"]);
        assert!(matches!(cli.command, Commands::Analyze));

        let cli = Cli::parse_from(["webasyst", "s", "shop"]);
        assert!(matches!(cli.command, Commands::Structure { app_id } if app_id == "shop"));
    }

    #[test]
    fn test_cli_parsing_create() {
        let cli = Cli::parse_from(["webasyst", "create", "portfolio", "Portfolio"]);
        if let Commands::Create {
            app_id,
            app_name,
            description,
        } = cli.command
        {
            assert_eq!(app_id, "portfolio");
            assert_eq!(app_name, "Portfolio");
            assert!(description.is_empty());
        } else {
            panic!("Expected Create command");
        }
    }

    #[test]
    fn test_cli_create_requires_name() {
        assert!(Cli::try_parse_from(["webasyst", "create", "portfolio"]).is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from(["webasyst", "structure", "shop", "--root", "/srv/wa", "-v"]);
        assert_eq!(cli.root, Some(PathBuf::from("/srv/wa")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
