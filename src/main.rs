#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::Shell;

use venvup::commands;
use venvup::config::{Overrides, ProvisionConfig};
use venvup::error::{ProvisionError, Result};

#[derive(Parser)]
#[command(
    name = "venvup",
    version,
    about = "Provision a Python virtual environment behind an architecture-aware package mirror."
)]
struct Cli {
    /// Path to the configuration file. Defaults to venvup.toml in the project directory.
    #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    file: Option<PathBuf>,
    /// Project directory holding the requirements files and the virtual environment.
    #[arg(short = 'C', long = "project", value_name = "PATH", value_hint = ValueHint::DirPath)]
    project: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the virtual environment, reset the scratch space, and install dependencies.
    Provision {
        /// Virtual environment directory, relative to the project directory.
        #[arg(long, value_name = "PATH", value_hint = ValueHint::DirPath)]
        venv_dir: Option<PathBuf>,
        /// Base directory for the scratch space. Defaults to the home directory.
        #[arg(long, value_name = "PATH", value_hint = ValueHint::DirPath)]
        scratch_base: Option<PathBuf>,
        /// Extra package index consulted alongside the default index.
        #[arg(long, value_name = "URL")]
        index_url: Option<String>,
        /// Dependency list to install.
        #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath)]
        requirements: Option<PathBuf>,
        /// Version constraints applied during resolution.
        #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath)]
        constraints: Option<PathBuf>,
        /// Interpreter used to create the environment.
        #[arg(short, long, value_name = "PYTHON")]
        python: Option<String>,
        /// Stop after the environment and scratch space are prepared.
        #[arg(long)]
        skip_install: bool,
    },
    /// Execute a command inside the provisioned environment.
    Run {
        /// Command to execute; a single argument is split with shell quoting rules.
        #[arg(value_name = "CMDARGS", required = true, trailing_var_arg = true)]
        cmdargs: Vec<String>,
    },
    /// Remove the virtual environment and the scratch directory.
    Clean {
        /// Virtual environment directory, relative to the project directory.
        #[arg(long, value_name = "PATH", value_hint = ValueHint::DirPath)]
        venv_dir: Option<PathBuf>,
        /// Base directory for the scratch space. Defaults to the home directory.
        #[arg(long, value_name = "PATH", value_hint = ValueHint::DirPath)]
        scratch_base: Option<PathBuf>,
    },
    /// Show the resolved provisioning configuration.
    Describe {
        /// Output as JSON instead of the styled summary.
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions.
    Completions {
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Dispatch the selected CLI command.
fn run_command(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        commands::completion::run(*shell, &mut Cli::command());
        return Ok(());
    }

    let project_dir = match cli.project {
        Some(path) => path,
        None => std::env::current_dir().map_err(ProvisionError::CurrentDir)?,
    };
    let config_file = cli.file.as_deref();

    match cli.command {
        Commands::Provision {
            venv_dir,
            scratch_base,
            index_url,
            requirements,
            constraints,
            python,
            skip_install,
        } => {
            let overrides = Overrides {
                venv_dir,
                scratch_base,
                index_url,
                requirements,
                constraints,
                python,
            };
            let config = ProvisionConfig::load(&project_dir, config_file, overrides)?;
            commands::provision::run(&config, skip_install)
        }
        Commands::Run { cmdargs } => {
            let config = ProvisionConfig::load(&project_dir, config_file, Overrides::default())?;
            commands::run::run(&config, &cmdargs)
        }
        Commands::Clean {
            venv_dir,
            scratch_base,
        } => {
            let overrides = Overrides {
                venv_dir,
                scratch_base,
                ..Overrides::default()
            };
            let config = ProvisionConfig::load(&project_dir, config_file, overrides)?;
            commands::clean::run(&config)
        }
        Commands::Describe { json } => {
            let config = ProvisionConfig::load(&project_dir, config_file, Overrides::default())?;
            commands::describe::run(&config, json)
        }
        Commands::Completions { .. } => unreachable!(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}
