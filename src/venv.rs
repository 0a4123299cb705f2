//! Environment bootstrapper: creation of the isolated Python environment.

use std::path::{Path, PathBuf};

use which::which;

use crate::command::ManagedCommand;
use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};
use crate::ui;

/// Compute the interpreter path inside a virtual environment.
#[must_use]
pub fn venv_python_path(venv_dir: &Path) -> PathBuf {
    venv_dir.join("bin/python")
}

/// Compute the pip path inside a virtual environment.
#[must_use]
pub fn venv_pip_path(venv_dir: &Path) -> PathBuf {
    venv_dir.join("bin/pip")
}

/// True once the environment contains a usable interpreter.
#[must_use]
pub fn is_provisioned(venv_dir: &Path) -> bool {
    venv_python_path(venv_dir).is_file()
}

/// Create the virtual environment with system-site-packages inheritance, so
/// natively packaged libraries already installed on the host stay importable
/// inside it.
///
/// Reruns layer on top of an existing environment; `python -m venv` upgrades
/// in place rather than resetting it.
///
/// # Errors
///
/// Returns an error if the interpreter cannot be found, the process cannot
/// be spawned, or `python -m venv` exits with a failure status.
pub fn bootstrap(config: &ProvisionConfig) -> Result<()> {
    let interpreter =
        which(&config.python).map_err(|source| ProvisionError::MissingInterpreter {
            name: config.python.clone(),
            source,
        })?;

    ui::step(format!(
        "Creating virtual environment at {}",
        config.venv_dir.display()
    ));

    let command = ManagedCommand::new_venv(&interpreter)
        .arg("--system-site-packages")
        .arg(&config.venv_dir)
        .envs(&config.env);
    ui::detail(command.rendered());

    let status = command.status().map_err(|source| ProvisionError::Spawn {
        program: interpreter.display().to_string(),
        source,
    })?;

    if !status.success() {
        return Err(ProvisionError::Bootstrap { status });
    }

    ui::blank_line();
    Ok(())
}
