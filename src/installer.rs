//! Dependency installer invocation.

use std::ffi::OsString;

use crate::command::ManagedCommand;
use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};
use crate::ui;
use crate::venv::venv_pip_path;

/// Assemble the pip argument vector.
///
/// Exactly five configuration elements: the alternate index (supplementing
/// the default index, never replacing it), the cache directory, the build
/// directory, the requirements file, and the constraints file.
#[must_use]
pub fn pip_args(config: &ProvisionConfig) -> Vec<OsString> {
    vec![
        OsString::from("install"),
        OsString::from("--extra-index-url"),
        OsString::from(&config.index_url),
        OsString::from("--cache-dir"),
        config.cache_dir().into_os_string(),
        OsString::from("--build"),
        config.build_dir().into_os_string(),
        OsString::from("--requirement"),
        config.requirements.clone().into_os_string(),
        OsString::from("--constraint"),
        config.constraints.clone().into_os_string(),
    ]
}

/// Install the declared dependencies into the virtual environment.
///
/// # Errors
///
/// Returns an error if pip cannot be spawned or exits with a failure
/// status; the status is preserved so the process can forward pip's own
/// exit code.
pub fn run(config: &ProvisionConfig) -> Result<()> {
    let pip = venv_pip_path(&config.venv_dir);

    ui::step("Installing dependencies");
    ui::detail(format!("extra index: {}", config.index_url));
    ui::detail(format!("requirements: {}", config.requirements.display()));
    ui::detail(format!("constraints: {}", config.constraints.display()));

    let command = ManagedCommand::new_pip(&pip)
        .args(pip_args(config))
        .envs(&config.env)
        .current_dir(&config.project_dir);

    let status = command.status().map_err(|source| ProvisionError::Spawn {
        program: pip.display().to_string(),
        source,
    })?;

    if !status.success() {
        return Err(ProvisionError::Install { status });
    }

    ui::blank_line();
    Ok(())
}
