use std::ffi::OsString;

use shell_words::split;

use crate::command::ManagedCommand;
use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};
use crate::venv::is_provisioned;

/// Execute a command inside the provisioned environment.
///
/// The environment's `bin` directory is prepended to `PATH`, so bare tool
/// names resolve to the environment's interpreter and entry points. A single
/// argument is split with shell quoting rules; multiple arguments are taken
/// verbatim.
///
/// # Errors
///
/// Returns an error if the environment has not been provisioned, the
/// command line is empty or unparseable, the process cannot be spawned, or
/// the command exits with a failure status.
pub fn run(config: &ProvisionConfig, cmdargs: &[String]) -> Result<()> {
    if !is_provisioned(&config.venv_dir) {
        return Err(ProvisionError::NotProvisioned {
            path: config.venv_dir.clone(),
        });
    }

    let tokens = if let [single] = cmdargs {
        split(single)?
    } else {
        cmdargs.to_vec()
    };
    let Some((program, rest)) = tokens.split_first() else {
        return Err(ProvisionError::EmptyCommand);
    };

    let status = ManagedCommand::new(program)
        .args(rest)
        .env("PATH", venv_path_value(config))
        .env("VIRTUAL_ENV", &config.venv_dir)
        .envs(&config.env)
        .current_dir(&config.project_dir)
        .status()
        .map_err(|source| ProvisionError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !status.success() {
        return Err(ProvisionError::Run { status });
    }

    Ok(())
}

fn venv_path_value(config: &ProvisionConfig) -> OsString {
    let mut value = config.venv_dir.join("bin").into_os_string();
    if let Some(existing) = std::env::var_os("PATH") {
        value.push(":");
        value.push(existing);
    }
    value
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use indexmap::IndexMap;

    use super::*;

    fn config(venv_dir: PathBuf) -> ProvisionConfig {
        ProvisionConfig {
            project_dir: PathBuf::from("/proj"),
            venv_dir,
            scratch_base: PathBuf::from("/home/pi"),
            index_url: "https://www.piwheels.org/simple".to_string(),
            requirements: PathBuf::from("/proj/requirements.txt"),
            constraints: PathBuf::from("/proj/constraints.txt"),
            python: "python3".to_string(),
            env: IndexMap::new(),
        }
    }

    #[test]
    fn refuses_to_run_against_an_unprovisioned_environment() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            &config(dir.path().to_path_buf()),
            &["python main.py".to_string()],
        );
        assert!(matches!(result, Err(ProvisionError::NotProvisioned { .. })));
    }

    #[test]
    fn venv_bin_leads_the_search_path() {
        let value = venv_path_value(&config(PathBuf::from("/proj/.venv")));
        let rendered = value.to_string_lossy();
        assert!(rendered.starts_with("/proj/.venv/bin"));
    }
}
