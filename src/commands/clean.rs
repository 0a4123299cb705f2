use std::fmt::Write as _;
use std::fs;

use crate::config::ProvisionConfig;
use crate::error::{ProvisionError, Result};
use crate::ui;

/// Remove the virtual environment and the scratch directory.
///
/// Removal continues past individual failures so a permission problem on one
/// directory does not leave the other behind; failures are collected and
/// reported together.
///
/// # Errors
///
/// Returns an error listing every directory that could not be removed.
pub fn run(config: &ProvisionConfig) -> Result<()> {
    ui::step("Cleaning provisioned state");

    let targets = [config.venv_dir.clone(), config.scratch_dir()];
    let mut failures = Vec::new();
    let mut removed = 0usize;

    for target in &targets {
        if !target.exists() {
            continue;
        }
        ui::detail(format!("Removing {}", target.display()));
        match fs::remove_dir_all(target) {
            Ok(()) => removed += 1,
            Err(err) => failures.push((target.display().to_string(), err)),
        }
    }

    if removed == 0 && failures.is_empty() {
        ui::detail("Nothing to clean.");
    }
    ui::blank_line();

    if failures.is_empty() {
        Ok(())
    } else {
        let mut details = String::new();
        for (path, err) in failures {
            let _ = write!(&mut details, "\n- {path}: {err}");
        }
        Err(ProvisionError::Clean { details })
    }
}
