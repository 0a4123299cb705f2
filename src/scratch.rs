//! Scratch space preparer: delete-then-recreate of the installer's
//! cache/build directory.

use std::fs;
use std::io;
use std::path::Path;

use crate::config::ProvisionConfig;
use crate::constants::{BUILD_SUBDIR, CACHE_SUBDIR};
use crate::error::{ProvisionError, Result};
use crate::ui;

/// Ensure `scratch_dir` exists and is empty apart from fresh `cache/` and
/// `build/` subdirectories.
///
/// A missing directory is not an error: deletion is skipped and the
/// directory is created from scratch. Any prior contents are discarded
/// unconditionally so the installer always starts from a clean slate.
///
/// # Errors
///
/// Returns an error if the directory cannot be removed or recreated.
pub fn prepare(scratch_dir: &Path) -> io::Result<()> {
    if scratch_dir.exists() {
        fs::remove_dir_all(scratch_dir)?;
    }
    fs::create_dir_all(scratch_dir.join(CACHE_SUBDIR))?;
    fs::create_dir_all(scratch_dir.join(BUILD_SUBDIR))?;
    Ok(())
}

/// Reset the configured scratch directory, reporting progress.
///
/// # Errors
///
/// Returns a [`ProvisionError::Scratch`] naming the path on any filesystem
/// failure.
pub fn run(config: &ProvisionConfig) -> Result<()> {
    let scratch = config.scratch_dir();
    ui::step(format!("Preparing scratch space at {}", scratch.display()));
    prepare(&scratch).map_err(|source| ProvisionError::Scratch {
        path: scratch.clone(),
        source,
    })?;
    ui::blank_line();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn absent_scratch_is_created_without_a_deletion_attempt() {
        let base = tempfile::tempdir().unwrap();
        let scratch = base.path().join("venvtmp");
        assert!(!scratch.exists());

        prepare(&scratch).unwrap();

        assert_eq!(entries(&scratch), ["build", "cache"]);
    }

    #[test]
    fn populated_scratch_is_wiped_before_recreation() {
        let base = tempfile::tempdir().unwrap();
        let scratch = base.path().join("venvtmp");
        fs::create_dir_all(scratch.join("cache/wheels")).unwrap();
        fs::write(scratch.join("cache/wheels/stale.whl"), b"stale").unwrap();
        fs::write(scratch.join("leftover.log"), b"log").unwrap();

        prepare(&scratch).unwrap();

        assert_eq!(entries(&scratch), ["build", "cache"]);
        assert_eq!(entries(&scratch.join("cache")), Vec::<String>::new());
        assert_eq!(entries(&scratch.join("build")), Vec::<String>::new());
    }

    #[test]
    fn preparation_is_idempotent_across_reruns() {
        let base = tempfile::tempdir().unwrap();
        let scratch = base.path().join("venvtmp");

        prepare(&scratch).unwrap();
        fs::write(scratch.join("cache/partial.download"), b"half").unwrap();
        prepare(&scratch).unwrap();

        assert_eq!(entries(&scratch.join("cache")), Vec::<String>::new());
    }
}
