use crate::config::ProvisionConfig;
use crate::error::Result;
use crate::{installer, scratch, ui, venv};

/// Run the full provisioning flow: bootstrap the environment, reset the
/// scratch space, install dependencies.
///
/// Steps run strictly in order and the first failure aborts the run; the
/// returned error names the step that stopped it.
///
/// # Errors
///
/// Propagates the first step failure unchanged.
pub fn run(config: &ProvisionConfig, skip_install: bool) -> Result<()> {
    venv::bootstrap(config)?;
    scratch::run(config)?;

    if skip_install {
        ui::step("Skipping dependency install");
        ui::blank_line();
        return Ok(());
    }

    installer::run(config)
}
