use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Failure in one of the provisioning steps.
///
/// The flow is strictly sequential, so every variant is tied to exactly one
/// step and the top-level error message always names where the run stopped.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("failed to read {}: {source}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("could not determine the current directory: {0}")]
    CurrentDir(io::Error),

    #[error("could not determine a home directory for the scratch space")]
    MissingHome,

    #[error("interpreter `{name}` not found on PATH: {source}")]
    MissingInterpreter { name: String, source: which::Error },

    #[error("failed to spawn `{program}`: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("environment bootstrap exited with {status}")]
    Bootstrap { status: ExitStatus },

    #[error("failed to prepare scratch directory {}: {source}", .path.display())]
    Scratch { path: PathBuf, source: io::Error },

    #[error("dependency install exited with {status}")]
    Install { status: ExitStatus },

    #[error("command exited with {status}")]
    Run { status: ExitStatus },

    #[error(
        "virtual environment at {} has no interpreter; run `venvup provision` first",
        .path.display()
    )]
    NotProvisioned { path: PathBuf },

    #[error("invalid command line: {0}")]
    BadCommand(#[from] shell_words::ParseError),

    #[error("no command given")]
    EmptyCommand,

    #[error("failed to remove the following directories while cleaning:{details}")]
    Clean { details: String },

    #[error("failed to render configuration: {0}")]
    Render(#[from] serde_json::Error),
}

impl ProvisionError {
    /// Exit code for the process. Child process failures forward the
    /// child's own exit code, so a failed install reports pip's status.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Bootstrap { status } | Self::Install { status } | Self::Run { status } => {
                status.code().unwrap_or(1)
            }
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }

    #[test]
    #[cfg(unix)]
    fn install_failure_forwards_the_installer_exit_code() {
        let err = ProvisionError::Install {
            status: exit_status(2),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    #[cfg(unix)]
    fn signal_termination_falls_back_to_one() {
        use std::os::unix::process::ExitStatusExt;
        let err = ProvisionError::Run {
            status: ExitStatus::from_raw(9),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn non_process_failures_exit_with_one() {
        assert_eq!(ProvisionError::MissingHome.exit_code(), 1);
    }

    #[test]
    fn scratch_error_names_the_offending_path() {
        let err = ProvisionError::Scratch {
            path: PathBuf::from("/home/pi/venvtmp"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("scratch directory"));
        assert!(message.contains("/home/pi/venvtmp"));
    }
}
