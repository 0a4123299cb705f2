use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// A wrapper around `std::process::Command` that remembers its rendered
/// command line for step logging.
///
/// Child stdout/stderr are inherited: diagnostics from the underlying tools
/// go straight to the terminal, and the whole run blocks until the child
/// exits.
pub struct ManagedCommand {
    command: Command,
    rendered: Vec<String>,
}

impl ManagedCommand {
    /// Create a new `ManagedCommand`.
    #[must_use]
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        let rendered = vec![program.as_ref().to_string_lossy().into_owned()];
        Self {
            command: Command::new(program.as_ref()),
            rendered,
        }
    }

    /// `<python> -m venv` invocation used by the environment bootstrapper.
    #[must_use]
    pub fn new_venv(python: &Path) -> Self {
        Self::new(python).args(["-m", "venv"])
    }

    /// The virtual environment's own `pip`.
    #[must_use]
    pub fn new_pip(pip: &Path) -> Self {
        Self::new(pip).env("PIP_DISABLE_PIP_VERSION_CHECK", "1")
    }

    /// Add arguments to the command.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.rendered
                .push(arg.as_ref().to_string_lossy().into_owned());
            self.command.arg(arg.as_ref());
        }
        self
    }

    /// Add a single argument to the command.
    #[must_use]
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.rendered
            .push(arg.as_ref().to_string_lossy().into_owned());
        self.command.arg(arg.as_ref());
        self
    }

    /// Set an environment variable for the command.
    #[must_use]
    pub fn env<K, V>(mut self, key: K, val: V) -> Self
    where
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.command.env(key, val);
        self
    }

    /// Set multiple environment variables for the command.
    #[must_use]
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.command.envs(vars);
        self
    }

    /// Set the working directory for the command.
    #[must_use]
    pub fn current_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.command.current_dir(dir);
        self
    }

    /// The command line as it will be displayed to the user.
    #[must_use]
    pub fn rendered(&self) -> String {
        self.rendered.join(" ")
    }

    /// Execute the command and wait for it to complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the child process cannot be spawned or waited on.
    pub fn status(mut self) -> io::Result<ExitStatus> {
        self.command.status()
    }
}
