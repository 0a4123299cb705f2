use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BUILD_SUBDIR, CACHE_SUBDIR, CONFIG_FILE, DEFAULT_CONSTRAINTS, DEFAULT_INDEX_URL,
    DEFAULT_PYTHON, DEFAULT_REQUIREMENTS, DEFAULT_VENV_DIR, SCRATCH_DIR_NAME,
};
use crate::error::{ProvisionError, Result};

/// Optional keys accepted in `venvup.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub venv_dir: Option<PathBuf>,
    pub scratch_base: Option<PathBuf>,
    pub index_url: Option<String>,
    pub requirements: Option<PathBuf>,
    pub constraints: Option<PathBuf>,
    pub python: Option<String>,
    #[serde(default)]
    pub env: IndexMap<String, String>,
}

/// Flag-level overrides collected from the CLI, applied over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub venv_dir: Option<PathBuf>,
    pub scratch_base: Option<PathBuf>,
    pub index_url: Option<String>,
    pub requirements: Option<PathBuf>,
    pub constraints: Option<PathBuf>,
    pub python: Option<String>,
}

/// Fully resolved provisioning configuration.
///
/// All paths are absolute: relative venv/requirements/constraints values are
/// anchored at the project directory, the scratch space at `scratch_base`.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionConfig {
    pub project_dir: PathBuf,
    pub venv_dir: PathBuf,
    pub scratch_base: PathBuf,
    pub index_url: String,
    pub requirements: PathBuf,
    pub constraints: PathBuf,
    pub python: String,
    pub env: IndexMap<String, String>,
}

impl ProvisionConfig {
    /// Resolve configuration from defaults, the optional `venvup.toml`, and
    /// CLI overrides (highest precedence).
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested config file is missing or
    /// malformed, or if no scratch base can be derived.
    pub fn load(project_dir: &Path, file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let config_path = file.map_or_else(|| project_dir.join(CONFIG_FILE), Path::to_path_buf);
        let file_config = load_file(&config_path, file.is_some())?;
        Self::resolve(project_dir, file_config, overrides, dirs::home_dir())
    }

    fn resolve(
        project_dir: &Path,
        file: FileConfig,
        overrides: Overrides,
        home: Option<PathBuf>,
    ) -> Result<Self> {
        let venv_dir = overrides
            .venv_dir
            .or(file.venv_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VENV_DIR));
        let scratch_base = overrides
            .scratch_base
            .or(file.scratch_base)
            .or(home)
            .ok_or(ProvisionError::MissingHome)?;
        let index_url = overrides
            .index_url
            .or(file.index_url)
            .unwrap_or_else(|| DEFAULT_INDEX_URL.to_string());
        let requirements = overrides
            .requirements
            .or(file.requirements)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REQUIREMENTS));
        let constraints = overrides
            .constraints
            .or(file.constraints)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONSTRAINTS));
        let python = overrides
            .python
            .or(file.python)
            .unwrap_or_else(|| DEFAULT_PYTHON.to_string());

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            venv_dir: absolutize(project_dir, venv_dir),
            scratch_base,
            index_url,
            requirements: absolutize(project_dir, requirements),
            constraints: absolutize(project_dir, constraints),
            python,
            env: file.env,
        })
    }

    /// Scratch directory wiped and recreated before every install.
    #[must_use]
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_base.join(SCRATCH_DIR_NAME)
    }

    /// Download cache inside the scratch directory.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.scratch_dir().join(CACHE_SUBDIR)
    }

    /// Build artifact directory inside the scratch directory.
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.scratch_dir().join(BUILD_SUBDIR)
    }
}

fn absolutize(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

fn load_file(path: &Path, explicit: bool) -> Result<FileConfig> {
    if !path.is_file() {
        if explicit {
            return Err(ProvisionError::ConfigRead {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            });
        }
        return Ok(FileConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|source| ProvisionError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&contents).map_err(|source| ProvisionError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> Option<PathBuf> {
        Some(PathBuf::from("/home/pi"))
    }

    #[test]
    fn defaults_fill_every_field() {
        let config = ProvisionConfig::resolve(
            Path::new("/proj"),
            FileConfig::default(),
            Overrides::default(),
            home(),
        )
        .unwrap();

        assert_eq!(config.venv_dir, PathBuf::from("/proj/.venv"));
        assert_eq!(config.scratch_dir(), PathBuf::from("/home/pi/venvtmp"));
        assert_eq!(config.cache_dir(), PathBuf::from("/home/pi/venvtmp/cache"));
        assert_eq!(config.build_dir(), PathBuf::from("/home/pi/venvtmp/build"));
        assert_eq!(config.index_url, DEFAULT_INDEX_URL);
        assert_eq!(config.requirements, PathBuf::from("/proj/requirements.txt"));
        assert_eq!(config.constraints, PathBuf::from("/proj/constraints.txt"));
        assert_eq!(config.python, "python3");
        assert!(config.env.is_empty());
    }

    #[test]
    fn missing_home_without_scratch_base_is_an_error() {
        let result = ProvisionConfig::resolve(
            Path::new("/proj"),
            FileConfig::default(),
            Overrides::default(),
            None,
        );
        assert!(matches!(result, Err(ProvisionError::MissingHome)));
    }

    #[test]
    fn file_values_override_defaults() {
        let file: FileConfig = toml::from_str(
            r#"
            venv_dir = "env"
            scratch_base = "/mnt/scratch"
            index_url = "https://mirror.example/simple"
            python = "python3.7"

            [env]
            PIP_DISABLE_PIP_VERSION_CHECK = "1"
            PIP_NO_COLOR = "1"
            "#,
        )
        .unwrap();

        let config =
            ProvisionConfig::resolve(Path::new("/proj"), file, Overrides::default(), home())
                .unwrap();

        assert_eq!(config.venv_dir, PathBuf::from("/proj/env"));
        assert_eq!(config.scratch_dir(), PathBuf::from("/mnt/scratch/venvtmp"));
        assert_eq!(config.index_url, "https://mirror.example/simple");
        assert_eq!(config.python, "python3.7");

        let keys: Vec<&str> = config.env.keys().map(String::as_str).collect();
        assert_eq!(keys, ["PIP_DISABLE_PIP_VERSION_CHECK", "PIP_NO_COLOR"]);
    }

    #[test]
    fn flags_take_precedence_over_the_file() {
        let file: FileConfig = toml::from_str(r#"index_url = "https://file.example/simple""#).unwrap();
        let overrides = Overrides {
            index_url: Some("https://flag.example/simple".to_string()),
            scratch_base: Some(PathBuf::from("/flag/base")),
            ..Overrides::default()
        };

        let config = ProvisionConfig::resolve(Path::new("/proj"), file, overrides, home()).unwrap();

        assert_eq!(config.index_url, "https://flag.example/simple");
        assert_eq!(config.scratch_base, PathBuf::from("/flag/base"));
    }

    #[test]
    fn absolute_input_paths_are_kept_as_is() {
        let overrides = Overrides {
            venv_dir: Some(PathBuf::from("/opt/venv")),
            requirements: Some(PathBuf::from("/etc/app/requirements.txt")),
            ..Overrides::default()
        };

        let config = ProvisionConfig::resolve(
            Path::new("/proj"),
            FileConfig::default(),
            overrides,
            home(),
        )
        .unwrap();

        assert_eq!(config.venv_dir, PathBuf::from("/opt/venv"));
        assert_eq!(
            config.requirements,
            PathBuf::from("/etc/app/requirements.txt")
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: std::result::Result<FileConfig, _> =
            toml::from_str(r#"venv_path = ".venv""#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = load_file(&dir.path().join(CONFIG_FILE), false).unwrap();
        assert!(file.venv_dir.is_none());
    }

    #[test]
    fn explicitly_requested_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_file(&dir.path().join("other.toml"), true);
        assert!(matches!(result, Err(ProvisionError::ConfigRead { .. })));
    }
}
