//! Default configuration values for venvup

/// Virtual environment directory, relative to the project directory
pub const DEFAULT_VENV_DIR: &str = ".venv";

/// Scratch directory name created under the scratch base
pub const SCRATCH_DIR_NAME: &str = "venvtmp";

/// Download cache subdirectory inside the scratch directory
pub const CACHE_SUBDIR: &str = "cache";

/// Build artifact subdirectory inside the scratch directory
pub const BUILD_SUBDIR: &str = "build";

/// Architecture-optimized wheel mirror, consulted alongside the default index
pub const DEFAULT_INDEX_URL: &str = "https://www.piwheels.org/simple";

/// Dependency list expected in the project directory
pub const DEFAULT_REQUIREMENTS: &str = "requirements.txt";

/// Version constraints applied during dependency resolution
pub const DEFAULT_CONSTRAINTS: &str = "constraints.txt";

/// Interpreter used to create the virtual environment
pub const DEFAULT_PYTHON: &str = "python3";

/// Configuration file looked up in the project directory
pub const CONFIG_FILE: &str = "venvup.toml";
