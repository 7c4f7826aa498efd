pub mod profiles;
pub mod types;

use crate::error::{Result, ScanError};
use crate::scan::{DEFAULT_MONTHS, MAX_MONTHS};
use std::fs;
use std::path::{Path, PathBuf};

pub use types::Config;

const CONFIG_FILE_NAME: &str = ".idle-scan.toml";

/// Get the global config file path (~/.idle-scan.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Load configuration from file or use defaults.
///
/// An explicitly given file must exist and parse. The global file is
/// optional; if it is unreadable or invalid the defaults are used. An
/// out-of-range `default_months` is replaced with [`DEFAULT_MONTHS`].
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    if let Some(global) = global_config_path()
        && global.exists()
    {
        match read_config(&global) {
            Ok(config) => return Ok(config),
            Err(e) => log::warn!("Ignoring global config: {}", e),
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| ScanError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut config: Config = toml::from_str(&content).map_err(|e| ScanError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !(1..=MAX_MONTHS).contains(&config.default_months) {
        log::warn!(
            "{}: default_months = {} is not between 1 and {}, using {}",
            path.display(),
            config.default_months,
            MAX_MONTHS,
            DEFAULT_MONTHS
        );
        config.default_months = DEFAULT_MONTHS;
    }

    Ok(config)
}
