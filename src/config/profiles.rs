//! Profile discovery from the AWS shared credentials and config files.

use std::fs;
use std::path::{Path, PathBuf};

/// Profile scanned when no shared file names any.
pub const DEFAULT_PROFILE: &str = "default";

/// Which shared file is being read; the two use different section headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFileKind {
    /// `~/.aws/credentials`: `[name]`
    Credentials,
    /// `~/.aws/config`: `[default]` or `[profile name]`
    Config,
}

/// `$AWS_SHARED_CREDENTIALS_FILE`, else `~/.aws/credentials`
pub fn credentials_path() -> Option<PathBuf> {
    std::env::var_os("AWS_SHARED_CREDENTIALS_FILE")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".aws").join("credentials")))
}

/// `$AWS_CONFIG_FILE`, else `~/.aws/config`
pub fn config_path() -> Option<PathBuf> {
    std::env::var_os("AWS_CONFIG_FILE")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".aws").join("config")))
}

/// Extract profile names from the contents of a shared file.
pub fn parse_profile_names(contents: &str, kind: ProfileFileKind) -> Vec<String> {
    let mut names = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) else {
            continue;
        };
        let section = section.trim();

        let name = match kind {
            ProfileFileKind::Credentials => Some(section),
            ProfileFileKind::Config if section == DEFAULT_PROFILE => Some(section),
            ProfileFileKind::Config => section
                .strip_prefix("profile")
                .filter(|rest| rest.starts_with(char::is_whitespace))
                .map(str::trim),
        };

        if let Some(name) = name.filter(|n| !n.is_empty()) {
            push_unique(&mut names, name);
        }
    }

    names
}

/// Collect profiles from both files, credentials first, without duplicates.
///
/// Falls back to [`DEFAULT_PROFILE`] when neither file exists or names one.
pub fn discover_profiles_in(credentials: Option<&Path>, config: Option<&Path>) -> Vec<String> {
    let mut names = Vec::new();

    let sources = [
        (credentials, ProfileFileKind::Credentials),
        (config, ProfileFileKind::Config),
    ];
    for (path, kind) in sources {
        let Some(path) = path else { continue };
        match fs::read_to_string(path) {
            Ok(contents) => {
                for name in parse_profile_names(&contents, kind) {
                    push_unique(&mut names, &name);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No shared file at {}", path.display());
            }
            Err(e) => log::warn!("Cannot read {}: {}", path.display(), e),
        }
    }

    if names.is_empty() {
        log::info!("No profiles found, using '{}'", DEFAULT_PROFILE);
        names.push(DEFAULT_PROFILE.to_string());
    }
    names
}

/// Discover profiles from the standard shared file locations.
pub fn discover_profiles() -> Vec<String> {
    discover_profiles_in(credentials_path().as_deref(), config_path().as_deref())
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
