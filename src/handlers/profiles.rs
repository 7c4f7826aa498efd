use crate::config::{Config, profiles};
use colored::Colorize;

/// Print the profiles a scan would cover and where they came from.
pub fn handle_profiles(config: &Config) -> crate::Result<()> {
    let (names, source) = if !config.profiles.is_empty() {
        (config.profiles.clone(), "config file".to_string())
    } else {
        let files: Vec<String> = [profiles::credentials_path(), profiles::config_path()]
            .into_iter()
            .flatten()
            .map(|p| p.display().to_string())
            .collect();
        (profiles::discover_profiles(), files.join(", "))
    };

    println!("📋 Profiles ({}):", source.dimmed());
    for name in &names {
        println!("   • {}", name.cyan());
    }
    Ok(())
}
