//! Configuration and data folder resolution
//!
//! The data folder (holding radio.db) resolves in priority order:
//! 1. Command-line argument
//! 2. Environment variable (handled by clap's `env` attribute)
//! 3. TOML config file (`data_folder` key)
//! 4. OS-dependent default

use crate::error::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// Database file name inside the data folder
pub const DB_FILE_NAME: &str = "radio.db";

/// Command-line arguments for radiomap
#[derive(Parser, Debug)]
#[command(name = "radiomap")]
#[command(about = "Location-aware radio station directory")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5750", env = "RADIOMAP_PORT")]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "RADIOMAP_BIND")]
    pub bind: String,

    /// Data folder containing radio.db
    #[arg(short, long, env = "RADIOMAP_DATA_FOLDER")]
    pub data_folder: Option<PathBuf>,
}

/// Resolve the data folder from CLI/env, config file, or platform default
pub fn resolve_data_folder(cli_arg: Option<&PathBuf>) -> PathBuf {
    // Priority 1 and 2: command line / environment (clap merges both)
    if let Some(path) = cli_arg {
        return path.clone();
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = config_file_path() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(folder) = config.get("data_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent default
    default_data_folder()
}

/// Path to the database file inside the data folder
pub fn database_path(data_folder: &std::path::Path) -> PathBuf {
    data_folder.join(DB_FILE_NAME)
}

/// Platform config file path (~/.config/radiomap/config.toml or equivalent)
fn config_file_path() -> Result<PathBuf> {
    let path = dirs::config_dir()
        .map(|d| d.join("radiomap").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

/// OS-dependent default data folder
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("radiomap"))
        .unwrap_or_else(|| PathBuf::from("./radiomap_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let cli = PathBuf::from("/tmp/radiomap-test");
        let resolved = resolve_data_folder(Some(&cli));
        assert_eq!(resolved, cli);
    }

    #[test]
    fn database_path_appends_file_name() {
        let folder = PathBuf::from("/data");
        assert_eq!(database_path(&folder), PathBuf::from("/data/radio.db"));
    }

    #[test]
    fn default_folder_is_not_empty() {
        let folder = default_data_folder();
        assert!(!folder.as_os_str().is_empty());
    }
}
