use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, UnitrackError};

const SETTINGS_FILE: &str = "settings.json";
/// Overrides the config directory (`~/.config/unitrack`).
pub const CONFIG_DIR_ENV: &str = "UNITRACK_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: PathBuf,
    /// Program used when a command gets no `--program`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_program: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: home().join("Documents").join("unitrack"),
            default_program: None,
        }
    }
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn config_dir() -> PathBuf {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| home().join(".config").join("unitrack"))
}

/// Settings stored in `dir`. Missing or unreadable files give the defaults.
fn read_from(dir: &Path) -> Settings {
    let path = dir.join(SETTINGS_FILE);
    let Ok(content) = std::fs::read_to_string(&path) else {
        return Settings::default();
    };
    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Settings::default()
        }
    }
}

fn write_to(dir: &Path, settings: &Settings) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| UnitrackError::Settings(e.to_string()))?;
    std::fs::write(dir.join(SETTINGS_FILE), format!("{json}\n"))?;
    Ok(())
}

pub fn load_settings() -> Settings {
    read_from(&config_dir())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    write_to(&config_dir(), settings)
}

pub fn get_data_dir() -> PathBuf {
    load_settings().data_dir
}

/// Expand a leading `~` and anchor relative paths at the working directory.
pub fn expand_path(raw: &str) -> PathBuf {
    let path = if raw == "~" {
        home()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home().join(rest)
    } else {
        PathBuf::from(raw)
    };
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("config").join("unitrack");
        let settings = Settings {
            data_dir: PathBuf::from("/tmp/test"),
            default_program: Some("cs".to_string()),
        };
        write_to(&nested, &settings).unwrap();
        assert_eq!(read_from(&nested), settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_from(dir.path()), Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{ not json").unwrap();
        assert_eq!(read_from(dir.path()), Settings::default());
    }

    #[test]
    fn test_default_program_is_optional() {
        let s: Settings = serde_json::from_str(r#"{"data_dir": "/tmp/test"}"#).unwrap();
        assert!(s.default_program.is_none());
        assert!(!serde_json::to_string(&s).unwrap().contains("default_program"));
    }

    #[test]
    fn test_default_data_dir() {
        assert!(Settings::default().data_dir.ends_with("Documents/unitrack"));
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("/srv/unitrack"), PathBuf::from("/srv/unitrack"));
        assert_eq!(expand_path("~/uni"), home().join("uni"));
        assert!(expand_path("relative/dir").is_absolute());
        assert!(expand_path("relative/dir").ends_with("relative/dir"));
    }
}
