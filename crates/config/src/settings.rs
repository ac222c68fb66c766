// Application settings
// Loaded from ~/.config/countboard/settings.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Recipients and signature for the progress email.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    /// Name used to sign the draft
    pub sender: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Snapshot database; defaults to `snapshots.db` next to the settings file
    pub snapshot_db: Option<PathBuf>,
    /// Weekly target table; defaults to `targets.json` next to the settings file
    pub targets_file: Option<PathBuf>,
    pub email: EmailSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        crate::config_dir().join("settings.toml")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Missing files are silently defaulted; unreadable or invalid ones are logged.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("error parsing {}: {}; using default settings", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let text = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, text).map_err(|e| e.to_string())
    }

    pub fn snapshot_db_path(&self) -> PathBuf {
        self.snapshot_db
            .clone()
            .unwrap_or_else(|| crate::config_dir().join("snapshots.db"))
    }

    pub fn targets_path(&self) -> PathBuf {
        self.targets_file
            .clone()
            .unwrap_or_else(|| crate::config_dir().join("targets.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.toml"));
        assert_eq!(settings, Settings::default());
        assert!(settings.snapshot_db_path().ends_with("countboard/snapshots.db"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            r#"
snapshot_db = "/data/counts.db"

[email]
to = ["ops@example.com"]
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.snapshot_db_path(), PathBuf::from("/data/counts.db"));
        assert_eq!(settings.email.to, vec!["ops@example.com"]);
        assert!(settings.email.cc.is_empty());
        assert!(settings.targets_file.is_none());
    }

    #[test]
    fn invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "email = 3\n").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let settings = Settings {
            targets_file: Some(PathBuf::from("/data/targets.json")),
            email: EmailSettings {
                to: vec!["ops@example.com".into()],
                cc: vec!["lead@example.com".into()],
                sender: "Inventory Control".into(),
            },
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }
}
