// Weekly target table
// Stored as camelCase JSON, ~/.config/countboard/targets.json by default

use std::fs;
use std::path::Path;

use countboard_stats::WeekTargetConfig;

/// Read the target table. A missing file yields the default table; an
/// unreadable or invalid one is an error.
pub fn load_targets(path: &Path) -> Result<WeekTargetConfig, String> {
    if !path.exists() {
        log::debug!("{} not found, using default targets", path.display());
        return Ok(WeekTargetConfig::default());
    }

    let json = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let config = WeekTargetConfig::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?;

    for overlap in config.overlaps() {
        log::warn!("{}: {overlap}", path.display());
    }
    Ok(config)
}

pub fn save_targets(path: &Path, config: &WeekTargetConfig) -> Result<(), String> {
    config.validate().map_err(|e| e.to_string())?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let json = config.to_json_pretty().map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use countboard_stats::{Category, WeekTarget};

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_targets(&dir.path().join("targets.json")).unwrap();
        assert_eq!(config, WeekTargetConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("targets.json");

        let mut config = WeekTargetConfig::default();
        *config.for_category_mut(Category::Cc).week_mut(3).unwrap() = WeekTarget::new(
            NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            80.0,
        );
        save_targets(&path, &config).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"startDate\": \"2026-10-12\""), "{text}");
        assert_eq!(load_targets(&path).unwrap(), config);
    }

    #[test]
    fn invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.json");
        fs::write(&path, r#"{"ira": {"week1": {"target": 150}}}"#).unwrap();
        let err = load_targets(&path).unwrap_err();
        assert!(err.contains("outside 0..=100"), "{err}");
    }
}
