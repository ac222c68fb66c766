// Configuration loading

pub mod settings;
pub mod targets;

use std::path::PathBuf;

pub use settings::{EmailSettings, Settings};
pub use targets::{load_targets, save_targets};

/// `<config_dir>/countboard`, or `./countboard` when the platform has no config dir.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("countboard")
}
