use log::warn;
use panel_order::PanelConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "panel.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no config directory available")]
    NoConfigDir,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Applets the host owns, in the order they were added.
    #[serde(default = "default_applets")]
    pub applets: Vec<String>,
    #[serde(default)]
    pub panel: PanelConfig,
    #[serde(default)]
    pub last_size: Option<(f32, f32)>,
    #[serde(default = "default_icon_size")]
    pub icon_size: u32,
}

fn default_applets() -> Vec<String> {
    ["launcher", "tasks", "clock", "tray"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn default_icon_size() -> u32 {
    48
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            applets: default_applets(),
            panel: PanelConfig::default(),
            last_size: None,
            icon_size: default_icon_size(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "panel_order", "panel_order")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("Failed to read config {}: {err}, using default", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        let result = Self::config_path()
            .ok_or(ConfigError::NoConfigDir)
            .and_then(|path| self.save_to(&path));
        if let Err(err) = result {
            warn!("Failed to save config: {err}");
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_order::{Alignment, IdList};

    #[test]
    fn config_survives_a_trip_through_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = AppConfig {
            applets: vec!["clock".into(), "tasks".into()],
            panel: PanelConfig {
                applet_order: IdList::decode("tasks;clock"),
                alignment: Alignment::Justify,
                splitter_position: Some(1),
                ..Default::default()
            },
            last_size: Some((900.0, 200.0)),
            icon_size: 32,
        };

        config.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded, config);

        let raw = std::fs::read_to_string(&path).expect("read back");
        assert!(raw.contains("\"appletOrder\": \"tasks;clock\""));
        assert!(raw.contains("\"splitterPosition2\": -1"));
    }

    #[test]
    fn broken_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").expect("write");
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Json(_))));
        assert!(matches!(
            AppConfig::load_from(&dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn partial_file_gets_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "panel": { "alignment": 10 } }"#).unwrap();
        assert_eq!(config.applets, default_applets());
        assert_eq!(config.icon_size, 48);
        assert!(config.panel.alignment.is_justify());
    }
}
