use std::fs;
use std::path::PathBuf;

use engine_logging::{engine_info, engine_warn};
use magnet_core::ConnectionSettings;
use magnet_engine::{AtomicFileWriter, SettingsError, SettingsStore};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SETTINGS_FILENAME: &str = ".magnet_settings.ron";

/// On-disk record. Key names match the extension's synced storage keys.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PersistedSettings {
    webui_url: String,
    username: String,
    password: String,
}

impl From<PersistedSettings> for ConnectionSettings {
    fn from(value: PersistedSettings) -> Self {
        ConnectionSettings::new(value.webui_url, value.username, value.password)
    }
}

impl From<&ConnectionSettings> for PersistedSettings {
    fn from(value: &ConnectionSettings) -> Self {
        Self {
            webui_url: value.webui_url.clone(),
            username: value.username.clone(),
            password: value.password.clone(),
        }
    }
}

/// Settings kept in a RON file, re-read on every `load`.
pub struct RonSettingsStore {
    path: PathBuf,
}

impl RonSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SettingsStore for RonSettingsStore {
    fn load(&self) -> Result<ConnectionSettings, SettingsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                engine_info!("No settings at {:?}; using empty settings", self.path);
                return Ok(ConnectionSettings::default());
            }
            Err(err) => {
                engine_warn!("Failed to read settings from {:?}: {}", self.path, err);
                return Err(SettingsError::Read(err.to_string()));
            }
        };

        let persisted: PersistedSettings = ron::from_str(&content).map_err(|err| {
            engine_warn!("Failed to parse settings from {:?}: {}", self.path, err);
            SettingsError::Parse(err.to_string())
        })?;
        Ok(persisted.into())
    }

    fn save(&self, settings: &ConnectionSettings) -> Result<(), SettingsError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&PersistedSettings::from(settings), pretty)
            .map_err(|err| SettingsError::Parse(err.to_string()))?;

        let writer = AtomicFileWriter::new(self.path.clone());
        let written = writer.write(&content)?;
        engine_info!(
            "Saved settings to {:?} (password {})",
            written,
            engine_logging::mask_secret(&settings.password)
        );
        Ok(())
    }
}
