use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::PathBuf;

/// Retrive the configuration for the application.
///
/// Values from `configuration.yaml` can be overridden with environment
/// variables, e.g. `APP_APPLICATION__PORT=8080`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    Config::builder()
        .add_source(File::new("configuration.yaml", FileFormat::Yaml))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub waitlist: WaitlistSettings,
}

#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where the waitlist is persisted on disk.
#[derive(Debug, Clone, serde::Deserialize, Getters)]
pub struct WaitlistSettings {
    pub data_dir: PathBuf,
    pub file_name: String,
}

impl WaitlistSettings {
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}
