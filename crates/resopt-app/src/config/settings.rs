//! Settings loading from `.resopt/config.toml`

use std::path::{Path, PathBuf};

use resopt_core::prelude::*;

use super::types::Settings;

/// Directory holding the client configuration
pub const RESOPT_DIR: &str = ".resopt";

const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable overriding `server.base_url`
pub const ENDPOINT_ENV: &str = "RESOPT_ENDPOINT";

/// Load settings from `<dir>/.resopt/config.toml`.
///
/// A missing or invalid file yields defaults.
pub fn load_settings(dir: &Path) -> Settings {
    let config_path = dir.join(RESOPT_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Apply environment overrides on top of loaded settings.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() {
            debug!("{} overrides server.base_url with {}", ENDPOINT_ENV, endpoint);
            settings.server.base_url = endpoint.to_string();
        }
    }
}

/// Create `<dir>/.resopt/config.toml` with commented defaults if missing.
///
/// Returns the path of the config file, which is left untouched if it
/// already exists.
pub fn init_config_dir(dir: &Path) -> Result<PathBuf> {
    let resopt_dir = dir.join(RESOPT_DIR);

    if !resopt_dir.exists() {
        std::fs::create_dir_all(&resopt_dir)
            .map_err(|e| Error::config(format!("Failed to create .resopt dir: {}", e)))?;
    }

    let config_path = resopt_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, generate_default_config())
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(config_path)
}

fn generate_default_config() -> &'static str {
    r#"# Resume Optimizer client configuration

[server]
base_url = "http://localhost:5001"   # Overridden by RESOPT_ENDPOINT or --endpoint

[progress]
# Nominal duration of each loading stage; the last stage holds until the
# analysis returns. Must list exactly five values.
stage_durations_ms = [3000, 15000, 20000, 20000, 15000]

[animation]
counter_duration_ms = 1500
counter_tick_ms = 20
stroke_delay_ms = 100
suggestion_stagger_ms = 100

[share]
base_url = "https://wa.me/?text="
"#
}
