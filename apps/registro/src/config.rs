use serde::Deserialize;
use std::fs;

/// Recording endpoint used when nothing overrides it.
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/a/macros/cchc.cl/s/AKfycbySTplKZ2Ito5a9xsHbIN9usKkSVeFKt1Q57Ug8xWLYl3GLmDYoiP9HAmtwn4p0Ub9r/exec";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint_url: String,
    pub reset_delay_seconds: u64,
    pub request_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT.into(),
            reset_delay_seconds: 8,
            request_timeout_seconds: 30,
        }
    }
}

/// Defaults, overlaid by an optional `registro.toml`, overlaid by
/// environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("registro.toml") {
        if let Ok(file_cfg) = toml::from_str::<Settings>(&raw) {
            settings = file_cfg;
        }
    }

    if let Ok(v) = std::env::var("REGISTRO_ENDPOINT_URL") {
        settings.endpoint_url = v;
    }
    if let Ok(v) = std::env::var("REGISTRO_RESET_DELAY_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.reset_delay_seconds = parsed;
        }
    }
    if let Ok(v) = std::env::var("REGISTRO_REQUEST_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_seconds = parsed;
        }
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_production_endpoint() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint_url, DEFAULT_ENDPOINT);
        assert_eq!(settings.reset_delay_seconds, 8);
    }

    #[test]
    fn partial_files_keep_defaults_for_missing_keys() {
        let settings: Settings =
            toml::from_str("reset_delay_seconds = 3").expect("parse settings");
        assert_eq!(settings.reset_delay_seconds, 3);
        assert_eq!(settings.endpoint_url, DEFAULT_ENDPOINT);
        assert_eq!(settings.request_timeout_seconds, 30);
    }
}
