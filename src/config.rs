//! Configuration loading for the reading assistant.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! sensible defaults so the UI can still launch.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: f32,
    /// Estimated spoken duration per character for the final speech mark,
    /// which has no following mark to bound it.
    #[serde(default = "default_trailing_ms_per_char")]
    pub trailing_ms_per_char: f64,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_auto_scroll")]
    pub auto_scroll: bool,
    #[serde(default)]
    pub center_highlight: bool,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,
    #[serde(default = "default_margin")]
    pub margin_horizontal: u16,
    #[serde(default = "default_margin")]
    pub margin_vertical: u16,
    #[serde(default = "default_day_highlight")]
    pub day_highlight: HighlightColor,
    #[serde(default = "default_night_highlight")]
    pub night_highlight: HighlightColor,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            backend_url: default_backend_url(),
            request_timeout_secs: default_request_timeout_secs(),
            trailing_ms_per_char: default_trailing_ms_per_char(),
            tick_interval_ms: default_tick_interval_ms(),
            auto_scroll: default_auto_scroll(),
            center_highlight: false,
            theme: ThemeMode::Day,
            font_size: default_font_size(),
            line_spacing: default_line_spacing(),
            margin_horizontal: default_margin(),
            margin_vertical: default_margin(),
            day_highlight: default_day_highlight(),
            night_highlight: default_night_highlight(),
            export_dir: default_export_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Day
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HighlightColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            clamp_config(cfg)
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

fn clamp_config(mut config: AppConfig) -> AppConfig {
    config.trailing_ms_per_char = config.trailing_ms_per_char.clamp(1.0, 1000.0);
    config.tick_interval_ms = config.tick_interval_ms.clamp(16, 1000);
    config.request_timeout_secs = config.request_timeout_secs.clamp(1.0, 300.0);
    config.font_size = config.font_size.clamp(10, 72);
    config.line_spacing = config.line_spacing.clamp(0.8, 3.0);
    config.margin_horizontal = config.margin_horizontal.min(400);
    config.margin_vertical = config.margin_vertical.min(200);
    config
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout_secs() -> f32 {
    30.0
}

fn default_trailing_ms_per_char() -> f64 {
    crate::sync::DEFAULT_TRAILING_MS_PER_CHAR
}

fn default_tick_interval_ms() -> u64 {
    100
}

fn default_auto_scroll() -> bool {
    true
}

fn default_font_size() -> u32 {
    22
}

fn default_line_spacing() -> f32 {
    1.6
}

fn default_margin() -> u16 {
    16
}

fn default_day_highlight() -> HighlightColor {
    HighlightColor {
        r: 1.0,
        g: 0.85,
        b: 0.3,
        a: 0.45,
    }
}

fn default_night_highlight() -> HighlightColor {
    HighlightColor {
        r: 0.8,
        g: 0.8,
        b: 0.5,
        a: 0.3,
    }
}

fn default_export_dir() -> String {
    "exports".to_string()
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_duration_is_clamped() {
        let cfg = clamp_config(AppConfig {
            trailing_ms_per_char: 0.0,
            ..AppConfig::default()
        });
        assert_eq!(cfg.trailing_ms_per_char, 1.0);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: AppConfig = toml::from_str("backend_url = \"http://localhost:9000\"").unwrap();
        assert_eq!(cfg.backend_url, "http://localhost:9000");
        assert_eq!(cfg.trailing_ms_per_char, 50.0);
        assert!(cfg.auto_scroll);
    }
}
