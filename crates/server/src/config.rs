use labelwise_classify::Segmentation;
use labelwise_ocr::OcrSettings;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable naming the TOML config file.
pub const CONFIG_ENV: &str = "LABELWISE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: '{value}'")]
    Env { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines for terminals.
    #[default]
    Pretty,
    /// Bunyan-style JSON, one object per line.
    Bunyan,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "bunyan" | "json" => Ok(LogFormat::Bunyan),
            other => Err(format!("Unknown log format: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub format: LogFormat,
    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: "info,tower_http=debug".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TokenizerSettings {
    pub segmentation: Segmentation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// JSON ingredient reference, loaded once at startup.
    pub reference_path: PathBuf,
    /// Browser front-end served under `/static` when set.
    pub static_dir: Option<PathBuf>,
    /// Upper bound on request bodies; base64 photos are large.
    pub max_body_bytes: usize,
    pub ocr: OcrSettings,
    pub tokenizer: TokenizerSettings,
    pub log: LogSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            reference_path: PathBuf::from("database/ingredients.json"),
            static_dir: None,
            max_body_bytes: 10 * 1024 * 1024,
            ocr: OcrSettings::default(),
            tokenizer: TokenizerSettings::default(),
            log: LogSettings::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                let raw = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_env(&lookup)?;
        Ok(config)
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LABELWISE_BIND") {
            self.bind = parse_env("LABELWISE_BIND", v)?;
        }
        if let Some(v) = lookup("LABELWISE_REFERENCE") {
            self.reference_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("LABELWISE_STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("LABELWISE_MAX_BODY_BYTES") {
            self.max_body_bytes = parse_env("LABELWISE_MAX_BODY_BYTES", v)?;
        }
        if let Some(v) = lookup("LABELWISE_OCR_BACKEND") {
            self.ocr.backend = parse_env("LABELWISE_OCR_BACKEND", v)?;
        }
        if let Some(v) = lookup("LABELWISE_OCR_LANGUAGE") {
            self.ocr.language = v;
        }
        if let Some(v) = lookup("TESSDATA_PREFIX") {
            self.ocr.data_path = Some(v);
        }
        if let Some(v) = lookup("LABELWISE_SEGMENTATION") {
            self.tokenizer.segmentation = parse_env("LABELWISE_SEGMENTATION", v)?;
        }
        if let Some(v) = lookup("LABELWISE_LOG_FORMAT") {
            self.log.format = parse_env("LABELWISE_LOG_FORMAT", v)?;
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Env { key, value })
}
