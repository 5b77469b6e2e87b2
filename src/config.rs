//! Configuration management for ResizeBench

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ResizeBenchError};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scale factor applied to both dimensions
    pub scale: f64,

    /// Directory searched recursively for source images
    pub source: PathBuf,

    /// Output directory, cleaned before each pass
    pub dest: PathBuf,

    /// Maximum in-flight pipelines in the concurrent pass (None = auto-detect)
    pub max_concurrency: Option<usize>,

    /// JPEG output quality (1-100)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_quality() -> u8 {
    90
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Default concurrency degree: logical CPUs, capped to avoid excessive memory usage
pub fn default_concurrency() -> usize {
    num_cpus::get().min(16)
}

impl Config {
    /// Load configuration from a TOML or YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ResizeBenchError::config(format!(
                "Failed to read config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(&content).map_err(Into::into),
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(Into::into),
            _ => Err(ResizeBenchError::config(
                "Unsupported config file format. Use .toml or .yaml",
            )),
        }
    }

    /// Effective concurrency degree for the concurrent pass
    pub fn concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or_else(default_concurrency)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(ResizeBenchError::config(format!(
                "Scale factor must be a positive number, got {}",
                self.scale
            )));
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(ResizeBenchError::config(
                "Quality must be between 1 and 100",
            ));
        }

        if let Some(max) = self.max_concurrency {
            if max == 0 {
                return Err(ResizeBenchError::config(
                    "max_concurrency must be greater than 0",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn sample_config() -> Config {
        Config {
            scale: 2.0,
            source: PathBuf::from("images"),
            dest: PathBuf::from("output"),
            max_concurrency: Some(4),
            quality: 90,
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_validate_accepts_sane_config() {
        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nonpositive_scale() {
        let mut config = sample_config();
        config.scale = 0.0;
        assert!(config.validate().is_err());

        config.scale = -1.5;
        assert!(config.validate().is_err());

        config.scale = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_quality_and_concurrency() {
        let mut config = sample_config();
        config.quality = 0;
        assert!(config.validate().is_err());

        let mut config = sample_config();
        config.max_concurrency = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_concurrency_default() {
        let mut config = sample_config();
        config.max_concurrency = None;
        let degree = config.concurrency();
        assert!(degree > 0);
        assert!(degree <= 16);
    }

    #[test]
    fn test_config_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "scale = 0.5\nsource = \"in\"\ndest = \"out\"\nmax_concurrency = 8"
        )
        .unwrap();
        let path = file.path().with_extension("toml");
        std::fs::copy(file.path(), &path).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.scale, 0.5);
        assert_eq!(config.max_concurrency, Some(8));
        assert_eq!(config.quality, 90); // serde default
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_unknown_extension() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("ini");
        std::fs::copy(file.path(), &path).unwrap();
        assert!(Config::from_file(&path).is_err());
    }
}
