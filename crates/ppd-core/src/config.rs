use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per download (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 1.0 = 1s).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
    /// Upper bound of the random jitter added to each backoff delay, in seconds.
    pub jitter_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 1.0,
            max_delay_secs: 30,
            jitter_secs: 0.5,
        }
    }
}

/// Inter-request pacing parameters (optional section in config.toml).
///
/// Every outbound request waits until at least a random delay drawn from
/// `[min_delay_secs, max_delay_secs]` has passed since the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_delay_secs: 1.0,
            max_delay_secs: 3.0,
        }
    }
}

/// Global configuration loaded from `~/.config/ppd/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpdConfig {
    /// Base directory for the downloaded paper tree.
    pub download_dir: PathBuf,
    /// Path to the tracking ledger CSV.
    pub ledger_path: PathBuf,
    /// Per-request total timeout in seconds.
    pub timeout_secs: u64,
    /// Run the structural PDF check on every downloaded file.
    pub validate: bool,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional pacing interval; if missing, built-in defaults are used.
    #[serde(default)]
    pub pacing: Option<PacingConfig>,
}

impl Default for PpdConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("exam_papers"),
            ledger_path: PathBuf::from("downloaded_papers.csv"),
            timeout_secs: 120,
            validate: true,
            retry: None,
            pacing: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ppd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PpdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PpdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PpdConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PpdConfig::default();
        assert_eq!(cfg.timeout_secs, 120);
        assert!(cfg.validate);
        assert!(cfg.retry.is_none());
        assert!(cfg.pacing.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PpdConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PpdConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.download_dir, cfg.download_dir);
        assert_eq!(parsed.ledger_path, cfg.ledger_path);
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
        assert_eq!(parsed.validate, cfg.validate);
    }

    #[test]
    fn config_toml_retry_and_pacing_sections() {
        let toml = r#"
            download_dir = "/data/papers"
            ledger_path = "/data/papers/ledger.csv"
            timeout_secs = 60
            validate = false

            [retry]
            max_attempts = 5
            base_delay_secs = 0.5
            max_delay_secs = 15
            jitter_secs = 0.25

            [pacing]
            min_delay_secs = 2.0
            max_delay_secs = 5.0
        "#;
        let cfg: PpdConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.timeout_secs, 60);
        assert!(!cfg.validate);
        let retry = cfg.retry.as_ref().unwrap();
        assert_eq!(retry.max_attempts, 5);
        assert!((retry.base_delay_secs - 0.5).abs() < 1e-9);
        assert_eq!(retry.max_delay_secs, 15);
        let pacing = cfg.pacing.as_ref().unwrap();
        assert!((pacing.min_delay_secs - 2.0).abs() < 1e-9);
        assert!((pacing.max_delay_secs - 5.0).abs() < 1e-9);
    }

    #[test]
    fn config_toml_sections_optional() {
        let toml = r#"
            download_dir = "papers"
            ledger_path = "papers.csv"
            timeout_secs = 120
            validate = true
        "#;
        let cfg: PpdConfig = toml::from_str(toml).unwrap();
        assert!(cfg.retry.is_none());
        assert!(cfg.pacing.is_none());
    }
}
