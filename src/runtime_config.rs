// =============================================================================
// Screener Configuration — JSON settings with tolerant loading
// =============================================================================
//
// Every field carries `#[serde(default)]` so that adding new fields never
// breaks loading an older config file.  Persistence uses an atomic
// tmp + rename pattern to prevent corruption on crash.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_tickers() -> Vec<String> {
    ["AAPL", "TSLA", "NVDA", "MSFT", "AMD", "META", "GOOG", "AMZN"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_max_concurrent() -> usize {
    4
}

fn default_min_history() -> usize {
    // Roughly six months of trading days; comfortably clears the 26-period
    // EMA span and the 20-day high window.
    130
}

// =============================================================================
// ScreenerConfig
// =============================================================================

/// Top-level configuration for a screening run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Instruments to screen.
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,

    /// Directory holding `<TICKER>.json` bar files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Maximum number of tickers screened concurrently. 1 means sequential.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Advisory minimum series length; shorter series are logged, not
    /// rejected — indicator availability decides classification.
    #[serde(default = "default_min_history")]
    pub min_history: usize,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            data_dir: default_data_dir(),
            max_concurrent: default_max_concurrent(),
            min_history: default_min_history(),
        }
    }
}

impl ScreenerConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            tickers = ?config.tickers,
            data_dir = %config.data_dir,
            "config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write (write to
    /// `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "config saved (atomic)");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = ScreenerConfig::default();
        assert_eq!(cfg.tickers.len(), 8);
        assert_eq!(cfg.tickers[0], "AAPL");
        assert_eq!(cfg.tickers[7], "AMZN");
        assert_eq!(cfg.data_dir, "data");
        assert_eq!(cfg.max_concurrent, 4);
        assert_eq!(cfg.min_history, 130);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: ScreenerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.tickers.len(), 8);
        assert_eq!(cfg.data_dir, "data");
        assert_eq!(cfg.max_concurrent, 4);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "tickers": ["IBM"], "max_concurrent": 2 }"#;
        let cfg: ScreenerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.tickers, vec!["IBM"]);
        assert_eq!(cfg.max_concurrent, 2);
        assert_eq!(cfg.data_dir, "data");
        assert_eq!(cfg.min_history, 130);
    }

    #[test]
    fn roundtrip_serialisation() {
        let cfg = ScreenerConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: ScreenerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.tickers, cfg2.tickers);
        assert_eq!(cfg.data_dir, cfg2.data_dir);
        assert_eq!(cfg.max_concurrent, cfg2.max_concurrent);
        assert_eq!(cfg.min_history, cfg2.min_history);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "meridian-config-{}.json",
            std::process::id()
        ));

        let mut cfg = ScreenerConfig::default();
        cfg.tickers = vec!["NFLX".to_string()];
        cfg.save(&path).unwrap();

        let loaded = ScreenerConfig::load(&path).unwrap();
        assert_eq!(loaded.tickers, vec!["NFLX"]);

        std::fs::remove_file(&path).ok();
    }
}
