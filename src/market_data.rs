// =============================================================================
// Market Data — acquisition seam for the screener
// =============================================================================
//
// Fetching historical bars is a collaborator concern, not part of the
// screening core: the engine only ever sees a validated `Series`.  The
// `BarSource` trait is the seam; the in-repo implementation reads bars from
// local JSON files so the binary runs end to end without a network provider.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::{PriceBar, Series};

/// Supplies a time-ordered daily series per ticker.
///
/// Implementations own the entire upstream error surface (I/O, network,
/// unknown ticker, empty payload); the screener treats any error as a
/// per-ticker skip and moves on.
pub trait BarSource {
    /// Fetch the daily bar history for `ticker`, oldest bar first.
    fn fetch_daily(
        &self,
        ticker: &str,
    ) -> impl std::future::Future<Output = Result<Series>> + Send;
}

// =============================================================================
// FileBarSource — JSON files on disk
// =============================================================================

/// Reads `<data_dir>/<TICKER>.json`, each file a JSON array of price bars:
///
/// ```json
/// [{ "date": "2024-01-02", "close": 185.64, "volume": 82488700 }, ...]
/// ```
#[derive(Debug, Clone)]
pub struct FileBarSource {
    data_dir: PathBuf,
}

impl FileBarSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{ticker}.json"))
    }
}

impl BarSource for FileBarSource {
    async fn fetch_daily(&self, ticker: &str) -> Result<Series> {
        let path = self.path_for(ticker);
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read bars from {}", path.display()))?;

        let bars: Vec<PriceBar> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse bars from {}", path.display()))?;

        let series = Series::new(bars)
            .with_context(|| format!("rejected bar data in {}", path.display()))?;
        Ok(series)
    }
}

/// Write a bar series as JSON next to where `FileBarSource` will look for
/// it. Mainly useful for seeding a data directory and for tests.
pub fn write_bars(dir: impl AsRef<Path>, ticker: &str, bars: &[PriceBar]) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create data dir {}", dir.display()))?;

    let path = dir.join(format!("{ticker}.json"));
    let content = serde_json::to_string_pretty(bars).context("failed to serialise bars")?;
    std::fs::write(&path, content)
        .with_context(|| format!("failed to write bars to {}", path.display()))?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn temp_data_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("meridian-bars-{}-{tag}", std::process::id()))
    }

    fn sample_bars(n: usize) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        (0..n)
            .map(|i| PriceBar {
                date: start + chrono::Days::new(i as u64),
                close: 100.0 + i as f64,
                volume: 1_000 + i as u64,
            })
            .collect()
    }

    #[tokio::test]
    async fn file_source_roundtrip() {
        let dir = temp_data_dir("roundtrip");
        let bars = sample_bars(5);
        write_bars(&dir, "AAPL", &bars).unwrap();

        let source = FileBarSource::new(&dir);
        let series = source.fetch_daily("AAPL").await.unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series.bars(), &bars[..]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn file_source_missing_ticker_is_an_error() {
        let source = FileBarSource::new(temp_data_dir("missing"));
        let err = source.fetch_daily("NOPE").await.unwrap_err();
        assert!(err.to_string().contains("NOPE.json"));
    }

    #[tokio::test]
    async fn file_source_rejects_malformed_json() {
        let dir = temp_data_dir("malformed");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("BAD.json"), "not json").unwrap();

        let source = FileBarSource::new(&dir);
        let err = source.fetch_daily("BAD").await.unwrap_err();
        assert!(err.to_string().contains("parse"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn file_source_rejects_unordered_bars() {
        let dir = temp_data_dir("unordered");
        let mut bars = sample_bars(3);
        bars.swap(0, 2);
        write_bars(&dir, "SWAP", &bars).unwrap();

        let source = FileBarSource::new(&dir);
        let err = source.fetch_daily("SWAP").await.unwrap_err();
        assert!(err.to_string().contains("rejected bar data"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
