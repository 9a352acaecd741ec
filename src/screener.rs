// =============================================================================
// Screener — batch runner over a set of tickers
// =============================================================================
//
// Fetches each ticker's series from the injected `BarSource`, computes the
// indicator frame, classifies, and aggregates.  Per-ticker failures (fetch
// errors, invalid series, insufficient history) are logged and recorded as
// skips; they never abort the batch.
//
// Tickers are screened with bounded concurrency.  The classification of one
// instrument has no cross-instrument dependency, so completion order is
// arbitrary — the report is sorted by an explicit key afterwards and never
// depends on arrival order.

use std::cmp::Ordering;

use futures_util::{stream, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use crate::classifier::classify;
use crate::indicators::compute_indicators;
use crate::market_data::BarSource;
use crate::types::{ScreenError, ScreeningResult};

/// A ticker that produced no result, with the reason it was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: String,
}

/// Aggregated output of one batch run.
///
/// `results` is sorted by closing price descending (ticker ascending as the
/// tiebreak) so output is stable regardless of how the concurrent screens
/// complete.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenReport {
    pub results: Vec<ScreeningResult>,
    pub skipped: Vec<SkippedTicker>,
}

impl ScreenReport {
    /// The instruments that classified as breakouts.
    pub fn breakouts(&self) -> Vec<&ScreeningResult> {
        self.results.iter().filter(|r| r.is_breakout).collect()
    }
}

enum Outcome {
    Screened(ScreeningResult),
    Skipped(String),
}

/// Screen every ticker in `tickers` against `source`.
///
/// At most `max_concurrent` fetches/classifications are in flight at once
/// (values below 1 are treated as 1; 1 gives the sequential reference
/// behavior).  `min_history` is advisory: series shorter than it are logged
/// but still classified if their trailing indicators are defined.
pub async fn run_screen<S: BarSource + Sync>(
    source: &S,
    tickers: &[String],
    max_concurrent: usize,
    min_history: usize,
) -> ScreenReport {
    let limit = max_concurrent.max(1);

    let outcomes: Vec<(String, Outcome)> = stream::iter(tickers.iter().cloned())
        .map(|ticker| async move {
            let outcome = screen_ticker(source, &ticker, min_history).await;
            (ticker, outcome)
        })
        .buffer_unordered(limit)
        .collect()
        .await;

    let mut results = Vec::new();
    let mut skipped = Vec::new();
    for (ticker, outcome) in outcomes {
        match outcome {
            Outcome::Screened(result) => {
                info!(
                    ticker = %result.ticker,
                    close = result.close_price,
                    rsi = result.rsi,
                    macd = result.macd,
                    volume = result.volume,
                    breakout = result.is_breakout,
                    "ticker screened"
                );
                results.push(result);
            }
            Outcome::Skipped(reason) => {
                warn!(ticker = %ticker, reason = %reason, "ticker skipped");
                skipped.push(SkippedTicker { ticker, reason });
            }
        }
    }

    // Explicit ordering: top closing price first, ticker as tiebreak.
    results.sort_by(|a, b| {
        b.close_price
            .partial_cmp(&a.close_price)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.ticker.cmp(&b.ticker))
    });
    skipped.sort_by(|a, b| a.ticker.cmp(&b.ticker));

    ScreenReport { results, skipped }
}

async fn screen_ticker<S: BarSource + Sync>(
    source: &S,
    ticker: &str,
    min_history: usize,
) -> Outcome {
    let series = match source.fetch_daily(ticker).await {
        Ok(series) => series,
        Err(e) => return Outcome::Skipped(format!("fetch failed: {e:#}")),
    };

    if series.len() < min_history {
        warn!(
            ticker,
            len = series.len(),
            min_history,
            "series shorter than configured history window"
        );
    }

    let frame = compute_indicators(&series);
    match classify(ticker, &series, &frame) {
        Ok(result) => Outcome::Screened(result),
        Err(e @ ScreenError::InsufficientData { .. }) => Outcome::Skipped(e.to_string()),
        Err(e @ ScreenError::InvalidSeries { .. }) => Outcome::Skipped(e.to_string()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PriceBar, Series};
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    /// In-memory stub source: a fixed map of ticker -> bars.
    struct StubSource {
        data: HashMap<String, Vec<PriceBar>>,
    }

    impl BarSource for StubSource {
        async fn fetch_daily(&self, ticker: &str) -> Result<Series> {
            let bars = self
                .data
                .get(ticker)
                .cloned()
                .ok_or_else(|| anyhow!("no data for {ticker}"))?;
            Ok(Series::new(bars)?)
        }
    }

    fn bars(closes: &[f64], volumes: &[u64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&close, &volume))| PriceBar {
                date: start + chrono::Days::new(i as u64),
                close,
                volume,
            })
            .collect()
    }

    /// Rising-with-pullbacks series that classifies as a breakout.
    fn breakout_bars(scale: f64) -> Vec<PriceBar> {
        let mut closes = vec![100.0 * scale];
        for i in 0..38 {
            let step = if i % 2 == 0 { 1.5 } else { -1.0 };
            closes.push(closes.last().unwrap() + step * scale);
        }
        closes.push(closes.last().unwrap() + 2.0 * scale);

        let mut volumes = vec![1_000_000u64; 39];
        volumes.push(2_000_000);
        bars(&closes, &volumes)
    }

    fn stub() -> StubSource {
        let mut data = HashMap::new();
        data.insert("UP".to_string(), breakout_bars(1.0));
        data.insert("BIG".to_string(), breakout_bars(10.0));
        // Flat series: RSI undefined at the last index.
        data.insert("FLAT".to_string(), bars(&[100.0; 40], &[1_000_000; 40]));
        // Too short for any classification.
        data.insert("SHORT".to_string(), bars(&[100.0], &[1_000]));
        StubSource { data }
    }

    #[tokio::test]
    async fn batch_collects_results_and_skips() {
        let source = stub();
        let tickers: Vec<String> = ["UP", "FLAT", "SHORT", "GONE", "BIG"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let report = run_screen(&source, &tickers, 4, 130).await;

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(report.breakouts().len(), 2);

        let skipped: Vec<&str> = report.skipped.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(skipped, vec!["FLAT", "GONE", "SHORT"]);
    }

    #[tokio::test]
    async fn one_bad_ticker_never_aborts_the_batch() {
        let source = stub();
        let tickers: Vec<String> = ["GONE", "UP"].iter().map(|s| s.to_string()).collect();
        let report = run_screen(&source, &tickers, 2, 0).await;
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].ticker, "UP");
    }

    #[tokio::test]
    async fn results_are_sorted_by_close_descending() {
        let source = stub();
        let tickers: Vec<String> = ["UP", "BIG"].iter().map(|s| s.to_string()).collect();

        // Run with different concurrency limits; ordering must not change.
        for limit in [1, 2, 8] {
            let report = run_screen(&source, &tickers, limit, 0).await;
            let order: Vec<&str> = report.results.iter().map(|r| r.ticker.as_str()).collect();
            assert_eq!(order, vec!["BIG", "UP"], "limit {limit}");
        }
    }

    #[tokio::test]
    async fn concurrency_limit_zero_still_screens() {
        let source = stub();
        let tickers = vec!["UP".to_string()];
        let report = run_screen(&source, &tickers, 0, 0).await;
        assert_eq!(report.results.len(), 1);
    }
}
