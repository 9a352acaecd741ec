// =============================================================================
// Shared types used across the Meridian screening engine
// =============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One trading day's data for a single instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date. Strictly increasing across a series.
    pub date: NaiveDate,
    /// Closing price. Finite and positive.
    pub close: f64,
    /// Traded volume for the day.
    pub volume: u64,
}

/// Errors produced by the screening core. All are per-instrument and
/// recoverable; a failure for one ticker never aborts a batch.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The series is too short, or the indicators required at the last two
    /// indices are still in their warm-up region.
    #[error("insufficient data for {ticker}: {len} bars do not cover the required indicator windows")]
    InsufficientData { ticker: String, len: usize },

    /// Malformed input. The core validates and fails fast rather than
    /// computing on corrupt data.
    #[error("invalid series: {reason}")]
    InvalidSeries { reason: String },
}

impl ScreenError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidSeries {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Series — validated, time-ordered price/volume history
// =============================================================================

/// An ordered sequence of daily bars for one instrument.
///
/// Construction validates the invariants the indicator engine relies on:
/// the series is non-empty, dates are strictly ascending (no duplicates),
/// and every close is finite and positive. A `Series` that exists is safe
/// to compute on.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    bars: Vec<PriceBar>,
}

impl Series {
    /// Validate `bars` into a `Series`.
    ///
    /// # Errors
    /// `ScreenError::InvalidSeries` when the input is empty, dates are not
    /// strictly increasing, or a close is non-finite or non-positive.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, ScreenError> {
        if bars.is_empty() {
            return Err(ScreenError::invalid("series is empty"));
        }

        for (i, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() || bar.close <= 0.0 {
                return Err(ScreenError::invalid(format!(
                    "close {} at index {i} is not a positive finite number",
                    bar.close
                )));
            }
        }

        for (i, pair) in bars.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(ScreenError::invalid(format!(
                    "dates not strictly increasing: {} followed by {} at index {}",
                    pair[0].date,
                    pair[1].date,
                    i + 1
                )));
            }
        }

        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// The most recent bar. A `Series` is never empty.
    pub fn last(&self) -> &PriceBar {
        &self.bars[self.bars.len() - 1]
    }

    /// Closing prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Volumes as floats, oldest first, for moving-average arithmetic.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume as f64).collect()
    }
}

// =============================================================================
// ScreeningResult — one output record per instrument
// =============================================================================

/// The classification record for one instrument.
///
/// Price and MACD are rounded to 2 decimal places and RSI to 1 for display;
/// the breakout rule itself is evaluated on full-precision values before
/// rounding. Constructed once per classification and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningResult {
    pub ticker: String,
    pub close_price: f64,
    pub rsi: f64,
    pub macd: f64,
    pub volume: u64,
    pub is_breakout: bool,
}
