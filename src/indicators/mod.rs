// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators the screener
// evaluates.  Each function maps a price/volume slice to an index-aligned
// output the same length as its input, with `None` marking indices where the
// look-back window is not yet full, so callers never have to re-align series.

pub mod ema;
pub mod macd;
pub mod rolling_high;
pub mod rsi;
pub mod sma;

use crate::types::Series;

/// RSI look-back, in deltas.
pub const RSI_PERIOD: usize = 14;
/// MACD fast EMA span.
pub const MACD_FAST_SPAN: usize = 12;
/// MACD slow EMA span.
pub const MACD_SLOW_SPAN: usize = 26;
/// Volume simple-moving-average window.
pub const VOLUME_SMA_PERIOD: usize = 10;
/// Rolling price-high window.
pub const HIGH_WINDOW: usize = 20;

// =============================================================================
// IndicatorFrame
// =============================================================================

/// Index-aligned indicator columns for one series.
///
/// Every column has exactly the length of the input series. RSI, volume SMA
/// and the rolling high carry `None` through their warm-up regions; MACD is
/// `Vec<f64>` because both of its EMAs are seeded with the first close and
/// therefore have a value at every index — there is no warm-up cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<f64>,
    pub volume_sma: Vec<Option<f64>>,
    pub high20: Vec<Option<f64>>,
}

impl IndicatorFrame {
    /// Column length. All four columns are the same length by construction.
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// Compute all screener indicators for `series`.
///
/// Never fails: a series shorter than the look-back windows simply yields
/// `None` at the indices where an indicator is not yet defined.  The
/// classifier decides whether missing trailing values block classification.
pub fn compute_indicators(series: &Series) -> IndicatorFrame {
    let closes = series.closes();
    let volumes = series.volumes();

    IndicatorFrame {
        rsi: rsi::calculate_rsi(&closes, RSI_PERIOD),
        macd: macd::calculate_macd(&closes, MACD_FAST_SPAN, MACD_SLOW_SPAN),
        volume_sma: sma::trailing_sma(&volumes, VOLUME_SMA_PERIOD),
        high20: rolling_high::trailing_max(&closes, HIGH_WINDOW),
    }
}
