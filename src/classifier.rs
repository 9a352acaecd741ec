// =============================================================================
// Breakout Classifier — strict-AND decision rule
// =============================================================================
//
// Consumes one series together with its indicator frame and produces a
// single ScreeningResult.  An instrument is a breakout when, at the final
// bar, all four conditions hold simultaneously:
//
//   1. close is strictly above the PRIOR period's 20-day high
//   2. volume is strictly above its 10-day average
//   3. RSI is strictly inside (50, 70) — bullish but not overbought
//   4. MACD is strictly positive
//
// There is no partial or weighted scoring.  The rule evaluates on
// full-precision values; rounding happens only when the result record is
// built.

use tracing::debug;

use crate::indicators::IndicatorFrame;
use crate::types::{ScreenError, ScreeningResult, Series};

/// RSI must be strictly above this bound.
pub const RSI_BAND_LOWER: f64 = 50.0;
/// RSI must be strictly below this bound (at 70 the instrument counts as
/// overbought and does not qualify).
pub const RSI_BAND_UPPER: f64 = 70.0;

/// Classify one instrument from its series and indicator frame.
///
/// Requires at least two bars, and defined values for `rsi` and
/// `volume_sma` at the last index and `high20` at the index before it.
/// The comparison deliberately uses the prior period's rolling high:
/// `high20` at the final index already contains the final close, so
/// comparing against it could never detect anything.
///
/// # Errors
/// - `ScreenError::InsufficientData` when the series is too short or a
///   required trailing indicator is still missing.
/// - `ScreenError::InvalidSeries` when the frame was not computed from this
///   series (length mismatch).
pub fn classify(
    ticker: &str,
    series: &Series,
    frame: &IndicatorFrame,
) -> Result<ScreeningResult, ScreenError> {
    if frame.len() != series.len() {
        return Err(ScreenError::invalid(format!(
            "indicator frame length {} does not match series length {}",
            frame.len(),
            series.len()
        )));
    }

    let insufficient = || ScreenError::InsufficientData {
        ticker: ticker.to_string(),
        len: series.len(),
    };

    let n = series.len() - 1;
    if n < 1 {
        return Err(insufficient());
    }

    let last_rsi = frame.rsi[n].ok_or_else(insufficient)?;
    let last_volume_sma = frame.volume_sma[n].ok_or_else(insufficient)?;
    let prior_high20 = frame.high20[n - 1].ok_or_else(insufficient)?;
    let last_macd = frame.macd[n];

    let last = series.last();
    let last_close = last.close;
    let last_volume = last.volume;

    let is_breakout = last_close > prior_high20
        && (last_volume as f64) > last_volume_sma
        && RSI_BAND_LOWER < last_rsi
        && last_rsi < RSI_BAND_UPPER
        && last_macd > 0.0;

    debug!(
        ticker,
        last_close,
        prior_high20,
        last_volume,
        last_volume_sma,
        last_rsi,
        last_macd,
        is_breakout,
        "breakout rule evaluated"
    );

    Ok(ScreeningResult {
        ticker: ticker.to_string(),
        close_price: round_to(last_close, 2),
        rsi: round_to(last_rsi, 1),
        macd: round_to(last_macd, 2),
        volume: last_volume,
        is_breakout,
    })
}

/// Round half-away-from-zero to `decimals` places. Display only — never fed
/// back into the rule above.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
