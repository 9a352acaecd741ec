// =============================================================================
// Relative Strength Index (RSI) — simple-average variant
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes.
//
// Step 1 — Compute price deltas from consecutive closes (undefined at i=0).
// Step 2 — Split each delta into gain = max(delta, 0), loss = max(-delta, 0).
// Step 3 — Average gain and loss over a trailing window of `period` deltas
//          (a plain simple average, recomputed per index — not Wilder's
//          recursive smoothing).
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// A window with no losses has RSI 100 by definition; a window with no
// movement at all has no RSI (the ratio is 0/0, and a NaN that compares
// false everywhere is not an acceptable stand-in).
// =============================================================================

/// Compute the RSI series for `closes`, index-aligned to the input.
///
/// The output has exactly `closes.len()` entries.  Entry `i` is `Some` once
/// `period` deltas are available, i.e. from index `period` onward.
///
/// # Edge cases
/// - `period == 0` => all `None`
/// - `avg_loss == 0`, `avg_gain > 0` => RSI is exactly 100.0 (no infinity)
/// - `avg_loss == 0`, `avg_gain == 0` => `None` (flat window, undefined)
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return out;
    }

    for i in period..closes.len() {
        let mut sum_gain = 0.0;
        let mut sum_loss = 0.0;
        // The `period` deltas ending at index i.
        for j in (i - period + 1)..=i {
            let delta = closes[j] - closes[j - 1];
            if delta > 0.0 {
                sum_gain += delta;
            } else {
                sum_loss += -delta;
            }
        }

        let period_f = period as f64;
        out[i] = rsi_from_averages(sum_gain / period_f, sum_loss / period_f);
    }

    out
}

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// Returns `None` when both averages are zero: a flat window has no
/// directional movement and no defined RSI.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            None
        } else {
            Some(100.0)
        }
    } else {
        let rs = avg_gain / avg_loss;
        Some(100.0 - 100.0 / (1.0 + rs))
    }
}
