// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD is the spread between a fast and a slow EMA of the closes:
//   MACD_t = EMA_fast(t) - EMA_slow(t)
//
// Both EMAs are seeded with the first close, so MACD is defined at every
// index and MACD_0 is exactly zero.

use super::ema::calculate_ema;

/// Compute the MACD series for `closes`, index-aligned to the input.
///
/// Returns an empty vec when either span is zero or the input is empty.
pub fn calculate_macd(closes: &[f64], fast_span: usize, slow_span: usize) -> Vec<f64> {
    let fast = calculate_ema(closes, fast_span);
    let slow = calculate_ema(closes, slow_span);
    if fast.is_empty() || slow.is_empty() {
        return Vec::new();
    }

    fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
}
