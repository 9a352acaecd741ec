// =============================================================================
// Exponential Moving Average (EMA) — span-weighted, seeded at the first close
// =============================================================================
//
// Formula:
//   alpha = 2 / (span + 1)
//   EMA_0 = close_0
//   EMA_t = close_t * alpha + EMA_{t-1} * (1 - alpha)
//
// The seed is the first observed close, NOT an SMA of the first `span`
// closes.  With this recurrence the EMA is defined at every index of the
// input — it has no warm-up region, unlike the windowed indicators.
// =============================================================================

/// Compute the EMA series for `closes` with the given `span`.
///
/// The output has exactly `closes.len()` entries, one per close, with
/// `out[0] == closes[0]`.
///
/// # Edge cases
/// - `span == 0` => empty vec (the weight would be undefined)
/// - empty input => empty vec
pub fn calculate_ema(closes: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || closes.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);

    let mut out = Vec::with_capacity(closes.len());
    let mut prev = closes[0];
    out.push(prev);

    for &close in &closes[1..] {
        let ema = close * alpha + prev * (1.0 - alpha);
        out.push(ema);
        prev = ema;
    }

    out
}
