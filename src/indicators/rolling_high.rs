// =============================================================================
// Trailing Maximum — rolling N-period high
// =============================================================================
//
// The 20-day high used by the breakout rule.  The window is inclusive of the
// current index, so wherever the value is defined it is >= the close at that
// index; the classifier compares against the PRIOR index's high for exactly
// that reason.

/// Compute the trailing maximum of `values` over `window` periods,
/// index-aligned to the input.
///
/// Entry `i` is `Some` once the window is full, i.e. from index
/// `window - 1` onward; earlier entries are `None`.
///
/// # Edge cases
/// - `window == 0` => all `None`
pub fn trailing_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    for i in (window - 1)..values.len() {
        let max = values[i + 1 - window..=i]
            .iter()
            .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        out[i] = Some(max);
    }

    out
}
