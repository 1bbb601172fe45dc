//! Exponentially weighted moving average helpers.
//!
//! Recursion seeded from the first observation (no warm-up):
//! y[0] = x[0], y[i] = x[i]*alpha + y[i-1]*(1-alpha).
//! Span form uses alpha = 2/(span+1).

/// EWMA over `values` with smoothing factor `alpha`.
///
/// Returns an empty vector for empty input; callers gate on series length.
pub fn ewma(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev = match values.first() {
        Some(&v) => v,
        None => return out,
    };
    out.push(prev);
    for &v in &values[1..] {
        prev = v * alpha + prev * (1.0 - alpha);
        out.push(prev);
    }
    out
}

/// EWMA with alpha derived from a span: alpha = 2/(span+1).
pub fn ewma_span(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    ewma(values, alpha)
}
