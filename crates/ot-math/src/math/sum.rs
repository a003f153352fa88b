//! Overflow-free summation of signed daily counts.

/// Sum signed values and clamp the result into `[0, u64::MAX]`.
///
/// Accumulates in `i128` so that long windows of large values cannot wrap.
/// A negative raw sum (net downward revision) clamps to 0.
pub fn clamped_sum(values: &[i64]) -> u64 {
    let raw: i128 = values.iter().map(|v| *v as i128).sum();
    clamp_to_count(raw)
}

/// Clamp a signed aggregate into a non-negative count.
pub fn clamp_to_count(raw: i128) -> u64 {
    if raw <= 0 {
        0
    } else {
        u64::try_from(raw).unwrap_or(u64::MAX)
    }
}

/// Saturating sum of non-negative counts.
pub fn saturating_total<I>(counts: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    counts.into_iter().fold(0u64, |acc, c| acc.saturating_add(c))
}
