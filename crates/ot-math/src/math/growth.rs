//! Period-over-period growth in whole percent.
//!
//! All arithmetic is exact (`i128`), so results are bit-identical across
//! platforms and runs.

/// Integer division rounding half away from zero. `den` must be positive.
pub fn div_round_half_away(num: i128, den: i128) -> i128 {
    debug_assert!(den > 0, "denominator must be positive");
    let q = num / den;
    let r = num % den;
    if 2 * r.abs() >= den {
        q + num.signum()
    } else {
        q
    }
}

/// Percent change from `previous` to `current`, rounded to a whole percent.
///
/// Returns:
/// - `Some(0)` when both counts are zero
/// - `None` when `previous` is zero and `current` is positive (no finite rate)
/// - `Some(rate)` otherwise, where `rate` has the sign of `current - previous`
///   and is zero only when the counts are equal
///
/// Differences too small to register as 1% are reported as ±1 so that a
/// change never reads as a plateau.
pub fn percent_change(current: u64, previous: u64) -> Option<i64> {
    if previous == 0 {
        return if current == 0 { Some(0) } else { None };
    }
    let diff = current as i128 - previous as i128;
    let mut rate = div_round_half_away(100 * diff, previous as i128);
    if rate == 0 && diff != 0 {
        rate = diff.signum();
    }
    Some(i64::try_from(rate).unwrap_or(i64::MAX))
}
