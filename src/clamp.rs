//! Guards applied before every division in the estimator.
//!
//! Each function maps degenerate input (zero, negative, NaN, infinite) onto a
//! safe value instead of failing, so callers never observe a panic or a
//! non-finite date.

/// Productivity rate used as a divisor. Non-positive rates become 1.
pub fn positive_rate(rate: f64) -> f64 {
    if rate.is_finite() && rate > 0.0 { rate } else { 1.0 }
}

/// Rounds a fractional day count up to whole team-days, never below 1.
pub fn at_least_one_day(days: f64) -> u32 {
    let days = days.ceil();
    if days.is_finite() && days >= 1.0 {
        // float-to-int casts saturate at u32::MAX
        days as u32
    } else {
        1
    }
}

/// Elapsed days used as a divisor. Zero or negative spans count as one day.
pub fn nonzero_days(days: f64) -> f64 {
    if days.is_finite() && days > 0.0 { days } else { 1.0 }
}

/// Fraction of `total` represented by `part`.
///
/// When the total is zero every one of the `count` parts receives an equal share.
pub fn share_of(part: f64, total: f64, count: usize) -> f64 {
    if total.is_finite() && total > 0.0 && part.is_finite() {
        (part / total).max(0.0)
    } else if count > 0 {
        1.0 / count as f64
    } else {
        0.0
    }
}
