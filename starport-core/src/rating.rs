//! Derived rating computation.

/// The fixed "current" year the rating formula ages ships against.
///
/// Matches the upper bound of the legal production year range, so the
/// divisor `CURRENT_YEAR - prod_year + 1` is always at least 1.
pub const CURRENT_YEAR: i32 = 3019;

/// Compute the rating for a ship from its speed, usage flag, and
/// production year.
///
/// `rating = round2(80 * speed * k / (CURRENT_YEAR - prod_year + 1))`
/// where `k` is 0.5 for a used ship and 1.0 otherwise.
pub fn compute_rating(speed: f64, is_used: bool, prod_year: i32) -> f64 {
    let wear = if is_used { 0.5 } else { 1.0 };
    let age = (CURRENT_YEAR - prod_year + 1) as f64;
    round2(80.0 * speed * wear / age)
}

/// Round half-up to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
