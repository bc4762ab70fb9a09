// ============================================================================
// Minor-Unit Arithmetic
// ============================================================================
//
// Amounts are integer minor units. Every rounding in the checkout path is
// round-half-away-from-zero on exact integers; no floating point.
//
// ============================================================================

/// Integer division rounding half away from zero. `denominator` must be non-zero.
pub fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;

    if remainder.abs() * 2 >= denominator.abs() {
        if (numerator < 0) != (denominator < 0) {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

/// `amount * (100 - percent) / 100`, percent already clamped to [0, 100]
pub fn apply_discount(amount_minor: i64, percent: u8) -> i64 {
    let percent = percent.min(100) as i128;
    let discounted = div_round_half_away(amount_minor as i128 * (100 - percent), 100);
    // |discounted| <= |amount_minor|, so this always fits
    discounted as i64
}
