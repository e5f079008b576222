//! Exact-decimal monetary arithmetic
//!
//! All monetary values in the simulator are [`rust_decimal::Decimal`] (28-29
//! significant digits, base-10 fixed point). Nothing in this crate ever
//! promotes a monetary value to `f64`; the only float boundary is inside
//! [`crate::rng`] (gaussian draws) and [`crate::analytics`] (statistics),
//! both by design.
//!
//! CRITICAL: All money values are `Decimal`, never `f64`.

use rust_decimal::Decimal;

/// Money / rate / percentage — a thin alias so call sites read naturally.
pub type Money = Decimal;

/// Clamp a decimal to an inclusive range.
///
/// # Example
/// ```
/// use future_wallet_core::decimal::clamp;
/// use rust_decimal::Decimal;
///
/// let v = clamp(Decimal::from(900), Decimal::from(300), Decimal::from(850));
/// assert_eq!(v, Decimal::from(850));
/// ```
pub fn clamp(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Divide two decimals, returning `sentinel` instead of panicking on a zero
/// divisor. Division that does go through uses `Decimal`'s native
/// round-half-even behavior at its working scale.
pub fn safe_div(numerator: Decimal, denominator: Decimal, sentinel: Decimal) -> Decimal {
    if denominator.is_zero() {
        sentinel
    } else {
        numerator / denominator
    }
}

/// Project an `f64` (from a gaussian draw or noise factor) into `Decimal`,
/// the one narrow boundary where floats are allowed to cross into the
/// money type. Non-finite inputs (should not occur from a bounded RNG
/// draw) fall back to zero rather than panicking.
pub fn from_f64(v: f64) -> Decimal {
    Decimal::from_f64_retain(v).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn clamp_within_range_is_noop() {
        assert_eq!(clamp(dec!(700), dec!(300), dec!(850)), dec!(700));
    }

    #[test]
    fn clamp_below_min_floors() {
        assert_eq!(clamp(dec!(100), dec!(300), dec!(850)), dec!(300));
    }

    #[test]
    fn clamp_above_max_ceils() {
        assert_eq!(clamp(dec!(1000), dec!(300), dec!(850)), dec!(850));
    }

    #[test]
    fn safe_div_returns_sentinel_on_zero_denominator() {
        assert_eq!(safe_div(dec!(100), dec!(0), dec!(999)), dec!(999));
    }

    #[test]
    fn safe_div_divides_normally() {
        assert_eq!(safe_div(dec!(100), dec!(4), dec!(999)), dec!(25));
    }

    #[test]
    fn ten_thousand_penny_round_trips_leave_balance_exact() {
        let mut balance = dec!(10000);
        for _ in 0..10_000 {
            balance += dec!(0.01);
            balance -= dec!(0.01);
        }
        assert_eq!(balance, dec!(10000));
    }
}
