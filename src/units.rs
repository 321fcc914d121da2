//! USDC fixed-point conversion.
//!
//! The ledger stores amounts as integers scaled by 10^6. Conversion
//! to base units truncates: fractional input beyond 6 digits is
//! silently dropped, never rounded up. That boundary is accepted
//! behavior, not a bug.

use crate::constants::USDC_DECIMALS;

const BASE_UNITS_PER_WHOLE: u64 = 10u64.pow(USDC_DECIMALS as u32);

// A display value that is exactly N base units scales back to N with
// at most ~1e-15 relative drift from the two float roundings, while
// any genuine 7th fractional digit is at least ~1e-7 away. Anything
// inside this band is float noise, not user input. Keeps the
// display round trip exact for amounts up to 2^50 base units
// (~10^9 USDC); beyond that f64 cannot carry the value at all.
const EXACTNESS_TOLERANCE: f64 = 1e-9;

/// Base units to a human display value.
pub fn to_display(base_units: u64) -> f64 {
    base_units as f64 / BASE_UNITS_PER_WHOLE as f64
}

/// Display value to base units, truncating past 6 fractional digits.
/// Negative and non-finite inputs clamp to zero.
pub fn to_base_units(display: f64) -> u64 {
    if !display.is_finite() || display <= 0.0 {
        return 0;
    }
    let scaled = display * BASE_UNITS_PER_WHOLE as f64;
    let nearest = scaled.round();
    if nearest > 0.0 && (scaled - nearest).abs() <= nearest * EXACTNESS_TOLERANCE {
        nearest as u64
    } else {
        scaled.floor() as u64
    }
}
