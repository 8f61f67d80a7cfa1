//! Percentage arithmetic shared by budgets and reports.
//!
//! Ratios are rounded half away from zero to 4 places before scaling.
//! Reported percentages are rounded to 1 place with ties going towards
//! positive infinity, so -12.25 reports as -12.2.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on a ratio before it is scaled to a percentage.
pub const RATIO_SCALE: u32 = 4;

/// Decimal places kept on a reported percentage.
pub const PERCENT_SCALE: u32 = 1;

/// Rounds half away from zero.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `part / whole` as a percentage with a 4-place ratio, or zero when
/// `whole` is zero.
#[must_use]
pub fn ratio_percent(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .map_or(Decimal::ZERO, |ratio| round_half_up(ratio, RATIO_SCALE))
        * Decimal::ONE_HUNDRED
}

/// Rounds ties towards positive infinity.
#[must_use]
pub fn round_half_ceiling(value: Decimal, dp: u32) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(dp, strategy)
}

/// Rounds a percentage for display.
#[must_use]
pub fn display_percent(percent: Decimal) -> Decimal {
    round_half_ceiling(percent, PERCENT_SCALE)
}
