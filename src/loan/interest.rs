//! Interest accrual for v2 loan contracts
//!
//! Totals compound monthly at a fixed rate regardless of the rate stored on
//! the individual contract.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Fixed monthly rate applied to every v2 contract (1% per month)
pub const MONTHLY_INTEREST_RATE: Decimal = dec!(0.01);

/// Decimal places kept on the computed total
pub const TOTAL_SCALE: u32 = 2;

/// `(1 + rate)^periods`, or `None` if it overflows
pub fn compound_factor(rate: Decimal, periods: u32) -> Option<Decimal> {
    let step = Decimal::ONE.checked_add(rate)?;
    (0..periods).try_fold(Decimal::ONE, |factor, _| factor.checked_mul(step))
}

/// Total payable at the end of the contract.
///
/// Negative terms accrue nothing. Returns `None` when the amount is too
/// large to be represented after compounding.
pub fn total_payable(amount: Decimal, term_months: i32) -> Option<Decimal> {
    let periods = u32::try_from(term_months).unwrap_or(0);
    let factor = compound_factor(MONTHLY_INTEREST_RATE, periods)?;

    amount
        .checked_mul(factor)
        .map(|total| total.round_dp_with_strategy(TOTAL_SCALE, RoundingStrategy::MidpointAwayFromZero))
}
