//! Money conversions between service amounts and stored columns.
//!
//! Services take and return [`Decimal`] amounts at two fraction digits. Money
//! columns hold the same value as an integer count of minor units (kobo), so a
//! stored amount reads back exactly as it was written.

use crate::errors::{Error, Result};
use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Fraction digits kept on money amounts
pub const MONEY_SCALE: u32 = 2;

const MINOR_UNITS_PER_MAJOR: Decimal = Decimal::ONE_HUNDRED;

/// Converts an amount to the minor units stored in money columns.
///
/// # Errors
/// [`Error::InvalidAmount`] when the amount has more than two fraction digits
/// or does not fit in a column.
pub fn to_minor_units(amount: Decimal) -> Result<i64> {
    if amount.round_dp(MONEY_SCALE) != amount {
        return Err(Error::InvalidAmount { amount });
    }

    amount
        .checked_mul(MINOR_UNITS_PER_MAJOR)
        .and_then(|minor| minor.to_i64())
        .ok_or(Error::InvalidAmount { amount })
}

/// Reads a stored minor-unit value back as an amount.
#[must_use]
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, MONEY_SCALE)
}

/// [`to_minor_units`] for nullable columns.
pub fn to_optional_minor_units(amount: Option<Decimal>) -> Result<Option<i64>> {
    amount.map(to_minor_units).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_large_amount_is_stored_exactly() -> Result<()> {
        let amount = dec!(123456789012345.67);
        let minor = to_minor_units(amount)?;
        assert_eq!(minor, 12_345_678_901_234_567);
        assert_eq!(from_minor_units(minor), amount);
        Ok(())
    }

    #[test]
    fn test_fewer_fraction_digits_are_accepted() -> Result<()> {
        assert_eq!(to_minor_units(dec!(5))?, 500);
        assert_eq!(to_minor_units(dec!(0.1))?, 10);
        assert_eq!(to_minor_units(dec!(-12.30))?, -1230);
        assert_eq!(to_minor_units(dec!(7.500))?, 750);
        Ok(())
    }

    #[test]
    fn test_sub_minor_unit_amount_rejected() {
        assert!(matches!(
            to_minor_units(dec!(1.005)),
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_amount_beyond_column_range_rejected() {
        let too_big = Decimal::from(i64::MAX);
        assert!(matches!(
            to_minor_units(too_big),
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_optional_amounts() -> Result<()> {
        assert_eq!(to_optional_minor_units(None)?, None);
        assert_eq!(to_optional_minor_units(Some(dec!(2.50)))?, Some(250));
        Ok(())
    }
}
