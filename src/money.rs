//! Conversions between [`Decimal`] amounts and the integer cents stored in
//! the database.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{AppError, AppResult};

/// Convert a non-negative amount with at most two fractional digits to cents.
pub fn to_cents(amount: Decimal) -> AppResult<i64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::InvalidInput(format!(
            "Price must not be negative, got {amount}"
        )));
    }
    let scaled = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| AppError::InvalidInput(format!("Price {amount} is out of range")))?;
    if !scaled.fract().is_zero() {
        return Err(AppError::InvalidInput(format!(
            "Price must have at most two decimal places, got {amount}"
        )));
    }
    scaled
        .to_i64()
        .ok_or_else(|| AppError::InvalidInput(format!("Price {amount} is out of range")))
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Two-decimal display form, e.g. `50.00`.
pub fn format_cents(cents: i64) -> String {
    format!("{:.2}", from_cents(cents))
}

/// `quantity × unit price`, rejecting overflow instead of wrapping.
pub fn line_total(unit_cents: i64, quantity: i32) -> AppResult<i64> {
    unit_cents
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| AppError::InvalidInput("Line total is out of range".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn converts_whole_and_fractional_amounts() {
        assert_eq!(to_cents(dec!(10)).unwrap(), 1000);
        assert_eq!(to_cents(dec!(10.5)).unwrap(), 1050);
        assert_eq!(to_cents(dec!(0.01)).unwrap(), 1);
        assert_eq!(to_cents(dec!(0)).unwrap(), 0);
        assert_eq!(to_cents(dec!(12.30000)).unwrap(), 1230);
    }

    #[test]
    fn rejects_sub_cent_and_negative_amounts() {
        assert!(matches!(to_cents(dec!(1.005)), Err(AppError::InvalidInput(_))));
        assert!(matches!(to_cents(dec!(-3.00)), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn rejects_amounts_too_large_to_scale() {
        assert!(matches!(to_cents(Decimal::MAX), Err(AppError::InvalidInput(_))));
        assert!(matches!(
            to_cents(dec!(100000000000000000)),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(7), "0.07");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(from_cents(1999), dec!(19.99));
    }

    #[test]
    fn line_total_detects_overflow() {
        assert_eq!(line_total(250, 4).unwrap(), 1000);
        assert!(line_total(i64::MAX, 2).is_err());
    }
}
