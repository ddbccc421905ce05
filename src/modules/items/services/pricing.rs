use rust_decimal::Decimal;

use crate::core::{AppError, Result};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// `price × quantity`
pub fn total_value(price: Decimal, quantity: i64) -> Result<Decimal> {
    if price < Decimal::ZERO {
        return Err(AppError::validation("Price must not be negative"));
    }
    if quantity < 0 {
        return Err(AppError::validation("Quantity must not be negative"));
    }

    price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| AppError::validation("Total value is out of range"))
}

/// `price − price × percentage / 100`, rounded to cents.
/// `percentage` must lie in `0..=100`.
pub fn discounted_price(price: Decimal, percentage: Decimal) -> Result<Decimal> {
    if price < Decimal::ZERO {
        return Err(AppError::validation("Price must not be negative"));
    }
    if percentage < Decimal::ZERO || percentage > HUNDRED {
        return Err(AppError::validation(
            "Discount percentage must be between 0 and 100",
        ));
    }

    let discount = price
        .checked_mul(percentage)
        .and_then(|d| d.checked_div(HUNDRED))
        .ok_or_else(|| AppError::validation("Discount is out of range"))?;

    Ok((price - discount).round_dp(2))
}
