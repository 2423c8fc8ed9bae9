use rust_decimal::Decimal;
use stocky_core::ProductId;
use thiserror::Error;

/// Why a raw input line was rejected. The message doubles as the
/// re-prompt hint shown to the operator.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("enter a whole number")]
    NotAnInteger,
    #[error("enter a number such as 120.00")]
    NotANumber,
    #[error("the value must not be negative")]
    Negative,
    #[error("enter at least one unit")]
    NotPositive,
}

pub fn parse_id(raw: &str) -> Result<ProductId, InputError> {
    raw.trim().parse::<u64>().map(ProductId).map_err(|_| classify_integer_failure(raw))
}

/// Quantities and thresholds: whole numbers, zero allowed.
pub fn parse_quantity(raw: &str) -> Result<u32, InputError> {
    raw.trim().parse::<u32>().map_err(|_| classify_integer_failure(raw))
}

/// Stock movements: whole numbers, at least one unit.
pub fn parse_movement_amount(raw: &str) -> Result<u32, InputError> {
    let amount = parse_quantity(raw)?;
    if amount == 0 {
        return Err(InputError::NotPositive);
    }
    Ok(amount)
}

/// Prices: decimal numbers, zero allowed.
pub fn parse_price(raw: &str) -> Result<Decimal, InputError> {
    let value = raw.trim().parse::<Decimal>().map_err(|_| InputError::NotANumber)?;
    if value.is_sign_negative() {
        return Err(InputError::Negative);
    }
    Ok(value)
}

/// Blank keeps the stored value during an edit.
pub fn parse_optional_quantity(raw: &str) -> Result<Option<u32>, InputError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_quantity(raw).map(Some)
}

pub fn parse_optional_price(raw: &str) -> Result<Option<Decimal>, InputError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_price(raw).map(Some)
}

fn classify_integer_failure(raw: &str) -> InputError {
    match raw.trim().parse::<i64>() {
        Ok(value) if value < 0 => InputError::Negative,
        _ => InputError::NotAnInteger,
    }
}
