use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A catalog record as persisted in the products table.
///
/// `price` keeps exact decimal precision; it is rendered as a JSON float only
/// when the record crosses the response serialization boundary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "price_float::serialize")]
    pub price: Decimal,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A validated create request, before identity and timestamps are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
}

impl NewProduct {
    pub fn into_product(self, product_id: impl Into<String>, timestamp: &str) -> Product {
        Product {
            product_id: product_id.into(),
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }
}

/// Renders a decimal as the nearest `f64` by way of its exact decimal text.
mod price_float {
    use rust_decimal::Decimal;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let value = price
            .to_string()
            .parse::<f64>()
            .map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_f64(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    #[error("'{0}' is not a valid number")]
    NotANumber(String),
    #[error("'{0}' exceeds the largest supported value")]
    OutOfRange(String),
    #[error("'{0}' has more than 28 significant decimal places")]
    TooPrecise(String),
}

/// Parses a decimal literal, accepting plain (`19.99`) and scientific
/// (`1.5e3`) notation. Surrounding whitespace is ignored.
///
/// Input is never rounded: a literal whose significant digits cannot all be
/// held within 28 decimal places is rejected.
pub fn parse_decimal(text: &str) -> Result<Decimal, DecimalError> {
    let trimmed = text.trim();
    let (mantissa, exponent) = match trimmed.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (trimmed, None),
    };

    let Some((integer_digits, fraction_digits)) = literal_digits(mantissa) else {
        return Err(DecimalError::NotANumber(trimmed.to_string()));
    };
    let exponent = match exponent {
        None => 0,
        Some(raw) => match raw.parse::<i64>() {
            Ok(value) => value,
            Err(_) if literal_digits(raw).is_some_and(|(_, fraction)| fraction.is_empty()) => {
                return Err(DecimalError::OutOfRange(trimmed.to_string()));
            }
            Err(_) => return Err(DecimalError::NotANumber(trimmed.to_string())),
        },
    };

    let digits = format!("{integer_digits}{fraction_digits}");
    let significant = digits.trim_start_matches('0').trim_end_matches('0');
    if significant.is_empty() {
        return Ok(Decimal::ZERO);
    }

    // Digits before the point, and the power of ten of the last significant digit.
    let leading_zeros = (digits.len() - digits.trim_start_matches('0').len()) as i64;
    let point = integer_digits.len() as i64;
    let whole_digits = point.saturating_sub(leading_zeros).saturating_add(exponent);
    let last_power = whole_digits.saturating_sub(significant.len() as i64);

    if whole_digits > 29 {
        return Err(DecimalError::OutOfRange(trimmed.to_string()));
    }
    if last_power < -28 {
        return Err(DecimalError::TooPrecise(trimmed.to_string()));
    }

    let mut plain = String::new();
    if mantissa.starts_with('-') {
        plain.push('-');
    }
    if last_power >= 0 {
        plain.push_str(significant);
        plain.push_str(&"0".repeat(last_power as usize));
    } else if whole_digits > 0 {
        let (whole, fraction) = significant.split_at(whole_digits as usize);
        plain.push_str(whole);
        plain.push('.');
        plain.push_str(fraction);
    } else {
        plain.push_str("0.");
        plain.push_str(&"0".repeat(whole_digits.unsigned_abs() as usize));
        plain.push_str(significant);
    }

    let value =
        Decimal::from_str(&plain).map_err(|_| DecimalError::OutOfRange(trimmed.to_string()))?;
    if -last_power > i64::from(value.normalize().scale()) {
        return Err(DecimalError::TooPrecise(trimmed.to_string()));
    }

    Ok(value)
}

/// Splits an optionally signed `digits[.digits]` literal into its integer and
/// fraction digits.
fn literal_digits(literal: &str) -> Option<(&str, &str)> {
    let unsigned = literal.strip_prefix(['+', '-']).unwrap_or(literal);
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());

    if (integer.is_empty() && fraction.is_empty()) || !all_digits(integer) || !all_digits(fraction)
    {
        return None;
    }
    Some((integer, fraction))
}
