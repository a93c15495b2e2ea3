//! Conversion of store decimals into JSON numbers.
//!
//! The table hands numbers back as decimal text. A value with no fractional
//! part becomes a JSON integer, anything else a JSON float.

use serde_json::Number;
use thiserror::Error;

/// Integral values with more significant digits than this cannot fit in 64 bits.
const MAX_INTEGER_DIGITS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberFormatError {
    #[error("'{0}' is not a decimal number")]
    Malformed(String),
    #[error("'{0}' is not representable as a finite JSON number")]
    NonFinite(String),
}

pub fn normalize_decimal(text: &str) -> Result<Number, NumberFormatError> {
    let decimal = ParsedDecimal::parse(text.trim())
        .ok_or_else(|| NumberFormatError::Malformed(text.to_string()))?;

    if decimal.is_zero() {
        return Ok(Number::from(0));
    }

    if decimal.is_integral() {
        if let Some(number) = decimal.to_integer() {
            return Ok(number);
        }
    }

    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| NumberFormatError::Malformed(text.to_string()))?;
    Number::from_f64(value).ok_or_else(|| NumberFormatError::NonFinite(text.to_string()))
}

#[derive(Debug)]
struct ParsedDecimal<'a> {
    negative: bool,
    int_digits: &'a str,
    frac_digits: &'a str,
    exponent: i64,
}

impl<'a> ParsedDecimal<'a> {
    fn parse(text: &'a str) -> Option<Self> {
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(index) => (&unsigned[..index], unsigned[index + 1..].parse::<i64>().ok()?),
            None => (unsigned, 0),
        };

        let (int_digits, frac_digits) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if (int_digits.is_empty() && frac_digits.is_empty())
            || !all_digits(int_digits)
            || !all_digits(frac_digits)
        {
            return None;
        }

        Some(Self {
            negative,
            int_digits,
            frac_digits,
            exponent,
        })
    }

    fn digits(&self) -> impl Iterator<Item = u8> + '_ {
        self.int_digits.bytes().chain(self.frac_digits.bytes())
    }

    fn is_zero(&self) -> bool {
        self.digits().all(|digit| digit == b'0')
    }

    /// Position of the decimal point inside `digits()` once the exponent is applied.
    fn point(&self) -> i64 {
        (self.int_digits.len() as i64).saturating_add(self.exponent)
    }

    fn is_integral(&self) -> bool {
        let point = self.point();
        self.digits()
            .enumerate()
            .all(|(index, digit)| (index as i64) < point || digit == b'0')
    }

    /// Builds the integer value, or `None` when it does not fit in 64 bits.
    fn to_integer(&self) -> Option<Number> {
        let point = self.point();
        let total = self.int_digits.len() + self.frac_digits.len();
        let kept = usize::try_from(point).ok()?.min(total);
        let padding = usize::try_from(point).ok()? - kept;

        let significant: String = self
            .digits()
            .take(kept)
            .map(char::from)
            .skip_while(|digit| *digit == '0')
            .collect();
        if significant.len().saturating_add(padding) > MAX_INTEGER_DIGITS {
            return None;
        }

        let magnitude = format!("{significant}{}", "0".repeat(padding));
        if self.negative {
            format!("-{magnitude}").parse::<i64>().ok().map(Number::from)
        } else {
            magnitude.parse::<u64>().ok().map(Number::from)
        }
    }
}
