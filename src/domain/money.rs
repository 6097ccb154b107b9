use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// For BRL/USD, 1 unit = 100 cents, so 50.00 = 5000 cents.
pub type Cents = i64;

/// Format cents as a human-readable currency string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Parse a decimal string into cents.
/// Both `.` and `,` are accepted as the decimal separator.
/// Example: "50.00" -> 5000, "12,5" -> 1250, "100" -> 10000
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim().replace(',', ".");
    let negative = input.starts_with('-');
    let input = input.trim_start_matches('-');

    let parts: Vec<&str> = input.split('.').collect();
    if parts.iter().any(|p| !p.bytes().all(|b| b.is_ascii_digit())) {
        return Err(ParseCentsError::InvalidFormat);
    }

    let cents = match parts.as_slice() {
        [units] => parse_units(units)?
            .checked_mul(100)
            .ok_or(ParseCentsError::Overflow)?,
        [units, decimals] => {
            if units.is_empty() && decimals.is_empty() {
                return Err(ParseCentsError::InvalidFormat);
            }
            let units = if units.is_empty() { 0 } else { parse_units(units)? };

            // Pad or truncate the fraction to two digits
            let decimal_cents: i64 = match decimals.len() {
                0 => 0,
                1 => parse_units(decimals)? * 10,
                2 => parse_units(decimals)?,
                _ => parse_units(&decimals[..2])?,
            };

            units
                .checked_mul(100)
                .and_then(|c| c.checked_add(decimal_cents))
                .ok_or(ParseCentsError::Overflow)?
        }
        _ => return Err(ParseCentsError::InvalidFormat),
    };

    Ok(if negative { -cents } else { cents })
}

fn parse_units(digits: &str) -> Result<i64, ParseCentsError> {
    digits.parse().map_err(|_| ParseCentsError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::Overflow => write!(f, "amount too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
