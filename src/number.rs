//! Classifying and parsing numeric literals.
//!
//! A token is a number if it is an optional-sign run of decimal digits, or
//! `0x`/`0X` followed by hex digits. Out-of-range values saturate to the
//! 16-bit signed bounds rather than failing — a deliberate compromise for a
//! constrained target (see design notes on saturating parse).

pub fn parse_number(token: &str) -> Option<i16> {
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return i64::from_str_radix(hex, 16).ok().map(saturate);
    }

    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse::<i64>().ok().map(saturate)
}

fn saturate(v: i64) -> i16 {
    v.clamp(i16::MIN as i64, i16::MAX as i64) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_decimal() {
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number("-17"), Some(-17));
    }

    #[test]
    fn hex_literal() {
        assert_eq!(parse_number("0x1F"), Some(31));
        assert_eq!(parse_number("0X10"), Some(16));
    }

    #[test]
    fn positive_overflow_saturates() {
        assert_eq!(parse_number("100000"), Some(i16::MAX));
    }

    #[test]
    fn negative_overflow_saturates() {
        assert_eq!(parse_number("-100000"), Some(i16::MIN));
    }

    #[test]
    fn non_numeric_token_is_not_a_number() {
        assert_eq!(parse_number("DUP"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("0x"), None);
        assert_eq!(parse_number("12x"), None);
    }
}
