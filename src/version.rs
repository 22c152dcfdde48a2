//! Cache-busting version tokens and the derivation rule that advances them

use std::fmt;

use chrono::Local;

/// A version token embedded after `?v=` on an asset reference: an 8-digit
/// date, optionally followed by a dash and a disambiguating suffix
/// (`20250813`, `20250813-2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionToken {
    date: String,
    suffix: Option<u32>,
}

impl VersionToken {
    /// Parse a raw token string. Returns `None` unless the input is exactly
    /// eight ASCII digits, optionally followed by `-<digits>`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (date, suffix) = match raw.split_once('-') {
            Some((date, suffix)) => (date, Some(suffix)),
            None => (raw, None),
        };

        if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let suffix = match suffix {
            Some(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                Some(s.parse().ok()?)
            }
            Some(_) => return None,
            None => None,
        };

        Some(Self {
            date: date.to_string(),
            suffix,
        })
    }

    /// The 8-digit date part
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The numeric suffix, if any
    pub fn suffix(&self) -> Option<u32> {
        self.suffix
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suffix {
            Some(n) => write!(f, "{}-{}", self.date, n),
            None => write!(f, "{}", self.date),
        }
    }
}

/// Today's date in local time as an 8-digit base date
pub fn today_token() -> String {
    Local::now().format("%Y%m%d").to_string()
}

/// Check that a user-supplied base date is exactly eight digits
pub fn is_valid_base_date(raw: &str) -> bool {
    raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit())
}

/// Derive the next version token for one asset reference.
///
/// - Absent or unparsable `existing` yields `base_date` unchanged.
/// - A different date part yields `base_date`: a new day resets numbering.
/// - The same date part with `force` set yields `base_date`, dropping any
///   suffix.
/// - Otherwise the suffix is incremented, with the first increment being
///   `-2`.
///
/// Pure and total: every input produces a defined output, so dry runs are
/// repeatable.
pub fn derive(existing: Option<&str>, base_date: &str, force: bool) -> String {
    let token = match existing.and_then(VersionToken::parse) {
        Some(token) => token,
        None => return base_date.to_string(),
    };

    if token.date() != base_date || force {
        return base_date.to_string();
    }

    let n = token.suffix().map_or(2, |s| s + 1);
    format!("{base_date}-{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let token = VersionToken::parse("20250813").unwrap();
        assert_eq!(token.date(), "20250813");
        assert_eq!(token.suffix(), None);
    }

    #[test]
    fn test_parse_with_suffix() {
        let token = VersionToken::parse("20250813-2").unwrap();
        assert_eq!(token.date(), "20250813");
        assert_eq!(token.suffix(), Some(2));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(VersionToken::parse("2025-01-01").is_none());
        assert!(VersionToken::parse("2025081").is_none());
        assert!(VersionToken::parse("202508130").is_none());
        assert!(VersionToken::parse("20250813-").is_none());
        assert!(VersionToken::parse("20250813-x").is_none());
        assert!(VersionToken::parse("").is_none());
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(VersionToken::parse("20250813").unwrap().to_string(), "20250813");
        assert_eq!(
            VersionToken::parse("20250813-7").unwrap().to_string(),
            "20250813-7"
        );
    }

    #[test]
    fn test_derive_absent_existing() {
        assert_eq!(derive(None, "20250101", false), "20250101");
        assert_eq!(derive(None, "20250101", true), "20250101");
    }

    #[test]
    fn test_derive_unparsable_existing() {
        assert_eq!(derive(Some("not-a-token"), "20250101", false), "20250101");
    }

    #[test]
    fn test_derive_different_day_resets() {
        assert_eq!(derive(Some("20241231-3"), "20250101", false), "20250101");
        assert_eq!(derive(Some("20241231-3"), "20250101", true), "20250101");
    }

    #[test]
    fn test_derive_same_day_first_increment() {
        assert_eq!(derive(Some("20250101"), "20250101", false), "20250101-2");
    }

    #[test]
    fn test_derive_same_day_suffix_increment() {
        assert_eq!(derive(Some("20250101-5"), "20250101", false), "20250101-6");
    }

    #[test]
    fn test_derive_force_drops_suffix() {
        assert_eq!(derive(Some("20250101-5"), "20250101", true), "20250101");
        assert_eq!(derive(Some("20250101"), "20250101", true), "20250101");
    }

    #[test]
    fn test_today_token_shape() {
        let token = today_token();
        assert!(is_valid_base_date(&token));
    }

    #[test]
    fn test_is_valid_base_date() {
        assert!(is_valid_base_date("20250101"));
        assert!(!is_valid_base_date("2025-01-01"));
        assert!(!is_valid_base_date("20250101 "));
        assert!(!is_valid_base_date(""));
    }
}
