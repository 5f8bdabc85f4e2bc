//! Typed interpretation of raw configuration strings.
//!
//! Every typed accessor on [`crate::ConfigProvider`] goes through
//! [`ConfigValue`]: the provider resolves a raw string, then asks the target
//! type to parse it. A `None` from [`ConfigValue::parse_value`] becomes
//! [`crate::Error::ValueMalformed`] carrying [`ConfigValue::TYPE`].
//!
//! # Parsing rules
//!
//! - `i32`/`i64`: decimal, optional sign, no surrounding whitespace
//! - `f64`: Rust float literal syntax (`1.5`, `-2e3`, `inf`, `NaN`)
//! - `bool`: `true` or `false`, ASCII case-insensitive
//! - [`Duration`]: integer plus optional unit (`us`, `ms`, `s`, `m`/`min`,
//!   `h`, `d`); bare numbers are seconds
//! - [`ByteSize`]: integer plus optional binary unit (`b`, `k`/`kb`,
//!   `m`/`mb`, `g`/`gb`, `t`/`tb`, `p`/`pb`); bare numbers are bytes
//!
//! Duration and byte strings are trimmed and matched case-insensitively;
//! the scalar types are not, so `" 42"` is not an int.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValueType;

/// A type that can be read from a raw configuration string.
pub trait ConfigValue: Sized {
    /// Reported in [`crate::Error::ValueMalformed`] when parsing fails.
    const TYPE: ValueType;

    /// Parses `raw`, returning `None` if it is not a valid literal.
    fn parse_value(raw: &str) -> Option<Self>;
}

impl ConfigValue for String {
    const TYPE: ValueType = ValueType::String;

    fn parse_value(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl ConfigValue for i32 {
    const TYPE: ValueType = ValueType::Int;

    fn parse_value(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl ConfigValue for i64 {
    const TYPE: ValueType = ValueType::Long;

    fn parse_value(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl ConfigValue for f64 {
    const TYPE: ValueType = ValueType::Double;

    fn parse_value(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl ConfigValue for bool {
    const TYPE: ValueType = ValueType::Boolean;

    fn parse_value(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl ConfigValue for Duration {
    const TYPE: ValueType = ValueType::Duration;

    fn parse_value(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        let (amount, unit) = split_amount(&normalized)?;
        match unit {
            "us" => Some(Self::from_micros(amount)),
            "ms" => Some(Self::from_millis(amount)),
            "" | "s" => Some(Self::from_secs(amount)),
            "m" | "min" => amount.checked_mul(60).map(Self::from_secs),
            "h" => amount.checked_mul(3_600).map(Self::from_secs),
            "d" => amount.checked_mul(86_400).map(Self::from_secs),
            _ => None,
        }
    }
}

/// A size in bytes, parsed from strings such as `32k` or `2m`.
///
/// # Examples
///
/// ```
/// use propconf::value::{ByteSize, ConfigValue};
///
/// assert_eq!(ByteSize::parse_value("2m"), Some(ByteSize(2 * 1024 * 1024)));
/// assert_eq!(ByteSize::parse_value("512"), Some(ByteSize(512)));
/// assert_eq!(ByteSize::parse_value("1.5g"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteSize(pub u64);

impl ByteSize {
    /// The size in bytes.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}b", self.0)
    }
}

impl ConfigValue for ByteSize {
    const TYPE: ValueType = ValueType::ByteSize;

    fn parse_value(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        let (amount, unit) = split_amount(&normalized)?;
        let shift = match unit {
            "" | "b" => 0,
            "k" | "kb" => 10,
            "m" | "mb" => 20,
            "g" | "gb" => 30,
            "t" | "tb" => 40,
            "p" | "pb" => 50,
            _ => return None,
        };
        amount.checked_mul(1u64 << shift).map(Self)
    }
}

/// Splits `"120s"` into `(120, "s")`. The amount must be a non-empty run of
/// ASCII digits that fits in a `u64`.
fn split_amount(s: &str) -> Option<(u64, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let (amount, unit) = s.split_at(digits);
    Some((amount.parse().ok()?, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_parsing() {
        assert_eq!(i32::parse_value("42"), Some(42));
        assert_eq!(i32::parse_value("-7"), Some(-7));
        assert_eq!(i32::parse_value("+7"), Some(7));
        assert_eq!(i32::parse_value("2147483648"), None);
        assert_eq!(i32::parse_value(" 42"), None);
        assert_eq!(i32::parse_value("4.2"), None);
        assert_eq!(i32::parse_value(""), None);
    }

    #[test]
    fn test_long_parsing() {
        assert_eq!(i64::parse_value("2147483648"), Some(2_147_483_648));
        assert_eq!(i64::parse_value("ten"), None);
    }

    #[test]
    fn test_double_parsing() {
        assert_eq!(f64::parse_value("1.5"), Some(1.5));
        assert_eq!(f64::parse_value("-2e3"), Some(-2000.0));
        assert_eq!(f64::parse_value("7"), Some(7.0));
        assert!(f64::parse_value("NaN").is_some_and(f64::is_nan));
        assert_eq!(f64::parse_value("one"), None);
    }

    #[test]
    fn test_bool_parsing() {
        assert_eq!(bool::parse_value("true"), Some(true));
        assert_eq!(bool::parse_value("FALSE"), Some(false));
        assert_eq!(bool::parse_value("True"), Some(true));
        assert_eq!(bool::parse_value("maybe"), None);
        assert_eq!(bool::parse_value("1"), None);
        assert_eq!(bool::parse_value(""), None);
    }

    #[test]
    fn test_duration_units() {
        assert_eq!(Duration::parse_value("120s"), Some(Duration::from_secs(120)));
        assert_eq!(Duration::parse_value("120"), Some(Duration::from_secs(120)));
        assert_eq!(Duration::parse_value("5ms"), Some(Duration::from_millis(5)));
        assert_eq!(Duration::parse_value("10us"), Some(Duration::from_micros(10)));
        assert_eq!(Duration::parse_value("2m"), Some(Duration::from_secs(120)));
        assert_eq!(Duration::parse_value("2min"), Some(Duration::from_secs(120)));
        assert_eq!(Duration::parse_value("1h"), Some(Duration::from_secs(3_600)));
        assert_eq!(Duration::parse_value("1d"), Some(Duration::from_secs(86_400)));
        assert_eq!(Duration::parse_value(" 30S "), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_duration_rejects() {
        assert_eq!(Duration::parse_value("-1s"), None);
        assert_eq!(Duration::parse_value("1.5s"), None);
        assert_eq!(Duration::parse_value("s"), None);
        assert_eq!(Duration::parse_value("10 parsecs"), None);
        assert_eq!(Duration::parse_value(""), None);
        assert_eq!(Duration::parse_value(&format!("{}d", u64::MAX)), None);
    }

    #[test]
    fn test_byte_size_units() {
        assert_eq!(ByteSize::parse_value("1b"), Some(ByteSize(1)));
        assert_eq!(ByteSize::parse_value("32k"), Some(ByteSize(32 * 1024)));
        assert_eq!(ByteSize::parse_value("32KB"), Some(ByteSize(32 * 1024)));
        assert_eq!(ByteSize::parse_value("2m"), Some(ByteSize(2 << 20)));
        assert_eq!(ByteSize::parse_value("1g"), Some(ByteSize(1 << 30)));
        assert_eq!(ByteSize::parse_value("1t"), Some(ByteSize(1 << 40)));
        assert_eq!(ByteSize::parse_value("1pb"), Some(ByteSize(1 << 50)));
    }

    #[test]
    fn test_byte_size_rejects() {
        assert_eq!(ByteSize::parse_value("2x"), None);
        assert_eq!(ByteSize::parse_value("-1k"), None);
        assert_eq!(ByteSize::parse_value("99999999p"), None);
    }

    #[test]
    fn test_byte_size_display_and_serde() {
        assert_eq!(ByteSize(2048).to_string(), "2048b");
        assert_eq!(ByteSize(2048).as_u64(), 2048);
        assert_eq!(serde_json::to_string(&ByteSize(7)).unwrap(), "7");
    }
}
