//! Validated list configuration.
//!
//! `ListSection` mirrors the `[list]` table exactly as written in the file
//! (loosely typed, so a stray `item_height = 1.5` or `item_height = "two"`
//! still parses and is reported as a `ConfigError`). Conversion into
//! `ListConfig` performs validation; after that point every value is known to
//! be usable by the capacity resolver and no further checks happen downstream.
//!
//! Invariants after a successful conversion:
//! * `item_height >= 1` (enforced by `ItemHeight`).
//! * `HeightMode::Fixed(n)` has `n >= 1`.

use serde::Deserialize;
use std::fmt;
use std::num::NonZeroUsize;
use thiserror::Error;

pub const DEFAULT_HEIGHT: u16 = 10;
pub const DEFAULT_ITEM_HEIGHT: usize = 1;
pub const DEFAULT_OVERFLOW_INDICATOR_THRESHOLD: usize = 1;

/// Configuration errors. These are programmer / file-author mistakes, never
/// runtime data conditions, so they surface before any viewport computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("item_height must be a positive integer, got: {value}")]
    InvalidItemHeight { value: String },
    #[error("height must be a row count of at least 1 or \"fill\", got: {value}")]
    InvalidHeight { value: String },
}

/// Rows consumed by a single item. Always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemHeight(NonZeroUsize);

impl ItemHeight {
    pub const ONE: ItemHeight = ItemHeight(NonZeroUsize::MIN);

    pub fn new(rows: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(rows)
            .map(ItemHeight)
            .ok_or_else(|| ConfigError::InvalidItemHeight {
                value: rows.to_string(),
            })
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for ItemHeight {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for ItemHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for ItemHeight {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for ItemHeight {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(ItemHeight)
            .ok_or_else(|| ConfigError::InvalidItemHeight {
                value: value.to_string(),
            })
    }
}

impl TryFrom<f64> for ItemHeight {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        validate_item_height(value)
    }
}

impl std::str::FromStr for ItemHeight {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return ItemHeight::try_from(n);
        }
        match trimmed.parse::<f64>() {
            Ok(f) => validate_item_height(f),
            Err(_) => Err(ConfigError::InvalidItemHeight {
                value: trimmed.to_string(),
            }),
        }
    }
}

/// Validate a raw numeric item height (integers arrive here as whole floats).
///
/// Fails for zero, negatives, fractions, NaN and infinities.
pub fn validate_item_height(value: f64) -> Result<ItemHeight, ConfigError> {
    let invalid = || ConfigError::InvalidItemHeight {
        value: value.to_string(),
    };
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > usize::MAX as f64 {
        return Err(invalid());
    }
    ItemHeight::new(value as usize).map_err(|_| invalid())
}

/// How many rows the list may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightMode {
    /// Exactly this many rows (indicators included).
    Fixed(u16),
    /// All environment rows minus `reserved_lines`.
    Fill,
}

impl Default for HeightMode {
    fn default() -> Self {
        HeightMode::Fixed(DEFAULT_HEIGHT)
    }
}

impl std::str::FromStr for HeightMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("fill") || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(HeightMode::Fill);
        }
        match trimmed.parse::<u16>() {
            Ok(n) if n >= 1 => Ok(HeightMode::Fixed(n)),
            _ => Err(ConfigError::InvalidHeight {
                value: trimmed.to_string(),
            }),
        }
    }
}

/// `height` as written in the file: a row count or a keyword.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawHeight {
    Rows(i64),
    Keyword(String),
    /// Any other TOML value; always rejected.
    Other(toml::Value),
}

impl TryFrom<&RawHeight> for HeightMode {
    type Error = ConfigError;

    fn try_from(raw: &RawHeight) -> Result<Self, Self::Error> {
        match raw {
            RawHeight::Rows(n) => u16::try_from(*n)
                .ok()
                .filter(|n| *n >= 1)
                .map(HeightMode::Fixed)
                .ok_or_else(|| ConfigError::InvalidHeight {
                    value: n.to_string(),
                }),
            RawHeight::Keyword(word) => word.parse(),
            RawHeight::Other(value) => Err(ConfigError::InvalidHeight {
                value: value.to_string(),
            }),
        }
    }
}

/// A number as written in the file; TOML distinguishes `1` from `1.0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Float(f64),
    /// Strings, booleans, arrays, tables, datetimes.
    Other(toml::Value),
}

impl TryFrom<&RawNumber> for ItemHeight {
    type Error = ConfigError;

    fn try_from(raw: &RawNumber) -> Result<Self, Self::Error> {
        match raw {
            RawNumber::Int(n) => ItemHeight::try_from(*n),
            RawNumber::Float(f) => ItemHeight::try_from(*f),
            RawNumber::Other(value) => Err(ConfigError::InvalidItemHeight {
                value: value.to_string(),
            }),
        }
    }
}

/// `[list]` table. Every field is optional; absent values take the defaults.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ListSection {
    #[serde(default)]
    pub height: Option<RawHeight>,
    #[serde(default)]
    pub reserved_lines: Option<u16>,
    #[serde(default)]
    pub item_height: Option<RawNumber>,
    #[serde(default)]
    pub show_overflow_indicators: Option<bool>,
    #[serde(default)]
    pub overflow_indicator_threshold: Option<usize>,
}

/// Effective list configuration with explicit defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    pub height: HeightMode,
    /// Only consulted in `HeightMode::Fill`.
    pub reserved_lines: u16,
    pub item_height: ItemHeight,
    pub show_overflow_indicators: bool,
    /// Accepted for compatibility; indicators show whenever their count is > 0.
    pub overflow_indicator_threshold: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            height: HeightMode::default(),
            reserved_lines: 0,
            item_height: ItemHeight::default(),
            show_overflow_indicators: true,
            overflow_indicator_threshold: DEFAULT_OVERFLOW_INDICATOR_THRESHOLD,
        }
    }
}

impl ListConfig {
    pub fn with_height(mut self, height: HeightMode) -> Self {
        self.height = height;
        self
    }

    pub fn with_reserved_lines(mut self, reserved_lines: u16) -> Self {
        self.reserved_lines = reserved_lines;
        self
    }

    pub fn with_item_height(mut self, item_height: ItemHeight) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_overflow_indicators(mut self, show: bool) -> Self {
        self.show_overflow_indicators = show;
        self
    }
}

impl TryFrom<&ListSection> for ListConfig {
    type Error = ConfigError;

    fn try_from(section: &ListSection) -> Result<Self, Self::Error> {
        let defaults = ListConfig::default();
        let height = match &section.height {
            Some(raw) => HeightMode::try_from(raw)?,
            None => defaults.height,
        };
        let item_height = match &section.item_height {
            Some(raw) => ItemHeight::try_from(raw)?,
            None => defaults.item_height,
        };
        Ok(Self {
            height,
            reserved_lines: section.reserved_lines.unwrap_or(defaults.reserved_lines),
            item_height,
            show_overflow_indicators: section
                .show_overflow_indicators
                .unwrap_or(defaults.show_overflow_indicators),
            overflow_indicator_threshold: section
                .overflow_indicator_threshold
                .unwrap_or(defaults.overflow_indicator_threshold),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_height_rejects_non_positive_and_fractional() {
        for bad in [0.0, -1.0, 1.5, f64::NAN, f64::INFINITY] {
            let err = validate_item_height(bad).unwrap_err();
            assert!(
                err.to_string().contains("positive integer"),
                "unexpected message for {bad}: {err}"
            );
        }
        assert!(ItemHeight::try_from(-1i64).is_err());
        assert!(ItemHeight::try_from(0i64).is_err());
    }

    #[test]
    fn item_height_accepts_positive_integers() {
        for good in [1.0, 5.0, 100.0] {
            assert_eq!(validate_item_height(good).unwrap().get(), good as usize);
        }
        assert_eq!(ItemHeight::try_from(5i64).unwrap().get(), 5);
        assert_eq!(ItemHeight::try_from(100usize).unwrap().get(), 100);
    }

    #[test]
    fn error_message_echoes_value() {
        let err = ItemHeight::try_from(&RawNumber::Float(1.5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "item_height must be a positive integer, got: 1.5"
        );
        let err = ItemHeight::try_from(&RawNumber::Int(-1)).unwrap_err();
        assert!(err.to_string().ends_with("got: -1"));
    }

    #[test]
    fn non_numeric_raw_values_are_rejected() {
        let raw = RawNumber::Other(toml::Value::String("two".into()));
        let err = ItemHeight::try_from(&raw).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::InvalidItemHeight { value } if value.contains("two")
        ));
        let raw = RawHeight::Other(toml::Value::Boolean(true));
        assert!(matches!(
            HeightMode::try_from(&raw),
            Err(ConfigError::InvalidHeight { .. })
        ));
    }

    #[test]
    fn item_height_from_str() {
        assert_eq!("3".parse::<ItemHeight>().unwrap().get(), 3);
        assert_eq!("2.0".parse::<ItemHeight>().unwrap().get(), 2);
        for bad in ["0", "-1", "1.5", "two", ""] {
            let err = bad.parse::<ItemHeight>().unwrap_err();
            assert!(err.to_string().contains("positive integer"), "{bad}");
        }
    }

    #[test]
    fn height_mode_parses_keywords_and_rows() {
        assert_eq!("fill".parse::<HeightMode>().unwrap(), HeightMode::Fill);
        assert_eq!("auto".parse::<HeightMode>().unwrap(), HeightMode::Fill);
        assert_eq!("12".parse::<HeightMode>().unwrap(), HeightMode::Fixed(12));
        assert!("0".parse::<HeightMode>().is_err());
        assert!("tall".parse::<HeightMode>().is_err());
        assert!(HeightMode::try_from(&RawHeight::Rows(-3)).is_err());
    }

    #[test]
    fn section_defaults_fill_gaps() {
        let section = ListSection {
            item_height: Some(RawNumber::Int(2)),
            ..ListSection::default()
        };
        let cfg = ListConfig::try_from(&section).unwrap();
        assert_eq!(cfg.height, HeightMode::Fixed(DEFAULT_HEIGHT));
        assert_eq!(cfg.item_height.get(), 2);
        assert!(cfg.show_overflow_indicators);
        assert_eq!(cfg.reserved_lines, 0);
        assert_eq!(
            cfg.overflow_indicator_threshold,
            DEFAULT_OVERFLOW_INDICATOR_THRESHOLD
        );
    }
}
