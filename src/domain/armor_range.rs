//! Armor class range filtering.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive range check; bounds may be given in either order.
pub fn in_range(value: i32, min: i32, max: i32) -> bool {
    let (low, high) = if max < min { (max, min) } else { (min, max) };
    low <= value && value <= high
}

/// Normalized inclusive armor class range (`min <= max` always holds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorClassRange {
    min: i32,
    max: i32,
}

impl ArmorClassRange {
    /// Build a range, swapping the bounds when they arrive inverted.
    pub fn new(a: i32, b: i32) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    /// Range containing a single armor class.
    pub fn exact(value: i32) -> Self {
        Self { min: value, max: value }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, value: i32) -> bool {
        in_range(value, self.min, self.max)
    }
}

impl fmt::Display for ArmorClassRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..={}", self.min, self.max)
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid armor class input '{input}': expected '<n>' or '<n> <m>'")]
pub struct ArmorRangeParseError {
    pub input: String,
}

fn armor_input_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)(?:\s+(\d+))?$").unwrap_or_else(|e| panic!("armor input pattern: {e}"))
    })
}

/// Parses user input such as `"13"` or `"10 18"` (either order).
impl FromStr for ArmorClassRange {
    type Err = ArmorRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ArmorRangeParseError { input: s.to_string() };
        let captures = armor_input_pattern().captures(s.trim()).ok_or_else(error)?;

        let first: i32 = captures[1].parse().map_err(|_| error())?;
        match captures.get(2) {
            Some(second) => {
                let second: i32 = second.as_str().parse().map_err(|_| error())?;
                Ok(Self::new(first, second))
            }
            None => Ok(Self::exact(first)),
        }
    }
}
