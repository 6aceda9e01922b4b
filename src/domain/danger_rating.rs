//! Danger rating normalization.
//!
//! Listing pages print the rating as an integer (`3`), a fraction (`1/8`) or
//! a dash when the creature has no rating. Everything is normalized to a
//! non-negative `f64`; anything unreadable degrades to `0.0`.

use tracing::warn;

/// Marker the site prints when a creature has no danger rating.
pub const NO_RATING_SENTINEL: &str = "\u{2014}";

/// Convert a raw danger token into a rating.
///
/// Never fails: missing, empty, sentinel and malformed input all yield `0.0`.
pub fn parse_danger_rating(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim) else {
        return 0.0;
    };

    if raw.is_empty() || raw == NO_RATING_SENTINEL {
        return 0.0;
    }

    let rating = match raw.split_once('/') {
        Some((numerator, denominator)) => parse_fraction(numerator, denominator),
        None => raw.parse::<f64>().ok(),
    };

    match rating {
        // `-0` parses to negative zero; adding 0.0 clears the sign bit
        Some(value) if value.is_finite() && value >= 0.0 => value + 0.0,
        Some(value) => {
            warn!("Danger rating '{}' out of range ({}), using 0", raw, value);
            0.0
        }
        None => {
            warn!("Unparsable danger rating '{}', using 0", raw);
            0.0
        }
    }
}

fn parse_fraction(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator = numerator.trim().parse::<f64>().ok()?;
    let denominator = denominator.trim().parse::<f64>().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}
