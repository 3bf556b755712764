//! Presentation mappings for [`Quake`] records.
//!
//! Pure functions only — no I/O, no widget types beyond [`ratatui::style::Color`]
//! — so every display rule is unit-testable without a terminal.
//!
//! ## For contributors
//!
//! * Location strings from the feed often look like `"5km N of Cairo, Egypt"`;
//!   [`split_location`] separates the directional offset from the primary
//!   place.
//! * Magnitudes are bucketed by their floor into ten colour bands; the
//!   palette runs blue (minor) through orange to deep red (major).

use chrono::{Local, TimeZone};
use ratatui::style::Color;

use crate::source::Quake;

/// Token separating a directional offset from the primary place description.
pub const LOCATION_SEPARATOR: &str = " of ";

/// Offset placeholder when the feed gives a bare place name.
pub const NEAR_THE: &str = "Near the";

/// Split a location into its offset and primary components.
///
/// `"5km N of Cairo, Egypt"` becomes `("5km N of", "Cairo, Egypt")`.  When
/// the separator is absent the whole string is the primary component and the
/// offset falls back to the [`NEAR_THE`] placeholder.
pub fn split_location(location: &str) -> (String, String) {
    match location.split_once(LOCATION_SEPARATOR) {
        Some((offset, primary)) => (format!("{offset} of"), primary.to_string()),
        None => (NEAR_THE.to_string(), location.to_string()),
    }
}

/// Format a magnitude to one decimal place, e.g. `6.73` → `"6.7"`.
pub fn format_magnitude(magnitude: f64) -> String {
    format!("{magnitude:.1}")
}

/// Map a magnitude to its discrete colour bucket, 1 through 10.
///
/// Buckets follow `floor(magnitude)`: everything at or below 1 (including
/// negative magnitudes from very small quakes) lands in bucket 1, and
/// everything at or above 10 lands in bucket 10.
pub fn magnitude_bucket(magnitude: f64) -> u8 {
    let floor = magnitude.floor();
    if floor <= 1.0 {
        1
    } else if floor >= 10.0 {
        10
    } else {
        floor as u8
    }
}

/// Colour for a magnitude bucket.
pub fn bucket_color(bucket: u8) -> Color {
    match bucket {
        1 => Color::Rgb(0x4A, 0x7B, 0xA6),
        2 => Color::Rgb(0x04, 0xB4, 0xB3),
        3 => Color::Rgb(0x10, 0xCA, 0xC9),
        4 => Color::Rgb(0xF5, 0xA6, 0x23),
        5 => Color::Rgb(0xFF, 0x7D, 0x50),
        6 => Color::Rgb(0xFC, 0x66, 0x44),
        7 => Color::Rgb(0xE7, 0x5F, 0x40),
        8 => Color::Rgb(0xE1, 0x3A, 0x20),
        9 => Color::Rgb(0xD9, 0x32, 0x18),
        _ => Color::Rgb(0xC0, 0x38, 0x23),
    }
}

/// Colour for a magnitude, via its bucket.
pub fn magnitude_color(magnitude: f64) -> Color {
    bucket_color(magnitude_bucket(magnitude))
}

/// Local-time date string for an epoch-millisecond timestamp, e.g. "Mar 3, 1984".
pub fn format_date(time_ms: i64) -> String {
    match Local.timestamp_millis_opt(time_ms).single() {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => "—".to_string(),
    }
}

/// Local-time clock string for an epoch-millisecond timestamp, e.g. "4:30 PM".
pub fn format_time(time_ms: i64) -> String {
    match Local.timestamp_millis_opt(time_ms).single() {
        Some(dt) => dt.format("%-I:%M %p").to_string(),
        None => "—".to_string(),
    }
}

/// Convenience bundle used by the list renderer.
pub fn location_parts(quake: &Quake) -> (String, String) {
    split_location(&quake.location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_location_with_offset() {
        let (offset, primary) = split_location("5km N of Cairo, Egypt");
        assert_eq!(offset, "5km N of");
        assert_eq!(primary, "Cairo, Egypt");
    }

    #[test]
    fn split_location_without_offset_uses_placeholder() {
        let (offset, primary) = split_location("Cairo, Egypt");
        assert_eq!(offset, NEAR_THE);
        assert_eq!(primary, "Cairo, Egypt");
    }

    #[test]
    fn split_location_splits_on_first_separator() {
        let (offset, primary) = split_location("10km SW of Isle of Skye");
        assert_eq!(offset, "10km SW of");
        assert_eq!(primary, "Isle of Skye");
    }

    #[test]
    fn format_magnitude_one_decimal() {
        assert_eq!(format_magnitude(6.73), "6.7");
        assert_eq!(format_magnitude(0.0), "0.0");
        assert_eq!(format_magnitude(-0.25), "-0.2");
    }

    #[test]
    fn bucket_follows_floor() {
        assert_eq!(magnitude_bucket(6.73), 6);
        assert_eq!(magnitude_bucket(2.0), 2);
        assert_eq!(magnitude_bucket(9.99), 9);
    }

    #[test]
    fn low_magnitudes_share_the_bottom_bucket() {
        // Negative and sub-2 magnitudes all map to bucket 1.
        assert_eq!(magnitude_bucket(1.9), 1);
        assert_eq!(magnitude_bucket(0.4), 1);
        assert_eq!(magnitude_bucket(0.0), 1);
        assert_eq!(magnitude_bucket(-0.2), 1);
        assert_eq!(magnitude_bucket(-3.0), 1);
    }

    #[test]
    fn high_magnitudes_share_the_top_bucket() {
        assert_eq!(magnitude_bucket(10.0), 10);
        assert_eq!(magnitude_bucket(12.5), 10);
    }

    #[test]
    fn buckets_have_distinct_colors() {
        let colors: Vec<Color> = (1..=10).map(bucket_color).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn reference_record_round_trip() {
        let quake = Quake {
            magnitude: 6.73,
            location: "5km N of Cairo, Egypt".to_string(),
            time_ms: 1_583_020_800_000,
            url: String::new(),
        };
        let (offset, primary) = location_parts(&quake);
        assert_eq!(offset, "5km N of");
        assert_eq!(primary, "Cairo, Egypt");
        assert_eq!(format_magnitude(quake.magnitude), "6.7");
        assert_eq!(magnitude_bucket(quake.magnitude), 6);
        assert_eq!(magnitude_color(quake.magnitude), bucket_color(6));
    }

    #[test]
    fn date_formatting_is_total() {
        // Out-of-range timestamps degrade to a placeholder, never panic.
        assert!(!format_date(1_583_020_800_000).is_empty());
        assert!(!format_time(1_583_020_800_000).is_empty());
        assert_eq!(format_date(i64::MAX), "—");
    }
}
