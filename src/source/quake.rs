//! The core data type shared across the application.
//!
//! `Quake` represents a single decoded seismic event.  The fetch-and-parse
//! step in [`crate::source::usgs`] is the only place that constructs these;
//! everything downstream (loader, app state, rendering) treats them as
//! immutable values.
//!
//! ## For contributors
//!
//! If you are adding a new event source you do **not** need to modify this
//! file unless the feed carries extra fields.  Just construct `Quake` values
//! in your source's `fetch_events()` implementation.

/// One seismic-event record, normalised from the wire format.
///
/// A batch of these is produced per successful fetch, held for the lifetime
/// of one load cycle, and replaced wholesale by the next successful load —
/// there is no incremental merging.
#[derive(Debug, Clone, PartialEq)]
pub struct Quake {
    /// Event magnitude.  Finite, and may be negative — very small quakes
    /// report negative magnitudes.  A null magnitude in the feed decodes
    /// as `0.0`.
    pub magnitude: f64,

    /// Human-readable place description, e.g. `"5km N of Cairo, Egypt"`.
    /// Non-empty once parsed; may embed a directional-offset prefix that
    /// the display layer splits off (see [`crate::view::split_location`]).
    pub location: String,

    /// Occurrence time in non-negative milliseconds since the Unix epoch.
    pub time_ms: i64,

    /// Detail-page URL for this event.  Used by the display layer only.
    pub url: String,
}
