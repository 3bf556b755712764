//! Event source abstraction layer.
//!
//! This module defines the [`EventSource`] trait and the common [`Quake`]
//! record type.  Concrete source implementations live in sub-modules
//! (currently only [`usgs`]).
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `emsc.rs`).
//! 2. Define a struct (e.g. `EmscSource`) and implement [`EventSource`] for it.
//! 3. Add `mod emsc;` below and re-export your struct in the `pub use` block.
//! 4. Hand an instance to the loader in `main.rs`.
//!
//! The loader, app state, and UI are all source-agnostic.

mod quake;
pub mod usgs;

// Re-export the public API of this module so callers can write
// `use crate::source::{EventSource, Quake, UsgsSource};`
pub use quake::Quake;
pub use usgs::UsgsSource;

/// Trait that every event source must implement.
///
/// The loader runs [`fetch_events()`](EventSource::fetch_events) on a
/// background thread and shares the source across starts, so implementations
/// must be [`Send`] and [`Sync`].
///
/// ## Failure contract
///
/// `fetch_events` is fail-soft: it must never panic or surface an error to
/// the caller.  Transport and parse failures are logged by the
/// implementation and reported as an empty list, which the owner cannot
/// distinguish from a legitimately empty feed.
pub trait EventSource: Send + Sync {
    /// Human-readable label for this source (used in diagnostics).
    fn name(&self) -> &str;

    /// Perform one fetch-and-decode cycle.
    ///
    /// Implementations do their own HTTP/IO work and return whatever valid
    /// records they could build, defaulting to an empty list on any failure.
    fn fetch_events(&self) -> Vec<Quake>;
}
