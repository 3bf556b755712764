//! USGS-style event feed source implementation.
//!
//! This module shows how to implement the [`EventSource`] trait for a
//! concrete wire format.  Use it as a template when adding support for
//! another catalogue or API.
//!
//! ## Wire format
//!
//! The endpoint must return a JSON document whose top level is an array of
//! event objects.  Each element is expected to carry:
//!
//! * `mag` — numeric magnitude (`null` decodes as `0.0`),
//! * `place` — non-empty place description,
//! * `time` — occurrence time, non-negative epoch milliseconds,
//! * `url` — optional detail-page link.
//!
//! Any other fields are ignored.  Elements missing a required field are
//! skipped individually (with a logged diagnostic) rather than aborting the
//! whole decode.
//!
//! ## Failure policy
//!
//! `fetch_events()` is fail-soft: transport errors (timeout, refused
//! connection, non-2xx status) and unparseable documents are logged and
//! yield an empty list.  Nothing here retries; a caller that wants retries
//! drives [`crate::loader::Loader`] again.

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use super::{EventSource, Quake};

/// Default timeout for the single HTTP GET.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure modes of one fetch-and-parse cycle.
///
/// These never cross the [`EventSource`] boundary — they are logged inside
/// [`UsgsSource::fetch_events`] and collapse to an empty result.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network-level failure or a non-success HTTP status.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not a JSON array document.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A seismic-event feed source.
///
/// Performs a single blocking HTTP GET against the configured endpoint and
/// decodes the body into [`Quake`] records.
pub struct UsgsSource {
    /// The query URL to fetch.
    pub endpoint: String,
    /// Bound on the whole request (connect + read).
    timeout: Duration,
}

/// One element of the wire array, before validation.
///
/// Every field is optional here so that a malformed element fails softly at
/// the validation step instead of poisoning the surrounding array.
#[derive(Debug, Deserialize)]
struct RawEvent {
    mag: Option<f64>,
    place: Option<String>,
    time: Option<i64>,
    url: Option<String>,
}

impl UsgsSource {
    /// Create a new source for the given query URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch and decode, surfacing the failure cause.
    ///
    /// Callers outside this module go through the fail-soft
    /// [`fetch_events`](EventSource::fetch_events) instead.
    fn try_fetch(&self) -> Result<Vec<Quake>, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let body = client
            .get(&self.endpoint)
            .send()?
            .error_for_status()?
            .text()?;
        Ok(parse_events(&body)?)
    }
}

/// Decode a feed body into [`Quake`] records.
///
/// This is a pure function (no I/O) so that tests can exercise the parsing
/// logic without hitting the network.  A document whose top level is not an
/// array is an error; individual malformed elements are skipped and logged.
pub fn parse_events(body: &str) -> Result<Vec<Quake>, serde_json::Error> {
    let elements: Vec<serde_json::Value> = serde_json::from_str(body)?;

    let quakes = elements
        .into_iter()
        .enumerate()
        .filter_map(|(idx, element)| {
            let raw: RawEvent = match serde_json::from_value(element) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(index = idx, error = %e, "skipping undecodable feed element");
                    return None;
                }
            };
            match validate(raw) {
                Ok(quake) => Some(quake),
                Err(missing) => {
                    warn!(index = idx, field = missing, "skipping feed element with missing field");
                    None
                }
            }
        })
        .collect();

    Ok(quakes)
}

/// Promote a raw element to a [`Quake`], or name the field that disqualifies it.
fn validate(raw: RawEvent) -> Result<Quake, &'static str> {
    let location = match raw.place {
        Some(place) if !place.is_empty() => place,
        _ => return Err("place"),
    };
    let time_ms = match raw.time {
        Some(time) if time >= 0 => time,
        _ => return Err("time"),
    };
    Ok(Quake {
        magnitude: raw.mag.unwrap_or(0.0),
        location,
        time_ms,
        url: raw.url.unwrap_or_default(),
    })
}

impl EventSource for UsgsSource {
    fn name(&self) -> &str {
        &self.endpoint
    }

    fn fetch_events(&self) -> Vec<Quake> {
        match self.try_fetch() {
            Ok(quakes) => quakes,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "fetch failed; returning no events");
                Vec::new()
            }
        }
    }
}
