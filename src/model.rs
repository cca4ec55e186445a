/// Core data types for the hydrograph service.
///
/// This module defines the shared domain model imported by all other modules:
/// the per-site series handed over by the ingest layer, the flat chart
/// records produced by the normalizer, and the crate error type.
/// It contains no I/O.

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Parameter codes and cadence
// ---------------------------------------------------------------------------

/// USGS parameter code for discharge (streamflow), in cubic feet per second.
pub const PARAM_DISCHARGE: &str = "00060";

/// Gaps between consecutive observations at or below this are left unfilled.
pub const GAP_THRESHOLD_MS: i64 = 1_800_000; // 30 minutes

/// Spacing of synthetic records inside a filled gap.
pub const FILL_INCREMENT_MS: i64 = 900_000; // 15 minutes

/// Value carried by every synthetic gap-fill record.
pub const MISSING_VALUE_SENTINEL: &str = "NA";

// ---------------------------------------------------------------------------
// Source series (ingest output)
// ---------------------------------------------------------------------------

/// One raw observation as reported by the IV service.
///
/// Both fields are kept as the strings the service sent: `date_time` is
/// ISO 8601 (`"2021-01-01T00:00:00.000-06:00"`), `value` is a number
/// rendered as a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date_time: String,
    pub value: String,
}

/// All observations reported for one site in one response.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSeries {
    pub site_id: String,
    pub site_name: String,
    pub timezone_abbreviation: String, // e.g. "CST", passed through as-is
    pub observations: Vec<Observation>,
}

// ---------------------------------------------------------------------------
// Normalized records (normalizer output)
// ---------------------------------------------------------------------------

/// Measurement slot of a chart record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    /// Value reported by the service, kept verbatim.
    Observed(String),
    /// Placeholder synthesized to fill a gap.
    Missing,
}

impl RecordValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, RecordValue::Missing)
    }
}

impl Serialize for RecordValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordValue::Observed(raw) => serializer.serialize_str(raw),
            RecordValue::Missing => serializer.serialize_str(MISSING_VALUE_SENTINEL),
        }
    }
}

/// One point on the chart: a real or synthetic reading for one site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub key: String,
    pub name: String,
    pub date: String, // YYYY-MM-DD
    pub time: String, // HH:MM:SS
    pub timezone: String,
    pub time_epoch_millis: i64,
    pub value: RecordValue,
}

impl NormalizedRecord {
    pub fn is_synthetic(&self) -> bool {
        self.value.is_missing()
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when configuring, fetching, or decoding IV data.
#[derive(Debug, thiserror::Error)]
pub enum HydroError {
    /// Missing or invalid request configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-2xx HTTP response from the data service.
    #[error("HTTP error: {0}")]
    Http(u16),

    /// The request never produced a response (bad URL, connection, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body is not the expected WaterML JSON shape.
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
