/// hydrograph_service: gap-filled USGS streamflow series for charting.
///
/// # Module structure
///
/// ```text
/// hydrograph_service
/// ├── model       - shared data types (SourceSeries, NormalizedRecord, HydroError, …)
/// ├── config      - hydrograph.toml loader with HYDROGRAPH_* environment overrides
/// ├── time_policy - fixed-offset interpretation of service wall-clock timestamps
/// ├── logging     - tracing subscriber setup for the binaries
/// ├── endpoint    - HTTP API serving normalized records as JSON
/// ├── ingest
/// │   ├── usgs    - USGS NWIS IV API: URL construction, fetch, JSON parsing
/// │   └── fixtures (test only) - representative API response payloads
/// └── analysis
///     └── hydrograph - flattens per-site series and fills gaps with "NA" records
/// ```

/// Public modules
pub mod analysis;
pub mod config;
pub mod endpoint;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod time_policy;
