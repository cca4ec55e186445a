/// USGS NWIS Instantaneous Values (IV) API client.
///
/// Handles URL construction, the single blocking request, and typed JSON
/// decoding for the USGS Water Services IV endpoint:
///   https://waterservices.usgs.gov/nwis/iv/
///
/// The IV service returns WaterML rendered as JSON. See `fixtures.rs` for
/// annotated examples of the response structure.
///
/// `fetch` never returns an error: configuration problems, HTTP failures and
/// undecodable bodies are logged and collapse to `None`, which the chart
/// layer renders as "no data". `try_fetch` exposes the same call with the
/// failure kept.

use crate::model::{HydroError, Observation, SourceSeries, PARAM_DISCHARGE};
use serde::Deserialize;
use std::time::Duration;

/// Request timeout used when no configured client is supplied.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Serde structures for WaterML JSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct IvResponse {
    value: ValueWrapper,
}

#[derive(Deserialize)]
struct ValueWrapper {
    #[serde(rename = "timeSeries")]
    time_series: Vec<TimeSeries>,
}

#[derive(Deserialize)]
struct TimeSeries {
    #[serde(rename = "sourceInfo")]
    source_info: SourceInfo,
    values: Vec<Values>,
}

#[derive(Deserialize)]
struct SourceInfo {
    #[serde(rename = "siteName")]
    site_name: String,
    #[serde(rename = "siteCode")]
    site_code: Vec<SiteCode>,
    #[serde(rename = "timeZoneInfo")]
    time_zone_info: TimeZoneInfo,
}

#[derive(Deserialize)]
struct SiteCode {
    value: String,
}

#[derive(Deserialize)]
struct TimeZoneInfo {
    #[serde(rename = "defaultTimeZone")]
    default_time_zone: ZoneDescriptor,
}

#[derive(Deserialize)]
struct ZoneDescriptor {
    #[serde(rename = "zoneAbbreviation")]
    zone_abbreviation: String,
}

#[derive(Deserialize)]
struct Values {
    value: Vec<ValueEntry>,
}

#[derive(Deserialize)]
struct ValueEntry {
    value: String,  // USGS returns as string!
    #[serde(rename = "dateTime")]
    date_time: String,
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Everything needed for one IV request. Built once per call, never shared
/// as global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub site_ids: Vec<String>,
    pub start_date: String, // YYYY-MM-DD
    pub end_date: String,
    /// Service root ending in `/`, e.g. `https://waterservices.usgs.gov/nwis/`.
    pub base_url: String,
}

impl FetchRequest {
    pub fn new<S: AsRef<str>>(site_ids: &[S], start_date: &str, end_date: &str, base_url: &str) -> Self {
        Self {
            site_ids: site_ids.iter().map(|s| s.as_ref().to_string()).collect(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            base_url: base_url.to_string(),
        }
    }

    /// Checks that every field is supplied and the site list is non-empty.
    pub fn validate(&self) -> Result<(), HydroError> {
        if self.site_ids.is_empty() {
            return Err(HydroError::Config("no site ids given".to_string()));
        }
        if self.site_ids.iter().any(|s| s.trim().is_empty()) {
            return Err(HydroError::Config("site ids must not be blank".to_string()));
        }
        if self.start_date.trim().is_empty() || self.end_date.trim().is_empty() {
            return Err(HydroError::Config("start and end dates are required".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(HydroError::Config("service base URL is required".to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the IV URL for a streamflow (`00060`) request:
///
/// `<base_url>iv/?site=<ids>&startDT=<start>&endDT=<end>&parameterCD=00060&format=json`
///
/// Site ids are comma-joined; each id and date is percent-encoded on its own.
///
/// # Example
/// ```
/// use hydrograph_service::ingest::usgs::{build_iv_url, FetchRequest};
///
/// let request = FetchRequest::new(
///     &["07010000", "05587450"],
///     "2021-01-01",
///     "2021-01-02",
///     "https://waterservices.usgs.gov/nwis/",
/// );
/// assert_eq!(
///     build_iv_url(&request),
///     "https://waterservices.usgs.gov/nwis/iv/?site=07010000,05587450\
///      &startDT=2021-01-01&endDT=2021-01-02&parameterCD=00060&format=json",
/// );
/// ```
pub fn build_iv_url(request: &FetchRequest) -> String {
    let sites_param = request
        .site_ids
        .iter()
        .map(|id| urlencoding::encode(id.trim()).into_owned())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{}iv/?site={}&startDT={}&endDT={}&parameterCD={}&format=json",
        request.base_url,
        sites_param,
        urlencoding::encode(request.start_date.trim()),
        urlencoding::encode(request.end_date.trim()),
        PARAM_DISCHARGE,
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Decodes a USGS IV API JSON body into one `SourceSeries` per `timeSeries`
/// entry, in response order.
///
/// An empty `timeSeries` array is a valid, empty result. A `timeSeries`
/// entry with no `values` block yields a series with no observations.
///
/// # Errors
/// - `HydroError::MalformedResponse`: the body is not JSON, or a required
///   field (site name, site code, zone abbreviation, an observation's
///   `value` or `dateTime`) is absent.
pub fn parse_iv_response(json: &str) -> Result<Vec<SourceSeries>, HydroError> {
    let response: IvResponse = serde_json::from_str(json)
        .map_err(|e| HydroError::MalformedResponse(format!("JSON deserialization failed: {}", e)))?;

    let mut all_series = Vec::with_capacity(response.value.time_series.len());

    for series in response.value.time_series {
        let site_id = series
            .source_info
            .site_code
            .into_iter()
            .next()
            .ok_or_else(|| HydroError::MalformedResponse("Missing siteCode".to_string()))?
            .value;

        let observations = series
            .values
            .into_iter()
            .next()
            .map(|values| {
                values
                    .value
                    .into_iter()
                    .map(|entry| Observation {
                        date_time: entry.date_time,
                        value: entry.value,
                    })
                    .collect()
            })
            .unwrap_or_default();

        all_series.push(SourceSeries {
            site_id,
            site_name: series.source_info.site_name,
            timezone_abbreviation: series
                .source_info
                .time_zone_info
                .default_time_zone
                .zone_abbreviation,
            observations,
        });
    }

    Ok(all_series)
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Blocking HTTP client with the given request timeout.
pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, HydroError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| HydroError::Transport(format!("failed to build HTTP client: {}", e)))
}

/// Issues one IV request and decodes the body.
///
/// The request is validated before anything touches the network.
pub fn try_fetch(
    client: &reqwest::blocking::Client,
    request: &FetchRequest,
) -> Result<Vec<SourceSeries>, HydroError> {
    request.validate()?;

    let url = build_iv_url(request);
    tracing::debug!(url = %url, "Requesting IV data");

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| HydroError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HydroError::Http(status.as_u16()));
    }

    let body = response
        .text()
        .map_err(|e| HydroError::Transport(format!("failed to read response body: {}", e)))?;

    parse_iv_response(&body)
}

/// Fetches IV streamflow series, or `None` if anything went wrong.
pub fn fetch(client: &reqwest::blocking::Client, request: &FetchRequest) -> Option<Vec<SourceSeries>> {
    match try_fetch(client, request) {
        Ok(series) => {
            tracing::info!(
                sites = request.site_ids.len(),
                series = series.len(),
                "Fetched IV data"
            );
            Some(series)
        }
        Err(e) => {
            log_fetch_failure(request, &e);
            None
        }
    }
}

/// Four-argument form of `fetch` that builds its own client.
///
/// Returns `None` without any network activity when an argument is missing
/// or `site_ids` is empty.
pub fn fetch_series<S: AsRef<str>>(
    site_ids: &[S],
    start_date: &str,
    end_date: &str,
    base_url: &str,
) -> Option<Vec<SourceSeries>> {
    let request = FetchRequest::new(site_ids, start_date, end_date, base_url);

    if let Err(e) = request.validate() {
        log_fetch_failure(&request, &e);
        return None;
    }

    let client = match http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)) {
        Ok(client) => client,
        Err(e) => {
            log_fetch_failure(&request, &e);
            return None;
        }
    };

    fetch(&client, &request)
}

fn log_fetch_failure(request: &FetchRequest, err: &HydroError) {
    let sites = request.site_ids.join(",");
    match err {
        HydroError::Config(_) => {
            tracing::error!(error = %err, "IV request not sent: configuration incomplete")
        }
        HydroError::Http(status) => {
            tracing::error!(sites = %sites, status, "IV request rejected")
        }
        HydroError::Transport(_) => {
            tracing::error!(sites = %sites, error = %err, "IV request failed")
        }
        HydroError::MalformedResponse(_) | HydroError::Io(_) => {
            tracing::error!(sites = %sites, error = %err, "IV response could not be decoded")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
