/// Service configuration loader - parses hydrograph.toml
///
/// Keeps the site list, date range and service URL out of the code. File
/// values can be overridden from the environment (or a `.env` file), and
/// the CLI can override both. The result is turned into an immutable
/// `FetchRequest` per call.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::ingest::usgs::{FetchRequest, DEFAULT_TIMEOUT_SECS};
use crate::model::HydroError;
use crate::time_policy::TimePolicy;

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "hydrograph.toml";

pub const DEFAULT_BASE_URL: &str = "https://waterservices.usgs.gov/nwis/";

pub const ENV_BASE_URL: &str = "HYDROGRAPH_BASE_URL";
pub const ENV_SITES: &str = "HYDROGRAPH_SITES";
pub const ENV_START_DATE: &str = "HYDROGRAPH_START_DATE";
pub const ENV_END_DATE: &str = "HYDROGRAPH_END_DATE";
pub const ENV_TIME_OFFSET: &str = "HYDROGRAPH_TIME_OFFSET";

// ---------------------------------------------------------------------------
// TOML structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Which sites and which window to chart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestConfig {
    #[serde(default)]
    pub sites: Vec<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeConfig {
    /// `"UTC"` or a fixed offset such as `"-06:00"`.
    #[serde(default = "default_offset")]
    pub offset: String,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self { offset: default_offset() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointConfig {
    pub port: Option<u16>,
}

/// Root of hydrograph.toml. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_offset() -> String {
    "UTC".to_string()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, HydroError> {
        toml::from_str(contents).map_err(|e| HydroError::Config(format!("invalid configuration: {}", e)))
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, HydroError> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| HydroError::Config(format!("invalid {}: {}", path.display(), e)))
    }

    /// Applies `HYDROGRAPH_*` overrides using the given variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.service.base_url = url;
        }
        if let Some(sites) = lookup(ENV_SITES) {
            self.request.sites = split_sites(&sites);
        }
        if let Some(start) = lookup(ENV_START_DATE) {
            self.request.start_date = start;
        }
        if let Some(end) = lookup(ENV_END_DATE) {
            self.request.end_date = end;
        }
        if let Some(offset) = lookup(ENV_TIME_OFFSET) {
            self.time.offset = offset;
        }
    }

    pub fn time_policy(&self) -> Result<TimePolicy, HydroError> {
        self.time.offset.parse().map_err(HydroError::Config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_secs)
    }

    /// Immutable request value for the configured sites and window.
    pub fn fetch_request(&self) -> FetchRequest {
        FetchRequest::new(
            self.request.sites.as_slice(),
            &self.request.start_date,
            &self.request.end_date,
            &self.service.base_url,
        )
    }
}

/// Loads configuration the way the binaries do: `.env` first, then the
/// TOML file (if it exists), then environment overrides.
///
/// A missing file is not an error; the environment alone can supply every
/// value.
pub fn load_config(path: &Path) -> Result<AppConfig, HydroError> {
    dotenv::dotenv().ok();

    let mut config = if path.exists() {
        AppConfig::from_file(path)?
    } else {
        tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        AppConfig::default()
    };

    config.apply_overrides(|key| env::var(key).ok().filter(|v| !v.trim().is_empty()));
    config.time_policy()?;

    Ok(config)
}

/// Splits a comma-separated site list, dropping blanks.
pub fn split_sites(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use std::collections::HashMap;

    #[test]
    fn test_load_shipped_config_succeeds() {
        let config = AppConfig::from_file(Path::new(DEFAULT_CONFIG_PATH))
            .expect("hydrograph.toml should parse");
        assert!(!config.request.sites.is_empty(), "should list at least one site");
        assert!(config.service.base_url.ends_with('/'), "base URL must end with '/'");
        assert!(config.time_policy().is_ok());
        assert!(config.fetch_request().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.service.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.time_policy().unwrap(), TimePolicy::utc());
        assert!(config.request.sites.is_empty());
        assert!(config.endpoint.port.is_none());
    }

    #[test]
    fn test_full_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [service]
            base_url = "http://localhost:9000/nwis/"
            timeout_secs = 5

            [request]
            sites = ["07010000", "05587450"]
            start_date = "2021-01-01"
            end_date = "2021-01-02"

            [time]
            offset = "-06:00"

            [endpoint]
            port = 8080
            "#,
        )
        .expect("should parse");

        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.endpoint.port, Some(8080));
        assert_eq!(
            config.time_policy().unwrap(),
            TimePolicy::fixed(FixedOffset::west_opt(6 * 3600).unwrap())
        );

        let request = config.fetch_request();
        assert_eq!(request.site_ids, vec!["07010000", "05587450"]);
        assert_eq!(request.base_url, "http://localhost:9000/nwis/");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = AppConfig::from_toml_str("[service\nbase_url = 3");
        assert!(matches!(result, Err(HydroError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AppConfig::from_file(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(HydroError::Io(_))));
    }

    #[test]
    fn test_invalid_offset_is_config_error() {
        let config = AppConfig::from_toml_str("[time]\noffset = \"Central\"").unwrap();
        assert!(matches!(config.time_policy(), Err(HydroError::Config(_))));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = AppConfig::from_toml_str("[request]\nsites = [\"07010000\"]").unwrap();
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://mirror/nwis/"),
            (ENV_SITES, "05587450, 06934500,"),
            (ENV_START_DATE, "2022-04-01"),
            (ENV_END_DATE, "2022-04-07"),
            (ENV_TIME_OFFSET, "-05:00"),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        let request = config.fetch_request();
        assert_eq!(request.base_url, "http://mirror/nwis/");
        assert_eq!(request.site_ids, vec!["05587450", "06934500"]);
        assert_eq!(request.start_date, "2022-04-01");
        assert_eq!(request.end_date, "2022-04-07");
        assert_eq!(config.time.offset, "-05:00");
    }

    #[test]
    fn test_no_overrides_leaves_config_untouched() {
        let mut config = AppConfig::from_toml_str("[request]\nsites = [\"07010000\"]").unwrap();
        config.apply_overrides(|_| None);
        assert_eq!(config.request.sites, vec!["07010000"]);
        assert_eq!(config.service.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_split_sites() {
        assert_eq!(split_sites("07010000,05587450"), vec!["07010000", "05587450"]);
        assert_eq!(split_sites(" 07010000 , ,"), vec!["07010000"]);
        assert!(split_sites("").is_empty());
    }
}
