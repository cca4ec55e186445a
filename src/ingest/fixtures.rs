/// Test fixtures: representative JSON payloads from the USGS IV API.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parser and the normalizer. They reflect the real
/// WaterML-as-JSON envelope returned by:
///   https://waterservices.usgs.gov/nwis/iv/?format=json&parameterCD=00060&...
///
/// USGS IV response shape (fields the parser reads):
///   response.value.timeSeries[]
///     .sourceInfo.siteName
///     .sourceInfo.siteCode[0].value                              - site number (string)
///     .sourceInfo.timeZoneInfo.defaultTimeZone.zoneAbbreviation - e.g. "CST"
///     .values[0].value[]
///       .value     - the measurement as a STRING (not a number)
///       .dateTime  - ISO 8601 with fraction and offset
///
/// Note: measurement values are always JSON strings in the USGS response,
/// even though they represent numbers. They are passed through untouched.

/// St. Louis (07010000) with three 15-minute readings followed by a
/// 90-minute outage.
#[cfg(test)]
pub(crate) fn fixture_st_louis_gap_json() -> &'static str {
    r#"{
      "name": "ns1:timeSeriesResponseType",
      "value": {
        "queryInfo": { "queryURL": "http://waterservices.usgs.gov/nwis/iv/site=07010000" },
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "MISSISSIPPI RIVER AT ST. LOUIS, MO",
              "siteCode": [{ "value": "07010000", "network": "NWIS", "agencyCode": "USGS" }],
              "timeZoneInfo": {
                "defaultTimeZone": { "zoneOffset": "-06:00", "zoneAbbreviation": "CST" },
                "daylightSavingsTimeZone": { "zoneOffset": "-05:00", "zoneAbbreviation": "CDT" },
                "siteUsesDaylightSavingsTime": true
              },
              "geoLocation": {
                "geogLocation": { "srs": "EPSG:4326", "latitude": 38.62900000, "longitude": -90.1797222 }
              }
            },
            "variable": {
              "variableCode": [{ "value": "00060", "network": "NWIS" }],
              "variableName": "Streamflow, ft&#179;/s",
              "unit": { "unitCode": "ft3/s" },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "102000", "qualifiers": ["P"], "dateTime": "2021-01-01T00:00:00.000-06:00" },
                { "value": "101000", "qualifiers": ["P"], "dateTime": "2021-01-01T00:15:00.000-06:00" },
                { "value": "101000", "qualifiers": ["P"], "dateTime": "2021-01-01T00:30:00.000-06:00" },
                { "value": "101000", "qualifiers": ["P"], "dateTime": "2021-01-01T02:00:00.000-06:00" }
              ],
              "qualifier": [{ "qualifierCode": "P", "qualifierDescription": "Provisional data subject to revision." }]
            }]
          }
        ]
      }
    }"#
}

/// Two sites in one response: St. Louis followed by Grafton. Grafton's
/// readings are an hour apart and one carries a fractional value.
#[cfg(test)]
pub(crate) fn fixture_multi_site_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "MISSISSIPPI RIVER AT ST. LOUIS, MO",
              "siteCode": [{ "value": "07010000", "network": "NWIS", "agencyCode": "USGS" }],
              "timeZoneInfo": {
                "defaultTimeZone": { "zoneOffset": "-06:00", "zoneAbbreviation": "CST" }
              }
            },
            "values": [{
              "value": [
                { "value": "102000", "qualifiers": ["P"], "dateTime": "2021-01-01T00:00:00.000-06:00" },
                { "value": "101000", "qualifiers": ["P"], "dateTime": "2021-01-01T00:15:00.000-06:00" }
              ],
              "qualifier": []
            }]
          },
          {
            "sourceInfo": {
              "siteName": "MISSISSIPPI RIVER AT GRAFTON, IL",
              "siteCode": [{ "value": "05587450", "network": "NWIS", "agencyCode": "USGS" }],
              "timeZoneInfo": {
                "defaultTimeZone": { "zoneOffset": "-06:00", "zoneAbbreviation": "CST" }
              }
            },
            "values": [{
              "value": [
                { "value": "98700.5", "qualifiers": ["P"], "dateTime": "2021-01-01T00:00:00.000-06:00" },
                { "value": "98500", "qualifiers": ["P"], "dateTime": "2021-01-01T01:00:00.000-06:00" }
              ],
              "qualifier": []
            }]
          }
        ]
      }
    }"#
}

/// Missouri River at Hermann with an empty value array, as returned for a
/// gauge that reported nothing in the requested window.
#[cfg(test)]
pub(crate) fn fixture_empty_value_array_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "MISSOURI RIVER AT HERMANN, MO",
              "siteCode": [{ "value": "06934500", "network": "NWIS", "agencyCode": "USGS" }],
              "timeZoneInfo": {
                "defaultTimeZone": { "zoneOffset": "-06:00", "zoneAbbreviation": "CST" }
              }
            },
            "values": [{ "value": [], "qualifier": [] }]
          }
        ]
      }
    }"#
}

/// A timeSeries entry whose `values` array is itself empty.
#[cfg(test)]
pub(crate) fn fixture_no_values_block_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "MISSOURI RIVER AT HERMANN, MO",
              "siteCode": [{ "value": "06934500", "network": "NWIS", "agencyCode": "USGS" }],
              "timeZoneInfo": {
                "defaultTimeZone": { "zoneOffset": "-06:00", "zoneAbbreviation": "CST" }
              }
            },
            "values": []
          }
        ]
      }
    }"#
}

/// An observation missing its `dateTime` field.
#[cfg(test)]
pub(crate) fn fixture_missing_date_time_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "MISSISSIPPI RIVER AT ST. LOUIS, MO",
              "siteCode": [{ "value": "07010000", "network": "NWIS", "agencyCode": "USGS" }],
              "timeZoneInfo": {
                "defaultTimeZone": { "zoneOffset": "-06:00", "zoneAbbreviation": "CST" }
              }
            },
            "values": [{
              "value": [
                { "value": "102000", "qualifiers": ["P"], "dateTime": "2021-01-01T00:00:00.000-06:00" },
                { "value": "101000", "qualifiers": ["P"] }
              ]
            }]
          }
        ]
      }
    }"#
}

/// sourceInfo without `timeZoneInfo`.
#[cfg(test)]
pub(crate) fn fixture_missing_time_zone_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "MISSISSIPPI RIVER AT ST. LOUIS, MO",
              "siteCode": [{ "value": "07010000", "network": "NWIS", "agencyCode": "USGS" }]
            },
            "values": [{ "value": [] }]
          }
        ]
      }
    }"#
}
