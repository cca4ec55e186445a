/// HTTP endpoint serving chart-ready hydrograph data
///
/// Lets a charting front end pull normalized records without talking to
/// the USGS service itself. Requests are handled one at a time.
///
/// Endpoints:
/// - GET /hydrograph[?site=A,B&startDT=D&endDT=D] - Normalized, gap-filled records
/// - GET /health - Service health check
///
/// Query parameters that are absent fall back to the configured defaults.

use crate::analysis::hydrograph::normalize;
use crate::config::{split_sites, AppConfig};
use crate::ingest::usgs::{fetch, http_client, FetchRequest};
use crate::time_policy::TimePolicy;
use std::borrow::Cow;

type JsonResponse = tiny_http::Response<std::io::Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Routes one request target (path plus query) to a status and JSON body.
///
/// Upstream failures produce `200` with an empty list, the same "no data"
/// the chart shows for an empty response. An unusable request (no sites,
/// no dates) is a `400`.
pub fn handle_request(
    target: &str,
    config: &AppConfig,
    client: &reqwest::blocking::Client,
    policy: &TimePolicy,
) -> (u16, serde_json::Value) {
    let (path, query) = split_target(target);

    match path {
        "/health" => (200, health_body()),
        "/hydrograph" => {
            let request = request_from_query(config, &query);
            if let Err(e) = request.validate() {
                return (400, serde_json::json!({ "error": e.to_string() }));
            }
            let series = fetch(client, &request);
            let records = normalize(series.as_deref(), policy);
            tracing::info!(
                sites = %request.site_ids.join(","),
                records = records.len(),
                placeholders = records.iter().filter(|r| r.is_synthetic()).count(),
                "Served hydrograph"
            );
            match serde_json::to_value(&records) {
                Ok(body) => (200, body),
                Err(e) => (500, serde_json::json!({ "error": e.to_string() })),
            }
        }
        _ => (
            404,
            serde_json::json!({
                "error": "Not found",
                "available_endpoints": ["/health", "/hydrograph"]
            }),
        ),
    }
}

fn health_body() -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    })
}

/// Configured request with `site`, `startDT` and `endDT` overrides applied.
fn request_from_query(config: &AppConfig, query: &[(String, String)]) -> FetchRequest {
    let mut request = config.fetch_request();
    for (key, value) in query {
        match key.as_str() {
            "site" | "sites" => request.site_ids = split_sites(value),
            "startDT" => request.start_date = value.clone(),
            "endDT" => request.end_date = value.clone(),
            _ => {}
        }
    }
    request
}

fn split_target(target: &str) -> (&str, Vec<(String, String)>) {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let params = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect();
    (path, params)
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start HTTP endpoint server on the specified port
pub fn start_endpoint_server(port: u16, config: AppConfig) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    tracing::info!(port, "HTTP endpoint listening (GET /hydrograph, GET /health)");

    serve(&server, &config)
}

/// Answers requests on an already bound server until it shuts down.
pub fn serve(server: &tiny_http::Server, config: &AppConfig) -> Result<(), String> {
    let client = http_client(config.timeout()).map_err(|e| e.to_string())?;
    let policy = config.time_policy().map_err(|e| e.to_string())?;

    for request in server.incoming_requests() {
        let (status, body) = if *request.method() == tiny_http::Method::Get {
            handle_request(request.url(), config, &client, &policy)
        } else {
            (405, serde_json::json!({ "error": "Method not allowed" }))
        };

        if let Err(e) = request.respond(create_response(status, &body)) {
            tracing::warn!(error = %e, "Failed to send response");
        }
    }

    Ok(())
}

/// Create HTTP response with JSON body
fn create_response(status_code: u16, json: &serde_json::Value) -> JsonResponse {
    let body = serde_json::to_string_pretty(json).unwrap_or_default();
    let response = tiny_http::Response::from_data(body.into_bytes()).with_status_code(status_code);

    match tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
