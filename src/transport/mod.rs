//
//  fortiztp
//  transport/mod.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! Transport layer: the seam between endpoint methods and HTTP.
//!
//! Endpoint groups never talk to the network directly. Each method builds a
//! declarative [`EndpointRequest`] (verb, path, query pairs, body) and hands
//! it to a [`Transport`], which performs exactly one request/response round
//! trip and reports the outcome as a [`TransportResponse`].
//!
//! The [`Transport`] trait is the collaborator contract from the SDK's point
//! of view: authentication headers, connection pooling, and any resilience
//! policy (retries, backoff, rate limiting) belong behind it, never in the
//! endpoint layer. The bundled [`HttpTransport`] implements the contract
//! with a plain single-attempt reqwest client; consumers wanting retry or
//! rate-limit behavior inject their own implementation via
//! [`FortiZtp::with_transport`](crate::FortiZtp::with_transport).
//!
//! Transport failures are propagated verbatim; endpoint methods never
//! catch, retry, or reinterpret them.

mod http;

pub use http::{HttpTransport, TransportConfig, DEFAULT_BASE_URL};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::envelope::ResponseEnvelope;
use crate::error::Result;

/// HTTP method of an endpoint operation.
///
/// The FortiZTP API surface uses exactly these four verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read operation.
    Get,
    /// Replace/update operation.
    Put,
    /// Create operation.
    Post,
    /// Delete operation.
    Delete,
}

impl Method {
    /// Canonical uppercase name of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// Whether this verb mutates server state (everything but GET).
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declarative description of one REST operation: verb, concrete path,
/// query parameters, and optional JSON body.
///
/// Endpoint methods assemble these with the builder helpers and delegate to
/// the transport. Only explicitly supplied optional parameters end up in
/// the query or body. An omitted `Option` leaves no `null` entry behind,
/// while an explicit falsy value (`Some(false)`, `Some(0)`) is included.
#[derive(Debug, Clone)]
pub struct EndpointRequest {
    /// HTTP verb.
    pub method: Method,
    /// Concrete API path with identifiers substituted (e.g. `/v2/devices/FG123`).
    pub path: String,
    /// Query parameters, in the order they were added.
    pub query: Vec<(String, String)>,
    /// JSON body for mutating operations.
    pub body: Option<Value>,
}

impl EndpointRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Starts a GET request for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Starts a PUT request for `path`.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Starts a POST request for `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Starts a DELETE request for `path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: &str, value: impl std::fmt::Display) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends a query parameter only when a value was supplied.
    ///
    /// `None` leaves the query untouched; `Some(false)` and other explicit
    /// falsy values are rendered like any other value.
    pub fn query_opt(self, key: &str, value: Option<impl std::fmt::Display>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Sets a field in the JSON object body, creating the body if needed.
    pub fn body_field(mut self, key: &str, value: Value) -> Self {
        match self.body {
            Some(Value::Object(ref mut map)) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                let mut map = serde_json::Map::new();
                map.insert(key.to_string(), value);
                self.body = Some(Value::Object(map));
            }
        }
        self
    }

    /// Sets an object-body field only when a value was supplied.
    pub fn body_field_opt(self, key: &str, value: Option<Value>) -> Self {
        match value {
            Some(value) => self.body_field(key, value),
            None => self,
        }
    }

    /// Replaces the whole body, for operations whose body is not an object
    /// (the bulk device operation sends a JSON array).
    pub fn body_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Echo of an issued request, attached to the response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMeta {
    /// HTTP verb, uppercase.
    pub method: String,
    /// Full request URL (without query string).
    pub url: String,
    /// Query parameters that were sent.
    pub params: Vec<(String, String)>,
    /// JSON body that was sent, if any.
    pub data: Option<Value>,
}

/// Outcome of one completed request/response round trip.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Decoded JSON payload of the response body.
    pub payload: Value,
    /// HTTP status code.
    pub status_code: u16,
    /// Wall-clock duration of the exchange, in seconds.
    pub elapsed: f64,
    /// Echo of the request that was issued.
    pub request_meta: RequestMeta,
}

impl TransportResponse {
    /// Wraps this outcome in a [`ResponseEnvelope`], carrying over status,
    /// timing, and request metadata.
    pub fn into_envelope(self) -> ResponseEnvelope {
        ResponseEnvelope::new(self.payload)
            .with_status_code(self.status_code)
            .with_elapsed(self.elapsed)
            .with_request_meta(self.request_meta)
    }
}

/// Request/retry statistics reported by a transport.
///
/// The bundled [`HttpTransport`] never retries, so its retry counters stay
/// zero while the request counters are live; transports that do implement a
/// retry policy populate the full set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetryStats {
    /// Total retry attempts.
    pub total_retries: u64,
    /// Total requests issued (including simulated ones).
    pub total_requests: u64,
    /// Requests that completed with a 2xx status.
    pub successful_requests: u64,
    /// Requests that failed (network error or non-2xx status).
    pub failed_requests: u64,
    /// Retry counts keyed by reason.
    pub retry_by_reason: BTreeMap<String, u64>,
    /// Retry counts keyed by endpoint path.
    pub retry_by_endpoint: BTreeMap<String, u64>,
    /// Timestamp of the most recent retry.
    pub last_retry_time: Option<DateTime<Utc>>,
}

/// One entry in the transport's operation audit log.
#[derive(Debug, Clone, Serialize)]
pub struct OperationRecord {
    /// When the operation was issued.
    pub timestamp: DateTime<Utc>,
    /// HTTP verb, uppercase.
    pub method: String,
    /// API path.
    pub path: String,
    /// JSON body that was (or would have been) sent.
    pub data: Option<Value>,
    /// HTTP status code of the outcome, absent for network-level failures
    /// and simulated operations.
    pub status_code: Option<u16>,
    /// Whether the operation was simulated under read-only mode instead of
    /// being sent to the API.
    pub simulated: bool,
}

/// The transport collaborator contract consumed by the endpoint layer.
///
/// Implementations own authentication headers, connection handling, and any
/// resilience policy. They must report failures as-is: a non-2xx response
/// becomes [`Error::Api`](crate::Error::Api) with the body verbatim, and
/// network failures surface unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one request/response round trip.
    async fn execute(&self, request: EndpointRequest) -> Result<TransportResponse>;

    /// Returns the current bearer token.
    async fn get_token(&self) -> Result<String>;

    /// Refreshes the bearer token if it is missing or expired, returning a
    /// token that is valid now.
    async fn ensure_token_valid(&self) -> Result<String>;

    /// Snapshot of request/retry statistics.
    fn retry_stats(&self) -> RetryStats;

    /// Snapshot of the tracked-operation audit log, oldest first. Empty
    /// unless operation tracking is enabled.
    fn operations(&self) -> Vec<OperationRecord>;

    /// Releases transport resources. Subsequent requests fail; calling
    /// `close` again is a no-op.
    fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_opt_skips_none_and_keeps_false() {
        let request = EndpointRequest::get("/v2/devices")
            .query_opt("provisionStatus", None::<&str>)
            .query_opt("useCache", Some(false));
        assert_eq!(request.query, vec![("useCache".to_string(), "false".to_string())]);
    }

    #[test]
    fn test_body_fields_preserve_order_and_skip_none() {
        let request = EndpointRequest::post("/v2/setting/fortimanagers")
            .body_field_opt("oid", None)
            .body_field("sn", json!("FMG1"))
            .body_field("ip", json!("10.0.0.1"))
            .body_field_opt("scriptOid", None);
        assert_eq!(request.body, Some(json!({"sn": "FMG1", "ip": "10.0.0.1"})));
    }

    #[test]
    fn test_body_json_replaces_whole_body() {
        let request = EndpointRequest::put("/v2/devices").body_json(json!([{"deviceSN": "FG1"}]));
        assert_eq!(request.body, Some(json!([{"deviceSN": "FG1"}])));
    }

    #[test]
    fn test_method_classification() {
        assert!(!Method::Get.is_write());
        assert!(Method::Put.is_write());
        assert!(Method::Post.is_write());
        assert!(Method::Delete.is_write());
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_into_envelope_carries_metadata() {
        let response = TransportResponse {
            payload: json!({"total": 1}),
            status_code: 200,
            elapsed: 0.5,
            request_meta: RequestMeta {
                method: "GET".to_string(),
                url: "https://example.test/v2/devices".to_string(),
                params: vec![],
                data: None,
            },
        };
        let envelope = response.into_envelope();
        assert_eq!(envelope.status_code(), Some(200));
        assert_eq!(envelope.elapsed(), Some(0.5));
        assert_eq!(envelope.request_method(), Some("GET"));
        assert_eq!(envelope.attr("total").unwrap(), &json!(1));
    }
}
