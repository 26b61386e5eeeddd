//
//  fortiztp
//  transport/http.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! Bundled reqwest-backed [`Transport`] implementation.
//!
//! [`HttpTransport`] performs exactly one HTTP round trip per call: build
//! the URL, attach the bearer token, send, decode. There is no retry, no
//! backoff, and no rate limiting here; failures surface to the caller
//! unchanged, and consumers who want a resilience policy wrap or replace
//! the transport behind the [`Transport`] trait.
//!
//! Two operational modes are supported:
//!
//! - **read_only**: write verbs (PUT/POST/DELETE) are simulated. No HTTP is
//!   issued; a synthetic payload is returned and the audit record is
//!   flagged `simulated`. Useful for dry-running provisioning scripts.
//! - **track_operations**: every operation is appended to an in-memory
//!   audit log readable via [`Transport::operations`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use crate::auth::TokenSource;
use crate::error::{Error, Result};

use super::{
    EndpointRequest, Method, OperationRecord, RequestMeta, RetryStats, Transport,
    TransportResponse,
};

/// Default FortiZTP API base URL.
pub const DEFAULT_BASE_URL: &str = "https://fortiztp.forticloud.com/public/api";

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// API base URL; endpoint paths are appended to it.
    pub base_url: String,
    /// Verify TLS certificates. Disable only against test endpoints.
    pub verify: bool,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout (the API can take minutes for bulk operations).
    pub read_timeout: Duration,
    /// Simulate write operations instead of sending them.
    pub read_only: bool,
    /// Keep an audit log of issued operations.
    pub track_operations: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            verify: true,
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(300),
            read_only: false,
            track_operations: false,
        }
    }
}

/// Single-attempt HTTP transport over reqwest.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    token_source: TokenSource,
    read_only: bool,
    track_operations: bool,
    stats: Mutex<RetryStats>,
    ops: Mutex<Vec<OperationRecord>>,
    closed: AtomicBool,
}

impl HttpTransport {
    /// Builds a transport from a configuration and a token source.
    ///
    /// Fails on a malformed base URL or when the underlying HTTP client
    /// cannot be constructed. No network activity happens here.
    pub fn new(config: TransportConfig, token_source: TokenSource) -> Result<Self> {
        url::Url::parse(&config.base_url)?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let http = reqwest::Client::builder()
            .user_agent(format!("fortiztp-rs/{}", crate::VERSION))
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .danger_accept_invalid_certs(!config.verify)
            .build()?;

        Ok(Self {
            http,
            base_url,
            token_source,
            read_only: config.read_only,
            track_operations: config.track_operations,
            stats: Mutex::new(RetryStats::default()),
            ops: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        })
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn record_operation(
        &self,
        method: Method,
        path: &str,
        data: Option<&Value>,
        status_code: Option<u16>,
        simulated: bool,
    ) {
        if !self.track_operations {
            return;
        }
        let mut ops = self.ops.lock().expect("operation log lock poisoned");
        ops.push(OperationRecord {
            timestamp: Utc::now(),
            method: method.as_str().to_string(),
            path: path.to_string(),
            data: data.cloned(),
            status_code,
            simulated,
        });
    }

    fn count_request(&self, succeeded: bool) {
        let mut stats = self.stats.lock().expect("stats lock poisoned");
        stats.total_requests += 1;
        if succeeded {
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }
    }

    fn simulate(&self, request: &EndpointRequest, meta: RequestMeta) -> TransportResponse {
        tracing::debug!(method = %request.method, path = %request.path, "read-only mode: simulating write");
        self.record_operation(request.method, &request.path, request.body.as_ref(), None, true);
        self.count_request(true);

        TransportResponse {
            payload: json!({
                "status": "success",
                "simulated": true,
                "message": format!("{} {} simulated (read-only mode)", request.method, request.path),
            }),
            status_code: 200,
            elapsed: 0.0,
            request_meta: meta,
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: EndpointRequest) -> Result<TransportResponse> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::Config("transport is closed".to_string()));
        }

        let token = self.token_source.ensure_valid().await?;
        let url = format!("{}{}", self.base_url, request.path);
        let meta = RequestMeta {
            method: request.method.as_str().to_string(),
            url: url.clone(),
            params: request.query.clone(),
            data: request.body.clone(),
        };

        if self.read_only && request.method.is_write() {
            return Ok(self.simulate(&request, meta));
        }

        tracing::debug!(method = %request.method, url = %url, "issuing request");

        let mut builder = self
            .http
            .request(request.method.into(), &url)
            .bearer_auth(token);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(source) => {
                self.count_request(false);
                self.record_operation(
                    request.method,
                    &request.path,
                    request.body.as_ref(),
                    None,
                    false,
                );
                return Err(source.into());
            }
        };

        let status = response.status().as_u16();
        let text = response.text().await?;
        let elapsed = started.elapsed().as_secs_f64();

        self.record_operation(
            request.method,
            &request.path,
            request.body.as_ref(),
            Some(status),
            false,
        );

        if !(200..300).contains(&status) {
            self.count_request(false);
            tracing::debug!(method = %request.method, url = %url, status, "request failed");
            return Err(Error::Api { status, body: text });
        }

        self.count_request(true);
        tracing::debug!(method = %request.method, url = %url, status, elapsed, "request completed");

        // Script content endpoints can answer with raw text; keep it as a
        // JSON string so the envelope stays uniform.
        let payload = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(TransportResponse {
            payload,
            status_code: status,
            elapsed,
            request_meta: meta,
        })
    }

    async fn get_token(&self) -> Result<String> {
        self.token_source.current().await
    }

    async fn ensure_token_valid(&self) -> Result<String> {
        self.token_source.ensure_valid().await
    }

    fn retry_stats(&self) -> RetryStats {
        self.stats.lock().expect("stats lock poisoned").clone()
    }

    fn operations(&self) -> Vec<OperationRecord> {
        self.ops.lock().expect("operation log lock poisoned").clone()
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(config: TransportConfig) -> HttpTransport {
        HttpTransport::new(config, TokenSource::Static("test-token".to_string())).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let t = transport(TransportConfig {
            base_url: "https://fortiztp.forticloud.com/public/api/".to_string(),
            ..Default::default()
        });
        assert_eq!(t.base_url(), "https://fortiztp.forticloud.com/public/api");
    }

    #[test]
    fn test_malformed_base_url_is_rejected() {
        let result = HttpTransport::new(
            TransportConfig {
                base_url: "::not-a-url::".to_string(),
                ..Default::default()
            },
            TokenSource::Static("t".to_string()),
        );
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_closed_transport_rejects_requests() {
        let t = transport(TransportConfig::default());
        t.close();
        let result = t.execute(EndpointRequest::get("/v2/system")).await;
        assert!(matches!(result, Err(Error::Config(_))));
        // Closing twice is a no-op.
        t.close();
    }

    #[tokio::test]
    async fn test_read_only_simulates_writes_without_network() {
        let t = transport(TransportConfig {
            // Unroutable base URL: a real request attempt would fail, a
            // simulated one succeeds without touching it.
            base_url: "https://fortiztp.invalid".to_string(),
            read_only: true,
            track_operations: true,
            ..Default::default()
        });

        let response = t
            .execute(
                EndpointRequest::put("/v2/devices/FG1").body_field("deviceSN", json!("FG1")),
            )
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.payload["simulated"], json!(true));

        let ops = t.operations();
        assert_eq!(ops.len(), 1);
        assert!(ops[0].simulated);
        assert_eq!(ops[0].method, "PUT");
        assert_eq!(ops[0].path, "/v2/devices/FG1");
        assert_eq!(ops[0].data, Some(json!({"deviceSN": "FG1"})));

        let stats = t.retry_stats();
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.successful_requests, 1);
        assert_eq!(stats.total_retries, 0);
    }

    #[tokio::test]
    async fn test_read_only_does_not_simulate_reads() {
        // GET under read-only mode still goes to the network; against an
        // unroutable host that is a network error, not a simulation.
        let t = transport(TransportConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            read_only: true,
            connect_timeout: Duration::from_millis(200),
            read_timeout: Duration::from_millis(500),
            ..Default::default()
        });
        let result = t.execute(EndpointRequest::get("/v2/system")).await;
        assert!(matches!(result, Err(Error::Network(_))));
        assert_eq!(t.retry_stats().failed_requests, 1);
    }
}
