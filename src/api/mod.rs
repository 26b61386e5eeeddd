//
//  fortiztp
//  api/mod.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! FortiZTP Cloud API v2 endpoint groups.
//!
//! One module per REST resource family, each exposing a thin handle over
//! the shared transport:
//!
//! - [`devices`]: device provisioning status, single and bulk
//!   provision/unprovision, firmware profiles
//! - [`scripts`]: pre-run CLI script metadata and content
//! - [`fortimanagers`]: FortiManager integration settings
//! - [`system`]: service status
//!
//! Every method follows the same shape: build an
//! [`EndpointRequest`](crate::transport::EndpointRequest) with the wire
//! (camelCase) parameter names, delegate to the transport, wrap the outcome
//! in a [`ResponseEnvelope`](crate::ResponseEnvelope). Transport failures
//! propagate unchanged; the endpoint layer never retries or reinterprets
//! them.

pub mod devices;
pub mod fortimanagers;
pub mod scripts;
pub mod system;

pub use devices::{DeviceListFilter, DeviceUpdateOptions, DevicesApi};
pub use fortimanagers::FortiManagersApi;
pub use scripts::ScriptsApi;
pub use system::SystemApi;

/// Recording transport for endpoint-group tests: captures the request each
/// method builds and answers with a canned payload.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::error::{Error, Result};
    use crate::transport::{
        EndpointRequest, OperationRecord, RequestMeta, RetryStats, Transport, TransportResponse,
    };

    pub(crate) struct RecordingTransport {
        pub requests: Mutex<Vec<EndpointRequest>>,
        pub payload: Value,
        pub fail_with: Mutex<Option<Error>>,
    }

    impl RecordingTransport {
        pub fn returning(payload: Value) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                payload,
                fail_with: Mutex::new(None),
            }
        }

        pub fn failing(error: Error) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                payload: json!({}),
                fail_with: Mutex::new(Some(error)),
            }
        }

        pub fn last_request(&self) -> EndpointRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn execute(&self, request: EndpointRequest) -> Result<TransportResponse> {
            let meta = RequestMeta {
                method: request.method.as_str().to_string(),
                url: format!("https://fortiztp.test{}", request.path),
                params: request.query.clone(),
                data: request.body.clone(),
            };
            self.requests.lock().unwrap().push(request);

            if let Some(error) = self.fail_with.lock().unwrap().take() {
                return Err(error);
            }

            Ok(TransportResponse {
                payload: self.payload.clone(),
                status_code: 200,
                elapsed: 0.010,
                request_meta: meta,
            })
        }

        async fn get_token(&self) -> Result<String> {
            Ok("test-token".to_string())
        }

        async fn ensure_token_valid(&self) -> Result<String> {
            Ok("test-token".to_string())
        }

        fn retry_stats(&self) -> RetryStats {
            RetryStats::default()
        }

        fn operations(&self) -> Vec<OperationRecord> {
            Vec::new()
        }

        fn close(&self) {}
    }
}
