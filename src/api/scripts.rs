//
//  fortiztp
//  api/scripts.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! Pre-run CLI script endpoints.
//!
//! Scripts are identified by an integer object ID (`oid`). Metadata (oid,
//! name, update time) and content live behind separate endpoints.

use std::sync::Arc;

use serde_json::json;

use crate::envelope::ResponseEnvelope;
use crate::error::Result;
use crate::transport::{EndpointRequest, Transport};

/// Scripts endpoint group.
///
/// Obtained from [`FortiZtp::scripts`](crate::FortiZtp::scripts).
#[derive(Clone)]
pub struct ScriptsApi {
    transport: Arc<dyn Transport>,
}

impl ScriptsApi {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Retrieves metadata for one script.
    ///
    /// `GET /v2/setting/scripts/{oid}`
    pub async fn scripts_get(&self, oid: i64) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::get(format!("/v2/setting/scripts/{oid}"));

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Updates metadata for one script.
    ///
    /// `PUT /v2/setting/scripts/{oid}`
    pub async fn scripts_put(
        &self,
        oid: i64,
        name: &str,
        update_time: Option<i64>,
    ) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::put(format!("/v2/setting/scripts/{oid}"))
            .body_field("oid", json!(oid))
            .body_field("name", json!(name))
            .body_field_opt("updateTime", update_time.map(|v| json!(v)));

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Deletes a script.
    ///
    /// `DELETE /v2/setting/scripts/{oid}`
    pub async fn scripts_delete(&self, oid: i64) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::delete(format!("/v2/setting/scripts/{oid}"));

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Retrieves metadata for all scripts.
    ///
    /// `GET /v2/setting/scripts`
    pub async fn scripts_list(&self) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::get("/v2/setting/scripts");

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Creates a script.
    ///
    /// `POST /v2/setting/scripts`
    pub async fn scripts_post(
        &self,
        oid: i64,
        name: &str,
        update_time: Option<i64>,
    ) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::post("/v2/setting/scripts")
            .body_field("oid", json!(oid))
            .body_field("name", json!(name))
            .body_field_opt("updateTime", update_time.map(|v| json!(v)));

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Retrieves the content of one script.
    ///
    /// `GET /v2/setting/scripts/{oid}/content`
    pub async fn scripts_get_content(&self, oid: i64) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::get(format!("/v2/setting/scripts/{oid}/content"));

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Triggers an update of one script's content.
    ///
    /// `PUT /v2/setting/scripts/{oid}/content`. The API takes no request
    /// body on this operation.
    pub async fn scripts_put_content(&self, oid: i64) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::put(format!("/v2/setting/scripts/{oid}/content"));

        Ok(self.transport.execute(request).await?.into_envelope())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::RecordingTransport;
    use crate::transport::Method;

    #[tokio::test]
    async fn test_metadata_crud_paths() {
        let transport = Arc::new(RecordingTransport::returning(json!({})));
        let api = ScriptsApi::new(transport.clone());

        api.scripts_list().await.unwrap();
        assert_eq!(transport.last_request().path, "/v2/setting/scripts");
        assert_eq!(transport.last_request().method, Method::Get);

        api.scripts_get(42).await.unwrap();
        assert_eq!(transport.last_request().path, "/v2/setting/scripts/42");

        api.scripts_delete(42).await.unwrap();
        assert_eq!(transport.last_request().method, Method::Delete);
        assert_eq!(transport.last_request().path, "/v2/setting/scripts/42");
    }

    #[tokio::test]
    async fn test_post_body_includes_update_time_only_when_supplied() {
        let transport = Arc::new(RecordingTransport::returning(json!({})));
        let api = ScriptsApi::new(transport.clone());

        api.scripts_post(7, "bootstrap", None).await.unwrap();
        assert_eq!(
            transport.last_request().body,
            Some(json!({"oid": 7, "name": "bootstrap"}))
        );

        api.scripts_put(7, "bootstrap", Some(1700000000000)).await.unwrap();
        assert_eq!(
            transport.last_request().body,
            Some(json!({"oid": 7, "name": "bootstrap", "updateTime": 1700000000000i64}))
        );
    }

    #[tokio::test]
    async fn test_content_endpoints() {
        let transport = Arc::new(RecordingTransport::returning(json!({})));
        let api = ScriptsApi::new(transport.clone());

        api.scripts_get_content(9).await.unwrap();
        assert_eq!(transport.last_request().path, "/v2/setting/scripts/9/content");
        assert_eq!(transport.last_request().method, Method::Get);

        api.scripts_put_content(9).await.unwrap();
        let request = transport.last_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/v2/setting/scripts/9/content");
        assert!(request.body.is_none());
    }
}
