//
//  fortiztp
//  api/fortimanagers.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! FortiManager integration endpoints.
//!
//! FortiManager settings are identified by an integer object ID (`oid`).
//! HA pairs are expressed as comma-separated serials/addresses in `sn` and
//! `ip`; a dual serial with a single address is valid for FortiManager 7.2
//! HA.

use std::sync::Arc;

use serde_json::json;

use crate::envelope::ResponseEnvelope;
use crate::error::Result;
use crate::transport::{EndpointRequest, Transport};

/// FortiManagers endpoint group.
///
/// Obtained from [`FortiZtp::fortimanagers`](crate::FortiZtp::fortimanagers).
#[derive(Clone)]
pub struct FortiManagersApi {
    transport: Arc<dyn Transport>,
}

impl FortiManagersApi {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Retrieves one FortiManager record.
    ///
    /// `GET /v2/setting/fortimanagers/{oid}`
    pub async fn fortimanagers_get(&self, oid: i64) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::get(format!("/v2/setting/fortimanagers/{oid}"));

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Updates one FortiManager record.
    ///
    /// `PUT /v2/setting/fortimanagers/{oid}`
    pub async fn fortimanagers_put(
        &self,
        oid: i64,
        sn: &str,
        ip: &str,
        script_oid: Option<i64>,
        update_time: Option<i64>,
    ) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::put(format!("/v2/setting/fortimanagers/{oid}"))
            .body_field("oid", json!(oid))
            .body_field("sn", json!(sn))
            .body_field("ip", json!(ip))
            .body_field_opt("scriptOid", script_oid.map(|v| json!(v)))
            .body_field_opt("updateTime", update_time.map(|v| json!(v)));

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Deletes one FortiManager record.
    ///
    /// `DELETE /v2/setting/fortimanagers/{oid}`
    pub async fn fortimanagers_delete(&self, oid: i64) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::delete(format!("/v2/setting/fortimanagers/{oid}"));

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Retrieves all FortiManager records.
    ///
    /// `GET /v2/setting/fortimanagers`
    pub async fn fortimanagers_list(&self) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::get("/v2/setting/fortimanagers");

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Creates a FortiManager record. The `oid` is assigned by the server
    /// unless supplied.
    ///
    /// `POST /v2/setting/fortimanagers`
    pub async fn fortimanagers_post(
        &self,
        sn: &str,
        ip: &str,
        oid: Option<i64>,
        script_oid: Option<i64>,
        update_time: Option<i64>,
    ) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::post("/v2/setting/fortimanagers")
            .body_field_opt("oid", oid.map(|v| json!(v)))
            .body_field("sn", json!(sn))
            .body_field("ip", json!(ip))
            .body_field_opt("scriptOid", script_oid.map(|v| json!(v)))
            .body_field_opt("updateTime", update_time.map(|v| json!(v)));

        Ok(self.transport.execute(request).await?.into_envelope())
    }
}
