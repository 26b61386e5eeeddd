//
//  fortiztp
//  api/devices.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! Device provisioning endpoints.
//!
//! Devices are identified by serial number. Listing supports server-side
//! filters; provisioning and unprovisioning are expressed as a PUT of the
//! desired provision status, either per device or in bulk.
//!
//! # Example
//!
//! ```rust,no_run
//! use fortiztp::api::DeviceListFilter;
//! use fortiztp::types::ProvisionStatus;
//!
//! # async fn example(client: fortiztp::FortiZtp) -> fortiztp::Result<()> {
//! let response = client
//!     .devices()
//!     .list(DeviceListFilter {
//!         provision_status: Some(ProvisionStatus::Provisioned),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{} devices", response.attr("total").unwrap());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde_json::json;

use crate::envelope::ResponseEnvelope;
use crate::error::Result;
use crate::transport::{EndpointRequest, Transport};
use crate::types::{DeviceProvisionRequest, DeviceType, ProvisionStatus, ProvisionTarget};

/// Server-side filters for [`DevicesApi::list`].
///
/// Only explicitly set filters appear in the query string; a default filter
/// produces an unfiltered listing with an empty query.
#[derive(Debug, Clone, Default)]
pub struct DeviceListFilter {
    /// Filter by provision status.
    pub provision_status: Option<ProvisionStatus>,
    /// Filter by device family.
    pub device_type: Option<DeviceType>,
    /// Filter by serial number(s), comma-separated for multiple.
    pub device_sn: Option<String>,
    /// Serve cached data when available. `Some(false)` is sent explicitly.
    pub use_cache: Option<bool>,
}

/// Optional body fields for [`DevicesApi::put`].
///
/// Omitted fields are absent from the request body entirely. The API
/// distinguishes "not supplied" from `null`.
#[derive(Debug, Clone, Default)]
pub struct DeviceUpdateOptions {
    /// Target system for provisioning.
    pub provision_target: Option<ProvisionTarget>,
    /// Region for cloud targets. Not needed for FortiManager,
    /// FortiManagerCloud, or ExternalController.
    pub region: Option<String>,
    /// FortiManager serial number, for FortiManager provisioning only.
    pub external_controller_sn: Option<String>,
    /// FQDN/IP for the FortiManager or AP external controller.
    pub external_controller_ip: Option<String>,
    /// VM platform (e.g. `FortiGate-VM64-KVM`); required for FortiGate VM
    /// to FortiManagerCloud.
    pub platform: Option<String>,
    /// Firmware profile name created in FortiGate Cloud.
    pub firmware_profile: Option<String>,
    /// FortiManager object ID; preferred over the serial/IP pair.
    pub forti_manager_oid: Option<i64>,
    /// Pre-run script object ID for FortiManager provisioning.
    pub script_oid: Option<i64>,
    /// Use the FortiManager's default pre-run script.
    pub use_default_script: Option<bool>,
    /// Unix timestamp when provisioning started.
    pub provisioning_timestamp: Option<i64>,
    /// Unix timestamp when provisioning completed.
    pub provisioning_complete_timestamp: Option<i64>,
}

/// Devices endpoint group.
///
/// Obtained from [`FortiZtp::devices`](crate::FortiZtp::devices); all
/// groups share the client's transport handle.
#[derive(Clone)]
pub struct DevicesApi {
    transport: Arc<dyn Transport>,
}

impl DevicesApi {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Retrieves the provisioning status of devices registered in the
    /// account.
    ///
    /// `GET /v2/devices`
    pub async fn list(&self, filter: DeviceListFilter) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::get("/v2/devices")
            .query_opt("provisionStatus", filter.provision_status)
            .query_opt("deviceType", filter.device_type)
            .query_opt("deviceSN", filter.device_sn)
            .query_opt("useCache", filter.use_cache);

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Provisions or unprovisions multiple devices in a single request.
    ///
    /// `PUT /v2/devices` with a JSON array body.
    pub async fn bulk_provision(
        &self,
        devices: Vec<DeviceProvisionRequest>,
    ) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::put("/v2/devices").body_json(json!(devices));

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Retrieves the provisioning status of one device.
    ///
    /// `GET /v2/devices/{deviceSN}`
    pub async fn get(&self, device_sn: &str, use_cache: Option<bool>) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::get(format!("/v2/devices/{device_sn}"))
            .query_opt("useCache", use_cache);

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Provisions or unprovisions a single device: set `provision_status`
    /// to [`Provisioned`](ProvisionStatus::Provisioned) to provision,
    /// [`Unprovisioned`](ProvisionStatus::Unprovisioned) to unprovision.
    ///
    /// `PUT /v2/devices/{deviceSN}`
    pub async fn put(
        &self,
        device_sn: &str,
        device_type: DeviceType,
        provision_status: ProvisionStatus,
        options: DeviceUpdateOptions,
    ) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::put(format!("/v2/devices/{device_sn}"))
            .body_field("deviceSN", json!(device_sn))
            .body_field("deviceType", json!(device_type))
            .body_field("provisionStatus", json!(provision_status))
            .body_field_opt("provisionTarget", options.provision_target.map(|v| json!(v)))
            .body_field_opt("region", options.region.map(|v| json!(v)))
            .body_field_opt(
                "externalControllerSn",
                options.external_controller_sn.map(|v| json!(v)),
            )
            .body_field_opt(
                "externalControllerIp",
                options.external_controller_ip.map(|v| json!(v)),
            )
            .body_field_opt("platform", options.platform.map(|v| json!(v)))
            .body_field_opt("firmwareProfile", options.firmware_profile.map(|v| json!(v)))
            .body_field_opt("fortiManagerOid", options.forti_manager_oid.map(|v| json!(v)))
            .body_field_opt("scriptOid", options.script_oid.map(|v| json!(v)))
            .body_field_opt("useDefaultScript", options.use_default_script.map(|v| json!(v)))
            .body_field_opt(
                "provisioningTimestamp",
                options.provisioning_timestamp.map(|v| json!(v)),
            )
            .body_field_opt(
                "provisioningCompleteTimestamp",
                options.provisioning_complete_timestamp.map(|v| json!(v)),
            );

        Ok(self.transport.execute(request).await?.into_envelope())
    }

    /// Retrieves the firmware profiles available for one device in a
    /// region.
    ///
    /// `GET /v2/devices/{deviceSN}/regions/{region}/firmwareprofiles`
    pub async fn firmware_profiles(
        &self,
        device_sn: &str,
        region: &str,
    ) -> Result<ResponseEnvelope> {
        let request = EndpointRequest::get(format!(
            "/v2/devices/{device_sn}/regions/{region}/firmwareprofiles"
        ));

        Ok(self.transport.execute(request).await?.into_envelope())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::RecordingTransport;
    use crate::error::Error;
    use crate::transport::Method;

    #[tokio::test]
    async fn test_list_without_filters_has_empty_query() {
        let transport = Arc::new(RecordingTransport::returning(json!({"total": 0})));
        let api = DevicesApi::new(transport.clone());

        api.list(DeviceListFilter::default()).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/v2/devices");
        assert!(request.query.is_empty());
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_list_includes_only_supplied_filters() {
        let transport = Arc::new(RecordingTransport::returning(json!({"total": 0})));
        let api = DevicesApi::new(transport.clone());

        api.list(DeviceListFilter {
            provision_status: Some(ProvisionStatus::Provisioned),
            use_cache: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(
            transport.last_request().query,
            vec![
                ("provisionStatus".to_string(), "provisioned".to_string()),
                ("useCache".to_string(), "false".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_substitutes_serial_and_wraps_payload() {
        let transport = Arc::new(RecordingTransport::returning(json!({
            "deviceSN": "FG123",
            "provisionStatus": "provisioned",
        })));
        let api = DevicesApi::new(transport.clone());

        let envelope = api.get("FG123", None).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.path, "/v2/devices/FG123");
        assert!(request.query.is_empty());
        assert_eq!(envelope.attr("provisionStatus").unwrap(), "provisioned");
        assert_eq!(envelope["deviceSN"], "FG123");
        assert_eq!(envelope.status_code(), Some(200));
    }

    #[tokio::test]
    async fn test_put_builds_camel_case_body_without_omitted_options() {
        let transport = Arc::new(RecordingTransport::returning(json!({})));
        let api = DevicesApi::new(transport.clone());

        api.put(
            "FG123",
            DeviceType::FortiGate,
            ProvisionStatus::Provisioned,
            DeviceUpdateOptions {
                provision_target: Some(ProvisionTarget::FortiManager),
                forti_manager_oid: Some(12345),
                use_default_script: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/v2/devices/FG123");
        assert_eq!(
            request.body,
            Some(json!({
                "deviceSN": "FG123",
                "deviceType": "FortiGate",
                "provisionStatus": "provisioned",
                "provisionTarget": "FortiManager",
                "fortiManagerOid": 12345,
                "useDefaultScript": false,
            }))
        );
    }

    #[tokio::test]
    async fn test_bulk_provision_sends_array_body() {
        let transport = Arc::new(RecordingTransport::returning(json!({})));
        let api = DevicesApi::new(transport.clone());

        api.bulk_provision(vec![
            DeviceProvisionRequest::new("FG1", DeviceType::FortiGate, ProvisionStatus::Provisioned),
            DeviceProvisionRequest::new(
                "FG2",
                DeviceType::FortiGate,
                ProvisionStatus::Unprovisioned,
            ),
        ])
        .await
        .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.path, "/v2/devices");
        let body = request.body.unwrap();
        assert!(body.is_array());
        assert_eq!(body[0]["deviceSN"], "FG1");
        assert_eq!(body[1]["provisionStatus"], "unprovisioned");
    }

    #[tokio::test]
    async fn test_firmware_profiles_path() {
        let transport = Arc::new(RecordingTransport::returning(json!({})));
        let api = DevicesApi::new(transport.clone());

        api.firmware_profiles("FG123", "us-west-1").await.unwrap();

        assert_eq!(
            transport.last_request().path,
            "/v2/devices/FG123/regions/us-west-1/firmwareprofiles"
        );
    }

    #[tokio::test]
    async fn test_transport_errors_pass_through_unchanged() {
        let transport = Arc::new(RecordingTransport::failing(Error::Api {
            status: 404,
            body: r#"{"error":"not_found"}"#.to_string(),
        }));
        let api = DevicesApi::new(transport);

        let err = api.get("MISSING", None).await.unwrap_err();
        match err {
            Error::Api { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"error":"not_found"}"#);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
