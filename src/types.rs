//
//  fortiztp
//  types.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! Wire vocabulary for the FortiZTP Cloud API v2.
//!
//! Enum values and record shapes here mirror the API schema exactly:
//! camelCase field names and the precise literal strings the service
//! accepts. The serde renames are part of wire compatibility, not style.
//!
//! Endpoint methods return an untyped
//! [`ResponseEnvelope`](crate::ResponseEnvelope); the records in this module
//! are the optional typed layer on top, via
//! [`ResponseEnvelope::decode`](crate::ResponseEnvelope::decode):
//!
//! ```rust,no_run
//! use fortiztp::types::DevicePage;
//!
//! # async fn example(client: fortiztp::FortiZtp) -> Result<(), Box<dyn std::error::Error>> {
//! let page: DevicePage = client.devices().list(Default::default()).await?.decode()?;
//! println!("{} devices", page.total.unwrap_or(0));
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Enum-like wire values
// ============================================================================

/// Device families that can be provisioned through FortiZTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceType {
    /// FortiGate firewall (hardware or VM).
    FortiGate,
    /// FortiAP wireless access point.
    FortiAP,
    /// FortiSwitch.
    FortiSwitch,
    /// FortiExtender LTE/5G gateway.
    FortiExtender,
}

impl DeviceType {
    /// The exact wire literal for this device type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FortiGate => "FortiGate",
            Self::FortiAP => "FortiAP",
            Self::FortiSwitch => "FortiSwitch",
            Self::FortiExtender => "FortiExtender",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device provision status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvisionStatus {
    /// Device is provisioned to a target.
    Provisioned,
    /// Device is registered but not provisioned.
    Unprovisioned,
    /// Device is hidden from the provisioning view.
    Hidden,
    /// Provisioning was started but has not completed.
    Incomplete,
}

impl ProvisionStatus {
    /// The exact wire literal for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provisioned => "provisioned",
            Self::Unprovisioned => "unprovisioned",
            Self::Hidden => "hidden",
            Self::Incomplete => "incomplete",
        }
    }
}

impl fmt::Display for ProvisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-status reported while provisioning is incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvisionSubStatus {
    /// Waiting for the device to call home.
    Waiting,
    /// Provisioning in progress.
    Provisioning,
    /// Provisioning has taken longer than expected.
    #[serde(rename = "provisioningtoolong")]
    ProvisioningTooLong,
}

/// Target system a device is provisioned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisionTarget {
    /// On-premise or cloud-hosted FortiManager.
    FortiManager,
    /// FortiGate Cloud.
    FortiGateCloud,
    /// FortiEdge Cloud (FortiAP management).
    FortiEdgeCloud,
    /// Third-party external controller.
    ExternalController,
}

impl ProvisionTarget {
    /// The exact wire literal for this target.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FortiManager => "FortiManager",
            Self::FortiGateCloud => "FortiGateCloud",
            Self::FortiEdgeCloud => "FortiEdgeCloud",
            Self::ExternalController => "ExternalController",
        }
    }
}

impl fmt::Display for ProvisionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// FortiZTP service health values reported by the system endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    /// All systems operational.
    Operational,
    /// Service responding but degraded.
    #[serde(rename = "Degraded performance")]
    DegradedPerformance,
    /// Some functionality unavailable.
    #[serde(rename = "Partial outage")]
    PartialOutage,
    /// Service unavailable.
    #[serde(rename = "Major outage")]
    MajorOutage,
}

// ============================================================================
// Device records
// ============================================================================

/// Device provisioning record as returned by the devices endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceData {
    /// Device serial number.
    #[serde(rename = "deviceSN")]
    pub device_sn: String,

    /// Device family.
    #[serde(rename = "deviceType")]
    pub device_type: DeviceType,

    /// Current provision status.
    #[serde(rename = "provisionStatus")]
    pub provision_status: ProvisionStatus,

    /// Target system for provisioning.
    #[serde(rename = "provisionTarget", default, skip_serializing_if = "Option::is_none")]
    pub provision_target: Option<ProvisionTarget>,

    /// Region for cloud targets. Not used for FortiManager or
    /// ExternalController provisioning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// FortiManager serial number, for FortiManager provisioning.
    #[serde(rename = "externalControllerSn", default, skip_serializing_if = "Option::is_none")]
    pub external_controller_sn: Option<String>,

    /// FQDN or IP of the FortiManager / external controller.
    #[serde(rename = "externalControllerIp", default, skip_serializing_if = "Option::is_none")]
    pub external_controller_ip: Option<String>,

    /// VM platform (e.g. `FortiGate-VM64-KVM`). Required when provisioning
    /// a FortiGate VM to FortiManager Cloud.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Firmware profile name created in FortiGate Cloud.
    #[serde(rename = "firmwareProfile", default, skip_serializing_if = "Option::is_none")]
    pub firmware_profile: Option<String>,

    /// FortiManager object ID. Preferred over the serial/IP pair.
    #[serde(rename = "fortiManagerOid", default, skip_serializing_if = "Option::is_none")]
    pub forti_manager_oid: Option<i64>,

    /// Pre-run script object ID for FortiManager provisioning.
    #[serde(rename = "scriptOid", default, skip_serializing_if = "Option::is_none")]
    pub script_oid: Option<i64>,

    /// Use the FortiManager's default pre-run script.
    #[serde(rename = "useDefaultScript", default, skip_serializing_if = "Option::is_none")]
    pub use_default_script: Option<bool>,

    /// Unix timestamp when provisioning started.
    #[serde(rename = "provisioningTimestamp", default, skip_serializing_if = "Option::is_none")]
    pub provisioning_timestamp: Option<i64>,

    /// Unix timestamp when provisioning completed.
    #[serde(
        rename = "provisioningCompleteTimestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub provisioning_complete_timestamp: Option<i64>,

    /// Sub-status while provisioning is incomplete.
    #[serde(rename = "provisionSubStatus", default, skip_serializing_if = "Option::is_none")]
    pub provision_sub_status: Option<ProvisionSubStatus>,

    /// Human-readable description of the sub-status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Paginated device list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicePage {
    /// Total number of matching devices.
    #[serde(default)]
    pub total: Option<u64>,

    /// Device records for this page.
    #[serde(default)]
    pub data: Option<Vec<DeviceData>>,

    /// Whether the response was served from cache.
    #[serde(rename = "hasCache", default)]
    pub has_cache: Option<bool>,
}

// ============================================================================
// Script records
// ============================================================================

/// Pre-run CLI script metadata (content lives behind a separate endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptMeta {
    /// Script object ID.
    pub oid: i64,

    /// Script name.
    pub name: String,

    /// Update time in milliseconds since the Unix epoch (UTC).
    #[serde(rename = "updateTime", default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
}

/// Paginated script metadata response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptPage {
    /// Total number of scripts.
    #[serde(default)]
    pub total: Option<u64>,

    /// Script metadata records.
    #[serde(default)]
    pub data: Option<Vec<ScriptMeta>>,
}

// ============================================================================
// FortiManager records
// ============================================================================

/// FortiManager integration record.
///
/// HA pairs are expressed as comma-separated serials/addresses; a dual
/// serial with a single address is valid for FortiManager 7.2 HA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortiManagerMeta {
    /// FortiManager setting object ID.
    pub oid: i64,

    /// FortiManager serial number(s), comma-separated for HA.
    pub sn: String,

    /// FortiManager IP or hostname(s), comma-separated for HA.
    pub ip: String,

    /// Pre-run CLI script object ID.
    #[serde(rename = "scriptOid", default, skip_serializing_if = "Option::is_none")]
    pub script_oid: Option<i64>,

    /// Update time in milliseconds since the Unix epoch (UTC).
    #[serde(rename = "updateTime", default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
}

/// Paginated FortiManager response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortiManagerPage {
    /// Total number of FortiManager records.
    #[serde(default)]
    pub total: Option<u64>,

    /// FortiManager records.
    #[serde(default)]
    pub data: Option<Vec<FortiManagerMeta>>,
}

// ============================================================================
// System records
// ============================================================================

/// Service status reported by `GET /v2/system`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemData {
    /// Service name (e.g. `FortiZTP`).
    #[serde(rename = "serviceName", default)]
    pub service_name: Option<String>,

    /// Service region.
    #[serde(rename = "serviceRegion", default)]
    pub service_region: Option<String>,

    /// Current service health.
    #[serde(rename = "serviceStatus", default)]
    pub service_status: Option<ServiceStatus>,

    /// Server timestamp, ISO 8601.
    #[serde(rename = "serverTime", default)]
    pub server_time: Option<String>,
}

// ============================================================================
// Error body
// ============================================================================

/// Error body returned with non-2xx responses (401, 403, 404, 500).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Error code.
    #[serde(default)]
    pub error: Option<String>,

    /// Human-readable error description.
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Per-device entry for the bulk provision/unprovision operation
/// (`PUT /v2/devices` with a JSON array body).
///
/// Arbitrary extra schema fields can be attached through
/// [`extra`](Self::extra); they are flattened into the serialized object.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceProvisionRequest {
    /// Device serial number.
    #[serde(rename = "deviceSN")]
    pub device_sn: String,

    /// Device family.
    #[serde(rename = "deviceType")]
    pub device_type: DeviceType,

    /// `Provisioned` to provision, `Unprovisioned` to unprovision.
    #[serde(rename = "provisionStatus")]
    pub provision_status: ProvisionStatus,

    /// Target system for provisioning.
    #[serde(rename = "provisionTarget", skip_serializing_if = "Option::is_none")]
    pub provision_target: Option<ProvisionTarget>,

    /// Additional camelCase body fields, flattened into the entry. An
    /// empty map contributes nothing to the serialized object.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl DeviceProvisionRequest {
    /// Creates a bulk entry with the required fields only.
    pub fn new(
        device_sn: impl Into<String>,
        device_type: DeviceType,
        provision_status: ProvisionStatus,
    ) -> Self {
        Self {
            device_sn: device_sn.into(),
            device_type,
            provision_status,
            provision_target: None,
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_wire_literals() {
        assert_eq!(serde_json::to_value(DeviceType::FortiGate).unwrap(), json!("FortiGate"));
        assert_eq!(
            serde_json::to_value(ProvisionStatus::Unprovisioned).unwrap(),
            json!("unprovisioned")
        );
        assert_eq!(
            serde_json::to_value(ProvisionSubStatus::ProvisioningTooLong).unwrap(),
            json!("provisioningtoolong")
        );
        assert_eq!(
            serde_json::to_value(ServiceStatus::DegradedPerformance).unwrap(),
            json!("Degraded performance")
        );
        assert_eq!(ProvisionTarget::FortiGateCloud.as_str(), "FortiGateCloud");
    }

    #[test]
    fn test_device_data_round_trip_field_names() {
        let device: DeviceData = serde_json::from_value(json!({
            "deviceSN": "FG123456789",
            "deviceType": "FortiGate",
            "provisionStatus": "provisioned",
            "fortiManagerOid": 12345,
            "useDefaultScript": false,
        }))
        .unwrap();
        assert_eq!(device.device_sn, "FG123456789");
        assert_eq!(device.forti_manager_oid, Some(12345));
        assert_eq!(device.use_default_script, Some(false));

        let value = serde_json::to_value(&device).unwrap();
        assert_eq!(value["deviceSN"], "FG123456789");
        assert_eq!(value["fortiManagerOid"], 12345);
        // Omitted optionals must not serialize at all.
        assert!(value.get("scriptOid").is_none());
        assert!(value.get("region").is_none());
    }

    #[test]
    fn test_bulk_request_serializes_required_fields_only() {
        let entry = DeviceProvisionRequest::new(
            "FG1",
            DeviceType::FortiGate,
            ProvisionStatus::Unprovisioned,
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "deviceSN": "FG1",
                "deviceType": "FortiGate",
                "provisionStatus": "unprovisioned",
            })
        );
    }
}
