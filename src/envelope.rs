//
//  fortiztp
//  envelope.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! Response envelope for FortiZTP API calls.
//!
//! Every endpoint method returns a [`ResponseEnvelope`]: the decoded JSON
//! payload of a completed HTTP exchange, plus the HTTP status code, the
//! request duration, and an echo of the request that produced it. The
//! envelope is immutable once built; every accessor is a pure read.
//!
//! # Access protocols
//!
//! The envelope supports two co-existing lookup protocols over the same
//! payload, with deliberately different failure behavior:
//!
//! - **Attribute-style** ([`attr`](ResponseEnvelope::attr)): mirrors field
//!   access on a typed object. Absent fields fail with
//!   [`EnvelopeError::FieldNotFound`], and names starting with the reserved
//!   `_` marker are unreachable through this protocol even when such a key
//!   exists in the payload.
//! - **Mapping-style** ([`get`](ResponseEnvelope::get)): mirrors dictionary
//!   indexing. Absent keys fail with [`EnvelopeError::KeyNotFound`], and
//!   there is no reserved-name exclusion: `get("_foo")` succeeds whenever
//!   `_foo` is a payload key, while `attr("_foo")` never does.
//!
//! Callers rely on both protocols interchangeably, so the asymmetry is part
//! of the contract, not an accident to be smoothed over.
//!
//! # Example
//!
//! ```rust
//! use fortiztp::ResponseEnvelope;
//! use serde_json::json;
//!
//! let envelope = ResponseEnvelope::new(json!({
//!     "total": 2,
//!     "data": [{"deviceSN": "FG1"}, {"deviceSN": "FG2"}],
//! }))
//! .with_status_code(200)
//! .with_elapsed(0.042);
//!
//! assert_eq!(envelope.attr("total").unwrap(), 2);
//! assert_eq!(envelope["total"], 2);
//! assert_eq!(envelope.field_or("missing", &serde_json::json!(0)), 0);
//! assert_eq!(envelope.to_string(), "<ResponseEnvelope(status=200, time=0.042s)>");
//! ```

use std::fmt;
use std::ops::Index;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::transport::RequestMeta;

/// Leading marker for names that attribute-style access treats as internal.
///
/// Payload keys beginning with this marker are reachable through
/// mapping-style access only.
pub const RESERVED_MARKER: char = '_';

/// Field-lookup errors for [`ResponseEnvelope`].
///
/// The two variants correspond to the two access protocols: attribute-style
/// lookups fail with [`FieldNotFound`](EnvelopeError::FieldNotFound),
/// mapping-style lookups fail with [`KeyNotFound`](EnvelopeError::KeyNotFound).
/// They carry the same information but are distinct kinds on purpose, so a
/// caller can tell which protocol produced the failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Attribute-style access to a field that is absent from the payload,
    /// or reserved (name begins with `_`).
    #[error("response has no field '{0}'")]
    FieldNotFound(String),

    /// Mapping-style access to a key that is absent from the payload.
    #[error("key '{0}' not found in response")]
    KeyNotFound(String),
}

/// Structured wrapper for FortiZTP API responses.
///
/// Wraps the response payload (a JSON object, keys in document order)
/// together with HTTP metadata. Created once per completed exchange by the
/// endpoint method that issued the request, never mutated afterwards.
///
/// # Reading data
///
/// | Accessor | Absent key | Reserved (`_`) key present |
/// |---|---|---|
/// | [`attr`](Self::attr) | `Err(FieldNotFound)` | `Err(FieldNotFound)` |
/// | [`get`](Self::get) | `Err(KeyNotFound)` | `Ok(value)` |
/// | [`field`](Self::field) | `None` | `Some(value)` |
/// | `envelope[key]` | panics | returns value |
///
/// [`contains`](Self::contains), [`keys`](Self::keys), and
/// [`len`](Self::len) all see the full payload with no exclusions.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    payload: Map<String, Value>,
    status_code: Option<u16>,
    elapsed: Option<f64>,
    request_meta: Option<RequestMeta>,
}

impl ResponseEnvelope {
    /// Creates an envelope from a response payload.
    ///
    /// The payload is normally a JSON object and is stored as-is. A non-object
    /// payload (the API answers some write operations with a bare array or
    /// scalar) is stored under a single `data` key so the mapping protocols
    /// stay total; `null` becomes an empty payload.
    pub fn new(payload: Value) -> Self {
        let payload = match payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        Self {
            payload,
            status_code: None,
            elapsed: None,
            request_meta: None,
        }
    }

    /// Attaches the HTTP status code of the exchange.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Attaches the request duration in seconds.
    pub fn with_elapsed(mut self, elapsed: f64) -> Self {
        self.elapsed = Some(elapsed);
        self
    }

    /// Attaches an echo of the request that produced this response.
    pub fn with_request_meta(mut self, meta: RequestMeta) -> Self {
        self.request_meta = Some(meta);
        self
    }

    // ------------------------------------------------------------------
    // Metadata accessors
    // ------------------------------------------------------------------

    /// HTTP status code (200, 404, 500, ...), when known.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Request duration in seconds, when known.
    pub fn elapsed(&self) -> Option<f64> {
        self.elapsed
    }

    /// Read-only view of the full response payload.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Owned copy of the payload, for callers that want a plain map rather
    /// than the envelope type.
    pub fn to_map(&self) -> Map<String, Value> {
        self.payload.clone()
    }

    /// Echo of the request that produced this response (method, URL, query
    /// parameters, body), when the transport supplied one.
    pub fn request_meta(&self) -> Option<&RequestMeta> {
        self.request_meta.as_ref()
    }

    /// HTTP method of the originating request (`GET`, `PUT`, ...).
    pub fn request_method(&self) -> Option<&str> {
        self.request_meta.as_ref().map(|m| m.method.as_str())
    }

    /// Full URL of the originating request.
    pub fn request_url(&self) -> Option<&str> {
        self.request_meta.as_ref().map(|m| m.url.as_str())
    }

    /// Query parameters sent with the originating request.
    pub fn request_params(&self) -> Option<&[(String, String)]> {
        self.request_meta.as_ref().map(|m| m.params.as_slice())
    }

    /// Body sent with the originating request.
    pub fn request_data(&self) -> Option<&Value> {
        self.request_meta.as_ref().and_then(|m| m.data.as_ref())
    }

    // ------------------------------------------------------------------
    // Payload access
    // ------------------------------------------------------------------

    /// Total field lookup: the value if present, `None` otherwise. Never
    /// fails and applies no reserved-name exclusion.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    /// Total field lookup with a fallback default.
    pub fn field_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.payload.get(name).unwrap_or(default)
    }

    /// Attribute-style field access.
    ///
    /// Returns the payload value for `name`, or
    /// [`EnvelopeError::FieldNotFound`] when the field is absent. Names
    /// beginning with the reserved `_` marker always fail with
    /// `FieldNotFound`, even when such a key exists in the payload; those
    /// keys are reachable through [`get`](Self::get) only.
    pub fn attr(&self, name: &str) -> Result<&Value, EnvelopeError> {
        if name.starts_with(RESERVED_MARKER) {
            return Err(EnvelopeError::FieldNotFound(name.to_string()));
        }

        self.payload
            .get(name)
            .ok_or_else(|| EnvelopeError::FieldNotFound(name.to_string()))
    }

    /// Mapping-style field access.
    ///
    /// Returns the payload value for `key`, or
    /// [`EnvelopeError::KeyNotFound`] when the key is absent. No
    /// reserved-name exclusion applies here, so `get("_foo")` differs from
    /// `attr("_foo")` whenever `_foo` is a payload key.
    pub fn get(&self, key: &str) -> Result<&Value, EnvelopeError> {
        self.payload
            .get(key)
            .ok_or_else(|| EnvelopeError::KeyNotFound(key.to_string()))
    }

    /// Whether the payload contains `key`. No reserved-name exclusion.
    pub fn contains(&self, key: &str) -> bool {
        self.payload.contains_key(key)
    }

    /// Iterator over the payload's keys, in document order. Each call
    /// starts a fresh iteration.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.payload.keys().map(String::as_str)
    }

    /// Number of fields in the payload.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Deserializes the full payload into a typed value, e.g. a
    /// [`DevicePage`](crate::types::DevicePage) or
    /// [`SystemData`](crate::types::SystemData).
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(Value::Object(self.payload.clone()))
    }
}

/// Mapping-index sugar over [`get`](ResponseEnvelope::get).
///
/// # Panics
///
/// Panics when `key` is absent from the payload, matching the standard
/// library's map-indexing convention. Use [`get`](ResponseEnvelope::get) or
/// [`field`](ResponseEnvelope::field) for fallible access.
impl Index<&str> for ResponseEnvelope {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        &self.payload[key]
    }
}

impl<'a> IntoIterator for &'a ResponseEnvelope {
    type Item = &'a str;
    type IntoIter = std::iter::Map<serde_json::map::Keys<'a>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.payload.keys().map(String::as_str as fn(&'a String) -> &'a str)
    }
}

impl fmt::Display for ResponseEnvelope {
    /// Compact tag: `<ResponseEnvelope(status=200, time=1.234s)>`.
    ///
    /// Elapsed time is formatted to three decimal places. Absent fields are
    /// omitted; when both are absent there is no parenthetical block at all.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(2);
        if let Some(status) = self.status_code {
            parts.push(format!("status={status}"));
        }
        if let Some(elapsed) = self.elapsed {
            parts.push(format!("time={elapsed:.3}s"));
        }

        if parts.is_empty() {
            write!(f, "<ResponseEnvelope>")
        } else {
            write!(f, "<ResponseEnvelope({})>", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ResponseEnvelope {
        ResponseEnvelope::new(json!({
            "total": 3,
            "hasCache": false,
            "_internal": "hidden",
            "data": [1, 2, 3],
        }))
    }

    #[test]
    fn test_access_protocols_agree_on_present_keys() {
        let envelope = sample();
        assert_eq!(envelope.attr("total").unwrap(), &json!(3));
        assert_eq!(envelope.get("total").unwrap(), &json!(3));
        assert_eq!(envelope.field("total"), Some(&json!(3)));
        assert_eq!(envelope["total"], json!(3));
    }

    #[test]
    fn test_absent_key_error_kinds_differ() {
        let envelope = sample();
        assert_eq!(
            envelope.attr("missing"),
            Err(EnvelopeError::FieldNotFound("missing".to_string()))
        );
        assert_eq!(
            envelope.get("missing"),
            Err(EnvelopeError::KeyNotFound("missing".to_string()))
        );
        assert_eq!(envelope.field("missing"), None);
        assert_eq!(envelope.field_or("missing", &json!(42)), &json!(42));
    }

    #[test]
    fn test_reserved_name_asymmetry() {
        let envelope = sample();
        // The key exists and mapping-style access sees it...
        assert!(envelope.contains("_internal"));
        assert_eq!(envelope.get("_internal").unwrap(), &json!("hidden"));
        assert_eq!(envelope["_internal"], json!("hidden"));
        // ...but attribute-style access never does.
        assert_eq!(
            envelope.attr("_internal"),
            Err(EnvelopeError::FieldNotFound("_internal".to_string()))
        );
    }

    #[test]
    fn test_iteration_is_ordered_and_restartable() {
        let envelope = sample();
        let first: Vec<&str> = envelope.keys().collect();
        let second: Vec<&str> = (&envelope).into_iter().collect();
        assert_eq!(first, vec!["total", "hasCache", "_internal", "data"]);
        assert_eq!(first, second);
        assert_eq!(envelope.len(), 4);
        assert!(!envelope.is_empty());
    }

    #[test]
    fn test_display_with_full_metadata() {
        let envelope = sample().with_status_code(200).with_elapsed(1.2345);
        assert_eq!(
            envelope.to_string(),
            "<ResponseEnvelope(status=200, time=1.234s)>"
        );
    }

    #[test]
    fn test_display_with_status_only() {
        let envelope = sample().with_status_code(404);
        assert_eq!(envelope.to_string(), "<ResponseEnvelope(status=404)>");
    }

    #[test]
    fn test_display_without_metadata() {
        assert_eq!(sample().to_string(), "<ResponseEnvelope>");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let envelope = ResponseEnvelope::new(json!([{"oid": 1}]));
        assert_eq!(envelope.len(), 1);
        assert_eq!(envelope.get("data").unwrap(), &json!([{"oid": 1}]));

        let empty = ResponseEnvelope::new(Value::Null);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_explicit_false_is_a_real_value() {
        let envelope = sample();
        assert_eq!(envelope.attr("hasCache").unwrap(), &json!(false));
    }

    #[test]
    fn test_decode_to_typed_page() {
        let envelope = ResponseEnvelope::new(json!({
            "total": 1,
            "data": [{"deviceSN": "FG123", "deviceType": "FortiGate",
                      "provisionStatus": "provisioned"}],
            "hasCache": true,
        }));
        let page: crate::types::DevicePage = envelope.decode().unwrap();
        assert_eq!(page.total, Some(1));
        assert_eq!(page.data.unwrap()[0].device_sn, "FG123");
    }

    #[test]
    fn test_raw_and_to_map_match() {
        let envelope = sample();
        assert_eq!(&envelope.to_map(), envelope.raw());
    }
}
