//
//  fortiztp
//  lib.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! # FortiZTP Cloud API Client
//!
//! A typed Rust client for the FortiZTP zero-touch-provisioning cloud API
//! v2: device provisioning, pre-run CLI script management, FortiManager
//! integration, and service status.
//!
//! ## Overview
//!
//! The API surface is deliberately thin: every endpoint method builds a
//! path and parameter set, issues one HTTP request through the shared
//! transport, and wraps the JSON response in a [`ResponseEnvelope`]. All
//! resilience concerns (retries, backoff, rate limiting) live behind the
//! [`Transport`](transport::Transport) trait; the bundled transport is a
//! plain single-attempt reqwest client, and failures always propagate to
//! the caller unchanged.
//!
//! ## Authentication
//!
//! Three mutually exclusive modes, enforced at construction:
//!
//! - a pre-obtained OAuth token,
//! - FortiCloud API credentials with automatic login and refresh,
//! - an externally managed [`CloudSession`](auth::CloudSession) shared
//!   across FortiCloud service clients.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fortiztp::{FortiZtp, api::DeviceListFilter};
//! use fortiztp::types::{DeviceType, ProvisionStatus};
//!
//! # async fn example() -> fortiztp::Result<()> {
//! let client = FortiZtp::builder()
//!     .credentials("my-api-id", "my-password")
//!     .build()
//!     .await?;
//!
//! // List provisioned devices.
//! let response = client
//!     .devices()
//!     .list(DeviceListFilter {
//!         provision_status: Some(ProvisionStatus::Provisioned),
//!         ..Default::default()
//!     })
//!     .await?;
//! for device in response.attr("data").unwrap().as_array().unwrap() {
//!     println!("{}: {}", device["deviceSN"], device["provisionStatus"]);
//! }
//!
//! // Provision one device to a FortiManager.
//! client
//!     .devices()
//!     .put(
//!         "FG123456789",
//!         DeviceType::FortiGate,
//!         ProvisionStatus::Provisioned,
//!         fortiztp::api::DeviceUpdateOptions {
//!             forti_manager_oid: Some(12345),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//!
//! client.logout();
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`client`]: the [`FortiZtp`] facade and its builder
//! - [`api`]: endpoint groups (devices, scripts, fortimanagers, system)
//! - [`envelope`]: the [`ResponseEnvelope`] response wrapper
//! - [`transport`]: the transport contract and the bundled HTTP transport
//! - [`auth`]: FortiCloud authentication modes
//! - [`types`]: wire enums and typed response records
//! - [`error`]: the crate error type

/// Endpoint groups for the FortiZTP API v2.
pub mod api;

/// FortiCloud authentication: password-grant login, shared sessions, and
/// the token-source abstraction used by the transport.
pub mod auth;

/// The [`FortiZtp`] client facade and [`FortiZtpBuilder`].
pub mod client;

/// The [`ResponseEnvelope`] response wrapper and its lookup errors.
pub mod envelope;

/// Crate error type and `Result` alias.
pub mod error;

/// Transport seam: request descriptors, the [`transport::Transport`]
/// contract, telemetry types, and the bundled reqwest implementation.
pub mod transport;

/// Wire vocabulary: enum literals and typed records matching the API
/// schema.
pub mod types;

pub use client::{FortiZtp, FortiZtpBuilder};
pub use envelope::{EnvelopeError, ResponseEnvelope};
pub use error::{Error, Result};

/// Crate version, sent as part of the `User-Agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
