//
//  fortiztp
//  error.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! Error types for the FortiZTP client.
//!
//! The SDK distinguishes three failure domains:
//!
//! - **Configuration**: the client was constructed without a usable
//!   authentication mode, or with conflicting modes. Raised before any
//!   network activity.
//! - **Authentication**: the FortiCloud token endpoint rejected the login
//!   or returned a response the SDK could not parse.
//! - **Transport**: network failures and non-2xx API responses. Endpoint
//!   methods never catch, retry, or reinterpret these; whatever the
//!   transport reports is what the caller sees.
//!
//! Envelope field-lookup failures are deliberately a separate type
//! ([`EnvelopeError`](crate::envelope::EnvelopeError)); they are a property
//! of reading a response, not of issuing a request.

use thiserror::Error;

/// Unified error type for all FortiZTP client operations.
///
/// # Example
///
/// ```rust
/// use fortiztp::Error;
///
/// fn describe(err: &Error) -> &'static str {
///     match err {
///         Error::Config(_) => "fix the builder arguments",
///         Error::Auth(_) => "check API credentials",
///         Error::Api { status, .. } if *status == 404 => "no such resource",
///         _ => "transport-level failure",
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The client was constructed with no usable authentication mode, or
    /// with more than one. Raised synchronously from the builder, before
    /// any network call is attempted.
    #[error("configuration error: {0}")]
    Config(String),

    /// Token acquisition failed: the FortiCloud auth endpoint rejected the
    /// credentials or returned an unparseable token response.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The API answered with a non-success status code.
    ///
    /// The body is passed through verbatim; FortiZTP error bodies are JSON
    /// of the form `{"error": "...", "error_description": "..."}` and can
    /// be decoded with [`ApiErrorBody`](crate::types::ApiErrorBody).
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code of the failed response.
        status: u16,
        /// Raw response body, unmodified.
        body: String,
    },

    /// A network-level error occurred: connection failure, timeout, DNS
    /// resolution, TLS, or a malformed response stream.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured base or auth URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
