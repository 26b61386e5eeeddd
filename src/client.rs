//
//  fortiztp
//  client.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! Main entry point: the [`FortiZtp`] client facade.
//!
//! The facade owns one shared transport handle and exposes one sub-object
//! per endpoint group, all referencing that same transport. It is built
//! through [`FortiZtpBuilder`], which enforces that exactly one
//! authentication mode (pre-obtained token, API credentials, or shared
//! [`CloudSession`]) is configured before anything touches the network.
//!
//! # Example
//!
//! ```rust,no_run
//! use fortiztp::FortiZtp;
//!
//! # async fn example() -> fortiztp::Result<()> {
//! let client = FortiZtp::builder()
//!     .credentials("my-api-id", "my-password")
//!     .build()
//!     .await?;
//!
//! let status = client.system().get().await?;
//! println!("service: {}", status.attr("serviceStatus").unwrap());
//!
//! let devices = client.devices().list(Default::default()).await?;
//! println!("{} devices", devices.attr("total").unwrap());
//!
//! client.logout();
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::api::{DevicesApi, FortiManagersApi, ScriptsApi, SystemApi};
use crate::auth::{CloudSession, FortiCloudAuth, TokenSource, DEFAULT_AUTH_URL, DEFAULT_CLIENT_ID};
use crate::error::{Error, Result};
use crate::transport::{HttpTransport, OperationRecord, RetryStats, Transport, TransportConfig};

/// Builder for [`FortiZtp`].
///
/// Exactly one of [`token`](Self::token), [`credentials`](Self::credentials),
/// or [`session`](Self::session) must be set; [`build`](Self::build) fails
/// with [`Error::Config`] otherwise, before any network activity.
#[derive(Default)]
pub struct FortiZtpBuilder {
    token: Option<String>,
    credentials: Option<(String, String)>,
    session: Option<CloudSession>,
    client_id: Option<String>,
    auth_url: Option<String>,
    base_url: Option<String>,
    verify: Option<bool>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    read_only: bool,
    track_operations: bool,
}

impl FortiZtpBuilder {
    /// Authenticates with a pre-obtained OAuth token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Authenticates by logging in with FortiCloud API credentials. The
    /// token is obtained during [`build`](Self::build) and refreshed
    /// automatically when it nears expiry.
    pub fn credentials(mut self, api_id: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((api_id.into(), password.into()));
        self
    }

    /// Authenticates through an externally managed multi-service session.
    pub fn session(mut self, session: CloudSession) -> Self {
        self.session = Some(session);
        self
    }

    /// OAuth client id for credential login (default `fortiztp`).
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// FortiCloud token endpoint for credential login.
    pub fn auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = Some(auth_url.into());
        self
    }

    /// API base URL (default `https://fortiztp.forticloud.com/public/api`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Verify TLS certificates (default `true`).
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = Some(verify);
        self
    }

    /// Connection establishment timeout (default 10s).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Whole-request timeout (default 300s).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Simulate write operations instead of sending them.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Keep an audit log of issued operations, readable via
    /// [`FortiZtp::operations`].
    pub fn track_operations(mut self, track: bool) -> Self {
        self.track_operations = track;
        self
    }

    /// Validates the configuration and constructs the client.
    ///
    /// Credential mode performs the initial FortiCloud login here; the
    /// other modes involve no network activity.
    pub async fn build(self) -> Result<FortiZtp> {
        let mode_count = usize::from(self.token.is_some())
            + usize::from(self.credentials.is_some())
            + usize::from(self.session.is_some());
        if mode_count == 0 {
            return Err(Error::Config(
                "no authentication method: provide a token, credentials, or a session".to_string(),
            ));
        }
        if mode_count > 1 {
            return Err(Error::Config(
                "conflicting authentication methods: provide exactly one of token, credentials, or session"
                    .to_string(),
            ));
        }

        let token_source = if let Some(token) = self.token {
            TokenSource::Static(token)
        } else if let Some((api_id, password)) = self.credentials {
            let auth = FortiCloudAuth::with_endpoint(
                api_id,
                password,
                self.client_id.as_deref().unwrap_or(DEFAULT_CLIENT_ID),
                self.auth_url.as_deref().unwrap_or(DEFAULT_AUTH_URL),
            )?;
            // Log in now so bad credentials fail at construction, not on
            // the first endpoint call.
            auth.get_token().await?;
            TokenSource::Auth(auth)
        } else {
            // mode_count == 1, so the session must be present.
            TokenSource::Session(self.session.ok_or_else(|| {
                Error::Config("no authentication method resolvable".to_string())
            })?)
        };

        let defaults = TransportConfig::default();
        let config = TransportConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            verify: self.verify.unwrap_or(defaults.verify),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            read_timeout: self.read_timeout.unwrap_or(defaults.read_timeout),
            read_only: self.read_only,
            track_operations: self.track_operations,
        };

        let transport = HttpTransport::new(config, token_source)?;
        Ok(FortiZtp::with_transport(Arc::new(transport)))
    }
}

impl std::fmt::Debug for FortiZtpBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the password from the credentials pair.
        f.debug_struct("FortiZtpBuilder")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("credentials", &self.credentials.as_ref().map(|(id, _)| id))
            .field("session", &self.session.is_some())
            .field("base_url", &self.base_url)
            .field("read_only", &self.read_only)
            .field("track_operations", &self.track_operations)
            .finish_non_exhaustive()
    }
}

/// FortiZTP Cloud API client.
///
/// Holds one shared transport handle and exposes the endpoint groups
/// ([`devices`](Self::devices), [`scripts`](Self::scripts),
/// [`fortimanagers`](Self::fortimanagers), [`system`](Self::system)), all
/// referencing the same transport. The client is `Send + Sync` and cheap
/// to share; envelopes are immutable and endpoint methods hold no per-call
/// state.
pub struct FortiZtp {
    transport: Arc<dyn Transport>,
    devices: DevicesApi,
    scripts: ScriptsApi,
    fortimanagers: FortiManagersApi,
    system: SystemApi,
}

impl FortiZtp {
    /// Starts building a client with the bundled HTTP transport.
    pub fn builder() -> FortiZtpBuilder {
        FortiZtpBuilder::default()
    }

    /// Wraps an externally provided transport: an instrumented or
    /// policy-wrapped implementation, or a test double.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            devices: DevicesApi::new(transport.clone()),
            scripts: ScriptsApi::new(transport.clone()),
            fortimanagers: FortiManagersApi::new(transport.clone()),
            system: SystemApi::new(transport.clone()),
            transport,
        }
    }

    /// Device provisioning endpoints.
    pub fn devices(&self) -> &DevicesApi {
        &self.devices
    }

    /// Pre-run CLI script endpoints.
    pub fn scripts(&self) -> &ScriptsApi {
        &self.scripts
    }

    /// FortiManager integration endpoints.
    pub fn fortimanagers(&self) -> &FortiManagersApi {
        &self.fortimanagers
    }

    /// System status endpoint.
    pub fn system(&self) -> &SystemApi {
        &self.system
    }

    /// Current bearer token from the transport.
    pub async fn get_token(&self) -> Result<String> {
        self.transport.get_token().await
    }

    /// Request/retry statistics from the transport, unmodified.
    pub fn retry_stats(&self) -> RetryStats {
        self.transport.retry_stats()
    }

    /// Tracked-operation audit log from the transport, unmodified. Empty
    /// unless [`track_operations`](FortiZtpBuilder::track_operations) was
    /// enabled.
    pub fn operations(&self) -> Vec<OperationRecord> {
        self.transport.operations()
    }

    /// Releases transport resources. Requests issued after this fail;
    /// calling it again is a no-op. Token revocation, if needed, is the
    /// caller's responsibility.
    pub fn logout(&self) {
        self.transport.close();
    }
}

impl Drop for FortiZtp {
    fn drop(&mut self) {
        // Leaving scope releases the transport, mirroring an explicit
        // logout.
        self.transport.close();
    }
}

impl std::fmt::Debug for FortiZtp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FortiZtp").finish_non_exhaustive()
    }
}
