//
//  fortiztp
//  auth/mod.rs
//
//  Copyright (c) 2026 Hfortix. All rights reserved.
//

//! Authentication for the FortiZTP Cloud API.
//!
//! The API authenticates every request with a FortiCloud OAuth bearer
//! token. The SDK supports three mutually exclusive ways of producing that
//! token, resolved once at client construction:
//!
//! - **Pre-obtained token**: the caller already holds a token and passes it
//!   in directly ([`FortiZtpBuilder::token`](crate::FortiZtpBuilder::token)).
//! - **Credential auto-login**: [`FortiCloudAuth`] performs the FortiCloud
//!   password grant with an API ID and password, and transparently
//!   re-authenticates when the token expires.
//! - **Shared session**: a [`CloudSession`] managed outside this SDK (for
//!   example by an application talking to several FortiCloud services)
//!   supplies the token; whoever owns the session refreshes it.
//!
//! Exactly one of the three must be configured, otherwise the client
//! builder fails with [`Error::Config`](crate::Error::Config) before any
//! network activity.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default FortiCloud OAuth token endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://customerapiauth.fortinet.com/api/v1/oauth/token/";

/// Default OAuth client id for the FortiZTP service.
pub const DEFAULT_CLIENT_ID: &str = "fortiztp";

/// Tokens within this margin of expiry are refreshed proactively.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Successful token response from the FortiCloud auth endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Instant::now() + EXPIRY_MARGIN < expires_at,
            None => true,
        }
    }
}

/// FortiCloud password-grant authenticator.
///
/// Exchanges an API ID and password for a bearer token at the FortiCloud
/// token endpoint, caches the token, and re-authenticates when it nears
/// expiry. Attached to the transport, it acts as the per-request
/// `ensure_token_valid` hook.
///
/// # Example
///
/// ```rust,no_run
/// use fortiztp::auth::FortiCloudAuth;
///
/// # async fn example() -> fortiztp::Result<()> {
/// let auth = FortiCloudAuth::new("my-api-id", "my-password")?;
/// let token = auth.get_token().await?;
/// # Ok(())
/// # }
/// ```
pub struct FortiCloudAuth {
    api_id: String,
    password: String,
    client_id: String,
    auth_url: String,
    http: reqwest::Client,
    cached: tokio::sync::Mutex<Option<CachedToken>>,
}

impl FortiCloudAuth {
    /// Creates an authenticator with the default FortiZTP client id and
    /// FortiCloud token endpoint.
    pub fn new(api_id: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(api_id, password, DEFAULT_CLIENT_ID, DEFAULT_AUTH_URL)
    }

    /// Creates an authenticator against a custom client id and token
    /// endpoint (regional FortiCloud deployments).
    pub fn with_endpoint(
        api_id: impl Into<String>,
        password: impl Into<String>,
        client_id: impl Into<String>,
        auth_url: impl Into<String>,
    ) -> Result<Self> {
        let auth_url = auth_url.into();
        // Fail on a malformed endpoint now rather than on first login.
        url::Url::parse(&auth_url)?;

        Ok(Self {
            api_id: api_id.into(),
            password: password.into(),
            client_id: client_id.into(),
            auth_url,
            http: reqwest::Client::new(),
            cached: tokio::sync::Mutex::new(None),
        })
    }

    /// Returns a token that is valid now, logging in on first use.
    pub async fn get_token(&self) -> Result<String> {
        self.ensure_token_valid().await
    }

    /// Returns the cached token, re-authenticating first when it is absent
    /// or within the expiry margin.
    pub async fn ensure_token_valid(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| t.is_valid()) {
            return Ok(token.token.clone());
        }

        let fresh = self.login().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    /// Performs the password grant against the token endpoint.
    async fn login(&self) -> Result<CachedToken> {
        tracing::debug!(auth_url = %self.auth_url, api_id = %self.api_id, "requesting FortiCloud token");

        let response = self
            .http
            .post(&self.auth_url)
            .json(&serde_json::json!({
                "username": self.api_id,
                "password": self.password,
                "client_id": self.client_id,
                "grant_type": "password",
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Auth(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Auth(format!("unparseable token response: {e}")))?;

        tracing::debug!(expires_in = ?token.expires_in, "FortiCloud token obtained");

        Ok(CachedToken {
            token: token.access_token,
            expires_at: token
                .expires_in
                .map(|secs| Instant::now() + Duration::from_secs(secs)),
        })
    }
}

impl std::fmt::Debug for FortiCloudAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the password.
        f.debug_struct("FortiCloudAuth")
            .field("api_id", &self.api_id)
            .field("client_id", &self.client_id)
            .field("auth_url", &self.auth_url)
            .finish_non_exhaustive()
    }
}

/// An externally managed FortiCloud session shared across service clients.
///
/// The session owner obtains and refreshes the token; every clone of a
/// `CloudSession` observes updates made through
/// [`set_token`](Self::set_token). The SDK reads the token and never
/// refreshes it itself.
///
/// # Example
///
/// ```rust
/// use fortiztp::auth::CloudSession;
///
/// let session = CloudSession::new("initial-token");
/// let shared = session.clone();
/// session.set_token("rotated-token");
/// assert_eq!(shared.token(), "rotated-token");
/// ```
#[derive(Debug, Clone)]
pub struct CloudSession {
    token: Arc<RwLock<String>>,
}

impl CloudSession {
    /// Creates a session around an already-obtained token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token.into())),
        }
    }

    /// Current session token.
    pub fn token(&self) -> String {
        self.token.read().expect("session token lock poisoned").clone()
    }

    /// Replaces the session token; visible to all clones immediately.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("session token lock poisoned") = token.into();
    }
}

/// Where the transport obtains its bearer token from; one variant per
/// authentication mode.
#[derive(Debug)]
pub enum TokenSource {
    /// Fixed pre-obtained token; never refreshed.
    Static(String),
    /// Credential auto-login with transparent re-authentication.
    Auth(FortiCloudAuth),
    /// Externally managed shared session.
    Session(CloudSession),
}

impl TokenSource {
    /// Current token without forcing a refresh (a credential source still
    /// logs in on first use).
    pub async fn current(&self) -> Result<String> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::Auth(auth) => auth.get_token().await,
            Self::Session(session) => Ok(session.token()),
        }
    }

    /// A token valid for the next request. Only a credential source can
    /// refresh; static tokens and sessions are returned as-is.
    pub async fn ensure_valid(&self) -> Result<String> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::Auth(auth) => auth.ensure_token_valid().await,
            Self::Session(session) => Ok(session.token()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_session_clones_share_token() {
        let session = CloudSession::new("one");
        let clone = session.clone();
        assert_eq!(clone.token(), "one");
        session.set_token("two");
        assert_eq!(clone.token(), "two");
    }

    #[test]
    fn test_auth_rejects_malformed_endpoint() {
        let result = FortiCloudAuth::with_endpoint("id", "pw", "fortiztp", "not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_debug_hides_password() {
        let auth = FortiCloudAuth::new("my-id", "hunter2").unwrap();
        let rendered = format!("{auth:?}");
        assert!(rendered.contains("my-id"));
        assert!(!rendered.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_static_source_returns_token_without_io() {
        let source = TokenSource::Static("tok".to_string());
        assert_eq!(source.current().await.unwrap(), "tok");
        assert_eq!(source.ensure_valid().await.unwrap(), "tok");
    }

    #[test]
    fn test_cached_token_expiry_margin() {
        let expiring = CachedToken {
            token: "t".to_string(),
            expires_at: Some(Instant::now() + Duration::from_secs(10)),
        };
        // Within the 60s margin, treated as invalid.
        assert!(!expiring.is_valid());

        let fresh = CachedToken {
            token: "t".to_string(),
            expires_at: Some(Instant::now() + Duration::from_secs(3600)),
        };
        assert!(fresh.is_valid());

        let unbounded = CachedToken {
            token: "t".to_string(),
            expires_at: None,
        };
        assert!(unbounded.is_valid());
    }
}
