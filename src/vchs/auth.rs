//! Credentials and session tokens
//!
//! A login exchanges `Credentials` for a `SessionToken`; every later call
//! presents the token. Tokens live for the process run only.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

/// Login input for one sample run
#[derive(Clone)]
pub struct Credentials {
    /// Base URL of the API, e.g. `https://vchs.vmware.com`
    pub host: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(host: &str, username: &str, password: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Opaque token returned by a successful login
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Security: never print token material into logs
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Authorization scheme attached to a request
#[derive(Debug, Clone, Copy)]
pub enum Authorization<'a> {
    /// `Authorization: Basic base64(user:password)` for logins
    Basic { username: &'a str, password: &'a str },
    /// `Authorization: Bearer <token>` for vCHS calls
    Bearer(&'a SessionToken),
    /// `x-vcloud-authorization: <token>` for compute calls
    Vcloud(&'a SessionToken),
}

impl Authorization<'_> {
    /// Header name and value for this scheme
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Authorization::Basic { username, password } => (
                "authorization",
                format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password))),
            ),
            Authorization::Bearer(token) => ("authorization", format!("Bearer {}", token.as_str())),
            Authorization::Vcloud(token) => (
                super::media::VCLOUD_AUTHORIZATION_HEADER,
                token.as_str().to_string(),
            ),
        }
    }
}
