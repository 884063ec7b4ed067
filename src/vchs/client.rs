//! API client
//!
//! Pairs a transport with the API version and provides the single
//! call-and-check routine every domain caller goes through.

use super::codec::decode_response;
use super::error::{Result, VchsError};
use super::http::{sanitize_for_log, ApiRequest, ApiResponse, HttpTransport, Transport};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Main vCHS client
#[derive(Clone)]
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    version: String,
}

impl ApiClient<HttpTransport> {
    /// Create a client backed by a real HTTP transport
    pub fn new(version: &str, accept_invalid_certs: bool) -> Result<Self> {
        Ok(Self::with_transport(
            HttpTransport::new(accept_invalid_certs)?,
            version,
        ))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(transport: T, version: &str) -> Self {
        Self {
            transport,
            version: version.to_string(),
        }
    }

    /// API version sent in every Accept header
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request without interpreting the status
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.transport.send(request).await
    }

    /// Send a request and require one of the `expected` statuses
    pub async fn call(&self, request: ApiRequest, expected: &[StatusCode]) -> Result<ApiResponse> {
        let method = request.method.clone();
        let url = request.url.clone();
        let response = self.transport.send(request).await?;

        if expected.contains(&response.status) {
            return Ok(response);
        }

        // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
        tracing::warn!(
            "{} {} returned {} - {}",
            method,
            url,
            response.status,
            sanitize_for_log(&response.body)
        );
        Err(VchsError::UnexpectedStatus {
            status: response.status,
            content_type: response.content_type().map(str::to_string),
            body: response.body,
        })
    }

    /// Send a request, require an expected status and decode the body
    pub async fn fetch<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        expected: &[StatusCode],
    ) -> Result<R> {
        let response = self.call(request, expected).await?;
        decode_response(&response)
    }
}

/// Join a base URL and an absolute API path
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Percent-encode one path segment
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
