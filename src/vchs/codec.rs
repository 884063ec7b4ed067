//! Content negotiation and typed (de)serialization
//!
//! The server picks JSON or XML per endpoint; the `Content-Type` of each
//! response decides which decoder runs.

use super::error::{Result, VchsError};
use super::http::ApiResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Wire format of a request or response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    Json,
    Xml,
}

impl WireFormat {
    /// Pick the decoder for a response content type
    ///
    /// Anything mentioning "json" is JSON; everything else, including a
    /// missing header, is treated as XML.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if ct.to_ascii_lowercase().contains("json") => WireFormat::Json,
            _ => WireFormat::Xml,
        }
    }

    pub fn decode<T: DeserializeOwned>(self, body: &str) -> Result<T> {
        let decoded = match self {
            WireFormat::Json => serde_json::from_str(body).map_err(|e| e.to_string()),
            WireFormat::Xml => quick_xml::de::from_str(body).map_err(|e| e.to_string()),
        };
        decoded.map_err(|message| VchsError::Decode {
            format: self,
            message,
        })
    }

    pub fn encode<T: Serialize>(self, value: &T) -> Result<String> {
        let encoded = match self {
            WireFormat::Json => serde_json::to_string(value).map_err(|e| e.to_string()),
            WireFormat::Xml => quick_xml::se::to_string(value).map_err(|e| e.to_string()),
        };
        encoded.map_err(|message| VchsError::Encode {
            format: self,
            message,
        })
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Json => write!(f, "JSON"),
            WireFormat::Xml => write!(f, "XML"),
        }
    }
}

/// Decode a response body according to its content type
pub fn decode_response<T: DeserializeOwned>(response: &ApiResponse) -> Result<T> {
    let format = WireFormat::from_content_type(response.content_type());
    tracing::trace!("Decoding {} response ({} bytes)", format, response.body.len());
    format.decode(&response.body)
}
