//! vCHS API interaction module
//!
//! This module provides the plumbing shared by every sample (transport,
//! content negotiation, typed decoding, error mapping) and one caller per
//! remote endpoint.
//!
//! # Module Structure
//!
//! - [`http`] - Transport trait and the reqwest-backed implementation
//! - [`codec`] - JSON/XML selection by content type
//! - [`timestamp`] - The `xs:dateTime` scalar used by record types
//! - [`client`] - `ApiClient` with the call-and-check routine
//! - [`iam`] - Login and user management
//! - [`service_controller`] - Plans and service instances
//! - [`compute`] - vCloud orgs, VDCs, VMs and templates
//! - [`metering`] / [`billing`] - Usage and cost records
//!
//! # Example
//!
//! ```ignore
//! use vchs_samples::vchs::{client::ApiClient, iam, service_controller, auth::Credentials};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ApiClient::new("5.7", false)?;
//!     let creds = Credentials::new("https://vchs.vmware.com", "me@example.com", "secret");
//!     let token = iam::login(&client, &creds).await?;
//!     let instances = service_controller::list_instances(&client, &creds.host, &token).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod billing;
pub mod client;
pub mod codec;
pub mod compute;
pub mod error;
pub mod http;
pub mod iam;
pub mod media;
pub mod metering;
pub mod service_controller;
pub mod timestamp;
pub mod urn;
pub mod usage;

pub use client::ApiClient;
pub use error::{format_api_error, Result, VchsError};
