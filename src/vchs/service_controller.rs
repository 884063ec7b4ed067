//! Service Controller
//!
//! Plans and service instances under `/api/sc`.

use super::auth::{Authorization, SessionToken};
use super::client::{endpoint, segment, ApiClient};
use super::codec::WireFormat;
use super::error::Result;
use super::http::{ApiRequest, Transport};
use super::media::{class, MediaType};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Name the service controller gives on-demand compute instances
pub const COMPUTE_SERVICE_NAME: &str = "Virtual Private Cloud OnDemand";

/// Subscribable service plan
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanList {
    #[serde(default)]
    pub plans: Vec<Plan>,
}

/// Provisioned service instance
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub service_group_id: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub dashboard_url: Option<String>,
    /// JSON document with service-specific attributes
    #[serde(default)]
    pub instance_attributes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstanceList {
    #[serde(default)]
    pub instances: Vec<Instance>,
}

/// Compute attributes embedded in [`Instance::instance_attributes`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceAttributes {
    #[serde(default)]
    pub org_name: String,
    #[serde(default)]
    pub session_uri: String,
    #[serde(default)]
    pub api_version_uri: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstanceSpec<'a> {
    name: &'a str,
    description: &'a str,
    plan_id: &'a str,
    service_group_id: &'a str,
}

impl Instance {
    pub fn is_compute(&self) -> bool {
        self.name.eq_ignore_ascii_case(COMPUTE_SERVICE_NAME)
    }

    /// Decode the nested attribute document
    pub fn attributes(&self) -> Result<InstanceAttributes> {
        WireFormat::Json.decode(self.instance_attributes.as_deref().unwrap_or("{}"))
    }
}

/// List plans available to the session
pub async fn list_plans<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
) -> Result<Vec<Plan>> {
    let request = ApiRequest::get(endpoint(host, "/api/sc/plans"))
        .authorize(Authorization::Bearer(token))
        .accept(MediaType::xml(client.version()));
    let plans: PlanList = client.fetch(request, &[StatusCode::OK]).await?;
    Ok(plans.plans)
}

/// List service instances available to the session
pub async fn list_instances<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
) -> Result<Vec<Instance>> {
    let request = ApiRequest::get(endpoint(host, "/api/sc/instances"))
        .authorize(Authorization::Bearer(token))
        .accept(MediaType::xml(client.version()));
    let instances: InstanceList = client.fetch(request, &[StatusCode::OK]).await?;
    tracing::debug!("Loaded {} instances", instances.instances.len());
    Ok(instances.instances)
}

/// Provision a new instance of `plan_id` in a service group
pub async fn create_instance<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    plan_id: &str,
    service_group_id: &str,
    name: &str,
    description: &str,
) -> Result<Instance> {
    let spec = InstanceSpec {
        name,
        description,
        plan_id,
        service_group_id,
    };
    let request = ApiRequest::post(endpoint(host, "/api/sc/instances"))
        .authorize(Authorization::Bearer(token))
        .accept(MediaType::json(client.version()).with_class(class::INSTANCE))
        .body(
            MediaType::json(client.version()).with_class(class::INSTANCE_SPEC),
            WireFormat::Json.encode(&spec)?,
        );
    client.fetch(request, &[StatusCode::CREATED]).await
}

/// Delete an instance; returns the raw response status
pub async fn delete_instance<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    instance_id: &str,
) -> Result<StatusCode> {
    let url = endpoint(host, &format!("/api/sc/instances/{}", segment(instance_id)));
    let request = ApiRequest::delete(url)
        .authorize(Authorization::Bearer(token))
        .accept(MediaType::json(client.version()));
    Ok(client.send(request).await?.status)
}
