//! Billing
//!
//! Service groups and invoiced usage/costs under `/api/billing`.

use super::auth::{Authorization, SessionToken};
use super::client::{endpoint, segment, ApiClient};
use super::error::Result;
use super::http::{ApiRequest, Transport};
use super::media::{class, MediaType};
use super::usage::{BilledCosts, BilledUsage};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Billing account grouping service instances
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGroup {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub billing_currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGroups {
    #[serde(default)]
    pub service_group: Vec<ServiceGroup>,
}

async fn get_billing<T: Transport, R: DeserializeOwned>(
    client: &ApiClient<T>,
    host: &str,
    path: &str,
    class: &str,
    token: &SessionToken,
) -> Result<R> {
    let request = ApiRequest::get(endpoint(host, path))
        .authorize(Authorization::Bearer(token))
        .accept(MediaType::xml(client.version()).with_class(class));
    client.fetch(request, &[StatusCode::OK]).await
}

pub async fn service_groups<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
) -> Result<Vec<ServiceGroup>> {
    let groups: ServiceGroups = get_billing(
        client,
        host,
        "/api/billing/service-groups",
        class::SERVICE_GROUPS,
        token,
    )
    .await?;
    Ok(groups.service_group)
}

pub async fn service_group<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    service_group_id: &str,
) -> Result<ServiceGroup> {
    let path = format!("/api/billing/service-group/{}", segment(service_group_id));
    get_billing(client, host, &path, class::SERVICE_GROUP, token).await
}

pub async fn billed_costs<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    service_group_id: &str,
) -> Result<BilledCosts> {
    let path = format!(
        "/api/billing/service-group/{}/billed-costs",
        segment(service_group_id)
    );
    get_billing(client, host, &path, class::BILLED_COSTS, token).await
}

/// Billed usage of a whole service instance
pub async fn billed_usage<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    service_instance_id: &str,
) -> Result<BilledUsage> {
    let path = format!(
        "/api/billing/service-instance/{}/billed-usage",
        segment(service_instance_id)
    );
    get_billing(client, host, &path, class::BILLED_USAGE, token).await
}

pub async fn l1_billed_usage<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    service_instance_id: &str,
    l1_id: &str,
) -> Result<BilledUsage> {
    let path = format!(
        "/api/billing/service-instance/{}/l1/{}/billed-usage",
        segment(service_instance_id),
        segment(l1_id)
    );
    get_billing(client, host, &path, class::BILLED_USAGE, token).await
}

pub async fn l2_billed_usage<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    service_instance_id: &str,
    l2_id: &str,
) -> Result<BilledUsage> {
    let path = format!(
        "/api/billing/service-instance/{}/l2/{}/billed-usage",
        segment(service_instance_id),
        segment(l2_id)
    );
    get_billing(client, host, &path, class::BILLED_USAGE, token).await
}
