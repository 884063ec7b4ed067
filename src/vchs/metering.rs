//! Metering
//!
//! Billable (not yet invoiced) usage and costs under `/api/metering`.

use super::auth::{Authorization, SessionToken};
use super::client::{endpoint, segment, ApiClient};
use super::error::Result;
use super::http::{ApiRequest, Transport};
use super::media::{class, MediaType};
use super::usage::{BillableCosts, BillableUsage};
use reqwest::StatusCode;

async fn get_report<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    path: &str,
    class: &str,
    token: &SessionToken,
) -> Result<BillableUsage> {
    let request = ApiRequest::get(endpoint(host, path))
        .authorize(Authorization::Bearer(token))
        .accept(MediaType::xml(client.version()).with_class(class));
    client.fetch(request, &[StatusCode::OK]).await
}

/// Billable usage of a whole service instance
pub async fn billable_usage<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    service_instance_id: &str,
) -> Result<BillableUsage> {
    let path = format!(
        "/api/metering/service-instance/{}/billable-usage",
        segment(service_instance_id)
    );
    get_report(client, host, &path, class::BILLABLE_USAGE, token).await
}

/// Billable usage of one L1 entity of a service instance
pub async fn l1_billable_usage<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    service_instance_id: &str,
    l1_id: &str,
) -> Result<BillableUsage> {
    let path = format!(
        "/api/metering/service-instance/{}/l1/{}/billable-usage",
        segment(service_instance_id),
        segment(l1_id)
    );
    get_report(client, host, &path, class::BILLABLE_USAGE, token).await
}

/// Billable usage of one L2 entity of a service instance
pub async fn l2_billable_usage<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    service_instance_id: &str,
    l2_id: &str,
) -> Result<BillableUsage> {
    let path = format!(
        "/api/metering/service-instance/{}/l2/{}/billable-usage",
        segment(service_instance_id),
        segment(l2_id)
    );
    get_report(client, host, &path, class::BILLABLE_USAGE, token).await
}

/// Billable costs of a service group
pub async fn billable_costs<T: Transport>(
    client: &ApiClient<T>,
    host: &str,
    token: &SessionToken,
    service_group_id: &str,
) -> Result<BillableCosts> {
    let path = format!(
        "/api/metering/service-group/{}/billable-costs",
        segment(service_group_id)
    );
    get_report(client, host, &path, class::BILLABLE_COSTS, token).await
}
