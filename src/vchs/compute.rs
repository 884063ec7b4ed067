//! Compute
//!
//! vCloud Director API reached through a compute service instance: session
//! login, org/VDC/vApp/VM navigation, template queries. Every document here
//! is vCloud XML, so record fields map to element attributes.

use super::auth::{Authorization, Credentials, SessionToken};
use super::client::{endpoint, ApiClient};
use super::error::{Result, VchsError};
use super::http::{ApiRequest, Transport};
use super::media::{vcloud, MediaType, VCLOUD_AUTHORIZATION_HEADER};
use futures::future::join_all;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

/// Link to another vCloud entity
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Reference {
    #[serde(rename = "@href", default)]
    pub href: String,
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    #[serde(rename = "@type", default)]
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Link {
    #[serde(rename = "@rel", default)]
    pub rel: String,
    #[serde(rename = "@href", default)]
    pub href: String,
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(rename = "@type", default)]
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrgList {
    #[serde(rename = "Org", default)]
    pub orgs: Vec<Reference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Org {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@href", default)]
    pub href: String,
    #[serde(rename = "Link", default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceEntities {
    #[serde(rename = "ResourceEntity", default)]
    pub entities: Vec<Reference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableNetworks {
    #[serde(rename = "Network", default)]
    pub networks: Vec<Reference>,
}

/// Virtual datacenter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Vdc {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@href", default)]
    pub href: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "ResourceEntities", default)]
    pub resource_entities: ResourceEntities,
    #[serde(rename = "AvailableNetworks", default)]
    pub available_networks: AvailableNetworks,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Vm {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@href", default)]
    pub href: String,
    #[serde(rename = "@status", default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VAppChildren {
    #[serde(rename = "Vm", default)]
    pub vms: Vec<Vm>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VApp {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@href", default)]
    pub href: String,
    #[serde(rename = "Children", default)]
    pub children: VAppChildren,
}

/// `vAppTemplate` record from the query API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VAppTemplateRecord {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@description", default)]
    pub description: Option<String>,
    #[serde(rename = "@href", default)]
    pub href: String,
    #[serde(rename = "@vdc", default)]
    pub vdc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VAppTemplateRecords {
    #[serde(rename = "VAppTemplateRecord", default)]
    pub records: Vec<VAppTemplateRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VdcTemplateList {
    #[serde(rename = "VdcTemplate", default)]
    pub templates: Vec<Reference>,
}

impl Org {
    /// Links that point at VDCs
    pub fn vdc_links(&self) -> impl Iterator<Item = &Link> {
        self.links
            .iter()
            .filter(|l| l.media_type.as_deref() == Some(vcloud::VDC))
    }
}

impl Vdc {
    /// Resource entities that are vApps
    pub fn vapp_refs(&self) -> impl Iterator<Item = &Reference> {
        self.resource_entities
            .entities
            .iter()
            .filter(|r| r.media_type.as_deref() == Some(vcloud::VAPP))
    }
}

fn vcloud_get<T: Transport>(client: &ApiClient<T>, url: &str, token: &SessionToken) -> ApiRequest {
    ApiRequest::get(url)
        .accept(MediaType::vcloud_xml(client.version()))
        .authorize(Authorization::Vcloud(token))
}

async fn get_entity<T: Transport, R: DeserializeOwned>(
    client: &ApiClient<T>,
    url: &str,
    token: &SessionToken,
) -> Result<R> {
    client
        .fetch(vcloud_get(client, url, token), &[StatusCode::OK])
        .await
}

/// Log in to a compute session endpoint
///
/// The vCloud login user is `username@org`.
pub async fn login<T: Transport>(
    client: &ApiClient<T>,
    session_uri: &str,
    credentials: &Credentials,
    org_name: &str,
) -> Result<SessionToken> {
    let username = format!("{}@{}", credentials.username, org_name);
    let request = ApiRequest::post(session_uri)
        .authorize(Authorization::Basic {
            username: &username,
            password: &credentials.password,
        })
        .accept(MediaType::vcloud_xml(client.version()));

    let response = client.send(request).await?;
    if response.status != StatusCode::OK {
        tracing::warn!("Compute login rejected with status {}", response.status);
        return Err(VchsError::AuthFailure {
            status: response.status,
        });
    }

    response
        .header(VCLOUD_AUTHORIZATION_HEADER)
        .filter(|t| !t.is_empty())
        .map(SessionToken::new)
        .ok_or(VchsError::MissingHeader(VCLOUD_AUTHORIZATION_HEADER))
}

/// Orgs visible to the compute session
pub async fn org_list<T: Transport>(
    client: &ApiClient<T>,
    api_url: &str,
    token: &SessionToken,
) -> Result<OrgList> {
    get_entity(client, &endpoint(api_url, "/org"), token).await
}

pub async fn org<T: Transport>(
    client: &ApiClient<T>,
    href: &str,
    token: &SessionToken,
) -> Result<Org> {
    get_entity(client, href, token).await
}

pub async fn vdc<T: Transport>(
    client: &ApiClient<T>,
    href: &str,
    token: &SessionToken,
) -> Result<Vdc> {
    get_entity(client, href, token).await
}

pub async fn vapp<T: Transport>(
    client: &ApiClient<T>,
    href: &str,
    token: &SessionToken,
) -> Result<VApp> {
    get_entity(client, href, token).await
}

/// Every VDC of every org in the list, in document order
///
/// The first failing request aborts the walk.
pub async fn vdcs_for_org_list<T: Transport>(
    client: &ApiClient<T>,
    orgs: &OrgList,
    token: &SessionToken,
) -> Result<Vec<Vdc>> {
    let mut vdcs = Vec::new();
    for org_ref in &orgs.orgs {
        let org = org(client, &org_ref.href, token).await?;
        for link in org.vdc_links() {
            vdcs.push(vdc(client, &link.href, token).await?);
        }
    }
    Ok(vdcs)
}

/// VMs of every vApp in the VDC, in document order
pub async fn vms_for_vdc<T: Transport>(
    client: &ApiClient<T>,
    vdc: &Vdc,
    token: &SessionToken,
) -> Result<Vec<Vm>> {
    let mut vms = Vec::new();
    for vapp_ref in vdc.vapp_refs() {
        let vapp = vapp(client, &vapp_ref.href, token).await?;
        vms.extend(vapp.children.vms);
    }
    Ok(vms)
}

/// [`vms_for_vdc`] for several VDCs at once; results keep the VDC order
pub async fn vms_for_vdcs<T: Transport>(
    client: &ApiClient<T>,
    vdcs: &[Vdc],
    token: &SessionToken,
) -> Vec<Result<Vec<Vm>>> {
    join_all(vdcs.iter().map(|vdc| vms_for_vdc(client, vdc, token))).await
}

/// Run a vCloud query (`{base}/query?...`) and decode the record list
pub async fn query_records<T: Transport, R: DeserializeOwned>(
    client: &ApiClient<T>,
    base_url: &str,
    params: &[(&str, &str)],
    token: &SessionToken,
) -> Result<R> {
    let url = Url::parse_with_params(&endpoint(base_url, "/query"), params)?;
    get_entity(client, url.as_str(), token).await
}

/// vApp templates stored in a VDC
pub async fn templates_for_vdc<T: Transport>(
    client: &ApiClient<T>,
    api_url: &str,
    vdc: &Vdc,
    token: &SessionToken,
) -> Result<Vec<VAppTemplateRecord>> {
    let filter = format!("vdc=={}", vdc.href);
    let records: VAppTemplateRecords = query_records(
        client,
        api_url,
        &[
            ("type", "vAppTemplate"),
            ("format", "records"),
            ("filter", &filter),
        ],
        token,
    )
    .await?;
    Ok(records.records)
}

/// References to the VDC templates offered to the org
///
/// A reference is returned rather than the template itself because its
/// href is the source a new VDC is instantiated from.
pub async fn vdc_templates<T: Transport>(
    client: &ApiClient<T>,
    api_url: &str,
    token: &SessionToken,
) -> Result<Vec<Reference>> {
    let list: VdcTemplateList =
        get_entity(client, &endpoint(api_url, "/vdcTemplates"), token).await?;
    Ok(list
        .templates
        .into_iter()
        .filter(|r| {
            r.media_type
                .as_deref()
                .map(|t| t.to_ascii_lowercase().contains(&vcloud::VDC_TEMPLATE.to_ascii_lowercase()))
                .unwrap_or(false)
        })
        .collect())
}
