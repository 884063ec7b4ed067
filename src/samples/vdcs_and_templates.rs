//! List VDCs and templates
//!
//! Finds the compute instance of a region, locates one VDC by name or id,
//! prints its vApp templates and networks, then checks the VDC templates
//! offered to the org.

use super::{connect, report_failure};
use crate::vchs::auth::{Credentials, SessionToken};
use crate::vchs::compute::{self, VAppTemplateRecord, Vdc};
use crate::vchs::http::Transport;
use crate::vchs::{service_controller, ApiClient};
use anyhow::{Context, Result};
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct VdcsAndTemplatesOptions {
    pub region: String,
    pub vdc_name: Option<String>,
    pub vdc_id: Option<String>,
    pub template_name: Option<String>,
    pub vdc_template_name: Option<String>,
}

impl VdcsAndTemplatesOptions {
    fn matches_vdc(&self, vdc: &Vdc) -> bool {
        let by_name = self
            .vdc_name
            .as_deref()
            .is_some_and(|n| vdc.name.eq_ignore_ascii_case(n));
        let by_id = self
            .vdc_id
            .as_deref()
            .is_some_and(|id| vdc.id.eq_ignore_ascii_case(id));
        by_name || by_id
    }
}

pub async fn run<T: Transport, W: Write>(
    client: &ApiClient<T>,
    credentials: &Credentials,
    options: &VdcsAndTemplatesOptions,
    out: &mut W,
) -> Result<()> {
    let token = connect(client, credentials, out).await?;

    let instances = service_controller::list_instances(client, &credentials.host, &token)
        .await
        .context("Failed to list service instances")?;
    let Some(instance) = instances
        .iter()
        .find(|i| i.is_compute() && i.region.eq_ignore_ascii_case(&options.region))
    else {
        writeln!(out, "No compute instance found")?;
        return Ok(());
    };

    let attrs = instance
        .attributes()
        .context("Compute instance attributes are unreadable")?;
    let api_url = instance
        .api_url
        .as_deref()
        .context("Compute instance has no API URL")?;

    write!(out, "Logging in to compute...")?;
    out.flush()?;
    let vcd_token = compute::login(client, &attrs.session_uri, credentials, &attrs.org_name)
        .await
        .context("Could not log in to compute with credentials")?;
    writeln!(out, "Success.\n")?;

    match compute::org_list(client, api_url, &vcd_token).await {
        Ok(orgs) => match compute::vdcs_for_org_list(client, &orgs, &vcd_token).await {
            Ok(vdcs) => {
                let matched = search_vdcs(client, api_url, &vdcs, options, &vcd_token, out).await?;
                match (&matched, &options.template_name) {
                    (Some(template), _) => {
                        writeln!(out, "Found matching template {}", template.name)?
                    }
                    (None, Some(name)) => writeln!(out, "No template named {}", name)?,
                    (None, None) => {}
                }
            }
            Err(e) => report_failure(out, "VDC listing", &e)?,
        },
        Err(e) => report_failure(out, "Org listing", &e)?,
    }

    check_vdc_templates(client, api_url, options, &vcd_token, out).await
}

/// Print templates and networks of every matching VDC; returns the last
/// template whose name matches `--template-name`
async fn search_vdcs<T: Transport, W: Write>(
    client: &ApiClient<T>,
    api_url: &str,
    vdcs: &[Vdc],
    options: &VdcsAndTemplatesOptions,
    token: &SessionToken,
    out: &mut W,
) -> Result<Option<VAppTemplateRecord>> {
    let mut matched = None;

    for vdc in vdcs.iter().filter(|v| options.matches_vdc(v)) {
        writeln!(out, "Found matching VDC {}", vdc.name)?;

        let templates = match compute::templates_for_vdc(client, api_url, vdc, token).await {
            Ok(templates) => templates,
            Err(e) => {
                report_failure(out, "Template query", &e)?;
                continue;
            }
        };

        writeln!(out, "Templates for VDC {}:", vdc.name)?;
        let mut found_here = false;
        for template in &templates {
            writeln!(
                out,
                "{}  {}",
                template.name,
                template.description.as_deref().unwrap_or("")
            )?;
            if options
                .template_name
                .as_deref()
                .is_some_and(|n| template.name.eq_ignore_ascii_case(n))
            {
                matched = Some(template.clone());
                found_here = true;
            }
        }

        let networks = &vdc.available_networks.networks;
        if found_here && !networks.is_empty() {
            writeln!(out, "Available networks:")?;
            for network in networks {
                writeln!(
                    out,
                    "NAME: {}  {}",
                    network.name,
                    network.media_type.as_deref().unwrap_or("")
                )?;
            }
        }
    }

    Ok(matched)
}

async fn check_vdc_templates<T: Transport, W: Write>(
    client: &ApiClient<T>,
    api_url: &str,
    options: &VdcsAndTemplatesOptions,
    token: &SessionToken,
    out: &mut W,
) -> Result<()> {
    let templates = match compute::vdc_templates(client, api_url, token).await {
        Ok(templates) => templates,
        Err(e) => return report_failure(out, "VDC template listing", &e),
    };

    writeln!(out, "VDC templates:")?;
    for template in &templates {
        writeln!(out, "{}", template.name)?;
    }

    if let Some(wanted) = options.vdc_template_name.as_deref() {
        match templates.iter().find(|t| t.name.eq_ignore_ascii_case(wanted)) {
            Some(template) => writeln!(
                out,
                "Found matching VDC template {} ({})",
                template.name, template.href
            )?,
            None => writeln!(out, "No VDC template named {}", wanted)?,
        }
    }

    Ok(())
}
