//! List VDC and VM ids
//!
//! For every on-demand compute instance: log in to its compute endpoint,
//! then print each VDC followed by its VMs, ids reduced to their URN suffix.

use super::{connect, report_failure};
use crate::vchs::auth::Credentials;
use crate::vchs::compute::{self, Vdc, Vm};
use crate::vchs::http::Transport;
use crate::vchs::service_controller::{self, Instance};
use crate::vchs::{format_api_error, urn, ApiClient, Result as ApiResult};
use anyhow::{Context, Result};
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct VdcVmIdsOptions {
    /// Fetch the VMs of all VDCs of an instance concurrently
    pub parallel: bool,
}

pub async fn run<T: Transport, W: Write>(
    client: &ApiClient<T>,
    credentials: &Credentials,
    options: &VdcVmIdsOptions,
    out: &mut W,
) -> Result<()> {
    let token = connect(client, credentials, out).await?;

    let instances = service_controller::list_instances(client, &credentials.host, &token)
        .await
        .context("Failed to list service instances")?;

    for instance in instances.iter().filter(|i| i.is_compute()) {
        list_instance(client, credentials, instance, options, out).await?;
    }

    Ok(())
}

async fn list_instance<T: Transport, W: Write>(
    client: &ApiClient<T>,
    credentials: &Credentials,
    instance: &Instance,
    options: &VdcVmIdsOptions,
    out: &mut W,
) -> Result<()> {
    let attrs = match instance.attributes() {
        Ok(attrs) => attrs,
        Err(e) => return report_failure(out, &format!("Instance {}", instance.id), &e),
    };
    let Some(api_url) = instance.api_url.as_deref() else {
        writeln!(out, "Instance {} has no API URL\n", instance.id)?;
        return Ok(());
    };

    write!(
        out,
        "Logging in to compute instance - region: {}...",
        instance.region
    )?;
    out.flush()?;
    let vcd_token =
        match compute::login(client, &attrs.session_uri, credentials, &attrs.org_name).await {
            Ok(token) => {
                writeln!(out, "Success.\n")?;
                token
            }
            Err(e) => {
                tracing::warn!("Compute login for {} failed: {}", instance.region, e);
                writeln!(out, "Could not log in to compute with credentials\n")?;
                return Ok(());
            }
        };

    let orgs = match compute::org_list(client, api_url, &vcd_token).await {
        Ok(orgs) => orgs,
        Err(e) => return report_failure(out, "Org listing", &e),
    };
    let vdcs = match compute::vdcs_for_org_list(client, &orgs, &vcd_token).await {
        Ok(vdcs) => vdcs,
        Err(e) => return report_failure(out, "VDC listing", &e),
    };

    if options.parallel {
        let all_vms = compute::vms_for_vdcs(client, &vdcs, &vcd_token).await;
        for (vdc, vms) in vdcs.iter().zip(all_vms) {
            write_vdc(out, vdc, vms)?;
        }
    } else {
        for vdc in &vdcs {
            let vms = compute::vms_for_vdc(client, vdc, &vcd_token).await;
            write_vdc(out, vdc, vms)?;
        }
    }
    writeln!(out)?;

    Ok(())
}

fn write_vdc<W: Write>(out: &mut W, vdc: &Vdc, vms: ApiResult<Vec<Vm>>) -> Result<()> {
    writeln!(
        out,
        "VDC {}  ID: {}",
        vdc.name,
        urn::vdc_suffix(&vdc.id).unwrap_or("-")
    )?;
    match vms {
        Ok(vms) if !vms.is_empty() => {
            for vm in &vms {
                writeln!(
                    out,
                    "VM {}  ID: {}",
                    vm.name,
                    urn::vm_suffix(&vm.id).unwrap_or("-")
                )?;
            }
        }
        Ok(_) => writeln!(out, "No VMs found.")?,
        Err(e) => {
            tracing::warn!("VM listing for {} failed: {}", vdc.name, e);
            writeln!(out, "No VMs found. ({})", format_api_error(&e))?;
        }
    }
    Ok(())
}
