//! Plans and service instances

use super::{connect, report_failure};
use crate::report::{cell, Table};
use crate::vchs::auth::Credentials;
use crate::vchs::http::Transport;
use crate::vchs::{service_controller, ApiClient};
use anyhow::Result;
use std::io::Write;

pub async fn run<T: Transport, W: Write>(
    client: &ApiClient<T>,
    credentials: &Credentials,
    out: &mut W,
) -> Result<()> {
    let token = connect(client, credentials, out).await?;
    let host = credentials.host.as_str();

    match service_controller::list_plans(client, host, &token).await {
        Ok(plans) => {
            writeln!(out, "Plans:")?;
            let table = Table::new(&[("ID", 38), ("Name", 34), ("Service", 30), ("Region", 20)]);
            table.write_header(out)?;
            for plan in &plans {
                table.write_row(
                    out,
                    &[
                        &plan.id,
                        &plan.name,
                        &cell(&plan.service_name),
                        &cell(&plan.region),
                    ],
                )?;
            }
            writeln!(out)?;
        }
        Err(e) => report_failure(out, "Plan listing", &e)?,
    }

    match service_controller::list_instances(client, host, &token).await {
        Ok(instances) => {
            writeln!(out, "Instances:")?;
            let table = Table::new(&[("ID", 38), ("Name", 34), ("Region", 20), ("Plan", 38)]);
            table.write_header(out)?;
            for instance in &instances {
                table.write_row(
                    out,
                    &[
                        &instance.id,
                        &instance.name,
                        &instance.region,
                        &cell(&instance.plan_id),
                    ],
                )?;
            }
        }
        Err(e) => report_failure(out, "Instance listing", &e)?,
    }

    Ok(())
}
