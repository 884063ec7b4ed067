//! Metering and billing
//!
//! Prints billed costs and billable usage for a service instance, its L1
//! entity, and optionally an L2 entity and a service group.

use super::{connect, report_failure};
use crate::report::{cell, Table};
use crate::vchs::auth::Credentials;
use crate::vchs::http::Transport;
use crate::vchs::usage::UsageReport;
use crate::vchs::{billing, metering, ApiClient, Result as ApiResult};
use anyhow::Result;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct MeteringAndBillingOptions {
    pub service_instance_id: String,
    pub l1_id: String,
    pub l2_id: Option<String>,
    pub service_group_id: Option<String>,
}

pub async fn run<T: Transport, W: Write>(
    client: &ApiClient<T>,
    credentials: &Credentials,
    options: &MeteringAndBillingOptions,
    out: &mut W,
) -> Result<()> {
    let token = connect(client, credentials, out).await?;
    let host = credentials.host.as_str();
    let sid = options.service_instance_id.as_str();

    let billed = billing::l1_billed_usage(client, host, &token, sid, &options.l1_id).await;
    write_section(out, "Billed usage for L1", billed, write_cost_table)?;

    let usage = metering::billable_usage(client, host, &token, sid).await;
    write_section(out, "Billable usage", usage, write_usage_tables)?;

    if let Some(l2_id) = options.l2_id.as_deref() {
        let billed = billing::l2_billed_usage(client, host, &token, sid, l2_id).await;
        write_section(out, "Billed usage for L2", billed, write_cost_table)?;

        let usage = metering::l2_billable_usage(client, host, &token, sid, l2_id).await;
        write_section(out, "Billable usage for L2", usage, write_usage_tables)?;
    }

    if let Some(group_id) = options.service_group_id.as_deref() {
        let billed = billing::billed_costs(client, host, &token, group_id).await;
        write_section(out, "Billed costs", billed, write_cost_table)?;

        let costs = metering::billable_costs(client, host, &token, group_id).await;
        write_section(out, "Billable costs", costs, write_cost_table)?;
    }

    Ok(())
}

fn write_section<W: Write>(
    out: &mut W,
    what: &str,
    report: ApiResult<UsageReport>,
    write: fn(&mut W, &UsageReport) -> Result<()>,
) -> Result<()> {
    match report {
        Ok(report) => write(out, &report),
        Err(e) => report_failure(out, what, &e),
    }
}

/// One row per billable line across all entities
pub fn write_cost_table<W: Write>(out: &mut W, report: &UsageReport) -> Result<()> {
    if report.entity.is_empty() {
        return Ok(());
    }

    let table = Table::new(&[
        ("Name", 38),
        ("Amount", 30),
        ("Currency", 20),
        ("Rate", 20),
        ("Unit", 20),
    ]);
    table.write_header(out)?;
    for bill in report.entity.iter().flat_map(|e| e.billables()) {
        table.write_row(
            out,
            &[
                &bill.name,
                &cell(&bill.cost),
                &cell(&bill.currency),
                &cell(&bill.rate),
                &cell(&bill.unit),
            ],
        )?;
    }
    writeln!(out)?;
    Ok(())
}

/// Entity rows, each followed by its billable lines
pub fn write_usage_tables<W: Write>(out: &mut W, report: &UsageReport) -> Result<()> {
    if report.entity.is_empty() {
        return Ok(());
    }

    let entities = Table::new(&[("Name", 38), ("Type", 30)]);
    let lines = Table::new(&[
        ("Name", 40),
        ("Cost", 20),
        ("Rate", 20),
        ("Usage", 20),
        ("Unit", 20),
        ("Currency", 20),
    ]);

    entities.write_header(out)?;
    for entity in &report.entity {
        entities.write_row(out, &[&entity.name, &cell(&entity.entity_type)])?;

        let billables = entity.billables();
        if billables.is_empty() {
            continue;
        }
        lines.write_header(out)?;
        for billable in billables {
            lines.write_row(
                out,
                &[
                    &billable.name,
                    &cell(&billable.cost),
                    &cell(&billable.rate),
                    &cell(&billable.usage),
                    &cell(&billable.unit),
                    &cell(&billable.currency),
                ],
            )?;
        }
    }
    writeln!(out)?;
    Ok(())
}
