//! Runnable samples
//!
//! Each sample logs in, walks a few endpoints and prints what it finds to
//! the writer it is given. Calls run one after another so the output order
//! matches the order of the requests.
//!
//! - [`vdc_vm_ids`] - VDC and VM ids of every compute instance
//! - [`vdcs_and_templates`] - templates and networks of one VDC
//! - [`metering_and_billing`] - usage and cost tables
//! - [`users`] - IAM users
//! - [`instances`] - plans and service instances

pub mod instances;
pub mod metering_and_billing;
pub mod users;
pub mod vdc_vm_ids;
pub mod vdcs_and_templates;

use crate::vchs::auth::{Credentials, SessionToken};
use crate::vchs::http::Transport;
use crate::vchs::{format_api_error, iam, ApiClient, VchsError};
use anyhow::{Context, Result};
use std::io::Write;

/// Log in to vCHS, reporting progress on `out`
pub(crate) async fn connect<T: Transport, W: Write>(
    client: &ApiClient<T>,
    credentials: &Credentials,
    out: &mut W,
) -> Result<SessionToken> {
    write!(out, "\nConnecting to vCHS...")?;
    out.flush()?;

    match iam::login(client, credentials).await {
        Ok(token) => {
            writeln!(out, "Success\n")?;
            Ok(token)
        }
        Err(e) => {
            writeln!(out, "Failed")?;
            writeln!(out, "{}\n", format_api_error(&e))?;
            Err(e).context("Could not log in with provided credentials")
        }
    }
}

/// Print a one-line diagnostic for a failed call and keep going
pub(crate) fn report_failure<W: Write>(out: &mut W, what: &str, error: &VchsError) -> Result<()> {
    tracing::warn!("{} failed: {}", what, error);
    writeln!(out, "{}: {}", what, format_api_error(error))?;
    Ok(())
}
