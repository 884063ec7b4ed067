//! vCloud Hybrid Service REST API samples
//!
//! [`vchs`] holds the HTTP plumbing and typed callers for each service;
//! [`samples`] strings them together into runnable walkthroughs.

pub mod config;
pub mod report;
pub mod samples;
pub mod vchs;

/// Version injected at compile time via VCHS_SAMPLES_VERSION env var (set by
/// CI/CD), or "dev" for local builds.
pub const VERSION: &str = match option_env!("VCHS_SAMPLES_VERSION") {
    Some(v) => v,
    None => "dev",
};
