use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use vchs_samples::config::Config;
use vchs_samples::samples::{
    instances, metering_and_billing, users, vdc_vm_ids, vdcs_and_templates,
};
use vchs_samples::vchs::auth::Credentials;
use vchs_samples::vchs::ApiClient;

/// Command-line samples for the vCloud Hybrid Service REST APIs
#[derive(Parser, Debug)]
#[command(name = "vchs-samples", version = vchs_samples::VERSION, about, long_about = None)]
struct Args {
    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the VDC and VM ids of every compute instance
    VdcVmIds {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Fetch VMs of all VDCs of an instance concurrently
        #[arg(long)]
        parallel: bool,
    },

    /// Show templates and networks of one VDC and check VDC templates
    VdcsAndTemplates {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Region of the compute instance to use
        #[arg(long)]
        region: String,

        /// VDC to inspect, by name
        #[arg(long, required_unless_present = "vdc_id")]
        vdc_name: Option<String>,

        /// VDC to inspect, by id
        #[arg(long)]
        vdc_id: Option<String>,

        /// vApp template to look for
        #[arg(long)]
        template_name: Option<String>,

        /// VDC template to look for
        #[arg(long)]
        vdc_template_name: Option<String>,
    },

    /// Print billed costs and billable usage
    MeteringAndBilling {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Service instance id
        #[arg(long = "sid")]
        service_instance_id: String,

        /// L1 entity id
        #[arg(long = "l1")]
        l1_id: String,

        /// L2 entity id
        #[arg(long = "l2")]
        l2_id: Option<String>,

        /// Service group id
        #[arg(long)]
        service_group: Option<String>,
    },

    /// Show the current user and list IAM users
    Users {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Show only this user
        #[arg(long)]
        user_id: Option<String>,
    },

    /// List plans and service instances
    Instances {
        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Save default hostname, version and certificate handling
    Configure {
        #[arg(long)]
        hostname: Option<String>,

        #[arg(long = "api-version")]
        api_version: Option<String>,

        /// Accept invalid TLS certificates by default
        #[arg(long)]
        insecure: Option<bool>,
    },
}

#[derive(ClapArgs, Debug)]
struct ConnectionArgs {
    /// vCHS host, e.g. vchs.vmware.com
    #[arg(long)]
    hostname: Option<String>,

    #[arg(short, long)]
    username: String,

    #[arg(short, long, env = "VCHS_PASSWORD", hide_env_values = true)]
    password: String,

    /// API version sent in the Accept header
    #[arg(long = "api-version")]
    api_version: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long)]
    insecure: bool,
}

impl ConnectionArgs {
    fn connect(&self, config: &Config) -> Result<(ApiClient, Credentials)> {
        let host = config.effective_host(self.hostname.as_deref())?;
        let version = config.effective_version(self.api_version.as_deref());
        let insecure = config.effective_accept_invalid_certs(self.insecure);

        tracing::info!("Using host: {}, version: {}", host, version);

        let client = ApiClient::new(&version, insecure).context("Failed to build HTTP client")?;
        let credentials = Credentials::new(&host, &self.username, &self.password);
        Ok((client, credentials))
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled, cannot open {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let level_name = tracing_level.as_str().to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("vchs_samples={},reqwest=warn", level_name))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("vchs-samples started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("vchs-samples").join("vchs-samples.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".vchs-samples").join("vchs-samples.log");
    }
    PathBuf::from("vchs-samples.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let config = Config::load();
    let mut stdout = io::stdout().lock();

    let result = run(args.command, config, &mut stdout).await;
    stdout.flush()?;
    result
}

async fn run<W: Write>(command: Command, config: Config, out: &mut W) -> Result<()> {
    match command {
        Command::VdcVmIds {
            connection,
            parallel,
        } => {
            let (client, credentials) = connection.connect(&config)?;
            let options = vdc_vm_ids::VdcVmIdsOptions { parallel };
            vdc_vm_ids::run(&client, &credentials, &options, out).await
        }
        Command::VdcsAndTemplates {
            connection,
            region,
            vdc_name,
            vdc_id,
            template_name,
            vdc_template_name,
        } => {
            let (client, credentials) = connection.connect(&config)?;
            let options = vdcs_and_templates::VdcsAndTemplatesOptions {
                region,
                vdc_name,
                vdc_id,
                template_name,
                vdc_template_name,
            };
            vdcs_and_templates::run(&client, &credentials, &options, out).await
        }
        Command::MeteringAndBilling {
            connection,
            service_instance_id,
            l1_id,
            l2_id,
            service_group,
        } => {
            let (client, credentials) = connection.connect(&config)?;
            let options = metering_and_billing::MeteringAndBillingOptions {
                service_instance_id,
                l1_id,
                l2_id,
                service_group_id: service_group,
            };
            metering_and_billing::run(&client, &credentials, &options, out).await
        }
        Command::Users {
            connection,
            user_id,
        } => {
            let (client, credentials) = connection.connect(&config)?;
            let options = users::UsersOptions { user_id };
            users::run(&client, &credentials, &options, out).await
        }
        Command::Instances { connection } => {
            let (client, credentials) = connection.connect(&config)?;
            instances::run(&client, &credentials, out).await
        }
        Command::Configure {
            hostname,
            api_version,
            insecure,
        } => configure(config, hostname, api_version, insecure, out),
    }
}

fn configure<W: Write>(
    mut config: Config,
    hostname: Option<String>,
    version: Option<String>,
    insecure: Option<bool>,
    out: &mut W,
) -> Result<()> {
    if let Some(hostname) = hostname {
        vchs_samples::config::normalize_host(&hostname)?;
        config.hostname = Some(hostname);
    }
    if let Some(version) = version {
        config.version = Some(version);
    }
    if let Some(insecure) = insecure {
        config.accept_invalid_certs = insecure;
    }

    let path = config.save()?;
    writeln!(out, "Saved configuration to {}", path.display())?;
    writeln!(
        out,
        "hostname: {}",
        config.hostname.as_deref().unwrap_or("(default)")
    )?;
    writeln!(
        out,
        "version:  {}",
        config.version.as_deref().unwrap_or("(default)")
    )?;
    writeln!(out, "insecure: {}", config.accept_invalid_certs)?;
    Ok(())
}
