use clap::Parser;
use hostvuln::config::ConfigFile;
use std::path::PathBuf;

/// Snapshot every volume, inventory installed software and report the
/// packages that match known vulnerabilities of this host's cloud resource
#[derive(Parser, Debug, Default)]
#[command(name = "hostvuln")]
#[command(version)]
#[command(about = "Host vulnerability sweep for cloud workloads", long_about = None)]
pub struct Args {
    /// Path to a config file (defaults to ./hostvuln.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// API client id
    #[arg(long)]
    pub client_id: Option<String>,

    /// API client secret
    #[arg(long)]
    pub client_secret: Option<String>,

    /// OAuth token endpoint
    #[arg(long)]
    pub auth_url: Option<String>,

    /// GraphQL endpoint
    #[arg(long)]
    pub query_url: Option<String>,

    /// Audience sent with the token request
    #[arg(long)]
    pub auth_audience: Option<String>,

    /// Subscription / account id used as the payload data source id
    #[arg(long)]
    pub subscription_id: Option<String>,

    /// Cloud platform of this host (e.g. AWS, Azure, GCP)
    #[arg(long)]
    pub cloud_platform: Option<String>,

    /// Provider resource id of this host (instance id, VM resource id)
    #[arg(long)]
    pub provider_id: Option<String>,

    /// Platform resource id; looked up from platform and provider id when omitted
    #[arg(long)]
    pub resource_id: Option<String>,

    /// Path to the inventory scanner executable
    #[arg(long, value_name = "PATH")]
    pub scanner_path: Option<PathBuf>,

    /// Scanner argument, repeatable; `{path}` is replaced by the mount path
    #[arg(long = "scanner-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub scanner_args: Vec<String>,

    /// Volume root to scan, repeatable (defaults to every local volume)
    #[arg(short, long = "volume", value_name = "ROOT")]
    pub volumes: Vec<String>,

    /// Snapshot mode: auto, native or passthrough
    #[arg(long)]
    pub snapshot_mode: Option<String>,

    /// Version matching: exact or range
    #[arg(long)]
    pub version_matching: Option<String>,

    /// Integration id written into the payload
    #[arg(long)]
    pub integration_id: Option<String>,

    /// Records requested per feed page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Log level: trace, debug, info, warn or error (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Replay scanner output and feed from this directory
    #[arg(long, value_name = "DIR")]
    pub fixture_dir: Option<PathBuf>,

    /// Save live scanner output and feed into this directory
    #[arg(long, value_name = "DIR")]
    pub record_fixtures_dir: Option<PathBuf>,

    /// Write the payload to this file instead of uploading it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Converts the flags into a config layer that overrides the file.
    pub fn to_overrides(&self) -> ConfigFile {
        ConfigFile {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            auth_url: self.auth_url.clone(),
            query_url: self.query_url.clone(),
            auth_audience: self.auth_audience.clone(),
            subscription_id: self.subscription_id.clone(),
            cloud_platform: self.cloud_platform.clone(),
            provider_id: self.provider_id.clone(),
            resource_id: self.resource_id.clone(),
            scanner_path: self.scanner_path.clone(),
            scanner_args: non_empty(&self.scanner_args),
            volumes: non_empty(&self.volumes),
            snapshot_mode: self.snapshot_mode.clone(),
            version_matching: self.version_matching.clone(),
            integration_id: self.integration_id.clone(),
            page_size: self.page_size,
            log_level: self.log_level.clone(),
            fixture_dir: self.fixture_dir.clone(),
            record_fixtures_dir: self.record_fixtures_dir.clone(),
            output: self.output.clone(),
            unknown_fields: Default::default(),
        }
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}
