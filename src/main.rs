mod cli;

use anyhow::Context;
use cli::Args;
use hostvuln::adapters::outbound::console::StderrProgressReporter;
use hostvuln::adapters::outbound::filesystem::discover_volumes;
use hostvuln::adapters::outbound::fixtures::{FixtureVulnerabilityFeed, RecordingVulnerabilityFeed};
use hostvuln::adapters::outbound::network::{GraphQlFeedSource, PagedVulnerabilityFeed, PlatformApiClient};
use hostvuln::adapters::outbound::scanner::{
    FixtureInventoryScanner, ProcessInventoryScanner, RecordingInventoryScanner,
};
use hostvuln::adapters::outbound::snapshot::PassthroughSnapshotProvider;
use hostvuln::application::dto::{ScanOutcome, ScanRequest};
use hostvuln::application::factories::{
    PublisherFactory, PublisherType, SnapshotProviderFactory,
};
use hostvuln::application::use_cases::RunScanUseCase;
use hostvuln::config::{discover_config, load_config_from_path, warn_unknown_fields, RunSettings};
use hostvuln::inventory::domain::{AssetIdentifier, Volume};
use hostvuln::ports::outbound::{InventoryScanner, SnapshotProvider, VulnerabilityFeed};
use hostvuln::shared::error::ExitCode;
use hostvuln::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();

    match run(args) {
        Ok(outcome) => {
            println!("{}", outcome);
            process::exit(ExitCode::Success.as_i32());
        }
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("hostvuln={}", level.trim().to_lowercase())))
        .unwrap_or_else(|_| EnvFilter::new("hostvuln=info"));

    // A second init (only possible in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<ScanOutcome> {
    let file_config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&std::env::current_dir()?)?.unwrap_or_default(),
    };
    let merged = file_config.merge(args.to_overrides());

    init_logging(merged.log_level.as_deref().unwrap_or("info"));
    warn_unknown_fields(&merged);

    let settings = RunSettings::resolve(merged)?;
    tracing::debug!(offline = settings.is_offline(), snapshot_mode = %settings.snapshot_mode, "Configuration resolved");

    let volumes = resolve_volumes(&settings)?;
    tracing::info!(volumes = ?volumes.iter().map(Volume::root).collect::<Vec<_>>(), "Volumes to scan");

    // Create adapters (Dependency Injection)
    let api = match &settings.credentials {
        Some(credentials) => Some(Arc::new(PlatformApiClient::connect(credentials)?)),
        None => None,
    };

    let resource_id = match (&settings.resource_id, &api, &settings.fixture_dir) {
        (Some(resource_id), _, _) => resource_id.clone(),
        (None, Some(api), None) => {
            api.resolve_resource_id(&settings.cloud_platform, &settings.provider_id)?
        }
        _ => settings.provider_id.clone(),
    };

    let feed = build_feed(&settings, api.as_ref())?;
    let scanner = build_scanner(&settings)?;

    let mount_root = std::env::temp_dir().join(format!("hostvuln-mnt-{}", uuid::Uuid::new_v4()));
    let snapshot_provider: Box<dyn SnapshotProvider> = if settings.fixture_dir.is_some() {
        Box::new(PassthroughSnapshotProvider::new())
    } else {
        SnapshotProviderFactory::create(settings.snapshot_mode, mount_root.clone())
    };

    let publisher = match (&settings.output, &api) {
        (Some(path), _) => PublisherFactory::create(PublisherType::File(path.clone())),
        (None, Some(api)) => PublisherFactory::create(PublisherType::Upload(Arc::clone(api))),
        (None, None) => anyhow::bail!("No publisher available: set --output or API credentials"),
    };

    let use_case = RunScanUseCase::new(
        snapshot_provider,
        scanner,
        feed,
        publisher,
        StderrProgressReporter::new(),
    );

    let request = ScanRequest::new(
        volumes,
        resource_id,
        settings.subscription_id.clone(),
        AssetIdentifier::new(settings.cloud_platform.clone(), settings.provider_id.clone()),
        settings.integration_id,
    )
    .with_version_matching(settings.version_matching);

    let outcome = use_case.execute(request);
    remove_mount_root(&mount_root);
    outcome
}

fn resolve_volumes(settings: &RunSettings) -> Result<Vec<Volume>> {
    if settings.volumes.is_empty() {
        return discover_volumes();
    }
    settings
        .volumes
        .iter()
        .map(|root| Volume::new(root.as_str()))
        .collect()
}

fn build_feed(
    settings: &RunSettings,
    api: Option<&Arc<PlatformApiClient>>,
) -> Result<Box<dyn VulnerabilityFeed>> {
    let feed: Box<dyn VulnerabilityFeed> = match (&settings.fixture_dir, api) {
        (Some(dir), _) => Box::new(FixtureVulnerabilityFeed::new(dir.clone())),
        (None, Some(api)) => Box::new(PagedVulnerabilityFeed::new(
            GraphQlFeedSource::new(Arc::clone(api)).with_page_size(settings.page_size),
        )),
        (None, None) => anyhow::bail!("No vulnerability feed available: set --fixture-dir or API credentials"),
    };

    Ok(match &settings.record_fixtures_dir {
        Some(dir) => Box::new(RecordingVulnerabilityFeed::new(feed, dir.clone())) as Box<dyn VulnerabilityFeed>,
        None => feed,
    })
}

fn build_scanner(settings: &RunSettings) -> Result<Box<dyn InventoryScanner>> {
    let scanner: Box<dyn InventoryScanner> = match &settings.fixture_dir {
        Some(dir) => Box::new(FixtureInventoryScanner::new(dir.clone())),
        None => {
            let scanner_path = settings
                .scanner_path
                .clone()
                .context("A scanner path is required outside fixture mode")?;
            let scanner = ProcessInventoryScanner::new(scanner_path);
            match &settings.scanner_args {
                Some(scanner_args) => Box::new(scanner.with_args(scanner_args.clone())),
                None => Box::new(scanner),
            }
        }
    };

    Ok(match &settings.record_fixtures_dir {
        Some(dir) => Box::new(RecordingInventoryScanner::new(scanner, dir.clone())) as Box<dyn InventoryScanner>,
        None => scanner,
    })
}

/// Removes the run's snapshot mount directory once every link in it is gone.
fn remove_mount_root(mount_root: &Path) {
    if mount_root.exists() {
        if let Err(e) = std::fs::remove_dir(mount_root) {
            tracing::warn!(path = %mount_root.display(), error = %e, "Failed to remove snapshot mount directory");
        }
    }
}
