//! Configuration file support for hostvuln.
//!
//! Provides YAML-based configuration through `hostvuln.config.yml` files,
//! merging with command-line overrides, and validation into [`RunSettings`].

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

use crate::adapters::outbound::network::{PlatformCredentials, DEFAULT_PAGE_SIZE};
use crate::application::factories::SnapshotMode;
use crate::inventory::domain::Volume;
use crate::inventory::policies::VersionMatching;
use crate::inventory::services::DEFAULT_INTEGRATION_ID;
use crate::shared::error::ConfigError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "hostvuln.config.yml";

const MAX_PAGE_SIZE: u32 = 5000;
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Top-level configuration file schema.
///
/// Every field is optional here; [`RunSettings::resolve`] decides what is
/// actually required. The command line produces a value of the same shape
/// and is layered on top with [`ConfigFile::merge`].
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub auth_url: Option<String>,
    pub query_url: Option<String>,
    pub auth_audience: Option<String>,
    pub subscription_id: Option<String>,
    pub cloud_platform: Option<String>,
    pub provider_id: Option<String>,
    pub resource_id: Option<String>,
    pub scanner_path: Option<PathBuf>,
    pub scanner_args: Option<Vec<String>>,
    pub volumes: Option<Vec<String>>,
    pub snapshot_mode: Option<String>,
    pub version_matching: Option<String>,
    pub integration_id: Option<String>,
    pub page_size: Option<u32>,
    pub log_level: Option<String>,
    pub fixture_dir: Option<PathBuf>,
    pub record_fixtures_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Layers `overrides` on top of `self`; any value set in `overrides` wins.
    pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            client_id: overrides.client_id.or(self.client_id),
            client_secret: overrides.client_secret.or(self.client_secret),
            auth_url: overrides.auth_url.or(self.auth_url),
            query_url: overrides.query_url.or(self.query_url),
            auth_audience: overrides.auth_audience.or(self.auth_audience),
            subscription_id: overrides.subscription_id.or(self.subscription_id),
            cloud_platform: overrides.cloud_platform.or(self.cloud_platform),
            provider_id: overrides.provider_id.or(self.provider_id),
            resource_id: overrides.resource_id.or(self.resource_id),
            scanner_path: overrides.scanner_path.or(self.scanner_path),
            scanner_args: overrides.scanner_args.or(self.scanner_args),
            volumes: overrides.volumes.or(self.volumes),
            snapshot_mode: overrides.snapshot_mode.or(self.snapshot_mode),
            version_matching: overrides.version_matching.or(self.version_matching),
            integration_id: overrides.integration_id.or(self.integration_id),
            page_size: overrides.page_size.or(self.page_size),
            log_level: overrides.log_level.or(self.log_level),
            fixture_dir: overrides.fixture_dir.or(self.fixture_dir),
            record_fixtures_dir: overrides.record_fixtures_dir.or(self.record_fixtures_dir),
            output: overrides.output.or(self.output),
            unknown_fields: self.unknown_fields,
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Warn about unknown fields in the config file.
///
/// Called by the binary once logging is up, since the log level itself may
/// come from the file.
pub fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "Unknown config field will be ignored");
    }
}

/// Validated settings for one run
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// `None` only for fully offline runs
    pub credentials: Option<PlatformCredentials>,
    pub subscription_id: String,
    pub cloud_platform: String,
    pub provider_id: String,
    pub resource_id: Option<String>,
    pub scanner_path: Option<PathBuf>,
    pub scanner_args: Option<Vec<String>>,
    /// Empty means discover volumes on the host
    pub volumes: Vec<String>,
    pub snapshot_mode: SnapshotMode,
    pub version_matching: VersionMatching,
    pub integration_id: Uuid,
    pub page_size: u32,
    pub log_level: String,
    pub fixture_dir: Option<PathBuf>,
    pub record_fixtures_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl RunSettings {
    /// Validates a merged configuration.
    pub fn resolve(config: ConfigFile) -> std::result::Result<Self, ConfigError> {
        let subscription_id = required(config.subscription_id, "subscription_id", "subscription-id")?;
        let cloud_platform = required(config.cloud_platform, "cloud_platform", "cloud-platform")?;
        let provider_id = required(config.provider_id, "provider_id", "provider-id")?;

        let fixture_dir = config.fixture_dir;
        let output = config.output;
        let offline = fixture_dir.is_some() && output.is_some();

        let scanner_path = config.scanner_path.filter(|p| !p.as_os_str().is_empty());
        if scanner_path.is_none() && fixture_dir.is_none() {
            return Err(ConfigError::Missing {
                field: "scanner_path",
                flag: "scanner-path",
            });
        }

        let credentials = if offline {
            None
        } else {
            Some(PlatformCredentials {
                client_id: required(config.client_id, "client_id", "client-id")?,
                client_secret: required(config.client_secret, "client_secret", "client-secret")?,
                auth_url: required(config.auth_url, "auth_url", "auth-url")?,
                query_url: required(config.query_url, "query_url", "query-url")?,
                audience: non_blank(config.auth_audience),
            })
        };

        let snapshot_mode = match config.snapshot_mode {
            Some(mode) => SnapshotMode::from_str(&mode).map_err(|reason| ConfigError::Invalid {
                field: "snapshot_mode",
                reason,
            })?,
            None => SnapshotMode::default(),
        };

        let version_matching = match config.version_matching {
            Some(mode) => {
                VersionMatching::from_str(&mode).map_err(|reason| ConfigError::Invalid {
                    field: "version_matching",
                    reason,
                })?
            }
            None => VersionMatching::default(),
        };

        let integration_id_text = config
            .integration_id
            .unwrap_or_else(|| DEFAULT_INTEGRATION_ID.to_string());
        let integration_id =
            Uuid::parse_str(integration_id_text.trim()).map_err(|e| ConfigError::Invalid {
                field: "integration_id",
                reason: format!("'{}' is not a UUID: {}", integration_id_text, e),
            })?;

        let page_size = config.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid {
                field: "page_size",
                reason: format!("{} is outside 1..={}", page_size, MAX_PAGE_SIZE),
            });
        }

        let log_level = config
            .log_level
            .unwrap_or_else(|| "info".to_string())
            .trim()
            .to_lowercase();
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(ConfigError::Invalid {
                field: "log_level",
                reason: format!(
                    "'{}' is not one of {}",
                    log_level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        let volumes: Vec<String> = config
            .volumes
            .unwrap_or_default()
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .collect();
        check_volume_keys(&volumes)?;

        Ok(RunSettings {
            credentials,
            subscription_id,
            cloud_platform,
            provider_id,
            resource_id: non_blank(config.resource_id),
            scanner_path,
            scanner_args: config.scanner_args,
            volumes,
            snapshot_mode,
            version_matching,
            integration_id,
            page_size,
            log_level,
            fixture_dir,
            record_fixtures_dir: config.record_fixtures_dir,
            output,
        })
    }

    /// True when neither the feed nor the publisher touches the network.
    pub fn is_offline(&self) -> bool {
        self.credentials.is_none()
    }
}

/// Two roots sharing a key would share one `scan-<key>.json` fixture.
fn check_volume_keys(roots: &[String]) -> std::result::Result<(), ConfigError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for root in roots {
        let key = Volume::new(root.as_str())
            .map_err(|e| ConfigError::Invalid {
                field: "volumes",
                reason: e.to_string(),
            })?
            .key();
        if let Some(previous) = seen.insert(key.clone(), root.as_str()) {
            return Err(ConfigError::Invalid {
                field: "volumes",
                reason: format!(
                    "'{}' and '{}' both map to volume key '{}'",
                    previous, root, key
                ),
            });
        }
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(
    value: Option<String>,
    field: &'static str,
    flag: &'static str,
) -> std::result::Result<String, ConfigError> {
    non_blank(value).ok_or(ConfigError::Missing { field, flag })
}
