use crate::inventory::domain::{Application, Library, ScanResult};
use serde::{Deserialize, Serialize};

/// Top-level document printed by the scanner with `--format json`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScanDocument {
    #[serde(default)]
    pub result: ScanBody,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScanBody {
    #[serde(default)]
    pub libraries: Vec<LibraryEntry>,
    #[serde(default)]
    pub applications: Vec<ApplicationEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub path: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecosystem: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplicationEntry {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}

impl From<ScanDocument> for ScanResult {
    fn from(document: ScanDocument) -> Self {
        let libraries = document
            .result
            .libraries
            .into_iter()
            .map(|entry| Library {
                path: entry.path,
                name: entry.name,
                version: entry.version,
                ecosystem: entry.ecosystem,
            })
            .collect();
        let applications = document
            .result
            .applications
            .into_iter()
            .map(|entry| Application {
                name: entry.name,
                version: entry.version,
                vendor: entry.vendor,
            })
            .collect();
        ScanResult::new(libraries, applications)
    }
}

impl From<&ScanResult> for ScanDocument {
    fn from(result: &ScanResult) -> Self {
        Self {
            result: ScanBody {
                libraries: result
                    .libraries
                    .iter()
                    .map(|lib| LibraryEntry {
                        path: lib.path.clone(),
                        name: lib.name.clone(),
                        version: lib.version.clone(),
                        ecosystem: lib.ecosystem.clone(),
                    })
                    .collect(),
                applications: result
                    .applications
                    .iter()
                    .map(|app| ApplicationEntry {
                        name: app.name.clone(),
                        version: app.version.clone(),
                        vendor: app.vendor.clone(),
                    })
                    .collect(),
            },
        }
    }
}

/// Parses scanner JSON output, keeping the order the scanner emitted.
pub fn parse_scan_output(bytes: &[u8]) -> serde_json::Result<ScanResult> {
    let document: ScanDocument = serde_json::from_slice(bytes)?;
    Ok(document.into())
}
