use super::api_client::PlatformApiClient;
use crate::ports::outbound::FindingsPublisher;
use crate::shared::error::PublishError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

const UPLOAD_SLOT_MUTATION: &str = r#"mutation RequestSecurityScanUpload($filename: String!) {
  requestSecurityScanUpload(filename: $filename) {
    upload {
      id
      url
    }
  }
}"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadSlotData {
    request_security_scan_upload: UploadSlotEnvelope,
}

#[derive(Debug, Deserialize)]
struct UploadSlotEnvelope {
    upload: UploadSlot,
}

#[derive(Debug, Deserialize)]
struct UploadSlot {
    id: String,
    url: String,
}

/// HttpFindingsPublisher adapter - two-step upload to the platform
///
/// First a mutation reserves an upload slot (id and pre-signed URL), then the
/// payload file is PUT to that URL.
pub struct HttpFindingsPublisher {
    api: Arc<PlatformApiClient>,
}

impl HttpFindingsPublisher {
    pub fn new(api: Arc<PlatformApiClient>) -> Self {
        Self { api }
    }

    fn request_slot(&self, filename: &str) -> Result<UploadSlot, PublishError> {
        let data: UploadSlotData = self
            .api
            .graphql(
                UPLOAD_SLOT_MUTATION,
                serde_json::json!({ "filename": filename }),
            )
            .map_err(|e| PublishError::Upload {
                details: format!("could not reserve upload slot: {}", e),
            })?;
        let slot = data.request_security_scan_upload.upload;
        if slot.url.is_empty() {
            return Err(PublishError::Upload {
                details: "upload slot has no URL".to_string(),
            });
        }
        Ok(slot)
    }
}

impl FindingsPublisher for HttpFindingsPublisher {
    fn publish(&self, payload_path: &Path) -> Result<(), PublishError> {
        let filename = payload_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "findings.json".to_string());

        let body = fs::read(payload_path).map_err(PublishError::Staging)?;
        let slot = self.request_slot(&filename)?;
        tracing::info!(upload_id = %slot.id, bytes = body.len(), "Uploading findings payload");

        self.api
            .put_file(&slot.url, body)
            .map_err(|e| PublishError::Upload {
                details: format!("{:#}", e),
            })?;
        tracing::info!(upload_id = %slot.id, "Findings payload uploaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_slot_response_decodes() {
        let json = r#"{"requestSecurityScanUpload":{"upload":{"id":"up-1","url":"https://bucket.example.com/put?sig=x"}}}"#;
        let data: UploadSlotData = serde_json::from_str(json).unwrap();
        assert_eq!(data.request_security_scan_upload.upload.id, "up-1");
        assert!(data.request_security_scan_upload.upload.url.starts_with("https://"));
    }
}
