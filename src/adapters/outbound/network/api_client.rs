use crate::shared::Result;
use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const RESOURCE_LOOKUP_QUERY: &str = r#"query CloudResourceLookup($filterBy: CloudResourceFilters, $first: Int) {
  cloudResources(filterBy: $filterBy, first: $first) {
    nodes {
      id
      name
      type
    }
  }
}"#;

/// Credentials and endpoints for the vulnerability platform API
///
/// `Debug` is implemented by hand so the secret never reaches a log line.
#[derive(Clone)]
pub struct PlatformCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub query_url: String,
    pub audience: Option<String>,
}

impl std::fmt::Debug for PlatformCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("auth_url", &self.auth_url)
            .field("query_url", &self.query_url)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Failure of a single GraphQL round trip
#[derive(Debug, Error)]
pub enum GraphQlError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("query errors: {0}")]
    Errors(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Authenticated client for the platform's GraphQL API
///
/// The access token is obtained once, at construction, through the OAuth
/// client-credentials grant. Requests are blocking and never retried.
pub struct PlatformApiClient {
    client: Client,
    query_url: String,
    access_token: String,
}

impl PlatformApiClient {
    const TIMEOUT_SECONDS: u64 = 60;

    /// Exchanges the client credentials for an access token.
    pub fn connect(credentials: &PlatformCredentials) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(format!("hostvuln/{}", version))
            .build()?;

        let response = client
            .post(&credentials.auth_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(token_request_body(credentials))
            .send()
            .with_context(|| format!("Failed to reach auth endpoint {}", credentials.auth_url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            anyhow::bail!("Authentication failed with status {}: {}", status, body.trim());
        }

        let token: TokenResponse = response
            .json()
            .context("Auth endpoint returned no access_token")?;
        if token.access_token.is_empty() {
            anyhow::bail!("Auth endpoint returned an empty access_token");
        }
        tracing::debug!(auth_url = %credentials.auth_url, "Obtained API access token");

        Ok(Self {
            client,
            query_url: credentials.query_url.clone(),
            access_token: token.access_token,
        })
    }

    /// Sends one GraphQL request and returns its `data` member.
    pub fn graphql<V, T>(&self, query: &str, variables: V) -> std::result::Result<T, GraphQlError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(&self.query_url)
            .bearer_auth(&self.access_token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .map_err(|e| GraphQlError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| GraphQlError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(GraphQlError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        decode_graphql(&body)
    }

    /// Uploads a file body with HTTP PUT to a pre-signed URL.
    pub fn put_file(&self, url: &str, body: Vec<u8>) -> Result<()> {
        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .context("Failed to upload payload")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            anyhow::bail!("Upload returned status {}: {}", status, body.trim());
        }
        Ok(())
    }

    /// Finds the platform's internal id for a cloud resource.
    ///
    /// The first match wins; no match is an error because the feed cannot be
    /// scoped without it.
    pub fn resolve_resource_id(&self, cloud_platform: &str, provider_id: &str) -> Result<String> {
        let data: ResourceLookupData = self
            .graphql(RESOURCE_LOOKUP_QUERY, resource_lookup_variables(cloud_platform, provider_id))
            .map_err(|e| anyhow::anyhow!("Resource lookup failed: {}", e))?;

        let id = first_resource_id(data).with_context(|| {
            format!(
                "No cloud resource found for platform '{}' and provider id '{}'",
                cloud_platform, provider_id
            )
        })?;
        tracing::info!(resource_id = %id, "Resolved cloud resource");
        Ok(id)
    }
}

fn token_request_body(credentials: &PlatformCredentials) -> String {
    let mut fields = vec![
        ("grant_type", "client_credentials"),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
    ];
    if let Some(audience) = &credentials.audience {
        fields.push(("audience", audience.as_str()));
    }
    fields
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn decode_graphql<T: DeserializeOwned>(body: &str) -> std::result::Result<T, GraphQlError> {
    let response: GraphQlResponse<T> =
        serde_json::from_str(body).map_err(|e| GraphQlError::Decode(e.to_string()))?;

    if !response.errors.is_empty() {
        let messages = response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(GraphQlError::Errors(messages));
    }

    response
        .data
        .ok_or_else(|| GraphQlError::Decode("response has neither data nor errors".to_string()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceLookupData {
    cloud_resources: ResourceConnection,
}

#[derive(Deserialize)]
struct ResourceConnection {
    #[serde(default)]
    nodes: Vec<ResourceNode>,
}

#[derive(Deserialize)]
struct ResourceNode {
    id: String,
}

fn resource_lookup_variables(cloud_platform: &str, provider_id: &str) -> serde_json::Value {
    serde_json::json!({
        "first": 1,
        "filterBy": {
            "cloudPlatform": [cloud_platform],
            "providerUniqueId": [provider_id],
        },
    })
}

fn first_resource_id(data: ResourceLookupData) -> Option<String> {
    data.cloud_resources
        .nodes
        .into_iter()
        .map(|node| node.id)
        .find(|id| !id.is_empty())
}
