use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;

use super::ApiResponse;
use crate::config::{ApiConfig, Credentials};

/// Cloudflare API client. Holds the base URL and the header set shared by
/// every request; nothing else is kept between calls.
#[derive(Clone)]
pub struct CloudflareClient {
    client: Client,
    base_url: String,
    authorization: String,
}

impl CloudflareClient {
    pub fn new(config: &ApiConfig, credentials: &Credentials) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authorization: credentials.authorization(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_user_details(&self) -> Result<ApiResponse> {
        let url = format!("{}/user", self.base_url);
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .context("Failed to send user request to Cloudflare")?;

        read_response(response, "user").await
    }

    /// Lists zones visible to the token. Only the first page is returned.
    pub async fn list_zones(&self) -> Result<ApiResponse> {
        let url = format!("{}/zones", self.base_url);
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .context("Failed to send zones request to Cloudflare")?;

        read_response(response, "zones").await
    }

    /// Creates a DNS record in `zone_id`. The record is sent as the JSON
    /// body exactly as it serializes.
    pub async fn create_dns_record<T>(&self, zone_id: &str, record: &T) -> Result<ApiResponse>
    where
        T: Serialize + ?Sized,
    {
        let url = format!("{}/zones/{}/dns_records", self.base_url, zone_id);
        let response = self
            .request(Method::POST, &url)
            .json(record)
            .send()
            .await
            .context("Failed to send create request to Cloudflare")?;

        read_response(response, "create record").await
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .header("Authorization", &self.authorization)
            .header("Content-Type", "application/json")
    }
}

// The Authorization value carries the token.
impl std::fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("base_url", &self.base_url)
            .field("authorization", &"Bearer <redacted>")
            .finish()
    }
}

/// Any 2xx status counts as success; the body's own `success` flag is not
/// consulted.
async fn read_response(response: Response, operation: &str) -> Result<ApiResponse> {
    let status = response.status();

    if status.is_success() {
        let data: Value = response
            .json()
            .await
            .with_context(|| format!("Failed to parse Cloudflare {} response", operation))?;
        info!("Cloudflare {} request succeeded ({})", operation, status);
        return Ok(ApiResponse::Success(data));
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read Cloudflare {} error body", operation))?;
    debug!("Cloudflare {} request returned {}", operation, status);

    Ok(ApiResponse::failure(status, body))
}
