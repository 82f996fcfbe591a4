mod config;
mod provider;
mod record;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use crate::config::{Config, Credentials};
use crate::provider::cloudflare::CloudflareClient;
use crate::provider::ApiResponse;
use crate::record::{DnsRecord, RecordFields};

const EXAMPLE_ZONE_ID: &str = "your-zone-id-here";

#[derive(Parser, Debug)]
#[command(name = "cfdns-client")]
#[command(about = "A minimal Cloudflare API client for user, zone and DNS record operations")]
struct Args {
    /// Path to an optional configuration file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch details of the user owning the token
    User,
    /// List zones (first page only)
    Zones,
    /// Create a DNS record in a zone
    CreateRecord {
        #[arg(long)]
        zone_id: String,
        #[arg(long = "type", default_value = "A")]
        record_type: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value_t = 1)]
        ttl: u32,
        /// MX priority
        #[arg(long)]
        priority: Option<u16>,
        #[arg(long)]
        proxied: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment; a missing file is fine
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration first (before logger init)
    let config = Config::load_or_default(args.config.as_deref())?;

    // Initialize logger with config log level (env var takes precedence)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.log_level)
    ).init();

    if let Some(path) = &args.config {
        info!("Loaded configuration from: {}", path);
    }

    let credentials = Credentials::from_env(&config.api.token_env);
    if !credentials.is_present() {
        warn!(
            "Environment variable {} is not set, requests will carry an empty bearer token",
            config.api.token_env
        );
    }
    let client = CloudflareClient::new(&config.api, &credentials);
    info!("Using Cloudflare API at {}", client.base_url());

    match args.command {
        Some(Command::User) => report(client.fetch_user_details().await?),
        Some(Command::Zones) => report(client.list_zones().await?),
        Some(Command::CreateRecord {
            zone_id,
            record_type,
            name,
            content,
            ttl,
            priority,
            proxied,
        }) => {
            let mut fields = RecordFields::new(name, content, ttl);
            if let Some(proxied) = proxied {
                fields = fields.proxied(proxied);
            }
            let Some(record) = DnsRecord::from_parts(&record_type, fields, priority) else {
                bail!("Unsupported record type: {}", record_type);
            };
            info!(
                "Creating {} record {} in zone {}",
                record.record_type(),
                record.fields().name,
                zone_id
            );
            report(client.create_dns_record(&zone_id, &record).await?);
        }
        None => run_all(&client).await?,
    }

    Ok(())
}

/// Runs every operation in order with the example record.
async fn run_all(client: &CloudflareClient) -> Result<()> {
    report(client.fetch_user_details().await?);
    report(client.list_zones().await?);

    let record = DnsRecord::A(RecordFields::new("example.com", "192.0.2.1", 120));
    report(client.create_dns_record(EXAMPLE_ZONE_ID, &record).await?);

    Ok(())
}

fn report(response: ApiResponse) {
    if let Some(kind) = response.failure_kind() {
        warn!("Request failed: {:?}", kind);
    }
    println!("{}", response);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use serde_json::{json, Value};
    use std::io::Write;
    use wiremock::matchers::any;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_token_from_dotenv_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CFDNS_CLIENT_DOTENV_TEST_TOKEN=from-dotenv").unwrap();

        dotenvy::from_path(file.path()).unwrap();
        let credentials = Credentials::from_env("CFDNS_CLIENT_DOTENV_TEST_TOKEN");

        assert_eq!(credentials.authorization(), "Bearer from-dotenv");
    }

    #[tokio::test]
    async fn test_run_all_continues_past_failures() {
        let mock_server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .expect(3)
            .mount(&mock_server)
            .await;

        let config = ApiConfig {
            base_url: mock_server.uri(),
            ..ApiConfig::default()
        };
        let client = CloudflareClient::new(&config, &Credentials::new(Some("test-token".to_string())));

        assert!(run_all(&client).await.is_ok());

        let requests = mock_server.received_requests().await.unwrap();
        let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
        assert_eq!(
            paths,
            vec!["/user", "/zones", "/zones/your-zone-id-here/dns_records"]
        );
        assert_eq!(requests[0].method.as_str(), "GET");
        assert_eq!(requests[1].method.as_str(), "GET");
        assert_eq!(requests[2].method.as_str(), "POST");

        let body: Value = serde_json::from_slice(&requests[2].body).unwrap();
        assert_eq!(
            body,
            json!({"type": "A", "name": "example.com", "content": "192.0.2.1", "ttl": 120})
        );
    }
}
