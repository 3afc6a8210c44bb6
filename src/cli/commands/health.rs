use std::time::Duration;

use clap::Args;
use serde_json::{json, Value};

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct HealthArgs {
    #[arg(long, help = "Base URL of the server (defaults to the configured host and port)")]
    pub url: Option<String>,

    #[arg(long, default_value_t = 5, help = "Request timeout in seconds")]
    pub timeout: u64,
}

pub async fn handle(
    args: HealthArgs,
    config: &AppConfig,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let base = args.url.unwrap_or_else(|| default_base_url(config));
    let url = format!("{}/health", base.trim_end_matches('/'));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            output_error(&output_format, &format!("{} unreachable: {}", url, e), Some("UNREACHABLE"))?;
            anyhow::bail!("health check failed");
        }
    };

    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        output_success(
            &output_format,
            &format!("{} is healthy", base),
            Some(json!({ "status": status.as_u16(), "health": body["data"] })),
        )
    } else {
        output_error(
            &output_format,
            &format!("{} answered {}", url, status),
            Some("UNHEALTHY"),
        )?;
        anyhow::bail!("health check failed")
    }
}

/// `0.0.0.0` is a bind address; probe it through loopback
fn default_base_url(config: &AppConfig) -> String {
    let host = match config.server.host.as_str() {
        "0.0.0.0" | "" => "127.0.0.1",
        other => other,
    };
    format!("http://{}:{}", host, config.server.port)
}
