//! Turnout CLI
//!
//! Command-line client for a running `turnout-api` server:
//! - Search, list and chart records
//! - Log a cleaning
//! - Trigger a sync and check status
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use turnout::notify::Notification;
use turnout::view::{Page, TextRenderer, View};

#[derive(Parser)]
#[command(name = "turnout-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Client for the Turnout API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8086", global = true)]
    pub api_url: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search records by name or serial number
    Search {
        /// Search term (empty: every record)
        #[arg(default_value = "")]
        term: String,
    },

    /// Log a cleaning
    Add {
        /// Firefighter name
        #[arg(long)]
        name: String,
        /// Last digits of the serial number
        #[arg(long)]
        serial: String,
        /// PPE item(s) cleaned
        #[arg(long)]
        item: String,
        /// Who did the cleaning
        #[arg(long)]
        cleaned_by: String,
        /// Advanced inspection completed
        #[arg(long)]
        inspection: bool,
    },

    /// Show every record
    Logs,

    /// Cleanings per firefighter
    Chart,

    /// Reload everything from the remote document
    Sync,

    /// Show server and sync status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let renderer = TextRenderer::default();

    match cli.command {
        Commands::Search { term } => {
            let view = fetch_view(&client, &cli.api_url, Page::Search, Some(&term)).await?;
            print_view(&renderer, &view, &cli.format)?;
        }

        Commands::Logs => {
            let view = fetch_view(&client, &cli.api_url, Page::Logs, None).await?;
            print_view(&renderer, &view, &cli.format)?;
        }

        Commands::Chart => {
            let view = fetch_view(&client, &cli.api_url, Page::Chart, None).await?;
            print_view(&renderer, &view, &cli.format)?;
        }

        Commands::Add {
            name,
            serial,
            item,
            cleaned_by,
            inspection,
        } => {
            let body = serde_json::json!({
                "name": name,
                "serial": serial,
                "item": item,
                "cleanedBy": cleaned_by,
                "inspection": inspection,
            });

            let response = client
                .post(format!("{}/api/v1/records", cli.api_url))
                .json(&body)
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                bail!("Add failed ({}): {}", status, text);
            }

            let result: serde_json::Value = response.json().await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "Saved {} ({}) on {}",
                    result["record"]["name"].as_str().unwrap_or("-"),
                    result["record"]["item"].as_str().unwrap_or("-"),
                    result["record"]["date"].as_str().unwrap_or("-"),
                );
                if result["synced"].as_bool() != Some(true) {
                    println!("Warning: not synced to the cloud, the record is only on the server");
                }
            }
            print_notifications(&client, &cli.api_url, &renderer).await;
        }

        Commands::Sync => {
            let response = client
                .post(format!("{}/api/v1/sync", cli.api_url))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;

            if !response.status().is_success() {
                bail!("Sync failed: {}", response.status());
            }

            let result: serde_json::Value = response.json().await?;
            match result["status"].as_str() {
                Some("success") => {
                    println!("Loaded {} records", result["records"].as_u64().unwrap_or(0))
                }
                _ => bail!(
                    "Sync failed: {}",
                    result["error"].as_str().unwrap_or("unknown error")
                ),
            }
        }

        Commands::Status => {
            let health: serde_json::Value = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?
                .json()
                .await?;

            let sync: serde_json::Value = client
                .get(format!("{}/api/v1/sync/status", cli.api_url))
                .send()
                .await?
                .json()
                .await?;

            if cli.format == "json" {
                let both = serde_json::json!({ "health": health, "sync": sync });
                println!("{}", serde_json::to_string_pretty(&both)?);
                return Ok(());
            }

            println!("Turnout v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("API Status: {}", health["status"].as_str().unwrap_or("unknown"));
            println!("Records: {}", health["records"].as_u64().unwrap_or(0));
            if let Some(uptime) = health["uptime_seconds"].as_u64() {
                println!("Uptime: {}", format_duration(uptime));
            }

            println!();
            println!("Remote ({}):", sync["remote"].as_str().unwrap_or("-"));
            println!("  Location: {}", sync["location"].as_str().unwrap_or("-"));
            println!("  Last pull: {}", sync["last_pull"].as_str().unwrap_or("never"));
            println!("  Last push: {}", sync["last_push"].as_str().unwrap_or("never"));
        }

        Commands::Config { output } => {
            let config = turnout::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

async fn fetch_view(
    client: &reqwest::Client,
    api_url: &str,
    page: Page,
    term: Option<&str>,
) -> anyhow::Result<View> {
    let mut request = client.get(format!("{}/api/v1/pages/{}", api_url, page));
    if let Some(term) = term {
        request = request.query(&[("q", term)]);
    }

    let response = request.send().await.with_context(|| connect_hint(api_url))?;
    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        bail!("Request failed ({}): {}", status, text);
    }

    Ok(response.json().await?)
}

fn print_view(renderer: &TextRenderer, view: &View, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(view)?),
        _ => print!("{}", renderer.render(view)),
    }
    Ok(())
}

async fn print_notifications(client: &reqwest::Client, api_url: &str, renderer: &TextRenderer) {
    #[derive(serde::Deserialize)]
    struct Body {
        notifications: Vec<Notification>,
    }

    let body = match client
        .get(format!("{}/api/v1/notifications", api_url))
        .send()
        .await
    {
        Ok(response) => response.json::<Body>().await.ok(),
        Err(_) => None,
    };

    if let Some(body) = body {
        print!("{}", renderer.notifications(&body.notifications));
    }
}

fn connect_hint(api_url: &str) -> String {
    format!(
        "Cannot connect to Turnout API at {} (start it with `cargo run --bin turnout-api`)",
        api_url
    )
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(3 * 3600 + 120), "3h 2m");
        assert_eq!(format_duration(2 * 86400 + 3600), "2d 1h");
    }

    #[test]
    fn test_cli_parses_add() {
        let cli = Cli::parse_from([
            "turnout-cli",
            "add",
            "--name",
            "Jane Doe",
            "--serial",
            "1234",
            "--item",
            "Helmet",
            "--cleaned-by",
            "Jane Doe",
            "--inspection",
        ]);

        match cli.command {
            Commands::Add {
                cleaned_by,
                inspection,
                ..
            } => {
                assert_eq!(cleaned_by, "Jane Doe");
                assert!(inspection);
            }
            _ => panic!("expected add"),
        }
        assert_eq!(cli.api_url, "http://localhost:8086");
    }
}
