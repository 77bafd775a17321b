//! PetAdoption CLI - operator commands against the adoption service

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9528";

#[derive(Parser)]
#[command(name = "petadoption")]
#[command(about = "Pet adoption service CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "PETADOPTION_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the service is alive
    Health,

    /// Record a completed adoption
    Adopt {
        /// Pet identifier
        #[arg(long)]
        pet_id: String,

        /// Pet type (e.g., puppy, kitten, bunny)
        #[arg(long)]
        pet_type: String,
    },

    /// Delete ALL adoption records
    Cleanup {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    data: Option<serde_json::Value>,
}

#[derive(Deserialize, Tabled)]
struct AdoptionRow {
    transaction_id: String,
    pet_id: String,
    pet_type: String,
    adoption_date: String,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to service")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        // 5004: transaction stored, availability not updated
        if let Some(data) = error.data {
            if let Ok(row) = serde_json::from_value::<AdoptionRow>(data) {
                eprintln!("{}", "! Adoption recorded but availability not updated".yellow().bold());
                eprintln!("{}", Table::new(vec![row]));
            }
        }
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

/// Print the service status; an unreachable service is an error (non-zero exit)
async fn health(rpc_url: &str) -> Result<()> {
    println!("  {} {}", "RPC URL:".bold(), rpc_url);

    match call_rpc(rpc_url, "health.status.v1", json!([])).await {
        Ok(result) => {
            let status = result["status"].as_str().unwrap_or("unknown");
            println!("  {} {}", "Status:".bold(), status.to_uppercase().green());
            Ok(())
        }
        Err(e) => {
            println!("  {} {}", "Status:".bold(), "UNREACHABLE".red());
            Err(e.context(format!("Service at {} is unreachable", rpc_url)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Health => health(&cli.rpc_url).await?,

        Commands::Adopt { pet_id, pet_type } => {
            let params = json!({
                "pet_id": pet_id,
                "pet_type": pet_type,
            });

            let result = call_rpc(&cli.rpc_url, "adoption.complete.v1", params).await?;
            let row: AdoptionRow = serde_json::from_value(result)?;

            println!("{}", "✓ Adoption completed".green().bold());
            println!();
            println!("{}", Table::new(vec![row]));
        }

        Commands::Cleanup { yes } => {
            if !yes {
                println!(
                    "{}",
                    "Refusing to delete all adoption records without --yes".yellow()
                );
                return Ok(());
            }

            call_rpc(&cli.rpc_url, "adoption.cleanup.v1", json!([])).await?;
            println!("{}", "✓ All adoption records removed".green().bold());
        }
    }

    Ok(())
}
