use clap::{Parser, Subcommand};
use serde_json::Value;

use service_registry::http::HostRequest;

#[derive(Parser)]
#[command(name = "registry-cli")]
#[command(about = "Management CLI for the service registry", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a host under a service
    Register { service_id: String, host: String },
    /// Deregister a host from a service
    Remove { service_id: String, host: String },
    /// List the hosts of a service and their health
    Get { service_id: String },
    /// Check the registry's own health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Register { service_id, host } => {
            let res = client
                .post(format!("{}/service-id/register", cli.url))
                .json(&HostRequest::new(service_id, host))
                .send()
                .await?;
            print_status(res).await?;
        }
        Commands::Remove { service_id, host } => {
            let res = client
                .post(format!("{}/service-id/remove", cli.url))
                .json(&HostRequest::new(service_id, host))
                .send()
                .await?;
            print_status(res).await?;
        }
        Commands::Get { service_id } => {
            let res = client
                .get(format!("{}/service-id/{}", cli.url, service_id))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_status(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        return report_failure(res).await;
    }
    println!("{}", status);
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if !res.status().is_success() {
        return report_failure(res).await;
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

async fn report_failure(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Error: registry returned status {}", res.status());
    if let Ok(text) = res.text().await {
        eprintln!("Response: {}", text);
    }
    Ok(())
}
