//! Purchase CLI
//!
//! Command-line interface for the Purchase API.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use purchase_client::PurchaseClient;
use purchase_types::PurchaseId;
use purchase_types::domain::flexible_date;

#[derive(Parser)]
#[command(name = "purchase")]
#[command(author, version, about = "Purchase API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Purchase API
    #[arg(
        long,
        env = "PURCHASE_API_URL",
        default_value = "http://localhost:6000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new purchase
    Create {
        /// What was bought
        #[arg(long)]
        description: String,
        /// Purchase date (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Amount in the purchase's own currency
        #[arg(long)]
        amount: Decimal,
    },
    /// List all purchases
    List,
    /// Show a purchase converted into another currency
    Convert {
        /// Purchase ID (UUID)
        #[arg(value_parser = parse_purchase_id)]
        id: PurchaseId,
        /// Currency name as published by the Treasury feed (e.g. Euro)
        currency: String,
    },
    /// Check API health
    Health,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    flexible_date::parse(s).ok_or_else(|| format!("Invalid date: {}", s))
}

fn parse_purchase_id(s: &str) -> Result<PurchaseId, String> {
    s.parse().map_err(|_| format!("Invalid purchase ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = PurchaseClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Create {
            description,
            date,
            amount,
        } => {
            let purchase = client.create_purchase(&description, date, amount).await?;
            println!("{}", serde_json::to_string_pretty(&purchase)?);
        }

        Commands::List => {
            let purchases = client.list_purchases().await?;
            println!("{}", serde_json::to_string_pretty(&purchases)?);
        }

        Commands::Convert { id, currency } => {
            let converted = client.get_converted_purchase(id, &currency).await?;
            println!("{}", serde_json::to_string_pretty(&converted)?);
        }
    }

    Ok(())
}
