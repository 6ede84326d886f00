//! send-ad
//!
//! Command line client that submits a vehicle ad to a Ganudenu server.
//!
//! ```text
//! send-ad --model "Toyota Aqua" --manufacture-year 2015 --price 6500000 \
//!     --location Colombo --price-type Negotiable --phone 0771234567 \
//!     --condition Used --images a.jpg b.jpg c.jpg
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use ganudenu::client::{AdClient, AdRequest, ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT};
use ganudenu::models::{AdDetails, PriceType, MIN_IMAGES};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "send-ad", version, about = "Submit a vehicle ad to a Ganudenu server")]
struct Cli {
    /// Vehicle model, e.g. "Toyota Aqua"
    #[arg(long)]
    model: String,

    #[arg(long)]
    manufacture_year: String,

    #[arg(long)]
    price: String,

    #[arg(long)]
    location: String,

    #[arg(long, value_enum)]
    price_type: PriceType,

    #[arg(long)]
    phone: String,

    /// Vehicle condition, e.g. "Used" or "Brand New"
    #[arg(long)]
    condition: String,

    /// Photo paths (3 to 9)
    #[arg(long, num_args = 1.., required = true)]
    images: Vec<PathBuf>,

    /// Server base URL
    #[arg(long, env = "SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// API key sent as x-api-key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

/// Checks clap cannot express on its own.
fn validate(cli: &Cli) -> Result<(), clap::Error> {
    if cli.images.len() < MIN_IMAGES {
        return Err(Cli::command().error(
            ErrorKind::TooFewValues,
            format!("Please provide at least {} images", MIN_IMAGES),
        ));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ganudenu=info,send_ad=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = validate(&cli) {
        e.exit();
    }

    let client = AdClient::new(ClientConfig {
        server_url: cli.server_url,
        api_key: cli.api_key,
        timeout: DEFAULT_TIMEOUT,
    })?;

    let request = AdRequest {
        details: AdDetails {
            model: cli.model,
            manufacture_year: cli.manufacture_year,
            price: cli.price,
            location: cli.location,
            price_type: cli.price_type.to_string(),
            phone: cli.phone,
            condition: cli.condition,
        },
        image_paths: cli.images,
    };

    tracing::info!("Sending ad to {}", client.endpoint());

    let response = client
        .send_ad(&request)
        .await
        .context("Failed to send ad")?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
