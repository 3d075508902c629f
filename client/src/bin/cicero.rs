//! Command-line front end for the Cicero API.
//!
//! Usage: `cicero official -p search_loc="340 N 12th St, Philadelphia, PA"`
//!
//! Credentials come from `cicero.yaml` or `CICERO_CREDENTIALS__USERNAME` /
//! `CICERO_CREDENTIALS__PASSWORD`. The decoded response is printed as JSON.

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use cicero_client::{
    config::Config, transport::ReqwestTransport, CiceroApi, CiceroClient, Credentials,
    QueryParams,
};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cicero", version, about = "Query the Cicero civic-data API")]
struct Cli {
    /// YAML configuration file
    #[arg(long, default_value = "cicero.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Elected officials
    Official(QueryArgs),
    /// Past and upcoming elections
    ElectionEvent(QueryArgs),
    LegislativeDistrict(QueryArgs),
    NonlegislativeDistrict(QueryArgs),
    /// District map images (pass the district with --id)
    Map(QueryArgs),
    /// Every district type the API knows
    DistrictTypes,
    /// Credits left on the account
    Credits,
    /// Account usage for a period, or from FIRST to SECOND
    Usage {
        first: String,
        second: Option<String>,
    },
    /// API version (no credentials needed)
    Version,
}

#[derive(Args)]
struct QueryArgs {
    /// Cicero id of the object to fetch
    #[arg(long)]
    id: Option<String>,

    /// Search parameter as key=value; repeat a key to match any of its values
    #[arg(short = 'p', long = "param", value_parser = parse_pair)]
    params: Vec<(String, String)>,
}

impl QueryArgs {
    fn into_params(self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(id) = self.id {
            params = params.id(id);
        }
        for (key, value) in self.params {
            params.push(&key, value);
        }
        params
    }
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid logging.level '{level}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_from(&cli.config)?;
    init_tracing(&config.logging.level)?;

    let client = if matches!(cli.command, Command::Version) {
        // The version call carries no credentials.
        let transport = ReqwestTransport::new(&config.api)?;
        CiceroClient::with_credentials(transport, &config.api, Credentials::new("", ""))
    } else {
        let (username, password) = config.require_credentials()?;
        CiceroClient::connect(&config.api, username, password)
            .await
            .context("authentication failed")?
    };

    let root = match cli.command {
        Command::Official(args) => client.official(args.into_params()).await,
        Command::ElectionEvent(args) => client.election_event(args.into_params()).await,
        Command::LegislativeDistrict(args) => {
            client.legislative_district(args.into_params()).await
        }
        Command::NonlegislativeDistrict(args) => {
            client.nonlegislative_district(args.into_params()).await
        }
        Command::Map(args) => client.map(args.into_params()).await,
        Command::DistrictTypes => client.district_types().await,
        Command::Credits => client.credits_remaining().await,
        Command::Usage { first, second } => {
            client.account_usage(&first, second.as_deref()).await
        }
        Command::Version => client.version().await,
    }?;

    println!("{}", serde_json::to_string_pretty(&root)?);
    Ok(())
}
