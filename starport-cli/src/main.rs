#![deny(missing_docs)]
//! Starport command-line interface.
//!
//! A thin REST client for operating a running Starport server from the
//! terminal.

mod client;

use clap::{Args, Parser, Subcommand};

use client::{ApiClient, DEFAULT_SERVER_URL};

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "starport", version, about = "Starport fleet CLI")]
struct Cli {
    /// Base URL of the Starport server.
    #[arg(long, env = "STARPORT_API_URL", default_value = DEFAULT_SERVER_URL, global = true)]
    server_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List ships with optional filters, sorting, and paging.
    List(ListArgs),
    /// Count ships matching optional filters.
    Count(FilterArgs),
    /// Fetch a single ship by id.
    Get(IdArgs),
    /// Create a new ship.
    Create(CreateArgs),
    /// Update fields on an existing ship.
    Update(UpdateArgs),
    /// Delete a ship by id.
    Delete(IdArgs),
}

/// Filter flags shared by list and count.
#[derive(Args, Clone, Default)]
pub(crate) struct FilterArgs {
    /// Substring filter on the ship name.
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Substring filter on the home planet.
    #[arg(long)]
    pub(crate) planet: Option<String>,
    /// Exact category filter: TRANSPORT, MILITARY, or MERCHANT.
    #[arg(long)]
    pub(crate) ship_type: Option<String>,
    /// Production date strictly after this epoch-millisecond instant.
    #[arg(long)]
    pub(crate) after: Option<i64>,
    /// Production date strictly before this epoch-millisecond instant.
    #[arg(long)]
    pub(crate) before: Option<i64>,
    /// Exact used-flag filter.
    #[arg(long)]
    pub(crate) is_used: Option<bool>,
    /// Inclusive lower speed bound.
    #[arg(long)]
    pub(crate) min_speed: Option<f64>,
    /// Inclusive upper speed bound.
    #[arg(long)]
    pub(crate) max_speed: Option<f64>,
    /// Inclusive lower crew size bound.
    #[arg(long)]
    pub(crate) min_crew_size: Option<i32>,
    /// Inclusive upper crew size bound.
    #[arg(long)]
    pub(crate) max_crew_size: Option<i32>,
    /// Inclusive lower rating bound.
    #[arg(long)]
    pub(crate) min_rating: Option<f64>,
    /// Inclusive upper rating bound.
    #[arg(long)]
    pub(crate) max_rating: Option<f64>,
}

/// Arguments for the list command.
#[derive(Args, Clone, Default)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
    /// Sort key: id, speed, prodDate, or rating.
    #[arg(long)]
    pub(crate) order: Option<String>,
    /// Zero-based page number.
    #[arg(long)]
    pub(crate) page_number: Option<u32>,
    /// Page size.
    #[arg(long)]
    pub(crate) page_size: Option<u32>,
}

/// A ship identifier argument.
#[derive(Args, Clone)]
pub(crate) struct IdArgs {
    /// Ship identifier.
    pub(crate) id: String,
}

/// Arguments for the create command.
#[derive(Args, Clone)]
pub(crate) struct CreateArgs {
    /// Ship name.
    #[arg(long)]
    pub(crate) name: String,
    /// Home planet.
    #[arg(long)]
    pub(crate) planet: String,
    /// Ship category: TRANSPORT, MILITARY, or MERCHANT.
    #[arg(long)]
    pub(crate) ship_type: String,
    /// Production date as epoch milliseconds.
    #[arg(long)]
    pub(crate) prod_date: i64,
    /// Whether the ship is second-hand; the server defaults it to false.
    #[arg(long)]
    pub(crate) is_used: Option<bool>,
    /// Speed in [0.01, 0.99].
    #[arg(long)]
    pub(crate) speed: f64,
    /// Crew size in [1, 9999].
    #[arg(long)]
    pub(crate) crew_size: i32,
}

/// Arguments for the update command.
#[derive(Args, Clone, Default)]
pub(crate) struct UpdateArgs {
    /// Ship identifier.
    pub(crate) id: String,
    /// Replacement name.
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Replacement planet.
    #[arg(long)]
    pub(crate) planet: Option<String>,
    /// Replacement category: TRANSPORT, MILITARY, or MERCHANT.
    #[arg(long)]
    pub(crate) ship_type: Option<String>,
    /// Replacement production date as epoch milliseconds.
    #[arg(long)]
    pub(crate) prod_date: Option<i64>,
    /// Replacement used flag.
    #[arg(long)]
    pub(crate) is_used: Option<bool>,
    /// Replacement speed.
    #[arg(long)]
    pub(crate) speed: Option<f64>,
    /// Replacement crew size.
    #[arg(long)]
    pub(crate) crew_size: Option<i32>,
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.server_url)?;
    match cli.command {
        Commands::List(args) => client.list(&args).await,
        Commands::Count(args) => client.count(&args).await,
        Commands::Get(args) => client.get(&args.id).await,
        Commands::Create(args) => client.create(&args).await,
        Commands::Update(args) => client.update(&args).await,
        Commands::Delete(args) => client.delete(&args.id).await,
    }
}
