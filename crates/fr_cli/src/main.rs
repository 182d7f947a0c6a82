//! Registry CLI
//!
//! Runs one use case against a JSON store snapshot.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "fr_cli")]
#[command(about = "Maintain football reference data in a JSON store", long_about = None)]
struct Cli {
    /// Store snapshot file (created on first write)
    #[arg(long, default_value = "registry.json")]
    store: PathBuf,

    /// Config JSON file; defaults to $FR_CONFIG_PATH, then built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Register contract dates for a player and a team
    RegisterContract {
        /// Request JSON file
        #[arg(long)]
        request: PathBuf,
    },

    /// Create a fixture, registering its league, season and edition if new
    CreateFixture {
        /// Request JSON file
        #[arg(long)]
        request: PathBuf,
    },

    /// Record the details of a played fixture
    AddFixtureDetails {
        /// Request JSON file
        #[arg(long)]
        request: PathBuf,
    },

    /// Print table sizes of the store
    Show,
}

#[cfg(feature = "cli")]
fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> Result<()> {
    use fr_cli::{read_request, summary, Session};
    use fr_core::RegistryConfig;

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RegistryConfig::load(path)?,
        None => RegistryConfig::load_from_env()?,
    };
    init_tracing(&config.log_filter);

    let session = Session::open(&cli.store, config)?;
    let output = match cli.command {
        Commands::RegisterContract { request } => {
            let contract = session.register_contract(read_request(&request)?).await?;
            serde_json::to_string_pretty(&contract)?
        }
        Commands::CreateFixture { request } => {
            let fixture = session.create_fixture(read_request(&request)?).await?;
            serde_json::to_string_pretty(&fixture)?
        }
        Commands::AddFixtureDetails { request } => {
            let fixture = session.add_fixture_details(read_request(&request)?).await?;
            serde_json::to_string_pretty(&fixture)?
        }
        Commands::Show => {
            println!("{}", summary(&session.snapshot()?));
            return Ok(());
        }
    };

    session.save(&cli.store)?;
    println!("{output}");
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("fr_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
