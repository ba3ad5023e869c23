//! Shelfscan CLI - Command-line interface for barcode-driven library ingestion

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelfscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the local library file
    #[arg(long, global = true, default_value = "./shelfscan_data")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a barcode image and add the book to a library
    Scan {
        /// Path to the image file
        image: String,

        /// Owner of the library record
        #[arg(short, long)]
        owner: String,
    },

    /// Look up an ISBN in the catalog without saving anything
    Lookup {
        /// ISBN to resolve (hyphens allowed)
        isbn: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the records in a library
    List {
        /// Owner whose library to list
        #[arg(short, long)]
        owner: String,

        /// Filter by reading status (not_started, in_progress, completed)
        #[arg(long)]
        status: Option<String>,

        /// Substring search over title, author, and ISBN
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the reading status of a record
    Status {
        /// Record id
        id: String,

        /// New status (not_started, in_progress, completed)
        #[arg(short, long)]
        set: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "shelfscan_cli=debug,shelfscan_core=debug"
    } else {
        "shelfscan_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Scan { image, owner } => commands::scan(&cli.data_dir, &image, &owner).await,

        Commands::Lookup { isbn, json } => commands::lookup(&isbn, json).await,

        Commands::List {
            owner,
            status,
            search,
            json,
        } => commands::list(&cli.data_dir, &owner, status.as_deref(), search, json).await,

        Commands::Status { id, set } => commands::status(&cli.data_dir, &id, &set).await,
    }
}
