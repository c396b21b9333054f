use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use brandlens::config::Config;
use brandlens::db::{self, Database, SqliteDatabase};
use brandlens::web;

/// Brandlens: brand-monitoring dashboard backend.
///
/// Serves the dashboard JSON API over the local mention store and the
/// BrandMentions upstream.
#[derive(Parser)]
#[command(name = "brandlens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema
    Init,

    /// Run the dashboard API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3100")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Show system status (DB stats)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("brandlens=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Brandlens database...");
            let config = Config::load()?;
            let conn = db::initialize(&config.db_path)?;
            let db = SqliteDatabase::new(conn);
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: set up your .env file (see .env.example),");
            println!("then run: cargo run -- serve");
        }

        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let conn = db::initialize(&config.db_path)?;
            let db: Arc<dyn Database> = Arc::new(SqliteDatabase::new(conn));
            web::run_server(config, db, port, &bind).await?;
        }

        Commands::Status => {
            let config = Config::load()?;
            let conn = db::open(&config.db_path)?;
            let db = SqliteDatabase::new(conn);
            println!("Database: {}", config.db_path);
            println!("Tables: {}", db.table_count().await?);
            println!("Stored mentions: {}", db.mention_count().await?);
            if config.brandmentions_api_key.is_empty() {
                println!("BrandMentions API key: not configured");
            } else {
                println!("BrandMentions API key: configured");
            }
            println!("Backend URL: {}", config.backend_url);
        }
    }

    Ok(())
}
