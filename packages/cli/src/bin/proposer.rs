use std::net::IpAddr;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::error;

use proposer_cli::config::parse_port;
use proposer_cli::{init_tracing, run_server, Config};

#[derive(Parser)]
#[command(name = "proposer")]
#[command(about = "Proposer - AI-assisted business proposal generation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind (overrides PROPOSER_HOST)
        #[arg(long)]
        host: Option<IpAddr>,
        /// API server port (overrides PROPOSER_API_PORT)
        #[arg(long, value_parser = port_arg)]
        port: Option<u16>,
        /// SQLite database file (overrides PROPOSER_DATABASE_PATH)
        #[arg(long)]
        database: Option<PathBuf>,
        /// Allowed browser origin (overrides PROPOSER_CORS_ORIGIN)
        #[arg(long)]
        cors_origin: Option<String>,
    },
}

fn port_arg(raw: &str) -> Result<u16, String> {
    parse_port(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = handle_command(cli.command).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve {
            host,
            port,
            database,
            cors_origin,
        } => {
            let mut config = Config::from_env()?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(database) = database {
                config.database_path = database;
            }
            if let Some(origin) = cors_origin {
                config.cors_origin = origin;
            }

            run_server(config).await
        }
    }
}
