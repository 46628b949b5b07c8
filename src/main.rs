mod cli;

use awesome::{config, models, server};
use awesome_orm::pool::{create_pool, get_conn};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting awesome server");

    models::register_all()?;

    tracing::info!("Opening database at {}", config.database.path.display());
    let db = create_pool(&config.database)?;

    server::start_server(config, db).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "awesome=trace,awesome_orm=debug,tower_http=debug".to_string()
        } else {
            "awesome=debug,awesome_orm=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::InitDb => init_db(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("awesome {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_db(config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    config::validate_config(&config)?;

    models::register_all()?;
    let db = create_pool(&config.database)?;
    let conn = get_conn(&db)?;
    models::init_schema(&conn)?;

    println!("Database ready: {}", config.database.path.display());
    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Database: {}", config.database.path.display());
            println!(
                "  Pool: max {}, idle {}",
                config.database.max_size, config.database.min_idle
            );
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Database: {}", config.database.path.display());
        }
    }

    Ok(())
}
