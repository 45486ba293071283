//! Bank API server

use std::sync::Arc;

use account_service::{AccountService, AccountServiceConfig, RepositoryType};
use api_gateway::config::AppConfig;
use api_gateway::{create_router, AppState};
use clap::Parser;
use common::Error;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{debug, error, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Bank API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address (overrides LISTEN_ADDR)
    #[clap(short, long)]
    addr: Option<String>,

    /// Database URL (overrides DATABASE_URL)
    #[clap(short, long)]
    database_url: Option<String>,

    /// Database pool size (overrides DB_POOL_SIZE)
    #[clap(short, long)]
    pool_size: Option<u32>,

    /// Serve from an in-memory store instead of PostgreSQL
    #[clap(long)]
    in_memory: bool,

    /// Token signing secret (overrides JWT_SECRET)
    #[clap(long)]
    jwt_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let env = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse("tower_http=debug,api_gateway=debug,account_service=debug")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Debug logging enabled");

    // Resolve configuration: CLI first, then environment
    let mut config = AppConfig::new();
    if let Some(addr) = args.addr {
        config.listen_addr = addr;
    }
    if let Some(secret) = args.jwt_secret {
        config.jwt_secret = Some(secret);
    }
    let jwt_secret = config.jwt_secret
        .clone()
        .ok_or_else(|| Error::ConfigurationError("JWT_SECRET must be set".to_string()))?;

    let repo_type = if args.in_memory {
        info!("Using in-memory account store");
        RepositoryType::InMemory
    } else {
        let mut db_config = AccountServiceConfig::from_env();
        if let Some(url) = args.database_url {
            db_config.database_url = url;
        }
        if let Some(pool_size) = args.pool_size {
            db_config.db_pool_size = pool_size;
        }
        RepositoryType::Postgres(db_config)
    };

    // Initialize services
    let account_service = Arc::new(AccountService::with_repository(repo_type).await?);
    let state = Arc::new(AppState::new(account_service, &jwt_secret));

    let app = create_router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(log_level))
            .on_request(DefaultOnRequest::new().level(log_level))
            .on_response(DefaultOnResponse::new().level(log_level)),
    );

    // Start the server
    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!("JSON API server running on {}", config.listen_addr);

    // Run until interrupt signal
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
