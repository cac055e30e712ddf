use aiteken::config::Config;
use aiteken::db::{UsersStorage, connect};
use aiteken::service::{credentials::CredentialService, password::PasswordHasher};
use aiteken::{AppState, app_router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen = %cfg.listen_addr(),
        db_max_connections = cfg.db_max_connections,
        bcrypt_cost = cfg.bcrypt_cost,
        loglevel = %cfg.loglevel
    );

    // Connectivity failures are fatal; DDL failures are logged and tolerated.
    let pool = connect(&cfg).await?;
    let storage = UsersStorage::new(pool);
    let report = storage.init_schema().await;
    if report.is_complete() {
        info!(tables = ?report.created, "schema ready");
    } else {
        warn!(
            failed = ?report.failed,
            skipped = ?report.skipped,
            "schema incomplete; serving anyway"
        );
    }
    match storage.table_names().await {
        Ok(tables) => info!(?tables, "tables present in database"),
        Err(e) => warn!(error = %e, "failed to list tables"),
    }

    let hasher = PasswordHasher::new(cfg.bcrypt_cost)?;
    let credentials = CredentialService::new(storage.clone(), hasher, cfg.request_timeout());
    let app = app_router(AppState::new(credentials));

    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    storage.pool().close().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
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
    info!("shutdown signal received");
}
