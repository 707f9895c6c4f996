use std::{env, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use configs::LogFormat;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use models::db::{connect_with_config, DatabaseConfig};
use service::car::{repo::seaorm::SeaOrmCarRepository, CarService};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Everything `run` needs before it can bind.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub auto_migrate: bool,
    pub log_format: LogFormat,
}

/// Install the global subscriber for `format`; later calls are no-ops.
pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Compact => init_logging_default(),
        LogFormat::Json => init_logging_json(),
    }
}

/// `config.toml` (or `CONFIG_PATH`) when the file exists, env vars otherwise.
pub fn load_settings() -> Result<Settings, StartupError> {
    let path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        let mut cfg = configs::load_from_file(&path).map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
        cfg.normalize_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
        return Ok(Settings {
            host: cfg.server.host.clone(),
            port: cfg.server.port,
            database: DatabaseConfig::from(&cfg.database),
            auto_migrate: cfg.database.auto_migrate,
            log_format: cfg.logging.format,
        });
    }

    let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    let auto_migrate = env::var("AUTO_MIGRATE").map(|v| v != "false" && v != "0").unwrap_or(true);
    let log_format = match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => LogFormat::Json,
        _ => LogFormat::Compact,
    };
    Ok(Settings { host, port, database: DatabaseConfig::from_env(), auto_migrate, log_format })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Public entry: connect, migrate, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let settings = load_settings()?;
    init_logging(settings.log_format);

    let db = connect_with_config(&settings.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if settings.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(e.to_string()))?;
        info!("migrations applied");
    }

    let repo = Arc::new(SeaOrmCarRepository::new(db));
    let state = ServerState { cars: Arc::new(CarService::new(repo)) };
    let app: Router = routes::build_router(state, build_cors());

    let listener = tokio::net::TcpListener::bind((settings.host.as_str(), settings.port)).await?;
    info!(addr = %listener.local_addr()?, "car registry listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_from_env_pick_log_format() {
        env::set_var("CONFIG_PATH", "does-not-exist.toml");

        env::set_var("LOG_FORMAT", "json");
        assert_eq!(load_settings().unwrap().log_format, LogFormat::Json);

        env::remove_var("LOG_FORMAT");
        let s = load_settings().unwrap();
        assert_eq!(s.log_format, LogFormat::Compact);
        assert!(s.port > 0);
    }
}
