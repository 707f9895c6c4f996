use crate::db::{connect_with_config, DatabaseConfig};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use std::time::Duration;
use anyhow::Result;

#[test]
fn converts_file_config_into_pool_settings() {
    let file_cfg = configs::DatabaseConfig {
        url: "postgres://localhost/cars".into(),
        max_connections: 7,
        min_connections: 3,
        connect_timeout_secs: 5,
        acquire_timeout_secs: 9,
        ..configs::DatabaseConfig::default()
    };
    let cfg = DatabaseConfig::from(&file_cfg);
    assert_eq!(cfg.url, "postgres://localhost/cars");
    assert_eq!(cfg.max_connections, 7);
    assert_eq!(cfg.min_connections, 3);
    assert_eq!(cfg.connect_timeout, Duration::from_secs(5));
    assert_eq!(cfg.acquire_timeout, Duration::from_secs(9));
    assert_eq!(cfg.idle_timeout, Duration::from_secs(600));
}

#[test]
fn defaults_are_sane() {
    let cfg = DatabaseConfig::default();
    assert!(cfg.max_connections >= cfg.min_connections);
    assert!(!cfg.sqlx_logging);
}

#[tokio::test]
async fn test_custom_config_connection() -> Result<()> {
    if !super::db_available() {
        return Ok(());
    }

    let mut config = DatabaseConfig::from_env();
    config.max_connections = 5;
    config.min_connections = 1;
    config.connect_timeout = Duration::from_secs(10);

    let db = connect_with_config(&config).await?;

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1 AS test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let value: i32 = row.try_get("", "test")?;
    assert_eq!(value, 1);
    Ok(())
}
