use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};
use service::car::{repo::seaorm::SeaOrmCarRepository, CarService};

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
}

/// Real server on an ephemeral port over PostgreSQL; `None` when no database is configured.
async fn start_server() -> anyhow::Result<Option<TestApp>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests. Provide .env.test or env var.");
        return Ok(None);
    }

    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await { eprintln!("migrations notice: {}", e); }

    let repo = Arc::new(SeaOrmCarRepository::new(db));
    let state = ServerState { cars: Arc::new(CarService::new(repo)) };
    let app: Router = routes::build_router(state, cors());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(Some(TestApp { base_url }))
}

fn unique_reg(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}{}", nanos % 1_000_000_000_000)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()); };
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_car_lifecycle() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()); };
    let c = reqwest::Client::new();
    let reg = unique_reg("E");

    let res = c.post(format!("{}/api/cars", app.base_url))
        .json(&json!({"regNumber": reg, "model": "Civic", "mileage": 120000, "releaseYear": 2012, "owner": "Alex"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_i64().expect("id");
    assert!(created["createdAt"].is_string());

    // duplicate registration
    let res = c.post(format!("{}/api/cars", app.base_url))
        .json(&json!({"regNumber": reg, "model": "Accord"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    let res = c.put(format!("{}/api/cars/{}", app.base_url, id))
        .json(&json!({"model": "Civic Type R"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["model"], "Civic Type R");
    assert_eq!(updated["owner"], "Alex");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let res = c.get(format!("{}/api/cars", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let list = res.json::<Vec<serde_json::Value>>().await?;
    assert!(list.iter().any(|car| car["id"] == id));
    assert!(list.windows(2).all(|w| w[0]["id"].as_i64() > w[1]["id"].as_i64()));

    let res = c.delete(format!("{}/api/cars/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.get(format!("{}/api/cars/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
