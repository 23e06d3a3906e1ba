use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use orderdesk_backend::app;
use orderdesk_backend::logging;
use orderdesk_backend::state::AppState;
use orderdesk_backend::storage::{MongoOrderStore, OrderStorage, SqliteOrderStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging();

    // Select storage engine based on STORAGE_ENGINE env var (defaults to sqlite)
    let engine = std::env::var("STORAGE_ENGINE").unwrap_or_else(|_| "sqlite".to_string());

    let storage: Arc<dyn OrderStorage> = match engine.to_lowercase().as_str() {
        "sqlite" => {
            let database_url = std::env::var("DATABASE_URL")?;
            tracing::info!("🗄️ Using storage engine: SQLite at {}", database_url);
            Arc::new(SqliteOrderStore::connect(&database_url).await?)
        }
        "mongodb" => {
            let mongodb_uri = std::env::var("MONGODB_URI")?;
            tracing::info!("🗄️ Using storage engine: MongoDB");
            Arc::new(MongoOrderStore::connect(&mongodb_uri).await?)
        }
        _ => {
            panic!(
                "Invalid STORAGE_ENGINE: {}. Must be 'sqlite' or 'mongodb'",
                engine
            );
        }
    };

    let state = AppState { storage };
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Orderdesk backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
