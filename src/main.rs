use std::sync::Arc;

use axum::http::StatusCode;
use dotenvy::dotenv;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use buku_kas::config::{Config, StoreBackend};
use buku_kas::database;
use buku_kas::routes::{self, AppState};
use buku_kas::store::{EntryStore, MemoryStore, PgStore, SheetStore};

async fn open_store(backend: &StoreBackend) -> anyhow::Result<Arc<dyn EntryStore>> {
    let store: Arc<dyn EntryStore> = match backend {
        StoreBackend::Sheet { path } => {
            tracing::info!(path = %path.display(), "using sheet store");
            Arc::new(SheetStore::open(path.clone()).await?)
        }
        StoreBackend::Postgres {
            url,
            max_connections,
        } => {
            let pool = database::create_database_connection(url, *max_connections).await?;
            database::run_migrations(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store, entries are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment dari .env file
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("buku_kas=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let store = open_store(&config.store).await?;
    let state = AppState::new(store, config.categories.clone());

    // Middleware CORS untuk izinkan request dari frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    async fn handle_404() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    // Frontend statis (opsional) menggantikan 404 untuk path non-API
    let router = match &config.static_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "serving static frontend");
            let serve_dir =
                ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html")));
            routes::app().fallback_service(serve_dir)
        }
        None => routes::app().fallback(handle_404),
    };

    let app = router
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("server running at http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
