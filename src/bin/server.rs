//! Server binary: env config, tracing, store selection, route mounting.
//!
//! `STORE=postgres` uses `DATABASE_URL` and creates the collection tables on
//! startup; anything else runs on the in-memory store.

use std::sync::Arc;

use axum::Router;
use larder::{common_routes, model, resource_routes, AppState, DocumentStore, MemoryStore, PgStore};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("larder=info".parse()?))
        .init();

    let store: Arc<dyn DocumentStore> = match std::env::var("STORE").as_deref() {
        Ok("postgres") => {
            let database_url = std::env::var("DATABASE_URL")?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;
            let store = PgStore::new(pool);
            store.ensure_collections(model()).await?;
            tracing::info!("using postgres store");
            Arc::new(store)
        }
        _ => {
            tracing::info!("using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store, model());
    let app = Router::new()
        .merge(common_routes())
        .merge(resource_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:4567".into());
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
