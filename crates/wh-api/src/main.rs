//! Warehouse assistant API server.
//!
//! Answers natural-language questions about inventory and shipments over
//! REST, grounding a language model in live warehouse data.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use wh_api::config::ApiConfig;
use wh_api::inference::{ChatCompletionsEngine, CompletionEngine, OfflineEngine};
use wh_api::state::AppState;
use wh_api::{db, routes};
use wh_nlu::Inventory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "wh-api starting");

    let config = ApiConfig::from_env()?;

    // Connect to PostgreSQL if a database URL is configured, otherwise use in-memory state.
    let state = if let Some(database_url) = &config.database_url {
        tracing::info!("connecting to PostgreSQL");
        let pool = db::connect(database_url).await?;
        db::seed_if_empty(&pool, &Inventory::with_sample_data()).await?;
        AppState::with_pool(pool)
    } else {
        tracing::warn!("DATABASE_URL not set, using in-memory state with sample data");
        AppState::with_sample_data()
    };

    let llm: Arc<dyn CompletionEngine> = match &config.llm.api_key {
        Some(api_key) => {
            tracing::info!(
                base_url = %config.llm.base_url,
                model = %config.llm.model,
                "using chat completions engine"
            );
            Arc::new(ChatCompletionsEngine::new(&config.llm, api_key.clone())?)
        }
        None => {
            tracing::warn!("GROQ_API_KEY not set, free-form questions get an offline notice");
            Arc::new(OfflineEngine)
        }
    };

    let state = state
        .with_engine(llm)
        .with_briefing_style(config.briefing_style);
    let app = routes::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
