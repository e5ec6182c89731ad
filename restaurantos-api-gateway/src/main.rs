use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use restaurantos_menu_service::{MenuService, PgMenuStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod completion;
mod config;
mod error;
mod handlers;
mod models;

use completion::OpenAiClient;
use config::{Cli, Commands, DatabaseArgs, ServeArgs};
use handlers::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Migrate(args) => {
            open_store(args).await?;
            Ok(())
        }
    }
}

/// Connects the pool and brings the schema up to date.
async fn open_store(args: DatabaseArgs) -> Result<PgMenuStore, Box<dyn std::error::Error>> {
    let store = tokio::task::spawn_blocking(move || {
        let store = PgMenuStore::connect(&args.database_url, args.db_pool_size)?;
        let applied = store.run_migrations()?;
        info!(applied, "database migrations complete");
        Ok::<_, restaurantos_menu_service::StoreError>(store)
    })
    .await??;
    Ok(store)
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(args.database).await?;

    if args.completion.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; /ai/enhanceDescription will fail");
    }
    let completion_client = OpenAiClient::new(
        args.completion.openai_base_url,
        args.completion.openai_api_key,
        args.completion.completion_model,
    );

    let state = AppState {
        menu_service: MenuService::new(Arc::new(store)),
        completion_client: Arc::new(completion_client),
    };
    let app = handlers::app(state);

    let listener = tokio::net::TcpListener::bind(args.listen_addr).await?;
    info!("API Gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
