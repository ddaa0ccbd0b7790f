use std::sync::Arc;

use clap::Parser;
use migration::{Migrator, MigratorTrait};
use settings::{Database, Settings};

mod settings;

/// Catalog REST service.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Profile of CONFIG_DATA to run with.
    #[arg(long, env = "APP_ENV", default_value = settings::BASE_PROFILE)]
    profile: String,

    /// JSON object of named profiles.
    #[arg(long, env = "CONFIG_DATA", hide_env_values = true)]
    config_data: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Missing .env is fine, the variables may come from the environment.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let settings = Settings::from_json(&args.config_data, &args.profile)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "catalog={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    tracing::info!(profile = %args.profile, "starting catalog");

    let db = parse_database(&settings.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;
    let media = Arc::new(server::CloudinaryUploader::new(settings.cloudinary.into()));

    let mut state = server::ServerState::new(engine, media);
    if let Some(body_limit) = settings.server.body_limit {
        state = state.with_body_limit(body_limit);
    }

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let listener = tokio::net::TcpListener::bind(format!("{bind}:{}", settings.server.port)).await?;
    server::run_with_listener(state, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        Database::Url(url) => url.clone(),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("migrations applied");
    Ok(database)
}
