mod config;
mod routes;
mod services;
mod state;

use config::{ConfigError, ServerConfig};
use services::users::{DirectoryError, UserDirectory};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid seed user: {0}")]
    Seed(#[from] DirectoryError),
    #[error("failed to bind: {0}")]
    Bind(std::io::Error),
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

fn load_directory(config: &ServerConfig) -> Result<UserDirectory, StartupError> {
    let Some(path) = &config.users_file else {
        tracing::warn!("CAMPUS_USERS_FILE not set; starting with an empty user directory");
        return Ok(UserDirectory::new());
    };
    let seed = config::load_seed_users(path)?;
    let mut directory = UserDirectory::new();
    directory.seed(&seed)?;
    if directory.is_empty() {
        tracing::warn!(path = %path.display(), "seed file lists no users");
    }
    tracing::info!(path = %path.display(), users = directory.len(), "loaded seed users");
    Ok(directory)
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let port = config.port;
    let sweep_interval = config.sweep_interval;
    let users = load_directory(&config)?;

    let state = state::AppState::new(users, config);

    // Spawn background session sweep.
    let _sweeper = services::session::spawn_expiry_task(state.clone(), sweep_interval);

    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos SSR unavailable; serving API only");
            routes::api_routes(state)
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(StartupError::Bind)?;

    tracing::info!(%port, "campus listening");
    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
