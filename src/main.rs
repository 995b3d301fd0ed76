mod app;
mod auth;
mod config;
mod error;
mod groups;
mod routes;
mod session;
mod state;
#[cfg(test)]
mod testing;
mod views;

use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "studyhub=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;

    app_state.migrate().await?;

    let sweeper = session::spawn_sweeper(
        app_state.sessions.clone(),
        Duration::from_secs(app_state.config.session.sweep_secs.max(1)),
    );

    let db = app_state.db.clone();
    let result = app::serve(app::build_app(app_state)).await;

    sweeper.abort();
    db.close().await;
    tracing::info!("shutdown complete");
    result
}
