mod config;
mod error;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env();
    let port = config.port;
    let state = state::AppState::new(config);

    if state.config.seed_demo_data {
        services::seed::seed_demo_data(&state).await;
    }

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "depot listening");
    axum::serve(listener, app).await.expect("server failed");
}
