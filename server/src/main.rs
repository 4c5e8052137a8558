#![recursion_limit = "256"]

mod routes;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let state = state::AppState::from_env();
    for backend in wire::Backend::ALL {
        tracing::info!(backend = backend.as_str(), base = state.endpoints.base(backend), "backend endpoint");
    }

    let app = routes::leptos_app(state).expect("leptos configuration failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "touchglyph listening");
    axum::serve(listener, app).await.expect("server failed");
}
