use healthcase::api::{api_router, ApiContext};
use healthcase::config;

#[tokio::main]
async fn main() {
    healthcase::init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let router = api_router(ApiContext::new());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config::server_port()));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, %addr, "cannot bind API server");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "analysis API listening");
    if let Err(err) = axum::serve(listener, router).await {
        tracing::error!(error = %err, "API server terminated");
        std::process::exit(1);
    }
}
