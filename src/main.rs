use log::info;
use tokio::net::TcpListener;

use wikinitt_discussion::integration;
use wikinitt_discussion::state::AppState;

#[tokio::main]
async fn main() {
    let config = integration::Config::default();
    let state = AppState::init(&config).await;

    let addr = config.env.addr();
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => panic!("Failed to bind {addr}: {e}"),
    };

    info!("listening on {addr} ({:?})", config.env);
    if let Err(e) = axum::serve(listener, wikinitt_discussion::app(state)).await {
        panic!("Server stopped: {e}");
    }
}
