use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::routes::create_routes;

pub fn build_router(state: AppState) -> Router {
    create_routes(state.clone()).with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    let app = build_router(state);
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    // Peer addresses feed the rate limiter.
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await
}
