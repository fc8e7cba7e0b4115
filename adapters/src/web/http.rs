use std::net::SocketAddr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use application::ports::in_::CoordinatorSnapshot;

use crate::error::TransportError;
use crate::event_loop::{CoordinatorEvent, CoordinatorHandle};
use crate::tcp::bind;

pub async fn get_status(State(events): State<CoordinatorHandle>) -> Result<Json<CoordinatorSnapshot>, StatusCode> {
    let (reply, response) = oneshot::channel();
    if events.send(CoordinatorEvent::Snapshot { reply }).is_err() {
        warn!("Status requested but coordinator is gone");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    response.await.map(Json).map_err(|_| StatusCode::SERVICE_UNAVAILABLE)
}

pub fn router(events: CoordinatorHandle) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .layer(CorsLayer::permissive())
        .with_state(events)
}

pub async fn serve_status(
    addr: SocketAddr,
    events: CoordinatorHandle,
) -> Result<(), TransportError> {
    let listener = bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Status endpoint listening");
    axum::serve(listener, router(events)).await?;
    Ok(())
}
