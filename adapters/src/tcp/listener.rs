use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, warn};

use super::connection::serve_connection;
use crate::error::TransportError;
use crate::event_loop::CoordinatorHandle;

pub async fn bind(addr: SocketAddr) -> Result<TcpListener, TransportError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| TransportError::Bind { addr, source })
}

/// Accepts connections until the coordinator stops. Each connection gets its
/// own task; a failed accept is logged and the loop carries on.
pub async fn serve(
    listener: TcpListener,
    events: CoordinatorHandle,
    max_line_bytes: usize,
) -> Result<(), TransportError> {
    info!(addr = %listener.local_addr()?, "Accepting players");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(error = %err, "Accept failed");
                continue;
            }
        };
        if events.is_closed() {
            return Err(TransportError::CoordinatorClosed);
        }
        if let Err(err) = stream.set_nodelay(true) {
            warn!(peer = %peer, error = %err, "Could not disable Nagle");
        }
        tokio::spawn(serve_connection(stream, events.clone(), max_line_bytes));
    }
}
