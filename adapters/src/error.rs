use std::io;
use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("transport i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("coordinator event loop has stopped")]
    CoordinatorClosed,
}
