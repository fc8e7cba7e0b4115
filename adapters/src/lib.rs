mod error;
mod event_loop;
mod tcp;
mod web;

pub use error::TransportError;
pub use event_loop::{CoordinatorEvent, CoordinatorHandle, spawn_coordinator};
pub use tcp::{TcpNotifier, bind, serve};
pub use web::{get_status, router, serve_status};
