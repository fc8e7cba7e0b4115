mod connection;
mod listener;
mod notifier;

pub use listener::{bind, serve};
pub use notifier::TcpNotifier;
