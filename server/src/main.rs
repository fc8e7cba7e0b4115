use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use adapters::{TransportError, bind, serve, serve_status, spawn_coordinator};

mod config;

use config::ServerArgs;

#[tokio::main]
async fn main() -> Result<(), TransportError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ServerArgs::parse();
    let listener = bind(args.listen).await?;
    let (events, _coordinator) = spawn_coordinator(args.session_config());

    if let Some(status_addr) = args.status_listen {
        let status_events = events.clone();
        tokio::spawn(async move {
            if let Err(err) = serve_status(status_addr, status_events).await {
                error!(error = %err, "Status endpoint stopped");
            }
        });
    }

    info!(addr = %args.listen, wins_to_take_match = args.wins_to_take_match, "Server starting");
    serve(listener, events, args.max_line_bytes as usize).await
}
