use std::net::SocketAddr;

use clap::Parser;

use domain::SessionConfig;

#[derive(Debug, Parser)]
#[command(name = "rps-server", about = "Rock Paper Scissors over plain TCP")]
pub struct ServerArgs {
    /// Address players connect to
    #[arg(long, env = "RPS_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Address for the JSON status endpoint; disabled when unset
    #[arg(long, env = "RPS_STATUS_LISTEN")]
    pub status_listen: Option<SocketAddr>,

    /// Longest inbound line in bytes before it is cut
    #[arg(long, env = "RPS_MAX_LINE_BYTES", default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_line_bytes: u32,

    /// Round wins needed to take a match
    #[arg(long, env = "RPS_WINS_TO_TAKE_MATCH", default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..))]
    pub wins_to_take_match: u8,
}

impl ServerArgs {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.wins_to_take_match)
    }
}
