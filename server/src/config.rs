//! Server configuration from command-line flags and environment.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;
use poolside_shared::DEFAULT_PORT;

#[derive(Debug, Clone, Parser)]
#[command(name = "poolside-server", version, about = "Pixel poolside game server")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Seconds a conversation may sit idle before it is forgotten
    #[arg(long, env = "POOLSIDE_SESSION_IDLE_SECS", default_value_t = 600)]
    pub session_idle_secs: u64,

    /// Seconds between sweeps for idle conversations
    #[arg(long, env = "POOLSIDE_SWEEP_INTERVAL_SECS", default_value_t = 60)]
    pub sweep_interval_secs: u64,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        // A zero interval would make tokio's interval panic
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}
