use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::api::{ApiConfig, DEFAULT_API_AMOUNT};

/// Leaderboard web service.
///
/// Every option can also be set through the environment variable shown in
/// `--help`.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 80)]
    pub port: u16,

    /// Shared secret required to submit or delete scores.
    #[arg(long, env = "TOKEN", default_value = "default-token", hide_env_values = true)]
    pub token: String,

    /// SQLite database file. Parent directories are created as needed.
    #[arg(long, env = "DATABASE_PATH", default_value = "data/scores.db")]
    pub database: PathBuf,

    /// Keep scores in memory only; `--database` is ignored.
    #[arg(long)]
    pub ephemeral: bool,

    /// Scores returned by `GET /api` without an amount. Negative means all.
    #[arg(long, default_value_t = DEFAULT_API_AMOUNT, allow_negative_numbers = true)]
    pub api_amount: i64,

    /// Scores shown on the HTML leaderboard. Negative means all.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub page_amount: i64,
}

impl Cli {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            token: self.token.clone(),
            api_amount: self.api_amount,
            page_amount: self.page_amount,
        }
    }
}
