use std::{env, net::SocketAddr, time::Duration};

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "In-memory todo list served over a JSON REST API",
    long_about = "Serves create/read/update/delete/list for todo items under /v1/todos. \
                  State lives in memory for the lifetime of the process."
)]
pub struct Config {
    #[arg(
        long,
        env = "TODO_LISTEN",
        default_value = "0.0.0.0:8080",
        value_name = "ADDR",
        help = "REST API listen address (host:port)"
    )]
    pub listen: SocketAddr,

    #[arg(
        long,
        env = "TODO_REQUEST_TIMEOUT_SECS",
        default_value_t = crate::DEFAULT_REQUEST_TIMEOUT.as_secs(),
        value_name = "SECS",
        help = "Abort requests that take longer than SECS with 503"
    )]
    pub request_timeout_secs: u64,

    #[arg(
        long,
        env = "TODO_SHUTDOWN_TIMEOUT_SECS",
        default_value_t = 5,
        value_name = "SECS",
        help = "Time given to in-flight requests after Ctrl-C"
    )]
    pub shutdown_timeout_secs: u64,

    #[arg(
        long,
        env = "TODO_LOG_LEVEL",
        default_value = "info",
        value_name = "FILTER",
        help = "Log filter used when RUST_LOG is unset"
    )]
    pub log_level: String,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Loads `.env` (or the file named by `DOTENV_PATH`) and parses the command
/// line, with environment variables as fallbacks.
pub fn parse() -> Config {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();
    Config::parse()
}
