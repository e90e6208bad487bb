//! Gateway configuration.

use std::time::Duration;

use clap::Parser;

/// Newsstand HTTP gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "newsstand-gateway")]
#[command(about = "Read-only HTTP lookups over Newsstand market data")]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, env = "NEWSSTAND_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: String,

    /// Port override for the listen address.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// MySQL connection URL of the market database.
    #[arg(
        short,
        long,
        env = "DATABASE_URL",
        default_value = "mysql://newswire.theunderminejournal.com/newsstand"
    )]
    pub database_url: String,

    /// Maximum number of pooled connections to allow.
    #[arg(long, default_value_t = 10)]
    pub pool_max_connections: u32,

    /// Timeout (ms) when acquiring a pooled connection.
    #[arg(long, default_value_t = 30_000)]
    pub pool_acquire_timeout_ms: u64,

    /// Timeout (ms) for a single query.
    #[arg(long, default_value_t = 30_000)]
    pub query_timeout_ms: u64,

    /// Maximum number of cached house lookups. Unbounded when unset.
    #[arg(long)]
    pub house_cache_max_entries: Option<usize>,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// MySQL connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections to allow.
    pub pool_max_connections: u32,
    /// Timeout when acquiring a pooled connection.
    pub pool_acquire_timeout: Duration,
    /// Timeout for a single query.
    pub query_timeout: Duration,
    /// Maximum number of cached house lookups.
    pub house_cache_max_entries: Option<usize>,
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        let listen_addr = match args.port {
            Some(port) => with_port(&args.listen, port),
            None => args.listen.clone(),
        };

        Self {
            listen_addr,
            database_url: args.database_url.clone(),
            pool_max_connections: args.pool_max_connections,
            pool_acquire_timeout: Duration::from_millis(args.pool_acquire_timeout_ms),
            query_timeout: Duration::from_millis(args.query_timeout_ms),
            house_cache_max_entries: args.house_cache_max_entries,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            database_url: "mysql://newswire.theunderminejournal.com/newsstand".to_string(),
            pool_max_connections: 10,
            pool_acquire_timeout: Duration::from_secs(30),
            query_timeout: Duration::from_secs(30),
            house_cache_max_entries: None,
        }
    }
}

/// Replace the port of a `host:port` address.
fn with_port(addr: &str, port: u16) -> String {
    let host = addr.rsplit_once(':').map(|(host, _)| host).unwrap_or(addr);
    format!("{}:{}", host, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_args() {
        let args = Args::parse_from(["newsstand-gateway"]);
        let config = GatewayConfig::from(&args);

        assert_eq!(config.pool_max_connections, 10);
        assert_eq!(config.query_timeout, Duration::from_secs(30));
        assert!(config.house_cache_max_entries.is_none());
    }

    #[test]
    fn test_port_overrides_listen_port() {
        let args = Args::parse_from([
            "newsstand-gateway",
            "--listen",
            "127.0.0.1:3000",
            "--port",
            "8081",
            "--house-cache-max-entries",
            "64",
        ]);
        let config = GatewayConfig::from(&args);

        assert_eq!(config.listen_addr, "127.0.0.1:8081");
        assert_eq!(config.house_cache_max_entries, Some(64));
    }

    #[test]
    fn test_with_port_without_existing_port() {
        assert_eq!(with_port("localhost", 3000), "localhost:3000");
    }
}
