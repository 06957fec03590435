use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Switchboard chat completion gateway
#[derive(Debug, Parser)]
#[command(
    name = "switchboard",
    about = "OpenAI-compatible chat gateway with Anthropic-to-OpenAI fallback, served over MCP stdio or HTTP"
)]
pub struct Args {
    /// Path to configuration file; without it, settings come from the environment
    #[arg(short, long, env = "SWITCHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run the HTTP server instead of the MCP stdio server
    #[arg(long)]
    pub http: bool,

    /// Override the listen address
    #[arg(long, env = "SWITCHBOARD_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Port to listen on in HTTP mode
    pub port: Option<u16>,
}

impl Args {
    /// Listen address after applying `--listen` and the positional port
    pub fn resolve_listen_address(&self, configured: SocketAddr) -> SocketAddr {
        let mut address = self.listen.unwrap_or(configured);

        if let Some(port) = self.port {
            address.set_port(port);
        }

        address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        temp_env::with_vars_unset(["SWITCHBOARD_CONFIG", "SWITCHBOARD_LISTEN"], || {
            Args::try_parse_from(args).unwrap()
        })
    }

    #[test]
    fn defaults_to_mcp_mode_without_config() {
        let args = parse(&["switchboard"]);

        assert!(!args.http);
        assert!(args.config.is_none());
        assert!(args.port.is_none());
    }

    #[test]
    fn positional_port_overrides_configured_port() {
        let args = parse(&["switchboard", "--http", "9001"]);
        let configured: SocketAddr = "0.0.0.0:8000".parse().unwrap();

        assert!(args.http);
        assert_eq!(args.resolve_listen_address(configured), "0.0.0.0:9001".parse().unwrap());
    }

    #[test]
    fn listen_flag_replaces_configured_address() {
        let args = parse(&["switchboard", "--http", "--listen", "127.0.0.1:7000"]);
        let configured: SocketAddr = "0.0.0.0:8000".parse().unwrap();

        assert_eq!(args.resolve_listen_address(configured), "127.0.0.1:7000".parse().unwrap());
    }

    #[test]
    fn port_applies_on_top_of_listen_flag() {
        let args = parse(&["switchboard", "--listen", "127.0.0.1:7000", "7100"]);
        let configured: SocketAddr = "0.0.0.0:8000".parse().unwrap();

        assert_eq!(args.resolve_listen_address(configured), "127.0.0.1:7100".parse().unwrap());
    }

    #[test]
    fn config_path_is_read() {
        let args = parse(&["switchboard", "-c", "switchboard.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("switchboard.toml")));
    }
}
