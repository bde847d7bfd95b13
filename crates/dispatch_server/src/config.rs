//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dispatch_core::config::DEFAULT_TIE_EPSILON;
use dispatch_core::matching::MatchingAlgorithmType;
use dispatch_core::DispatchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchingArg {
    /// Closest available driver to the pickup point.
    Nearest,
}

impl From<MatchingArg> for MatchingAlgorithmType {
    fn from(value: MatchingArg) -> Self {
        match value {
            MatchingArg::Nearest => MatchingAlgorithmType::Nearest,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "dispatch_server")]
#[command(about = "Ride request matching service")]
pub struct ServerArgs {
    /// Address to bind the server to
    #[arg(long, env = "DISPATCH_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on
    #[arg(long, env = "DISPATCH_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Directory with static UI files, served at /static with index.html at /
    #[arg(long, env = "DISPATCH_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Matching algorithm used to assign drivers
    #[arg(long, env = "DISPATCH_MATCHING", value_enum, default_value_t = MatchingArg::Nearest)]
    pub matching: MatchingArg,

    /// Distance tolerance under which two drivers count as equidistant
    #[arg(long, env = "DISPATCH_TIE_EPSILON", default_value_t = DEFAULT_TIE_EPSILON)]
    pub tie_epsilon: f64,
}

impl ServerArgs {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.bind, self.port).parse()?)
    }

    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig::default().with_tie_epsilon(self.tie_epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces_on_8000() {
        let args = ServerArgs::try_parse_from(["dispatch_server"]).expect("parse");
        assert_eq!(args.port, 8000);
        assert_eq!(args.matching, MatchingArg::Nearest);
        assert_eq!(
            args.socket_addr().expect("addr").to_string(),
            "0.0.0.0:8000"
        );
        assert_eq!(args.dispatch_config(), DispatchConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let args = ServerArgs::try_parse_from([
            "dispatch_server",
            "--bind",
            "127.0.0.1",
            "--port",
            "9100",
            "--tie-epsilon",
            "0.001",
        ])
        .expect("parse");
        assert_eq!(args.socket_addr().expect("addr").port(), 9100);
        assert_eq!(args.dispatch_config().tie_epsilon, 0.001);
    }

    #[test]
    fn bad_bind_address_is_an_error() {
        let args = ServerArgs::try_parse_from(["dispatch_server", "--bind", "not an ip"])
            .expect("parse");
        assert!(args.socket_addr().is_err());
    }
}
