//! Server process configuration.
//!
//! Every setting can come from a command-line flag or an environment
//! variable; flags win.
//!
//! | Flag | Variable | Default |
//! |------|----------|---------|
//! | `--host` | `HTTP_HOST` | `0.0.0.0` |
//! | `--port` | `HTTP_PORT` | `8080` |
//! | `--log-level` | `LOG_LEVEL` | `info` |
//! | `--log-format` | `LOG_FORMAT` | `json` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Parser, ValueEnum};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Log output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human-readable lines
    Pretty,
}

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "card-validator-server")]
#[command(version, about = "Card validation REST API")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HTTP_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "HTTP_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Minimum log level (trace, debug, info, warn, error, off)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Parsed log level; unrecognised values fall back to `info`.
    pub fn level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::INFO)
    }

    /// Filter built from the configured level, refined by `RUST_LOG` when set.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.level().into())
            .from_env_lossy()
    }
}
