//! Server configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first if present.
//!
//! | Variable             | Default          |
//! |----------------------|------------------|
//! | `KAUTION_BIND_ADDR`  | `127.0.0.1:3000` |
//! | `KAUTION_LOG_FORMAT` | `text`           |
//!
//! Log filtering follows `RUST_LOG` (default `info`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(
            std::env::var("KAUTION_BIND_ADDR").ok(),
            std::env::var("KAUTION_LOG_FORMAT").ok(),
        )
    }

    fn from_vars(
        bind_addr: Option<String>,
        log_format: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind_addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr.clone()))?;
        let log_format = match log_format.as_deref().map(str::trim) {
            None | Some("") => LogFormat::Text,
            Some(value) if value.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(value) => return Err(ConfigError::InvalidLogFormat(value.to_string())),
        };
        Ok(Config {
            bind_addr,
            log_format,
        })
    }
}

/// Install the global tracing subscriber.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}
