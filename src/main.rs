//! Entry point for the Kaution Engine binary.
//!
//! Running this binary starts an HTTP server exposing the deposit
//! calculator.  See [`kaution_engine::config`] for the environment
//! variables it reads.

use kaution_engine::{api, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::from_env()?;
    config::init_tracing(config.log_format);
    api::serve(config.bind_addr).await
}
