mod app;
mod client;
mod config;
mod error;
mod logging;
mod navigation;
mod notify;
mod service;
mod storage;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;
    tracing::info!(base_url = %config.base_url, "starting lancamentos_tui");

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
