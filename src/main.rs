//! Crypto bubbles in the terminal
//!
//! Top coins by market cap drawn as force-directed bubbles, sized by cap
//! and refreshed from CoinGecko every 30 seconds.

pub mod app;
pub mod config;
pub mod data;
pub mod interaction;
pub mod layout;
pub mod logging;
pub mod poller;
pub mod request;
pub mod third_party;
pub mod ui;

use crate::app::App;
use color_eyre::Result;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init(config::LOG_FILE)?;

    let app = App::new();
    app.run().await
}
