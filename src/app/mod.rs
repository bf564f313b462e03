use crate::config::FETCH_INTERVAL_SECS;
use crate::data::Coin;
use crate::poller::{FetchFn, Poller};
use crate::request::MarketClient;
use crate::ui::BubbleApp;
use color_eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use futures::FutureExt;
use log::{info, warn};
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct App {
    fetch_interval: Duration,
}

impl App {
    pub fn new() -> Self {
        Self {
            fetch_interval: Duration::from_secs(FETCH_INTERVAL_SECS),
        }
    }

    fn market_fetch(client: MarketClient) -> FetchFn {
        Box::new(move || {
            let client = client.clone();
            async move { client.top_coins().await }.boxed()
        })
    }

    pub async fn run(&self) -> Result<()> {
        let (tx, rx) = mpsc::unbounded_channel::<Vec<Coin>>();

        info!(
            "Starting market poller every {}s",
            self.fetch_interval.as_secs()
        );
        let poller = Poller::spawn(
            self.fetch_interval,
            Self::market_fetch(MarketClient::new()),
            tx,
        );

        // Terminal I/O blocks, so the UI loop gets its own thread.
        let ui_task = tokio::task::spawn_blocking(move || {
            let terminal = ratatui::init();
            let app_result = match crossterm::execute!(stdout(), EnableMouseCapture) {
                Ok(()) => BubbleApp::new().run(terminal, rx),
                Err(e) => Err(e.into()),
            };
            if let Err(e) = crossterm::execute!(stdout(), DisableMouseCapture) {
                warn!("Failed to disable mouse capture: {}", e);
            }
            ratatui::restore();
            app_result
        });

        // Wait for UI to finish (user quits)
        let ui_result = ui_task.await;

        // Tear the poller down with the view
        poller.stop();
        info!("UI closed, market poller stopped");

        ui_result??;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
