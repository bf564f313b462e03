//! Fixed-interval market poller.
//!
//! Fetches immediately, then every `interval`. Successful fetches are sent
//! whole to the UI; failures are logged and dropped so the UI keeps showing
//! the last good list.

use futures::future::BoxFuture;
use log::{error, info};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::data::Coin;

pub type FetchFn = Box<dyn FnMut() -> BoxFuture<'static, anyhow::Result<Vec<Coin>>> + Send>;

pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn spawn(
        interval: Duration,
        mut fetch: FetchFn,
        tx: mpsc::UnboundedSender<Vec<Coin>>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                match fetch().await {
                    Ok(coins) => {
                        info!("Fetched {} coins", coins.len());
                        if tx.send(coins).is_err() {
                            info!("Coin list receiver closed, stopping poller");
                            break;
                        }
                    }
                    Err(e) => {
                        error!("Market fetch failed, keeping previous coin list: {:#}", e);
                    }
                }
            }
        });

        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CoinBoard;
    use futures::FutureExt;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scripted(
        calls: Arc<AtomicUsize>,
        script: Vec<Option<Vec<Coin>>>,
    ) -> FetchFn {
        Box::new(move || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            let result = match script.get(n).cloned().flatten() {
                Some(coins) => Ok(coins),
                None => Err(anyhow::anyhow!("connection reset")),
            };
            async move { result }.boxed()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn failed_poll_keeps_previous_list() {
        let first = vec![Coin::new("bitcoin", "btc", 100.0), Coin::new("ethereum", "eth", 50.0)];
        let third = vec![Coin::new("solana", "sol", 10.0)];
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _poller = Poller::spawn(
            Duration::from_secs(30),
            scripted(calls.clone(), vec![Some(first.clone()), None, Some(third.clone())]),
            tx,
        );

        let mut board = CoinBoard::new();

        // Poll 1 fires immediately.
        board.replace(rx.recv().await.unwrap());
        assert_eq!(board.coins(), first.as_slice());

        // Poll 2 fails.
        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        while let Ok(coins) = rx.try_recv() {
            board.replace(coins);
        }
        assert_eq!(board.coins(), first.as_slice());
        assert_eq!(board.generation(), 1);

        // Poll 3 recovers.
        board.replace(rx.recv().await.unwrap());
        assert_eq!(board.coins(), third.as_slice());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_timer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let script = vec![Some(vec![Coin::new("bitcoin", "btc", 1.0)]); 10];
        let poller = Poller::spawn(Duration::from_secs(30), scripted(calls.clone(), script), tx);

        rx.recv().await.unwrap();
        poller.stop();
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn exits_when_receiver_is_dropped() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let script = vec![Some(vec![Coin::new("bitcoin", "btc", 1.0)]); 10];
        let _poller = Poller::spawn(Duration::from_secs(30), scripted(calls.clone(), script), tx);

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
