use crate::data::Coin;
use crate::third_party::coingecko::{
    api_path::COINGECKO_MARKETS_API,
    data::{MarketCoin, MarketsQuery},
};

use anyhow::Context;
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct MarketClient {
    client: Client,
    url: String,
    query: MarketsQuery,
}

impl MarketClient {
    pub fn new() -> Self {
        Self::with_endpoint(COINGECKO_MARKETS_API, MarketsQuery::default())
    }

    pub fn with_endpoint(url: impl Into<String>, query: MarketsQuery) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            query,
        }
    }

    fn request(&self) -> reqwest::RequestBuilder {
        self.client.get(&self.url).query(&self.query)
    }

    /// Top coins by market cap, one fixed page.
    pub async fn top_coins(&self) -> anyhow::Result<Vec<Coin>> {
        let response = self
            .request()
            .send()
            .await
            .context("markets request failed")?
            .error_for_status()
            .context("markets endpoint returned an error status")?
            .text()
            .await?;
        parse_markets(&response)
    }
}

impl Default for MarketClient {
    fn default() -> Self {
        Self::new()
    }
}

pub fn parse_markets(body: &str) -> anyhow::Result<Vec<Coin>> {
    let raw: Vec<MarketCoin> =
        serde_json::from_str(body).context("malformed markets payload")?;
    Ok(raw.into_iter().map(Coin::from).collect())
}
