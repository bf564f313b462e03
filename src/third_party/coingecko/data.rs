use serde::{Deserialize, Serialize};

use crate::config::{COINS_PER_PAGE, MARKET_ORDER, MARKET_PAGE, VS_CURRENCY};

/// Query string of `/coins/markets`.
#[derive(Debug, Clone, Serialize)]
pub struct MarketsQuery {
    pub vs_currency: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
}

impl Default for MarketsQuery {
    fn default() -> Self {
        Self {
            vs_currency: VS_CURRENCY.to_string(),
            order: MARKET_ORDER.to_string(),
            per_page: COINS_PER_PAGE,
            page: MARKET_PAGE,
            sparkline: false,
        }
    }
}

/// One entry of the `/coins/markets` response. CoinGecko sends `null` for
/// numbers it has no data for, so every figure is optional here.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}
