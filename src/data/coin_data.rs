use crate::third_party::coingecko::data::MarketCoin;

#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub price_change_percentage_24h: Option<f64>,
}

impl Coin {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, market_cap: f64) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: String::new(),
            image: String::new(),
            current_price: 0.0,
            market_cap,
            price_change_percentage_24h: None,
        }
    }
}

impl From<MarketCoin> for Coin {
    fn from(raw: MarketCoin) -> Self {
        Self {
            id: raw.id,
            symbol: raw.symbol,
            name: raw.name,
            image: raw.image,
            current_price: raw.current_price.unwrap_or(0.0),
            market_cap: raw.market_cap.unwrap_or(0.0),
            price_change_percentage_24h: raw.price_change_percentage_24h,
        }
    }
}

/// The coin list currently on screen. Each successful poll swaps the whole
/// list; nothing is merged with the previous one.
#[derive(Clone, Debug, Default)]
pub struct CoinBoard {
    coins: Vec<Coin>,
    generation: u64,
    updated_at: Option<chrono::DateTime<chrono::Local>>,
}

impl CoinBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, coins: Vec<Coin>) {
        self.coins = coins;
        self.generation += 1;
        self.updated_at = Some(chrono::Local::now());
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn updated_at(&self) -> Option<chrono::DateTime<chrono::Local>> {
        self.updated_at
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_figures_become_zero() {
        let raw: MarketCoin = serde_json::from_str(
            r#"{"id":"foo","symbol":"foo","name":"Foo","image":"x","current_price":null,"market_cap":null,"price_change_percentage_24h":null}"#,
        )
        .unwrap();
        let coin = Coin::from(raw);
        assert_eq!(coin.current_price, 0.0);
        assert_eq!(coin.market_cap, 0.0);
        assert_eq!(coin.price_change_percentage_24h, None);
        assert_eq!(coin.name, "Foo");
    }

    #[test]
    fn replace_swaps_the_whole_list() {
        let mut board = CoinBoard::new();
        board.replace(vec![Coin::new("bitcoin", "btc", 2.0), Coin::new("ethereum", "eth", 1.0)]);
        board.replace(vec![Coin::new("solana", "sol", 3.0)]);

        assert_eq!(board.len(), 1);
        assert_eq!(board.coins()[0].id, "solana");
        assert_eq!(board.generation(), 2);
        assert!(board.updated_at().is_some());
    }
}
