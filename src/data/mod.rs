pub mod coin_data;

pub use coin_data::{Coin, CoinBoard};
