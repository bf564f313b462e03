use const_format::concatcp;

// Root
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com";
pub const COINGECKO_WEB_URL: &str = "https://www.coingecko.com";

// Paths
pub const COINGECKO_MARKETS_API_PATH: &str = "/api/v3/coins/markets";
pub const COINGECKO_COIN_PAGE_PATH: &str = "/en/coins/";

// Endpoints
pub const COINGECKO_MARKETS_API: &str = concatcp!(COINGECKO_API_URL, COINGECKO_MARKETS_API_PATH);
pub const COINGECKO_COIN_PAGE: &str = concatcp!(COINGECKO_WEB_URL, COINGECKO_COIN_PAGE_PATH);
