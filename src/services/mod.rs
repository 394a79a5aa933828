//! Access to the analysis backend.

pub mod api_client;
pub mod error;
pub mod market_data;

pub use api_client::HttpMarketApi;
pub use error::ApiError;
pub use market_data::{MarketApi, StaticMarketApi};
