//! Shop-specific modules: page fetching, selectors, extractors, and data models.

pub mod client;
pub mod extractors;
pub mod models;
pub mod selectors;

pub use client::{PageSource, ShopClient};
pub use extractors::{Extractor, ExtractorRegistry};
pub use models::{Item, ItemOutcome, PricePair, PriceRecord, RawPriceToken, ShopType};
