//! price-monitor - Shop price monitor for a Waybar tooltip
//!
//! Fetches product pages from supported shops, extracts current and
//! previous prices, normalizes them to BGN, and renders the tooltip JSON.

pub mod commands;
pub mod config;
pub mod error;
pub mod pricing;
pub mod report;
pub mod shops;

pub use config::{Config, FailurePolicy};
pub use error::PriceError;
pub use pricing::PricingEngine;
pub use report::ReportBuilder;
pub use shops::models::{Item, ItemOutcome, PricePair, PriceRecord, RawPriceToken, ShopType};
