//! Error taxonomy for price extraction and normalization.

use thiserror::Error;

/// Failures raised while turning a shop page into a price pair.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    /// The item's shop tag has no registered extractor.
    #[error("unsupported shop type: {0}")]
    UnsupportedShop(String),

    /// Expected markup or script data is missing; the site layout likely changed.
    #[error("no price data found for {shop}: {detail}")]
    ExtractionNotFound { shop: String, detail: String },

    /// The token contains no parseable number.
    #[error("malformed price: {0:?}")]
    MalformedPrice(String),

    /// The extractor matched no price nodes at all.
    #[error("empty price token")]
    EmptyPrice,
}

impl PriceError {
    pub(crate) fn not_found(shop: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ExtractionNotFound { shop: shop.into(), detail: detail.into() }
    }
}
