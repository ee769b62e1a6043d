//! Dispatches items to their shop extractor and normalizes the result.

use crate::error::PriceError;
use crate::pricing::normalizer::normalize;
use crate::shops::extractors::ExtractorRegistry;
use crate::shops::models::{Item, PricePair, PriceRecord};
use scraper::Html;
use tracing::debug;

/// Turns product pages into normalized price pairs.
pub struct PricingEngine {
    registry: ExtractorRegistry,
}

impl PricingEngine {
    /// Creates an engine with every supported shop registered.
    pub fn new() -> Self {
        Self::with_registry(ExtractorRegistry::default())
    }

    /// Creates an engine backed by a custom registry.
    pub fn with_registry(registry: ExtractorRegistry) -> Self {
        Self { registry }
    }

    /// Prices an item from its parsed product page.
    ///
    /// Extractor and normalizer errors are returned unchanged.
    pub fn price(&self, item: &Item, doc: &Html) -> Result<PricePair, PriceError> {
        let shop = item.shop_type()?;
        let extractor = self.registry.get(shop)?;

        let (current, previous) = extractor.extract(doc)?;
        let pair = PricePair::new(normalize(&current)?, normalize(&previous)?);

        debug!("{} ({}): current={} previous={}", item.name, shop, pair.current, pair.previous);
        Ok(pair)
    }

    /// Parses raw HTML and prices the item.
    pub fn price_html(&self, item: &Item, html: &str) -> Result<PricePair, PriceError> {
        let document = Html::parse_document(html);
        self.price(item, &document)
    }

    /// Prices an item and builds its report record.
    pub fn record(&self, item: &Item, html: &str) -> Result<PriceRecord, PriceError> {
        let pair = self.price_html(item, html)?;
        Ok(PriceRecord::new(item, pair))
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new()
    }
}
