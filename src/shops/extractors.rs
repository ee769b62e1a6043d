//! Per-shop price extractors.
//!
//! An extractor reads a parsed product page and returns the raw
//! `(current, previous)` tokens; normalization happens in the pricing engine.

use crate::error::PriceError;
use crate::shops::models::{RawPriceToken, ShopType};
use crate::shops::selectors::{modivo, obuvki, reserved, tretorn};
use scraper::{Html, Selector};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Raw `(current, previous)` tokens pulled from a page.
pub type RawPricePair = (RawPriceToken, RawPriceToken);

/// Trait for shop-specific price extraction.
pub trait Extractor: Send + Sync {
    /// The shop layout this extractor understands.
    fn shop(&self) -> ShopType;

    /// Extracts the raw current and previous price tokens.
    fn extract(&self, doc: &Html) -> Result<RawPricePair, PriceError>;
}

/// Collects the non-blank direct text nodes of every match, in document order.
fn text_nodes(doc: &Html, selector: &Selector) -> Vec<String> {
    doc.select(selector)
        .flat_map(|element| {
            element
                .children()
                .filter_map(|child| child.value().as_text().map(|t| t.trim().to_string()))
        })
        .filter(|text| !text.is_empty())
        .collect()
}

/// Pairs the final price with the regular one, or with itself when no discount is shown.
fn final_and_regular(final_price: Vec<String>, regular: Vec<String>) -> RawPricePair {
    if regular.is_empty() {
        (final_price.clone().into(), final_price.into())
    } else {
        (final_price.into(), regular.into())
    }
}

/// modivo: final price plus an optional pre-discount price.
pub struct ModivoExtractor;

impl Extractor for ModivoExtractor {
    fn shop(&self) -> ShopType {
        ShopType::Modivo
    }

    fn extract(&self, doc: &Html) -> Result<RawPricePair, PriceError> {
        let final_price = text_nodes(doc, &modivo::FINAL_PRICE);
        let regular = text_nodes(doc, &modivo::REGULAR_PRICE);
        trace!("modivo final={:?} regular={:?}", final_price, regular);

        Ok(final_and_regular(final_price, regular))
    }
}

/// obuvki: like modivo, but an out-of-stock banner wins over any price.
pub struct ObuvkiExtractor;

impl Extractor for ObuvkiExtractor {
    fn shop(&self) -> ShopType {
        ShopType::Obuvki
    }

    fn extract(&self, doc: &Html) -> Result<RawPricePair, PriceError> {
        if doc.select(&obuvki::OUT_OF_STOCK).next().is_some() {
            debug!("obuvki item is out of stock");
            let zero = || RawPriceToken::from(vec!["0".to_string()]);
            return Ok((zero(), zero()));
        }

        let final_price = text_nodes(doc, &obuvki::FINAL_PRICE);
        let regular = text_nodes(doc, &obuvki::REGULAR_PRICE);
        trace!("obuvki final={:?} regular={:?}", final_price, regular);

        Ok(final_and_regular(final_price, regular))
    }
}

/// reserved: prices come from the analytics object embedded in an inline script.
pub struct ReservedExtractor;

impl ReservedExtractor {
    /// Parses the first complete JSON value after the `gtmData` marker.
    ///
    /// Uses a streaming parser so nested objects inside the payload are handled.
    fn embedded_data(script: &str) -> Result<Value, PriceError> {
        let marker_at = script
            .find(reserved::GTM_MARKER)
            .ok_or_else(|| PriceError::not_found("reserved", "gtmData marker missing"))?;

        let open = script[marker_at..]
            .find('{')
            .map(|offset| marker_at + offset)
            .ok_or_else(|| PriceError::not_found("reserved", "no JSON object after gtmData"))?;

        let mut stream = serde_json::Deserializer::from_str(&script[open..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) => Ok(value),
            Some(Err(e)) => {
                Err(PriceError::not_found("reserved", format!("invalid gtmData JSON: {}", e)))
            }
            None => Err(PriceError::not_found("reserved", "empty gtmData payload")),
        }
    }

    fn price_field(data: &Value, key: &str) -> Option<RawPriceToken> {
        match data.get(key)? {
            Value::String(text) => Some(RawPriceToken::text(text.as_str())),
            Value::Number(number) => Some(RawPriceToken::text(number.to_string())),
            _ => None,
        }
    }
}

impl Extractor for ReservedExtractor {
    fn shop(&self) -> ShopType {
        ShopType::Reserved
    }

    fn extract(&self, doc: &Html) -> Result<RawPricePair, PriceError> {
        let script = doc
            .select(&reserved::SCRIPT)
            .map(|e| e.text().collect::<String>())
            .find(|text| {
                text.contains(reserved::GTM_MARKER) && text.contains(reserved::PAGE_TYPE_MARKER)
            })
            .ok_or_else(|| {
                PriceError::not_found("reserved", "no gtmData script, maybe the page was updated?")
            })?;

        let data = Self::embedded_data(&script)?;
        trace!("reserved gtmData: {}", data);

        let current = Self::price_field(&data, "price")
            .ok_or_else(|| PriceError::not_found("reserved", "gtmData has no price"))?;
        let previous = Self::price_field(&data, "basePrice").unwrap_or_else(|| current.clone());

        Ok((current, previous))
    }
}

/// tretorn: a single price node, or separate new/old nodes while discounted.
pub struct TretornExtractor;

impl Extractor for TretornExtractor {
    fn shop(&self) -> ShopType {
        ShopType::Tretorn
    }

    fn extract(&self, doc: &Html) -> Result<RawPricePair, PriceError> {
        let prices = text_nodes(doc, &tretorn::PRICE);
        trace!("tretorn prices={:?}", prices);

        if prices.len() > 1 {
            let new = text_nodes(doc, &tretorn::NEW_PRICE);
            let old = text_nodes(doc, &tretorn::OLD_PRICE);
            return Ok((new.into(), old.into()));
        }

        Ok((prices.clone().into(), prices.into()))
    }
}

/// Extractors keyed by shop type.
pub struct ExtractorRegistry {
    extractors: HashMap<ShopType, Box<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self { extractors: HashMap::new() }
    }

    /// Registers an extractor, replacing any previous one for the same shop.
    pub fn register(&mut self, extractor: impl Extractor + 'static) -> &mut Self {
        self.extractors.insert(extractor.shop(), Box::new(extractor));
        self
    }

    /// Looks up the extractor for a shop.
    pub fn get(&self, shop: ShopType) -> Result<&dyn Extractor, PriceError> {
        self.extractors
            .get(&shop)
            .map(|e| e.as_ref())
            .ok_or_else(|| PriceError::UnsupportedShop(shop.to_string()))
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(ModivoExtractor)
            .register(ObuvkiExtractor)
            .register(ReservedExtractor)
            .register(TretornExtractor);
        registry
    }
}
