//! Data models for monitored items, raw tokens, and normalized prices.

use crate::error::PriceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported shop layouts, one extractor each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopType {
    Modivo,
    Obuvki,
    Reserved,
    Tretorn,
}

impl ShopType {
    /// Returns the configuration tag for this shop.
    pub fn tag(&self) -> &'static str {
        match self {
            ShopType::Modivo => "modivo",
            ShopType::Obuvki => "obuvki",
            ShopType::Reserved => "reserved",
            ShopType::Tretorn => "tretorn",
        }
    }

    /// Returns all supported shops.
    pub fn all() -> &'static [ShopType] {
        &[ShopType::Modivo, ShopType::Obuvki, ShopType::Reserved, ShopType::Tretorn]
    }
}

impl fmt::Display for ShopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for ShopType {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modivo" => Ok(ShopType::Modivo),
            "obuvki" => Ok(ShopType::Obuvki),
            "reserved" => Ok(ShopType::Reserved),
            "tretorn" => Ok(ShopType::Tretorn),
            _ => Err(PriceError::UnsupportedShop(s.to_string())),
        }
    }
}

/// A monitored item as listed in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display name
    pub name: String,
    /// Shop tag, resolved to a [`ShopType`] when priced
    pub shop: String,
    /// Product page URL
    pub url: String,
}

impl Item {
    pub fn new(name: impl Into<String>, shop: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), shop: shop.into(), url: url.into() }
    }

    /// Resolves the shop tag, failing for unknown shops.
    pub fn shop_type(&self) -> Result<ShopType, PriceError> {
        self.shop.parse()
    }
}

/// Price text as pulled out of markup or script data, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPriceToken {
    /// A single value, e.g. from embedded JSON.
    Text(String),
    /// Text nodes in document order; only the first one is priced.
    Nodes(Vec<String>),
}

impl RawPriceToken {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the text that is actually priced.
    pub fn first(&self) -> Option<&str> {
        match self {
            RawPriceToken::Text(text) => Some(text),
            RawPriceToken::Nodes(nodes) => nodes.first().map(String::as_str),
        }
    }

    /// Number of text values carried by this token.
    pub fn len(&self) -> usize {
        match self {
            RawPriceToken::Text(_) => 1,
            RawPriceToken::Nodes(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<String>> for RawPriceToken {
    fn from(nodes: Vec<String>) -> Self {
        Self::Nodes(nodes)
    }
}

/// Normalized `(current, previous)` prices in the base currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePair {
    pub current: f64,
    pub previous: f64,
}

impl PricePair {
    pub fn new(current: f64, previous: f64) -> Self {
        Self { current, previous }
    }

    /// Fraction saved relative to the previous price; positive on a price drop.
    pub fn discount(&self) -> f64 {
        if self.current == self.previous || self.previous == 0.0 {
            return 0.0;
        }
        (self.previous - self.current) / self.previous
    }
}

/// Price block of a [`PriceRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub current: f64,
    pub previous: f64,
    pub discount: f64,
}

impl From<PricePair> for Price {
    fn from(pair: PricePair) -> Self {
        Self { current: pair.current, previous: pair.previous, discount: pair.discount() }
    }
}

/// A priced item, ready for the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub name: String,
    pub shop: String,
    pub price: Price,
}

impl PriceRecord {
    pub fn new(item: &Item, pair: PricePair) -> Self {
        Self { name: item.name.clone(), shop: item.shop.clone(), price: pair.into() }
    }

    /// Both prices zero is the out-of-stock sentinel.
    pub fn is_out_of_stock(&self) -> bool {
        self.price.current == 0.0 && self.price.previous == 0.0
    }

    pub fn is_discounted(&self) -> bool {
        self.price.current < self.price.previous
    }
}

/// Result of monitoring one item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Priced(PriceRecord),
    Unavailable { name: String, shop: String, reason: String },
}

impl ItemOutcome {
    pub fn unavailable(item: &Item, reason: impl fmt::Display) -> Self {
        Self::Unavailable {
            name: item.name.clone(),
            shop: item.shop.clone(),
            reason: reason.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ItemOutcome::Priced(record) => &record.name,
            ItemOutcome::Unavailable { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_type_parsing() {
        assert_eq!("modivo".parse::<ShopType>().unwrap(), ShopType::Modivo);
        assert_eq!("OBUVKI".parse::<ShopType>().unwrap(), ShopType::Obuvki);
        assert_eq!(" reserved ".parse::<ShopType>().unwrap(), ShopType::Reserved);
        assert_eq!("Tretorn".parse::<ShopType>().unwrap(), ShopType::Tretorn);

        let err = "zalando".parse::<ShopType>().unwrap_err();
        assert_eq!(err, PriceError::UnsupportedShop("zalando".into()));
    }

    #[test]
    fn test_shop_type_display_roundtrip() {
        for shop in ShopType::all() {
            assert_eq!(shop.to_string().parse::<ShopType>().unwrap(), *shop);
        }
    }

    #[test]
    fn test_item_shop_type() {
        let item = Item::new("Boots", "tretorn", "https://example.com/boots");
        assert_eq!(item.shop_type().unwrap(), ShopType::Tretorn);

        let item = Item::new("Boots", "unknown", "https://example.com/boots");
        assert!(matches!(item.shop_type(), Err(PriceError::UnsupportedShop(_))));
    }

    #[test]
    fn test_raw_token_first() {
        assert_eq!(RawPriceToken::text("12,50").first(), Some("12,50"));
        let nodes = RawPriceToken::from(vec!["1".to_string(), "2".to_string()]);
        assert_eq!(nodes.first(), Some("1"));
        assert_eq!(nodes.len(), 2);
        assert!(RawPriceToken::Nodes(Vec::new()).is_empty());
        assert_eq!(RawPriceToken::Nodes(Vec::new()).first(), None);
    }

    #[test]
    fn test_discount() {
        assert_eq!(PricePair::new(19.56, 39.12).discount(), 0.5);
        assert_eq!(PricePair::new(49.99, 49.99).discount(), 0.0);
        assert!(PricePair::new(60.0, 50.0).discount() < 0.0);
        // No reference price to compare against
        assert_eq!(PricePair::new(10.0, 0.0).discount(), 0.0);
    }

    #[test]
    fn test_out_of_stock_sentinel() {
        let item = Item::new("Boots", "obuvki", "https://example.com/boots");
        assert!(PriceRecord::new(&item, PricePair::new(0.0, 0.0)).is_out_of_stock());
        assert!(!PriceRecord::new(&item, PricePair::new(0.0, 10.0)).is_out_of_stock());
    }

    #[test]
    fn test_price_record_serde() {
        let item = Item::new("Jacket", "reserved", "https://example.com/jacket");
        let record = PriceRecord::new(&item, PricePair::new(80.0, 100.0));
        assert!(record.is_discounted());
        assert!(!record.is_out_of_stock());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Jacket");
        assert_eq!(json["shop"], "reserved");
        assert_eq!(json["price"]["current"], 80.0);
        assert_eq!(json["price"]["previous"], 100.0);
        assert_eq!(json["price"]["discount"], 0.2);
    }

    #[test]
    fn test_item_outcome_name() {
        let item = Item::new("Cap", "modivo", "https://example.com/cap");
        let outcome = ItemOutcome::unavailable(&item, PriceError::EmptyPrice);
        assert_eq!(outcome.name(), "Cap");
        match outcome {
            ItemOutcome::Unavailable { shop, reason, .. } => {
                assert_eq!(shop, "modivo");
                assert_eq!(reason, "empty price token");
            }
            ItemOutcome::Priced(_) => panic!("expected unavailable outcome"),
        }
    }
}
