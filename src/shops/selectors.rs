//! CSS selectors for the supported shop pages.
//!
//! Each shop gets its own module. Update the matching module when a shop
//! changes its HTML structure, and add a fixture under `tests/fixtures`.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for modivo product pages.
pub mod modivo {
    use super::*;

    /// Final (current) price.
    pub static FINAL_PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "article[class='product'] div[class*='final-price-wrapper'] div[class*='price']",
        )
        .unwrap()
    });

    /// Regular price, only rendered while a discount is active.
    pub static REGULAR_PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "article[class='product'] div[class*='price-with-discount'] div[class*='price']",
        )
        .unwrap()
    });
}

/// Selectors for obuvki product pages.
pub mod obuvki {
    use super::*;

    pub static FINAL_PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("div[class*='price-info'] > div > div[class*='final-price']").unwrap()
    });

    pub static REGULAR_PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("div[class*='price-info'] > div > div[class='price-with-discount']")
            .unwrap()
    });

    /// "Out of stock" banner.
    pub static OUT_OF_STOCK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[class*='out-of-stock-message']").unwrap());
}

/// Selectors for reserved product pages.
pub mod reserved {
    use super::*;

    /// Inline scripts; prices live in an embedded analytics object.
    pub static SCRIPT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("script").unwrap());

    pub static GTM_MARKER: &str = "gtmData";
    pub static PAGE_TYPE_MARKER: &str = "pageType";
}

/// Selectors for tretorn product pages.
pub mod tretorn {
    use super::*;

    /// Every price node in the details block.
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("div[class='product-details'] div[class*='price']").unwrap()
    });

    pub static NEW_PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("div[class='product-details'] div[class*='new-price']").unwrap()
    });

    pub static OLD_PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("div[class='product-details'] div[class*='old-price']").unwrap()
    });
}
