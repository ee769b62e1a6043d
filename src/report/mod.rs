//! Waybar tooltip rendering for priced items.

use crate::shops::models::{ItemOutcome, PriceRecord};
use serde_json::json;
use std::cmp::Ordering;

/// Renders price outcomes as a Waybar tooltip.
pub struct ReportBuilder {
    name_width: usize,
    shop_width: usize,
    price_width: usize,
    discount_width: usize,
}

impl ReportBuilder {
    /// Creates a builder with the default column widths.
    pub fn new() -> Self {
        Self { name_width: 30, shop_width: 10, price_width: 6, discount_width: 8 }
    }

    /// Sorts by ascending discount; unavailable items go last in their original order.
    pub fn sort(outcomes: &mut [ItemOutcome]) {
        outcomes.sort_by(|a, b| match (a, b) {
            (ItemOutcome::Priced(a), ItemOutcome::Priced(b)) => {
                a.price.discount.total_cmp(&b.price.discount)
            }
            (ItemOutcome::Priced(_), ItemOutcome::Unavailable { .. }) => Ordering::Less,
            (ItemOutcome::Unavailable { .. }, ItemOutcome::Priced(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        });
    }

    /// Renders a single priced line.
    pub fn render_record(&self, record: &PriceRecord) -> String {
        let price = &record.price;
        let mut line = format!(
            "{:<name_w$} | {:^shop_w$} | {:^price_w$.2} <sup>({:^price_w$.2})</sup>",
            record.name,
            record.shop,
            price.current,
            price.previous,
            name_w = self.name_width,
            shop_w = self.shop_width,
            price_w = self.price_width,
        );

        if record.is_discounted() {
            let percent = format!("{:.2}%", price.discount * 100.0);
            line.push_str(&format!(" | {:^width$}", percent, width = self.discount_width));
        } else {
            line.push_str(&format!(" | {:<width$}", " ", width = self.discount_width));
        }

        if record.is_out_of_stock() {
            line = format!("<s>{}</s>", line);
        }

        line
    }

    /// Renders the line for an item that could not be priced.
    pub fn render_unavailable(&self, name: &str, shop: &str) -> String {
        format!(
            "{:<name_w$} | {:^shop_w$} | unavailable",
            name,
            shop,
            name_w = self.name_width,
            shop_w = self.shop_width,
        )
    }

    /// Sorts and renders all outcomes, one line each.
    pub fn tooltip(&self, mut outcomes: Vec<ItemOutcome>) -> String {
        Self::sort(&mut outcomes);

        outcomes
            .iter()
            .map(|outcome| match outcome {
                ItemOutcome::Priced(record) => self.render_record(record),
                ItemOutcome::Unavailable { name, shop, .. } => self.render_unavailable(name, shop),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns the Waybar JSON object for the outcomes.
    pub fn to_json(&self, outcomes: Vec<ItemOutcome>) -> String {
        json!({ "tooltip": self.tooltip(outcomes) }).to_string()
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
