//! Price monitor command: fetch, price, and report every configured item.

use crate::config::{Config, FailurePolicy};
use crate::pricing::PricingEngine;
use crate::report::ReportBuilder;
use crate::shops::models::{Item, ItemOutcome};
use crate::shops::{PageSource, ShopClient};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Runs one monitoring pass over the configured items.
pub struct MonitorCommand {
    config: Config,
    engine: PricingEngine,
}

impl MonitorCommand {
    /// Creates a new monitor command.
    pub fn new(config: Config) -> Self {
        Self { config, engine: PricingEngine::new() }
    }

    /// Fetches every item and returns the tooltip JSON.
    pub async fn execute(&self) -> Result<String> {
        let client = ShopClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_client(&client).await
    }

    /// Runs the pass with a provided page source (for testing).
    pub async fn execute_with_client(&self, client: &impl PageSource) -> Result<String> {
        let outcomes = self.collect(client).await?;
        Ok(ReportBuilder::new().to_json(outcomes))
    }

    /// Prices every item, applying the configured failure policy.
    pub async fn collect(&self, client: &impl PageSource) -> Result<Vec<ItemOutcome>> {
        let policy = self.config.on_error;
        let mut outcomes = Vec::with_capacity(self.config.items.len());

        info!("Monitoring {} items (on_error: {})", self.config.items.len(), policy);

        for item in &self.config.items {
            match self.price_item(client, item).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => match policy {
                    FailurePolicy::Abort => {
                        let context = format!("Failed to price {} ({})", item.name, item.shop);
                        return Err(e.context(context));
                    }
                    FailurePolicy::Skip => {
                        warn!("Skipping {} ({}): {:#}", item.name, item.shop, e);
                    }
                    FailurePolicy::Placeholder => {
                        warn!("{} ({}) unavailable: {:#}", item.name, item.shop, e);
                        outcomes.push(ItemOutcome::unavailable(item, format!("{:#}", e)));
                    }
                },
            }
        }

        debug!("Collected {} outcomes", outcomes.len());
        Ok(outcomes)
    }

    async fn price_item(&self, client: &impl PageSource, item: &Item) -> Result<ItemOutcome> {
        // Reject unknown shops before spending a request on them
        item.shop_type()?;

        let html = client.fetch(&item.url).await?;
        let record = self.engine.record(item, &html)?;
        Ok(ItemOutcome::Priced(record))
    }
}
