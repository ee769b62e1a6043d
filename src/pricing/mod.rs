//! Price normalization and the pricing engine.

pub mod engine;
pub mod normalizer;

pub use engine::PricingEngine;
pub use normalizer::{normalize, BASE_CURRENCY};
