//! Core entry point for the order_fixtures crate.
//!
//! Renders synthetic order documents (receipts, invoices, B2B and cross-border orders) as PNG
//! images and pairs each one with a JSON record of the exact values drawn on it.

pub mod batch;
pub mod builder;
pub mod canvas;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod money;
pub mod pools;
pub mod templates;

pub use batch::{run_batch, BatchConfig, WrittenFixture};
pub use builder::{Generator, GeneratorBuilder};
pub use error::{FixtureError, Result};
pub use fonts::Typeface;
pub use model::OrderRecord;
pub use templates::{Fixture, Locale, OrderKind, Suite};
