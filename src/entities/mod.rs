//! Entity type definitions
//!
//! - [`Part`] - Stockable items, either made in-house or outsourced
//! - [`Product`] - Sellable items with a set of associated parts

pub mod part;
pub mod product;

pub use part::{Part, PartSource, SourceKind};
pub use product::Product;
