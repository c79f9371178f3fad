//! In-memory inventory store for parts and products
//!
//! The store owns both collections and is the only place they change.
//! It performs no validation: callers (see [`crate::forms`]) check field
//! rules and pick ids with [`Inventory::next_part_id`] /
//! [`Inventory::next_product_id`] before adding.

use thiserror::Error;
use tracing::debug;

use crate::core::entity::{next_id, Entity};
use crate::entities::{Part, PartSource, Product};

/// Errors raised by store operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("{kind} index {index} is out of range (collection has {len} entries)")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("no {kind} ids left (the largest id is already {max})", max = u32::MAX)]
    IdsExhausted { kind: &'static str },
}

/// The parts and products collections
#[derive(Debug, Default, Clone)]
pub struct Inventory {
    parts: Vec<Part>,
    products: Vec<Product>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inventory holding the fixed sample rows
    pub fn with_sample_data() -> Self {
        let mut inventory = Self::new();

        let brakes = Part::new(
            0,
            "Brakes",
            15.00,
            10,
            1,
            10,
            PartSource::InHouse { machine_id: 1001 },
        );
        let wheel = Part::new(
            1,
            "Wheel",
            11.00,
            16,
            1,
            20,
            PartSource::Outsourced {
                company_name: "Spoke & Rim Co".to_string(),
            },
        );
        let seat = Part::new(
            2,
            "Seat",
            15.00,
            10,
            1,
            10,
            PartSource::InHouse { machine_id: 1002 },
        );

        let mut bicycle = Product::new(0, "Giant Bicycle", 299.99, 5, 1, 10);
        bicycle.add_associated_part(wheel.clone());
        let tricycle = Product::new(1, "Tricycle", 99.99, 3, 1, 5);

        inventory.add_part(brakes);
        inventory.add_part(wheel);
        inventory.add_part(seat);
        inventory.add_product(bicycle);
        inventory.add_product(tricycle);

        inventory
    }

    // ------------------------------------------------------------------
    // Parts
    // ------------------------------------------------------------------

    /// Append a part. Id uniqueness is the caller's responsibility.
    pub fn add_part(&mut self, part: Part) {
        debug!(id = part.id, name = %part.name, "adding part");
        self.parts.push(part);
    }

    /// First part with this id
    pub fn lookup_part(&self, id: u32) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    /// All parts whose name contains `needle`, ignoring case
    pub fn lookup_parts_by_name(&self, needle: &str) -> Vec<&Part> {
        self.parts.iter().filter(|p| p.name_contains(needle)).collect()
    }

    /// Replace the part at `index`
    pub fn update_part(&mut self, index: usize, part: Part) -> Result<(), InventoryError> {
        let len = self.parts.len();
        let slot = self
            .parts
            .get_mut(index)
            .ok_or(InventoryError::IndexOutOfRange {
                kind: Part::KIND,
                index,
                len,
            })?;
        debug!(index, id = part.id, "updating part");
        *slot = part;
        Ok(())
    }

    /// Remove every part with the same id. Products keep their copies.
    pub fn delete_part(&mut self, part: &Part) -> bool {
        let before = self.parts.len();
        self.parts.retain(|p| p.id != part.id);
        let removed = self.parts.len() != before;
        debug!(id = part.id, removed, "deleting part");
        removed
    }

    pub fn all_parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn next_part_id(&self) -> Result<u32, InventoryError> {
        next_id(&self.parts).ok_or(InventoryError::IdsExhausted { kind: Part::KIND })
    }

    /// Position of the first part with this id
    pub fn part_index(&self, id: u32) -> Option<usize> {
        self.parts.iter().position(|p| p.id == id)
    }

    /// Search-box semantics: empty shows everything, a number looks up by id,
    /// anything else matches on name.
    pub fn search_parts(&self, query: &str) -> Vec<&Part> {
        search(&self.parts, query)
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// Append a product. Id uniqueness is the caller's responsibility.
    pub fn add_product(&mut self, product: Product) {
        debug!(id = product.id, name = %product.name, "adding product");
        self.products.push(product);
    }

    /// First product with this id
    pub fn lookup_product(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products whose name contains `needle`, ignoring case
    pub fn lookup_products_by_name(&self, needle: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.name_contains(needle))
            .collect()
    }

    /// Replace the product at `index`
    pub fn update_product(&mut self, index: usize, product: Product) -> Result<(), InventoryError> {
        let len = self.products.len();
        let slot = self
            .products
            .get_mut(index)
            .ok_or(InventoryError::IndexOutOfRange {
                kind: Product::KIND,
                index,
                len,
            })?;
        debug!(index, id = product.id, "updating product");
        *slot = product;
        Ok(())
    }

    /// Remove every product with the same id. Does not check associations.
    pub fn delete_product(&mut self, product: &Product) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != product.id);
        let removed = self.products.len() != before;
        debug!(id = product.id, removed, "deleting product");
        removed
    }

    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    pub fn next_product_id(&self) -> Result<u32, InventoryError> {
        next_id(&self.products).ok_or(InventoryError::IdsExhausted { kind: Product::KIND })
    }

    /// Position of the first product with this id
    pub fn product_index(&self, id: u32) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    /// Search-box semantics, same as [`Inventory::search_parts`]
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        search(&self.products, query)
    }
}

fn search<'a, T: Entity>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let query = query.trim();
    if query.is_empty() {
        return items.iter().collect();
    }
    match query.parse::<u32>() {
        Ok(id) => items.iter().find(|item| item.id() == id).into_iter().collect(),
        Err(_) => items.iter().filter(|item| item.name_contains(query)).collect(),
    }
}
