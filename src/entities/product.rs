//! Product entity - sellable items built from associated parts

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::entities::part::Part;

/// A Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    pub min: u32,
    pub max: u32,

    /// Parts used by this product, at most one entry per part id.
    /// These are copies; the inventory still owns the parts themselves.
    #[serde(default)]
    associated_parts: Vec<Part>,
}

impl Entity for Product {
    const KIND: &'static str = "product";

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Product {
    /// Create a product with no associated parts
    pub fn new(id: u32, name: impl Into<String>, price: f64, stock: u32, min: u32, max: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            associated_parts: Vec::new(),
        }
    }

    /// Associate a part. Returns false if a part with the same id is already present.
    pub fn add_associated_part(&mut self, part: Part) -> bool {
        if self.has_associated_part(part.id) {
            return false;
        }
        self.associated_parts.push(part);
        true
    }

    /// Remove every associated part with the given part's id
    pub fn delete_associated_part(&mut self, part: &Part) -> bool {
        self.remove_associated_part_id(part.id)
    }

    /// Remove every associated part with this id
    pub fn remove_associated_part_id(&mut self, part_id: u32) -> bool {
        let before = self.associated_parts.len();
        self.associated_parts.retain(|p| p.id != part_id);
        self.associated_parts.len() != before
    }

    pub fn has_associated_part(&self, part_id: u32) -> bool {
        self.associated_parts.iter().any(|p| p.id == part_id)
    }

    pub fn associated_parts(&self) -> &[Part] {
        &self.associated_parts
    }

    /// Replace the association list, dropping duplicate ids after the first
    pub fn set_associated_parts(&mut self, parts: impl IntoIterator<Item = Part>) {
        self.associated_parts.clear();
        for part in parts {
            self.add_associated_part(part);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::part::PartSource;

    fn part(id: u32, name: &str) -> Part {
        Part::new(
            id,
            name,
            10.0,
            5,
            1,
            10,
            PartSource::Outsourced {
                company_name: "Acme".to_string(),
            },
        )
    }

    #[test]
    fn test_product_creation() {
        let product = Product::new(0, "Bike", 299.99, 5, 1, 10);
        assert_eq!(product.name, "Bike");
        assert!(product.associated_parts().is_empty());
        assert_eq!(Product::KIND, "product");
    }

    #[test]
    fn test_add_same_part_twice_keeps_one() {
        let mut product = Product::new(0, "Bike", 299.99, 5, 1, 10);
        assert!(product.add_associated_part(part(0, "Brakes")));
        assert!(!product.add_associated_part(part(0, "Brakes (renamed)")));

        assert_eq!(product.associated_parts().len(), 1);
        assert_eq!(product.associated_parts()[0].name, "Brakes");
    }

    #[test]
    fn test_association_order_preserved() {
        let mut product = Product::new(0, "Bike", 299.99, 5, 1, 10);
        product.add_associated_part(part(2, "Seat"));
        product.add_associated_part(part(0, "Brakes"));
        product.add_associated_part(part(1, "Wheel"));

        let ids: Vec<u32> = product.associated_parts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 0, 1]);
    }

    #[test]
    fn test_delete_associated_part() {
        let mut product = Product::new(0, "Bike", 299.99, 5, 1, 10);
        let brakes = part(0, "Brakes");
        product.add_associated_part(brakes.clone());

        assert!(product.delete_associated_part(&brakes));
        assert!(!product.delete_associated_part(&brakes));
        assert!(product.associated_parts().is_empty());
    }

    #[test]
    fn test_set_associated_parts_dedups() {
        let mut product = Product::new(0, "Bike", 299.99, 5, 1, 10);
        product.set_associated_parts(vec![part(1, "Wheel"), part(1, "Wheel"), part(3, "Bell")]);
        assert_eq!(product.associated_parts().len(), 2);
    }

    #[test]
    fn test_product_json_includes_parts() {
        let mut product = Product::new(4, "Tricycle", 99.99, 3, 1, 5);
        product.add_associated_part(part(1, "Wheel"));

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["associated_parts"][0]["name"], "Wheel");
        assert_eq!(json["associated_parts"][0]["source"], "outsourced");
    }
}
