//! Product form - create, edit and delete products and manage their parts
//!
//! A [`ProductEditor`] is opened for every create or edit. It holds a
//! working copy of the associated parts plus a backup of the set the
//! product had when the editor was opened, so cancelling restores the
//! original associations and leaves the store untouched.

use tracing::{debug, info, warn};

use crate::core::Inventory;
use crate::entities::{Part, Product};
use crate::forms::validation::{
    check_min_max, check_name, check_price, check_stock, parse_int, parse_price, ValidationError,
    PRODUCT_MAX_FLOOR,
};
use crate::forms::{FormError, FormMode};

/// Raw product form input
#[derive(Debug, Clone, Default)]
pub struct ProductFields {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub min: String,
    pub max: String,
}

impl ProductFields {
    pub fn parse(&self) -> Result<ProductDraft, ValidationError> {
        Ok(ProductDraft {
            name: self.name.clone(),
            stock: parse_int("Inv", &self.stock)?,
            price: parse_price(&self.price)?,
            max: parse_int("Max", &self.max)?,
            min: parse_int("Min", &self.min)?,
        })
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            min: product.min.to_string(),
            max: product.max.to_string(),
        }
    }
}

/// Typed product input, not yet validated
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub min: i32,
    pub max: i32,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64, stock: i32, min: i32, max: i32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
            min,
            max,
        }
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            stock: product.stock as i32,
            min: product.min as i32,
            max: product.max as i32,
        }
    }

    /// Check the rules in form order and build a product with no parts
    pub fn validate(&self, id: u32) -> Result<Product, ValidationError> {
        check_name(&self.name)?;
        check_stock(self.stock, self.min, self.max)?;
        check_price(self.price)?;
        check_min_max(self.min, self.max, PRODUCT_MAX_FLOOR)?;

        // min >= 0 and min <= stock <= max were checked above
        Ok(Product::new(
            id,
            self.name.trim(),
            self.price,
            self.stock as u32,
            self.min as u32,
            self.max as u32,
        ))
    }
}

/// An open product form: the mode plus the working and backup association sets
#[derive(Debug, Clone)]
pub struct ProductEditor {
    mode: FormMode,
    working: Vec<Part>,
    backup: Vec<Part>,
}

impl ProductEditor {
    /// Open an editor for a new product
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            working: Vec::new(),
            backup: Vec::new(),
        }
    }

    /// Open an editor on an existing product
    pub fn edit(inventory: &Inventory, id: u32) -> Result<Self, FormError> {
        let product = inventory
            .lookup_product(id)
            .ok_or(FormError::ProductNotFound(id))?;
        let parts = product.associated_parts().to_vec();
        Ok(Self {
            mode: FormMode::Edit(id),
            working: parts.clone(),
            backup: parts,
        })
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// The association set as currently edited
    pub fn associated_parts(&self) -> &[Part] {
        &self.working
    }

    /// Associate an inventory part. Returns false if it is already associated.
    pub fn add_part(&mut self, inventory: &Inventory, part_id: u32) -> Result<bool, FormError> {
        let part = inventory
            .lookup_part(part_id)
            .ok_or(FormError::PartNotFound(part_id))?;
        if self.working.iter().any(|p| p.id == part_id) {
            debug!(part_id, "part already associated");
            return Ok(false);
        }
        self.working.push(part.clone());
        Ok(true)
    }

    /// Drop an association. Returns false if the part was not associated.
    pub fn remove_part(&mut self, part_id: u32) -> bool {
        let before = self.working.len();
        self.working.retain(|p| p.id != part_id);
        self.working.len() != before
    }

    /// Discard edits and return the association set as it was before them
    pub fn cancel(self) -> Vec<Part> {
        debug!(mode = ?self.mode, "product form cancelled");
        self.backup
    }

    /// Validate and store the product with the working associations.
    ///
    /// On failure nothing changes and the editor stays usable. On success
    /// the committed set becomes the new backup.
    pub fn submit(&mut self, inventory: &mut Inventory, draft: &ProductDraft) -> Result<u32, FormError> {
        let id = match self.mode {
            FormMode::Create => inventory.next_product_id()?,
            FormMode::Edit(id) => id,
        };

        let mut product = draft.validate(id).inspect_err(|e| {
            warn!(error = %e, mode = ?self.mode, "product form rejected");
        })?;
        product.set_associated_parts(self.working.iter().cloned());

        match self.mode {
            FormMode::Create => {
                inventory.add_product(product);
                info!(id, parts = self.working.len(), "product created");
            }
            FormMode::Edit(id) => {
                let index = inventory
                    .product_index(id)
                    .ok_or(FormError::ProductNotFound(id))?;
                inventory.update_product(index, product)?;
                info!(id, index, parts = self.working.len(), "product updated");
            }
        }

        // later cancels restore to what was just saved
        self.mode = FormMode::Edit(id);
        self.backup = self.working.clone();
        Ok(id)
    }
}

/// Delete a product. Rejected while it still has associated parts.
pub fn delete_product(inventory: &mut Inventory, id: u32) -> Result<Product, FormError> {
    let product = inventory
        .lookup_product(id)
        .cloned()
        .ok_or(FormError::ProductNotFound(id))?;

    let count = product.associated_parts().len();
    if count > 0 {
        warn!(id, count, "refusing to delete product with associated parts");
        return Err(FormError::HasAssociatedParts { id, count });
    }

    inventory.delete_product(&product);
    info!(id, "product deleted");
    Ok(product)
}
