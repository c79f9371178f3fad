//! Form logic - turn user input into validated entities and store them
//!
//! Every form follows the same flow:
//!
//! 1. Raw text fields ([`PartFields`], [`ProductFields`]) are parsed into a
//!    typed draft. Unparseable numbers fail here.
//! 2. The draft is validated rule by rule; the first failing rule is
//!    returned as a [`ValidationError`] and nothing is stored.
//! 3. On success the id is resolved (kept when editing, `max + 1` when
//!    creating) and the entity is appended or replaced in the
//!    [`Inventory`](crate::core::Inventory).

pub mod part;
pub mod product;
pub mod validation;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::InventoryError;

pub use part::{delete_part, submit_part, PartDraft, PartFields};
pub use product::{delete_product, ProductDraft, ProductEditor, ProductFields};
pub use validation::ValidationError;

/// Whether a form creates a new entity or edits the one with this id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u32),
}

/// Everything that can stop a form from being saved
#[derive(Debug, Error, Diagnostic)]
pub enum FormError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[diagnostic(code(invm::store))]
    Inventory(#[from] InventoryError),

    #[error("No part found with id {0}")]
    #[diagnostic(code(invm::not_found), help("Use `invm part list` to see part ids"))]
    PartNotFound(u32),

    #[error("No product found with id {0}")]
    #[diagnostic(code(invm::not_found), help("Use `invm product list` to see product ids"))]
    ProductNotFound(u32),

    #[error("You cannot delete a product that has associated parts (product {id} has {count})")]
    #[diagnostic(
        code(invm::product::has_parts),
        help("Remove the associated parts from the product first")
    )]
    HasAssociatedParts { id: u32, count: usize },
}

impl FormError {
    /// True for errors the user can fix by changing the form input
    pub fn is_validation(&self) -> bool {
        matches!(self, FormError::Validation(_))
    }
}
