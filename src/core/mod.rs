//! Core module - store, configuration and shared traits

pub mod config;
pub mod entity;
pub mod inventory;
pub mod logging;

pub use config::Config;
pub use entity::Entity;
pub use inventory::{Inventory, InventoryError};
