//! invm: Inventory Manager
//!
//! Keeps parts and products in memory, validates form input before it
//! reaches the store, and tracks which parts each product uses.

pub mod cli;
pub mod core;
pub mod entities;
pub mod forms;
