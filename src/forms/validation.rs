//! Field rules shared by the part and product forms

use miette::Diagnostic;
use thiserror::Error;

/// Smallest `max` a part may declare
pub const PART_MAX_FLOOR: i32 = 1;

/// Smallest `max` a product may declare. Products have always accepted 0 here.
pub const PRODUCT_MAX_FLOOR: i32 = 0;

/// Smallest machine id accepted for in-house parts
pub const MIN_MACHINE_ID: i32 = 1000;

/// A single failed form rule. Only the first failure is reported.
#[derive(Debug, Error, Diagnostic, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a whole number (got '{value}')")]
    #[diagnostic(code(invm::validation::number))]
    InvalidNumber { field: &'static str, value: String },

    #[error("Price must be a decimal number (got '{0}')")]
    #[diagnostic(code(invm::validation::number), help("Enter a price such as 15.00"))]
    InvalidDecimal(String),

    #[error("Please select whether the part is in-house or outsourced")]
    #[diagnostic(code(invm::validation::source))]
    SourceNotSelected,

    #[error("A part cannot be both in-house and outsourced")]
    #[diagnostic(code(invm::validation::source))]
    AmbiguousSource,

    #[error("Please provide a valid name")]
    #[diagnostic(code(invm::validation::name), help("The name cannot be empty"))]
    EmptyName,

    #[error("Inventory level {stock} must be between min ({min}) and max ({max})")]
    #[diagnostic(code(invm::validation::stock))]
    StockOutOfRange { stock: i32, min: i32, max: i32 },

    #[error("Please provide a valid price (got {0})")]
    #[diagnostic(code(invm::validation::price), help("Price must be zero or more"))]
    InvalidPrice(f64),

    #[error("Please provide valid min/max values (min {min}, max {max})")]
    #[diagnostic(
        code(invm::validation::min_max),
        help("Min must be at least 0 and max must not be less than min")
    )]
    InvalidMinMax { min: i32, max: i32, max_floor: i32 },

    #[error("In-house parts need a machine ID")]
    #[diagnostic(code(invm::validation::machine_id))]
    MissingMachineId,

    #[error("Machine ID must be greater than 999 (got {0})")]
    #[diagnostic(code(invm::validation::machine_id))]
    InvalidMachineId(i32),

    #[error("Please provide the company name for an outsourced part")]
    #[diagnostic(code(invm::validation::company_name))]
    EmptyCompanyName,
}

/// Parse an integer form field, trimming surrounding whitespace
pub fn parse_int(field: &'static str, raw: &str) -> Result<i32, ValidationError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Parse an optional integer field; blank input means "not given"
pub fn parse_optional_int(field: &'static str, raw: &str) -> Result<Option<i32>, ValidationError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_int(field, raw).map(Some)
    }
}

/// Parse a price field such as "15", "15.00" or "1.5e1". NaN and infinities are rejected.
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| ValidationError::InvalidDecimal(raw.to_string()))
}

pub fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

pub fn check_stock(stock: i32, min: i32, max: i32) -> Result<(), ValidationError> {
    if stock < min || stock > max {
        return Err(ValidationError::StockOutOfRange { stock, min, max });
    }
    Ok(())
}

pub fn check_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice(price));
    }
    Ok(())
}

pub fn check_min_max(min: i32, max: i32, max_floor: i32) -> Result<(), ValidationError> {
    if min < 0 || max < max_floor || max < min {
        return Err(ValidationError::InvalidMinMax {
            min,
            max,
            max_floor,
        });
    }
    Ok(())
}

pub fn check_machine_id(machine_id: Option<i32>) -> Result<u32, ValidationError> {
    match machine_id {
        None => Err(ValidationError::MissingMachineId),
        Some(id) if id < MIN_MACHINE_ID => Err(ValidationError::InvalidMachineId(id)),
        Some(id) => Ok(id as u32),
    }
}

pub fn check_company_name(company_name: Option<&str>) -> Result<String, ValidationError> {
    match company_name.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ValidationError::EmptyCompanyName),
    }
}
