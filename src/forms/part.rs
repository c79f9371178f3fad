//! Part form - create, edit and delete parts

use tracing::{info, warn};

use crate::core::Inventory;
use crate::entities::{Part, PartSource, SourceKind};
use crate::forms::validation::{
    check_company_name, check_machine_id, check_min_max, check_name, check_price, check_stock,
    parse_int, parse_optional_int, parse_price, ValidationError, PART_MAX_FLOOR,
};
use crate::forms::{FormError, FormMode};

/// Raw part form input, one string per text field plus the two source toggles
#[derive(Debug, Clone, Default)]
pub struct PartFields {
    pub in_house: bool,
    pub outsourced: bool,
    pub name: String,
    pub price: String,
    pub stock: String,
    pub min: String,
    pub max: String,
    pub machine_id: String,
    pub company_name: String,
}

impl PartFields {
    /// Parse the numeric fields. The source-specific field is only read for
    /// the source that is toggled on.
    pub fn parse(&self) -> Result<PartDraft, ValidationError> {
        let stock = parse_int("Inv", &self.stock)?;
        let price = parse_price(&self.price)?;
        let max = parse_int("Max", &self.max)?;
        let min = parse_int("Min", &self.min)?;
        let machine_id = if self.in_house {
            parse_optional_int("Machine ID", &self.machine_id)?
        } else {
            None
        };
        let company_name = self.outsourced.then(|| self.company_name.clone());

        Ok(PartDraft {
            in_house: self.in_house,
            outsourced: self.outsourced,
            name: self.name.clone(),
            price,
            stock,
            min,
            max,
            machine_id,
            company_name,
        })
    }

    /// Pre-fill the form from an existing part
    pub fn from_part(part: &Part) -> Self {
        let (in_house, outsourced) = match part.source.kind() {
            SourceKind::InHouse => (true, false),
            SourceKind::Outsourced => (false, true),
        };
        Self {
            in_house,
            outsourced,
            name: part.name.clone(),
            price: part.price.to_string(),
            stock: part.stock.to_string(),
            min: part.min.to_string(),
            max: part.max.to_string(),
            machine_id: part.machine_id().map(|m| m.to_string()).unwrap_or_default(),
            company_name: part.company_name().unwrap_or_default().to_string(),
        }
    }
}

/// Typed part input, not yet validated
#[derive(Debug, Clone, PartialEq)]
pub struct PartDraft {
    pub in_house: bool,
    pub outsourced: bool,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub min: i32,
    pub max: i32,
    pub machine_id: Option<i32>,
    pub company_name: Option<String>,
}

impl PartDraft {
    pub fn in_house(
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        machine_id: i32,
    ) -> Self {
        Self {
            in_house: true,
            outsourced: false,
            name: name.into(),
            price,
            stock,
            min,
            max,
            machine_id: Some(machine_id),
            company_name: None,
        }
    }

    pub fn outsourced(
        name: impl Into<String>,
        price: f64,
        stock: i32,
        min: i32,
        max: i32,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            in_house: false,
            outsourced: true,
            name: name.into(),
            price,
            stock,
            min,
            max,
            machine_id: None,
            company_name: Some(company_name.into()),
        }
    }

    /// Draft holding the current values of a part
    pub fn from_part(part: &Part) -> Self {
        Self {
            in_house: part.machine_id().is_some(),
            outsourced: part.company_name().is_some(),
            name: part.name.clone(),
            price: part.price,
            stock: part.stock as i32,
            min: part.min as i32,
            max: part.max as i32,
            machine_id: part.machine_id().map(|m| m as i32),
            company_name: part.company_name().map(String::from),
        }
    }

    /// Check the rules in form order and build the part on success
    pub fn validate(&self, id: u32) -> Result<Part, ValidationError> {
        let kind = match (self.in_house, self.outsourced) {
            (true, false) => SourceKind::InHouse,
            (false, true) => SourceKind::Outsourced,
            (false, false) => return Err(ValidationError::SourceNotSelected),
            (true, true) => return Err(ValidationError::AmbiguousSource),
        };
        check_name(&self.name)?;
        check_stock(self.stock, self.min, self.max)?;
        check_price(self.price)?;
        check_min_max(self.min, self.max, PART_MAX_FLOOR)?;
        let source = match kind {
            SourceKind::InHouse => PartSource::InHouse {
                machine_id: check_machine_id(self.machine_id)?,
            },
            SourceKind::Outsourced => PartSource::Outsourced {
                company_name: check_company_name(self.company_name.as_deref())?,
            },
        };

        // min >= 0 and min <= stock <= max were checked above
        Ok(Part::new(
            id,
            self.name.trim(),
            self.price,
            self.stock as u32,
            self.min as u32,
            self.max as u32,
            source,
        ))
    }
}

/// Validate a draft and store it. Returns the id of the saved part.
///
/// Editing keeps the part's id and its position in the collection.
pub fn submit_part(
    inventory: &mut Inventory,
    draft: &PartDraft,
    mode: FormMode,
) -> Result<u32, FormError> {
    let id = match mode {
        FormMode::Create => inventory.next_part_id()?,
        FormMode::Edit(id) => id,
    };

    let part = draft.validate(id).inspect_err(|e| {
        warn!(error = %e, ?mode, "part form rejected");
    })?;

    match mode {
        FormMode::Create => {
            inventory.add_part(part);
            info!(id, "part created");
        }
        FormMode::Edit(id) => {
            let index = inventory.part_index(id).ok_or(FormError::PartNotFound(id))?;
            inventory.update_part(index, part)?;
            info!(id, index, "part updated");
        }
    }

    Ok(id)
}

/// Remove a part from the inventory. Products that use it keep their copy.
pub fn delete_part(inventory: &mut Inventory, id: u32) -> Result<Part, FormError> {
    let part = inventory
        .lookup_part(id)
        .cloned()
        .ok_or(FormError::PartNotFound(id))?;
    inventory.delete_part(&part);
    info!(id, "part deleted");
    Ok(part)
}
