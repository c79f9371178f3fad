//! Part entity - stockable items made in-house or bought from a supplier

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;

/// Where a part comes from, with the field that only applies to that source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PartSource {
    /// Manufactured on one of our machines
    InHouse { machine_id: u32 },
    /// Supplied by another company
    Outsourced { company_name: String },
}

impl PartSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            PartSource::InHouse { .. } => SourceKind::InHouse,
            PartSource::Outsourced { .. } => SourceKind::Outsourced,
        }
    }

    /// Machine id or company name, whichever this source carries
    pub fn detail(&self) -> String {
        match self {
            PartSource::InHouse { machine_id } => machine_id.to_string(),
            PartSource::Outsourced { company_name } => company_name.clone(),
        }
    }
}

/// Source tag without its payload, for filters and form toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    InHouse,
    Outsourced,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::InHouse => write!(f, "in-house"),
            SourceKind::Outsourced => write!(f, "outsourced"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "in-house" | "inhouse" => Ok(SourceKind::InHouse),
            "outsourced" => Ok(SourceKind::Outsourced),
            _ => Err(format!(
                "Invalid source: {}. Use 'in-house' or 'outsourced'",
                s
            )),
        }
    }
}

/// A Part entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    pub min: u32,
    pub max: u32,

    /// In-house or outsourced, flattened so the tag sits beside the other fields
    #[serde(flatten)]
    pub source: PartSource,
}

impl Entity for Part {
    const KIND: &'static str = "part";

    fn id(&self) -> u32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Part {
    /// Create a part. Field rules are enforced by the forms, not here.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price: f64,
        stock: u32,
        min: u32,
        max: u32,
        source: PartSource,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            min,
            max,
            source,
        }
    }

    pub fn machine_id(&self) -> Option<u32> {
        match self.source {
            PartSource::InHouse { machine_id } => Some(machine_id),
            PartSource::Outsourced { .. } => None,
        }
    }

    pub fn company_name(&self) -> Option<&str> {
        match &self.source {
            PartSource::Outsourced { company_name } => Some(company_name),
            PartSource::InHouse { .. } => None,
        }
    }
}
