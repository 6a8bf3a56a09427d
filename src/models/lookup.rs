//! Reference tables: departments and visit purposes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Entry of a simple lookup table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LookupEntry {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub type Department = LookupEntry;
pub type VisitPurpose = LookupEntry;

/// Lookup tables exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    Departments,
    VisitPurposes,
}

impl LookupTable {
    pub fn table_name(&self) -> &'static str {
        match self {
            LookupTable::Departments => "departments",
            LookupTable::VisitPurposes => "visit_purposes",
        }
    }
}
