//! Bill entity - One finalised service visit.
//!
//! Money columns hold minor currency units (hundredths). `engineer_name` is the
//! attribution key used for commission; it is copied onto the bill at creation time
//! rather than joined, matching how visits are recorded in the field.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bill database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    /// Unique identifier for the bill
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-facing bill number, `BILL-YYYYMMDD-NNNN`
    #[sea_orm(unique)]
    pub bill_number: String,
    /// Kind of service performed (e.g. "AC Repair")
    pub service_type: String,
    /// Engineer who performed the visit
    pub engineer_name: String,
    /// Customer billed
    pub customer_name: String,
    /// Ten-digit customer contact number
    pub contact_number: String,
    /// Service address
    pub address: String,
    /// Service charge in minor units
    pub service_charge_minor: i64,
    /// Amount billed in minor units
    pub total_minor: i64,
    /// `"cash"` or `"upi"`
    pub payment_method: String,
    /// Cash handed over by the customer, cash bills only
    pub cash_given_minor: Option<i64>,
    /// Change returned to the customer, cash bills only
    pub change_minor: Option<i64>,
    /// Free-form notes from the engineer
    pub notes: Option<String>,
    /// When the bill was finalised
    pub created_at: DateTimeUtc,
}

/// Bills reference engineers by name only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
