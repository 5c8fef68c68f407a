//! Order entity - A job order booked for an engineer before the visit is billed.
//!
//! Orders move between `pending` and `completed`; `completed_at` is set only while the
//! order is completed.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Kind of service requested
    pub service_type: String,
    /// Engineer assigned to the job
    pub engineer_name: String,
    /// Customer who booked the job
    pub customer_name: String,
    /// Ten-digit customer contact number
    pub contact_number: String,
    /// Service address
    pub address: String,
    /// Amount quoted when booking, in minor units
    pub quoted_amount_minor: Option<i64>,
    /// `"pending"` or `"completed"`
    pub status: String,
    /// When the order was booked
    pub created_at: DateTimeUtc,
    /// When the order was marked completed
    pub completed_at: Option<DateTimeUtc>,
}

/// Orders reference engineers by name only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
