//! Engineer entity - The roster of field engineers who earn commission.
//!
//! Engineer names double as the attribution key on bills and payments, so names are
//! unique and stored trimmed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Engineer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "engineers")]
pub struct Model {
    /// Unique identifier for the engineer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, also the attribution key on bills
    #[sea_orm(unique)]
    pub name: String,
    /// When the engineer was added to the roster
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Engineer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One engineer has many payouts
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
