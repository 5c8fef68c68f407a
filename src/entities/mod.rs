//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the bill, payment, order, and engineer tables.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod bill;
pub mod engineer;
pub mod order;
pub mod payment;

// Re-export specific types to avoid conflicts
pub use bill::{Column as BillColumn, Entity as Bill, Model as BillModel};
pub use engineer::{Column as EngineerColumn, Entity as Engineer, Model as EngineerModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
