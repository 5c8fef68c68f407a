//! Job order business logic - Bookings that precede a billed visit.
//!
//! An order is booked as pending for a roster engineer. Completing it stamps the completion
//! time; reopening moves it back to pending and clears the stamp. Orders carry no
//! commission: commission is earned only from bills.

use crate::{
    core::{bill::is_valid_contact_number, engineer, money},
    entities::{Order, order},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::{fmt, str::FromStr};
use tracing::{debug, info};

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Booked, visit not done yet
    Pending,
    /// Visit done
    Completed,
}

impl OrderStatus {
    /// Stored representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(Error::InvalidOrder {
                message: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// Everything needed to book an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Kind of service requested
    pub service_type: String,
    /// Roster engineer assigned to the job
    pub engineer_name: String,
    /// Customer booking the job
    pub customer_name: String,
    /// Ten-digit contact number
    pub contact_number: String,
    /// Service address, may be left blank
    pub address: String,
    /// Optional quote given at booking
    pub quoted_amount: Option<Decimal>,
}

fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidOrder {
            message: format!("{field} is required"),
        });
    }
    Ok(trimmed.to_string())
}

/// Books a pending order for a roster engineer.
pub async fn create_order(
    db: &DatabaseConnection,
    new_order: NewOrder,
    created_at: DateTime<Utc>,
) -> Result<order::Model> {
    let service_type = required(&new_order.service_type, "service type")?;
    let customer_name = required(&new_order.customer_name, "customer name")?;
    let contact_number = new_order.contact_number.trim().to_string();
    if !is_valid_contact_number(&contact_number) {
        return Err(Error::InvalidOrder {
            message: "a valid 10-digit contact number is required".to_string(),
        });
    }
    let quoted_amount_minor = new_order
        .quoted_amount
        .map(|amount| money::check_amount(amount).and_then(money::to_minor))
        .transpose()?;

    let engineer = engineer::get_engineer_by_name(db, &new_order.engineer_name)
        .await?
        .ok_or_else(|| Error::EngineerNotFound {
            name: new_order.engineer_name.trim().to_string(),
        })?;

    let model = order::ActiveModel {
        service_type: Set(service_type),
        engineer_name: Set(engineer.name),
        customer_name: Set(customer_name),
        contact_number: Set(contact_number),
        address: Set(new_order.address.trim().to_string()),
        quoted_amount_minor: Set(quoted_amount_minor),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        created_at: Set(created_at),
        completed_at: Set(None),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(order_id = created.id, engineer = %created.engineer_name, "Booked order");
    Ok(created)
}

/// Finds an order by id.
pub async fn get_order(db: &DatabaseConnection, id: i64) -> Result<Option<order::Model>> {
    Order::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Lists orders in `status`: pending newest booked first, completed newest completed first.
pub async fn list_orders(
    db: &DatabaseConnection,
    status: OrderStatus,
) -> Result<Vec<order::Model>> {
    let query = Order::find().filter(order::Column::Status.eq(status.as_str()));
    let query = match status {
        OrderStatus::Pending => query.order_by_desc(order::Column::CreatedAt),
        OrderStatus::Completed => query.order_by_desc(order::Column::CompletedAt),
    };
    let orders = query.order_by_desc(order::Column::Id).all(db).await?;
    debug!(count = orders.len(), %status, "Fetched orders");
    Ok(orders)
}

async fn transition(
    db: &DatabaseConnection,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
    completed_at: Option<DateTime<Utc>>,
) -> Result<order::Model> {
    let existing = get_order(db, id)
        .await?
        .ok_or(Error::OrderNotFound { id })?;
    if existing.status != from.as_str() {
        return Err(Error::InvalidOrder {
            message: format!("order #{id} is {}, not {from}", existing.status),
        });
    }

    let mut model: order::ActiveModel = existing.into();
    model.status = Set(to.as_str().to_string());
    model.completed_at = Set(completed_at);
    let updated = model.update(db).await?;

    info!(order_id = id, status = %to, "Updated order status");
    Ok(updated)
}

/// Marks a pending order completed at `completed_at`.
pub async fn complete_order(
    db: &DatabaseConnection,
    id: i64,
    completed_at: DateTime<Utc>,
) -> Result<order::Model> {
    transition(
        db,
        id,
        OrderStatus::Pending,
        OrderStatus::Completed,
        Some(completed_at),
    )
    .await
}

/// Moves a completed order back to pending.
pub async fn reopen_order(db: &DatabaseConnection, id: i64) -> Result<order::Model> {
    transition(db, id, OrderStatus::Completed, OrderStatus::Pending, None).await
}
