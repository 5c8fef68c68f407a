//! Payment business logic - Commission payouts to engineers.
//!
//! Payments are append-only. Every payout must be a positive amount with at most two decimal
//! places and must name an engineer on the roster.

use crate::{
    core::{engineer, filter::RecordFilter, money},
    entities::{Payment, payment},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Select, Set, prelude::*};
use tracing::{debug, info};

/// Records a payout to the named engineer.
pub async fn record_payment(
    db: &DatabaseConnection,
    engineer_name: &str,
    amount: Decimal,
    created_at: DateTime<Utc>,
) -> Result<payment::Model> {
    let amount = money::check_amount(amount)?;
    if amount.is_zero() {
        return Err(Error::InvalidAmount {
            input: amount.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let engineer = engineer::get_engineer_by_name(db, engineer_name)
        .await?
        .ok_or_else(|| Error::EngineerNotFound {
            name: engineer_name.trim().to_string(),
        })?;

    let model = payment::ActiveModel {
        engineer_id: Set(engineer.id),
        engineer_name: Set(engineer.name),
        amount_minor: Set(money::to_minor(amount)?),
        created_at: Set(created_at),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(
        engineer = %created.engineer_name,
        amount = %money::format_inr(amount),
        "Recorded payment"
    );
    Ok(created)
}

fn apply_filter(mut query: Select<Payment>, filter: &RecordFilter) -> Select<Payment> {
    if let Some(engineer) = &filter.engineer {
        query = query.filter(payment::Column::EngineerName.eq(engineer.as_str()));
    }
    if let Some(since) = filter.since {
        query = query.filter(payment::Column::CreatedAt.gte(since));
    }
    query
}

/// Lists payments matching `filter`, newest first.
pub async fn list_payments(
    db: &DatabaseConnection,
    filter: &RecordFilter,
) -> Result<Vec<payment::Model>> {
    let payments = apply_filter(Payment::find(), filter)
        .order_by_desc(payment::Column::CreatedAt)
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await?;
    debug!(count = payments.len(), ?filter, "Fetched payments");
    Ok(payments)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::engineer as engineer_entity;
    use crate::test_utils::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_record_payment_rejects_non_positive_amounts() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        for amount in [dec!(0), dec!(-50), dec!(10.001)] {
            let result = record_payment(&db, "Ravi", amount, Utc::now()).await;
            assert!(
                matches!(result, Err(Error::InvalidAmount { .. })),
                "expected {amount} to be rejected"
            );
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_record_payment_unknown_engineer() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<engineer_entity::Model>::new()])
            .into_connection();

        let result = record_payment(&db, "Nobody", dec!(100), Utc::now()).await;
        assert!(matches!(
            result,
            Err(Error::EngineerNotFound { name }) if name == "Nobody"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_record_payment_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let engineer = create_test_engineer(&db, "Ravi").await?;
        let at = test_now().with_timezone(&Utc);

        let payment = record_payment(&db, " Ravi ", dec!(300.25), at).await?;

        assert_eq!(payment.engineer_id, engineer.id);
        assert_eq!(payment.engineer_name, "Ravi");
        assert_eq!(payment.amount_minor, 30_025);
        assert_eq!(payment.created_at, at);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_payments_filters() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_engineer(&db, "Ravi").await?;
        create_test_engineer(&db, "Amit").await?;
        let now = test_now();

        let old = create_test_payment(&db, "Ravi", "100", now - Duration::days(40)).await?;
        let recent = create_test_payment(&db, "Ravi", "50", now).await?;
        create_test_payment(&db, "Amit", "75", now).await?;

        let ravi = list_payments(&db, &RecordFilter::all().for_engineer("Ravi")).await?;
        assert_eq!(ravi, vec![recent.clone(), old]);

        let since = now.with_timezone(&Utc) - Duration::days(7);
        let this_week = list_payments(&db, &RecordFilter::all().since(since)).await?;
        assert_eq!(this_week.len(), 2);
        assert!(this_week.contains(&recent));
        Ok(())
    }
}
