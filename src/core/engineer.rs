//! Engineer roster business logic.
//!
//! Provides functions for adding engineers, looking them up by name or id, and seeding the
//! roster from config.toml. Names are trimmed and must be unique because they are the
//! attribution key on bills.

use crate::{
    config::engineers::Config,
    entities::{Engineer, engineer},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves every engineer on the roster, ordered alphabetically by name.
pub async fn list_engineers(db: &DatabaseConnection) -> Result<Vec<engineer::Model>> {
    Engineer::find()
        .order_by_asc(engineer::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an engineer by exact (trimmed) name.
pub async fn get_engineer_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<engineer::Model>> {
    Engineer::find()
        .filter(engineer::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an engineer by primary key.
pub async fn get_engineer_by_id(
    db: &DatabaseConnection,
    engineer_id: i64,
) -> Result<Option<engineer::Model>> {
    Engineer::find_by_id(engineer_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Adds an engineer to the roster.
///
/// The name is trimmed; empty names and names already on the roster are rejected.
pub async fn create_engineer(
    db: &DatabaseConnection,
    name: String,
    created_at: DateTime<Utc>,
) -> Result<engineer::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::InvalidName {
            message: "name cannot be empty".to_string(),
        });
    }

    if get_engineer_by_name(db, &name).await?.is_some() {
        return Err(Error::DuplicateEngineer { name });
    }

    let engineer = engineer::ActiveModel {
        name: Set(name),
        created_at: Set(created_at),
        ..Default::default()
    };

    let created = engineer.insert(db).await?;
    info!(engineer = %created.name, "Added engineer to roster");
    Ok(created)
}

/// Adds every engineer from the config that is not on the roster yet.
///
/// Returns how many engineers were added.
pub async fn seed_engineers(
    db: &DatabaseConnection,
    config: &Config,
    created_at: DateTime<Utc>,
) -> Result<usize> {
    let mut added = 0;
    for entry in &config.engineers {
        if get_engineer_by_name(db, &entry.name).await?.is_some() {
            continue;
        }
        create_engineer(db, entry.name.clone(), created_at).await?;
        added += 1;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::engineers::EngineerConfig;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_engineer_trims_name() -> Result<()> {
        let db = setup_test_db().await?;

        let engineer = create_engineer(&db, "  Ravi  ".to_string(), Utc::now()).await?;
        assert_eq!(engineer.name, "Ravi");

        let found = get_engineer_by_name(&db, "Ravi").await?;
        assert_eq!(found, Some(engineer.clone()));

        let by_id = get_engineer_by_id(&db, engineer.id).await?;
        assert_eq!(by_id, Some(engineer));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_engineer_rejects_empty_name() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_engineer(&db, "   ".to_string(), Utc::now()).await;
        assert!(matches!(result, Err(Error::InvalidName { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_engineer_rejects_duplicate() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_engineer(&db, "Suresh").await?;

        let result = create_engineer(&db, "Suresh".to_string(), Utc::now()).await;
        assert!(matches!(
            result,
            Err(Error::DuplicateEngineer { name }) if name == "Suresh"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_engineers_sorted_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_engineer(&db, "Zaid").await?;
        create_test_engineer(&db, "Amit").await?;
        create_test_engineer(&db, "Mohan").await?;

        let names: Vec<String> = list_engineers(&db)
            .await?
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Amit", "Mohan", "Zaid"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_engineers_skips_existing() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_engineer(&db, "Amit").await?;

        let config = Config {
            engineers: vec![
                EngineerConfig {
                    name: "Amit".to_string(),
                },
                EngineerConfig {
                    name: "Mohan".to_string(),
                },
            ],
        };

        assert_eq!(seed_engineers(&db, &config, Utc::now()).await?, 1);
        // running again is a no-op
        assert_eq!(seed_engineers(&db, &config, Utc::now()).await?, 0);
        assert_eq!(list_engineers(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_engineer_by_name_not_found() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<engineer::Model>::new()])
            .into_connection();

        assert!(get_engineer_by_name(&db, "Nobody").await?.is_none());
        Ok(())
    }
}
