use super::repository;
use contracts::domain::a001_commodity::aggregate::{Commodity, CommodityDto};
use contracts::domain::common::FieldErrors;
use sea_orm::{DbErr, SqlErr};

/// Ошибки создания commodity, которые вызывающему нужно различать
#[derive(Debug, thiserror::Error)]
pub enum CommodityError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("commodity {namespace}:{mnemonic} already exists")]
    Duplicate { namespace: String, mnemonic: String },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Создание новой commodity.
///
/// Returns the stored record so the caller can hand it to the completion callback.
pub async fn create(dto: CommodityDto) -> Result<Commodity, CommodityError> {
    dto.validate().map_err(CommodityError::Validation)?;

    let aggregate = Commodity::new_for_insert(&dto);

    if repository::find_by_mnemonic(&aggregate.namespace, &aggregate.mnemonic)
        .await?
        .is_some()
    {
        return Err(CommodityError::Duplicate {
            namespace: aggregate.namespace,
            mnemonic: aggregate.mnemonic,
        });
    }

    if let Err(e) = repository::insert(&aggregate).await {
        return Err(insert_error(e, aggregate));
    }
    tracing::info!(
        "Created commodity {}:{} ({})",
        aggregate.namespace,
        aggregate.mnemonic,
        aggregate.guid
    );
    Ok(aggregate)
}

/// A concurrent create can pass the lookup above and still lose on the
/// `UNIQUE (namespace, mnemonic)` constraint; that is a duplicate too.
fn insert_error(err: anyhow::Error, aggregate: Commodity) -> CommodityError {
    let unique_violation = err
        .downcast_ref::<DbErr>()
        .and_then(DbErr::sql_err)
        .is_some_and(|e| matches!(e, SqlErr::UniqueConstraintViolation(_)));

    if unique_violation {
        CommodityError::Duplicate {
            namespace: aggregate.namespace,
            mnemonic: aggregate.mnemonic,
        }
    } else {
        CommodityError::Storage(err)
    }
}

/// Получение списка всех commodities
pub async fn list_all() -> anyhow::Result<Vec<Commodity>> {
    repository::list_all().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    fn eur() -> Commodity {
        Commodity::new_for_insert(&CommodityDto {
            namespace: "CURRENCY".into(),
            mnemonic: Some("EUR".into()),
        })
    }

    #[tokio::test]
    async fn test_unique_violation_is_duplicate() {
        let conn = crate::shared::data::db::open_scratch().await;
        let insert = |guid: &str| {
            Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "INSERT INTO commodities (guid, namespace, mnemonic) VALUES (?, 'CURRENCY', 'EUR')",
                [guid.into()],
            )
        };
        conn.execute(insert("a")).await.unwrap();
        let err = conn.execute(insert("b")).await.unwrap_err();

        match insert_error(err.into(), eur()) {
            CommodityError::Duplicate { namespace, mnemonic } => {
                assert_eq!((namespace.as_str(), mnemonic.as_str()), ("CURRENCY", "EUR"));
            }
            other => panic!("expected duplicate, got {other:?}"),
        }
    }

    #[test]
    fn test_other_failures_stay_storage_errors() {
        let err = anyhow::Error::from(DbErr::Custom("disk full".into()));
        assert!(matches!(insert_error(err, eur()), CommodityError::Storage(_)));
    }
}
