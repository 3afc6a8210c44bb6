use std::collections::BTreeSet;

use sqlx::{PgConnection, PgExecutor};

use crate::database::manager::DatabaseError;

/// The two child junction tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Junction {
    Needs,
    Allergies,
}

impl Junction {
    fn target_column(self) -> &'static str {
        match self {
            Junction::Needs => "need_id",
            Junction::Allergies => "allergy_id",
        }
    }

    fn insert_sql(self) -> &'static str {
        match self {
            Junction::Needs => {
                "INSERT INTO child_needs (child_id, need_id) VALUES ($1, $2) \
                 ON CONFLICT (child_id, need_id) DO NOTHING"
            }
            Junction::Allergies => {
                "INSERT INTO child_allergies (child_id, allergy_id) VALUES ($1, $2) \
                 ON CONFLICT (child_id, allergy_id) DO NOTHING"
            }
        }
    }

    fn linked_ids_sql(self) -> &'static str {
        match self {
            Junction::Needs => "SELECT need_id FROM child_needs WHERE child_id = $1",
            Junction::Allergies => "SELECT allergy_id FROM child_allergies WHERE child_id = $1",
        }
    }

    fn delete_sql(self) -> &'static str {
        match self {
            Junction::Needs => "DELETE FROM child_needs WHERE child_id = $1 AND need_id = ANY($2)",
            Junction::Allergies => {
                "DELETE FROM child_allergies WHERE child_id = $1 AND allergy_id = ANY($2)"
            }
        }
    }

    fn associate_operation(self) -> &'static str {
        match self {
            Junction::Needs => "child_repository.associate_need",
            Junction::Allergies => "child_repository.associate_allergy",
        }
    }

    fn reconcile_operation(self) -> &'static str {
        match self {
            Junction::Needs => "child_repository.sync_needs",
            Junction::Allergies => "child_repository.sync_allergies",
        }
    }
}

/// Insert one junction row; an existing pair is left alone.
///
/// Takes any executor so it runs the same way against the pool or inside an
/// open transaction.
pub(crate) async fn associate<'e, E>(
    executor: E,
    junction: Junction,
    child_id: &str,
    target_id: &str,
) -> Result<(), DatabaseError>
where
    E: PgExecutor<'e>,
{
    if child_id.is_empty() {
        return Err(DatabaseError::MissingIdentifier("child_id"));
    }
    if target_id.is_empty() {
        return Err(DatabaseError::MissingIdentifier(junction.target_column()));
    }

    sqlx::query(junction.insert_sql())
        .bind(child_id)
        .bind(target_id)
        .execute(executor)
        .await
        .map_err(DatabaseError::during(junction.associate_operation()))?;
    Ok(())
}

/// Make the junction rows of `child_id` equal to `wanted`: stale links are
/// deleted, missing ones inserted. Duplicates in `wanted` collapse.
pub(crate) async fn reconcile(
    conn: &mut PgConnection,
    junction: Junction,
    child_id: &str,
    wanted: &[String],
) -> Result<(), DatabaseError> {
    let operation = junction.reconcile_operation();

    let current: BTreeSet<String> = sqlx::query_scalar::<_, String>(junction.linked_ids_sql())
        .bind(child_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(DatabaseError::during(operation))?
        .into_iter()
        .collect();
    let wanted: BTreeSet<&str> = wanted.iter().map(String::as_str).collect();

    let stale: Vec<String> = current
        .iter()
        .filter(|id| !wanted.contains(id.as_str()))
        .cloned()
        .collect();
    if !stale.is_empty() {
        sqlx::query(junction.delete_sql())
            .bind(child_id)
            .bind(&stale)
            .execute(&mut *conn)
            .await
            .map_err(DatabaseError::during(operation))?;
    }

    for id in wanted.iter().filter(|id| !current.contains(**id)) {
        associate(&mut *conn, junction, child_id, id).await?;
    }

    tracing::debug!(
        "Reconciled {} for child {}: {} removed, {} kept or added",
        junction.target_column(),
        child_id,
        stale.len(),
        wanted.len()
    );
    Ok(())
}
