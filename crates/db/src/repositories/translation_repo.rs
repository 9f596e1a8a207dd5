//! Repository for the `<entity>_translations` tables.
//!
//! One implementation serves every translation table; the table is passed
//! in as a [`TranslationTable`] descriptor and the row type as a generic.

use std::collections::HashMap;

use realty_core::translation_sync::{FieldMap, NewTranslation};
use realty_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

use crate::models::translation::{TranslationRow, TranslationTable};

/// Provides read and write operations for translation rows.
pub struct TranslationRepo;

impl TranslationRepo {
    /// All translations of one entity, oldest first.
    pub async fn list_for_entity<R>(
        pool: &PgPool,
        table: &TranslationTable,
        entity_id: DbId,
    ) -> Result<Vec<R>, sqlx::Error>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let query = format!(
            "SELECT {} FROM {} WHERE {} = $1 ORDER BY id",
            table.select_columns(),
            table.table,
            table.entity_field
        );
        sqlx::query_as::<_, R>(&query)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    /// Translations of several entities in one query (for list pages).
    pub async fn list_for_entities<R>(
        pool: &PgPool,
        table: &TranslationTable,
        entity_ids: &[DbId],
    ) -> Result<Vec<R>, sqlx::Error>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        if entity_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {} FROM {} WHERE {} = ANY($1) ORDER BY {}, id",
            table.select_columns(),
            table.table,
            table.entity_field,
            table.entity_field
        );
        sqlx::query_as::<_, R>(&query)
            .bind(entity_ids)
            .fetch_all(pool)
            .await
    }

    /// Every translation row in the table, grouped-friendly order.
    pub async fn list_all<R>(pool: &PgPool, table: &TranslationTable) -> Result<Vec<R>, sqlx::Error>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let query = format!(
            "SELECT {} FROM {} ORDER BY {}, id",
            table.select_columns(),
            table.table,
            table.entity_field
        );
        sqlx::query_as::<_, R>(&query).fetch_all(pool).await
    }

    /// Insert or update one language's content for an entity.
    ///
    /// Only the columns present in `fields` are written; on conflict the
    /// other columns keep their current values.
    pub async fn upsert<R>(
        pool: &PgPool,
        table: &TranslationTable,
        entity_id: DbId,
        language: &str,
        fields: &FieldMap,
    ) -> Result<R, sqlx::Error>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        table.check_columns(fields.keys())?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}, language",
            table.table, table.entity_field
        ));
        for column in fields.keys() {
            qb.push(", ").push(column);
        }
        qb.push(") VALUES (");
        {
            let mut values = qb.separated(", ");
            values.push_bind(entity_id);
            values.push_bind(language.to_string());
            for value in fields.values() {
                values.push_bind(value.clone());
            }
        }
        qb.push(format!(
            ") ON CONFLICT ({}, language) DO UPDATE SET ",
            table.entity_field
        ));
        if fields.is_empty() {
            // No-op update so RETURNING still yields the existing row.
            qb.push("language = EXCLUDED.language");
        } else {
            let assignments: Vec<String> = fields
                .keys()
                .map(|c| format!("{c} = EXCLUDED.{c}"))
                .collect();
            qb.push(assignments.join(", "));
        }
        qb.push(format!(" RETURNING {}", table.select_columns()));

        qb.build_query_as::<R>().fetch_one(pool).await
    }

    /// Bulk insert, skipping rows whose `(entity, language)` already exists.
    ///
    /// Returns the number of rows actually inserted. Rows sharing the same
    /// set of fields go into one `INSERT`; mixed batches run in a single
    /// transaction.
    pub async fn insert_many_skip_duplicates(
        pool: &PgPool,
        table: &TranslationTable,
        rows: &[NewTranslation<DbId>],
    ) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }
        for row in rows {
            if row.entity_field != table.entity_field {
                return Err(sqlx::Error::ColumnNotFound(format!(
                    "{}.{}",
                    table.table, row.entity_field
                )));
            }
            table.check_columns(row.fields.keys())?;
        }

        let mut batches: Vec<(Vec<&str>, Vec<&NewTranslation<DbId>>)> = Vec::new();
        for row in rows {
            let columns: Vec<&str> = row.fields.keys().map(String::as_str).collect();
            match batches.iter_mut().find(|(c, _)| *c == columns) {
                Some((_, batch)) => batch.push(row),
                None => batches.push((columns, vec![row])),
            }
        }

        let inserted = if let [(columns, batch)] = batches.as_slice() {
            let mut conn = pool.acquire().await?;
            Self::insert_batch(&mut conn, table, columns, batch).await?
        } else {
            let mut tx = pool.begin().await?;
            let mut inserted = 0;
            for (columns, batch) in &batches {
                inserted += Self::insert_batch(&mut tx, table, columns, batch).await?;
            }
            tx.commit().await?;
            inserted
        };

        let skipped = (rows.len() as u64).saturating_sub(inserted);
        if skipped > 0 {
            tracing::debug!(table = table.table, inserted, skipped, "Skipped existing translations");
        }
        Ok(inserted)
    }

    async fn insert_batch(
        conn: &mut PgConnection,
        table: &TranslationTable,
        columns: &[&str],
        rows: &[&NewTranslation<DbId>],
    ) -> Result<u64, sqlx::Error> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}, language",
            table.table, table.entity_field
        ));
        for column in columns {
            qb.push(", ").push(column);
        }
        qb.push(") ");
        qb.push_values(rows, |mut b, row| {
            b.push_bind(row.entity_id).push_bind(row.language.clone());
            for column in columns {
                b.push_bind(row.fields[*column].clone());
            }
        });
        qb.push(format!(
            " ON CONFLICT ({}, language) DO NOTHING",
            table.entity_field
        ));

        let result = qb.build().execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }
}

/// Group translation rows by owning entity, preserving row order.
pub fn group_by_entity<R: TranslationRow>(rows: Vec<R>) -> HashMap<DbId, Vec<R>> {
    let mut grouped: HashMap<DbId, Vec<R>> = HashMap::new();
    for row in rows {
        grouped.entry(row.entity_id()).or_default().push(row);
    }
    grouped
}
