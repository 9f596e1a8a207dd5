//! Repository for the `partners` table.

use realty_core::types::DbId;
use sqlx::PgPool;

use crate::models::partner::{CreatePartner, Partner, UpdatePartner};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, logo_url, website, sort_order, created_at, updated_at";

/// Provides CRUD operations for partners.
pub struct PartnerRepo;

impl PartnerRepo {
    /// Insert a new partner, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePartner) -> Result<Partner, sqlx::Error> {
        let query = format!(
            "INSERT INTO partners (name, logo_url, website, sort_order)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(&input.name)
            .bind(&input.logo_url)
            .bind(&input.website)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a partner by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Partner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partners WHERE id = $1");
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of partners in display order.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Partner>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM partners ORDER BY sort_order, id LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of partners.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM partners")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Update a partner. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePartner,
    ) -> Result<Option<Partner>, sqlx::Error> {
        let query = format!(
            "UPDATE partners SET
                name = COALESCE($2, name),
                logo_url = COALESCE($3, logo_url),
                website = COALESCE($4, website),
                sort_order = COALESCE($5, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.logo_url)
            .bind(&input.website)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a partner by ID. Translations are removed by cascade and
    /// projects are detached. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
