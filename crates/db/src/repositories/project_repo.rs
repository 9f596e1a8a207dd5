//! Repository for the `projects` table.

use realty_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, partner_id, name, status, city, image_url, completion_year, \
                       is_featured, created_at, updated_at";

/// `WHERE` clause shared by `list` and `count`. Parameters `$1..$4` are the
/// filter values; a NULL parameter disables that filter.
const FILTER: &str = "($1::BIGINT IS NULL OR partner_id = $1)
                  AND ($2::TEXT IS NULL OR status = $2)
                  AND ($3::TEXT IS NULL OR LOWER(city) = LOWER($3))
                  AND ($4::BOOLEAN IS NULL OR is_featured = $4)";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `status` defaults to `planned` and `is_featured` to `false`.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (partner_id, name, status, city, image_url, completion_year, is_featured)
             VALUES ($1, $2, COALESCE($3, 'planned'), $4, $5, $6, COALESCE($7, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.partner_id)
            .bind(&input.name)
            .bind(&input.status)
            .bind(&input.city)
            .bind(&input.image_url)
            .bind(input.completion_year)
            .bind(input.is_featured)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of projects matching `filter`, featured first, then
    /// most recently created.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE {FILTER}
             ORDER BY is_featured DESC, created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.partner_id)
            .bind(&filter.status)
            .bind(&filter.city)
            .bind(filter.featured)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of projects matching `filter`.
    pub async fn count(pool: &PgPool, filter: &ProjectFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM projects WHERE {FILTER}");
        let row: (i64,) = sqlx::query_as(&query)
            .bind(filter.partner_id)
            .bind(&filter.status)
            .bind(&filter.city)
            .bind(filter.featured)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                partner_id = COALESCE($2, partner_id),
                name = COALESCE($3, name),
                status = COALESCE($4, status),
                city = COALESCE($5, city),
                image_url = COALESCE($6, image_url),
                completion_year = COALESCE($7, completion_year),
                is_featured = COALESCE($8, is_featured)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.partner_id)
            .bind(&input.name)
            .bind(&input.status)
            .bind(&input.city)
            .bind(&input.image_url)
            .bind(input.completion_year)
            .bind(input.is_featured)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Translations and apartments are removed by
    /// cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
