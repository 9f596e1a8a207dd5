//! Repository for the `apartments` table.

use realty_core::types::DbId;
use sqlx::PgPool;

use crate::models::apartment::{Apartment, ApartmentFilter, CreateApartment, UpdateApartment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, rooms, area_sqm, floor, price, status, image_url, created_at, updated_at";

/// `WHERE` clause shared by `list` and `count`. A NULL parameter disables
/// that filter; range bounds are inclusive.
const FILTER: &str = "($1::BIGINT IS NULL OR project_id = $1)
                  AND ($2::TEXT IS NULL OR status = $2)
                  AND ($3::INTEGER IS NULL OR rooms >= $3)
                  AND ($4::INTEGER IS NULL OR rooms <= $4)
                  AND ($5::BIGINT IS NULL OR price >= $5)
                  AND ($6::BIGINT IS NULL OR price <= $6)";

/// Provides CRUD operations for apartments.
pub struct ApartmentRepo;

impl ApartmentRepo {
    /// Insert a new apartment, returning the created row.
    ///
    /// `status` defaults to `available`.
    pub async fn create(pool: &PgPool, input: &CreateApartment) -> Result<Apartment, sqlx::Error> {
        let query = format!(
            "INSERT INTO apartments (project_id, rooms, area_sqm, floor, price, status, image_url)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'available'), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Apartment>(&query)
            .bind(input.project_id)
            .bind(input.rooms)
            .bind(input.area_sqm)
            .bind(input.floor)
            .bind(input.price)
            .bind(&input.status)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find an apartment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Apartment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM apartments WHERE id = $1");
        sqlx::query_as::<_, Apartment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of apartments matching `filter`, cheapest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ApartmentFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Apartment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM apartments
             WHERE {FILTER}
             ORDER BY price, id
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, Apartment>(&query)
            .bind(filter.project_id)
            .bind(&filter.status)
            .bind(filter.min_rooms)
            .bind(filter.max_rooms)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of apartments matching `filter`.
    pub async fn count(pool: &PgPool, filter: &ApartmentFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM apartments WHERE {FILTER}");
        let row: (i64,) = sqlx::query_as(&query)
            .bind(filter.project_id)
            .bind(&filter.status)
            .bind(filter.min_rooms)
            .bind(filter.max_rooms)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Update an apartment. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateApartment,
    ) -> Result<Option<Apartment>, sqlx::Error> {
        let query = format!(
            "UPDATE apartments SET
                rooms = COALESCE($2, rooms),
                area_sqm = COALESCE($3, area_sqm),
                floor = COALESCE($4, floor),
                price = COALESCE($5, price),
                status = COALESCE($6, status),
                image_url = COALESCE($7, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Apartment>(&query)
            .bind(id)
            .bind(input.rooms)
            .bind(input.area_sqm)
            .bind(input.floor)
            .bind(input.price)
            .bind(&input.status)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete an apartment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM apartments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
