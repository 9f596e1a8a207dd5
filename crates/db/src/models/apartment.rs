//! Apartment (unit within a project) model and DTOs.

use realty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An apartment row from the `apartments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Apartment {
    pub id: DbId,
    pub project_id: DbId,
    pub rooms: i32,
    pub area_sqm: f64,
    pub floor: Option<i32>,
    /// Price in whole currency units.
    pub price: i64,
    pub status: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new apartment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApartment {
    pub project_id: DbId,
    pub rooms: i32,
    pub area_sqm: f64,
    pub floor: Option<i32>,
    pub price: i64,
    /// Defaults to `available` if omitted.
    pub status: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for updating an existing apartment. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateApartment {
    pub rooms: Option<i32>,
    pub area_sqm: Option<f64>,
    pub floor: Option<i32>,
    pub price: Option<i64>,
    pub status: Option<String>,
    pub image_url: Option<String>,
}

/// Filters applied to apartment listings. Bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct ApartmentFilter {
    pub project_id: Option<DbId>,
    pub status: Option<String>,
    pub min_rooms: Option<i32>,
    pub max_rooms: Option<i32>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

/// Query parameters for `GET /apartments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApartmentListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub project_id: Option<DbId>,
    pub status: Option<String>,
    pub min_rooms: Option<i32>,
    pub max_rooms: Option<i32>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl ApartmentListParams {
    pub fn filter(&self) -> ApartmentFilter {
        ApartmentFilter {
            project_id: self.project_id,
            status: self.status.clone(),
            min_rooms: self.min_rooms,
            max_rooms: self.max_rooms,
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}
