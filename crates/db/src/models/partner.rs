//! Partner (developer / agency company) model and DTOs.

use realty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::translation::PartnerTranslation;

/// A partner row from the `partners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Partner {
    pub id: DbId,
    pub name: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A partner with all of its translation rows.
#[derive(Debug, Clone, Serialize)]
pub struct PartnerWithTranslations {
    #[serde(flatten)]
    pub partner: Partner,
    pub translations: Vec<PartnerTranslation>,
}

/// DTO for creating a new partner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePartner {
    pub name: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    /// Defaults to 0 if omitted.
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing partner. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePartner {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub sort_order: Option<i32>,
}

/// Query parameters for `GET /partners`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartnerListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
