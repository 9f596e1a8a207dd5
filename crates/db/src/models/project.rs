//! Project (real-estate development) model and DTOs.

use realty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::translation::ProjectTranslation;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub partner_id: Option<DbId>,
    pub name: String,
    pub status: String,
    pub city: Option<String>,
    pub image_url: Option<String>,
    pub completion_year: Option<i32>,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project with all of its translation rows.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithTranslations {
    #[serde(flatten)]
    pub project: Project,
    pub translations: Vec<ProjectTranslation>,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub partner_id: Option<DbId>,
    pub name: String,
    /// Defaults to `planned` if omitted.
    pub status: Option<String>,
    pub city: Option<String>,
    pub image_url: Option<String>,
    pub completion_year: Option<i32>,
    /// Defaults to `false` if omitted.
    pub is_featured: Option<bool>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub partner_id: Option<DbId>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub image_url: Option<String>,
    pub completion_year: Option<i32>,
    pub is_featured: Option<bool>,
}

/// Filters applied to project listings. `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub partner_id: Option<DbId>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub featured: Option<bool>,
}

/// Query parameters for `GET /projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub partner_id: Option<DbId>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub featured: Option<bool>,
}

impl ProjectListParams {
    pub fn filter(&self) -> ProjectFilter {
        ProjectFilter {
            partner_id: self.partner_id,
            status: self.status.clone(),
            city: self.city.clone(),
            featured: self.featured,
        }
    }
}
