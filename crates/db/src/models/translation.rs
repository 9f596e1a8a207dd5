//! Translation tables and their row models.
//!
//! Each translatable entity kind has its own `<entity>_translations` table
//! with a foreign key to the entity, a `language` code, and a set of
//! localized text columns. [`TranslationTable`] describes one such table so
//! the repository and the translation store can be shared across kinds.

use realty_core::translation_sync::{FieldMap, Translated};
use realty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Table descriptors
// ---------------------------------------------------------------------------

/// Static description of a translation table.
///
/// Every identifier here is a compile-time constant; SQL is only ever built
/// from these, never from request input.
#[derive(Debug)]
pub struct TranslationTable {
    /// Translation table name, e.g. `partner_translations`.
    pub table: &'static str,
    /// Owning entity table, e.g. `partners`.
    pub entity_table: &'static str,
    /// Foreign-key column pointing at the entity, e.g. `partner_id`.
    pub entity_field: &'static str,
    /// Localized text columns.
    pub columns: &'static [&'static str],
    /// Human-readable entity name used in not-found errors.
    pub entity_name: &'static str,
}

pub static PARTNER_TRANSLATIONS: TranslationTable = TranslationTable {
    table: "partner_translations",
    entity_table: "partners",
    entity_field: "partner_id",
    columns: &["name", "description"],
    entity_name: "Partner",
};

pub static PROJECT_TRANSLATIONS: TranslationTable = TranslationTable {
    table: "project_translations",
    entity_table: "projects",
    entity_field: "project_id",
    columns: &["name", "description", "address"],
    entity_name: "Project",
};

impl TranslationTable {
    /// Column list for `SELECT` / `RETURNING`.
    pub fn select_columns(&self) -> String {
        format!(
            "id, {}, language, {}, created_at, updated_at",
            self.entity_field,
            self.columns.join(", ")
        )
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    /// Reject any key that is not a localized column of this table.
    pub fn check_columns<'k>(
        &self,
        keys: impl IntoIterator<Item = &'k String>,
    ) -> Result<(), sqlx::Error> {
        for key in keys {
            if !self.has_column(key) {
                return Err(sqlx::Error::ColumnNotFound(format!("{}.{key}", self.table)));
            }
        }
        Ok(())
    }

    /// Empty-string defaults for every localized column.
    pub fn empty_fields(&self) -> FieldMap {
        self.columns
            .iter()
            .map(|c| (c.to_string(), String::new()))
            .collect()
    }
}

/// A translation row that knows which entity it belongs to.
pub trait TranslationRow: Translated {
    fn entity_id(&self) -> DbId;
}

// ---------------------------------------------------------------------------
// Partner translations
// ---------------------------------------------------------------------------

/// A row from the `partner_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PartnerTranslation {
    pub id: DbId,
    pub partner_id: DbId,
    pub language: String,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Translated for PartnerTranslation {
    fn language(&self) -> &str {
        &self.language
    }
}

impl TranslationRow for PartnerTranslation {
    fn entity_id(&self) -> DbId {
        self.partner_id
    }
}

/// DTO for setting one language's partner content.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPartnerTranslation {
    pub name: String,
    pub description: Option<String>,
}

impl UpsertPartnerTranslation {
    /// Omitted fields are left out, so an existing value is kept on update
    /// and the column default applies on insert.
    pub fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::from([("name".to_string(), self.name)]);
        if let Some(description) = self.description {
            fields.insert("description".to_string(), description);
        }
        fields
    }
}

// ---------------------------------------------------------------------------
// Project translations
// ---------------------------------------------------------------------------

/// A row from the `project_translations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectTranslation {
    pub id: DbId,
    pub project_id: DbId,
    pub language: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Translated for ProjectTranslation {
    fn language(&self) -> &str {
        &self.language
    }
}

impl TranslationRow for ProjectTranslation {
    fn entity_id(&self) -> DbId {
        self.project_id
    }
}

/// DTO for setting one language's project content.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProjectTranslation {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
}

impl UpsertProjectTranslation {
    pub fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::from([("name".to_string(), self.name)]);
        if let Some(description) = self.description {
            fields.insert("description".to_string(), description);
        }
        if let Some(address) = self.address {
            fields.insert("address".to_string(), address);
        }
        fields
    }
}

/// Languages created by a sync request.
#[derive(Debug, Clone, Serialize)]
pub struct SyncResult {
    pub entity_id: DbId,
    pub created: Vec<String>,
}
