//! Translation completeness handlers and the helpers the entity handlers
//! share for backfilling missing languages.

use axum::extract::State;
use axum::Json;
use realty_core::translation_sync::{FieldMap, SyncReport, TranslationSynchronizer};
use realty_core::types::DbId;
use realty_db::models::translation::TranslationTable;
use realty_db::repositories::TranslationRepo;
use realty_db::translation_store::{
    partner_store, project_store, PgTranslationStore, StoredTranslation,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Defaults for backfilled rows: the entity's own name in every language,
/// every other localized column empty.
pub fn name_defaults(table: &TranslationTable, name: &str) -> FieldMap {
    let mut fields = table.empty_fields();
    fields.insert("name".to_string(), name.to_string());
    fields
}

/// Bring one entity up to the supported language set.
///
/// Reads the entity's current rows, then issues at most one skip-duplicates
/// insert. Returns the languages that were missing.
pub async fn sync_entity<R: StoredTranslation>(
    state: &AppState,
    store: &PgTranslationStore<'_, R>,
    entity_id: DbId,
    defaults: &FieldMap,
) -> Result<Vec<String>, sqlx::Error> {
    let table = store.table();
    let existing: Vec<R> = TranslationRepo::list_for_entity(&state.pool, table, entity_id).await?;

    TranslationSynchronizer::new(store, &state.config.languages)
        .sync_one(entity_id, table.entity_field, &existing, defaults)
        .await
}

/// Sync after a create. Failures are logged and swallowed; the entity row
/// is already committed and a later sync run will fill the gap.
pub async fn backfill_after_create<R: StoredTranslation>(
    state: &AppState,
    store: &PgTranslationStore<'_, R>,
    entity_id: DbId,
    name: &str,
) {
    let table = store.table();
    let entity_field = table.entity_field;
    match sync_entity(state, store, entity_id, &name_defaults(table, name)).await {
        Ok(created) => {
            tracing::debug!(entity_field, entity_id, languages = ?created, "Created translations");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                entity_field,
                entity_id,
                "Translation sync after create failed",
            );
        }
    }
}

/// Run sync-all for one entity kind, honouring `SYNC_CONCURRENCY`.
///
/// Names come from the store's own entity read, so every enumerated entity
/// has one.
async fn sync_kind<R: StoredTranslation>(
    state: &AppState,
    store: &PgTranslationStore<'_, R>,
) -> Result<SyncReport, sqlx::Error> {
    let sync = TranslationSynchronizer::new(store, &state.config.languages);
    let table = store.table();
    let defaults = |id: &DbId| match store.entity_name(*id) {
        Some(name) => name_defaults(table, &name),
        None => table.empty_fields(),
    };
    let entity_field = table.entity_field;

    match state.config.sync_concurrency {
        0 | 1 => sync.sync_all(entity_field, defaults).await,
        limit => sync.sync_all_concurrent(entity_field, defaults, limit).await,
    }
}

/// Totals of an admin sync run, per entity kind.
#[derive(Debug, Serialize)]
pub struct SyncAllReport {
    pub partners: SyncReport,
    pub projects: SyncReport,
}

/// Supported content languages, default first.
#[derive(Debug, Serialize)]
pub struct LanguageList {
    pub default_language: String,
    pub supported: Vec<String>,
}

/// GET /api/v1/languages
pub async fn list_languages(State(state): State<AppState>) -> Json<DataResponse<LanguageList>> {
    let languages = &state.config.languages;
    Json(DataResponse {
        data: LanguageList {
            default_language: languages.default_language().to_string(),
            supported: languages.codes().to_vec(),
        },
    })
}

/// POST /api/v1/admin/translations/sync
///
/// Backfills every partner, then every project. Each entity is written
/// independently; an error stops the run and leaves earlier entities
/// synced.
pub async fn sync_all(State(state): State<AppState>) -> AppResult<Json<DataResponse<SyncAllReport>>> {
    let partners = sync_kind(&state, &partner_store(&state.pool)).await?;
    let projects = sync_kind(&state, &project_store(&state.pool)).await?;

    tracing::info!(
        partners_created = partners.total_created,
        projects_created = projects.total_created,
        "Admin translation sync finished",
    );

    Ok(Json(DataResponse {
        data: SyncAllReport { partners, projects },
    }))
}
