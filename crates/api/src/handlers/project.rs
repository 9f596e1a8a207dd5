//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use realty_core::error::CoreError;
use realty_core::listing::{validate_description, validate_name, validate_project_status};
use realty_core::pagination::{PageMeta, PageRequest};
use realty_core::types::DbId;
use realty_db::models::project::{
    CreateProject, Project, ProjectListParams, ProjectWithTranslations, UpdateProject,
};
use realty_db::models::translation::{
    ProjectTranslation, SyncResult, UpsertProjectTranslation, PROJECT_TRANSLATIONS,
};
use realty_db::repositories::translation_repo::group_by_entity;
use realty_db::repositories::{ProjectRepo, TranslationRepo};
use realty_db::translation_store::project_store;

use crate::error::{AppError, AppResult};
use crate::handlers::translation::{backfill_after_create, name_defaults, sync_entity};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

async fn ensure_project_exists(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<PageResponse<ProjectWithTranslations>>> {
    if let Some(status) = &params.status {
        validate_project_status(status)?;
    }
    let filter = params.filter();
    let page = PageRequest::from_params(params.page, params.per_page);

    let projects = ProjectRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let total = ProjectRepo::count(&state.pool, &filter).await?;

    let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
    let rows: Vec<ProjectTranslation> =
        TranslationRepo::list_for_entities(&state.pool, &PROJECT_TRANSLATIONS, &ids).await?;
    let mut grouped = group_by_entity(rows);

    let data = projects
        .into_iter()
        .map(|project| ProjectWithTranslations {
            translations: grouped.remove(&project.id).unwrap_or_default(),
            project,
        })
        .collect();

    Ok(Json(PageResponse {
        data,
        meta: PageMeta::new(page, total),
    }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectWithTranslations>)> {
    validate_name(&input.name)?;
    if let Some(status) = &input.status {
        validate_project_status(status)?;
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, name = %project.name, "Project created");

    backfill_after_create(&state, &project_store(&state.pool), project.id, &project.name).await;

    let translations =
        TranslationRepo::list_for_entity(&state.pool, &PROJECT_TRANSLATIONS, project.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProjectWithTranslations {
            project,
            translations,
        }),
    ))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectWithTranslations>> {
    let project = ensure_project_exists(&state, id).await?;
    let translations =
        TranslationRepo::list_for_entity(&state.pool, &PROJECT_TRANSLATIONS, id).await?;
    Ok(Json(ProjectWithTranslations {
        project,
        translations,
    }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(status) = &input.status {
        validate_project_status(status)?;
    }
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Cascades to the project's apartments and translations.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id).await? {
        tracing::info!(project_id = id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// PUT /api/v1/projects/{id}/translations/{language}
pub async fn upsert_translation(
    State(state): State<AppState>,
    Path((id, language)): Path<(DbId, String)>,
    Json(input): Json<UpsertProjectTranslation>,
) -> AppResult<Json<ProjectTranslation>> {
    state.config.languages.validate(&language)?;
    validate_name(&input.name)?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    ensure_project_exists(&state, id).await?;

    let translation = TranslationRepo::upsert(
        &state.pool,
        &PROJECT_TRANSLATIONS,
        id,
        &language,
        &input.into_fields(),
    )
    .await?;
    Ok(Json(translation))
}

/// POST /api/v1/projects/{id}/translations/sync
pub async fn sync_translations(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SyncResult>>> {
    let project = ensure_project_exists(&state, id).await?;
    let store = project_store(&state.pool);
    let defaults = name_defaults(store.table(), &project.name);
    let created = sync_entity(&state, &store, id, &defaults).await?;

    Ok(Json(DataResponse {
        data: SyncResult {
            entity_id: id,
            created,
        },
    }))
}
