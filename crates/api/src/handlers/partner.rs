//! Handlers for the `/partners` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use realty_core::error::CoreError;
use realty_core::listing::{validate_description, validate_name};
use realty_core::pagination::{PageMeta, PageRequest};
use realty_core::types::DbId;
use realty_db::models::partner::{
    CreatePartner, Partner, PartnerListParams, PartnerWithTranslations, UpdatePartner,
};
use realty_db::models::translation::{
    PartnerTranslation, SyncResult, UpsertPartnerTranslation, PARTNER_TRANSLATIONS,
};
use realty_db::repositories::translation_repo::group_by_entity;
use realty_db::repositories::{PartnerRepo, TranslationRepo};
use realty_db::translation_store::partner_store;

use crate::error::{AppError, AppResult};
use crate::handlers::translation::{backfill_after_create, name_defaults, sync_entity};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Load a partner or fail with 404.
async fn ensure_partner_exists(state: &AppState, id: DbId) -> AppResult<Partner> {
    PartnerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Partner",
            id,
        }))
}

async fn with_translations(state: &AppState, partner: Partner) -> AppResult<PartnerWithTranslations> {
    let translations =
        TranslationRepo::list_for_entity(&state.pool, &PARTNER_TRANSLATIONS, partner.id).await?;
    Ok(PartnerWithTranslations {
        partner,
        translations,
    })
}

/// GET /api/v1/partners
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PartnerListParams>,
) -> AppResult<Json<PageResponse<PartnerWithTranslations>>> {
    let page = PageRequest::from_params(params.page, params.per_page);
    let partners = PartnerRepo::list(&state.pool, page.limit(), page.offset()).await?;
    let total = PartnerRepo::count(&state.pool).await?;

    let ids: Vec<DbId> = partners.iter().map(|p| p.id).collect();
    let rows: Vec<PartnerTranslation> =
        TranslationRepo::list_for_entities(&state.pool, &PARTNER_TRANSLATIONS, &ids).await?;
    let mut grouped = group_by_entity(rows);

    let data = partners
        .into_iter()
        .map(|partner| PartnerWithTranslations {
            translations: grouped.remove(&partner.id).unwrap_or_default(),
            partner,
        })
        .collect();

    Ok(Json(PageResponse {
        data,
        meta: PageMeta::new(page, total),
    }))
}

/// POST /api/v1/partners
///
/// Creates the partner, then backfills a translation row per supported
/// language seeded with the partner's name.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePartner>,
) -> AppResult<(StatusCode, Json<PartnerWithTranslations>)> {
    validate_name(&input.name)?;

    let partner = PartnerRepo::create(&state.pool, &input).await?;
    tracing::info!(partner_id = partner.id, name = %partner.name, "Partner created");

    backfill_after_create(&state, &partner_store(&state.pool), partner.id, &partner.name).await;

    let body = with_translations(&state, partner).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/v1/partners/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PartnerWithTranslations>> {
    let partner = ensure_partner_exists(&state, id).await?;
    Ok(Json(with_translations(&state, partner).await?))
}

/// PUT /api/v1/partners/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePartner>,
) -> AppResult<Json<Partner>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    let partner = PartnerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Partner",
            id,
        }))?;
    Ok(Json(partner))
}

/// DELETE /api/v1/partners/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if PartnerRepo::delete(&state.pool, id).await? {
        tracing::info!(partner_id = id, "Partner deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Partner",
            id,
        }))
    }
}

/// PUT /api/v1/partners/{id}/translations/{language}
pub async fn upsert_translation(
    State(state): State<AppState>,
    Path((id, language)): Path<(DbId, String)>,
    Json(input): Json<UpsertPartnerTranslation>,
) -> AppResult<Json<PartnerTranslation>> {
    state.config.languages.validate(&language)?;
    validate_name(&input.name)?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    ensure_partner_exists(&state, id).await?;

    let translation = TranslationRepo::upsert(
        &state.pool,
        &PARTNER_TRANSLATIONS,
        id,
        &language,
        &input.into_fields(),
    )
    .await?;
    Ok(Json(translation))
}

/// POST /api/v1/partners/{id}/translations/sync
pub async fn sync_translations(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SyncResult>>> {
    let partner = ensure_partner_exists(&state, id).await?;
    let store = partner_store(&state.pool);
    let defaults = name_defaults(store.table(), &partner.name);
    let created = sync_entity(&state, &store, id, &defaults).await?;

    Ok(Json(DataResponse {
        data: SyncResult {
            entity_id: id,
            created,
        },
    }))
}
