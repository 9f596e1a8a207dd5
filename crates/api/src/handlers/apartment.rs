//! Handlers for the `/apartments` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use realty_core::error::CoreError;
use realty_core::listing::{validate_apartment_numbers, validate_apartment_status};
use realty_core::pagination::{PageMeta, PageRequest};
use realty_core::types::DbId;
use realty_db::models::apartment::{
    Apartment, ApartmentListParams, CreateApartment, UpdateApartment,
};
use realty_db::repositories::ApartmentRepo;

use crate::error::{AppError, AppResult};
use crate::response::PageResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Apartment",
        id,
    })
}

/// GET /api/v1/apartments
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ApartmentListParams>,
) -> AppResult<Json<PageResponse<Apartment>>> {
    if let Some(status) = &params.status {
        validate_apartment_status(status)?;
    }
    let filter = params.filter();
    let page = PageRequest::from_params(params.page, params.per_page);

    let data = ApartmentRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let total = ApartmentRepo::count(&state.pool, &filter).await?;

    Ok(Json(PageResponse {
        data,
        meta: PageMeta::new(page, total),
    }))
}

/// POST /api/v1/apartments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateApartment>,
) -> AppResult<(StatusCode, Json<Apartment>)> {
    validate_apartment_numbers(Some(input.rooms), Some(input.area_sqm), Some(input.price))?;
    if let Some(status) = &input.status {
        validate_apartment_status(status)?;
    }
    let apartment = ApartmentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(apartment)))
}

/// GET /api/v1/apartments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Apartment>> {
    let apartment = ApartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(apartment))
}

/// PUT /api/v1/apartments/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateApartment>,
) -> AppResult<Json<Apartment>> {
    validate_apartment_numbers(input.rooms, input.area_sqm, input.price)?;
    if let Some(status) = &input.status {
        validate_apartment_status(status)?;
    }
    let apartment = ApartmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(apartment))
}

/// DELETE /api/v1/apartments/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ApartmentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
