//! Vehicle listing handlers.
//!
//! - `GET /api/v1/vehicles`: search with facets, sort and pagination
//! - `GET /api/v1/vehicles/featured`: homepage highlights
//! - `GET /api/v1/vehicles/{id}`: one listing plus similar listings

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use buscacar_catalog::{run_query, similar, Facets, Page, RangeFilter, SearchRequest, SortKey};
use buscacar_core::VehicleRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

const MAX_PAGE_SIZE: usize = 100;
const SIMILAR_LIMIT: usize = 4;

/// Raw query string. Values are parsed by hand so that a bad value produces
/// the JSON error envelope instead of the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub(super) struct VehicleQuery {
    pub q: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_year: Option<String>,
    pub max_year: Option<String>,
    pub min_mileage: Option<String>,
    pub max_mileage: Option<String>,
    pub transmission: Option<String>,
    pub fuel: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct VehicleDetail {
    vehicle: VehicleRecord,
    similar: Vec<VehicleRecord>,
}

/// Parses an optional query value, treating blank as absent.
fn parse_param<T>(request_id: &str, name: &str, raw: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(|e| {
            ApiError::new(
                request_id,
                "validation_error",
                format!("invalid {name} '{value}': {e}"),
            )
        }),
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

fn range<T: PartialOrd + Copy>(min: Option<T>, max: Option<T>) -> Option<RangeFilter<T>> {
    let range = RangeFilter::new(min, max);
    (!range.is_open()).then_some(range)
}

/// Clamps the requested page size into `1..=MAX_PAGE_SIZE`.
pub(super) fn normalize_page_size(requested: Option<usize>, default: usize) -> usize {
    requested.unwrap_or(default).clamp(1, MAX_PAGE_SIZE)
}

pub(super) fn build_search_request(
    request_id: &str,
    query: &VehicleQuery,
    default_page_size: usize,
) -> Result<SearchRequest, ApiError> {
    let facets = Facets {
        brand: non_blank(query.brand.as_ref()),
        model: non_blank(query.model.as_ref()),
        price: range(
            parse_param::<Decimal>(request_id, "min_price", query.min_price.as_deref())?,
            parse_param::<Decimal>(request_id, "max_price", query.max_price.as_deref())?,
        ),
        year: range(
            parse_param::<i32>(request_id, "min_year", query.min_year.as_deref())?,
            parse_param::<i32>(request_id, "max_year", query.max_year.as_deref())?,
        ),
        mileage: range(
            parse_param::<u64>(request_id, "min_mileage", query.min_mileage.as_deref())?,
            parse_param::<u64>(request_id, "max_mileage", query.max_mileage.as_deref())?,
        ),
        transmission: parse_param(request_id, "transmission", query.transmission.as_deref())?,
        fuel: parse_param(request_id, "fuel", query.fuel.as_deref())?,
        color: non_blank(query.color.as_ref()),
        category: parse_param(request_id, "category", query.category.as_deref())?,
    };

    Ok(SearchRequest {
        query: query.q.clone().unwrap_or_default(),
        facets,
        sort: parse_param::<SortKey>(request_id, "sort", query.sort.as_deref())?
            .unwrap_or_default(),
        page: parse_param::<usize>(request_id, "page", query.page.as_deref())?.unwrap_or(1),
        page_size: normalize_page_size(
            parse_param::<usize>(request_id, "page_size", query.page_size.as_deref())?,
            default_page_size,
        ),
    })
}

pub(super) async fn list_vehicles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<ApiResponse<Page<VehicleRecord>>>, ApiError> {
    let request = build_search_request(&req_id.0, &query, state.default_page_size)?;

    let page = run_query(&state.catalog, &request)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?
        .map(VehicleRecord::clone);

    Ok(Json(ApiResponse::new(page, req_id.0)))
}

pub(super) async fn list_featured(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<VehicleRecord>>> {
    let featured = state.catalog.featured().cloned().collect();
    Json(ApiResponse::new(featured, req_id.0))
}

pub(super) async fn get_vehicle(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VehicleDetail>>, ApiError> {
    let Some(vehicle) = state.catalog.vehicle(&id) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("vehicle '{id}' not found"),
        ));
    };

    let detail = VehicleDetail {
        vehicle: vehicle.clone(),
        similar: similar(&state.catalog, &id, SIMILAR_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    };

    Ok(Json(ApiResponse::new(detail, req_id.0)))
}
