use axum::{
    extract::{Query, State},
    Extension, Json,
};
use buscacar_catalog::{extract_brand_and_model, suggestions, ExtractedQuery};
use buscacar_core::Brand;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct TextQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct SuggestionItem {
    brand: String,
    model: String,
    logo: String,
}

pub(super) async fn list_brands(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Brand>>> {
    Json(ApiResponse::new(state.catalog.all_brands().to_vec(), req_id.0))
}

pub(super) async fn list_suggestions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TextQuery>,
) -> Json<ApiResponse<Vec<SuggestionItem>>> {
    let data = suggestions(state.catalog.all_brands(), &query.q)
        .into_iter()
        .map(|s| SuggestionItem {
            brand: s.brand.name.clone(),
            model: s.model.to_owned(),
            logo: s.brand.logo.clone(),
        })
        .collect();
    Json(ApiResponse::new(data, req_id.0))
}

pub(super) async fn extract_query(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TextQuery>,
) -> Json<ApiResponse<ExtractedQuery>> {
    let extracted = extract_brand_and_model(state.catalog.all_brands(), &query.q);
    Json(ApiResponse::new(extracted, req_id.0))
}
