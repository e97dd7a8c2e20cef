//! FIPE price-reference proxy.
//!
//! The brand listing is cached; model listings pass straight through.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use buscacar_fipe::{BrandCache, BrandWithModels, FipeClient, FipeError, FipeReference};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug)]
pub struct FipeState {
    pub client: FipeClient,
    pub cache: BrandCache,
    pub brand_limit: usize,
}

fn upstream_error(request_id: String, error: &FipeError) -> ApiError {
    tracing::error!(error = %error, "FIPE request failed");
    ApiError::new(request_id, "upstream_error", "price reference service unavailable")
}

pub(super) async fn list_fipe_brands(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<BrandWithModels>>>, ApiError> {
    let fipe = &state.fipe;
    let refreshed = fipe
        .cache
        .get_or_refresh(|| fipe.client.list_brands_with_models(fipe.brand_limit))
        .await;

    let brands = match refreshed {
        Ok(brands) => brands,
        Err(e) => match fipe.cache.peek().await {
            Some(stale) => {
                tracing::warn!(error = %e, "FIPE refresh failed; serving stale brand list");
                stale
            }
            None => return Err(upstream_error(req_id.0, &e)),
        },
    };

    Ok(Json(ApiResponse::new(brands.as_ref().clone(), req_id.0)))
}

pub(super) async fn list_fipe_models(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<Vec<FipeReference>>>, ApiError> {
    if code.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "brand code is required",
        ));
    }

    let models = state
        .fipe
        .client
        .list_models(&code)
        .await
        .map_err(|e| upstream_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(models, req_id.0)))
}
