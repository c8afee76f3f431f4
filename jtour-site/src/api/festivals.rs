//! Festival grid API
//!
//! The grid is filtered with the same criteria as the page controls, then
//! paginated 12 cards at a time.

use axum::{
    extract::{Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use jtour_common::catalog::{festival_by_id, festivals, Festival};
use jtour_common::filter::{facets, FestivalFacets, FilterQuery};
use jtour_common::{filter_festivals, FilterOptions};

use super::error::{ApiError, ApiResult};
use crate::pagination::{calculate_pagination, Pagination};

/// Page number, read alongside the filter fields
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

#[derive(Debug, Serialize)]
pub struct FestivalPage {
    pub festivals: Vec<&'static Festival>,
    #[serde(flatten)]
    pub pagination: Pagination,
    /// True when no filter is active
    pub unfiltered: bool,
}

/// GET /api/festivals?search=&category=&season=&location=&month=&page=
pub async fn list_festivals(
    Query(filter): Query<FilterQuery>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<FestivalPage>> {
    let options = FilterOptions::try_from(&filter)?;
    let matched = filter_festivals(festivals(), &options);
    let pagination = calculate_pagination(matched.len(), page.page);
    debug!(
        "Festival grid: {} of {} match, page {}/{}",
        matched.len(),
        festivals().len(),
        pagination.page,
        pagination.total_pages
    );

    Ok(Json(FestivalPage {
        festivals: pagination.slice(&matched).to_vec(),
        pagination,
        unfiltered: options.is_empty(),
    }))
}

/// GET /api/festivals/facets
pub async fn festival_facets() -> Json<FestivalFacets> {
    Json(facets(festivals()))
}

/// GET /api/festivals/:id
pub async fn get_festival(Path(id): Path<String>) -> ApiResult<Json<&'static Festival>> {
    festival_by_id(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Festival not found: {}", id)))
}
