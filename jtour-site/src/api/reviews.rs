//! City review API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use jtour_common::reviews::{CityReview, NewReview, ReviewSummary};

use super::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ReviewList {
    pub city_id: String,
    pub summary: ReviewSummary,
    pub reviews: Vec<CityReview>,
}

/// GET /api/cities/:id/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> ApiResult<Json<ReviewList>> {
    let reviews = state.reviews.list(&city_id).await?;
    Ok(Json(ReviewList {
        summary: ReviewSummary::of(&reviews),
        city_id,
        reviews,
    }))
}

/// POST /api/cities/:id/reviews
pub async fn add_review(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
    Json(review): Json<NewReview>,
) -> ApiResult<(StatusCode, Json<CityReview>)> {
    let created = state.reviews.add(&city_id, review).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
