//! Cities, places, cuisine, carousel highlights and map spots

use axum::{extract::Path, Json};
use serde::Serialize;

use jtour_common::catalog::{
    city_by_id, highlights, map_spots, places_in_city, spot_by_id, City, ContentCard, Cuisine,
    MapSpot, Place, CITIES, CUISINES, PLACES,
};

use super::error::{ApiError, ApiResult};

/// Cards of each kind on the home carousel
const HIGHLIGHTS_PER_KIND: usize = 3;

#[derive(Debug, Serialize)]
pub struct CityDetail {
    #[serde(flatten)]
    pub city: &'static City,
    pub places: &'static [&'static Place],
}

/// GET /api/cities
pub async fn list_cities() -> Json<&'static [City]> {
    Json(CITIES)
}

/// GET /api/cities/:id
pub async fn get_city(Path(id): Path<String>) -> ApiResult<Json<CityDetail>> {
    let city = city_by_id(&id).ok_or_else(|| ApiError::NotFound(format!("City not found: {}", id)))?;
    Ok(Json(CityDetail {
        city,
        places: places_in_city(city.id),
    }))
}

/// GET /api/places
pub async fn list_places() -> Json<&'static [Place]> {
    Json(PLACES)
}

/// GET /api/cuisines
pub async fn list_cuisines() -> Json<&'static [Cuisine]> {
    Json(CUISINES)
}

/// GET /api/highlights
pub async fn list_highlights() -> Json<Vec<ContentCard>> {
    Json(highlights(HIGHLIGHTS_PER_KIND))
}

/// GET /api/spots
pub async fn list_spots() -> Json<&'static [MapSpot]> {
    Json(map_spots())
}

/// GET /api/spots/:id
pub async fn get_spot(Path(id): Path<String>) -> ApiResult<Json<&'static MapSpot>> {
    spot_by_id(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Map spot not found: {}", id)))
}
