//! Flight search API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, warn};

use jtour_common::flights::{search_flights as search, FlightQuery, FlightSearchResponse};

use crate::AppState;

/// GET /api/flights?departure=&arrival=&departureDate=&passengers=&maxPrice=
///
/// Malformed values yield 400 with `success: false` and no flights.
pub async fn search_flights(
    State(state): State<AppState>,
    Query(query): Query<FlightQuery>,
) -> (StatusCode, Json<FlightSearchResponse>) {
    let criteria = match query.criteria() {
        Ok(criteria) => criteria,
        Err(e) => {
            warn!("Rejected flight search: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(FlightSearchResponse {
                    success: false,
                    flights: Vec::new(),
                }),
            );
        }
    };

    let flights = search(&state.flights, &criteria);
    debug!("Flight search {:?}: {} results", criteria, flights.len());
    (
        StatusCode::OK,
        Json(FlightSearchResponse {
            success: true,
            flights,
        }),
    )
}
