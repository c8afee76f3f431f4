//! jtour-site library - Jharkhand tourism web service
//!
//! Serves the festival calendar, city guides, the map viewer with its
//! embed fallback chain, reviews, flight search and the culture quiz.

use axum::Router;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use jtour_common::flights::{flight_schedule, Flight};
use jtour_common::reviews::ReviewBook;
use jtour_common::store::KeyValueStore;
use jtour_common::viewer::{default_approaches, Approach, DEFAULT_LOAD_TIMEOUT};

pub mod api;
pub mod pagination;
pub mod viewers;

use viewers::{ViewerRegistry, DEFAULT_VIEWER_IDLE_TIMEOUT};

/// Days of flights generated from the start date
pub const SCHEDULE_DAYS: u32 = 30;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Generated flight schedule
    pub flights: Arc<Vec<Flight>>,
    pub reviews: ReviewBook,
    /// Open map viewers
    pub viewers: ViewerRegistry,
    /// Candidate embeds, in fallback order
    pub approaches: Arc<Vec<Approach>>,
    /// Google Maps embed key; keyed approaches are skipped without it
    pub maps_api_key: Option<Arc<str>>,
    pub load_timeout: Duration,
}

impl AppState {
    /// State with the default viewer chain and no maps key
    ///
    /// Starts the idle viewer sweeper, so it must be called from within a
    /// tokio runtime.
    pub fn new(store: Arc<dyn KeyValueStore>, schedule_start: NaiveDate) -> Self {
        Self {
            flights: Arc::new(flight_schedule(schedule_start, SCHEDULE_DAYS)),
            reviews: ReviewBook::new(store),
            viewers: ViewerRegistry::with_idle_timeout(DEFAULT_VIEWER_IDLE_TIMEOUT),
            approaches: Arc::new(default_approaches()),
            maps_api_key: None,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    pub fn with_approaches(mut self, approaches: Vec<Approach>) -> Self {
        self.approaches = Arc::new(approaches);
        self
    }

    pub fn with_maps_api_key(mut self, key: Option<String>) -> Self {
        self.maps_api_key = key.map(Arc::from);
        self
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Replace the viewer registry with one swept at `idle_timeout`
    pub fn with_viewer_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.viewers = ViewerRegistry::with_idle_timeout(idle_timeout);
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let catalog = Router::new()
        .route("/api/festivals", get(api::list_festivals))
        .route("/api/festivals/facets", get(api::festival_facets))
        .route("/api/festivals/:id", get(api::get_festival))
        .route("/api/cities", get(api::list_cities))
        .route("/api/cities/:id", get(api::get_city))
        .route("/api/places", get(api::list_places))
        .route("/api/cuisines", get(api::list_cuisines))
        .route("/api/highlights", get(api::list_highlights))
        .route("/api/spots", get(api::list_spots))
        .route("/api/spots/:id", get(api::get_spot));

    let viewer = Router::new()
        .route("/api/viewer", post(api::open_viewer))
        .route("/api/viewer/:id", get(api::get_viewer).delete(api::close_viewer))
        .route("/api/viewer/:id/loaded", post(api::frame_loaded))
        .route("/api/viewer/:id/failed", post(api::frame_failed))
        .route("/api/viewer/:id/reset", post(api::reset_viewer))
        .route("/api/viewer/:id/events", get(api::viewer_events));

    let visitor = Router::new()
        .route("/api/cities/:id/reviews", get(api::list_reviews).post(api::add_review))
        .route("/api/flights", get(api::search_flights))
        .route("/api/quiz", get(api::get_quiz))
        .route("/api/quiz/score", post(api::score_quiz));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/events", get(api::event_stream))
        .merge(api::health_routes());

    Router::new()
        .merge(catalog)
        .merge(viewer)
        .merge(visitor)
        .merge(public)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
