//! HTTP API handlers for jtour-site

pub mod buildinfo;
pub mod catalog;
pub mod error;
pub mod festivals;
pub mod flights;
pub mod health;
pub mod quiz;
pub mod reviews;
pub mod sse;
pub mod ui;
pub mod viewer;

pub use buildinfo::get_build_info;
pub use catalog::{get_city, get_spot, list_cities, list_cuisines, list_highlights, list_places, list_spots};
pub use error::{ApiError, ApiResult};
pub use festivals::{festival_facets, get_festival, list_festivals};
pub use flights::search_flights;
pub use health::health_routes;
pub use quiz::{get_quiz, score_quiz};
pub use reviews::{add_review, list_reviews};
pub use sse::{event_stream, viewer_events};
pub use ui::{serve_app_js, serve_index};
pub use viewer::{close_viewer, frame_failed, frame_loaded, get_viewer, open_viewer, reset_viewer};
