//! # Jharkhand Tourism Common Library
//!
//! Shared code for the tourism site:
//! - Static catalog (festivals, cities, places, cuisines, map spots)
//! - Festival filter pipeline and facets
//! - Map viewer fallback chain and its timer-driven session
//! - Key-value persistence and city reviews
//! - Flight search (server side and client)
//! - Quiz scoring
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod flights;
pub mod quiz;
pub mod reviews;
pub mod store;
pub mod viewer;

pub use error::{Error, Result};
pub use filter::{filter_festivals, FilterOptions};
