//! Compiled-in tourism catalog
//!
//! All content is static and read-only; nothing here is mutated at runtime.

pub mod card;
pub mod city;
pub mod festival;
pub mod spot;

pub use card::{highlights, Carousel, ContentCard};
pub use city::{
    city_by_id, cuisine_by_id, place_by_id, places_in_city, City, Cuisine, Place, PlaceKind,
    CITIES, CUISINES, PLACES,
};
pub use festival::{festival_by_id, festivals, Category, Festival, FestivalLocation, Season, MONTHS};
pub use spot::{map_spots, spot_by_id, Coordinates, MapSpot, SpotCategory};
