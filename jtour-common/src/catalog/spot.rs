//! Map spots shown in the map explorer and street-view viewer

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// A latitude/longitude pair in decimal degrees
///
/// Always within [-90, 90] x [-180, 180]; use [`Coordinates::new`] to build one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidInput(format!("Latitude out of range: {}", lat)));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidInput(format!("Longitude out of range: {}", lng)));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl<'de> Deserialize<'de> for Coordinates {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            lat: f64,
            lng: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Coordinates::new(raw.lat, raw.lng).map_err(serde::de::Error::custom)
    }
}

/// Category tag used for map marker icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpotCategory {
    Waterfall,
    Temple,
    Wildlife,
    HillStation,
    Lake,
    Heritage,
    Park,
}

/// A point of interest with coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSpot {
    pub id: &'static str,
    pub name: &'static str,
    pub category: SpotCategory,
    pub coordinates: Coordinates,
    pub district: &'static str,
    pub description: &'static str,
}

const SPOT_DATA: &[(&str, &str, SpotCategory, f64, f64, &str, &str)] = &[
    ("hundru-falls", "Hundru Falls", SpotCategory::Waterfall, 23.4507, 85.6676, "Ranchi",
     "98 metre fall of the Subarnarekha."),
    ("dassam-falls", "Dassam Falls", SpotCategory::Waterfall, 23.1428, 85.4647, "Ranchi",
     "Ten-stream fall of the Kanchi river."),
    ("jonha-falls", "Jonha Falls", SpotCategory::Waterfall, 23.3416, 85.6078, "Ranchi",
     "Hanging valley fall reached by 700 steps."),
    ("jagannath-temple", "Jagannath Temple", SpotCategory::Temple, 23.3167, 85.2819, "Ranchi",
     "17th century hillock temple."),
    ("rock-garden", "Rock Garden", SpotCategory::Park, 23.3872, 85.3258, "Ranchi",
     "Sculpture garden carved into Gonda hill beside Kanke dam."),
    ("patratu-valley", "Patratu Valley", SpotCategory::HillStation, 23.6339, 85.2886, "Ramgarh",
     "Winding ghat road above the reservoir."),
    ("betla-national-park", "Betla National Park", SpotCategory::Wildlife, 23.8878, 84.1911,
     "Latehar", "Core of the Palamu Tiger Reserve."),
    ("netarhat", "Netarhat", SpotCategory::HillStation, 23.4676, 84.2654, "Latehar",
     "Plateau hill station with sunrise point."),
    ("baidyanath-dham", "Baidyanath Dham", SpotCategory::Temple, 24.4924, 86.7000, "Deoghar",
     "Jyotirlinga shrine of Shiva."),
    ("parasnath-hill", "Parasnath Hill", SpotCategory::Temple, 23.9622, 86.1722, "Giridih",
     "Highest peak of the state and Jain pilgrimage site."),
    ("dalma-sanctuary", "Dalma Wildlife Sanctuary", SpotCategory::Wildlife, 22.8686, 86.2167,
     "East Singhbhum", "Elephant habitat above Jamshedpur."),
    ("jubilee-park", "Jubilee Park", SpotCategory::Park, 22.8156, 86.1950, "East Singhbhum",
     "Landscaped park with musical fountain."),
    ("maithon-dam", "Maithon Dam", SpotCategory::Lake, 23.7833, 86.8167, "Dhanbad",
     "Barakar river reservoir."),
    ("palamu-fort", "Palamu Fort", SpotCategory::Heritage, 23.8667, 84.1833, "Latehar",
     "Chero dynasty forts inside the tiger reserve."),
];

static SPOTS: Lazy<Vec<MapSpot>> = Lazy::new(|| {
    SPOT_DATA
        .iter()
        .filter_map(|&(id, name, category, lat, lng, district, description)| {
            match Coordinates::new(lat, lng) {
                Ok(coordinates) => Some(MapSpot {
                    id,
                    name,
                    category,
                    coordinates,
                    district,
                    description,
                }),
                Err(e) => {
                    tracing::warn!("Skipping map spot {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
});

pub fn map_spots() -> &'static [MapSpot] {
    SPOTS.as_slice()
}

pub fn spot_by_id(id: &str) -> Option<&'static MapSpot> {
    SPOTS.iter().find(|s| s.id == id)
}
