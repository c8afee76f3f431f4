//! Cities, places to visit and regional cuisine

use once_cell::sync::Lazy;
use serde::Serialize;

/// A city page entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub id: &'static str,
    pub name: &'static str,
    pub district: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub attractions: &'static [&'static str],
    pub image: &'static str,
}

/// Kind of place shown on place cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceKind {
    Waterfall,
    Temple,
    Wildlife,
    HillStation,
    Lake,
    Heritage,
    Park,
}

/// A place to visit, attached to its nearest city
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
    pub id: &'static str,
    pub name: &'static str,
    pub city_id: &'static str,
    pub kind: PlaceKind,
    pub description: &'static str,
    pub best_time: &'static str,
    pub image: &'static str,
}

/// A regional dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cuisine {
    pub id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub vegetarian: bool,
    pub description: &'static str,
    pub image: &'static str,
}

pub const CITIES: &[City] = &[
    City {
        id: "ranchi",
        name: "Ranchi",
        district: "Ranchi",
        tagline: "City of Waterfalls",
        description: "The state capital sits on the Chotanagpur plateau, ringed by waterfalls \
                      and hills, with a mild climate that made it the summer capital of Bihar.",
        attractions: &["Hundru Falls", "Rock Garden", "Jagannath Temple", "Tagore Hill"],
        image: "/images/cities/ranchi.jpg",
    },
    City {
        id: "jamshedpur",
        name: "Jamshedpur",
        district: "East Singhbhum",
        tagline: "Steel City",
        description: "India's first planned industrial city, laid out around the Tata steel \
                      works at the confluence of the Subarnarekha and Kharkai rivers.",
        attractions: &["Jubilee Park", "Dimna Lake", "Dalma Wildlife Sanctuary"],
        image: "/images/cities/jamshedpur.jpg",
    },
    City {
        id: "deoghar",
        name: "Deoghar",
        district: "Deoghar",
        tagline: "Abode of the Gods",
        description: "Home of the Baidyanath jyotirlinga and the destination of the Shravani \
                      Mela pilgrimage.",
        attractions: &["Baidyanath Dham", "Trikut Parvat", "Naulakha Mandir"],
        image: "/images/cities/deoghar.jpg",
    },
    City {
        id: "dhanbad",
        name: "Dhanbad",
        district: "Dhanbad",
        tagline: "Coal Capital of India",
        description: "A mining city with the Maithon and Panchet dams on the Damodar and \
                      Barakar rivers close by.",
        attractions: &["Maithon Dam", "Panchet Dam", "Bhatinda Falls"],
        image: "/images/cities/dhanbad.jpg",
    },
    City {
        id: "hazaribagh",
        name: "Hazaribagh",
        district: "Hazaribagh",
        tagline: "City of a Thousand Gardens",
        description: "A forested plateau town known for its national park and the Sohrai and \
                      Khovar painting traditions.",
        attractions: &["Hazaribagh National Park", "Canary Hill", "Hazaribagh Lake"],
        image: "/images/cities/hazaribagh.jpg",
    },
    City {
        id: "netarhat",
        name: "Netarhat",
        district: "Latehar",
        tagline: "Queen of Chotanagpur",
        description: "A hill station of pine forests known for its sunrise and sunset points.",
        attractions: &["Magnolia Point", "Upper Ghaghri Falls", "Netarhat Dam"],
        image: "/images/cities/netarhat.jpg",
    },
];

pub const PLACES: &[Place] = &[
    Place {
        id: "hundru-falls",
        name: "Hundru Falls",
        city_id: "ranchi",
        kind: PlaceKind::Waterfall,
        description: "The Subarnarekha drops 98 metres over the edge of the Ranchi plateau.",
        best_time: "July to January",
        image: "/images/places/hundru-falls.jpg",
    },
    Place {
        id: "dassam-falls",
        name: "Dassam Falls",
        city_id: "ranchi",
        kind: PlaceKind::Waterfall,
        description: "The Kanchi river falls 44 metres in ten streams near Taimara.",
        best_time: "July to February",
        image: "/images/places/dassam-falls.jpg",
    },
    Place {
        id: "jagannath-temple",
        name: "Jagannath Temple",
        city_id: "ranchi",
        kind: PlaceKind::Temple,
        description: "A 1691 hillock temple modelled on Puri, site of the Rath Yatra.",
        best_time: "June to July",
        image: "/images/places/jagannath-temple.jpg",
    },
    Place {
        id: "patratu-valley",
        name: "Patratu Valley",
        city_id: "ranchi",
        kind: PlaceKind::HillStation,
        description: "Hairpin bends above the Patratu reservoir.",
        best_time: "October to March",
        image: "/images/places/patratu-valley.jpg",
    },
    Place {
        id: "jubilee-park",
        name: "Jubilee Park",
        city_id: "jamshedpur",
        kind: PlaceKind::Park,
        description: "A 225 acre park gifted to the city on the Tata steel jubilee.",
        best_time: "All year",
        image: "/images/places/jubilee-park.jpg",
    },
    Place {
        id: "dalma-sanctuary",
        name: "Dalma Wildlife Sanctuary",
        city_id: "jamshedpur",
        kind: PlaceKind::Wildlife,
        description: "Elephant reserve on the Dalma hills overlooking Jamshedpur.",
        best_time: "November to April",
        image: "/images/places/dalma-sanctuary.jpg",
    },
    Place {
        id: "baidyanath-dham",
        name: "Baidyanath Dham",
        city_id: "deoghar",
        kind: PlaceKind::Temple,
        description: "One of the twelve jyotirlingas of Shiva.",
        best_time: "July to August",
        image: "/images/places/baidyanath-dham.jpg",
    },
    Place {
        id: "maithon-dam",
        name: "Maithon Dam",
        city_id: "dhanbad",
        kind: PlaceKind::Lake,
        description: "Reservoir on the Barakar with boating and an underground power station.",
        best_time: "October to March",
        image: "/images/places/maithon-dam.jpg",
    },
    Place {
        id: "hazaribagh-national-park",
        name: "Hazaribagh National Park",
        city_id: "hazaribagh",
        kind: PlaceKind::Wildlife,
        description: "Dry deciduous forest with watchtowers for sambar and nilgai.",
        best_time: "October to May",
        image: "/images/places/hazaribagh-national-park.jpg",
    },
    Place {
        id: "magnolia-point",
        name: "Magnolia Point",
        city_id: "netarhat",
        kind: PlaceKind::HillStation,
        description: "Sunset viewpoint over the Koel valley.",
        best_time: "October to March",
        image: "/images/places/magnolia-point.jpg",
    },
    Place {
        id: "betla-national-park",
        name: "Betla National Park",
        city_id: "netarhat",
        kind: PlaceKind::Wildlife,
        description: "Part of the Palamu Tiger Reserve, with the ruins of the Palamu forts.",
        best_time: "November to March",
        image: "/images/places/betla-national-park.jpg",
    },
];

pub const CUISINES: &[Cuisine] = &[
    Cuisine {
        id: "dhuska",
        name: "Dhuska",
        region: "Ranchi",
        vegetarian: true,
        description: "Deep-fried rice and lentil bread served with aloo chana.",
        image: "/images/cuisine/dhuska.jpg",
    },
    Cuisine {
        id: "litti-chokha",
        name: "Litti Chokha",
        region: "Statewide",
        vegetarian: true,
        description: "Roasted sattu-stuffed wheat balls with smoked brinjal mash.",
        image: "/images/cuisine/litti-chokha.jpg",
    },
    Cuisine {
        id: "rugra",
        name: "Rugra",
        region: "Chotanagpur",
        vegetarian: true,
        description: "Monsoon puffball mushroom curry.",
        image: "/images/cuisine/rugra.jpg",
    },
    Cuisine {
        id: "chilka-roti",
        name: "Chilka Roti",
        region: "Statewide",
        vegetarian: true,
        description: "Rice and chana dal pancake eaten with chutney.",
        image: "/images/cuisine/chilka-roti.jpg",
    },
    Cuisine {
        id: "thekua",
        name: "Thekua",
        region: "Statewide",
        vegetarian: true,
        description: "Jaggery and wheat cookie prepared as Chhath prasad.",
        image: "/images/cuisine/thekua.jpg",
    },
    Cuisine {
        id: "handia-chicken",
        name: "Desi Chicken with Handia Rice",
        region: "Santhal Pargana",
        vegetarian: false,
        description: "Slow-cooked country chicken served with fermented rice.",
        image: "/images/cuisine/handia-chicken.jpg",
    },
];

static PLACES_BY_CITY: Lazy<Vec<(&'static str, Vec<&'static Place>)>> = Lazy::new(|| {
    CITIES
        .iter()
        .map(|city| {
            let places = PLACES.iter().filter(|p| p.city_id == city.id).collect();
            (city.id, places)
        })
        .collect()
});

pub fn city_by_id(id: &str) -> Option<&'static City> {
    CITIES.iter().find(|c| c.id == id)
}

pub fn place_by_id(id: &str) -> Option<&'static Place> {
    PLACES.iter().find(|p| p.id == id)
}

pub fn cuisine_by_id(id: &str) -> Option<&'static Cuisine> {
    CUISINES.iter().find(|c| c.id == id)
}

/// Places attached to a city, in catalog order (empty for unknown cities)
pub fn places_in_city(city_id: &str) -> &'static [&'static Place] {
    PLACES_BY_CITY
        .iter()
        .find(|(id, _)| *id == city_id)
        .map(|(_, places)| places.as_slice())
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_place_has_a_city() {
        for place in PLACES {
            assert!(city_by_id(place.city_id).is_some(), "{} has no city", place.id);
        }
    }

    #[test]
    fn test_places_in_city() {
        let ranchi: Vec<_> = places_in_city("ranchi").iter().map(|p| p.id).collect();
        assert_eq!(
            ranchi,
            vec!["hundru-falls", "dassam-falls", "jagannath-temple", "patratu-valley"]
        );
        assert!(places_in_city("atlantis").is_empty());
    }

    #[test]
    fn test_place_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&PlaceKind::HillStation).unwrap();
        assert_eq!(json, "\"hill-station\"");
    }
}
