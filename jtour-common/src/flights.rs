//! Flight search
//!
//! Server side: a generated schedule of flights into and out of Jharkhand
//! airports, searched with [`search_flights`]. Client side: [`FlightClient`]
//! calls `GET /api/flights` and degrades to an empty list on any failure.

use chrono::{Duration as ChronoDuration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub city: String,
    /// IATA code
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub departure: Airport,
    pub arrival: Airport,
    pub departure_date: NaiveDate,
    pub departure_time: String,
    pub arrival_time: String,
    /// Fare per passenger in rupees
    pub price: u32,
    pub seats_available: u32,
}

/// Search parameters as they appear on the query string
///
/// Every field is optional; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passengers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
}

/// Parsed, validated search constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightCriteria {
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub passengers: Option<u32>,
    pub max_price: Option<u32>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl FlightQuery {
    /// The non-empty fields as `(name, value)` pairs, in wire naming
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("departure", &self.departure),
            ("arrival", &self.arrival),
            ("departureDate", &self.departure_date),
            ("passengers", &self.passengers),
            ("maxPrice", &self.max_price),
        ]
        .into_iter()
        .filter_map(|(name, value)| present(value).map(|v| (name, v.to_string())))
        .collect()
    }

    pub fn criteria(&self) -> Result<FlightCriteria> {
        let departure_date = present(&self.departure_date)
            .map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .map_err(|_| Error::InvalidInput(format!("Invalid departureDate (expected YYYY-MM-DD): {}", d)))
            })
            .transpose()?;
        let passengers = present(&self.passengers)
            .map(|p| match p.parse::<u32>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(Error::InvalidInput(format!("Invalid passengers: {}", p))),
            })
            .transpose()?;
        let max_price = present(&self.max_price)
            .map(|p| {
                p.parse::<u32>()
                    .map_err(|_| Error::InvalidInput(format!("Invalid maxPrice: {}", p)))
            })
            .transpose()?;

        Ok(FlightCriteria {
            departure: present(&self.departure).map(str::to_lowercase),
            arrival: present(&self.arrival).map(str::to_lowercase),
            departure_date,
            passengers,
            max_price,
        })
    }
}

/// `needle` is lowercase: substring of the city, or the exact airport code
fn airport_matches(airport: &Airport, needle: &str) -> bool {
    airport.city.to_lowercase().contains(needle) || airport.code.eq_ignore_ascii_case(needle)
}

impl FlightCriteria {
    pub fn matches(&self, flight: &Flight) -> bool {
        self.departure.as_deref().map_or(true, |d| airport_matches(&flight.departure, d))
            && self.arrival.as_deref().map_or(true, |a| airport_matches(&flight.arrival, a))
            && self.departure_date.map_or(true, |d| flight.departure_date == d)
            && self.passengers.map_or(true, |p| flight.seats_available >= p)
            && self.max_price.map_or(true, |max| flight.price <= max)
    }
}

/// Matching flights in schedule order
pub fn search_flights(flights: &[Flight], criteria: &FlightCriteria) -> Vec<Flight> {
    flights.iter().filter(|f| criteria.matches(f)).cloned().collect()
}

/// Body of `GET /api/flights`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSearchResponse {
    pub success: bool,
    pub flights: Vec<Flight>,
}

struct Route {
    airline: &'static str,
    number: &'static str,
    from: (&'static str, &'static str),
    to: (&'static str, &'static str),
    departs: &'static str,
    arrives: &'static str,
    base_fare: u32,
    seats: u32,
}

const ROUTES: &[Route] = &[
    Route { airline: "IndiGo", number: "6E 2341", from: ("Delhi", "DEL"), to: ("Ranchi", "IXR"), departs: "06:10", arrives: "08:05", base_fare: 5200, seats: 42 },
    Route { airline: "Air India", number: "AI 409", from: ("Delhi", "DEL"), to: ("Ranchi", "IXR"), departs: "13:40", arrives: "15:35", base_fare: 6100, seats: 28 },
    Route { airline: "IndiGo", number: "6E 2342", from: ("Ranchi", "IXR"), to: ("Delhi", "DEL"), departs: "08:45", arrives: "10:50", base_fare: 5400, seats: 36 },
    Route { airline: "IndiGo", number: "6E 512", from: ("Kolkata", "CCU"), to: ("Ranchi", "IXR"), departs: "07:30", arrives: "08:35", base_fare: 3100, seats: 50 },
    Route { airline: "Akasa Air", number: "QP 1412", from: ("Mumbai", "BOM"), to: ("Ranchi", "IXR"), departs: "10:15", arrives: "12:40", base_fare: 6800, seats: 24 },
    Route { airline: "Air India Express", number: "IX 1283", from: ("Bengaluru", "BLR"), to: ("Ranchi", "IXR"), departs: "16:20", arrives: "18:50", base_fare: 7200, seats: 18 },
    Route { airline: "IndiGo", number: "6E 6121", from: ("Delhi", "DEL"), to: ("Deoghar", "DGH"), departs: "11:05", arrives: "12:55", base_fare: 5900, seats: 30 },
    Route { airline: "IndiGo", number: "6E 7134", from: ("Kolkata", "CCU"), to: ("Deoghar", "DGH"), departs: "14:30", arrives: "15:25", base_fare: 2900, seats: 44 },
    Route { airline: "Alliance Air", number: "9I 741", from: ("Kolkata", "CCU"), to: ("Jamshedpur", "IXW"), departs: "09:20", arrives: "10:15", base_fare: 3400, seats: 12 },
];

/// Flights for every route on each of `days` days starting at `start`
///
/// Fares and seat counts vary by day deterministically, so the same inputs
/// always produce the same schedule.
pub fn flight_schedule(start: NaiveDate, days: u32) -> Vec<Flight> {
    let mut flights = Vec::with_capacity(ROUTES.len() * days as usize);
    for offset in 0..days {
        let date = start + ChronoDuration::days(i64::from(offset));
        for route in ROUTES {
            flights.push(Flight {
                id: format!("{}-{}", route.number.replace(' ', ""), date.format("%Y%m%d")),
                airline: route.airline.to_string(),
                flight_number: route.number.to_string(),
                departure: Airport {
                    city: route.from.0.to_string(),
                    code: route.from.1.to_string(),
                },
                arrival: Airport {
                    city: route.to.0.to_string(),
                    code: route.to.1.to_string(),
                },
                departure_date: date,
                departure_time: route.departs.to_string(),
                arrival_time: route.arrives.to_string(),
                price: route.base_fare + (offset * 137) % 900,
                seats_available: route.seats.saturating_sub((offset * 7) % 20),
            });
        }
    }
    flights
}

/// HTTP client for the flight search endpoint
#[derive(Debug, Clone)]
pub struct FlightClient {
    http: reqwest::Client,
    base_url: String,
}

impl FlightClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch matching flights; failures are logged and yield an empty list
    pub async fn search(&self, query: &FlightQuery) -> Vec<Flight> {
        match self.try_search(query).await {
            Ok(flights) => flights,
            Err(e) => {
                warn!("Flight search failed: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &FlightQuery) -> std::result::Result<Vec<Flight>, reqwest::Error> {
        let url = format!("{}/api/flights", self.base_url);
        let response: FlightSearchResponse = self
            .http
            .get(&url)
            .query(&query.to_pairs())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.success {
            debug!("Flight search reported success=false");
        }
        Ok(response.flights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn query() -> FlightQuery {
        FlightQuery::default()
    }

    #[test]
    fn test_schedule_is_deterministic() {
        assert_eq!(flight_schedule(start(), 3), flight_schedule(start(), 3));
        assert_eq!(flight_schedule(start(), 3).len(), ROUTES.len() * 3);
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let flights = flight_schedule(start(), 2);
        let criteria = query().criteria().unwrap();
        assert_eq!(search_flights(&flights, &criteria), flights);
    }

    #[test]
    fn test_city_or_code_matching() {
        let flights = flight_schedule(start(), 1);
        let by_city = FlightQuery {
            arrival: Some("ranchi".to_string()),
            ..query()
        };
        let by_code = FlightQuery {
            arrival: Some("IXR".to_string()),
            ..query()
        };
        let a = search_flights(&flights, &by_city.criteria().unwrap());
        let b = search_flights(&flights, &by_code.criteria().unwrap());
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        assert!(a.iter().all(|f| f.arrival.code == "IXR"));
    }

    #[test]
    fn test_date_price_and_passengers() {
        let flights = flight_schedule(start(), 5);
        let q = FlightQuery {
            departure: Some("kolkata".to_string()),
            departure_date: Some("2025-03-02".to_string()),
            passengers: Some("2".to_string()),
            max_price: Some("3300".to_string()),
            ..query()
        };
        let found = search_flights(&flights, &q.criteria().unwrap());
        let numbers: Vec<_> = found.iter().map(|f| f.flight_number.as_str()).collect();
        // Day 1 adds 137 to each base fare: 3237 and 3037 pass, 3537 does not
        assert_eq!(numbers, vec!["6E 512", "6E 7134"]);
    }

    #[test]
    fn test_passengers_exceeding_seats() {
        let flights = flight_schedule(start(), 1);
        let q = FlightQuery {
            passengers: Some("45".to_string()),
            ..query()
        };
        let found = search_flights(&flights, &q.criteria().unwrap());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].flight_number, "6E 512");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_date = FlightQuery {
            departure_date: Some("02/03/2025".to_string()),
            ..query()
        };
        assert!(matches!(bad_date.criteria(), Err(Error::InvalidInput(_))));

        let bad_passengers = FlightQuery {
            passengers: Some("0".to_string()),
            ..query()
        };
        assert!(bad_passengers.criteria().is_err());

        let bad_price = FlightQuery {
            max_price: Some("cheap".to_string()),
            ..query()
        };
        assert!(bad_price.criteria().is_err());
    }

    #[test]
    fn test_to_pairs_skips_empty_fields() {
        let q = FlightQuery {
            departure: Some("Ranchi".to_string()),
            arrival: Some("".to_string()),
            max_price: Some("5000".to_string()),
            ..query()
        };
        assert_eq!(
            q.to_pairs(),
            vec![("departure", "Ranchi".to_string()), ("maxPrice", "5000".to_string())]
        );
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let q: FlightQuery =
            serde_json::from_str(r#"{"departureDate": "2025-03-01", "maxPrice": "4000"}"#).unwrap();
        assert_eq!(q.departure_date.as_deref(), Some("2025-03-01"));
        assert_eq!(q.max_price.as_deref(), Some("4000"));
    }
}
