//! Festival filter pipeline
//!
//! `filter_festivals` is pure: it returns borrowed references in input order
//! and never touches the input slice. Every non-empty criterion must hold
//! (logical AND).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::{Category, Festival, Season, MONTHS};
use crate::{Error, Result};

/// Filter criteria for the festival grid
///
/// Empty strings and `None` mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Case-insensitive substring of name, local name, short description or a district
    pub search: String,
    pub category: Option<Category>,
    pub season: Option<Season>,
    /// Case-insensitive substring of the primary location or a district
    pub location: String,
    /// Exact month name, e.g. "August"
    pub month: String,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = month.into();
        self
    }

    /// True when no criterion constrains the result
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.category.is_none()
            && self.season.is_none()
            && self.location.is_empty()
            && self.month.is_empty()
    }

    /// Check a single record against every active criterion
    pub fn matches(&self, festival: &Festival) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = contains_ci(&festival.name, &needle)
                || contains_ci(&festival.name_local, &needle)
                || contains_ci(&festival.short_description, &needle)
                || festival.location.districts.iter().any(|d| contains_ci(d, &needle));
            if !hit {
                return false;
            }
        }

        if let Some(category) = self.category {
            if festival.category != category {
                return false;
            }
        }

        if let Some(season) = self.season {
            if festival.season != season {
                return false;
            }
        }

        if !self.location.is_empty() {
            let needle = self.location.to_lowercase();
            let hit = contains_ci(&festival.location.primary, &needle)
                || festival.location.districts.iter().any(|d| contains_ci(d, &needle));
            if !hit {
                return false;
            }
        }

        if !self.month.is_empty() && !festival.months.iter().any(|m| *m == self.month) {
            return false;
        }

        true
    }
}

/// `needle` must already be lowercase
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Apply `options` to `festivals`, keeping input order
pub fn filter_festivals<'a>(festivals: &'a [Festival], options: &FilterOptions) -> Vec<&'a Festival> {
    festivals.iter().filter(|f| options.matches(f)).collect()
}

/// Festival grid query string as sent by the browser
///
/// Every field is optional; `""` and `"all"` both mean "no constraint".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
}

fn active(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != "all")
}

impl TryFrom<&FilterQuery> for FilterOptions {
    type Error = Error;

    /// Unknown category or season values are rejected rather than silently ignored
    fn try_from(query: &FilterQuery) -> Result<Self> {
        let category = active(query.category.as_deref())
            .map(str::parse::<Category>)
            .transpose()?;
        let season = active(query.season.as_deref())
            .map(str::parse::<Season>)
            .transpose()?;

        Ok(FilterOptions {
            search: active(query.search.as_deref()).unwrap_or_default().to_string(),
            category,
            season,
            location: active(query.location.as_deref()).unwrap_or_default().to_string(),
            month: active(query.month.as_deref()).unwrap_or_default().to_string(),
        })
    }
}

/// Distinct values present in a festival list, for populating filter dropdowns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FestivalFacets {
    pub categories: Vec<Category>,
    pub seasons: Vec<Season>,
    /// Calendar order
    pub months: Vec<String>,
    /// Alphabetical order
    pub districts: Vec<String>,
}

pub fn facets(festivals: &[Festival]) -> FestivalFacets {
    let categories: BTreeSet<Category> = festivals.iter().map(|f| f.category).collect();
    let seasons: BTreeSet<Season> = festivals.iter().map(|f| f.season).collect();
    let districts: BTreeSet<&str> = festivals
        .iter()
        .flat_map(|f| f.location.districts.iter().map(String::as_str))
        .collect();

    let months = MONTHS
        .iter()
        .filter(|m| festivals.iter().any(|f| f.months.iter().any(|fm| fm.as_str() == **m)))
        .map(|m| m.to_string())
        .collect();

    FestivalFacets {
        categories: categories.into_iter().collect(),
        seasons: seasons.into_iter().collect(),
        months,
        districts: districts.into_iter().map(str::to_string).collect(),
    }
}
