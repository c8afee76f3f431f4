//! Festival filter behaviour over the compiled-in calendar
//!
//! Covers order preservation, AND-composition of independent criteria,
//! the empty filter, and the search/month/no-match scenarios.

use jtour_common::catalog::{festivals, Category, Festival, Season, MONTHS};
use jtour_common::filter::{facets, filter_festivals, FilterOptions};

/// A spread of criteria touching every field, including ones that match nothing
fn criteria_grid() -> Vec<FilterOptions> {
    let mut grid = vec![FilterOptions::new()];
    for search in ["sa", "RANCHI", "cattle", "zzz"] {
        grid.push(FilterOptions::new().with_search(search));
    }
    for category in Category::ALL {
        grid.push(FilterOptions::new().with_category(category));
    }
    for season in Season::ALL {
        grid.push(FilterOptions::new().with_season(season));
    }
    for location in ["ranchi", "singhbhum", "Deoghar", "nowhere"] {
        grid.push(FilterOptions::new().with_location(location));
    }
    for month in MONTHS {
        grid.push(FilterOptions::new().with_month(month));
    }
    grid
}

/// Merge two single-field criteria into one
fn combine(a: &FilterOptions, b: &FilterOptions) -> FilterOptions {
    FilterOptions {
        search: if a.search.is_empty() { b.search.clone() } else { a.search.clone() },
        category: a.category.or(b.category),
        season: a.season.or(b.season),
        location: if a.location.is_empty() { b.location.clone() } else { a.location.clone() },
        month: if a.month.is_empty() { b.month.clone() } else { a.month.clone() },
    }
}

/// Which fields are set, so combinations only pair different fields
fn field_of(o: &FilterOptions) -> usize {
    if !o.search.is_empty() {
        1
    } else if o.category.is_some() {
        2
    } else if o.season.is_some() {
        3
    } else if !o.location.is_empty() {
        4
    } else if !o.month.is_empty() {
        5
    } else {
        0
    }
}

fn is_subsequence(sub: &[&Festival], full: &[Festival]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|s| it.any(|f| std::ptr::eq(f, *s)))
}

#[test]
fn test_result_is_ordered_subsequence() {
    let all = festivals();
    for criteria in criteria_grid() {
        let result = filter_festivals(all, &criteria);
        assert!(is_subsequence(&result, all), "not a subsequence for {:?}", criteria);
    }
}

#[test]
fn test_input_is_not_mutated() {
    let list: Vec<Festival> = festivals().to_vec();
    let before = list.clone();
    for criteria in criteria_grid() {
        let _ = filter_festivals(&list, &criteria);
    }
    assert_eq!(list, before);
}

#[test]
fn test_combined_criteria_equal_sequential_filtering() {
    let all = festivals();
    let grid = criteria_grid();
    for a in &grid {
        for b in &grid {
            if field_of(a) == field_of(b) || field_of(a) == 0 || field_of(b) == 0 {
                continue;
            }
            let combined: Vec<&str> = filter_festivals(all, &combine(a, b))
                .into_iter()
                .map(|f| f.id.as_str())
                .collect();

            let first: Vec<Festival> = filter_festivals(all, a).into_iter().cloned().collect();
            let sequential: Vec<String> = filter_festivals(&first, b)
                .into_iter()
                .map(|f| f.id.clone())
                .collect();

            assert_eq!(combined, sequential, "a={:?} b={:?}", a, b);
        }
    }
}

#[test]
fn test_empty_criteria_yield_full_list() {
    let all = festivals();
    let result = filter_festivals(all, &FilterOptions::new());
    assert_eq!(result.len(), all.len());
    assert!(result.iter().zip(all).all(|(r, f)| std::ptr::eq(*r, f)));
}

fn three_festivals() -> Vec<Festival> {
    vec![
        Festival::new(
            "sarhul",
            "Sarhul",
            "सरहुल",
            Category::Tribal,
            Season::Spring,
            &["March", "April"],
            "Ranchi",
            &["Ranchi"],
            "Spring festival",
        ),
        Festival::new(
            "sohrai",
            "Sohrai",
            "सोहराय",
            Category::Harvest,
            Season::Winter,
            &["November"],
            "Hazaribagh",
            &["Hazaribagh"],
            "Harvest festival",
        ),
        Festival::new(
            "karma",
            "Karma",
            "करमा",
            Category::Tribal,
            Season::Monsoon,
            &["August"],
            "Gumla",
            &["Gumla"],
            "Tree festival",
        ),
    ]
}

#[test]
fn test_search_scenario() {
    let list = three_festivals();
    let result = filter_festivals(&list, &FilterOptions::new().with_search("sar"));
    let names: Vec<_> = result.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Sarhul"]);
}

#[test]
fn test_month_scenario() {
    let list = three_festivals();
    let result = filter_festivals(&list, &FilterOptions::new().with_month("August"));
    let names: Vec<_> = result.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Karma"]);
}

#[test]
fn test_no_match_scenario() {
    let list = three_festivals();
    let criteria = FilterOptions::new()
        .with_category(Category::Religious)
        .with_season(Season::Spring);
    assert!(filter_festivals(&list, &criteria).is_empty());
}

#[test]
fn test_catalog_facets_cover_calendar() {
    let f = facets(festivals());
    assert_eq!(f.categories.len(), Category::ALL.len());
    assert_eq!(f.seasons.len(), Season::ALL.len());
    assert!(f.districts.contains(&"Ranchi".to_string()));
    // Every facet value selects at least one festival
    for month in &f.months {
        assert!(!filter_festivals(festivals(), &FilterOptions::new().with_month(month.clone())).is_empty());
    }
}
