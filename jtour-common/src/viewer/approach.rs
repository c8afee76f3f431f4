//! Candidate embed URLs tried by the map viewer
//!
//! Approaches are plain configuration: a URL template with `{lat}`, `{lng}`
//! and `{key}` placeholders. Templates that need an API key are dropped when
//! none is configured.

use serde::{Deserialize, Serialize};

use crate::catalog::Coordinates;

/// One candidate embed configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approach {
    pub name: String,
    pub template: String,
    #[serde(default)]
    pub requires_key: bool,
}

impl Approach {
    pub fn new(name: &str, template: &str, requires_key: bool) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
            requires_key,
        }
    }

    /// Fill in the placeholders
    pub fn render(&self, coords: Coordinates, api_key: Option<&str>) -> String {
        self.template
            .replace("{lat}", &coords.lat().to_string())
            .replace("{lng}", &coords.lng().to_string())
            .replace("{key}", api_key.unwrap_or_default())
    }
}

/// An approach with its URL rendered for a specific location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedApproach {
    pub name: String,
    pub url: String,
}

/// Default chain: keyed street view, keyed satellite, keyed place pin, keyless embed
pub fn default_approaches() -> Vec<Approach> {
    vec![
        Approach::new(
            "street-view",
            "https://www.google.com/maps/embed/v1/streetview?key={key}&location={lat},{lng}&heading=210&pitch=10&fov=90",
            true,
        ),
        Approach::new(
            "satellite-view",
            "https://www.google.com/maps/embed/v1/view?key={key}&center={lat},{lng}&zoom=18&maptype=satellite",
            true,
        ),
        Approach::new(
            "place",
            "https://www.google.com/maps/embed/v1/place?key={key}&q={lat},{lng}&zoom=15",
            true,
        ),
        Approach::new(
            "classic-embed",
            "https://maps.google.com/maps?q={lat},{lng}&z=15&output=embed",
            false,
        ),
    ]
}

/// Render the usable approaches for `coords`, in order
///
/// A blank key counts as no key.
pub fn resolve_approaches(
    approaches: &[Approach],
    coords: Coordinates,
    api_key: Option<&str>,
) -> Vec<ResolvedApproach> {
    let api_key = api_key.map(str::trim).filter(|k| !k.is_empty());
    approaches
        .iter()
        .filter(|a| !a.requires_key || api_key.is_some())
        .map(|a| ResolvedApproach {
            name: a.name.clone(),
            url: a.render(coords, api_key),
        })
        .collect()
}

/// Escape hatch offered once every approach failed: open in a maps app
pub fn external_map_url(coords: Coordinates) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        coords.lat(),
        coords.lng()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranchi() -> Coordinates {
        Coordinates::new(23.35, 85.33).unwrap()
    }

    #[test]
    fn test_without_key_only_keyless_approaches_remain() {
        let resolved = resolve_approaches(&default_approaches(), ranchi(), None);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "classic-embed");
        assert_eq!(resolved[0].url, "https://maps.google.com/maps?q=23.35,85.33&z=15&output=embed");
    }

    #[test]
    fn test_blank_key_is_treated_as_missing() {
        let resolved = resolve_approaches(&default_approaches(), ranchi(), Some("  "));
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn test_with_key_all_approaches_in_order() {
        let resolved = resolve_approaches(&default_approaches(), ranchi(), Some("abc123"));
        let names: Vec<_> = resolved.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["street-view", "satellite-view", "place", "classic-embed"]);
        assert!(resolved[0].url.contains("key=abc123"));
        assert!(resolved[0].url.contains("location=23.35,85.33"));
    }

    #[test]
    fn test_external_map_url() {
        assert_eq!(
            external_map_url(ranchi()),
            "https://www.google.com/maps/search/?api=1&query=23.35,85.33"
        );
    }
}
