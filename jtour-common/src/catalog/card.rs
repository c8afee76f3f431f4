//! Carousel cards and slideshow state
//!
//! Cards are a closed set of variants so each view receives exactly the
//! fields it renders.

use serde::Serialize;

use super::city::{City, Cuisine, Place};
use super::festival::Festival;

/// A card in a carousel or grid, tagged by content kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentCard {
    Festival {
        id: String,
        title: String,
        subtitle: String,
        image: String,
        months: Vec<String>,
    },
    City {
        id: String,
        title: String,
        subtitle: String,
        image: String,
        district: String,
    },
    Place {
        id: String,
        title: String,
        subtitle: String,
        image: String,
        best_time: String,
    },
    Cuisine {
        id: String,
        title: String,
        subtitle: String,
        image: String,
        vegetarian: bool,
    },
}

impl ContentCard {
    pub fn id(&self) -> &str {
        match self {
            ContentCard::Festival { id, .. }
            | ContentCard::City { id, .. }
            | ContentCard::Place { id, .. }
            | ContentCard::Cuisine { id, .. } => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ContentCard::Festival { title, .. }
            | ContentCard::City { title, .. }
            | ContentCard::Place { title, .. }
            | ContentCard::Cuisine { title, .. } => title,
        }
    }
}

impl From<&Festival> for ContentCard {
    fn from(f: &Festival) -> Self {
        ContentCard::Festival {
            id: f.id.clone(),
            title: f.name.clone(),
            subtitle: f.short_description.clone(),
            image: f.image.clone(),
            months: f.months.clone(),
        }
    }
}

impl From<&City> for ContentCard {
    fn from(c: &City) -> Self {
        ContentCard::City {
            id: c.id.to_string(),
            title: c.name.to_string(),
            subtitle: c.tagline.to_string(),
            image: c.image.to_string(),
            district: c.district.to_string(),
        }
    }
}

impl From<&Place> for ContentCard {
    fn from(p: &Place) -> Self {
        ContentCard::Place {
            id: p.id.to_string(),
            title: p.name.to_string(),
            subtitle: p.description.to_string(),
            image: p.image.to_string(),
            best_time: p.best_time.to_string(),
        }
    }
}

impl From<&Cuisine> for ContentCard {
    fn from(c: &Cuisine) -> Self {
        ContentCard::Cuisine {
            id: c.id.to_string(),
            title: c.name.to_string(),
            subtitle: c.description.to_string(),
            image: c.image.to_string(),
            vegetarian: c.vegetarian,
        }
    }
}

/// Home page carousel: interleaves festivals, cities, places and dishes
///
/// Takes up to `per_kind` of each kind, round-robin, so adjacent slides differ.
pub fn highlights(per_kind: usize) -> Vec<ContentCard> {
    let festivals: Vec<ContentCard> = super::festivals().iter().take(per_kind).map(Into::into).collect();
    let cities: Vec<ContentCard> = super::CITIES.iter().take(per_kind).map(Into::into).collect();
    let places: Vec<ContentCard> = super::PLACES.iter().take(per_kind).map(Into::into).collect();
    let dishes: Vec<ContentCard> = super::CUISINES.iter().take(per_kind).map(Into::into).collect();

    let mut lanes = [
        festivals.into_iter(),
        cities.into_iter(),
        places.into_iter(),
        dishes.into_iter(),
    ];

    let mut cards = Vec::new();
    loop {
        let before = cards.len();
        for lane in lanes.iter_mut() {
            if let Some(card) = lane.next() {
                cards.push(card);
            }
        }
        if cards.len() == before {
            break;
        }
    }
    cards
}

/// Slideshow position over a fixed number of slides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slide, None when there are no slides
    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    pub fn next(&mut self) -> Option<usize> {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.current()
    }

    pub fn prev(&mut self) -> Option<usize> {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.current()
    }

    /// Jump to a slide; out-of-range targets are ignored
    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        if index < self.len {
            self.index = index;
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carousel_wraps_forward_and_back() {
        let mut c = Carousel::new(3);
        assert_eq!(c.current(), Some(0));
        assert_eq!(c.next(), Some(1));
        assert_eq!(c.next(), Some(2));
        assert_eq!(c.next(), Some(0));
        assert_eq!(c.prev(), Some(2));
    }

    #[test]
    fn test_carousel_empty() {
        let mut c = Carousel::new(0);
        assert!(c.is_empty());
        assert_eq!(c.current(), None);
        assert_eq!(c.next(), None);
        assert_eq!(c.prev(), None);
    }

    #[test]
    fn test_carousel_go_to_ignores_out_of_range() {
        let mut c = Carousel::new(4);
        assert_eq!(c.go_to(2), Some(2));
        assert_eq!(c.go_to(9), Some(2));
    }

    #[test]
    fn test_highlights_interleave_kinds() {
        let cards = highlights(2);
        assert_eq!(cards.len(), 8);
        assert!(matches!(cards[0], ContentCard::Festival { .. }));
        assert!(matches!(cards[1], ContentCard::City { .. }));
        assert!(matches!(cards[2], ContentCard::Place { .. }));
        assert!(matches!(cards[3], ContentCard::Cuisine { .. }));
        assert!(matches!(cards[4], ContentCard::Festival { .. }));
    }

    #[test]
    fn test_card_serializes_with_kind_tag() {
        let card = ContentCard::from(&super::super::CUISINES[0]);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["kind"], "cuisine");
        assert_eq!(json["vegetarian"], true);
        assert_eq!(card.title(), "Dhuska");
    }
}
