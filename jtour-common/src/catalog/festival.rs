//! Festival records and the compiled-in festival calendar

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Calendar month names in order, as used in festival month lists
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Festival category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tribal,
    Religious,
    Harvest,
    Seasonal,
    Cultural,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Tribal,
        Category::Religious,
        Category::Harvest,
        Category::Seasonal,
        Category::Cultural,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tribal => "tribal",
            Category::Religious => "religious",
            Category::Harvest => "harvest",
            Category::Seasonal => "seasonal",
            Category::Cultural => "cultural",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the wire form. Matching is case-sensitive: "Tribal" is rejected.
impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown festival category: {}", s)))
    }
}

/// Season a festival falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Monsoon,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Monsoon, Season::Winter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Monsoon => "monsoon",
            Season::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown festival season: {}", s)))
    }
}

/// Where a festival is celebrated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestivalLocation {
    /// Primary place name (town, temple or region)
    pub primary: String,
    /// Districts where the festival is observed
    pub districts: Vec<String>,
}

/// A single festival in the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Festival {
    pub id: String,
    pub name: String,
    /// Name in Hindi or the local tribal language
    pub name_local: String,
    pub category: Category,
    pub season: Season,
    /// Month names in calendar order, spelled as in [`MONTHS`]
    pub months: Vec<String>,
    pub location: FestivalLocation,
    pub short_description: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub image: String,
}

impl Festival {
    /// Build a record from borrowed literals
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        name: &str,
        name_local: &str,
        category: Category,
        season: Season,
        months: &[&str],
        primary: &str,
        districts: &[&str],
        short_description: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            name_local: name_local.to_string(),
            category,
            season,
            months: months.iter().map(|m| m.to_string()).collect(),
            location: FestivalLocation {
                primary: primary.to_string(),
                districts: districts.iter().map(|d| d.to_string()).collect(),
            },
            short_description: short_description.to_string(),
            description: String::new(),
            highlights: Vec::new(),
            image: format!("/images/festivals/{}.jpg", id),
        }
    }

    fn with_details(mut self, description: &str, highlights: &[&str]) -> Self {
        self.description = description.to_string();
        self.highlights = highlights.iter().map(|h| h.to_string()).collect();
        self
    }
}

static FESTIVALS: Lazy<Vec<Festival>> = Lazy::new(|| {
    vec![
        Festival::new(
            "sarhul",
            "Sarhul",
            "सरहुल",
            Category::Tribal,
            Season::Spring,
            &["March", "April"],
            "Ranchi",
            &["Ranchi", "Gumla", "Lohardaga", "Khunti", "Simdega"],
            "Worship of the sal blossom marking the new year of the Oraon, Munda and Ho.",
        )
        .with_details(
            "Villages gather at the sarna sacred grove where the pahan offers sal flowers \
             to the village deity and forecasts the coming rains. Processions with mandar \
             drums wind through Ranchi on the main day.",
            &["Sal flower offerings", "Sarna grove rituals", "Mandar drum processions"],
        ),
        Festival::new(
            "karma",
            "Karma",
            "करमा",
            Category::Tribal,
            Season::Monsoon,
            &["August", "September"],
            "Ranchi",
            &["Ranchi", "Gumla", "Latehar", "Palamu", "Hazaribagh"],
            "Night-long dance around a karam branch for prosperity of siblings and crops.",
        )
        .with_details(
            "Young people fast and bring home a branch of the karam tree, which is planted \
             in the village akhra. The night is spent singing Karma songs and dancing in \
             interlocked rows.",
            &["Karam tree worship", "Akhra dances", "Jawa seedling baskets"],
        ),
        Festival::new(
            "sohrai",
            "Sohrai",
            "सोहराय",
            Category::Harvest,
            Season::Winter,
            &["October", "November"],
            "Hazaribagh",
            &["Hazaribagh", "Dumka", "Godda", "Pakur", "Sahebganj"],
            "Cattle festival after the paddy harvest, famous for Sohrai wall murals.",
        )
        .with_details(
            "Homes are replastered and painted with earth-pigment Sohrai art, cattle are \
             bathed and decorated, and the Santhal villages celebrate for five days.",
            &["Sohrai mural painting", "Cattle decoration", "Five days of dance"],
        ),
        Festival::new(
            "tusu",
            "Tusu Parab",
            "टुसू परब",
            Category::Harvest,
            Season::Winter,
            &["December", "January"],
            "Tamar",
            &["Ranchi", "East Singhbhum", "Saraikela Kharsawan", "Bokaro"],
            "Month-long harvest celebration ending on Makar Sankranti with chaudal floats.",
        )
        .with_details(
            "Unmarried girls keep a clay Tusu idol through Poush, singing folk songs each \
             evening. On Sankranti colourful chaudal structures are carried to the river.",
            &["Chaudal processions", "Tusu songs", "River immersion"],
        ),
        Festival::new(
            "chhath",
            "Chhath Puja",
            "छठ पूजा",
            Category::Religious,
            Season::Winter,
            &["October", "November"],
            "Ranchi",
            &["Ranchi", "Dhanbad", "Bokaro", "Deoghar", "Giridih"],
            "Four-day worship of the Sun God with offerings at river ghats and ponds.",
        )
        .with_details(
            "Devotees fast without water and offer arghya to the setting and rising sun \
             from the Hatania Talab and riverbanks across the state.",
            &["Sunset arghya", "Thekua prasad", "Ghat decorations"],
        ),
        Festival::new(
            "shravani-mela",
            "Shravani Mela",
            "श्रावणी मेला",
            Category::Religious,
            Season::Monsoon,
            &["July", "August"],
            "Deoghar",
            &["Deoghar", "Dumka"],
            "Kanwariyas walk 108 km carrying Ganga water to Baba Baidyanath Dham.",
        )
        .with_details(
            "Through the month of Shravan millions of saffron-clad pilgrims walk from \
             Sultanganj to the Baidyanath jyotirlinga in Deoghar.",
            &["Kanwar yatra", "Jalabhishek", "Month-long fair"],
        ),
        Festival::new(
            "mage-parab",
            "Mage Parab",
            "माघे परब",
            Category::Tribal,
            Season::Winter,
            &["January", "February"],
            "Chaibasa",
            &["West Singhbhum", "Saraikela Kharsawan", "Khunti"],
            "Ho celebration of the end of the agricultural year.",
        )
        .with_details(
            "The Ho community honours the village deity Desauli and celebrates with \
             feasts, rice beer and dances that continue for several days.",
            &["Desauli worship", "Ho folk dances"],
        ),
        Festival::new(
            "hal-punhya",
            "Hal Punhya",
            "हल पुन्ह्या",
            Category::Seasonal,
            Season::Winter,
            &["February"],
            "Jamshedpur",
            &["East Singhbhum", "West Singhbhum"],
            "First ploughing of the year, observed on the first day of Magh.",
        )
        .with_details(
            "Farmers mark the start of the ploughing season by ploughing two and a half \
             circles of their field as an auspicious beginning.",
            &["Ceremonial first ploughing"],
        ),
        Festival::new(
            "rohini",
            "Rohini",
            "रोहिणी",
            Category::Seasonal,
            Season::Summer,
            &["May", "June"],
            "Palamu",
            &["Palamu", "Garhwa", "Latehar"],
            "Seed-sowing festival heralding the monsoon.",
        )
        .with_details(
            "Seeds are sown in the fields while women sing Rohini songs; the day is also \
             the traditional start of the Jharkhand agricultural calendar.",
            &["Seed sowing", "Rohini songs"],
        ),
        Festival::new(
            "jitiya",
            "Jitiya",
            "जितिया",
            Category::Religious,
            Season::Monsoon,
            &["September"],
            "Dhanbad",
            &["Dhanbad", "Bokaro", "Ramgarh", "Palamu"],
            "Mothers fast for the long life of their children.",
        )
        .with_details(
            "A nirjala fast kept by mothers, followed by night-long Jitiya dances in the \
             villages of the Chotanagpur plateau.",
            &["Nirjala fast", "Jitiya dance"],
        ),
        Festival::new(
            "bandna",
            "Bandna",
            "बांदना",
            Category::Harvest,
            Season::Winter,
            &["November"],
            "Dumka",
            &["Dumka", "Jamtara", "Godda"],
            "Santhal cattle worship held on the new moon of Kartik.",
        )
        .with_details(
            "Cattle are anointed and garlanded, and the ohira songs are sung to thank the \
             animals for the year's harvest.",
            &["Ohira songs", "Cattle anointing"],
        ),
        Festival::new(
            "jharkhand-foundation-day",
            "Jharkhand Foundation Day",
            "झारखंड स्थापना दिवस",
            Category::Cultural,
            Season::Winter,
            &["November"],
            "Ranchi",
            &["Ranchi"],
            "Statehood anniversary on the birth anniversary of Birsa Munda.",
        )
        .with_details(
            "Cultural programmes at Morabadi ground and Birsa Munda memorials celebrate \
             the formation of the state on 15 November 2000.",
            &["Morabadi cultural programme", "Birsa Munda tributes"],
        ),
        Festival::new(
            "rath-yatra",
            "Jagannathpur Rath Yatra",
            "जगन्नाथपुर रथ यात्रा",
            Category::Religious,
            Season::Monsoon,
            &["June", "July"],
            "Jagannathpur",
            &["Ranchi"],
            "Chariot festival at the 17th century Jagannath temple of Ranchi.",
        )
        .with_details(
            "The deities are pulled to the mausibari on a towering chariot and a nine-day \
             fair fills the grounds below the hillock temple.",
            &["Chariot procession", "Nine-day fair"],
        ),
        Festival::new(
            "chotanagpur-folk-festival",
            "Chotanagpur Folk Festival",
            "छोटानागपुर लोक महोत्सव",
            Category::Cultural,
            Season::Spring,
            &["February", "March"],
            "Morabadi Ground",
            &["Ranchi", "Khunti"],
            "Showcase of Chhau, Paika and Jhumar dance troupes from across the state.",
        )
        .with_details(
            "A stage festival bringing together Seraikela Chhau masks, Paika martial \
             dances and Nagpuri Jhumar songs.",
            &["Seraikela Chhau", "Paika dance", "Craft bazaar"],
        ),
    ]
});

/// All festivals in calendar-display order
pub fn festivals() -> &'static [Festival] {
    FESTIVALS.as_slice()
}

/// Look up a festival by id
pub fn festival_by_id(id: &str) -> Option<&'static Festival> {
    FESTIVALS.iter().find(|f| f.id == id)
}
