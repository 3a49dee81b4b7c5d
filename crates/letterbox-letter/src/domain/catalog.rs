//! Option catalogs for the letter wizard.
//!
//! Catalogs are read-only and built once at startup. The order draft only
//! stores identifiers; anything that needs an entry's details looks it up
//! here and gets an explicit [`DomainError::CatalogEntryNotFound`] for ids
//! the catalog does not know.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use letterbox_core::error::DomainError;
use serde::{Deserialize, Serialize};

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

catalog_id!(
    /// Identifies a cover template.
    CoverId
);
catalog_id!(
    /// Identifies a background pattern.
    BackgroundId
);
catalog_id!(
    /// Identifies a mini-game.
    GameId
);
catalog_id!(
    /// Identifies a preset delivery address.
    AddressId
);

/// An entry that can be looked up in a [`Catalog`].
pub trait CatalogEntry {
    /// The identifier type entries are keyed by.
    type Id: Clone + Eq + Hash + fmt::Display;

    /// Catalog name used in error messages.
    const CATALOG: &'static str;

    /// The entry's identifier.
    fn id(&self) -> &Self::Id;
}

/// An ordered, id-indexed collection of catalog entries.
#[derive(Debug, Clone)]
pub struct Catalog<T: CatalogEntry> {
    entries: Vec<T>,
    index: HashMap<T::Id, usize>,
}

impl<T: CatalogEntry> Catalog<T> {
    /// Builds a catalog, keeping entries in the given display order. A later
    /// entry with a duplicate id replaces the earlier one in lookups.
    #[must_use]
    pub fn from_entries(entries: Vec<T>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.id().clone(), position))
            .collect();
        Self { entries, index }
    }

    /// Looks up an entry by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CatalogEntryNotFound` if no entry has the id.
    pub fn get(&self, id: &T::Id) -> Result<&T, DomainError> {
        self.index
            .get(id)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| DomainError::CatalogEntryNotFound {
                catalog: T::CATALOG,
                id: id.to_string(),
            })
    }

    /// Whether an entry with the id exists.
    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.index.contains_key(id)
    }

    /// All entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}

/// A letter cover template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cover {
    /// Identifier.
    pub id: CoverId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
}

impl CatalogEntry for Cover {
    type Id = CoverId;
    const CATALOG: &'static str = "cover";

    fn id(&self) -> &CoverId {
        &self.id
    }
}

/// A paper background pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Background {
    /// Identifier.
    pub id: BackgroundId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
}

impl CatalogEntry for Background {
    type Id = BackgroundId;
    const CATALOG: &'static str = "background";

    fn id(&self) -> &BackgroundId {
        &self.id
    }
}

/// How hard a mini-game is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Medium.
    Medium,
    /// Hard.
    Hard,
}

/// A mini-game that can be attached to a letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    /// Identifier.
    pub id: GameId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Typical play time, e.g. `"5-10 minutes"`.
    pub estimated_time: String,
}

impl CatalogEntry for Game {
    type Id = GameId;
    const CATALOG: &'static str = "game";

    fn id(&self) -> &GameId {
        &self.id
    }
}

/// A preset delivery address in South Korea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetAddress {
    /// Identifier.
    pub id: AddressId,
    /// District (`-gu`).
    pub district: String,
    /// City.
    pub city: String,
    /// Full street address with postal code.
    pub address: String,
    /// Short description of the area.
    pub description: String,
}

impl CatalogEntry for PresetAddress {
    type Id = AddressId;
    const CATALOG: &'static str = "address";

    fn id(&self) -> &AddressId {
        &self.id
    }
}

/// A photo from the sample gallery, keyed by its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SamplePhoto {
    /// Image URL.
    pub url: String,
}

impl CatalogEntry for SamplePhoto {
    type Id = String;
    const CATALOG: &'static str = "photo";

    fn id(&self) -> &String {
        &self.url
    }
}

/// Every catalog the wizard offers.
#[derive(Debug, Clone)]
pub struct Catalogs {
    /// Cover templates.
    pub covers: Catalog<Cover>,
    /// Background patterns.
    pub backgrounds: Catalog<Background>,
    /// Mini-games.
    pub games: Catalog<Game>,
    /// Preset delivery addresses.
    pub addresses: Catalog<PresetAddress>,
    /// Sample photo gallery.
    pub photos: Catalog<SamplePhoto>,
}

impl Catalogs {
    /// The built-in catalogs.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            covers: Catalog::from_entries(standard_covers()),
            backgrounds: Catalog::from_entries(standard_backgrounds()),
            games: Catalog::from_entries(standard_games()),
            addresses: Catalog::from_entries(standard_addresses()),
            photos: Catalog::from_entries(standard_photos()),
        }
    }
}

fn standard_covers() -> Vec<Cover> {
    [
        ("romantic", "Romantic", "Perfect for love letters"),
        ("birthday", "Birthday", "Made for birthday wishes"),
        ("holiday", "Holiday", "For special holidays"),
        ("business", "Business", "Professional style"),
        ("friendship", "Friendship", "For close friends"),
        ("family", "Family", "Letters to the people at home"),
    ]
    .into_iter()
    .map(|(id, name, description)| Cover {
        id: CoverId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
    })
    .collect()
}

fn standard_backgrounds() -> Vec<Background> {
    [
        ("lined", "Lined paper", "Traditional lined paper"),
        ("dotted", "Dotted paper", "Modern dotted paper"),
        ("grid", "Grid paper", "Handy squared paper"),
        ("vintage", "Vintage paper", "Warm vintage paper"),
        ("floral", "Floral", "Elegant floral pattern"),
        ("simple", "Simple", "Plain white background"),
    ]
    .into_iter()
    .map(|(id, name, description)| Background {
        id: BackgroundId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
    })
    .collect()
}

fn standard_games() -> Vec<Game> {
    use Difficulty::{Easy, Hard, Medium};

    [
        ("puzzle", "Jigsaw Puzzle", "Puzzle game from your photos", Easy, "5-10 minutes"),
        ("memory", "Memory Game", "Card matching memory game", Medium, "3-7 minutes"),
        ("wordsearch", "Word Search", "Find hidden words in letter grid", Medium, "10-15 minutes"),
        ("love-quiz", "Love Quiz", "Fun questions for couples", Easy, "5-8 minutes"),
        ("crossword", "Crossword", "Custom crossword puzzle", Hard, "15-20 minutes"),
        ("trivia", "Fun Trivia", "Interesting questions about life", Easy, "5-12 minutes"),
    ]
    .into_iter()
    .map(|(id, name, description, difficulty, estimated_time)| Game {
        id: GameId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        difficulty,
        estimated_time: estimated_time.to_owned(),
    })
    .collect()
}

fn standard_addresses() -> Vec<PresetAddress> {
    [
        (
            "seoul-gangnam",
            "Gangnam-gu",
            "Seoul",
            "123 Gangnam-daero, Gangnam-gu, Seoul 06283",
            "Popular shopping and business district",
        ),
        (
            "seoul-hongdae",
            "Mapo-gu",
            "Seoul",
            "456 Hongik-ro, Mapo-gu, Seoul 04062",
            "University area with vibrant nightlife",
        ),
        (
            "seoul-myeongdong",
            "Jung-gu",
            "Seoul",
            "789 Myeongdong-gil, Jung-gu, Seoul 04537",
            "Famous shopping district",
        ),
        (
            "busan-haeundae",
            "Haeundae-gu",
            "Busan",
            "321 Haeundae-ro, Haeundae-gu, Busan 48094",
            "Beautiful beach area",
        ),
        (
            "busan-seomyeon",
            "Busanjin-gu",
            "Busan",
            "654 Seomyeon-ro, Busanjin-gu, Busan 47285",
            "Central business district",
        ),
        (
            "incheon-songdo",
            "Yeonsu-gu",
            "Incheon",
            "987 Songdogukje-daero, Yeonsu-gu, Incheon 21984",
            "Modern international business district",
        ),
        (
            "daegu-dongseong",
            "Jung-gu",
            "Daegu",
            "147 Dongseong-ro, Jung-gu, Daegu 41911",
            "Historic downtown area",
        ),
        (
            "daejeon-dunsan",
            "Seo-gu",
            "Daejeon",
            "258 Dunsan-ro, Seo-gu, Daejeon 35229",
            "Government and business hub",
        ),
        (
            "gwangju-sangmu",
            "Seo-gu",
            "Gwangju",
            "369 Sangmu-daero, Seo-gu, Gwangju 61949",
            "Cultural and administrative center",
        ),
        (
            "ulsan-samsan",
            "Nam-gu",
            "Ulsan",
            "741 Samsan-ro, Nam-gu, Ulsan 44776",
            "Industrial city center",
        ),
    ]
    .into_iter()
    .map(|(id, district, city, address, description)| PresetAddress {
        id: AddressId::from(id),
        district: district.to_owned(),
        city: city.to_owned(),
        address: address.to_owned(),
        description: description.to_owned(),
    })
    .collect()
}

fn standard_photos() -> Vec<SamplePhoto> {
    [
        "photo-1516589178581-6cd7833ae3b2",
        "photo-1469474968028-56623f02e42e",
        "photo-1506905925346-21bda4d32df4",
        "photo-1441974231531-c6227db76b6e",
        "photo-1470071459604-3b5ec3a7fe05",
        "photo-1501594907352-04cda38ebc29",
    ]
    .into_iter()
    .map(|photo| SamplePhoto {
        url: format!("https://images.unsplash.com/{photo}?w=300&h=200&fit=crop"),
    })
    .collect()
}
