//! Artwork records and their wire schema.

use serde::Deserialize;

use super::Identified;
use super::ItemId;

/// Title used when the API omits one.
pub const DEFAULT_TITLE: &str = "Untitled";
/// Place of origin used when the API omits one.
pub const DEFAULT_PLACE_OF_ORIGIN: &str = "Unknown";
/// Artist line used when the API omits one.
pub const DEFAULT_ARTIST_DISPLAY: &str = "Unknown Artist";
/// Inscriptions text used when the API omits it.
pub const DEFAULT_INSCRIPTIONS: &str = "None";

/// Fields requested from the artworks endpoint.
pub const ARTWORK_FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// A fully populated artwork.
///
/// Every display field has a value: missing, `null` or empty fields in the
/// API payload are replaced with the `DEFAULT_*` constants (and `0` for dates)
/// when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ArtworkRecord")]
pub struct Artwork {
    pub id: ItemId,
    pub title: String,
    pub place_of_origin: String,
    pub artist_display: String,
    pub inscriptions: String,
    pub date_start: i64,
    pub date_end: i64,
}

impl Artwork {
    /// Creates an artwork with the given id and default display fields.
    pub fn new(id: impl Into<ItemId>) -> Self {
        ArtworkRecord {
            id: id.into(),
            ..Default::default()
        }
        .into()
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the artist line.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist_display = artist.into();
        self
    }

    /// Sets the start and end dates.
    pub fn with_dates(mut self, start: i64, end: i64) -> Self {
        self.date_start = start;
        self.date_end = end;
        self
    }
}

impl Identified for Artwork {
    fn id(&self) -> ItemId {
        self.id
    }
}

/// Artwork as the API sends it, every display field optional.
#[derive(Debug, Default, Deserialize)]
struct ArtworkRecord {
    id: ItemId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    place_of_origin: Option<String>,
    #[serde(default)]
    artist_display: Option<String>,
    #[serde(default)]
    inscriptions: Option<String>,
    #[serde(default)]
    date_start: Option<i64>,
    #[serde(default)]
    date_end: Option<i64>,
}

fn text_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => default.to_string(),
    }
}

impl From<ArtworkRecord> for Artwork {
    fn from(record: ArtworkRecord) -> Self {
        Self {
            id: record.id,
            title: text_or(record.title, DEFAULT_TITLE),
            place_of_origin: text_or(record.place_of_origin, DEFAULT_PLACE_OF_ORIGIN),
            artist_display: text_or(record.artist_display, DEFAULT_ARTIST_DISPLAY),
            inscriptions: text_or(record.inscriptions, DEFAULT_INSCRIPTIONS),
            date_start: record.date_start.unwrap_or(0),
            date_end: record.date_end.unwrap_or(0),
        }
    }
}
