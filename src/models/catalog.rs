use serde::{Deserialize, Serialize};

/// A movie or series available in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Opaque unique identifier
    pub id: String,
    /// Display title, also the key used when matching suggestions
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    #[sqlx(rename = "cast_members")]
    pub cast: Vec<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub hero_image_url: String,
    #[serde(default)]
    pub card_image_hint: String,
    #[serde(default)]
    pub hero_image_hint: String,
    /// Playable source; Drive share links are stored in embed form
    #[serde(default)]
    pub video_url: String,
}

/// Fields supplied when creating or editing a catalog entry.
///
/// The id is assigned by the catalog and the rating starts at zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogEntry {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub hero_image_url: String,
    #[serde(default)]
    pub card_image_hint: String,
    #[serde(default)]
    pub hero_image_hint: String,
    #[serde(default)]
    pub video_url: String,
}

impl CatalogEntry {
    /// Creates an entry carrying only an id and a title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            long_description: String::new(),
            year: 0,
            genre: Vec::new(),
            cast: Vec::new(),
            rating: 0.0,
            duration: String::new(),
            thumbnail_url: String::new(),
            hero_image_url: String::new(),
            card_image_hint: String::new(),
            hero_image_hint: String::new(),
            video_url: String::new(),
        }
    }

    /// Builds a stored entry from submitted fields
    pub fn from_new(id: String, rating: f32, fields: NewCatalogEntry) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            long_description: fields.long_description,
            year: fields.year,
            genre: fields.genre,
            cast: fields.cast,
            rating,
            duration: fields.duration,
            thumbnail_url: fields.thumbnail_url,
            hero_image_url: fields.hero_image_url,
            card_image_hint: fields.card_image_hint,
            hero_image_hint: fields.hero_image_hint,
            video_url: fields.video_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_uses_camel_case() {
        let mut entry = CatalogEntry::new("m1", "Cosmic Odyssey");
        entry.long_description = "A long trip".to_string();

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], "m1");
        assert_eq!(json["longDescription"], "A long trip");
        assert!(json.get("long_description").is_none());
    }

    #[test]
    fn test_entry_deserializes_with_missing_optional_fields() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"id": "m2", "title": "City of Shadows"}"#).unwrap();

        assert_eq!(entry, CatalogEntry::new("m2", "City of Shadows"));
    }

    #[test]
    fn test_from_new_keeps_fields() {
        let fields = NewCatalogEntry {
            title: "Fist of the Dragon".to_string(),
            year: 1999,
            genre: vec!["Action".to_string()],
            ..Default::default()
        };

        let entry = CatalogEntry::from_new("m3".to_string(), 0.0, fields);

        assert_eq!(entry.id, "m3");
        assert_eq!(entry.title, "Fist of the Dragon");
        assert_eq!(entry.year, 1999);
        assert_eq!(entry.genre, vec!["Action".to_string()]);
        assert_eq!(entry.rating, 0.0);
    }

    #[test]
    fn test_video_url_is_camel_case() {
        let fields: NewCatalogEntry = serde_json::from_str(
            r#"{"title": "Heat", "videoUrl": "https://cdn.example.com/heat.mp4"}"#,
        )
        .unwrap();

        let entry = CatalogEntry::from_new("m4".to_string(), 0.0, fields);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["videoUrl"], "https://cdn.example.com/heat.mp4");
    }
}
