use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, NewCatalogEntry},
    services::video::normalize_video_url,
};

/// Source of catalog snapshots
///
/// `list_entries` must return entries in a stable order: recommendation fallback
/// padding follows it, so two calls over an unchanged catalog give the same result.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Returns the full catalog in catalog order
    async fn list_entries(&self) -> AppResult<Vec<CatalogEntry>>;

    async fn get_entry(&self, id: &str) -> AppResult<Option<CatalogEntry>>;

    /// Stores a new entry with a fresh id and a zero rating
    async fn insert_entry(&self, fields: NewCatalogEntry) -> AppResult<CatalogEntry>;

    /// Replaces the editable fields of an existing entry, keeping its id and rating
    async fn update_entry(&self, id: &str, fields: NewCatalogEntry) -> AppResult<CatalogEntry>;
}

/// Rejects entries that could never be matched or displayed, and stores Drive video
/// links in their embeddable form
pub fn prepare_entry(mut fields: NewCatalogEntry) -> AppResult<NewCatalogEntry> {
    if fields.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }
    fields.video_url = normalize_video_url(&fields.video_url);
    Ok(fields)
}

/// Catalog held in process memory, ordered by insertion
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    entries: Arc<RwLock<Vec<CatalogEntry>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Loads a JSON array of catalog entries from disk
    pub async fn from_seed_file(path: &str) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&raw)?;

        tracing::info!(path = %path, entries = entries.len(), "Seeded in-memory catalog");

        Ok(Self::with_entries(entries))
    }
}

#[async_trait::async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn list_entries(&self) -> AppResult<Vec<CatalogEntry>> {
        Ok(self.entries.read().await.clone())
    }

    async fn get_entry(&self, id: &str) -> AppResult<Option<CatalogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    async fn insert_entry(&self, fields: NewCatalogEntry) -> AppResult<CatalogEntry> {
        let fields = prepare_entry(fields)?;

        let entry = CatalogEntry::from_new(Uuid::new_v4().to_string(), 0.0, fields);
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn update_entry(&self, id: &str, fields: NewCatalogEntry) -> AppResult<CatalogEntry> {
        let fields = prepare_entry(fields)?;

        let mut entries = self.entries.write().await;
        let existing = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Title {} not found", id)))?;

        *existing = CatalogEntry::from_new(existing.id.clone(), existing.rating, fields);
        Ok(existing.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> NewCatalogEntry {
        NewCatalogEntry {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_zero_rating() {
        let catalog = InMemoryCatalog::new();

        let entry = catalog.insert_entry(fields("Cosmic Odyssey")).await.unwrap();

        assert!(Uuid::parse_str(&entry.id).is_ok());
        assert_eq!(entry.rating, 0.0);
        assert_eq!(
            catalog.get_entry(&entry.id).await.unwrap(),
            Some(entry.clone())
        );
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let catalog = InMemoryCatalog::new();
        for title in ["C", "A", "B"] {
            catalog.insert_entry(fields(title)).await.unwrap();
        }

        let titles: Vec<String> = catalog
            .list_entries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();

        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_title() {
        let catalog = InMemoryCatalog::new();

        let result = catalog.insert_entry(fields("   ")).await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert!(catalog.list_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_rating() {
        let mut existing = CatalogEntry::new("m1", "Old Title");
        existing.rating = 4.5;
        let catalog = InMemoryCatalog::with_entries(vec![existing]);

        let updated = catalog
            .update_entry("m1", fields("New Title"))
            .await
            .unwrap();

        assert_eq!(updated.id, "m1");
        assert_eq!(updated.title, "New Title");
        assert_eq!(updated.rating, 4.5);
    }

    #[tokio::test]
    async fn test_drive_links_are_stored_as_embeds() {
        let catalog = InMemoryCatalog::new();

        let created = catalog
            .insert_entry(NewCatalogEntry {
                video_url: "https://drive.google.com/file/d/abc123/view?usp=sharing".to_string(),
                ..fields("Cosmic Odyssey")
            })
            .await
            .unwrap();
        assert_eq!(
            created.video_url,
            "https://drive.google.com/file/d/abc123/preview"
        );

        let updated = catalog
            .update_entry(
                &created.id,
                NewCatalogEntry {
                    video_url: "https://drive.google.com/open?id=xyz789".to_string(),
                    ..fields("Cosmic Odyssey")
                },
            )
            .await
            .unwrap();
        assert_eq!(
            updated.video_url,
            "https://drive.google.com/file/d/xyz789/preview"
        );
    }

    #[tokio::test]
    async fn test_other_video_urls_are_kept() {
        let catalog = InMemoryCatalog::new();

        let created = catalog
            .insert_entry(NewCatalogEntry {
                video_url: "https://cdn.example.com/heat.mp4".to_string(),
                ..fields("Heat")
            })
            .await
            .unwrap();

        assert_eq!(created.video_url, "https://cdn.example.com/heat.mp4");
    }

    #[tokio::test]
    async fn test_update_missing_entry() {
        let catalog = InMemoryCatalog::new();

        let result = catalog.update_entry("missing", fields("Title")).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
