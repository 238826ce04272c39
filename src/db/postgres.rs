use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, NewCatalogEntry},
    services::catalog::{prepare_entry, CatalogProvider},
};

const ENTRY_COLUMNS: &str = r#"
    id, title, description, long_description, year, genre, cast_members, rating,
    duration, thumbnail_url, hero_image_url, card_image_hint, hero_image_hint, video_url
"#;

/// Creates a PostgreSQL connection pool
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Catalog stored in the `movies` table
///
/// Catalog order is insertion order (`created_at`, then `id` to break ties).
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for PgCatalog {
    async fn list_entries(&self) -> AppResult<Vec<CatalogEntry>> {
        let query = format!(
            "SELECT {} FROM movies ORDER BY created_at, id",
            ENTRY_COLUMNS
        );
        let entries = sqlx::query_as::<_, CatalogEntry>(&query)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(entries = entries.len(), "Loaded catalog snapshot");

        Ok(entries)
    }

    async fn get_entry(&self, id: &str) -> AppResult<Option<CatalogEntry>> {
        let query = format!("SELECT {} FROM movies WHERE id = $1", ENTRY_COLUMNS);
        let entry = sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    async fn insert_entry(&self, fields: NewCatalogEntry) -> AppResult<CatalogEntry> {
        let fields = prepare_entry(fields)?;

        let query = format!(
            r#"
            INSERT INTO movies (
                id, title, description, long_description, year, genre, cast_members, rating,
                duration, thumbnail_url, hero_image_url, card_image_hint, hero_image_hint,
                video_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            ENTRY_COLUMNS
        );

        let entry = sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(Uuid::new_v4().to_string())
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.long_description)
            .bind(fields.year)
            .bind(&fields.genre)
            .bind(&fields.cast)
            .bind(&fields.duration)
            .bind(&fields.thumbnail_url)
            .bind(&fields.hero_image_url)
            .bind(&fields.card_image_hint)
            .bind(&fields.hero_image_hint)
            .bind(&fields.video_url)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(id = %entry.id, title = %entry.title, "Catalog entry created");

        Ok(entry)
    }

    async fn update_entry(&self, id: &str, fields: NewCatalogEntry) -> AppResult<CatalogEntry> {
        let fields = prepare_entry(fields)?;

        let query = format!(
            r#"
            UPDATE movies SET
                title = $2, description = $3, long_description = $4, year = $5, genre = $6,
                cast_members = $7, duration = $8, thumbnail_url = $9, hero_image_url = $10,
                card_image_hint = $11, hero_image_hint = $12, video_url = $13
            WHERE id = $1
            RETURNING {}
            "#,
            ENTRY_COLUMNS
        );

        let entry = sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(id)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.long_description)
            .bind(fields.year)
            .bind(&fields.genre)
            .bind(&fields.cast)
            .bind(&fields.duration)
            .bind(&fields.thumbnail_url)
            .bind(&fields.hero_image_url)
            .bind(&fields.card_image_hint)
            .bind(&fields.hero_image_hint)
            .bind(&fields.video_url)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Title {} not found", id)))?;

        tracing::info!(id = %entry.id, "Catalog entry updated");

        Ok(entry)
    }
}
