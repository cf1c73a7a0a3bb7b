//! Repository for the `item_tags` and `item_tag_links` tables.
//!
//! Every name passed in is normalized (trimmed, lowercased) before it reaches
//! SQL; the table's check constraint rejects anything that slips through.

use sqlx::{PgConnection, PgPool};
use stockroom_core::tags::normalize_tag_name;
use stockroom_core::types::DbId;

use crate::error::RepoError;
use crate::models::item_tag::ItemTag;
use crate::models::Page;

/// Column list for `item_tags` queries, including the aggregated item ids.
const COLUMNS: &str = "\
    t.name::TEXT AS name, \
    ARRAY(SELECT l.item_id FROM item_tag_links l \
          WHERE l.tag_name = t.name ORDER BY l.item_id) AS item_set, \
    t.created_at";

/// Provides CRUD operations for item tags and item-tag associations.
pub struct ItemTagRepo;

impl ItemTagRepo {
    /// Create a tag or return the existing one if the normalized name exists.
    ///
    /// Uses `ON CONFLICT` for idempotent creation.
    pub async fn create_or_get(pool: &PgPool, name: &str) -> Result<ItemTag, RepoError> {
        let normalized = normalize_tag_name(name)?;

        sqlx::query("INSERT INTO item_tags (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(&normalized)
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM item_tags t WHERE t.name = $1");
        let tag = sqlx::query_as::<_, ItemTag>(&query)
            .bind(&normalized)
            .fetch_one(pool)
            .await?;
        Ok(tag)
    }

    /// Find a tag by name. The name is normalized before lookup.
    pub async fn find(pool: &PgPool, name: &str) -> Result<Option<ItemTag>, RepoError> {
        let normalized = normalize_tag_name(name)?;
        let query = format!("SELECT {COLUMNS} FROM item_tags t WHERE t.name = $1");
        let tag = sqlx::query_as::<_, ItemTag>(&query)
            .bind(&normalized)
            .fetch_optional(pool)
            .await?;
        Ok(tag)
    }

    /// List tags alphabetically with pagination.
    pub async fn list(pool: &PgPool, page: &Page) -> Result<Vec<ItemTag>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM item_tags t ORDER BY t.name LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ItemTag>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Delete a tag. Cascade deletes its item associations, never the items.
    ///
    /// Returns `true` if a tag was deleted.
    pub async fn delete(pool: &PgPool, name: &str) -> Result<bool, RepoError> {
        let normalized = normalize_tag_name(name)?;
        let result = sqlx::query("DELETE FROM item_tags WHERE name = $1")
            .bind(&normalized)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Make `names` the exact tag set of `item_id`.
    ///
    /// `names` must already be normalized. Missing tags are created; links not
    /// in `names` are removed.
    pub async fn set_item_tags(
        conn: &mut PgConnection,
        item_id: DbId,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM item_tag_links WHERE item_id = $1 AND NOT (tag_name = ANY($2))")
            .bind(item_id)
            .bind(names)
            .execute(&mut *conn)
            .await?;

        if names.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO item_tags (name) SELECT UNNEST($1::TEXT[]) \
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(names)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            "INSERT INTO item_tag_links (item_id, tag_name) SELECT $1, UNNEST($2::TEXT[]) \
             ON CONFLICT (item_id, tag_name) DO NOTHING",
        )
        .bind(item_id)
        .bind(names)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
