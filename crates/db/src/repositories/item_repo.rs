//! Repository for the `items` table and its tag associations.

use sqlx::{PgConnection, PgPool};
use stockroom_core::metadata::empty_metadata;
use stockroom_core::tags::{normalize_tag_name, normalize_tag_set};
use stockroom_core::types::DbId;

use crate::error::RepoError;
use crate::models::item::{CreateItem, Item, ItemListParams, UpdateItem};
use crate::repositories::{ContainerRepo, ItemTagRepo};

/// Column list for `items` queries. Tags are aggregated per row.
const COLUMNS: &str = "\
    i.id, i.name, i.description, i.image, i.location, i.parent_id, i.metadata, \
    i.quantity, i.alert_quantity, i.source, i.source_url, \
    ARRAY(SELECT l.tag_name::TEXT FROM item_tag_links l \
          WHERE l.item_id = i.id ORDER BY l.tag_name) AS tags, \
    i.created_at, i.updated_at";

/// Provides CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item with its tags, returning the created row.
    ///
    /// Tag names are normalized and created on first use.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, RepoError> {
        let tags = normalize_tag_set(input.tags.as_deref().unwrap_or_default())?;

        let mut tx = pool.begin().await?;

        ContainerRepo::lock_parent(&mut tx, input.parent).await?;

        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO items \
                 (name, description, image, location, parent_id, metadata, \
                  quantity, alert_quantity, source, source_url) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), COALESCE($8, 0), $9, $10) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(input.description.as_deref().unwrap_or_default())
        .bind(&input.image)
        .bind(input.location.as_deref().unwrap_or_default())
        .bind(input.parent)
        .bind(input.metadata.clone().unwrap_or_else(empty_metadata))
        .bind(input.quantity)
        .bind(input.alert_quantity)
        .bind(input.source.as_deref().unwrap_or_default())
        .bind(&input.source_url)
        .fetch_one(&mut *tx)
        .await?;

        ItemTagRepo::set_item_tags(&mut tx, id, &tags).await?;

        let item = Self::fetch(&mut tx, id).await?;
        tx.commit().await?;
        Ok(item)
    }

    /// Find an item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items i WHERE i.id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List items ordered by name, optionally filtered by parent and tag.
    pub async fn list(pool: &PgPool, params: &ItemListParams) -> Result<Vec<Item>, RepoError> {
        let tag = params.tag.as_deref().map(normalize_tag_name).transpose()?;
        let page = params.page();
        let query = format!(
            "SELECT {COLUMNS} FROM items i \
             WHERE ($1::BIGINT IS NULL OR i.parent_id = $1) \
               AND ($2::TEXT IS NULL OR EXISTS ( \
                       SELECT 1 FROM item_tag_links l \
                       WHERE l.item_id = i.id AND l.tag_name = $2)) \
             ORDER BY i.name, i.id \
             LIMIT $3 OFFSET $4"
        );
        let items = sqlx::query_as::<_, Item>(&query)
            .bind(params.parent)
            .bind(tag)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;
        Ok(items)
    }

    /// Items directly inside `parent_id`, ordered by name.
    pub async fn list_by_parent(pool: &PgPool, parent_id: DbId) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM items i WHERE i.parent_id = $1 ORDER BY i.name, i.id"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Update an item. Only non-`None` fields in `input` are applied; a
    /// present `tags` list replaces the whole tag set.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, RepoError> {
        let tags = input.tags.as_deref().map(normalize_tag_set).transpose()?;

        let mut tx = pool.begin().await?;

        if let Some(parent) = input.parent {
            ContainerRepo::lock_parent(&mut tx, parent).await?;
        }

        let image_provided = input.image.is_some();
        let image_value = input.image.as_ref().and_then(|v| v.as_deref());
        let parent_provided = input.parent.is_some();
        let parent_value = input.parent.flatten();
        let source_url_provided = input.source_url.is_some();
        let source_url_value = input.source_url.as_ref().and_then(|v| v.as_deref());

        let updated = sqlx::query_scalar::<_, DbId>(
            "UPDATE items SET \
                 name           = COALESCE($2, name), \
                 description    = COALESCE($3, description), \
                 image          = CASE WHEN $4 THEN $5 ELSE image END, \
                 location       = COALESCE($6, location), \
                 parent_id      = CASE WHEN $7 THEN $8 ELSE parent_id END, \
                 metadata       = COALESCE($9, metadata), \
                 quantity       = COALESCE($10, quantity), \
                 alert_quantity = COALESCE($11, alert_quantity), \
                 source         = COALESCE($12, source), \
                 source_url     = CASE WHEN $13 THEN $14 ELSE source_url END, \
                 updated_at     = NOW() \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(image_provided)
        .bind(image_value)
        .bind(&input.location)
        .bind(parent_provided)
        .bind(parent_value)
        .bind(&input.metadata)
        .bind(input.quantity)
        .bind(input.alert_quantity)
        .bind(&input.source)
        .bind(source_url_provided)
        .bind(source_url_value)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        if let Some(tags) = &tags {
            ItemTagRepo::set_item_tags(&mut tx, id, tags).await?;
        }

        let item = Self::fetch(&mut tx, id).await?;
        tx.commit().await?;
        Ok(Some(item))
    }

    /// Delete an item and its tag associations. Tags themselves remain.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Re-read an item inside an open transaction.
    async fn fetch(conn: &mut PgConnection, id: DbId) -> Result<Item, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items i WHERE i.id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_one(conn)
            .await
    }
}
