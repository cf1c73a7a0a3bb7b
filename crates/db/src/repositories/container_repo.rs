//! Repository for the `containers` table.
//!
//! Writes that touch `parent_id` walk the prospective ancestor chain with
//! [`ParentChainWalk`] inside the write transaction. Each visited row is
//! locked `FOR UPDATE`, so two re-parentings along the same chain serialize
//! instead of racing each other into a cycle.

use sqlx::{PgConnection, PgPool};
use stockroom_core::container_type::ContainerType;
use stockroom_core::error::CoreError;
use stockroom_core::hierarchy::ParentChainWalk;
use stockroom_core::metadata::empty_metadata;
use stockroom_core::types::DbId;

use crate::error::RepoError;
use crate::models::container::{
    Container, ContainerListParams, CreateContainer, DetachedChildren, UpdateContainer,
};
use crate::models::{DEFAULT_LIMIT, MAX_LIMIT};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, image, location, parent_id, metadata, \
                       container_type, created_at, updated_at";

/// Provides CRUD operations for containers.
pub struct ContainerRepo;

impl ContainerRepo {
    /// Insert a new container, returning the created row.
    ///
    /// The parent (if any) must exist; its chain is checked and locked for
    /// the duration of the insert.
    pub async fn create(pool: &PgPool, input: &CreateContainer) -> Result<Container, RepoError> {
        let mut tx = pool.begin().await?;

        Self::check_hierarchy(&mut tx, None, input.parent).await?;

        let query = format!(
            "INSERT INTO containers \
                 (name, description, image, location, parent_id, metadata, container_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let container = sqlx::query_as::<_, Container>(&query)
            .bind(&input.name)
            .bind(input.description.as_deref().unwrap_or_default())
            .bind(&input.image)
            .bind(input.location.as_deref().unwrap_or_default())
            .bind(input.parent)
            .bind(input.metadata.clone().unwrap_or_else(empty_metadata))
            .bind(input.container_type.unwrap_or_default().code())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(container)
    }

    /// Find a container by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Container>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM containers WHERE id = $1");
        sqlx::query_as::<_, Container>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List containers ordered by name, optionally filtered by parent.
    pub async fn list(
        pool: &PgPool,
        params: &ContainerListParams,
    ) -> Result<Vec<Container>, sqlx::Error> {
        let page = params.page();
        let query = format!(
            "SELECT {COLUMNS} FROM containers \
             WHERE ($1::BIGINT IS NULL OR parent_id = $1) \
               AND ($1::BIGINT IS NOT NULL OR NOT $2 OR parent_id IS NULL) \
             ORDER BY name, id \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Container>(&query)
            .bind(params.parent)
            .bind(params.roots)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Containers directly inside `parent_id`, ordered by name.
    pub async fn children(pool: &PgPool, parent_id: DbId) -> Result<Vec<Container>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM containers WHERE parent_id = $1 ORDER BY name, id"
        );
        sqlx::query_as::<_, Container>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search on container names.
    ///
    /// `%` and `_` in `text` match literally.
    pub async fn search(
        pool: &PgPool,
        text: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Container>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let pattern = format!("%{}%", escape_like(text));
        let query = format!(
            "SELECT {COLUMNS} FROM containers \
             WHERE name ILIKE $1 ESCAPE '\\' \
             ORDER BY lower(name), id \
             LIMIT $2"
        );
        sqlx::query_as::<_, Container>(&query)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a container. Only non-`None` fields in `input` are applied.
    ///
    /// The resulting parent chain is re-validated in the same transaction as
    /// the write. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContainer,
    ) -> Result<Option<Container>, RepoError> {
        let mut tx = pool.begin().await?;

        let Some(current_parent) = Self::parent_of(&mut tx, id).await? else {
            return Ok(None);
        };
        let parent = input.parent.unwrap_or(current_parent);

        Self::check_hierarchy(&mut tx, Some(id), parent).await?;

        // For image: if the outer Option is Some, use the inner value (which
        // may be None to clear). If the outer Option is None, keep existing.
        let image_provided = input.image.is_some();
        let image_value = input.image.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE containers SET \
                 name           = COALESCE($2, name), \
                 description    = COALESCE($3, description), \
                 image          = CASE WHEN $4 THEN $5 ELSE image END, \
                 location       = COALESCE($6, location), \
                 parent_id      = $7, \
                 metadata       = COALESCE($8, metadata), \
                 container_type = COALESCE($9, container_type), \
                 updated_at     = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let container = sqlx::query_as::<_, Container>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(image_provided)
            .bind(image_value)
            .bind(&input.location)
            .bind(parent)
            .bind(&input.metadata)
            .bind(input.container_type.map(ContainerType::code))
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(container)
    }

    /// Delete a container, detaching (never deleting) everything inside it.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<DetachedChildren>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let containers = sqlx::query(
            "UPDATE containers SET parent_id = NULL, updated_at = NOW() WHERE parent_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let items = sqlx::query(
            "UPDATE items SET parent_id = NULL, updated_at = NOW() WHERE parent_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let deleted = sqlx::query("DELETE FROM containers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if !deleted {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(DetachedChildren { containers, items }))
    }

    /// Lock a container row and return its parent link.
    ///
    /// Outer `None` means the container does not exist.
    pub async fn parent_of(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Option<DbId>>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<DbId>>(
            "SELECT parent_id FROM containers WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    /// Lock `parent` (if any) for the rest of the transaction, failing with a
    /// validation error when it does not exist.
    pub async fn lock_parent(conn: &mut PgConnection, parent: Option<DbId>) -> Result<(), RepoError> {
        if let Some(id) = parent {
            if Self::parent_of(conn, id).await?.is_none() {
                return Err(missing_parent(id).into());
            }
        }
        Ok(())
    }

    /// Walk from `parent` to the root, rejecting chains that contain `candidate`.
    async fn check_hierarchy(
        conn: &mut PgConnection,
        candidate: Option<DbId>,
        parent: Option<DbId>,
    ) -> Result<(), RepoError> {
        let mut walk = ParentChainWalk::start(candidate, parent)?;
        while let Some(node) = walk.pending() {
            let next = Self::parent_of(conn, node)
                .await?
                .ok_or_else(|| missing_parent(node))?;
            walk.step(next)?;
        }
        tracing::debug!(?candidate, ?parent, depth = walk.depth(), "Container hierarchy check passed");
        Ok(())
    }
}

fn missing_parent(id: DbId) -> CoreError {
    CoreError::Validation(format!("Parent container {id} does not exist"))
}

/// Escape `LIKE` wildcards so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
