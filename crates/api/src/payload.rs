//! Wire representations of inventory entities.
//!
//! Each payload is a fixed field allow-list built from a database row, plus
//! the read-only derived fields (`link`, `label`, `type_verbose`). Write
//! payloads are the validated DTOs in `stockroom_db::models`.

use serde::Serialize;
use stockroom_core::container_type::ContainerType;
use stockroom_core::links::{container_link, item_link, tag_link};
use stockroom_core::types::DbId;
use stockroom_db::models::container::{Container, DetachedChildren};
use stockroom_db::models::item::Item;
use stockroom_db::models::item_tag::ItemTag;

/// Fields shared by everything that can sit inside a container.
#[derive(Debug, Serialize)]
pub struct NodeFields {
    pub id: DbId,
    pub name: String,
    pub image: Option<String>,
    pub description: String,
    pub location: String,
    pub parent: Option<DbId>,
    pub metadata: serde_json::Value,
    pub link: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct ContainerPayload {
    #[serde(flatten)]
    pub node: NodeFields,
    pub container_type: ContainerType,
    pub type_verbose: &'static str,
}

impl From<Container> for ContainerPayload {
    fn from(container: Container) -> Self {
        let label = container.to_string();
        Self {
            node: NodeFields {
                link: container_link(container.id),
                label,
                id: container.id,
                name: container.name,
                image: container.image,
                description: container.description,
                location: container.location,
                parent: container.parent_id,
                metadata: container.metadata,
            },
            type_verbose: container.container_type.verbose(),
            container_type: container.container_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemPayload {
    #[serde(flatten)]
    pub node: NodeFields,
    pub quantity: i32,
    pub alert_quantity: i32,
    pub source: String,
    pub source_url: Option<String>,
    pub tags: Vec<String>,
}

impl From<Item> for ItemPayload {
    fn from(item: Item) -> Self {
        let label = item.to_string();
        Self {
            node: NodeFields {
                link: item_link(item.id),
                label,
                id: item.id,
                name: item.name,
                image: item.image,
                description: item.description,
                location: item.location,
                parent: item.parent_id,
                metadata: item.metadata,
            },
            quantity: item.quantity,
            alert_quantity: item.alert_quantity,
            source: item.source,
            source_url: item.source_url,
            tags: item.tags,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemTagPayload {
    pub name: String,
    pub item_set: Vec<DbId>,
    pub link: String,
}

impl From<ItemTag> for ItemTagPayload {
    fn from(tag: ItemTag) -> Self {
        Self {
            link: tag_link(&tag.name),
            name: tag.name,
            item_set: tag.item_set,
        }
    }
}

/// Everything stored directly inside one container.
#[derive(Debug, Serialize)]
pub struct ContentsPayload {
    pub containers: Vec<ContainerPayload>,
    pub items: Vec<ItemPayload>,
}

/// Result of deleting a container: what was detached from it.
#[derive(Debug, Serialize)]
pub struct DeletedContainerPayload {
    pub id: DbId,
    pub detached: DetachedChildren,
}

/// Convert a list of rows into payloads.
pub fn many<R, P: From<R>>(rows: Vec<R>) -> Vec<P> {
    rows.into_iter().map(P::from).collect()
}
