//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-statement writes run in
//! a single transaction.

pub mod container_repo;
pub mod item_repo;
pub mod item_tag_repo;

pub use container_repo::ContainerRepo;
pub use item_repo::ItemRepo;
pub use item_tag_repo::ItemTagRepo;
