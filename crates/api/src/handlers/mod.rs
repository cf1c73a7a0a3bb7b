pub mod container;
pub mod item;
pub mod item_tag;
