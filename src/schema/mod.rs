pub mod inflector;
pub use inflector::*;

pub mod association;
pub use association::*;

pub mod entity;
pub use entity::*;

pub mod schema_error;
pub use schema_error::*;

pub mod schema_graph;
pub use schema_graph::*;

pub trait SchemaProvider {
    /// Given an entity name (`"Person"`, not the table name), return its
    /// metadata if known.
    fn entity(&self, name: &str) -> Option<&Entity>;
}
