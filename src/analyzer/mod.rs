pub mod scope;
pub use scope::*;

pub mod join_path_key;
pub use join_path_key::*;

pub mod qualified_column;
pub use qualified_column::*;

pub mod scalar_expr;
pub use scalar_expr::*;

pub mod predicate;
pub use predicate::*;

pub mod join_node;
pub use join_node::*;

pub mod alias_tracker;
pub use alias_tracker::*;

pub mod resolution_error;
pub use resolution_error::*;

pub mod join_context;
pub use join_context::*;

pub mod resolvers;
pub use resolvers::*;
