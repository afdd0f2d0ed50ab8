pub mod on_condition_resolver;
pub use on_condition_resolver::*;

pub mod join_resolver;
pub use join_resolver::*;

pub mod column_resolver;
pub use column_resolver::*;

pub mod key_resolver;
pub use key_resolver::*;

pub mod contextualizer;
pub use contextualizer::*;

pub mod predicate_visitor;
pub use predicate_visitor::*;

pub mod attribute_visitor;
pub use attribute_visitor::*;

pub mod order_by_resolver;
pub use order_by_resolver::*;
