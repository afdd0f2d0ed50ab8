pub mod literal;
pub use literal::*;

pub mod operators;
pub use operators::*;

pub mod join_spec;
pub use join_spec::*;

pub mod expr;
pub use expr::*;

pub mod hash_spec;
pub use hash_spec::*;

pub mod order_by;
pub use order_by::*;
