pub mod relation;
pub use relation::*;

pub mod composed_query;
pub use composed_query::*;

pub mod clause_composer;
pub use clause_composer::*;

#[cfg(test)]
pub use _tests::fixtures;
