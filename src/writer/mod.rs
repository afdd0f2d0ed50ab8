pub mod sql_writer;
pub use sql_writer::*;

pub mod bind_substitution;
pub use bind_substitution::*;
