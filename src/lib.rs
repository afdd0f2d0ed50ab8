pub mod schema;
pub use schema::{Association, AssociationKind, Entity, Schema, SchemaError, SchemaProvider};

pub mod ast;
pub use ast::{Expr, HashSpec, JoinSegment, JoinSpec, JoinType, Literal, OrderBy};

pub mod analyzer;
pub use analyzer::{JoinContext, JoinNode, Predicate, ResolutionError, ScalarExpr};

pub mod planner;
pub use planner::{ComposedQuery, Relation};

pub mod writer;
pub use writer::SqlWriter;

pub mod config;
pub use config::Config;
