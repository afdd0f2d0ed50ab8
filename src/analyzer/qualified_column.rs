use std::fmt;

use crate::analyzer::Scope;

/// A column bound to the join node (or root) that owns it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct QualifiedColumn {
    pub scope: Scope,
    /// alias of the owning table as it appears in the query
    pub relation: String,
    pub name: String,
}

impl QualifiedColumn {
    pub fn new(scope: Scope, relation: &str, name: &str) -> Self {
        Self { scope, relation: relation.to_string(), name: name.to_string() }
    }
}

impl fmt::Display for QualifiedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.relation, self.name)
    }
}

impl fmt::Debug for QualifiedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column({} @ {})", self, self.scope)
    }
}
