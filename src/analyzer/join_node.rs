use crate::{
    analyzer::{JoinNodeId, JoinPathKey, Predicate},
    ast::JoinType,
};

/// One physical join. Created once per distinct path and never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinNode {
    pub id: JoinNodeId,
    pub path: JoinPathKey,
    /// entity reached through the association (the type qualifier for
    /// polymorphic hops)
    pub entity: String,
    pub table: String,
    /// unique per query; equals `table` for the first use of a table
    pub alias: String,
    pub parent: Option<JoinNodeId>,
    pub join_type: JoinType,
    /// qualified + derived from association keys
    pub on: Predicate,
}

impl JoinNode {
    pub fn is_aliased(&self) -> bool {
        self.alias != self.table
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }
}
