use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoinNodeId(pub usize);

/// Where an expression is evaluated: the base table or one join node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Root,
    Join(JoinNodeId),
}

impl Scope {
    pub fn is_root(&self) -> bool {
        matches!(self, Scope::Root)
    }

    pub fn join_id(&self) -> Option<JoinNodeId> {
        match self {
            Scope::Root => None,
            Scope::Join(id) => Some(*id),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Root => write!(f, "root"),
            Scope::Join(id) => write!(f, "join#{}", id.0),
        }
    }
}
