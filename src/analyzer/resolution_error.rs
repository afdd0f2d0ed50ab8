use std::fmt::Display;

/// Build-time failure. A failed build produces no query structure.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionError {
    UnknownEntity(String),
    UnknownAssociation { entity: String, name: String, candidates: Vec<String> },
    UnknownColumn { relation: String, name: String, candidates: Vec<String> },
    /// hash key that is neither an association nor a column
    UnknownKey { entity: String, key: String, candidates: Vec<String> },
    AmbiguousPolymorphic { entity: String, association: String },
    InvalidPolymorphicType { association: String, klass: String },
    /// association exists but its path was never joined
    UnjoinedAssociation(String),
    NoRelationPath { from: String, to: String },
    NotAnAttribute(String),
    NotAPredicate(String),
    InvalidHashValue { key: String, reason: String },
    BindCountMismatch { expected: usize, got: usize },
    MissingBind(String),
}

impl Display for ResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionError::UnknownEntity(name) => write!(f, "unknown entity {}", name),
            ResolutionError::UnknownAssociation { entity, name, candidates } => write!(
                f,
                "unknown association {} on {} (known: {})",
                name, entity, candidates.join(", ")
            ),
            ResolutionError::UnknownColumn { relation, name, candidates } => write!(
                f,
                "unknown column {}.{} (known: {})",
                relation, name, candidates.join(", ")
            ),
            ResolutionError::UnknownKey { entity, key, candidates } => write!(
                f,
                "{} is neither an association nor a column of {} (known: {})",
                key, entity, candidates.join(", ")
            ),
            ResolutionError::AmbiguousPolymorphic { entity, association } => write!(
                f,
                "polymorphic association {}.{} needs a type qualifier",
                entity, association
            ),
            ResolutionError::InvalidPolymorphicType { association, klass } => write!(
                f,
                "association {} cannot be qualified with type {}",
                association, klass
            ),
            ResolutionError::UnjoinedAssociation(path) => write!(f, "association path {} is not joined", path),
            ResolutionError::NoRelationPath { from, to } => write!(f, "no association path from {} to {}", from, to),
            ResolutionError::NotAnAttribute(what) => write!(f, "{} cannot be used as an attribute", what),
            ResolutionError::NotAPredicate(what) => write!(f, "{} cannot be used as a predicate", what),
            ResolutionError::InvalidHashValue { key, reason } => write!(f, "invalid value for {}: {}", key, reason),
            ResolutionError::BindCountMismatch { expected, got } => write!(
                f,
                "wrong number of bind variables ({} for {})",
                got, expected
            ),
            ResolutionError::MissingBind(name) => write!(f, "missing value for :{}", name),
        }
    }
}

impl std::error::Error for ResolutionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_candidates() {
        let err = ResolutionError::UnknownColumn {
            relation: "people".into(),
            name: "nmae".into(),
            candidates: vec!["id".into(), "name".into()],
        };
        assert_eq!(err.to_string(), "unknown column people.nmae (known: id, name)");
    }
}
