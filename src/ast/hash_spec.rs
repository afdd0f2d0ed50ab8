use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

use crate::{
    ast::{Expr, Literal},
    planner::Relation,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Name(String),
    /// `notable(Article)`: polymorphic association with its type qualifier
    Polymorphic { name: String, klass: String },
}

impl HashKey {
    pub fn name(&self) -> &str {
        match self {
            HashKey::Name(name) | HashKey::Polymorphic { name, .. } => name,
        }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Name(name) => write!(f, "{}", name),
            HashKey::Polymorphic { name, klass } => write!(f, "{}({})", name, klass),
        }
    }
}

impl From<&str> for HashKey {
    fn from(name: &str) -> Self {
        HashKey::Name(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HashValue {
    Nested(HashSpec),
    Value(Literal),
    List(Vec<Literal>),
    Range(Literal, Literal),
    Subquery(Box<Relation>),
    Expr(Expr),
}

/// Nested condition mapping. Association keys shift the scope for their
/// value; attribute keys become predicates against the current scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashSpec {
    pub entries: IndexMap<HashKey, HashValue>,
}

impl HashSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<HashKey>, value: impl Into<HashValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn nest(self, association: &str, spec: HashSpec) -> Self {
        self.with(association, HashValue::Nested(spec))
    }

    pub fn nest_polymorphic(self, association: &str, klass: &str, spec: HashSpec) -> Self {
        let key = HashKey::Polymorphic { name: association.to_string(), klass: klass.to_string() };
        self.with(key, HashValue::Nested(spec))
    }

    pub fn range(self, key: &str, low: impl Into<Literal>, high: impl Into<Literal>) -> Self {
        self.with(key, HashValue::Range(low.into(), high.into()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Literal> for HashValue {
    fn from(value: Literal) -> Self {
        HashValue::Value(value)
    }
}

impl From<&str> for HashValue {
    fn from(value: &str) -> Self {
        HashValue::Value(value.into())
    }
}

impl From<String> for HashValue {
    fn from(value: String) -> Self {
        HashValue::Value(value.into())
    }
}

impl From<i64> for HashValue {
    fn from(value: i64) -> Self {
        HashValue::Value(value.into())
    }
}

impl From<i32> for HashValue {
    fn from(value: i32) -> Self {
        HashValue::Value(value.into())
    }
}

impl From<bool> for HashValue {
    fn from(value: bool) -> Self {
        HashValue::Value(value.into())
    }
}

impl From<NaiveDate> for HashValue {
    fn from(value: NaiveDate) -> Self {
        HashValue::Value(value.into())
    }
}

impl From<NaiveDateTime> for HashValue {
    fn from(value: NaiveDateTime) -> Self {
        HashValue::Value(value.into())
    }
}

impl From<HashSpec> for HashValue {
    fn from(value: HashSpec) -> Self {
        HashValue::Nested(value)
    }
}

impl From<Vec<Literal>> for HashValue {
    fn from(value: Vec<Literal>) -> Self {
        HashValue::List(value)
    }
}

impl From<Expr> for HashValue {
    fn from(value: Expr) -> Self {
        HashValue::Expr(value)
    }
}

impl From<Relation> for HashValue {
    fn from(value: Relation) -> Self {
        HashValue::Subquery(Box::new(value))
    }
}
