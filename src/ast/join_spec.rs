use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinType {
    #[default]
    Inner,
    Outer,
}

impl JoinType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Outer => "LEFT OUTER JOIN",
        }
    }
}

/// One association hop as written by the caller: `children`,
/// `children.outer`, `notable(Article)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinSegment {
    pub name: String,
    /// Type qualifier for a polymorphic association
    pub klass: Option<String>,
    /// Explicit join type; `None` falls back to the configured default
    pub join_type: Option<JoinType>,
}

impl JoinSegment {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), klass: None, join_type: None }
    }

    pub fn polymorphic(name: &str, klass: &str) -> Self {
        Self { name: name.to_string(), klass: Some(klass.to_string()), join_type: None }
    }

    pub fn outer(mut self) -> Self {
        self.join_type = Some(JoinType::Outer);
        self
    }

    pub fn inner(mut self) -> Self {
        self.join_type = Some(JoinType::Inner);
        self
    }
}

impl From<&str> for JoinSegment {
    fn from(name: &str) -> Self {
        JoinSegment::new(name)
    }
}

/// Association join specification in any of its equivalent shapes.
///
/// `Nested(vec![("children", Name("parent"))])`, `KeyPath(["children", "parent"])`
/// and `List([Name("children"), KeyPath(["children", "parent"])])` all
/// describe the same two joins.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinSpec {
    Name(JoinSegment),
    List(Vec<JoinSpec>),
    Nested(Vec<(JoinSegment, JoinSpec)>),
    KeyPath(Vec<JoinSegment>),
}

impl JoinSpec {
    pub fn name(segment: impl Into<JoinSegment>) -> Self {
        JoinSpec::Name(segment.into())
    }

    pub fn list<I>(specs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<JoinSpec>,
    {
        JoinSpec::List(specs.into_iter().map(Into::into).collect())
    }

    pub fn nested(segment: impl Into<JoinSegment>, child: impl Into<JoinSpec>) -> Self {
        JoinSpec::Nested(vec![(segment.into(), child.into())])
    }

    pub fn keypath<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<JoinSegment>,
    {
        JoinSpec::KeyPath(segments.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for JoinSpec {
    fn from(name: &str) -> Self {
        JoinSpec::Name(JoinSegment::new(name))
    }
}

impl From<JoinSegment> for JoinSpec {
    fn from(segment: JoinSegment) -> Self {
        JoinSpec::Name(segment)
    }
}
