use std::fmt;

use crate::ast::JoinSegment;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub name: String,
    pub klass: Option<String>,
}

impl PathStep {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), klass: None }
    }

    pub fn typed(name: &str, klass: &str) -> Self {
        Self { name: name.to_string(), klass: Some(klass.to_string()) }
    }
}

impl From<&JoinSegment> for PathStep {
    fn from(segment: &JoinSegment) -> Self {
        Self { name: segment.name.clone(), klass: segment.klass.clone() }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.klass {
            Some(klass) => write!(f, "{}({})", self.name, klass),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Identity of a join: the association hops from the base entity. Join
/// types are not part of it, so `children` and `children.outer` are the
/// same path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JoinPathKey {
    steps: Vec<PathStep>,
}

impl JoinPathKey {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { steps: names.into_iter().map(|name| PathStep::new(name.as_ref())).collect() }
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    pub fn child(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.steps.is_empty() {
            return None;
        }
        Some(Self { steps: self.steps[..self.steps.len() - 1].to_vec() })
    }
}

impl fmt::Display for JoinPathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "<root>");
        }
        let parts: Vec<String> = self.steps.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_and_parent_walk_the_path() {
        let path = JoinPathKey::root().child(PathStep::new("children")).child(PathStep::new("parent"));
        assert_eq!(path, JoinPathKey::from_names(["children", "parent"]));
        assert_eq!(path.parent(), Some(JoinPathKey::from_names(["children"])));
        assert_eq!(JoinPathKey::root().parent(), None);
    }

    #[test]
    fn type_qualifier_is_part_of_identity() {
        let article = JoinPathKey::root().child(PathStep::typed("notable", "Article"));
        let person = JoinPathKey::root().child(PathStep::typed("notable", "Person"));
        assert_ne!(article, person);
        assert_eq!(article.to_string(), "notable(Article)");
    }

    #[test]
    fn join_type_is_not_part_of_identity() {
        let inner = PathStep::from(&JoinSegment::new("children"));
        let outer = PathStep::from(&JoinSegment::new("children").outer());
        assert_eq!(inner, outer);
    }
}
