use crate::{
    analyzer::{JoinContext, JoinPathKey, PathStep, ResolutionError, Scope},
    ast::{JoinSpec, JoinType},
};

pub struct JoinResolver;

impl JoinResolver {
    /// Flatten `spec` depth-first into the paths it names, each prefixed by
    /// `anchor`. Every prefix is listed before its descendants.
    pub fn normalize(spec: &JoinSpec, anchor: &JoinPathKey) -> Vec<(JoinPathKey, Option<JoinType>)> {
        let mut out = Vec::new();
        Self::collect(spec, anchor, &mut out);
        out
    }

    fn collect(spec: &JoinSpec, parent: &JoinPathKey, out: &mut Vec<(JoinPathKey, Option<JoinType>)>) {
        match spec {
            JoinSpec::Name(segment) => {
                out.push((parent.child(PathStep::from(segment)), segment.join_type));
            }
            JoinSpec::List(specs) => {
                for s in specs {
                    Self::collect(s, parent, out);
                }
            }
            JoinSpec::Nested(entries) => {
                for (segment, child) in entries {
                    let path = parent.child(PathStep::from(segment));
                    out.push((path.clone(), segment.join_type));
                    Self::collect(child, &path, out);
                }
            }
            JoinSpec::KeyPath(segments) => {
                let mut path = parent.clone();
                for segment in segments {
                    path = path.child(PathStep::from(segment));
                    out.push((path.clone(), segment.join_type));
                }
            }
        }
    }

    /// Register every path of `spec` below `anchor`. Segments without a
    /// join type use the configured default.
    pub fn resolve(spec: &JoinSpec, ctx: &mut JoinContext, anchor: &JoinPathKey) -> Result<Vec<Scope>, ResolutionError> {
        let default_type = ctx.config.default_join_type;
        Self::normalize(spec, anchor)
            .into_iter()
            .map(|(path, join_type)| ctx.register(&path, join_type.unwrap_or(default_type)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::JoinSegment, planner::fixtures, Config};

    fn paths(spec: &JoinSpec) -> Vec<String> {
        JoinResolver::normalize(spec, &JoinPathKey::root())
            .into_iter()
            .map(|(path, _)| path.to_string())
            .collect()
    }

    #[test]
    fn equivalent_shapes_normalize_alike() {
        let nested = JoinSpec::nested("children", "parent");
        let keypath = JoinSpec::keypath(["children", "parent"]);
        let list = JoinSpec::list([JoinSpec::from("children"), JoinSpec::keypath(["children", "parent"])]);

        assert_eq!(paths(&nested), vec!["children", "children.parent"]);
        assert_eq!(paths(&keypath), paths(&nested));
        assert_eq!(paths(&list), vec!["children", "children", "children.parent"]);
    }

    #[test]
    fn anchor_prefixes_every_path() {
        let anchor = JoinPathKey::from_names(["articles"]);
        let out = JoinResolver::normalize(&JoinSpec::from("comments"), &anchor);
        assert_eq!(out, vec![(JoinPathKey::from_names(["articles", "comments"]), None)]);
    }

    #[test]
    fn segment_join_type_applies_to_its_hop_only() {
        let spec = JoinSpec::KeyPath(vec![JoinSegment::new("children").outer(), JoinSegment::new("parent")]);
        let schema = fixtures::schema();
        let config = Config::default();
        let mut ctx = JoinContext::new(&schema, &config, "Person").unwrap();

        let scopes = JoinResolver::resolve(&spec, &mut ctx, &JoinPathKey::root()).unwrap();
        assert_eq!(scopes.len(), 2);
        assert_eq!(ctx.nodes()[0].join_type, JoinType::Outer);
        assert_eq!(ctx.nodes()[1].join_type, JoinType::Inner);
    }

    #[test]
    fn configured_default_join_type_is_used() {
        let schema = fixtures::schema();
        let config = Config::default().with_default_join_type(JoinType::Outer);
        let mut ctx = JoinContext::new(&schema, &config, "Person").unwrap();

        JoinResolver::resolve(&JoinSpec::from("articles"), &mut ctx, &JoinPathKey::root()).unwrap();
        assert_eq!(ctx.nodes()[0].join_type, JoinType::Outer);
    }

    #[test]
    fn self_joins_number_in_encounter_order() {
        let schema = fixtures::schema();
        let config = Config::default();
        let mut ctx = JoinContext::new(&schema, &config, "Person").unwrap();
        let spec = JoinSpec::list([
            JoinSpec::keypath(["children", "children", "parent", "parent"]),
            JoinSpec::keypath(["children", "children", "children", "parent"]),
        ]);

        JoinResolver::resolve(&spec, &mut ctx, &JoinPathKey::root()).unwrap();
        let aliases: Vec<&str> = ctx.nodes().iter().map(|n| n.alias.as_str()).collect();
        assert_eq!(aliases, vec![
            "children_people",
            "children_people_2",
            "parents_people",
            "parents_people_2",
            "children_people_3",
            "parents_people_3",
        ]);
    }
}
