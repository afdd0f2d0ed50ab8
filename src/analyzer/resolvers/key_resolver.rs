use tracing::trace;

use crate::{
    analyzer::{JoinContext, PathStep, ResolutionError, Scope},
    ast::HashKey,
    schema::Association,
};

/// What a hash key names in the scope it is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyKind<'a> {
    Association(&'a Association),
    Attribute,
}

pub struct KeyResolver;

impl KeyResolver {
    /// Association names win over columns; a key that is neither is an
    /// error listing both.
    pub fn classify<'a>(ctx: &JoinContext<'a>, scope: Scope, key: &HashKey) -> Result<KeyKind<'a>, ResolutionError> {
        let entity = ctx.entity_of(scope);

        if let Some(association) = entity.get_association(key.name()) {
            trace!(key = %key, entity = %entity.name, "hash key is an association");
            return Ok(KeyKind::Association(association));
        }

        if let HashKey::Polymorphic { name, .. } = key {
            return Err(ResolutionError::UnknownAssociation {
                entity: entity.name.clone(),
                name: name.clone(),
                candidates: entity.association_names(),
            });
        }

        if entity.has_column(key.name()) {
            trace!(key = %key, entity = %entity.name, "hash key is an attribute");
            return Ok(KeyKind::Attribute);
        }

        let mut candidates = entity.association_names();
        candidates.extend(entity.column_names());
        Err(ResolutionError::UnknownKey {
            entity: entity.name.clone(),
            key: key.to_string(),
            candidates,
        })
    }

    /// Scope of the already joined association `name` below `scope`.
    /// Polymorphic hops need `klass` and resolve to that type's node.
    pub fn resolve_association(ctx: &JoinContext, scope: Scope, name: &str, klass: Option<&str>) -> Result<Scope, ResolutionError> {
        let entity = ctx.entity_of(scope);
        let association = entity.get_association(name).ok_or_else(|| ResolutionError::UnknownAssociation {
            entity: entity.name.clone(),
            name: name.to_string(),
            candidates: entity.association_names(),
        })?;

        let untyped = ctx.path_of(scope).child(PathStep::new(name));

        match klass {
            Some(klass) if association.is_polymorphic() => {
                ctx.resolve_polymorphic(&untyped, klass).map(Scope::Join)
            }
            Some(klass) => Err(ResolutionError::InvalidPolymorphicType {
                association: name.to_string(),
                klass: klass.to_string(),
            }),
            None if association.is_polymorphic() => Err(ResolutionError::AmbiguousPolymorphic {
                entity: entity.name.clone(),
                association: name.to_string(),
            }),
            None => ctx.lookup(&untyped)
                .ok_or_else(|| ResolutionError::UnjoinedAssociation(untyped.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyzer::JoinPathKey, ast::JoinType, planner::fixtures, Config};

    #[test]
    fn association_wins_over_column() {
        let schema = fixtures::schema();
        let config = Config::default();
        let ctx = JoinContext::new(&schema, &config, "Person").unwrap();

        assert!(matches!(
            KeyResolver::classify(&ctx, Scope::Root, &HashKey::from("children")),
            Ok(KeyKind::Association(a)) if a.name == "children"
        ));
        assert_eq!(KeyResolver::classify(&ctx, Scope::Root, &HashKey::from("name")), Ok(KeyKind::Attribute));
    }

    #[test]
    fn unknown_key_lists_associations_and_columns() {
        let schema = fixtures::schema();
        let config = Config::default();
        let ctx = JoinContext::new(&schema, &config, "Person").unwrap();

        match KeyResolver::classify(&ctx, Scope::Root, &HashKey::from("nickname")) {
            Err(ResolutionError::UnknownKey { key, candidates, .. }) => {
                assert_eq!(key, "nickname");
                assert!(candidates.contains(&"children".to_string()));
                assert!(candidates.contains(&"name".to_string()));
            }
            other => panic!("expected UnknownKey, got {other:?}"),
        }
    }

    #[test]
    fn unjoined_association_is_reported_with_its_path() {
        let schema = fixtures::schema();
        let config = Config::default();
        let mut ctx = JoinContext::new(&schema, &config, "Person").unwrap();
        let children = ctx.register(&JoinPathKey::from_names(["children"]), JoinType::Inner).unwrap();

        assert_eq!(KeyResolver::resolve_association(&ctx, Scope::Root, "children", None), Ok(children));
        assert_eq!(
            KeyResolver::resolve_association(&ctx, children, "articles", None),
            Err(ResolutionError::UnjoinedAssociation("children.articles".into()))
        );
    }

    #[test]
    fn polymorphic_key_needs_a_type() {
        let schema = fixtures::schema();
        let config = Config::default();
        let ctx = JoinContext::new(&schema, &config, "Note").unwrap();

        assert_eq!(
            KeyResolver::resolve_association(&ctx, Scope::Root, "notable", None),
            Err(ResolutionError::AmbiguousPolymorphic { entity: "Note".into(), association: "notable".into() })
        );
    }
}
