use crate::{
    analyzer::{Predicate, QualifiedColumn, ScalarExpr, Scope},
    ast::Literal,
    schema::{Association, AssociationKind, Entity},
};

/// One end of a join: the entity, its scope and the alias it is reachable under.
pub struct JoinSide<'e> {
    pub entity: &'e Entity,
    pub scope: Scope,
    pub relation: &'e str,
}

impl JoinSide<'_> {
    fn column(&self, name: &str) -> ScalarExpr {
        ScalarExpr::Column(QualifiedColumn::new(self.scope, self.relation, name))
    }
}

pub struct OnConditionResolver;

impl OnConditionResolver {
    /// Join condition between `owner` and the `target` reached through
    /// `association`, derived from its keys.
    pub fn build(association: &Association, owner: &JoinSide, target: &JoinSide) -> Predicate {
        let mut conditions = Vec::with_capacity(2);

        match association.kind {
            AssociationKind::BelongsTo => {
                conditions.push(Predicate::equals(
                    target.column(&association.primary_key),
                    owner.column(&association.foreign_key),
                ));
                if association.is_polymorphic() {
                    if let Some(type_column) = &association.foreign_type {
                        conditions.push(Predicate::equals(
                            owner.column(type_column),
                            ScalarExpr::Literal(Literal::String(target.entity.name.clone())),
                        ));
                    }
                }
            }
            AssociationKind::HasOne | AssociationKind::HasMany => {
                conditions.push(Predicate::equals(
                    target.column(&association.foreign_key),
                    owner.column(&association.primary_key),
                ));
                // `as: :notable` side of a polymorphic pair
                if let Some(type_column) = &association.foreign_type {
                    conditions.push(Predicate::equals(
                        target.column(type_column),
                        ScalarExpr::Literal(Literal::String(owner.entity.name.clone())),
                    ));
                }
            }
        }

        if conditions.len() == 1 {
            conditions.remove(0)
        } else {
            Predicate::And(conditions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::JoinNodeId;

    fn col(scope: Scope, relation: &str, name: &str) -> ScalarExpr {
        ScalarExpr::Column(QualifiedColumn::new(scope, relation, name))
    }

    #[test]
    fn has_many_matches_target_foreign_key() {
        let person = Entity::new("Person", "people");
        let article = Entity::new("Article", "articles");
        let association = Association::has_many("articles", "Article", "person_id");
        let target_scope = Scope::Join(JoinNodeId(0));

        let on = OnConditionResolver::build(
            &association,
            &JoinSide { entity: &person, scope: Scope::Root, relation: "people" },
            &JoinSide { entity: &article, scope: target_scope, relation: "articles" },
        );

        assert_eq!(on, Predicate::equals(
            col(target_scope, "articles", "person_id"),
            col(Scope::Root, "people", "id"),
        ));
    }

    #[test]
    fn interface_side_adds_type_condition() {
        let person = Entity::new("Person", "people");
        let note = Entity::new("Note", "notes");
        let association = Association::has_many("notes", "Note", "notable_id").as_interface("notable");
        let target_scope = Scope::Join(JoinNodeId(3));

        let on = OnConditionResolver::build(
            &association,
            &JoinSide { entity: &person, scope: Scope::Root, relation: "people" },
            &JoinSide { entity: &note, scope: target_scope, relation: "notes" },
        );

        assert_eq!(on, Predicate::And(vec![
            Predicate::equals(col(target_scope, "notes", "notable_id"), col(Scope::Root, "people", "id")),
            Predicate::equals(col(target_scope, "notes", "notable_type"), ScalarExpr::Literal(Literal::String("Person".into()))),
        ]));
    }
}
