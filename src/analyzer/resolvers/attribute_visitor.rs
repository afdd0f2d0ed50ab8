use crate::{
    analyzer::{ColumnResolver, Contextualizer, JoinContext, KeyKind, KeyResolver, ResolutionError, ScalarExpr, Scope},
    ast::{Expr, HashSpec, HashValue, UnaryOp},
};

/// Lowers value-producing expressions: projections, grouping and ordering
/// terms, function arguments and comparison operands.
pub struct AttributeVisitor;

impl AttributeVisitor {
    pub fn visit(ctx: &JoinContext, expr: &Expr, scope: Scope) -> Result<ScalarExpr, ResolutionError> {
        match expr {
            Expr::Attribute(name) => Ok(ScalarExpr::Column(ColumnResolver::qualify(ctx, scope, name)?)),
            Expr::Literal(literal) => Ok(ScalarExpr::Literal(literal.clone())),
            Expr::List(items) => Ok(ScalarExpr::List(Self::visit_all(ctx, items, scope)?)),
            Expr::Function { name, args } => Ok(ScalarExpr::Function {
                name: name.clone(),
                args: Self::visit_all(ctx, args, scope)?,
            }),
            Expr::Binary { op, .. } if op.is_predicate() => Err(ResolutionError::NotAnAttribute(op.to_string())),
            Expr::Binary { left, op, right } => Ok(ScalarExpr::Operation {
                left: Box::new(Self::visit(ctx, left, scope)?),
                op: op.clone(),
                right: Box::new(Self::visit(ctx, right, scope)?),
            }),
            Expr::Unary { op: UnaryOp::Not, .. } => Err(ResolutionError::NotAnAttribute("NOT".into())),
            Expr::Unary { op, operand } => Ok(ScalarExpr::Unary {
                op: op.clone(),
                operand: Box::new(Self::visit(ctx, operand, scope)?),
            }),
            Expr::And(_) => Err(ResolutionError::NotAnAttribute("AND".into())),
            Expr::Or(_) => Err(ResolutionError::NotAnAttribute("OR".into())),
            Expr::Grouping(inner) => Ok(ScalarExpr::Grouping(Box::new(Self::visit(ctx, inner, scope)?))),
            Expr::Subquery(relation) => Ok(ScalarExpr::Subquery(Box::new(Contextualizer::subquery(ctx, relation)?))),
            Expr::KeyPath { path, endpoint } => {
                let target = Contextualizer::descend_path(ctx, scope, path)?;
                Self::visit(ctx, endpoint, target)
            }
            Expr::Hash(spec) => {
                let mut list = Self::visit_hash(ctx, spec, scope)?;
                if list.len() == 1 {
                    Ok(list.remove(0))
                } else {
                    Err(ResolutionError::NotAnAttribute(format!("hash naming {} attributes", list.len())))
                }
            }
        }
    }

    pub fn visit_all(ctx: &JoinContext, list: &[Expr], scope: Scope) -> Result<Vec<ScalarExpr>, ResolutionError> {
        list.iter().map(|e| Self::visit(ctx, e, scope)).collect()
    }

    /// Like [`visit`](Self::visit), but hashes and lists expand to every
    /// attribute they name. Used for `select` and `group`.
    pub fn visit_many(ctx: &JoinContext, expr: &Expr, scope: Scope) -> Result<Vec<ScalarExpr>, ResolutionError> {
        match expr {
            Expr::Hash(spec) => Self::visit_hash(ctx, spec, scope),
            Expr::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.extend(Self::visit_many(ctx, item, scope)?);
                }
                Ok(out)
            }
            other => Ok(vec![Self::visit(ctx, other, scope)?]),
        }
    }

    /// `{children: {parent: name}}` style attribute hashes: keys must be
    /// associations, values name what to read in the reached scope.
    fn visit_hash(ctx: &JoinContext, spec: &HashSpec, scope: Scope) -> Result<Vec<ScalarExpr>, ResolutionError> {
        let mut out = Vec::new();

        for (key, value) in &spec.entries {
            match KeyResolver::classify(ctx, scope, key)? {
                KeyKind::Association(_) => {
                    let child = Contextualizer::descend(ctx, scope, key)?;
                    match value {
                        HashValue::Nested(nested) => out.extend(Self::visit_hash(ctx, nested, child)?),
                        HashValue::Expr(expr) => out.extend(Self::visit_many(ctx, expr, child)?),
                        _ => return Err(ResolutionError::InvalidHashValue {
                            key: key.to_string(),
                            reason: "attribute hashes take a nested hash or an expression".into(),
                        }),
                    }
                }
                KeyKind::Attribute => return Err(ResolutionError::NotAnAttribute(format!("{} => value", key))),
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analyzer::{JoinPathKey, QualifiedColumn},
        ast::{BinaryOp, JoinType},
        planner::fixtures,
        Config,
    };

    #[test]
    fn function_arguments_are_qualified() {
        let schema = fixtures::schema();
        let config = Config::default();
        let ctx = JoinContext::new(&schema, &config, "Person").unwrap();

        let out = AttributeVisitor::visit(&ctx, &Expr::func("coalesce", vec![Expr::attr("name"), Expr::lit("x")]), Scope::Root).unwrap();
        assert_eq!(out, ScalarExpr::Function {
            name: "coalesce".into(),
            args: vec![
                ScalarExpr::Column(QualifiedColumn::new(Scope::Root, "people", "name")),
                ScalarExpr::Literal("x".into()),
            ],
        });
    }

    #[test]
    fn arithmetic_stays_a_value() {
        let schema = fixtures::schema();
        let config = Config::default();
        let ctx = JoinContext::new(&schema, &config, "Person").unwrap();

        let out = AttributeVisitor::visit(&ctx, &Expr::attr("salary").binary(BinaryOp::Mul, 2), Scope::Root).unwrap();
        assert!(matches!(out, ScalarExpr::Operation { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn predicates_are_rejected() {
        let schema = fixtures::schema();
        let config = Config::default();
        let ctx = JoinContext::new(&schema, &config, "Person").unwrap();

        assert_eq!(
            AttributeVisitor::visit(&ctx, &Expr::attr("name").eq("bob"), Scope::Root),
            Err(ResolutionError::NotAnAttribute("=".into()))
        );
        assert_eq!(
            AttributeVisitor::visit(&ctx, &Expr::attr("a").eq(1).or(Expr::attr("b").eq(2)), Scope::Root),
            Err(ResolutionError::NotAnAttribute("OR".into()))
        );
    }

    #[test]
    fn hash_expands_to_columns_of_joined_scopes() {
        let schema = fixtures::schema();
        let config = Config::default();
        let mut ctx = JoinContext::new(&schema, &config, "Person").unwrap();
        let children = ctx.register(&JoinPathKey::from_names(["children"]), JoinType::Inner).unwrap();
        let parent = ctx.register(&JoinPathKey::from_names(["children", "parent"]), JoinType::Inner).unwrap();

        let spec = HashSpec::new().nest(
            "children",
            HashSpec::new().with("parent", Expr::attr("name")),
        );
        let out = AttributeVisitor::visit_many(&ctx, &Expr::Hash(spec), Scope::Root).unwrap();
        assert_eq!(out, vec![ScalarExpr::Column(QualifiedColumn::new(parent, "parents_people", "name"))]);

        let both = HashSpec::new().with("children", Expr::list([Expr::attr("id"), Expr::attr("name")]));
        let out = AttributeVisitor::visit_many(&ctx, &Expr::Hash(both), Scope::Root).unwrap();
        assert_eq!(out, vec![
            ScalarExpr::Column(QualifiedColumn::new(children, "children_people", "id")),
            ScalarExpr::Column(QualifiedColumn::new(children, "children_people", "name")),
        ]);
    }
}
