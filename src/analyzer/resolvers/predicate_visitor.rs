use crate::{
    analyzer::{AttributeVisitor, ColumnResolver, Contextualizer, JoinContext, KeyKind, KeyResolver, Predicate, ResolutionError, ScalarExpr, Scope},
    ast::{BinaryOp, ComparatorOp, Expr, HashKey, HashSpec, HashValue, Literal, UnaryOp},
};

/// Lowers boolean expression trees. Operands go through
/// [`AttributeVisitor`]; `And`/`Or`/`Grouping` keep the authored shape.
pub struct PredicateVisitor;

impl PredicateVisitor {
    pub fn visit(ctx: &JoinContext, expr: &Expr, scope: Scope) -> Result<Predicate, ResolutionError> {
        match expr {
            // bare boolean column or constant
            Expr::Attribute(_) | Expr::Literal(_) | Expr::Function { .. } => {
                Ok(Predicate::Scalar(AttributeVisitor::visit(ctx, expr, scope)?))
            }
            Expr::List(_) => Err(ResolutionError::NotAPredicate("list".into())),
            Expr::Subquery(_) => Err(ResolutionError::NotAPredicate("subquery".into())),

            Expr::Binary { left, op, right } => Self::binary(ctx, left, op, right, scope),

            Expr::Unary { op: UnaryOp::Not, operand } => {
                Ok(Predicate::Not(Box::new(Self::visit(ctx, operand, scope)?)))
            }
            Expr::Unary { .. } => Ok(Predicate::Scalar(AttributeVisitor::visit(ctx, expr, scope)?)),

            Expr::And(list) => Ok(Predicate::And(Self::visit_all(ctx, list, scope)?)),
            Expr::Or(list) => Ok(Predicate::Or(Self::visit_all(ctx, list, scope)?)),
            Expr::Grouping(inner) => Ok(Predicate::Grouping(Box::new(Self::visit(ctx, inner, scope)?))),

            Expr::KeyPath { path, endpoint } => {
                let target = Contextualizer::descend_path(ctx, scope, path)?;
                Self::visit(ctx, endpoint, target)
            }

            Expr::Hash(spec) => {
                let list = Self::visit_hash(ctx, spec, scope)?;
                Predicate::all(list).ok_or_else(|| ResolutionError::NotAPredicate("empty hash".into()))
            }
        }
    }

    fn visit_all(ctx: &JoinContext, list: &[Expr], scope: Scope) -> Result<Vec<Predicate>, ResolutionError> {
        list.iter().map(|e| Self::visit(ctx, e, scope)).collect()
    }

    fn binary(ctx: &JoinContext, left: &Expr, op: &BinaryOp, right: &Expr, scope: Scope) -> Result<Predicate, ResolutionError> {
        let expr = AttributeVisitor::visit(ctx, left, scope)?;

        let predicate = match op {
            BinaryOp::Compare(cmp) => {
                let right = AttributeVisitor::visit(ctx, right, scope)?;
                let against_null = right.literal().is_some_and(Literal::is_null);
                match (cmp, against_null) {
                    (ComparatorOp::Eq, true) => Predicate::IsNull { expr, negated: false },
                    (ComparatorOp::NotEq, true) => Predicate::IsNull { expr, negated: true },
                    _ => Predicate::Compare { left: expr, op: *cmp, right },
                }
            }
            BinaryOp::Matches | BinaryOp::DoesNotMatch => Predicate::Like {
                expr,
                pattern: AttributeVisitor::visit(ctx, right, scope)?,
                negated: matches!(op, BinaryOp::DoesNotMatch),
            },
            BinaryOp::In | BinaryOp::NotIn => {
                let negated = matches!(op, BinaryOp::NotIn);
                match right {
                    Expr::Subquery(relation) => Predicate::InSubquery {
                        expr,
                        query: Box::new(Contextualizer::subquery(ctx, relation)?),
                        negated,
                    },
                    Expr::List(items) => Predicate::InList {
                        expr,
                        list: AttributeVisitor::visit_all(ctx, items, scope)?,
                        negated,
                    },
                    other => Predicate::InList {
                        expr,
                        list: vec![AttributeVisitor::visit(ctx, other, scope)?],
                        negated,
                    },
                }
            }
            // arithmetic and custom operators are boolean only by context
            _ => Predicate::Scalar(ScalarExpr::Operation {
                left: Box::new(expr),
                op: op.clone(),
                right: Box::new(AttributeVisitor::visit(ctx, right, scope)?),
            }),
        };

        Ok(predicate)
    }

    /// Predicates of a condition hash in entry order. Association keys move
    /// into the joined child; attribute keys compare against `scope`.
    pub fn visit_hash(ctx: &JoinContext, spec: &HashSpec, scope: Scope) -> Result<Vec<Predicate>, ResolutionError> {
        let mut out = Vec::with_capacity(spec.entries.len());

        for (key, value) in &spec.entries {
            match KeyResolver::classify(ctx, scope, key)? {
                KeyKind::Association(_) => {
                    let child = Contextualizer::descend(ctx, scope, key)?;
                    match value {
                        HashValue::Nested(nested) => out.extend(Self::visit_hash(ctx, nested, child)?),
                        HashValue::Expr(expr) => out.push(Self::visit(ctx, expr, child)?),
                        _ => return Err(Self::invalid(key, "association keys take a nested hash or an expression")),
                    }
                }
                KeyKind::Attribute => out.push(Self::hash_leaf(ctx, key, value, scope)?),
            }
        }

        Ok(out)
    }

    fn hash_leaf(ctx: &JoinContext, key: &HashKey, value: &HashValue, scope: Scope) -> Result<Predicate, ResolutionError> {
        let expr = ScalarExpr::Column(ColumnResolver::qualify(ctx, scope, key.name())?);

        let predicate = match value {
            HashValue::Value(Literal::Null) => Predicate::IsNull { expr, negated: false },
            HashValue::Value(literal) => Predicate::equals(expr, ScalarExpr::Literal(literal.clone())),
            HashValue::List(items) => Predicate::InList {
                expr,
                list: items.iter().cloned().map(ScalarExpr::Literal).collect(),
                negated: false,
            },
            HashValue::Range(low, high) => Predicate::Between {
                expr,
                low: ScalarExpr::Literal(low.clone()),
                high: ScalarExpr::Literal(high.clone()),
            },
            HashValue::Subquery(relation) => Predicate::InSubquery {
                expr,
                query: Box::new(Contextualizer::subquery(ctx, relation)?),
                negated: false,
            },
            HashValue::Expr(value) => Predicate::equals(expr, AttributeVisitor::visit(ctx, value, scope)?),
            HashValue::Nested(_) => return Err(Self::invalid(key, "attribute keys cannot take a nested hash")),
        };

        Ok(predicate)
    }

    fn invalid(key: &HashKey, reason: &str) -> ResolutionError {
        ResolutionError::InvalidHashValue { key: key.to_string(), reason: reason.to_string() }
    }
}
