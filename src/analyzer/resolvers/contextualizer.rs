use tracing::debug;

use crate::{
    analyzer::{AttributeVisitor, JoinContext, KeyResolver, Predicate, PredicateVisitor, QualifiedColumn, ResolutionError, ScalarExpr, Scope},
    ast::{Expr, HashKey, JoinSegment},
    planner::{ClauseComposer, ComposedQuery, Relation},
};

/// Entry point for binding expression trees to join scopes.
///
/// Scope only moves at association hash keys and keypath segments; every
/// other node is evaluated in the scope of its parent.
pub struct Contextualizer;

impl Contextualizer {
    pub fn predicate(ctx: &JoinContext, expr: &Expr, scope: Scope) -> Result<Predicate, ResolutionError> {
        PredicateVisitor::visit(ctx, expr, scope)
    }

    pub fn attribute(ctx: &JoinContext, expr: &Expr, scope: Scope) -> Result<ScalarExpr, ResolutionError> {
        AttributeVisitor::visit(ctx, expr, scope)
    }

    /// Child scope named by an association hash key.
    pub fn descend(ctx: &JoinContext, scope: Scope, key: &HashKey) -> Result<Scope, ResolutionError> {
        match key {
            HashKey::Name(name) => KeyResolver::resolve_association(ctx, scope, name, None),
            HashKey::Polymorphic { name, klass } => KeyResolver::resolve_association(ctx, scope, name, Some(klass)),
        }
    }

    /// Scope reached by walking `path` from `scope`.
    pub fn descend_path(ctx: &JoinContext, scope: Scope, path: &[JoinSegment]) -> Result<Scope, ResolutionError> {
        path.iter().try_fold(scope, |scope, segment| {
            KeyResolver::resolve_association(ctx, scope, &segment.name, segment.klass.as_deref())
        })
    }

    /// Build `relation` on its own registry. Without an explicit
    /// projection the subquery selects its primary key.
    pub fn subquery(ctx: &JoinContext, relation: &Relation) -> Result<ComposedQuery, ResolutionError> {
        let mut query = ClauseComposer::compose(relation, ctx.schemas, ctx.config)?;
        if query.projection.is_empty() && ctx.schemas.entity(&query.entity).is_some_and(|e| e.has_column("id")) {
            query.projection.push(ScalarExpr::Column(QualifiedColumn::new(Scope::Root, &query.table, "id")));
        }
        debug!(entity = %query.entity, joins = query.joins.len(), "composed subquery");
        Ok(query)
    }
}
