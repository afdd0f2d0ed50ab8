use tracing::debug;

use crate::{
    analyzer::{AttributeVisitor, JoinContext, JoinPathKey, JoinResolver, OrderByResolver, PathStep, Predicate, PredicateVisitor, ResolutionError, Scope},
    planner::{Clause, ComposedQuery, Relation},
    schema::{relation_path, SchemaProvider},
    writer::BindSubstitution,
    Config,
};

/// A relation (the receiver or a merged one) and the path its base sits at.
struct Fragment<'r> {
    relation: &'r Relation,
    anchor: JoinPathKey,
}

pub struct ClauseComposer;

impl ClauseComposer {
    /// Resolve every join of `relation` and its merged fragments, then
    /// contextualize their clauses against the finished registry.
    pub fn compose(relation: &Relation, schemas: &dyn SchemaProvider, config: &Config) -> Result<ComposedQuery, ResolutionError> {
        let mut ctx = JoinContext::new(schemas, config, &relation.base)?;

        let mut fragments = Vec::new();
        Self::collect_fragments(&mut ctx, relation, JoinPathKey::root(), &mut fragments)?;

        let base = ctx.base();
        let mut query = ComposedQuery {
            entity: base.name.clone(),
            table: base.table.clone(),
            joins: Vec::new(),
            projection: Vec::new(),
            wheres: Vec::new(),
            group_by: Vec::new(),
            havings: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            distinct: false,
        };

        for fragment in &fragments {
            let scope = ctx.lookup(&fragment.anchor)
                .ok_or_else(|| ResolutionError::UnjoinedAssociation(fragment.anchor.to_string()))?;
            let relation = fragment.relation;

            for clause in &relation.wheres {
                query.wheres.extend(Self::clause(&ctx, clause, scope)?);
            }
            for clause in &relation.havings {
                query.havings.extend(Self::clause(&ctx, clause, scope)?);
            }
            for expr in &relation.selects {
                query.projection.extend(AttributeVisitor::visit_many(&ctx, expr, scope)?);
            }
            for expr in &relation.groups {
                query.group_by.extend(AttributeVisitor::visit_many(&ctx, expr, scope)?);
            }
            query.order_by.extend(OrderByResolver::resolve_all(&ctx, &relation.orders, scope)?);

            if relation.limit.is_some() {
                query.limit = relation.limit;
            }
            if relation.offset.is_some() {
                query.offset = relation.offset;
            }
            query.distinct |= relation.distinct;
        }

        query.joins = ctx.into_nodes();
        debug!(
            entity = %query.entity,
            joins = query.joins.len(),
            wheres = query.wheres.len(),
            fragments = fragments.len(),
            "composed query"
        );
        Ok(query)
    }

    /// Register the joins of `relation` below `anchor` and recurse into its
    /// merged fragments, depth-first in merge order.
    fn collect_fragments<'r>(
        ctx: &mut JoinContext,
        relation: &'r Relation,
        anchor: JoinPathKey,
        out: &mut Vec<Fragment<'r>>,
    ) -> Result<(), ResolutionError> {
        let default_type = ctx.config.default_join_type;
        let scope = ctx.register(&anchor, default_type)?;
        let owner = ctx.entity_of(scope);

        for spec in &relation.joins {
            JoinResolver::resolve(spec, ctx, &anchor)?;
        }
        out.push(Fragment { relation, anchor: anchor.clone() });

        for other in &relation.merged {
            let target = if other.base == owner.name {
                anchor.clone()
            } else {
                if ctx.schemas.entity(&other.base).is_none() {
                    return Err(ResolutionError::UnknownEntity(other.base.clone()));
                }
                let path = relation_path(ctx.schemas, &owner.name, &other.base).ok_or_else(|| {
                    ResolutionError::NoRelationPath { from: owner.name.clone(), to: other.base.clone() }
                })?;
                debug!(from = %owner.name, to = %other.base, path = ?path, "anchoring merged relation");
                path.iter().fold(anchor.clone(), |p, name| p.child(PathStep::new(name)))
            };
            Self::collect_fragments(ctx, other, target, out)?;
        }

        Ok(())
    }

    /// Raw clauses are bind-substituted and kept verbatim; an empty hash
    /// contributes nothing.
    fn clause(ctx: &JoinContext, clause: &Clause, scope: Scope) -> Result<Option<Predicate>, ResolutionError> {
        match clause {
            Clause::Expr(expr) => PredicateVisitor::visit(ctx, expr, scope).map(Some),
            Clause::Hash(spec) => Ok(Predicate::all(PredicateVisitor::visit_hash(ctx, spec, scope)?)),
            Clause::Raw { sql, binds } => Ok(Some(Predicate::Raw(BindSubstitution::positional(sql, binds)?))),
            Clause::Named { sql, binds } => Ok(Some(Predicate::Raw(BindSubstitution::named(sql, binds)?))),
        }
    }
}
