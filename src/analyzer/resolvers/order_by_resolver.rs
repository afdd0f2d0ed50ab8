use crate::{
    analyzer::{AttributeVisitor, JoinContext, ResolutionError, ScalarExpr, Scope},
    ast::OrderBy,
};

#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedOrder {
    pub expr: ScalarExpr,
    pub ascending: bool,
}

pub struct OrderByResolver;

impl OrderByResolver {
    pub fn resolve(ctx: &JoinContext, order: &OrderBy, scope: Scope) -> Result<QualifiedOrder, ResolutionError> {
        Ok(QualifiedOrder {
            expr: AttributeVisitor::visit(ctx, &order.expr, scope)?,
            ascending: order.ascending,
        })
    }

    pub fn resolve_all(ctx: &JoinContext, orders: &[OrderBy], scope: Scope) -> Result<Vec<QualifiedOrder>, ResolutionError> {
        orders.iter().map(|o| Self::resolve(ctx, o, scope)).collect()
    }
}
