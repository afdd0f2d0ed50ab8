use crate::ast::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub expr: Expr,
    pub ascending: bool,
}

impl OrderBy {
    pub fn asc(expr: Expr) -> Self {
        Self { expr, ascending: true }
    }

    pub fn desc(expr: Expr) -> Self {
        Self { expr, ascending: false }
    }
}

impl From<Expr> for OrderBy {
    fn from(expr: Expr) -> Self {
        OrderBy::asc(expr)
    }
}
