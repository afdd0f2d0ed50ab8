use crate::{
    analyzer::QualifiedColumn,
    ast::{BinaryOp, Literal, UnaryOp},
    planner::ComposedQuery,
};

/// Value-producing node after contextualization; every column is
/// qualified.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarExpr {
    Column(QualifiedColumn),
    Literal(Literal),
    List(Vec<ScalarExpr>),
    Function { name: String, args: Vec<ScalarExpr> },
    Operation { left: Box<ScalarExpr>, op: BinaryOp, right: Box<ScalarExpr> },
    Unary { op: UnaryOp, operand: Box<ScalarExpr> },
    Grouping(Box<ScalarExpr>),
    Subquery(Box<ComposedQuery>),
}

impl ScalarExpr {
    pub fn column(&self) -> Option<&QualifiedColumn> {
        match self {
            ScalarExpr::Column(c) => Some(c),
            _ => None,
        }
    }

    pub fn literal(&self) -> Option<&Literal> {
        match self {
            ScalarExpr::Literal(l) => Some(l),
            _ => None,
        }
    }
}
