use chrono::NaiveDate;

use crate::{
    ast::{BinaryOp, ComparatorOp, HashSpec, JoinSegment, Literal, UnaryOp},
    planner::Relation,
};

/// Expression tree as produced by the DSL parser. Attribute names are bare;
/// which table they belong to is decided by where they sit in the tree
/// (`KeyPath` and association keys of a `Hash` shift the scope).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Attribute(String),
    Literal(Literal),
    List(Vec<Expr>),
    Binary { left: Box<Expr>, op: BinaryOp, right: Box<Expr> },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Function { name: String, args: Vec<Expr> },
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Grouping(Box<Expr>),
    Subquery(Box<Relation>),
    /// `children.parent.name`: walk `path` from the current scope, then
    /// evaluate `endpoint` there.
    KeyPath { path: Vec<JoinSegment>, endpoint: Box<Expr> },
    Hash(HashSpec),
}

impl Expr {
    pub fn attr(name: &str) -> Self {
        Expr::Attribute(name.to_string())
    }

    pub fn lit(value: impl Into<Literal>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Expr::List(items.into_iter().map(Into::into).collect())
    }

    pub fn func(name: &str, args: Vec<Expr>) -> Self {
        Expr::Function { name: name.to_string(), args }
    }

    pub fn path<I>(path: I, endpoint: Expr) -> Self
    where
        I: IntoIterator,
        I::Item: Into<JoinSegment>,
    {
        Expr::KeyPath { path: path.into_iter().map(Into::into).collect(), endpoint: Box::new(endpoint) }
    }

    pub fn subquery(relation: Relation) -> Self {
        Expr::Subquery(Box::new(relation))
    }

    pub fn hash(spec: HashSpec) -> Self {
        Expr::Hash(spec)
    }

    pub fn binary(self, op: BinaryOp, rhs: impl Into<Expr>) -> Self {
        Expr::Binary { left: Box::new(self), op, right: Box::new(rhs.into()) }
    }

    pub fn eq(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Compare(ComparatorOp::Eq), rhs)
    }

    pub fn not_eq(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Compare(ComparatorOp::NotEq), rhs)
    }

    pub fn lt(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Compare(ComparatorOp::Lt), rhs)
    }

    pub fn lteq(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Compare(ComparatorOp::LtEq), rhs)
    }

    pub fn gt(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Compare(ComparatorOp::Gt), rhs)
    }

    pub fn gteq(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Compare(ComparatorOp::GtEq), rhs)
    }

    pub fn matches(self, pattern: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Matches, pattern)
    }

    pub fn does_not_match(self, pattern: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::DoesNotMatch, pattern)
    }

    pub fn in_(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::In, rhs)
    }

    pub fn not_in(self, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::NotIn, rhs)
    }

    pub fn op(self, op: &str, rhs: impl Into<Expr>) -> Self {
        self.binary(BinaryOp::Custom(op.to_string()), rhs)
    }

    pub fn not(self) -> Self {
        Expr::Unary { op: UnaryOp::Not, operand: Box::new(self) }
    }

    pub fn neg(self) -> Self {
        Expr::Unary { op: UnaryOp::Negate, operand: Box::new(self) }
    }

    pub fn grouped(self) -> Self {
        Expr::Grouping(Box::new(self))
    }

    /// `a & b`: an ungrouped `And` on the left absorbs `rhs`.
    pub fn and(self, rhs: impl Into<Expr>) -> Self {
        match self {
            Expr::And(mut children) => {
                children.push(rhs.into());
                Expr::And(children)
            }
            other => Expr::And(vec![other, rhs.into()]),
        }
    }

    /// `a | b`: an ungrouped `Or` on the left absorbs `rhs`.
    pub fn or(self, rhs: impl Into<Expr>) -> Self {
        match self {
            Expr::Or(mut children) => {
                children.push(rhs.into());
                Expr::Or(children)
            }
            other => Expr::Or(vec![other, rhs.into()]),
        }
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Expr::Literal(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<NaiveDate> for Expr {
    fn from(value: NaiveDate) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<HashSpec> for Expr {
    fn from(value: HashSpec) -> Self {
        Expr::Hash(value)
    }
}

impl From<Relation> for Expr {
    fn from(value: Relation) -> Self {
        Expr::Subquery(Box::new(value))
    }
}
