use crate::{
    analyzer::ScalarExpr,
    ast::ComparatorOp,
    planner::ComposedQuery,
};

/// Boolean node after contextualization. `Grouping` marks parentheses the
/// caller wrote; `And`/`Or` keep their children exactly as authored.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Grouping(Box<Predicate>),

    // Predicates that *embed* scalars:
    Compare    { left: ScalarExpr, op: ComparatorOp, right: ScalarExpr }, // =, <, <=, >, >=, <>
    IsNull     { expr: ScalarExpr, negated: bool },
    InList     { expr: ScalarExpr, list: Vec<ScalarExpr>, negated: bool },
    InSubquery { expr: ScalarExpr, query: Box<ComposedQuery>, negated: bool },
    Like       { expr: ScalarExpr, pattern: ScalarExpr, negated: bool },
    Between    { expr: ScalarExpr, low: ScalarExpr, high: ScalarExpr },
    /// boolean-valued scalar: bare column, function call, custom operator
    Scalar(ScalarExpr),

    /// bind-substituted SQL passed through untouched
    Raw(String),
}

impl Predicate {
    pub fn equals(left: ScalarExpr, right: ScalarExpr) -> Self {
        Predicate::Compare { left, op: ComparatorOp::Eq, right }
    }

    /// Conjunction of `list`; a single entry is returned as is.
    pub fn all(mut list: Vec<Predicate>) -> Option<Predicate> {
        match list.len() {
            0 => None,
            1 => list.pop(),
            _ => Some(Predicate::And(list)),
        }
    }

    /// Top-level conjuncts: an ungrouped `And` is flattened, anything else
    /// is a single conjunct.
    pub fn conjuncts(&self) -> Vec<&Predicate> {
        match self {
            Predicate::And(list) => list.iter().flat_map(Predicate::conjuncts).collect(),
            other => vec![other],
        }
    }
}
