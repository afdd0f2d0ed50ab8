use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparatorOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq
}

impl fmt::Display for ComparatorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparatorOp::Eq => write!(f, "="),
            ComparatorOp::NotEq => write!(f, "<>"),
            ComparatorOp::Lt => write!(f, "<"),
            ComparatorOp::LtEq => write!(f, "<="),
            ComparatorOp::Gt => write!(f, ">"),
            ComparatorOp::GtEq => write!(f, ">="),
        }
    }
}

impl fmt::Debug for ComparatorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComparatorOp({})", self)
    }
}

/// Infix operators an expression tree can carry. Comparisons, pattern
/// matches and membership produce booleans; the rest produce values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Compare(ComparatorOp),
    Matches,
    DoesNotMatch,
    In,
    NotIn,
    Add,
    Sub,
    Mul,
    Div,
    Custom(String),
}

impl BinaryOp {
    pub fn is_predicate(&self) -> bool {
        matches!(
            self,
            BinaryOp::Compare(_) | BinaryOp::Matches | BinaryOp::DoesNotMatch | BinaryOp::In | BinaryOp::NotIn
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Compare(op) => write!(f, "{}", op),
            BinaryOp::Matches => write!(f, "LIKE"),
            BinaryOp::DoesNotMatch => write!(f, "NOT LIKE"),
            BinaryOp::In => write!(f, "IN"),
            BinaryOp::NotIn => write!(f, "NOT IN"),
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Custom(op) => write!(f, "{}", op),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Negate,
    Custom(String),
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "NOT"),
            UnaryOp::Negate => write!(f, "-"),
            UnaryOp::Custom(op) => write!(f, "{}", op),
        }
    }
}
