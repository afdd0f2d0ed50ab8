use chrono::{NaiveDate, NaiveDateTime};
use ordered_float::NotNan;
use std::fmt::{self, Display};

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(NotNan<f64>),
    Bool(bool),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Null,
}

impl Literal {
    /// `None` for NaN and the infinities, which have no SQL literal.
    pub fn float(value: f64) -> Option<Literal> {
        if !value.is_finite() {
            return None;
        }
        NotNan::new(value).ok().map(Literal::Float)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "s: \"{}\"", s),
            Literal::Int(i) => write!(f, "i: {}", i),
            Literal::Float(n) => write!(f, "f: {}", n.into_inner()),
            Literal::Bool(b) => write!(f, "b: {}", b),
            Literal::Date(d) => write!(f, "d: {}", d),
            Literal::Timestamp(t) => write!(f, "t: {}", t),
            Literal::Null => write!(f, "n: NULL"),
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(_) => write!(f, "String({})", self),
            Literal::Int(_) => write!(f, "Int({})", self),
            Literal::Float(_) => write!(f, "Float({})", self),
            Literal::Bool(_) => write!(f, "Bool({})", self),
            Literal::Date(_) => write!(f, "Date({})", self),
            Literal::Timestamp(_) => write!(f, "Timestamp({})", self),
            Literal::Null => write!(f, "Null(n: NULL)"),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(value as i64)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<NotNan<f64>> for Literal {
    fn from(value: NotNan<f64>) -> Self {
        Literal::Float(value)
    }
}

impl From<NaiveDate> for Literal {
    fn from(value: NaiveDate) -> Self {
        Literal::Date(value)
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(value: NaiveDateTime) -> Self {
        Literal::Timestamp(value)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Literal::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_rejects_non_finite_values() {
        assert!(Literal::float(f64::NAN).is_none());
        assert!(Literal::float(f64::INFINITY).is_none());
        assert!(Literal::float(f64::NEG_INFINITY).is_none());
        assert_eq!(Literal::float(1.5), Some(Literal::Float(NotNan::new(1.5).unwrap())));
    }

    #[test]
    fn none_becomes_null() {
        let missing: Option<&str> = None;
        assert_eq!(Literal::from(missing), Literal::Null);
        assert_eq!(Literal::from(Some(3)), Literal::Int(3));
    }

    #[test]
    fn debug_shows_kind_and_value() {
        assert_eq!(format!("{:?}", Literal::from("bob")), "String(s: \"bob\")");
        assert_eq!(format!("{:?}", Literal::Null), "Null(n: NULL)");
    }
}
