use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{analyzer::ResolutionError, ast::Literal, writer::SqlWriter};

/// Single-quoted strings match first and are left alone, as are `::type`
/// casts, which capture a non-empty first group.
static NAMED_BIND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'(?:[^']|'')*'|(:?):([a-zA-Z]\w*)").expect("named bind pattern is valid")
});

/// Fills bind placeholders of raw SQL fragments with quoted literals.
pub struct BindSubstitution;

impl BindSubstitution {
    /// Replace each `?` outside single-quoted strings with the next bind.
    pub fn positional(sql: &str, binds: &[Literal]) -> Result<String, ResolutionError> {
        let expected = Self::count_positional(sql);
        if expected != binds.len() {
            return Err(ResolutionError::BindCountMismatch { expected, got: binds.len() });
        }

        let mut out = String::with_capacity(sql.len());
        let mut values = binds.iter();
        let mut in_string = false;

        for c in sql.chars() {
            match c {
                '\'' => {
                    in_string = !in_string;
                    out.push(c);
                }
                '?' if !in_string => {
                    // count checked above
                    if let Some(value) = values.next() {
                        out.push_str(&SqlWriter::literal(value));
                    }
                }
                _ => out.push(c),
            }
        }

        Ok(out)
    }

    fn count_positional(sql: &str) -> usize {
        let mut in_string = false;
        let mut count = 0;
        for c in sql.chars() {
            match c {
                '\'' => in_string = !in_string,
                '?' if !in_string => count += 1,
                _ => {}
            }
        }
        count
    }

    /// Replace each `:name` with its bind; every referenced name must be
    /// present. Unused binds are ignored.
    pub fn named(sql: &str, binds: &IndexMap<String, Literal>) -> Result<String, ResolutionError> {
        let mut missing = None;

        let out = NAMED_BIND.replace_all(sql, |caps: &Captures| {
            if caps.get(2).is_none() || !caps[1].is_empty() {
                return caps[0].to_string();
            }
            let name = &caps[2];
            match binds.get(name) {
                Some(value) => SqlWriter::literal(value),
                None => {
                    missing.get_or_insert_with(|| name.to_string());
                    caps[0].to_string()
                }
            }
        });

        match missing {
            Some(name) => Err(ResolutionError::MissingBind(name)),
            None => Ok(out.into_owned()),
        }
    }
}
