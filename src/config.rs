use serde::{Deserialize, Serialize};

use crate::ast::JoinType;

/// Builder configuration used when composing and lowering queries.
///
/// - `quote` is the identifier quote character used by the SQL writer.
/// - `max_alias_length` bounds generated join aliases (suffix included).
/// - `default_join_type` applies to join segments without an explicit type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identifier quote character (`"` for ANSI, `` ` `` for MySQL)
    pub quote: char,
    /// Longest alias the target database accepts
    pub max_alias_length: usize,
    /// Join type for segments that do not carry one
    pub default_join_type: JoinType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote: '"',
            max_alias_length: 64,
            default_join_type: JoinType::Inner,
        }
    }
}

impl Config {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: backtick-quoted identifiers.
    pub fn mysql() -> Self {
        Self { quote: '`', ..Self::default() }
    }

    /// Convenience: PostgreSQL truncates identifiers at 63 bytes.
    pub fn postgres() -> Self {
        Self { max_alias_length: 63, ..Self::default() }
    }

    pub fn with_max_alias_length(mut self, max_alias_length: usize) -> Self {
        self.max_alias_length = max_alias_length;
        self
    }

    pub fn with_default_join_type(mut self, join_type: JoinType) -> Self {
        self.default_join_type = join_type;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{ "quote": "`" }"#).unwrap();
        assert_eq!(config.quote, '`');
        assert_eq!(config.max_alias_length, 64);
        assert_eq!(config.default_join_type, JoinType::Inner);
    }

    #[test]
    fn join_type_is_snake_case_in_documents() {
        let config: Config = serde_json::from_str(r#"{ "default_join_type": "outer" }"#).unwrap();
        assert_eq!(config, Config::new().with_default_join_type(JoinType::Outer));
    }
}
