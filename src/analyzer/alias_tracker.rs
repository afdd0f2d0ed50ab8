use std::collections::HashMap;

use tracing::trace;

/// Hands out table aliases in first-encounter order.
///
/// The first use of a table keeps the table name. Later uses take the
/// caller's candidate (`children_people`); a candidate requested `n > 1`
/// times becomes `candidate_n`.
#[derive(Debug, Clone)]
pub struct AliasTracker {
    counts: HashMap<String, usize>,
    max_length: usize,
}

impl AliasTracker {
    pub fn new(max_length: usize) -> Self {
        Self { counts: HashMap::new(), max_length }
    }

    /// Record a name already present in the query (the base table).
    pub fn seed(&mut self, name: &str) {
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.counts.get(name).is_some_and(|count| *count > 0)
    }

    pub fn aliased_name_for(&mut self, table: &str, candidate: &str) -> String {
        let table_count = self.counts.entry(table.to_string()).or_insert(0);
        if *table_count == 0 {
            *table_count = 1;
            trace!(table, "first use of table keeps its name");
            return table.to_string();
        }

        let candidate = Self::truncate(candidate, self.max_length);
        let count = self.counts.entry(candidate.clone()).or_insert(0);
        *count += 1;
        let count = *count;

        let alias = if count > 1 {
            let suffix = format!("_{}", count);
            let stem = Self::truncate(&candidate, self.max_length.saturating_sub(suffix.len()));
            format!("{}{}", stem, suffix)
        } else {
            candidate
        };
        trace!(table, alias = %alias, "aliased repeated table");
        alias
    }

    fn truncate(name: &str, max_length: usize) -> String {
        name.chars().take(max_length).collect()
    }
}
