use indexmap::IndexMap;

use crate::{
    analyzer::ResolutionError,
    ast::{Expr, HashSpec, JoinSpec, Literal, OrderBy},
    planner::{ClauseComposer, ComposedQuery},
    schema::SchemaProvider,
    writer::SqlWriter,
    Config,
};

/// One WHERE or HAVING fragment as the caller supplied it.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Expr(Expr),
    Hash(HashSpec),
    /// `?` placeholders filled in order
    Raw { sql: String, binds: Vec<Literal> },
    /// `:name` placeholders
    Named { sql: String, binds: IndexMap<String, Literal> },
}

/// Unresolved query description. Nothing is checked against the schema
/// until [`build`](Relation::build).
///
/// ```ignore
/// let sql = Relation::new("Person")
///     .joins(JoinSpec::nested("children", "parent"))
///     .where_(Expr::path(["children", "parent"], Expr::attr("name")).eq("bob"))
///     .to_sql(&schema)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub base: String,
    pub joins: Vec<JoinSpec>,
    pub wheres: Vec<Clause>,
    pub havings: Vec<Clause>,
    pub selects: Vec<Expr>,
    pub groups: Vec<Expr>,
    pub orders: Vec<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub distinct: bool,
    /// fragments folded in by `merge`, in merge order
    pub merged: Vec<Relation>,
}

impl Relation {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
            joins: Vec::new(),
            wheres: Vec::new(),
            havings: Vec::new(),
            selects: Vec::new(),
            groups: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
            distinct: false,
            merged: Vec::new(),
        }
    }

    pub fn joins(mut self, spec: impl Into<JoinSpec>) -> Self {
        self.joins.push(spec.into());
        self
    }

    pub fn where_(mut self, expr: impl Into<Expr>) -> Self {
        self.wheres.push(Clause::Expr(expr.into()));
        self
    }

    pub fn where_hash(mut self, spec: HashSpec) -> Self {
        self.wheres.push(Clause::Hash(spec));
        self
    }

    pub fn where_raw<I>(mut self, sql: &str, binds: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        self.wheres.push(Clause::Raw { sql: sql.to_string(), binds: binds.into_iter().map(Into::into).collect() });
        self
    }

    pub fn where_named<I, K, V>(mut self, sql: &str, binds: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Literal>,
    {
        let binds = binds.into_iter().map(|(name, value)| (name.into(), value.into())).collect();
        self.wheres.push(Clause::Named { sql: sql.to_string(), binds });
        self
    }

    pub fn having(mut self, expr: impl Into<Expr>) -> Self {
        self.havings.push(Clause::Expr(expr.into()));
        self
    }

    pub fn having_raw<I>(mut self, sql: &str, binds: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        self.havings.push(Clause::Raw { sql: sql.to_string(), binds: binds.into_iter().map(Into::into).collect() });
        self
    }

    pub fn order(mut self, order: impl Into<OrderBy>) -> Self {
        self.orders.push(order.into());
        self
    }

    /// Drop every previous ordering, including merged ones.
    pub fn reorder(mut self, order: impl Into<OrderBy>) -> Self {
        self.clear_orders();
        self.order(order)
    }

    fn clear_orders(&mut self) {
        self.orders.clear();
        for fragment in &mut self.merged {
            fragment.clear_orders();
        }
    }

    pub fn select(mut self, expr: impl Into<Expr>) -> Self {
        self.selects.push(expr.into());
        self
    }

    pub fn group(mut self, expr: impl Into<Expr>) -> Self {
        self.groups.push(expr.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Fold `other` in. When its base differs it is anchored at the end of
    /// the association path leading to it at build time.
    pub fn merge(mut self, other: Relation) -> Self {
        self.merged.push(other);
        self
    }

    pub fn build(&self, schemas: &dyn SchemaProvider) -> Result<ComposedQuery, ResolutionError> {
        self.build_with(schemas, &Config::default())
    }

    pub fn build_with(&self, schemas: &dyn SchemaProvider, config: &Config) -> Result<ComposedQuery, ResolutionError> {
        ClauseComposer::compose(self, schemas, config)
    }

    pub fn to_sql(&self, schemas: &dyn SchemaProvider) -> Result<String, ResolutionError> {
        self.to_sql_with(schemas, &Config::default())
    }

    pub fn to_sql_with(&self, schemas: &dyn SchemaProvider, config: &Config) -> Result<String, ResolutionError> {
        let query = self.build_with(schemas, config)?;
        Ok(SqlWriter::new(config).write(&query))
    }
}
