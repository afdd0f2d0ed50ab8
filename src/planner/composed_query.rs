use indexmap::IndexMap;

use crate::{
    analyzer::{JoinNode, JoinPathKey, Predicate, QualifiedOrder, ScalarExpr, Scope},
    ast::{ComparatorOp, Literal},
    writer::SqlWriter,
    Config,
};

/// Fully resolved query: deduplicated joins with their aliases and clause
/// fragments whose columns are all qualified.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedQuery {
    pub entity: String,
    pub table: String,
    /// in registration order; a node always follows its parent
    pub joins: Vec<JoinNode>,
    pub projection: Vec<ScalarExpr>,
    pub wheres: Vec<Predicate>,
    pub group_by: Vec<ScalarExpr>,
    pub havings: Vec<Predicate>,
    pub order_by: Vec<QualifiedOrder>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub distinct: bool,
}

impl ComposedQuery {
    /// WHERE fragments AND-combined.
    pub fn criteria(&self) -> Option<Predicate> {
        Predicate::all(self.wheres.clone())
    }

    /// HAVING fragments AND-combined.
    pub fn having(&self) -> Option<Predicate> {
        Predicate::all(self.havings.clone())
    }

    /// `column -> value` for every top-level `root_column = literal`
    /// conjunct of the WHERE clause. Later equalities overwrite earlier ones.
    pub fn derived_attributes(&self) -> IndexMap<String, Literal> {
        let mut out = IndexMap::new();

        for predicate in &self.wheres {
            for conjunct in predicate.conjuncts() {
                let Predicate::Compare { left, op: ComparatorOp::Eq, right } = conjunct else { continue };
                let pair = match (left, right) {
                    (ScalarExpr::Column(c), ScalarExpr::Literal(l)) | (ScalarExpr::Literal(l), ScalarExpr::Column(c)) => (c, l),
                    _ => continue,
                };
                if pair.0.scope == Scope::Root {
                    out.insert(pair.0.name.clone(), pair.1.clone());
                }
            }
        }

        out
    }

    pub fn join_for_alias(&self, alias: &str) -> Option<&JoinNode> {
        self.joins.iter().find(|j| j.alias == alias)
    }

    pub fn join_for_path(&self, path: &JoinPathKey) -> Option<&JoinNode> {
        self.joins.iter().find(|j| &j.path == path)
    }

    pub fn aliases(&self) -> Vec<&str> {
        self.joins.iter().map(|j| j.alias.as_str()).collect()
    }

    pub fn to_sql(&self, config: &Config) -> String {
        SqlWriter::new(config).write(self)
    }
}
