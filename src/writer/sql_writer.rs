use crate::{
    analyzer::{JoinNode, Predicate, QualifiedColumn, QualifiedOrder, ScalarExpr},
    ast::{Literal, UnaryOp},
    planner::ComposedQuery,
    Config,
};

/// Lowers a [`ComposedQuery`] to one SQL string.
pub struct SqlWriter<'c> {
    config: &'c Config,
}

impl<'c> SqlWriter<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    pub fn write(&self, query: &ComposedQuery) -> String {
        let mut sql = String::from("SELECT ");
        if query.distinct {
            sql.push_str("DISTINCT ");
        }

        if query.projection.is_empty() {
            sql.push_str(&format!("{}.*", self.quote(&query.table)));
        } else {
            sql.push_str(&self.scalar_list(&query.projection));
        }

        sql.push_str(" FROM ");
        sql.push_str(&self.quote(&query.table));

        for join in &query.joins {
            sql.push(' ');
            sql.push_str(&self.join(join));
        }

        if let Some(criteria) = query.criteria() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.predicate(&criteria));
        }

        if !query.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.scalar_list(&query.group_by));
        }

        if let Some(having) = query.having() {
            sql.push_str(" HAVING ");
            sql.push_str(&self.predicate(&having));
        }

        if !query.order_by.is_empty() {
            let terms: Vec<String> = query.order_by.iter().map(|o| self.order(o)).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = query.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        sql
    }

    /// Quote an identifier, doubling embedded quote characters.
    pub fn quote(&self, ident: &str) -> String {
        let q = self.config.quote;
        let escaped = ident.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }

    pub fn join(&self, join: &JoinNode) -> String {
        let mut sql = format!("{} {}", join.join_type.to_sql(), self.quote(&join.table));
        if join.is_aliased() {
            sql.push(' ');
            sql.push_str(&self.quote(&join.alias));
        }
        sql.push_str(" ON ");
        sql.push_str(&self.predicate(&join.on));
        sql
    }

    pub fn column(&self, column: &QualifiedColumn) -> String {
        format!("{}.{}", self.quote(&column.relation), self.quote(&column.name))
    }

    pub fn literal(literal: &Literal) -> String {
        match literal {
            Literal::String(s) => format!("'{}'", s.replace('\'', "''")),
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) => f.into_inner().to_string(),
            Literal::Bool(true) => "TRUE".into(),
            Literal::Bool(false) => "FALSE".into(),
            Literal::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
            Literal::Timestamp(t) => format!("'{}'", t.format("%Y-%m-%d %H:%M:%S")),
            Literal::Null => "NULL".into(),
        }
    }

    pub fn scalar(&self, expr: &ScalarExpr) -> String {
        match expr {
            ScalarExpr::Column(column) => self.column(column),
            ScalarExpr::Literal(literal) => Self::literal(literal),
            ScalarExpr::List(items) => format!("({})", self.scalar_list(items)),
            ScalarExpr::Function { name, args } => format!("{}({})", name, self.scalar_list(args)),
            ScalarExpr::Operation { left, op, right } => {
                format!("{} {} {}", self.operand(left), op, self.operand(right))
            }
            ScalarExpr::Unary { op: UnaryOp::Negate, operand } => format!("-{}", self.operand(operand)),
            ScalarExpr::Unary { op, operand } => format!("{} {}", op, self.operand(operand)),
            ScalarExpr::Grouping(inner) => format!("({})", self.scalar(inner)),
            ScalarExpr::Subquery(query) => format!("({})", self.write(query)),
        }
    }

    /// Nested operations keep the authored tree's grouping.
    fn operand(&self, expr: &ScalarExpr) -> String {
        match expr {
            ScalarExpr::Operation { .. } => format!("({})", self.scalar(expr)),
            _ => self.scalar(expr),
        }
    }

    fn scalar_list(&self, items: &[ScalarExpr]) -> String {
        items.iter().map(|e| self.scalar(e)).collect::<Vec<_>>().join(", ")
    }

    pub fn predicate(&self, predicate: &Predicate) -> String {
        match predicate {
            Predicate::And(list) => list
                .iter()
                .map(|p| match p {
                    // OR binds looser than AND
                    Predicate::Or(_) => format!("({})", self.predicate(p)),
                    _ => self.predicate(p),
                })
                .collect::<Vec<_>>()
                .join(" AND "),
            Predicate::Or(list) => list.iter().map(|p| self.predicate(p)).collect::<Vec<_>>().join(" OR "),
            Predicate::Not(inner) => match inner.as_ref() {
                Predicate::Grouping(_) => format!("NOT {}", self.predicate(inner)),
                _ => format!("NOT ({})", self.predicate(inner)),
            },
            Predicate::Grouping(inner) => format!("({})", self.predicate(inner)),
            Predicate::Compare { left, op, right } => {
                format!("{} {} {}", self.scalar(left), op, self.scalar(right))
            }
            Predicate::IsNull { expr, negated: false } => format!("{} IS NULL", self.scalar(expr)),
            Predicate::IsNull { expr, negated: true } => format!("{} IS NOT NULL", self.scalar(expr)),
            Predicate::InList { list, negated, .. } if list.is_empty() => {
                if *negated { "1=1".into() } else { "1=0".into() }
            }
            Predicate::InList { expr, list, negated } => format!(
                "{} {} ({})",
                self.scalar(expr),
                if *negated { "NOT IN" } else { "IN" },
                self.scalar_list(list)
            ),
            Predicate::InSubquery { expr, query, negated } => format!(
                "{} {} ({})",
                self.scalar(expr),
                if *negated { "NOT IN" } else { "IN" },
                self.write(query)
            ),
            Predicate::Like { expr, pattern, negated } => format!(
                "{} {} {}",
                self.scalar(expr),
                if *negated { "NOT LIKE" } else { "LIKE" },
                self.scalar(pattern)
            ),
            Predicate::Between { expr, low, high } => format!(
                "{} BETWEEN {} AND {}",
                self.scalar(expr),
                self.scalar(low),
                self.scalar(high)
            ),
            Predicate::Scalar(expr) => self.scalar(expr),
            Predicate::Raw(sql) => format!("({})", sql),
        }
    }

    fn order(&self, order: &QualifiedOrder) -> String {
        format!("{} {}", self.scalar(&order.expr), if order.ascending { "ASC" } else { "DESC" })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{analyzer::Scope, ast::BinaryOp};

    fn col(relation: &str, name: &str) -> ScalarExpr {
        ScalarExpr::Column(QualifiedColumn::new(Scope::Root, relation, name))
    }

    #[test]
    fn literals_render_as_sql() {
        assert_eq!(SqlWriter::literal(&Literal::from("O'Brien")), "'O''Brien'");
        assert_eq!(SqlWriter::literal(&Literal::Bool(false)), "FALSE");
        assert_eq!(SqlWriter::literal(&Literal::Null), "NULL");
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(SqlWriter::literal(&Literal::Date(date)), "'2024-02-29'");
        let ts = date.and_hms_opt(13, 5, 0).unwrap();
        assert_eq!(SqlWriter::literal(&Literal::Timestamp(ts)), "'2024-02-29 13:05:00'");
    }

    #[test]
    fn nested_operations_keep_their_grouping() {
        let config = Config::default();
        let writer = SqlWriter::new(&config);
        let sum = ScalarExpr::Operation {
            left: Box::new(col("people", "salary")),
            op: BinaryOp::Add,
            right: Box::new(ScalarExpr::Literal(1.into())),
        };
        let product = ScalarExpr::Operation {
            left: Box::new(sum),
            op: BinaryOp::Mul,
            right: Box::new(ScalarExpr::Literal(2.into())),
        };
        assert_eq!(writer.scalar(&product), "(\"people\".\"salary\" + 1) * 2");

        let flat = ScalarExpr::Operation {
            left: Box::new(col("people", "salary")),
            op: BinaryOp::Sub,
            right: Box::new(ScalarExpr::Literal(1.into())),
        };
        assert_eq!(writer.scalar(&flat), "\"people\".\"salary\" - 1");
    }

    #[test]
    fn quote_escapes_quote_character() {
        let config = Config::default();
        assert_eq!(SqlWriter::new(&config).quote("we\"ird"), "\"we\"\"ird\"");
        let mysql = Config::mysql();
        assert_eq!(SqlWriter::new(&mysql).quote("people"), "`people`");
    }

    #[test]
    fn or_inside_and_is_parenthesized() {
        let config = Config::default();
        let writer = SqlWriter::new(&config);
        let predicate = Predicate::And(vec![
            Predicate::Or(vec![
                Predicate::equals(col("people", "name"), ScalarExpr::Literal("a".into())),
                Predicate::equals(col("people", "name"), ScalarExpr::Literal("b".into())),
            ]),
            Predicate::IsNull { expr: col("people", "parent_id"), negated: true },
        ]);
        assert_eq!(
            writer.predicate(&predicate),
            "(\"people\".\"name\" = 'a' OR \"people\".\"name\" = 'b') AND \"people\".\"parent_id\" IS NOT NULL"
        );
    }

    #[test]
    fn empty_in_list_is_constant() {
        let config = Config::default();
        let writer = SqlWriter::new(&config);
        let within = Predicate::InList { expr: col("people", "id"), list: vec![], negated: false };
        let outside = Predicate::InList { expr: col("people", "id"), list: vec![], negated: true };
        assert_eq!(writer.predicate(&within), "1=0");
        assert_eq!(writer.predicate(&outside), "1=1");
    }

    #[test]
    fn raw_fragments_are_wrapped() {
        let config = Config::default();
        let writer = SqlWriter::new(&config);
        assert_eq!(writer.predicate(&Predicate::Raw("a = 1 OR b = 2".into())), "(a = 1 OR b = 2)");
    }
}
