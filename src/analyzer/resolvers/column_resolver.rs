use tracing::trace;

use crate::analyzer::{JoinContext, QualifiedColumn, ResolutionError, Scope};

pub struct ColumnResolver;

impl ColumnResolver {
    /// Bind `name` to the table reached by `scope`, failing with the
    /// entity's columns as candidates when it has no such column.
    pub fn qualify(ctx: &JoinContext, scope: Scope, name: &str) -> Result<QualifiedColumn, ResolutionError> {
        let entity = ctx.entity_of(scope);
        let relation = ctx.relation_of(scope);

        if !entity.has_column(name) {
            return Err(ResolutionError::UnknownColumn {
                relation: relation.to_string(),
                name: name.to_string(),
                candidates: entity.column_names(),
            });
        }

        trace!(column = name, relation, "qualified column");
        Ok(QualifiedColumn::new(scope, relation, name))
    }
}
