use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::schema::Association;

/// Metadata for one mapped entity: its table, its columns and the
/// associations it declares.
///
/// Serialized as a flat document with `columns` and `associations` lists;
/// in memory both are kept in declaration order and indexed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntityDocument", into = "EntityDocument")]
pub struct Entity {
    pub name: String,
    pub table: String,
    pub columns: IndexSet<String>,
    pub associations: IndexMap<String, Association>,
}

#[derive(Serialize, Deserialize)]
struct EntityDocument {
    name: String,
    table: String,
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    associations: Vec<Association>,
}

impl From<EntityDocument> for Entity {
    fn from(doc: EntityDocument) -> Self {
        let mut entity = Entity::new(&doc.name, &doc.table).columns(doc.columns);
        for association in doc.associations {
            entity = entity.association(association);
        }
        entity
    }
}

impl From<Entity> for EntityDocument {
    fn from(entity: Entity) -> Self {
        Self {
            name: entity.name,
            table: entity.table,
            columns: entity.columns.into_iter().collect(),
            associations: entity.associations.into_values().collect(),
        }
    }
}

impl Entity {
    pub fn new(name: &str, table: &str) -> Self {
        Self {
            name: name.to_string(),
            table: table.to_string(),
            columns: IndexSet::new(),
            associations: IndexMap::new(),
        }
    }

    pub fn column(mut self, name: &str) -> Self {
        self.columns.insert(name.to_string());
        self
    }

    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn association(mut self, association: Association) -> Self {
        self.associations.insert(association.name.clone(), association);
        self
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    pub fn get_association(&self, name: &str) -> Option<&Association> {
        self.associations.get(name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().cloned().collect()
    }

    pub fn association_names(&self) -> Vec<String> {
        self.associations.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_keeps_declaration_order() {
        let e = Entity::new("Person", "people")
            .columns(["id", "parent_id", "name"])
            .association(Association::belongs_to("parent", "Person"))
            .association(Association::has_many("children", "Person", "parent_id"));

        assert_eq!(e.column_names(), vec!["id", "parent_id", "name"]);
        assert_eq!(e.association_names(), vec!["parent", "children"]);
        assert!(e.has_column("name"));
        assert!(!e.has_column("children"));
    }

    #[test]
    fn round_trips_through_document_shape() {
        let value = json!({
            "name": "Note",
            "table": "notes",
            "columns": ["id", "notable_id", "notable_type"],
            "associations": [
                { "name": "notable", "kind": "belongs_to", "foreign_key": "notable_id", "foreign_type": "notable_type" }
            ]
        });
        let e: Entity = serde_json::from_value(value.clone()).unwrap();
        assert!(e.get_association("notable").unwrap().is_polymorphic());

        let back = serde_json::to_value(&e).unwrap();
        assert_eq!(back["columns"], value["columns"]);
        assert_eq!(back["associations"][0]["name"], "notable");
    }
}
