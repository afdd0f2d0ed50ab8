use std::{collections::VecDeque, path::Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{Entity, SchemaError, SchemaProvider};

/// The association graph handed over by the host ORM: every mapped entity
/// keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SchemaDocument", into = "SchemaDocument")]
pub struct Schema {
    pub entities: IndexMap<String, Entity>,
}

#[derive(Serialize, Deserialize)]
struct SchemaDocument {
    entities: Vec<Entity>,
}

impl From<SchemaDocument> for Schema {
    fn from(doc: SchemaDocument) -> Self {
        let mut schema = Schema::new();
        for entity in doc.entities {
            schema.add_entity(entity);
        }
        schema
    }
}

impl From<Schema> for SchemaDocument {
    fn from(schema: Schema) -> Self {
        Self { entities: schema.entities.into_values().collect() }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.name.clone(), entity);
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.add_entity(entity);
        self
    }

    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_str(text)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_value(value)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load a schema document (`{"entities": [...]}`) from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Every non-polymorphic association must point at a declared entity.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for entity in self.entities.values() {
            for association in entity.associations.values() {
                if let Some(target) = &association.target {
                    if !self.entities.contains_key(target) {
                        return Err(SchemaError::Invalid(format!(
                            "association {}.{} targets unknown entity {}",
                            entity.name, association.name, target
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Shortest chain of association names leading from `from` to `to`,
    /// following only associations with a fixed target. Ties resolve in
    /// declaration order. `Some(vec![])` when both are the same entity.
    pub fn relation_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        relation_path(self, from, to)
    }
}

impl SchemaProvider for Schema {
    fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }
}

pub fn relation_path(schemas: &dyn SchemaProvider, from: &str, to: &str) -> Option<Vec<String>> {
    if from == to {
        return Some(vec![]);
    }

    let mut visited: Vec<String> = vec![from.to_string()];
    let mut queue: VecDeque<(String, Vec<String>)> = VecDeque::new();
    queue.push_back((from.to_string(), vec![]));

    while let Some((current, path)) = queue.pop_front() {
        let Some(entity) = schemas.entity(&current) else { continue };
        for association in entity.associations.values() {
            let Some(target) = &association.target else { continue };
            if visited.contains(target) {
                continue;
            }
            let mut next_path = path.clone();
            next_path.push(association.name.clone());
            if target == to {
                return Some(next_path);
            }
            visited.push(target.clone());
            queue.push_back((target.clone(), next_path));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::schema::Association;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "entities": [
                {
                    "name": "Person",
                    "table": "people",
                    "columns": ["id", "name"],
                    "associations": [
                        { "name": "articles", "kind": "has_many", "target": "Article", "foreign_key": "person_id" }
                    ]
                },
                {
                    "name": "Article",
                    "table": "articles",
                    "columns": ["id", "person_id", "title"],
                    "associations": [
                        { "name": "person", "kind": "belongs_to", "target": "Person", "foreign_key": "person_id" },
                        { "name": "comments", "kind": "has_many", "target": "Comment", "foreign_key": "article_id" }
                    ]
                },
                {
                    "name": "Comment",
                    "table": "comments",
                    "columns": ["id", "article_id", "body"]
                }
            ]
        })
    }

    #[test]
    fn loads_from_value() {
        let schema = Schema::from_value(document()).unwrap();
        let person = schema.entity("Person").unwrap();
        assert_eq!(person.table, "people");
        assert_eq!(person.get_association("articles").unwrap().target.as_deref(), Some("Article"));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(document().to_string().as_bytes()).unwrap();

        let schema = Schema::load_from_file(&path).unwrap();
        assert_eq!(schema.entities.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Schema::load_from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }

    #[test]
    fn rejects_dangling_targets() {
        let err = Schema::from_value(json!({
            "entities": [
                {
                    "name": "Person",
                    "table": "people",
                    "associations": [
                        { "name": "pets", "kind": "has_many", "target": "Pet", "foreign_key": "person_id" }
                    ]
                }
            ]
        })).unwrap_err();
        assert!(matches!(err, SchemaError::Invalid(msg) if msg.contains("Pet")));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = Schema::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn relation_path_is_shortest_chain() {
        let schema = Schema::from_value(document()).unwrap();
        assert_eq!(schema.relation_path("Person", "Person"), Some(vec![]));
        assert_eq!(schema.relation_path("Person", "Article"), Some(vec!["articles".to_string()]));
        assert_eq!(
            schema.relation_path("Person", "Comment"),
            Some(vec!["articles".to_string(), "comments".to_string()])
        );
        assert_eq!(schema.relation_path("Comment", "Person"), None);
    }

    #[test]
    fn relation_path_skips_polymorphic_associations() {
        let schema = Schema::new()
            .with_entity(Entity::new("Note", "notes").association(Association::polymorphic_belongs_to("notable")))
            .with_entity(Entity::new("Person", "people"));
        assert_eq!(schema.relation_path("Note", "Person"), None);
    }
}
