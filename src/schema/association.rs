use serde::{Deserialize, Serialize};

use crate::schema::Inflector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    BelongsTo,
    HasOne,
    HasMany,
}

/// A declared relationship between two entities.
///
/// - `belongs_to`: the owner holds `foreign_key`, pointing at the target's
///   `primary_key`. Without a `target` the association is polymorphic and
///   `foreign_type` names the discriminator column on the owner.
/// - `has_one` / `has_many`: the target holds `foreign_key`, pointing at the
///   owner's `primary_key`. A `foreign_type` here is the discriminator column
///   on the target (`has_many :notes, as: :notable`), compared against the
///   owner's entity name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub name: String,
    pub kind: AssociationKind,
    #[serde(default)]
    pub target: Option<String>,
    pub foreign_key: String,
    #[serde(default = "Association::default_primary_key")]
    pub primary_key: String,
    #[serde(default)]
    pub foreign_type: Option<String>,
    /// Overrides the inflected plural used for alias candidates.
    #[serde(default)]
    pub plural_name: Option<String>,
}

impl Association {
    fn default_primary_key() -> String {
        "id".to_string()
    }

    pub fn belongs_to(name: &str, target: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: AssociationKind::BelongsTo,
            target: Some(target.to_string()),
            foreign_key: format!("{}_id", name),
            primary_key: Self::default_primary_key(),
            foreign_type: None,
            plural_name: None,
        }
    }

    pub fn polymorphic_belongs_to(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: AssociationKind::BelongsTo,
            target: None,
            foreign_key: format!("{}_id", name),
            primary_key: Self::default_primary_key(),
            foreign_type: Some(format!("{}_type", name)),
            plural_name: None,
        }
    }

    pub fn has_many(name: &str, target: &str, foreign_key: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: AssociationKind::HasMany,
            target: Some(target.to_string()),
            foreign_key: foreign_key.to_string(),
            primary_key: Self::default_primary_key(),
            foreign_type: None,
            plural_name: None,
        }
    }

    pub fn has_one(name: &str, target: &str, foreign_key: &str) -> Self {
        Self {
            kind: AssociationKind::HasOne,
            ..Self::has_many(name, target, foreign_key)
        }
    }

    /// Marks a `has_*` association as the inverse of a polymorphic
    /// `belongs_to` named `interface` on the target.
    pub fn as_interface(mut self, interface: &str) -> Self {
        self.foreign_key = format!("{}_id", interface);
        self.foreign_type = Some(format!("{}_type", interface));
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: &str) -> Self {
        self.foreign_key = foreign_key.to_string();
        self
    }

    pub fn with_primary_key(mut self, primary_key: &str) -> Self {
        self.primary_key = primary_key.to_string();
        self
    }

    pub fn with_plural_name(mut self, plural_name: &str) -> Self {
        self.plural_name = Some(plural_name.to_string());
        self
    }

    pub fn is_polymorphic(&self) -> bool {
        self.kind == AssociationKind::BelongsTo && self.target.is_none()
    }

    pub fn plural_name(&self) -> String {
        self.plural_name.clone().unwrap_or_else(|| Inflector::pluralize(&self.name))
    }
}
