use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::{
    analyzer::{AliasTracker, JoinNode, JoinNodeId, JoinPathKey, JoinSide, OnConditionResolver, PathStep, ResolutionError, Scope},
    ast::JoinType,
    schema::{Association, Entity, SchemaProvider},
    Config,
};

/// Registry of join nodes for one query build, keyed by join path.
///
/// Lives only for a single `build` and is handed explicitly to every
/// resolver; registration is the only mutation.
pub struct JoinContext<'a> {
    /// access to association metadata
    pub schemas: &'a dyn SchemaProvider,
    pub config: &'a Config,
    base: &'a Entity,
    nodes: Vec<JoinNode>,
    /// entity of each node, indexed like `nodes`
    entities: Vec<&'a Entity>,
    by_path: IndexMap<JoinPathKey, JoinNodeId>,
    aliases: AliasTracker,
}

impl<'a> JoinContext<'a> {
    pub fn new(schemas: &'a dyn SchemaProvider, config: &'a Config, base: &str) -> Result<Self, ResolutionError> {
        let base = schemas.entity(base)
            .ok_or_else(|| ResolutionError::UnknownEntity(base.to_string()))?;
        let mut aliases = AliasTracker::new(config.max_alias_length);
        aliases.seed(&base.table);

        Ok(Self {
            schemas,
            config,
            base,
            nodes: Vec::new(),
            entities: Vec::new(),
            by_path: IndexMap::new(),
            aliases,
        })
    }

    pub fn base(&self) -> &'a Entity {
        self.base
    }

    pub fn entity_of(&self, scope: Scope) -> &'a Entity {
        match scope {
            Scope::Root => self.base,
            Scope::Join(id) => self.entities[id.0],
        }
    }

    /// Alias under which the scope's table appears in the query.
    pub fn relation_of(&self, scope: Scope) -> &str {
        match scope {
            Scope::Root => &self.base.table,
            Scope::Join(id) => &self.nodes[id.0].alias,
        }
    }

    pub fn path_of(&self, scope: Scope) -> JoinPathKey {
        match scope {
            Scope::Root => JoinPathKey::root(),
            Scope::Join(id) => self.nodes[id.0].path.clone(),
        }
    }

    pub fn node(&self, id: JoinNodeId) -> &JoinNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[JoinNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<JoinNode> {
        self.nodes
    }

    /// The empty path is the root scope.
    pub fn lookup(&self, path: &JoinPathKey) -> Option<Scope> {
        if path.is_root() {
            return Some(Scope::Root);
        }
        self.by_path.get(path).map(|id| Scope::Join(*id))
    }

    /// Create the node for `path` (and any missing prefix) or return the
    /// existing one. The first registration fixes the join type.
    pub fn register(&mut self, path: &JoinPathKey, join_type: JoinType) -> Result<Scope, ResolutionError> {
        let Some(step) = path.last() else { return Ok(Scope::Root) };

        if let Some(id) = self.by_path.get(path) {
            trace!(path = %path, "join path already registered");
            return Ok(Scope::Join(*id));
        }

        let parent_path = path.parent().unwrap_or_default();
        let parent = self.register(&parent_path, join_type)?;
        let owner = self.entity_of(parent);
        let (association, target) = self.association_target(owner, step)?;

        let candidate = format!("{}_{}", association.plural_name(), owner.table);
        let alias = self.aliases.aliased_name_for(&target.table, &candidate);
        let id = JoinNodeId(self.nodes.len());

        let on = OnConditionResolver::build(
            association,
            &JoinSide { entity: owner, scope: parent, relation: self.relation_of(parent) },
            &JoinSide { entity: target, scope: Scope::Join(id), relation: &alias },
        );

        debug!(path = %path, table = %target.table, alias = %alias, ?join_type, "registered join node");

        self.nodes.push(JoinNode {
            id,
            path: path.clone(),
            entity: target.name.clone(),
            table: target.table.clone(),
            alias,
            parent: parent.join_id(),
            join_type,
            on,
        });
        self.entities.push(target);
        self.by_path.insert(path.clone(), id);

        Ok(Scope::Join(id))
    }

    /// Node for the polymorphic hop at the end of `path`, qualified with
    /// `klass`. Each type is its own node; the hop must already be joined.
    pub fn resolve_polymorphic(&self, path: &JoinPathKey, klass: &str) -> Result<JoinNodeId, ResolutionError> {
        let step = path.last()
            .ok_or_else(|| ResolutionError::UnjoinedAssociation(path.to_string()))?;
        let typed = path.parent().unwrap_or_default().child(PathStep::typed(&step.name, klass));
        self.by_path.get(&typed)
            .copied()
            .ok_or_else(|| ResolutionError::UnjoinedAssociation(typed.to_string()))
    }

    /// Association named by `step` on `owner` and the entity it reaches.
    pub fn association_target(&self, owner: &'a Entity, step: &PathStep) -> Result<(&'a Association, &'a Entity), ResolutionError> {
        let association = owner.get_association(&step.name).ok_or_else(|| {
            ResolutionError::UnknownAssociation {
                entity: owner.name.clone(),
                name: step.name.clone(),
                candidates: owner.association_names(),
            }
        })?;

        let target_name = match (&association.target, &step.klass) {
            (None, Some(klass)) => klass,
            (None, None) => {
                return Err(ResolutionError::AmbiguousPolymorphic {
                    entity: owner.name.clone(),
                    association: association.name.clone(),
                });
            }
            (Some(target), Some(klass)) if target != klass => {
                return Err(ResolutionError::InvalidPolymorphicType {
                    association: association.name.clone(),
                    klass: klass.clone(),
                });
            }
            (Some(target), _) => target,
        };

        let target = self.schemas.entity(target_name)
            .ok_or_else(|| ResolutionError::UnknownEntity(target_name.clone()))?;
        Ok((association, target))
    }
}
