//! Builds consistent org charts: report counts and reporting paths are
//! derived from the manager links, as the real service would serve them.

use std::collections::{BTreeMap, HashSet};

use orgwalk_core::models::{Entity, FieldDescriptor};
use serde::Deserialize;

/// An org chart under construction, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct OrgTree {
    entities: Vec<Entity>,
}

/// An org chart stored under `test-fixtures/orgs/`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrgFixture {
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl OrgFixture {
    /// Load `orgs/<name>.json`.
    pub fn load(name: &str) -> Self {
        crate::load_fixture(&format!("orgs/{name}.json"))
    }
}

impl OrgTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing entities; counts and paths are recomputed on build.
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// Entities of `orgs/<name>.json`.
    pub fn from_fixture(name: &str) -> Self {
        Self::from_entities(OrgFixture::load(name).entities)
    }

    /// Add a person with no superior.
    pub fn root(self, id: &str) -> Self {
        self.person(None, id)
    }

    /// Add `id` reporting to `manager`.
    pub fn report(self, manager: &str, id: &str) -> Self {
        self.person(Some(manager), id)
    }

    fn person(mut self, manager: Option<&str>, id: &str) -> Self {
        let mut entity = Entity::new(id, format!("Person {id}"));
        entity.email = Some(format!("{id}@example.com"));
        entity.title = Some(if manager.is_none() { "Chief" } else { "Staff" }.to_string());
        entity.manager_id = manager.map(str::to_string);
        self.entities.push(entity);
        self
    }

    /// Attach an organization-defined attribute to `id`.
    pub fn attribute(mut self, id: &str, key: &str, value: serde_json::Value) -> Self {
        if let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) {
            entity.attributes.insert(key.to_string(), value);
        }
        self
    }

    /// Entities with counts and reporting paths filled in.
    pub fn build(self) -> Vec<Entity> {
        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for e in &self.entities {
            if let Some(manager) = &e.manager_id {
                children.entry(manager.clone()).or_default().push(e.id.clone());
            }
        }
        let managers: BTreeMap<String, Option<String>> = self
            .entities
            .iter()
            .map(|e| (e.id.clone(), e.manager_id.clone()))
            .collect();

        self.entities
            .into_iter()
            .map(|mut e| {
                e.direct_report_count = children.get(&e.id).map_or(0, Vec::len) as u32;
                e.total_report_count = count_below(&e.id, &children) as u32;
                e.reporting_path = path_to(&e.id, &managers);
                e
            })
            .collect()
    }
}

fn count_below(id: &str, children: &BTreeMap<String, Vec<String>>) -> usize {
    let mut seen: HashSet<&str> = HashSet::from([id]);
    let mut stack: Vec<&str> = vec![id];
    let mut count = 0;
    while let Some(current) = stack.pop() {
        for child in children.get(current).into_iter().flatten() {
            if seen.insert(child) {
                count += 1;
                stack.push(child);
            }
        }
    }
    count
}

fn path_to(id: &str, managers: &BTreeMap<String, Option<String>>) -> Vec<String> {
    let mut path = Vec::new();
    let mut seen: HashSet<String> = HashSet::from([id.to_string()]);
    let mut current = managers.get(id).cloned().flatten();
    while let Some(manager) = current {
        if !seen.insert(manager.clone()) {
            break;
        }
        current = managers.get(&manager).cloned().flatten();
        path.push(manager);
    }
    path.reverse();
    path
}
