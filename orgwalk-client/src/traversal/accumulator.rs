//! Node set with a hard capacity, checked on every insertion.

use std::collections::HashSet;

use orgwalk_core::models::Entity;

/// Outcome of offering an entity to the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Id already present; nothing stored.
    Duplicate,
    /// Stored; room remains.
    Admitted,
    /// Stored, and the set is now full. The caller must stop.
    AdmittedAtCapacity,
    /// Set was already full; nothing stored.
    Rejected,
}

impl Admission {
    pub fn is_new(self) -> bool {
        matches!(self, Self::Admitted | Self::AdmittedAtCapacity)
    }

    pub fn must_stop(self) -> bool {
        matches!(self, Self::AdmittedAtCapacity | Self::Rejected)
    }
}

/// Insertion-ordered, de-duplicated, capacity-bounded entity set.
#[derive(Debug)]
pub struct NodeAccumulator {
    capacity: usize,
    nodes: Vec<Entity>,
    ids: HashSet<String>,
}

impl NodeAccumulator {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            nodes: Vec::new(),
            ids: HashSet::new(),
        }
    }

    pub fn insert(&mut self, entity: Entity) -> Admission {
        if self.ids.contains(&entity.id) {
            return Admission::Duplicate;
        }
        if self.is_full() {
            return Admission::Rejected;
        }
        self.ids.insert(entity.id.clone());
        self.nodes.push(entity);
        if self.is_full() {
            Admission::AdmittedAtCapacity
        } else {
            Admission::Admitted
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_full(&self) -> bool {
        self.nodes.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<Entity> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_capacity_on_the_filling_insert() {
        let mut acc = NodeAccumulator::new(2);
        assert_eq!(acc.insert(Entity::new("a", "")), Admission::Admitted);
        assert_eq!(acc.insert(Entity::new("a", "")), Admission::Duplicate);
        assert_eq!(acc.insert(Entity::new("b", "")), Admission::AdmittedAtCapacity);
        assert_eq!(acc.insert(Entity::new("c", "")), Admission::Rejected);
        assert_eq!(acc.len(), 2);
        assert!(acc.contains("b"));
        assert!(!acc.contains("c"));
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut acc = NodeAccumulator::new(0);
        assert_eq!(acc.insert(Entity::new("a", "")), Admission::Rejected);
        assert!(acc.is_empty());
    }
}
