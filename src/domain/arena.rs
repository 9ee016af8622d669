use std::collections::HashSet;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::entities::{CategoryId, CategoryRecord};

/// Category node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct CategoryNode {
    /// Category data for this node
    pub record: CategoryRecord,
    /// Resolved parent node, set by the persistence layer when hydrating
    pub parent: Option<Index>,
    /// Child nodes in input order, populated by the tree builder only
    pub children: Vec<Index>,
}

/// Arena holding a flat set of category records.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Input order is kept separately so every derived sequence is stable.
#[derive(Debug)]
pub struct CategoryArena {
    /// Arena storage for all category nodes
    arena: Arena<CategoryNode>,
    /// Node indices in insertion order
    order: Vec<Index>,
}

impl Default for CategoryArena {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<CategoryRecord> for CategoryArena {
    fn from_iter<T: IntoIterator<Item = CategoryRecord>>(iter: T) -> Self {
        let mut arena = Self::new();
        for record in iter {
            arena.insert(record);
        }
        arena
    }
}

impl CategoryArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            order: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, record: CategoryRecord) -> Index {
        let idx = self.arena.insert(CategoryNode {
            record,
            parent: None,
            children: Vec::new(),
        });
        self.order.push(idx);
        idx
    }

    pub fn get(&self, idx: Index) -> Option<&CategoryNode> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut CategoryNode> {
        self.arena.get_mut(idx)
    }

    pub fn record(&self, idx: Index) -> Option<&CategoryRecord> {
        self.arena.get(idx).map(|node| &node.record)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Node indices in input order.
    pub fn indices(&self) -> &[Index] {
        &self.order
    }

    /// Iterates nodes in input order.
    pub fn iter(&self) -> impl Iterator<Item = (Index, &CategoryNode)> + '_ {
        self.order
            .iter()
            .filter_map(move |&idx| self.arena.get(idx).map(|node| (idx, node)))
    }

    pub fn find_by_id(&self, id: CategoryId) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.record.id == id)
            .map(|(idx, _)| idx)
    }

    pub fn find_by_alias(&self, alias: &str) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.record.alias == alias)
            .map(|(idx, _)| idx)
    }

    /// Drops every derived child link.
    #[instrument(level = "trace", skip(self))]
    pub fn clear_children(&mut self) {
        for (_, node) in self.arena.iter_mut() {
            node.children.clear();
        }
    }

    /// Sets the resolved parent link of a node.
    pub fn set_parent(&mut self, idx: Index, parent: Option<Index>) {
        if let Some(node) = self.arena.get_mut(idx) {
            node.parent = parent;
        }
    }

    /// Children aliases of a node, in stored order.
    pub fn child_aliases(&self, idx: Index) -> Vec<&str> {
        self.get(idx)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&child| self.record(child))
                    .map(|record| record.alias.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Renders the subtree below `idx` for terminal display.
    ///
    /// `label` formats each record; nodes already rendered are not expanded again.
    pub fn to_tree_string<F>(&self, idx: Index, label: F) -> Tree<String>
    where
        F: Fn(&CategoryRecord) -> String,
    {
        fn build<F>(
            arena: &CategoryArena,
            idx: Index,
            label: &F,
            visited: &mut HashSet<Index>,
        ) -> Tree<String>
        where
            F: Fn(&CategoryRecord) -> String,
        {
            let Some(node) = arena.get(idx) else {
                return Tree::new("<missing>".to_string());
            };
            let mut tree = Tree::new(label(&node.record));
            if !visited.insert(idx) {
                return tree;
            }
            for &child in &node.children {
                tree.push(build(arena, child, label, visited));
            }
            tree
        }

        let mut visited = HashSet::new();
        build(self, idx, &label, &mut visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (CategoryArena, Index, Index, Index) {
        let mut arena = CategoryArena::new();
        let root = arena.insert(CategoryRecord::new(1, "root", None));
        let a = arena.insert(CategoryRecord::new(2, "a", Some(1)));
        let b = arena.insert(CategoryRecord::new(3, "b", Some(2)));
        arena.get_mut(root).unwrap().children.push(a);
        arena.get_mut(a).unwrap().children.push(b);
        (arena, root, a, b)
    }

    #[test]
    fn given_records_when_inserting_then_keeps_input_order() {
        let (arena, root, a, b) = sample();
        assert_eq!(arena.indices(), &[root, a, b]);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.find_by_alias("b"), Some(b));
        assert_eq!(arena.find_by_id(CategoryId(2)), Some(a));
        assert_eq!(arena.find_by_id(CategoryId(99)), None);
    }

    #[test]
    fn given_cyclic_children_when_rendering_then_terminates() {
        let (mut arena, root, _, b) = sample();
        arena.get_mut(b).unwrap().children.push(root);

        let rendered = arena.to_tree_string(root, |r| r.alias.clone()).to_string();

        assert!(rendered.contains("root"));
        assert!(rendered.contains('b'));
        assert_eq!(rendered.matches("root").count(), 2);
    }

    #[test]
    fn given_children_when_clearing_then_all_lists_empty() {
        let (mut arena, root, a, _) = sample();
        arena.clear_children();
        assert!(arena.child_aliases(root).is_empty());
        assert!(arena.child_aliases(a).is_empty());
    }
}
