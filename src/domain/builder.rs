//! Category tree builder: wires parent/child links and walks the hierarchy.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use tracing::{debug, instrument, warn};

use crate::domain::arena::CategoryArena;
use crate::domain::entities::{CategoryId, CategoryRecord};
use crate::domain::error::{DomainError, DomainResult};

/// Reconstructs category hierarchies from flat, fully loaded record sets.
///
/// The arena must be completely materialized before calling in: the builder
/// never fetches anything and only touches the `children` lists.
pub struct CategoryTreeBuilder {
    id_index: HashMap<CategoryId, Index>,
}

impl Default for CategoryTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryTreeBuilder {
    pub fn new() -> Self {
        Self {
            id_index: HashMap::new(),
        }
    }

    /// Wire every record to its parent and return the roots in input order.
    ///
    /// Children are appended in input order. A record whose parent id is not
    /// part of the arena gets no edge and, not being a root, disappears from
    /// the returned forest.
    #[instrument(level = "debug", skip(self, arena), fields(records = arena.len()))]
    pub fn build_tree(&mut self, arena: &mut CategoryArena) -> Vec<Index> {
        // Reset state for fresh build
        self.id_index.clear();
        arena.clear_children();

        for (idx, node) in arena.iter() {
            self.id_index.entry(node.record.id).or_insert(idx);
        }

        let edges: Vec<(Index, Index)> = arena
            .iter()
            .filter_map(|(idx, node)| {
                let parent_id = node.record.parent_id?;
                match self.id_index.get(&parent_id) {
                    Some(&parent_idx) => Some((parent_idx, idx)),
                    None => {
                        warn!(
                            "orphaned category {} ({}): parent {} not in set",
                            node.record.alias, node.record.id, parent_id
                        );
                        None
                    }
                }
            })
            .collect();

        for (parent_idx, child_idx) in edges {
            if let Some(parent) = arena.get_mut(parent_idx) {
                parent.children.push(child_idx);
            }
        }

        let roots: Vec<Index> = arena
            .iter()
            .filter(|(_, node)| node.record.is_root())
            .map(|(idx, _)| idx)
            .collect();
        debug!("build_tree: {} roots", roots.len());
        roots
    }

    /// True when `alias` names `root` or any category below it.
    ///
    /// Returns `CycleDetected` if the children links loop back before the
    /// alias is found.
    #[instrument(level = "debug", skip(self, arena))]
    pub fn is_alias_in_subtree(
        &self,
        arena: &CategoryArena,
        root: Index,
        alias: &str,
    ) -> DomainResult<bool> {
        let mut visited = HashSet::new();
        let mut stack = vec![root];

        while let Some(current) = stack.pop() {
            let node = arena
                .get(current)
                .ok_or_else(|| DomainError::NodeNotFound(format!("{current:?}")))?;
            if !visited.insert(current) {
                return Err(DomainError::CycleDetected(node.record.alias.clone()));
            }
            if node.record.alias == alias {
                return Ok(true);
            }
            // Push children in reverse order for left-to-right traversal
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }

        Ok(false)
    }

    /// Chain from the root down to `idx`, following the hydrated parent links.
    #[instrument(level = "debug", skip(self, arena))]
    pub fn ancestor_chain(&self, arena: &CategoryArena, idx: Index) -> DomainResult<Vec<Index>> {
        let mut visited = HashSet::new();
        let mut chain = Vec::new();
        let mut current = Some(idx);

        while let Some(current_idx) = current {
            let node = arena
                .get(current_idx)
                .ok_or_else(|| DomainError::NodeNotFound(format!("{current_idx:?}")))?;
            if !visited.insert(current_idx) {
                return Err(DomainError::CycleDetected(node.record.alias.clone()));
            }
            chain.push(current_idx);
            current = node.parent;
        }

        chain.reverse();
        Ok(chain)
    }

    /// Collect categories for `item` by asking `lookup` one step at a time.
    ///
    /// Each call receives the category found by the previous one (None on the
    /// first call); collection stops when the lookup returns None. Results stay
    /// in call order. Lookup errors are returned as they are.
    #[instrument(level = "debug", skip_all)]
    pub fn path_via_external_lookup<I, F, E>(&self, item: &I, mut lookup: F) -> Result<Vec<CategoryRecord>, E>
    where
        F: FnMut(&I, Option<&CategoryRecord>) -> Result<Option<CategoryRecord>, E>,
        E: From<DomainError>,
    {
        let mut path: Vec<CategoryRecord> = Vec::new();
        let mut seen = HashSet::new();

        while let Some(category) = lookup(item, path.last())? {
            if !seen.insert(category.id) {
                return Err(DomainError::CycleDetected(category.alias).into());
            }
            debug!("path step {}: {}", path.len(), category.alias);
            path.push(category);
        }

        Ok(path)
    }
}
