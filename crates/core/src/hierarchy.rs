//! Container hierarchy validation.
//!
//! A container may never be (transitively) its own ancestor. Before a
//! container's parent link is written, the prospective ancestor chain is
//! walked one parent at a time: reaching the container itself is a cycle,
//! reaching the root (`None`) means the new link is safe.
//!
//! The walk is exposed as a small state machine ([`ParentChainWalk`]) so the
//! database layer can feed it one locked row at a time inside the write
//! transaction. [`ensure_acyclic`] drives the same walk from a synchronous
//! lookup.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Message returned when a write would make a container contain itself.
pub const CIRCULAR_CONTAINMENT: &str =
    "Containers cannot be circularly contained within themselves";

/// Incremental walk up a container's prospective parent chain.
///
/// `candidate` is the container being written (`None` while it is being
/// created and has no id yet). The walk starts at the proposed parent.
#[derive(Debug)]
pub struct ParentChainWalk {
    candidate: Option<DbId>,
    cursor: Option<DbId>,
    visited: HashSet<DbId>,
}

impl ParentChainWalk {
    /// Begin a walk at `parent`. Fails immediately if `parent` is the candidate.
    pub fn start(candidate: Option<DbId>, parent: Option<DbId>) -> Result<Self, CoreError> {
        let mut walk = Self {
            candidate,
            cursor: None,
            visited: HashSet::new(),
        };
        walk.visit(parent)?;
        Ok(walk)
    }

    /// The container whose parent must be looked up next, or `None` once the
    /// walk has reached the root.
    pub fn pending(&self) -> Option<DbId> {
        self.cursor
    }

    /// Feed the parent of [`pending`](Self::pending) and advance.
    ///
    /// Must only be called while `pending()` is `Some`.
    pub fn step(&mut self, parent: Option<DbId>) -> Result<(), CoreError> {
        debug_assert!(self.cursor.is_some(), "step called on a finished walk");
        self.visit(parent)
    }

    /// Number of ancestors visited so far.
    pub fn depth(&self) -> usize {
        self.visited.len()
    }

    fn visit(&mut self, node: Option<DbId>) -> Result<(), CoreError> {
        self.cursor = node;
        let Some(id) = node else {
            return Ok(());
        };
        if self.candidate == Some(id) {
            return Err(CoreError::Validation(CIRCULAR_CONTAINMENT.to_string()));
        }
        // Stored data already loops without passing through the candidate.
        if !self.visited.insert(id) {
            return Err(CoreError::Validation(format!(
                "Container {id} is already part of a containment loop"
            )));
        }
        Ok(())
    }
}

/// Check that giving `candidate` the parent `parent` keeps the hierarchy acyclic.
///
/// `parent_of` returns the stored parent of a container.
pub fn ensure_acyclic<F>(
    candidate: Option<DbId>,
    parent: Option<DbId>,
    mut parent_of: F,
) -> Result<(), CoreError>
where
    F: FnMut(DbId) -> Result<Option<DbId>, CoreError>,
{
    let mut walk = ParentChainWalk::start(candidate, parent)?;
    while let Some(node) = walk.pending() {
        let next = parent_of(node)?;
        walk.step(next)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(
        links: &HashMap<DbId, Option<DbId>>,
    ) -> impl FnMut(DbId) -> Result<Option<DbId>, CoreError> + '_ {
        move |id| {
            links
                .get(&id)
                .copied()
                .ok_or_else(|| CoreError::not_found("Container", id))
        }
    }

    fn is_circular(result: Result<(), CoreError>) -> bool {
        matches!(result, Err(CoreError::Validation(msg)) if msg == CIRCULAR_CONTAINMENT)
    }

    #[test]
    fn no_parent_passes_trivially() {
        let links = HashMap::new();
        assert!(ensure_acyclic(Some(1), None, lookup(&links)).is_ok());
        let walk = ParentChainWalk::start(Some(1), None).unwrap();
        assert_eq!(walk.pending(), None);
        assert_eq!(walk.depth(), 0);
    }

    #[test]
    fn own_parent_is_rejected() {
        let links = HashMap::from([(1, None)]);
        assert!(is_circular(ensure_acyclic(Some(1), Some(1), lookup(&links))));
    }

    #[test]
    fn three_level_cycle_is_rejected() {
        // A(1) <- B(2) <- C(3); setting A.parent = C closes the loop.
        let links = HashMap::from([(1, None), (2, Some(1)), (3, Some(2))]);
        assert!(is_circular(ensure_acyclic(Some(1), Some(3), lookup(&links))));
    }

    #[test]
    fn moving_under_unrelated_branch_passes() {
        // 1 <- 2, 3 <- 4; move 2 under 4.
        let links = HashMap::from([(1, None), (2, Some(1)), (3, None), (4, Some(3))]);
        assert!(ensure_acyclic(Some(2), Some(4), lookup(&links)).is_ok());
    }

    #[test]
    fn new_container_cannot_form_a_cycle() {
        let links = HashMap::from([(1, None), (2, Some(1))]);
        assert!(ensure_acyclic(None, Some(2), lookup(&links)).is_ok());
    }

    #[test]
    fn existing_loop_is_reported_instead_of_spinning() {
        // 2 and 3 already point at each other; 1 is not involved.
        let links = HashMap::from([(1, None), (2, Some(3)), (3, Some(2))]);
        let result = ensure_acyclic(Some(1), Some(2), lookup(&links));
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("already part of a containment loop"));
    }

    #[test]
    fn lookup_errors_propagate() {
        let links = HashMap::from([(2, Some(9))]);
        assert_matches!(
            ensure_acyclic(Some(1), Some(2), lookup(&links)),
            Err(CoreError::NotFound { entity: "Container", .. })
        );
    }

    #[test]
    fn walk_reports_depth() {
        let links = HashMap::from([(1, None), (2, Some(1)), (3, Some(2))]);
        let mut walk = ParentChainWalk::start(Some(10), Some(3)).unwrap();
        while let Some(node) = walk.pending() {
            walk.step(links[&node]).unwrap();
        }
        assert_eq!(walk.depth(), 3);
    }

    /// Every parent assignment over four containers: the check fails with the
    /// circular message exactly when the candidate reappears in its chain.
    #[test]
    fn exhaustive_small_hierarchies() {
        let nodes: [DbId; 4] = [1, 2, 3, 4];
        let choices: Vec<Option<DbId>> = std::iter::once(None)
            .chain(nodes.iter().copied().map(Some))
            .collect();

        for a in &choices {
            for b in &choices {
                for c in &choices {
                    for d in &choices {
                        let links: HashMap<DbId, Option<DbId>> =
                            HashMap::from([(1, *a), (2, *b), (3, *c), (4, *d)]);
                        let candidate = 1;
                        let proposed = *a;

                        // Reference walk with a step cap.
                        let mut cursor = proposed;
                        let mut reappears = false;
                        let mut reaches_root = false;
                        for _ in 0..=nodes.len() {
                            match cursor {
                                None => {
                                    reaches_root = true;
                                    break;
                                }
                                Some(id) if id == candidate => {
                                    reappears = true;
                                    break;
                                }
                                Some(id) => cursor = links[&id],
                            }
                        }

                        let result = ensure_acyclic(Some(candidate), proposed, lookup(&links));
                        if reappears {
                            assert!(is_circular(result), "links {links:?}");
                        } else if reaches_root {
                            assert!(result.is_ok(), "links {links:?}");
                        } else {
                            assert!(result.is_err() && !is_circular(result), "links {links:?}");
                        }
                    }
                }
            }
        }
    }
}
