// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Generic fixpoint reachability search.
//!
//! The engine knows nothing about padding or gaps: it takes any
//! [`TransitionSystem`] and enumerates every state reachable from the root,
//! breadth-first, until no previously-unseen state appears. Callers get the
//! full visited set and edge set back; nothing is accumulated in ambient
//! state, so independent searches never interfere.
//!
//! Termination is the caller's obligation: the search runs to fixpoint with
//! no iteration cap, so the supplied system must have a finite reachable
//! state space.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// A transition relation the engine can explore.
///
/// `successors` must be deterministic and total: every state it returns must
/// itself have well-defined successors.
pub trait TransitionSystem {
    type State: Clone + Eq + Hash;
    type Label: Copy;

    /// The sole root state.
    fn root(&self) -> Self::State;

    /// All one-step successors of `from`, with the label that caused each.
    fn successors(&self, from: &Self::State) -> Vec<(Self::Label, Self::State)>;
}

/// A discovered transition.
///
/// Identity is `(from, to)` only: when several labels map one state onto the
/// same successor they collapse onto a single edge, keeping the label of the
/// first transition recorded.
#[derive(Debug, Clone)]
pub struct Edge<S, L> {
    pub from: S,
    pub to: S,
    pub label: L,
}

impl<S: PartialEq, L> PartialEq for Edge<S, L> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl<S: Eq, L> Eq for Edge<S, L> {}

impl<S: Hash, L> Hash for Edge<S, L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

/// The complete reachable universe of a finite transition system.
#[derive(Debug)]
pub struct Reachable<S, L> {
    /// Every state discovered, the root included.
    pub states: HashSet<S>,
    /// Every distinct `(from, to)` transition.
    pub edges: HashSet<Edge<S, L>>,
}

impl<S, L> Reachable<S, L> {
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Breadth-first search to fixpoint.
///
/// The frontier starts as the root alone, with the visited set seeded to
/// match. Each pass expands every frontier state under every label; states
/// seen before are deduplicated by structural equality and never expanded
/// twice. The frontier preserves discovery order, so runs over a
/// deterministic system are reproducible edge for edge.
pub fn explore<T: TransitionSystem>(system: &T) -> Reachable<T::State, T::Label> {
    let root = system.root();
    let mut states = HashSet::new();
    states.insert(root.clone());
    let mut edges = HashSet::new();

    let mut frontier = vec![root];
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for from in &frontier {
            for (label, to) in system.successors(from) {
                edges.insert(Edge {
                    from: from.clone(),
                    to: to.clone(),
                    label,
                });
                if states.insert(to.clone()) {
                    next.push(to);
                }
            }
        }
        frontier = next;
    }

    Reachable { states, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counter mod n: a trivially finite system with a single label.
    struct ModCounter {
        n: u32,
        step: u32,
    }

    impl TransitionSystem for ModCounter {
        type State = u32;
        type Label = u32;

        fn root(&self) -> u32 {
            0
        }

        fn successors(&self, from: &u32) -> Vec<(u32, u32)> {
            vec![(self.step, (from + self.step) % self.n)]
        }
    }

    #[test]
    fn test_explores_whole_cycle() {
        let reachable = explore(&ModCounter { n: 6, step: 1 });
        assert_eq!(reachable.state_count(), 6);
        assert_eq!(reachable.edge_count(), 6);
    }

    #[test]
    fn test_unreachable_states_stay_unseen() {
        // Stepping by 2 never leaves the even residues.
        let reachable = explore(&ModCounter { n: 6, step: 2 });
        assert_eq!(reachable.states, HashSet::from([0, 2, 4]));
    }

    #[test]
    fn test_edge_identity_ignores_label() {
        let a = Edge { from: 1u32, to: 2u32, label: 10u32 };
        let b = Edge { from: 1u32, to: 2u32, label: 99u32 };
        assert_eq!(a, b);
        let mut set = HashSet::new();
        assert!(set.insert(a));
        assert!(!set.insert(b));
    }

    /// Two labels that collapse onto one successor.
    struct Collapse;

    impl TransitionSystem for Collapse {
        type State = u32;
        type Label = char;

        fn root(&self) -> u32 {
            0
        }

        fn successors(&self, from: &u32) -> Vec<(char, u32)> {
            if *from == 0 {
                vec![('a', 1), ('b', 1)]
            } else {
                vec![('a', 1)]
            }
        }
    }

    #[test]
    fn test_collapsed_edge_keeps_first_label() {
        let reachable = explore(&Collapse);
        assert_eq!(reachable.edge_count(), 2); // 0->1 and 1->1
        let edge = reachable
            .edges
            .iter()
            .find(|e| e.from == 0)
            .expect("edge from root");
        assert_eq!(edge.label, 'a');
    }
}
