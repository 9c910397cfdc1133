//! Successor generators.
//!
//! The game builder only needs to ask "which transitions leave this state?".
//! Two generators are used side by side: the strong one (the [`Lts`] itself)
//! and a weak one that abstracts from internal steps ([`WeakLts`]).

use std::collections::HashSet;

use crate::lts::{Lts, Transition};
use crate::types::{Action, ProcessId};

pub trait Successors {
    /// All outgoing transitions of `process`.
    fn transitions(&self, process: ProcessId) -> &[Transition];

    /// Targets of the `action`-labelled transitions of `process`.
    fn targets(&self, process: ProcessId, action: Action) -> impl Iterator<Item = ProcessId> + '_ {
        self.transitions(process)
            .iter()
            .filter(move |t| t.action == action)
            .map(|t| t.target)
    }

    fn has_action(&self, process: ProcessId, action: Action) -> bool {
        self.transitions(process).iter().any(|t| t.action == action)
    }
}

impl Successors for Lts {
    fn transitions(&self, process: ProcessId) -> &[Transition] {
        self.transitions_of(process)
    }
}

/// Weak (tau-saturated) transition relation of an [`Lts`].
///
/// - `p =tau=> p'` iff `p'` is in the reflexive tau-closure of `p`.
/// - `p =a=> p'` iff `p tau* a tau* p'` for a visible `a`.
#[derive(Debug, Clone)]
pub struct WeakLts {
    transitions: Vec<Vec<Transition>>,
}

impl WeakLts {
    pub fn new(lts: &Lts) -> Self {
        let closures: Vec<Vec<ProcessId>> = lts.states().map(|p| tau_closure(lts, p)).collect();

        let mut transitions = Vec::with_capacity(lts.num_states());
        for p in lts.states() {
            let mut seen = HashSet::new();
            let mut out = Vec::new();
            for &r in &closures[p.index()] {
                let t = Transition::new(Action::TAU, r);
                if seen.insert(t) {
                    out.push(t);
                }
            }
            for &r in &closures[p.index()] {
                for t in lts.transitions_of(r) {
                    if t.action.is_tau() {
                        continue;
                    }
                    for &s in &closures[t.target.index()] {
                        let w = Transition::new(t.action, s);
                        if seen.insert(w) {
                            out.push(w);
                        }
                    }
                }
            }
            transitions.push(out);
        }

        log::debug!(
            "Saturated {} strong transitions into {} weak ones",
            lts.num_transitions(),
            transitions.iter().map(|ts: &Vec<Transition>| ts.len()).sum::<usize>()
        );

        Self { transitions }
    }
}

impl Successors for WeakLts {
    fn transitions(&self, process: ProcessId) -> &[Transition] {
        &self.transitions[process.index()]
    }
}

/// Reflexive tau-closure of `process`, in discovery order.
pub fn tau_closure<S: Successors>(succ: &S, process: ProcessId) -> Vec<ProcessId> {
    let mut visited = HashSet::from([process]);
    let mut order = vec![process];
    let mut stack = vec![process];
    while let Some(p) = stack.pop() {
        for q in succ.targets(p, Action::TAU) {
            if visited.insert(q) {
                order.push(q);
                stack.push(q);
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Lts {
        // s0 -tau-> s1 -a1-> s2 -tau-> s3, s3 -tau-> s3
        Lts::from_triples(4, [(0, 1, 0), (1, 2, 1), (2, 3, 0), (3, 3, 0)])
    }

    #[test]
    fn test_tau_closure_reflexive() {
        let lts = chain();
        let mut closure = tau_closure(&lts, ProcessId::new(0));
        closure.sort();
        assert_eq!(closure, vec![ProcessId::new(0), ProcessId::new(1)]);
        assert_eq!(tau_closure(&lts, ProcessId::new(1)), vec![ProcessId::new(1)]);
        assert_eq!(tau_closure(&lts, ProcessId::new(3)), vec![ProcessId::new(3)]);
    }

    #[test]
    fn test_weak_transitions() {
        let lts = chain();
        let weak = WeakLts::new(&lts);
        let a = lts.find_action("a1").unwrap();

        let mut targets: Vec<_> = weak.targets(ProcessId::new(0), a).collect();
        targets.sort();
        assert_eq!(targets, vec![ProcessId::new(2), ProcessId::new(3)]);

        let taus: Vec<_> = weak.targets(ProcessId::new(2), Action::TAU).collect();
        assert!(taus.contains(&ProcessId::new(2)));
        assert!(taus.contains(&ProcessId::new(3)));
        assert!(!weak.has_action(ProcessId::new(3), a));
    }

    #[test]
    fn test_strong_has_action() {
        let lts = chain();
        let a = lts.find_action("a1").unwrap();
        assert!(lts.has_action(ProcessId::new(1), a));
        assert!(!lts.has_action(ProcessId::new(0), a));
    }
}
