//! Labelled transition systems.
//!
//! An [`Lts`] owns a set of states (identified by [`ProcessId`]), a table of
//! interned action labels, and the strong transition relation between states.
//! It is the process graph that the spectroscopy game is played on.
//!
//! # Examples
//!
//! ```
//! use spectroscopy_rs::lts::Lts;
//!
//! let mut lts = Lts::new();
//! let p = lts.add_state("P");
//! let q = lts.add_state("Q");
//! let a = lts.action("a");
//! lts.add_transition(p, a, q);
//!
//! assert_eq!(lts.num_states(), 2);
//! assert_eq!(lts.transitions_of(p).len(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::types::{Action, ProcessId};

/// A single outgoing transition: the action label and the target state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Transition {
    pub action: Action,
    pub target: ProcessId,
}

impl Transition {
    pub fn new(action: Action, target: ProcessId) -> Self {
        Self { action, target }
    }
}

#[derive(Debug, Clone)]
pub struct Lts {
    names: Vec<String>,
    transitions: Vec<Vec<Transition>>,
    labels: Vec<String>,
    label_index: HashMap<String, Action>,
}

impl Default for Lts {
    fn default() -> Self {
        Self::new()
    }
}

impl Lts {
    pub fn new() -> Self {
        let mut label_index = HashMap::new();
        label_index.insert("tau".to_string(), Action::TAU);
        Self {
            names: Vec::new(),
            transitions: Vec::new(),
            labels: vec!["tau".to_string()],
            label_index,
        }
    }

    /// Builds an LTS with `num_states` anonymous states from `(source, target, label)` triples.
    ///
    /// Label `0` is `tau`; every other label `k` is named `a{k}`.
    pub fn from_triples(num_states: u32, triples: impl IntoIterator<Item = (u32, u32, u32)>) -> Self {
        let mut lts = Lts::new();
        for i in 0..num_states {
            lts.add_state(format!("s{}", i));
        }
        for (source, target, label) in triples {
            let action = if label == 0 {
                Action::TAU
            } else {
                lts.action(&format!("a{}", label))
            };
            lts.add_transition(ProcessId::new(source), action, ProcessId::new(target));
        }
        lts
    }

    /// Number of states.
    pub fn num_states(&self) -> usize {
        self.names.len()
    }

    /// Total number of transitions.
    pub fn num_transitions(&self) -> usize {
        self.transitions.iter().map(|ts| ts.len()).sum()
    }

    /// Iterate over all states.
    pub fn states(&self) -> impl Iterator<Item = ProcessId> {
        (0..self.names.len() as u32).map(ProcessId::new)
    }

    pub fn contains(&self, process: ProcessId) -> bool {
        process.index() < self.names.len()
    }

    /// Add a new state with the given display name.
    pub fn add_state(&mut self, name: impl Into<String>) -> ProcessId {
        let id = ProcessId::new(self.names.len() as u32);
        self.names.push(name.into());
        self.transitions.push(Vec::new());
        id
    }

    pub fn name(&self, process: ProcessId) -> &str {
        &self.names[process.index()]
    }

    /// Find a state by its display name.
    pub fn process(&self, name: &str) -> Option<ProcessId> {
        self.names.iter().position(|n| n == name).map(|i| ProcessId::new(i as u32))
    }

    /// Intern an action label. `"tau"` always maps to [`Action::TAU`].
    pub fn action(&mut self, label: &str) -> Action {
        if let Some(&action) = self.label_index.get(label) {
            return action;
        }
        let action = Action::new(self.labels.len() as u32);
        self.labels.push(label.to_string());
        self.label_index.insert(label.to_string(), action);
        action
    }

    /// Look up an already interned action label.
    pub fn find_action(&self, label: &str) -> Option<Action> {
        self.label_index.get(label).copied()
    }

    pub fn label(&self, action: Action) -> &str {
        &self.labels[action.id() as usize]
    }

    /// Add a transition, ignoring exact duplicates.
    pub fn add_transition(&mut self, source: ProcessId, action: Action, target: ProcessId) {
        assert!(self.contains(source), "Unknown source state {}", source);
        assert!(self.contains(target), "Unknown target state {}", target);
        let t = Transition::new(action, target);
        let ts = &mut self.transitions[source.index()];
        if !ts.contains(&t) {
            ts.push(t);
        }
    }

    /// Outgoing strong transitions of a state.
    pub fn transitions_of(&self, process: ProcessId) -> &[Transition] {
        &self.transitions[process.index()]
    }
}

impl fmt::Display for Lts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in self.states() {
            for t in self.transitions_of(p) {
                writeln!(f, "{} --{}--> {}", self.name(p), self.label(t.action), self.name(t.target))?;
            }
        }
        Ok(())
    }
}
