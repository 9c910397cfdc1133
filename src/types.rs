///! Type-safe wrappers for processes and actions.
///!
///! This module provides newtype wrappers that enforce compile-time distinction
///! between process identifiers and action labels, both of which are plain
///! integers underneath.
use std::fmt;

/// A process (state) identifier inside a transition system.
///
/// Identifiers are dense and 0-indexed, so they can be used directly
/// as indices into per-state tables.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ProcessId(u32);

impl ProcessId {
    /// Creates a new process identifier.
    pub const fn new(id: u32) -> Self {
        ProcessId(id)
    }

    /// Returns the raw identifier as a `u32`.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the identifier as an index into per-state tables.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl From<ProcessId> for u32 {
    fn from(process: ProcessId) -> Self {
        process.0
    }
}

impl From<u32> for ProcessId {
    fn from(id: u32) -> Self {
        ProcessId(id)
    }
}

/// An interned action label.
///
/// The label strings themselves live in the [`Lts`][crate::lts::Lts].
/// Label `0` is reserved for the internal action `tau`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Action(u32);

impl Action {
    /// The silent (internal) action.
    pub const TAU: Action = Action(0);

    /// Creates an action from a raw label index.
    pub const fn new(id: u32) -> Self {
        Action(id)
    }

    /// Returns the raw label index.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Checks if this is the silent action.
    pub const fn is_tau(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_tau() {
            write!(f, "tau")
        } else {
            write!(f, "a{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_creation() {
        let p = ProcessId::new(3);
        let q = ProcessId::from(5);
        assert_eq!(p.id(), 3);
        assert_eq!(q.index(), 5);
        assert!(p < q);
        assert_eq!(p.to_string(), "p3");
    }

    #[test]
    fn test_tau() {
        assert!(Action::TAU.is_tau());
        assert!(!Action::new(1).is_tau());
        assert_eq!(Action::TAU.to_string(), "tau");
    }
}
