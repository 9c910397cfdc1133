//! Positions of the weak spectroscopy game.
//!
//! Each variant is one phase of the game. Attacker positions:
//!
//! | Variant           | Notation          | Meaning                                           |
//! |-------------------|-------------------|---------------------------------------------------|
//! | `Attack`          | `(p, Q)a`         | `p` against every candidate in `Q`                |
//! | `DelayedAttack`   | `(p, Q)a^ε`       | after the defender moved `Q` along internal steps |
//! | `BranchingAttack` | `(p, Q)a^η`       | right after a branching observation               |
//! | `Clause`          | `(p, q)a^∧`       | one conjunct, `p` against a single `q`            |
//!
//! Defender positions:
//!
//! | Variant                 | Notation               | Meaning                          |
//! |-------------------------|------------------------|----------------------------------|
//! | `Conjunction`           | `(p, Q)d`              | instable conjunction challenge   |
//! | `StableConjunction`     | `(p, Q)d^s`            | stable conjunction challenge     |
//! | `BranchingConjunction`  | `(p, α, p', Q, Qα)d^η` | branching conjunction challenge  |
//!
//! Candidate sets are kept sorted and duplicate-free, so derived equality is
//! structural equality and two independently built positions describing the
//! same game state are equal.

use std::fmt;

use crate::types::{Action, ProcessId};
use crate::utils::{mix, mix_all, pairing2, MyHash};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Position {
    Attack {
        p: ProcessId,
        qs: Vec<ProcessId>,
    },
    DelayedAttack {
        p: ProcessId,
        qs: Vec<ProcessId>,
    },
    BranchingAttack {
        p: ProcessId,
        qs: Vec<ProcessId>,
    },
    Clause {
        p: ProcessId,
        q: ProcessId,
    },
    Conjunction {
        p: ProcessId,
        qs: Vec<ProcessId>,
    },
    StableConjunction {
        p: ProcessId,
        qs: Vec<ProcessId>,
    },
    BranchingConjunction {
        p: ProcessId,
        alpha: Action,
        p_prime: ProcessId,
        qs: Vec<ProcessId>,
        qs_alpha: Vec<ProcessId>,
    },
}

/// Sorts and deduplicates a candidate set.
pub fn canonical(mut qs: Vec<ProcessId>) -> Vec<ProcessId> {
    qs.sort_unstable();
    qs.dedup();
    qs
}

impl Position {
    pub fn attack(p: ProcessId, qs: Vec<ProcessId>) -> Self {
        Position::Attack { p, qs: canonical(qs) }
    }

    pub fn delayed(p: ProcessId, qs: Vec<ProcessId>) -> Self {
        Position::DelayedAttack { p, qs: canonical(qs) }
    }

    pub fn branching_attack(p: ProcessId, qs: Vec<ProcessId>) -> Self {
        Position::BranchingAttack { p, qs: canonical(qs) }
    }

    pub fn clause(p: ProcessId, q: ProcessId) -> Self {
        Position::Clause { p, q }
    }

    pub fn conjunction(p: ProcessId, qs: Vec<ProcessId>) -> Self {
        Position::Conjunction { p, qs: canonical(qs) }
    }

    pub fn stable_conjunction(p: ProcessId, qs: Vec<ProcessId>) -> Self {
        Position::StableConjunction { p, qs: canonical(qs) }
    }

    pub fn branching_conjunction(
        p: ProcessId,
        alpha: Action,
        p_prime: ProcessId,
        qs: Vec<ProcessId>,
        qs_alpha: Vec<ProcessId>,
    ) -> Self {
        Position::BranchingConjunction {
            p,
            alpha,
            p_prime,
            qs: canonical(qs),
            qs_alpha: canonical(qs_alpha),
        }
    }

    /// The attacker-challenged (left-hand) process.
    pub fn p(&self) -> ProcessId {
        match self {
            Position::Attack { p, .. }
            | Position::DelayedAttack { p, .. }
            | Position::BranchingAttack { p, .. }
            | Position::Clause { p, .. }
            | Position::Conjunction { p, .. }
            | Position::StableConjunction { p, .. }
            | Position::BranchingConjunction { p, .. } => *p,
        }
    }

    /// The candidate set, if this position carries one.
    pub fn qs(&self) -> Option<&[ProcessId]> {
        match self {
            Position::Attack { qs, .. }
            | Position::DelayedAttack { qs, .. }
            | Position::BranchingAttack { qs, .. }
            | Position::Conjunction { qs, .. }
            | Position::StableConjunction { qs, .. }
            | Position::BranchingConjunction { qs, .. } => Some(qs),
            Position::Clause { .. } => None,
        }
    }

    pub fn is_defender(&self) -> bool {
        matches!(
            self,
            Position::Conjunction { .. } | Position::StableConjunction { .. } | Position::BranchingConjunction { .. }
        )
    }

    pub fn is_attacker(&self) -> bool {
        !self.is_defender()
    }

    fn tag(&self) -> u64 {
        match self {
            Position::Attack { .. } => 1,
            Position::DelayedAttack { .. } => 2,
            Position::BranchingAttack { .. } => 3,
            Position::Clause { .. } => 4,
            Position::Conjunction { .. } => 5,
            Position::StableConjunction { .. } => 6,
            Position::BranchingConjunction { .. } => 7,
        }
    }
}

fn ids(qs: &[ProcessId]) -> impl Iterator<Item = u64> + '_ {
    qs.iter().map(|q| q.id() as u64)
}

impl MyHash for Position {
    fn hash(&self) -> u64 {
        let h = mix(self.tag(), self.p().id() as u64);
        match self {
            Position::Clause { q, .. } => mix(h, pairing2(self.p().id(), q.id())),
            Position::BranchingConjunction {
                alpha,
                p_prime,
                qs,
                qs_alpha,
                ..
            } => {
                let h = mix(h, pairing2(alpha.id(), p_prime.id()));
                let h = mix_all(h, ids(qs));
                // Separator, so that moving a member between the two sets changes the hash.
                mix_all(mix(h, u64::MAX), ids(qs_alpha))
            }
            Position::Attack { qs, .. }
            | Position::DelayedAttack { qs, .. }
            | Position::BranchingAttack { qs, .. }
            | Position::Conjunction { qs, .. }
            | Position::StableConjunction { qs, .. } => mix_all(h, ids(qs)),
        }
    }
}

fn fmt_set(f: &mut fmt::Formatter<'_>, qs: &[ProcessId]) -> fmt::Result {
    write!(f, "{{")?;
    for (i, q) in qs.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", q)?;
    }
    write!(f, "}}")
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Clause { p, q } => write!(f, "({}, {})a^∧", p, q),
            Position::BranchingConjunction {
                p,
                alpha,
                p_prime,
                qs,
                qs_alpha,
            } => {
                write!(f, "({}, {}, {}, ", p, alpha, p_prime)?;
                fmt_set(f, qs)?;
                write!(f, ", ")?;
                fmt_set(f, qs_alpha)?;
                write!(f, ")d^η")
            }
            _ => {
                write!(f, "({}, ", self.p())?;
                fmt_set(f, self.qs().unwrap_or_default())?;
                let suffix = match self {
                    Position::Attack { .. } => "a",
                    Position::DelayedAttack { .. } => "a^ε",
                    Position::BranchingAttack { .. } => "a^η",
                    Position::Conjunction { .. } => "d",
                    _ => "d^s",
                };
                write!(f, "){}", suffix)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ps(ids: &[u32]) -> Vec<ProcessId> {
        ids.iter().map(|&i| ProcessId::new(i)).collect()
    }

    #[test]
    fn test_structural_equality() {
        let p = ProcessId::new(0);
        let a = Position::attack(p, ps(&[3, 1, 2, 1]));
        let b = Position::attack(p, ps(&[1, 2, 3]));
        assert_eq!(a, b);
        assert_eq!(MyHash::hash(&a), MyHash::hash(&b));
        assert_ne!(a, Position::delayed(p, ps(&[1, 2, 3])));
        assert_ne!(a, Position::conjunction(p, ps(&[1, 2, 3])));
    }

    #[test]
    fn test_branching_sets_are_distinguished() {
        let p = ProcessId::new(0);
        let x = Position::branching_conjunction(p, Action::TAU, p, ps(&[1]), ps(&[2]));
        let y = Position::branching_conjunction(p, Action::TAU, p, ps(&[2]), ps(&[1]));
        let z = Position::branching_conjunction(p, Action::new(1), p, ps(&[1]), ps(&[2]));
        assert_ne!(x, y);
        assert_ne!(x, z);
        assert_ne!(MyHash::hash(&x), MyHash::hash(&y));
    }

    #[test]
    fn test_owner() {
        let p = ProcessId::new(0);
        assert!(Position::attack(p, vec![]).is_attacker());
        assert!(Position::clause(p, p).is_attacker());
        assert!(Position::stable_conjunction(p, vec![]).is_defender());
        assert!(Position::branching_conjunction(p, Action::TAU, p, vec![], vec![]).is_defender());
        assert_eq!(Position::clause(p, ProcessId::new(4)).qs(), None);
    }

    #[test]
    fn test_display() {
        let p = ProcessId::new(0);
        assert_eq!(Position::delayed(p, ps(&[2, 1])).to_string(), "(p0, {p1,p2})a^ε");
        assert_eq!(Position::clause(p, ProcessId::new(1)).to_string(), "(p0, p1)a^∧");
        assert_eq!(
            Position::branching_conjunction(p, Action::TAU, ProcessId::new(1), vec![], ps(&[2])).to_string(),
            "(p0, tau, p1, {}, {p2})d^η"
        );
    }
}
