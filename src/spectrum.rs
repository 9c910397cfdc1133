//! Named notions of the weak linear-time--branching-time spectrum.
//!
//! Each [`Notion`] is characterized by a threshold budget: a pair of processes
//! is related by the notion iff the attacker cannot win the spectroscopy game
//! with that budget, i.e. iff no minimal winning budget lies below the threshold.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::energy::{Energy, EnergySet};

const INF: u32 = Energy::INFINITY;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub enum Notion {
    #[serde(rename = "srbbisim")]
    StabilityRespectingBranchingBisim,
    #[serde(rename = "bbisim")]
    BranchingBisim,
    #[serde(rename = "etabisim")]
    EtaBisim,
    #[serde(rename = "srdbisim")]
    StabilityRespectingDelayBisim,
    #[serde(rename = "dbisim")]
    DelayBisim,
    #[serde(rename = "weakbisim")]
    WeakBisim,
    #[serde(rename = "sbisim")]
    StableBisim,
    #[serde(rename = "etasim")]
    EtaSim,
    #[serde(rename = "2nested")]
    TwoNestedSim,
    #[serde(rename = "readysim")]
    ReadySim,
    #[serde(rename = "sreadysim")]
    StableReadySim,
    #[serde(rename = "sim")]
    Sim,
    #[serde(rename = "pfutures")]
    PossibleFutures,
    #[serde(rename = "ifutures")]
    ImpossibleFutures,
    #[serde(rename = "rtraces")]
    ReadyTraces,
    #[serde(rename = "ftraces")]
    FailureTraces,
    #[serde(rename = "readiness")]
    Readiness,
    #[serde(rename = "failures")]
    Failures,
    #[serde(rename = "sreadiness")]
    StableReadiness,
    #[serde(rename = "sfailures")]
    StableFailures,
    #[serde(rename = "traces")]
    Traces,
    #[serde(rename = "enabledness")]
    Enabledness,
}

impl Notion {
    /// All notions, from the finest to the coarsest.
    pub const ALL: [Notion; 22] = [
        Notion::StabilityRespectingBranchingBisim,
        Notion::BranchingBisim,
        Notion::EtaBisim,
        Notion::StabilityRespectingDelayBisim,
        Notion::DelayBisim,
        Notion::WeakBisim,
        Notion::StableBisim,
        Notion::EtaSim,
        Notion::TwoNestedSim,
        Notion::ReadySim,
        Notion::StableReadySim,
        Notion::Sim,
        Notion::PossibleFutures,
        Notion::ImpossibleFutures,
        Notion::ReadyTraces,
        Notion::FailureTraces,
        Notion::Readiness,
        Notion::Failures,
        Notion::StableReadiness,
        Notion::StableFailures,
        Notion::Traces,
        Notion::Enabledness,
    ];

    /// Short name, as used in serialized output.
    pub fn name(self) -> &'static str {
        match self {
            Notion::StabilityRespectingBranchingBisim => "srbbisim",
            Notion::BranchingBisim => "bbisim",
            Notion::EtaBisim => "etabisim",
            Notion::StabilityRespectingDelayBisim => "srdbisim",
            Notion::DelayBisim => "dbisim",
            Notion::WeakBisim => "weakbisim",
            Notion::StableBisim => "sbisim",
            Notion::EtaSim => "etasim",
            Notion::TwoNestedSim => "2nested",
            Notion::ReadySim => "readysim",
            Notion::StableReadySim => "sreadysim",
            Notion::Sim => "sim",
            Notion::PossibleFutures => "pfutures",
            Notion::ImpossibleFutures => "ifutures",
            Notion::ReadyTraces => "rtraces",
            Notion::FailureTraces => "ftraces",
            Notion::Readiness => "readiness",
            Notion::Failures => "failures",
            Notion::StableReadiness => "sreadiness",
            Notion::StableFailures => "sfailures",
            Notion::Traces => "traces",
            Notion::Enabledness => "enabledness",
        }
    }

    pub fn from_name(name: &str) -> Option<Notion> {
        Notion::ALL.into_iter().find(|n| n.name() == name)
    }

    /// Largest budget with which the attacker must not be able to win.
    pub fn threshold(self) -> Energy {
        Energy::new(match self {
            Notion::StabilityRespectingBranchingBisim => [INF, INF, INF, INF, INF, INF, INF, INF],
            Notion::BranchingBisim => [INF, INF, INF, 0, INF, INF, INF, INF],
            Notion::EtaBisim => [INF, INF, INF, 0, 0, INF, INF, INF],
            Notion::StabilityRespectingDelayBisim => [INF, 0, INF, INF, INF, INF, INF, INF],
            Notion::DelayBisim => [INF, 0, INF, 0, INF, INF, INF, INF],
            Notion::WeakBisim => [INF, 0, INF, 0, 0, INF, INF, INF],
            Notion::StableBisim => [INF, 0, 0, INF, INF, INF, INF, INF],
            Notion::EtaSim => [INF, INF, INF, 0, 0, INF, 0, 0],
            Notion::TwoNestedSim => [INF, 0, INF, 0, 0, INF, INF, 1],
            Notion::ReadySim => [INF, 0, INF, 0, 0, INF, 1, 1],
            Notion::StableReadySim => [INF, 0, 0, INF, 0, INF, 1, 1],
            Notion::Sim => [INF, 0, INF, 0, 0, INF, 0, 0],
            Notion::PossibleFutures => [INF, 0, 1, 0, 0, INF, INF, 1],
            Notion::ImpossibleFutures => [INF, 0, 1, 0, 0, 0, INF, 1],
            Notion::ReadyTraces => [INF, 0, INF, 0, 0, 1, 1, 1],
            Notion::FailureTraces => [INF, 0, INF, 0, 0, 0, 1, 1],
            Notion::Readiness => [INF, 0, 1, 0, 0, 1, 1, 1],
            Notion::Failures => [INF, 0, 1, 0, 0, 0, 1, 1],
            Notion::StableReadiness => [INF, 0, 0, 1, 0, 1, 1, 1],
            Notion::StableFailures => [INF, 0, 0, 1, 0, 0, 1, 1],
            Notion::Traces => [INF, 0, 0, 0, 0, 0, 0, 0],
            Notion::Enabledness => [1, 0, 0, 0, 0, 0, 0, 0],
        })
    }

    /// Checks whether relating by `self` implies relating by `other`.
    pub fn is_finer_than(self, other: Notion) -> bool {
        other.threshold().leq(&self.threshold())
    }
}

impl fmt::Display for Notion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Verdict for every [`Notion`], derived from a set of minimal winning budgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Classification(BTreeMap<Notion, bool>);

impl Classification {
    pub fn from_budgets(budgets: &EnergySet) -> Self {
        Self(
            Notion::ALL
                .into_iter()
                .map(|n| (n, !budgets.covers(&n.threshold())))
                .collect(),
        )
    }

    pub fn holds(&self, notion: Notion) -> bool {
        self.0.get(&notion).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Notion, bool)> + '_ {
        self.0.iter().map(|(&n, &b)| (n, b))
    }

    /// Notions that hold in both classifications.
    ///
    /// Intersecting the two directions of a comparison turns preorders into equivalences.
    pub fn intersect(&self, other: &Classification) -> Classification {
        Self(self.iter().map(|(n, b)| (n, b && other.holds(n))).collect())
    }

    /// Holding notions not implied by any other holding notion.
    pub fn finest(&self) -> Vec<Notion> {
        let holding: Vec<Notion> = self.iter().filter(|&(_, b)| b).map(|(n, _)| n).collect();
        holding
            .iter()
            .copied()
            .filter(|&n| !holding.iter().any(|&m| m != n && m.is_finer_than(n) && !n.is_finer_than(m)))
            .collect()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (n, _) in self.iter().filter(|&(_, b)| b) {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", n)?;
            first = false;
        }
        if first {
            write!(f, "(none)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for n in Notion::ALL {
            assert_eq!(Notion::from_name(n.name()), Some(n));
        }
        assert_eq!(Notion::from_name("bisim"), None);
    }

    #[test]
    fn test_empty_budgets_relate_everything() {
        let c = Classification::from_budgets(&EnergySet::empty());
        assert!(Notion::ALL.into_iter().all(|n| c.holds(n)));
        assert_eq!(c.finest(), vec![Notion::StabilityRespectingBranchingBisim]);
    }

    #[test]
    fn test_enabledness_distinguishes_everything() {
        let c = Classification::from_budgets(&EnergySet::singleton(Energy::unit(0)));
        assert!(Notion::ALL.into_iter().all(|n| !c.holds(n)));
        assert!(c.finest().is_empty());
        assert_eq!(c.to_string(), "(none)");
    }

    #[test]
    fn test_stable_conjunction_budget() {
        // Needs a stable conjunction and a negation.
        let budgets = EnergySet::singleton(Energy::new([1, 0, 0, 1, 0, 0, 1, 1]));
        let c = Classification::from_budgets(&budgets);
        assert!(c.holds(Notion::BranchingBisim));
        assert!(c.holds(Notion::WeakBisim));
        assert!(c.holds(Notion::Failures));
        assert!(!c.holds(Notion::StableFailures));
        assert!(!c.holds(Notion::StableBisim));
        assert!(!c.holds(Notion::StabilityRespectingDelayBisim));
    }

    #[test]
    fn test_finer_implies_coarser() {
        assert!(Notion::BranchingBisim.is_finer_than(Notion::WeakBisim));
        assert!(Notion::WeakBisim.is_finer_than(Notion::Sim));
        assert!(Notion::Failures.is_finer_than(Notion::Traces));
        assert!(!Notion::Traces.is_finer_than(Notion::Failures));
        assert!(!Notion::StableBisim.is_finer_than(Notion::BranchingBisim));
    }

    #[test]
    fn test_intersect() {
        let a = Classification::from_budgets(&EnergySet::empty());
        let b = Classification::from_budgets(&EnergySet::singleton(Energy::new([1, 0, 0, 0, 0, 0, 0, 1])));
        let c = a.intersect(&b);
        assert_eq!(c, b);
        assert!(c.holds(Notion::Sim));
        assert!(!c.holds(Notion::ReadySim));
    }

    #[test]
    fn test_display() {
        let c = Classification::from_budgets(&EnergySet::singleton(Energy::new([2, 0, 0, 0, 0, 0, 0, 0])));
        assert_eq!(c.to_string(), "enabledness");
    }
}
