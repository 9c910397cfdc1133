//! One-call comparison of two processes.
//!
//! # Examples
//!
//! ```
//! use spectroscopy_rs::config::GameConfig;
//! use spectroscopy_rs::lts::Lts;
//! use spectroscopy_rs::spectroscopy::Spectroscopy;
//! use spectroscopy_rs::spectrum::Notion;
//!
//! // P = a.0 + b.0, Q = a.0
//! let mut lts = Lts::new();
//! let p = lts.add_state("P");
//! let q = lts.add_state("Q");
//! let nil = lts.add_state("0");
//! let a = lts.action("a");
//! let b = lts.action("b");
//! lts.add_transition(p, a, nil);
//! lts.add_transition(p, b, nil);
//! lts.add_transition(q, a, nil);
//!
//! let result = Spectroscopy::compare(&lts, p, q, &GameConfig::default()).unwrap();
//! assert!(!result.classify().holds(Notion::Traces));
//!
//! let result = Spectroscopy::compare(&lts, q, p, &GameConfig::default()).unwrap();
//! assert!(result.classify().holds(Notion::Sim));
//! ```

use log::info;
use serde::Serialize;

use crate::config::GameConfig;
use crate::energy::EnergySet;
use crate::error::GameError;
use crate::game::Game;
use crate::lts::Lts;
use crate::solver::WinningBudgets;
use crate::spectrum::Classification;
use crate::successors::WeakLts;
use crate::types::ProcessId;

/// A solved game for one ordered pair of processes.
#[derive(Debug)]
pub struct Spectroscopy {
    game: Game,
    budgets: WinningBudgets,
}

impl Spectroscopy {
    /// Builds and solves the game for `p` against `q`.
    pub fn compare(lts: &Lts, p: ProcessId, q: ProcessId, config: &GameConfig) -> Result<Self, GameError> {
        for process in [p, q] {
            if !lts.contains(process) {
                return Err(GameError::UnknownProcess(process));
            }
        }
        let weak = WeakLts::new(lts);
        let game = Game::build(lts, &weak, p, q, config)?;
        let budgets = game.winning_budgets();
        Ok(Self { game, budgets })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn budgets(&self) -> &WinningBudgets {
        &self.budgets
    }

    /// Minimal budgets with which `p` can be distinguished from `q`.
    pub fn start_budgets(&self) -> &EnergySet {
        self.budgets.start()
    }

    /// Preorders relating `p` to `q`.
    pub fn classify(&self) -> Classification {
        Classification::from_budgets(self.start_budgets())
    }
}

/// Both directions of a comparison.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub left: String,
    pub right: String,
    /// Minimal budgets distinguishing `left` from `right`.
    pub forward: EnergySet,
    /// Minimal budgets distinguishing `right` from `left`.
    pub backward: EnergySet,
    /// Preorders relating `left` to `right`.
    pub preorders: Classification,
    /// Equivalences relating `left` and `right`.
    pub equivalences: Classification,
}

impl Report {
    /// Runs the game in both directions.
    pub fn new(lts: &Lts, p: ProcessId, q: ProcessId, config: &GameConfig) -> Result<Self, GameError> {
        let forward = Spectroscopy::compare(lts, p, q, config)?;
        let backward = Spectroscopy::compare(lts, q, p, config)?;

        let preorders = forward.classify();
        let equivalences = preorders.intersect(&backward.classify());
        info!("{} vs {}: equivalent w.r.t. {}", lts.name(p), lts.name(q), equivalences);

        Ok(Self {
            left: lts.name(p).to_string(),
            right: lts.name(q).to_string(),
            forward: forward.start_budgets().clone(),
            backward: backward.start_budgets().clone(),
            preorders,
            equivalences,
        })
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::energy::Energy;
    use crate::spectrum::Notion;

    #[test]
    fn test_unknown_process() {
        let lts = Lts::from_triples(2, [(0, 1, 1)]);
        let config = GameConfig::default();
        let err = Spectroscopy::compare(&lts, ProcessId::new(0), ProcessId::new(5), &config).unwrap_err();
        assert_eq!(err, GameError::UnknownProcess(ProcessId::new(5)));
    }

    #[test]
    fn test_identical_processes() {
        let lts = Lts::from_triples(3, [(0, 1, 1), (0, 2, 0), (2, 0, 2)]);
        let p = ProcessId::new(0);
        let result = Spectroscopy::compare(&lts, p, p, &GameConfig::default()).unwrap();
        assert!(result.start_budgets().is_empty());
        assert!(Notion::ALL.into_iter().all(|n| result.classify().holds(n)));
    }

    #[test]
    fn test_deadlock_vs_action() {
        // s0 -a1-> s1, s1 stuck
        let lts = Lts::from_triples(2, [(0, 1, 1)]);
        let result = Spectroscopy::compare(&lts, ProcessId::new(0), ProcessId::new(1), &GameConfig::default()).unwrap();
        assert_eq!(result.start_budgets(), &EnergySet::singleton(Energy::unit(0)));
        assert!(!result.classify().holds(Notion::Enabledness));

        let result = Spectroscopy::compare(&lts, ProcessId::new(1), ProcessId::new(0), &GameConfig::default()).unwrap();
        assert!(result.classify().holds(Notion::Traces));
        assert!(!result.classify().holds(Notion::Failures));
    }

    #[test]
    fn test_report() {
        let lts = Lts::from_triples(2, [(0, 1, 1)]);
        let report = Report::new(&lts, ProcessId::new(1), ProcessId::new(0), &GameConfig::default()).unwrap();
        assert_eq!(report.left, "s1");
        assert_eq!(report.right, "s0");
        assert!(report.preorders.holds(Notion::Traces));
        assert!(!report.equivalences.holds(Notion::Traces));
    }
}
