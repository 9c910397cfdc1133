//! Winning budgets of the spectroscopy game.
//!
//! For each position the solver computes the antichain of minimal budgets with
//! which the attacker wins from there. The computation is a backward fixpoint:
//! stuck defender positions are won with any budget, and every change at a
//! position is propagated to the sources of its incoming moves until nothing
//! changes any more.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::energy::{Energy, EnergySet};
use crate::error::GameError;
use crate::game::Game;
use crate::position::Position;

/// Minimal attacker-winning budgets, indexed like the positions of a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningBudgets {
    budgets: Vec<EnergySet>,
    start: usize,
}

impl WinningBudgets {
    pub fn get(&self, index: usize) -> &EnergySet {
        &self.budgets[index]
    }

    /// Budgets at the initial position of the game.
    pub fn start(&self) -> &EnergySet {
        &self.budgets[self.start]
    }

    /// Budgets at the position structurally equal to `position`.
    pub fn for_position(&self, game: &Game, position: &Position) -> Result<&EnergySet, GameError> {
        let index = game
            .index_of(position)
            .ok_or_else(|| GameError::UnknownPosition(position.to_string()))?;
        Ok(self.get(index))
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnergySet> {
        self.budgets.iter()
    }
}

impl Game {
    /// Computes the minimal winning budgets of every position.
    pub fn winning_budgets(&self) -> WinningBudgets {
        let n = self.num_positions();
        let mut budgets = vec![EnergySet::empty(); n];
        let mut queued = vec![false; n];
        let mut todo = Vec::new();

        for i in self.defender_positions().filter(|&i| self.is_stuck(i)) {
            queued[i] = true;
            todo.push(i);
        }
        debug!("Seeded {} stuck defender positions", todo.len());

        let mut steps = 0usize;
        let mut updates = 0usize;
        while let Some(i) = todo.pop() {
            queued[i] = false;
            steps += 1;

            let new = self.recompute(i, &budgets);
            if new == budgets[i] {
                continue;
            }
            debug!("{}: {} -> {}", self.position(i), budgets[i], new);
            budgets[i] = new;
            updates += 1;

            for m in self.moves_into(i) {
                if !queued[m.from] {
                    queued[m.from] = true;
                    todo.push(m.from);
                }
            }
        }

        info!(
            "Solved game with {} positions in {} steps ({} updates), start budgets {}",
            n,
            steps,
            updates,
            budgets[self.start()]
        );

        WinningBudgets {
            budgets,
            start: self.start(),
        }
    }

    fn recompute(&self, index: usize, budgets: &[EnergySet]) -> EnergySet {
        if self.position(index).is_attacker() {
            // Any move will do: pool the inverted budgets of all successors.
            let candidates = self
                .moves_from(index)
                .flat_map(|m| budgets[m.to].iter().map(move |e| m.update.inverse(e)));
            return EnergySet::minimize(budgets[index].iter().copied().chain(candidates));
        }

        if self.is_stuck(index) {
            return EnergySet::singleton(Energy::zero());
        }

        // The defender picks the successor, so the attacker must cover one budget of each.
        let mut groups: BTreeMap<usize, Vec<Energy>> = BTreeMap::new();
        for m in self.moves_from(index) {
            groups
                .entry(m.to)
                .or_default()
                .extend(budgets[m.to].iter().map(|e| m.update.inverse(e)));
        }
        if groups.values().any(|g| g.is_empty()) {
            return EnergySet::empty();
        }

        // Fold over all groups, not just pairs: a budget must cover every successor at once.
        let mut groups = groups.into_values().map(EnergySet::minimize);
        let Some(first) = groups.next() else {
            return EnergySet::empty();
        };
        let combined = groups.fold(first, |acc, g| acc.combine(&g));
        budgets[index].union(&combined)
    }
}
