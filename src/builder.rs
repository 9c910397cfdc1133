//! Construction of the weak spectroscopy game graph.
//!
//! Starting from the attacker position `(p0, {q0})a`, every reachable position
//! is discovered with a worklist and expanded by the rules for its phase.
//! Budget dimensions below are 0-based: `e[0]` observations, `e[1]` branching
//! conjunctions, `e[2]` instable conjunctions, `e[3]` stable conjunctions,
//! `e[4]` immediate conjunctions, `e[5]` positive conjunct depth, `e[6]`
//! negative conjunct depth, `e[7]` negations.
//!
//! | From                  | Move                 | To                        | Update                  |
//! |-----------------------|----------------------|---------------------------|-------------------------|
//! | `(p,Q)a`              | delay                | `(p,Q↠)a^ε`               | `0`                     |
//! | `(p,Q)a`, `Q = ∅`     | finishing            | `(p,∅)d` (stuck)          | `0`                     |
//! | `(p,Q)a`, `Q ≠ ∅`     | early conjunction    | `(p,Q)d`                  | `-e[4]`                 |
//! | `(p,Q)a^η`            | branching accounting | `(p,Q)a`                  | `-e[0]`                 |
//! | `(p,Q)a^ε`            | procrastination      | `(p',Q)a^ε`, `p -τ-> p'≠p`| `0`                     |
//! | `(p,Q)a^ε`            | observation          | `(p',Q')a`, `p -a-> p'`   | `-e[0]`                 |
//! | `(p,Q)a^ε`            | late instable conj.  | `(p,Q)d`                  | `0`                     |
//! | `(p,Q)a^ε`, `p` stable| late stable conj.    | `(p,Q ∩ stable)d^s`       | `0`                     |
//! | `(p,Q)a^ε`            | branching conj.      | `(p,α,p',Q\Qα,Qα)d^η`     | `0`                     |
//! | `(p,Q)d`              | answer               | `(p,q)a^∧`                | `-e[2]`                 |
//! | `(p,Q)d^s`            | stable answer        | `(p,q)a^∧`                | `-e[3]`                 |
//! | `(p,∅)d^s`            | stability check      | `(p,∅)d` (stuck)          | `-e[3]`                 |
//! | `(p,α,p',Q,Qα)d^η`    | branching answer     | `(p,q)a^∧`                | `-e[1] -e[2]`           |
//! | `(p,α,p',Q,Qα)d^η`    | branching observation| `(p',Qα')a^η`             | `min{1,6} -e[1] -e[2]`  |
//! | `(p,q)a^∧`            | positive decision    | `(p,{q}↠)a^ε`             | `min{1,6}`              |
//! | `(p,q)a^∧`, `p ≠ q`   | negative decision    | `(q,{p}↠)a^ε`             | `min{1,7} -e[7]`        |

use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::energy::Update;
use crate::error::GameError;
use crate::game::Game;
use crate::position::{canonical, Position};
use crate::successors::Successors;
use crate::types::{Action, ProcessId};

const OBSERVATIONS: usize = 0;
const BRANCHING: usize = 1;
const INSTABLE: usize = 2;
const STABLE: usize = 3;
const IMMEDIATE: usize = 4;
const NEGATIONS: usize = 7;

impl Game {
    /// Builds the game for comparing `p0` against `q0`.
    ///
    /// `strong` yields the single-step transitions, `weak` the tau-saturated ones
    /// (only its tau-steps are used, to close candidate sets under internal moves).
    pub fn build<S, W>(
        strong: &S,
        weak: &W,
        p0: ProcessId,
        q0: ProcessId,
        config: &GameConfig,
    ) -> Result<Game, GameError>
    where
        S: Successors,
        W: Successors,
    {
        let mut builder = Builder {
            strong,
            weak,
            config,
            game: Game::new(config.table_bits),
            todo: Vec::new(),
        };

        let (start, _) = builder.game.add_position(Position::attack(p0, vec![q0]));
        builder.game.set_start(start);
        builder.todo.push(start);

        while let Some(index) = builder.todo.pop() {
            builder.expand(index)?;
        }

        let game = builder.game;
        info!(
            "Built game for {} vs {}: {} positions ({} defender), {} moves",
            p0,
            q0,
            game.num_positions(),
            game.defender_positions().count(),
            game.num_moves()
        );
        Ok(game)
    }
}

struct Builder<'a, S, W> {
    strong: &'a S,
    weak: &'a W,
    config: &'a GameConfig,
    game: Game,
    todo: Vec<usize>,
}

impl<S, W> Builder<'_, S, W>
where
    S: Successors,
    W: Successors,
{
    fn add(&mut self, from: usize, to: Position, update: Update, action: Option<Action>) {
        let (index, is_new) = self.game.add_position(to);
        if is_new {
            self.todo.push(index);
        }
        self.game.add_move(from, index, update, action);
    }

    fn is_stable(&self, p: ProcessId) -> bool {
        !self.strong.has_action(p, Action::TAU)
    }

    /// Reflexive tau-closure of a single process.
    fn closure(&self, q: ProcessId) -> Vec<ProcessId> {
        let mut qs: Vec<ProcessId> = self.weak.targets(q, Action::TAU).collect();
        qs.push(q);
        canonical(qs)
    }

    fn closure_all(&self, qs: &[ProcessId]) -> Vec<ProcessId> {
        canonical(qs.iter().flat_map(|&q| self.closure(q)).collect())
    }

    /// Strong `alpha`-successors of a candidate set. For tau, staying put is also allowed.
    fn step_all(&self, qs: &[ProcessId], alpha: Action) -> Vec<ProcessId> {
        let mut result: Vec<ProcessId> = qs.iter().flat_map(|&q| self.strong.targets(q, alpha)).collect();
        if alpha.is_tau() {
            result.extend_from_slice(qs);
        }
        canonical(result)
    }

    fn expand(&mut self, index: usize) -> Result<(), GameError> {
        let position = self.game.position(index).clone();
        debug!("expand {}: {}", index, position);

        match position {
            Position::Attack { p, qs } => {
                self.add(index, Position::delayed(p, self.closure_all(&qs)), Update::zero(), None);
                if qs.is_empty() {
                    self.add(index, Position::conjunction(p, qs), Update::zero(), None);
                } else {
                    self.add(index, Position::conjunction(p, qs), Update::decrement(&[IMMEDIATE]), None);
                }
            }
            Position::BranchingAttack { p, qs } => {
                self.add(index, Position::attack(p, qs), Update::decrement(&[OBSERVATIONS]), None);
            }
            Position::DelayedAttack { p, qs } => self.expand_delayed(index, p, qs)?,
            Position::Conjunction { p, qs } => {
                for q in qs {
                    self.add(index, Position::clause(p, q), Update::decrement(&[INSTABLE]), None);
                }
            }
            Position::StableConjunction { p, qs } => {
                if qs.is_empty() {
                    self.add(index, Position::conjunction(p, vec![]), Update::decrement(&[STABLE]), None);
                }
                for q in qs {
                    self.add(index, Position::clause(p, q), Update::decrement(&[STABLE]), None);
                }
            }
            Position::BranchingConjunction {
                p_prime,
                alpha,
                qs,
                qs_alpha,
                p,
            } => {
                for q in qs {
                    self.add(index, Position::clause(p, q), Update::decrement(&[BRANCHING, INSTABLE]), None);
                }
                let target = Position::branching_attack(p_prime, self.step_all(&qs_alpha, alpha));
                let update = Update::decrement(&[BRANCHING, INSTABLE]).with_min(OBSERVATIONS, 1, 6);
                self.add(index, target, update, Some(alpha));
            }
            Position::Clause { p, q } => {
                let positive = Position::delayed(p, self.closure(q));
                self.add(index, positive, Update::zero().with_min(OBSERVATIONS, 1, 6), None);
                if p != q {
                    let negative = Position::delayed(q, self.closure(p));
                    let update = Update::decrement(&[NEGATIONS]).with_min(OBSERVATIONS, 1, 7);
                    self.add(index, negative, update, None);
                }
            }
        }

        Ok(())
    }

    fn expand_delayed(&mut self, index: usize, p: ProcessId, qs: Vec<ProcessId>) -> Result<(), GameError> {
        let transitions = self.strong.transitions(p).to_vec();

        // Procrastination and observation.
        for t in &transitions {
            if t.action.is_tau() {
                if t.target != p {
                    self.add(index, Position::delayed(t.target, qs.clone()), Update::zero(), None);
                }
            } else {
                let qs_prime = self.step_all(&qs, t.action);
                let update = Update::decrement(&[OBSERVATIONS]);
                self.add(index, Position::attack(t.target, qs_prime), update, Some(t.action));
            }
        }

        // Late conjunctions.
        self.add(index, Position::conjunction(p, qs.clone()), Update::zero(), None);
        if self.is_stable(p) {
            let stable: Vec<ProcessId> = qs.iter().copied().filter(|&q| self.is_stable(q)).collect();
            self.add(index, Position::stable_conjunction(p, stable), Update::zero(), None);
        }

        // Branching conjunctions.
        for t in &transitions {
            let pool: Vec<ProcessId> = if t.action.is_tau() {
                qs.clone()
            } else {
                qs.iter().copied().filter(|&q| self.strong.has_action(q, t.action)).collect()
            };
            for (rest, chosen) in two_set_partitions(&pool, self.config)? {
                let target = Position::branching_conjunction(p, t.action, t.target, rest, chosen);
                self.add(index, target, Update::zero(), None);
            }
        }

        Ok(())
    }
}

/// All splits of `set` into `(rest, chosen)` with a non-empty `chosen` part.
///
/// There are `2^n - 1` of them, so the size of `set` is checked against the
/// configured limit first.
pub fn two_set_partitions(
    set: &[ProcessId],
    config: &GameConfig,
) -> Result<Vec<(Vec<ProcessId>, Vec<ProcessId>)>, GameError> {
    let n = set.len();
    let limit = config.partition_limit.unwrap_or(63).min(63);
    if n > limit {
        return Err(GameError::PartitionLimit { size: n, limit });
    }
    if n >= config.partition_warning {
        warn!("Partitioning {} candidates into {} splits", n, (1u64 << n) - 1);
    }

    let mut partitions = Vec::new();
    for mask in 1..(1u64 << n) {
        let mut rest = Vec::new();
        let mut chosen = Vec::new();
        for (i, &q) in set.iter().enumerate() {
            if mask & (1 << i) != 0 {
                chosen.push(q);
            } else {
                rest.push(q);
            }
        }
        partitions.push((rest, chosen));
    }
    Ok(partitions)
}
