//! The spectroscopy game graph.
//!
//! A [`Game`] owns every reachable [`Position`] (interned in a unique
//! [`Table`], so structurally equal positions share one index) and every
//! [`Move`] between them. It is built once by [`Game::build`] and not
//! modified afterwards; the solver only reads it.
//!
//! Positions are addressed by their index in the table. Structural lookups
//! go through [`Game::index_of`].

use std::fmt;

use crate::energy::Update;
use crate::error::GameError;
use crate::position::Position;
use crate::table::Table;
use crate::types::Action;

/// A game edge with the budget update it imposes on the attacker.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    pub from: usize,
    pub to: usize,
    pub update: Update,
    /// The observed action, for observation moves.
    pub action: Option<Action>,
}

pub struct Game {
    positions: Table<Position>,
    moves: Vec<Move>,
    /// Outgoing move indices per position.
    outgoing: Vec<Vec<usize>>,
    /// Incoming move indices per position.
    incoming: Vec<Vec<usize>>,
    start: usize,
}

impl Game {
    pub(crate) fn new(table_bits: usize) -> Self {
        Self {
            positions: Table::new(table_bits),
            moves: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            start: 0,
        }
    }

    /// Interns a position, returning its index and whether it is new.
    pub(crate) fn add_position(&mut self, position: Position) -> (usize, bool) {
        let (index, is_new) = self.positions.put(position);
        if is_new {
            self.outgoing.push(Vec::new());
            self.incoming.push(Vec::new());
        }
        (index, is_new)
    }

    pub(crate) fn set_start(&mut self, index: usize) {
        self.start = index;
    }

    /// Records a move unless an identical one already exists.
    pub(crate) fn add_move(&mut self, from: usize, to: usize, update: Update, action: Option<Action>) -> bool {
        let exists = self.outgoing[from]
            .iter()
            .any(|&m| self.moves[m].to == to && self.moves[m].update == update && self.moves[m].action == action);
        if exists {
            return false;
        }
        let index = self.moves.len();
        self.moves.push(Move {
            from,
            to,
            update,
            action,
        });
        self.outgoing[from].push(index);
        self.incoming[to].push(index);
        true
    }
}

impl Game {
    /// Index of the initial position.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn num_positions(&self) -> usize {
        self.positions.len()
    }

    pub fn num_moves(&self) -> usize {
        self.moves.len()
    }

    pub fn position(&self, index: usize) -> &Position {
        &self.positions[index]
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Indices of all defender positions.
    pub fn defender_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_positions()).filter(|&i| self.position(i).is_defender())
    }

    /// Index of the position structurally equal to `position`.
    pub fn index_of(&self, position: &Position) -> Option<usize> {
        self.positions.find(position)
    }

    /// Moves leaving the position with the given index.
    pub fn moves_from(&self, index: usize) -> impl Iterator<Item = &Move> {
        self.outgoing[index].iter().map(|&m| &self.moves[m])
    }

    /// Moves entering the position with the given index.
    pub fn moves_into(&self, index: usize) -> impl Iterator<Item = &Move> {
        self.incoming[index].iter().map(|&m| &self.moves[m])
    }

    /// Checks if the position has no outgoing moves.
    pub fn is_stuck(&self, index: usize) -> bool {
        self.outgoing[index].is_empty()
    }

    /// All moves whose source is structurally equal to `position`.
    pub fn possible_moves(&self, position: &Position) -> Result<Vec<&Move>, GameError> {
        let index = self
            .index_of(position)
            .ok_or_else(|| GameError::UnknownPosition(position.to_string()))?;
        Ok(self.moves_from(index).collect())
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("positions", &self.num_positions())
            .field("defender_positions", &self.defender_positions().count())
            .field("moves", &self.num_moves())
            .field("start", &self.start)
            .finish()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, position) in self.positions().enumerate() {
            writeln!(f, "{}: {}", i, position)?;
            for m in self.moves_from(i) {
                writeln!(f, "    --{}--> {}", m.update, m.to)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::types::ProcessId;

    #[test]
    fn test_add_position_dedup() {
        let mut game = Game::new(4);
        let p = ProcessId::new(0);
        let q = ProcessId::new(1);
        let (a, new_a) = game.add_position(Position::attack(p, vec![q]));
        let (b, new_b) = game.add_position(Position::attack(p, vec![q, q]));
        assert!(new_a);
        assert!(!new_b);
        assert_eq!(a, b);
        assert_eq!(game.num_positions(), 1);
    }

    #[test]
    fn test_add_move_dedup() {
        let mut game = Game::new(4);
        let p = ProcessId::new(0);
        let (a, _) = game.add_position(Position::attack(p, vec![]));
        let (d, _) = game.add_position(Position::conjunction(p, vec![]));
        assert!(game.add_move(a, d, Update::zero(), None));
        assert!(!game.add_move(a, d, Update::zero(), None));
        assert!(game.add_move(a, d, Update::decrement(&[4]), None));
        assert_eq!(game.num_moves(), 2);
        assert_eq!(game.moves_into(d).count(), 2);
        assert!(game.is_stuck(d));
        assert_eq!(game.defender_positions().collect::<Vec<_>>(), vec![d]);
    }

    #[test]
    fn test_possible_moves() {
        let mut game = Game::new(4);
        let p = ProcessId::new(0);
        let (a, _) = game.add_position(Position::attack(p, vec![p]));
        let (d, _) = game.add_position(Position::conjunction(p, vec![p]));
        game.add_move(a, d, Update::zero(), None);

        let moves = game.possible_moves(&Position::attack(p, vec![p])).unwrap();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, d);

        let missing = Position::delayed(p, vec![p]);
        assert!(matches!(game.possible_moves(&missing), Err(GameError::UnknownPosition(_))));
    }
}
