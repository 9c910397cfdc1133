//! Energy budgets, budget updates and antichains of budgets.
//!
//! An [`Energy`] is an 8-dimensional vector of naturals (with `u32::MAX`
//! standing for infinity), ordered componentwise. The dimensions count, in
//! order: observations, branching conjunctions, instable conjunctions, stable
//! conjunctions, immediate conjunctions, positive conjunct depth, negative
//! conjunct depth and negations.
//!
//! Every game move carries an [`Update`]. The solver never applies updates
//! forward; it computes the *inverse* update of a budget known to win at the
//! target, yielding the least budget that wins at the source via this move.
//!
//! An [`EnergySet`] is an antichain of budgets: it stores only the
//! Pareto-minimal elements, kept in a canonical (sorted) order so that two
//! sets with the same elements compare equal.

use std::fmt;

use serde::Serialize;

/// Number of energy dimensions.
pub const DIMENSIONS: usize = 8;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Energy([u32; DIMENSIONS]);

impl Energy {
    /// Stands for an unbounded component.
    pub const INFINITY: u32 = u32::MAX;

    pub const fn new(components: [u32; DIMENSIONS]) -> Self {
        Self(components)
    }

    pub const fn zero() -> Self {
        Self([0; DIMENSIONS])
    }

    /// Vector with every component unbounded.
    pub const fn infinity() -> Self {
        Self([Self::INFINITY; DIMENSIONS])
    }

    /// Unit vector in the given (0-based) dimension.
    pub fn unit(dim: usize) -> Self {
        let mut e = [0; DIMENSIONS];
        e[dim] = 1;
        Self(e)
    }

    pub fn components(&self) -> &[u32; DIMENSIONS] {
        &self.0
    }

    pub fn get(&self, dim: usize) -> u32 {
        self.0[dim]
    }

    /// Componentwise `self <= other`.
    pub fn leq(&self, other: &Energy) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }

    /// Componentwise maximum.
    pub fn sup(&self, other: &Energy) -> Energy {
        let mut e = self.0;
        for (x, y) in e.iter_mut().zip(other.0.iter()) {
            *x = (*x).max(*y);
        }
        Energy(e)
    }
}

impl From<[u32; DIMENSIONS]> for Energy {
    fn from(components: [u32; DIMENSIONS]) -> Self {
        Energy(components)
    }
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, &x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if x == Self::INFINITY {
                write!(f, "∞")?;
            } else {
                write!(f, "{}", x)?;
            }
        }
        write!(f, ")")
    }
}

/// One component of an [`Update`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UpdateComponent {
    /// Add the (usually non-positive) delta to this dimension.
    Relative(i32),
    /// Replace this dimension by the minimum of two (1-based) dimensions of the old budget.
    Min(u8, u8),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Update([UpdateComponent; DIMENSIONS]);

impl Default for Update {
    fn default() -> Self {
        Self::zero()
    }
}

impl Update {
    pub const fn new(components: [UpdateComponent; DIMENSIONS]) -> Self {
        Self(components)
    }

    pub const fn zero() -> Self {
        Self([UpdateComponent::Relative(0); DIMENSIONS])
    }

    /// Zero update with `-1` in each of the given (0-based) dimensions.
    pub fn decrement(dims: &[usize]) -> Self {
        let mut u = Self::zero();
        for &d in dims {
            u.0[d] = UpdateComponent::Relative(-1);
        }
        u
    }

    /// Sets dimension `dim` (0-based) to `min(old[a-1], old[b-1])`.
    pub fn with_min(mut self, dim: usize, a: u8, b: u8) -> Self {
        assert!(a >= 1 && (a as usize) <= DIMENSIONS, "Min-select dimension {} out of range", a);
        assert!(b >= 1 && (b as usize) <= DIMENSIONS, "Min-select dimension {} out of range", b);
        self.0[dim] = UpdateComponent::Min(a, b);
        self
    }

    pub fn components(&self) -> &[UpdateComponent; DIMENSIONS] {
        &self.0
    }

    /// Applies the update to `energy`, or returns `None` if a component would drop below zero.
    pub fn apply(&self, energy: &Energy) -> Option<Energy> {
        let mut e = [0; DIMENSIONS];
        for (i, c) in self.0.iter().enumerate() {
            e[i] = match *c {
                UpdateComponent::Relative(delta) => add_delta(energy.0[i], delta)?,
                UpdateComponent::Min(a, b) => energy.0[a as usize - 1].min(energy.0[b as usize - 1]),
            };
        }
        Some(Energy(e))
    }

    /// Least budget `e` such that applying this update to `e` yields at least `target`.
    ///
    /// Relative deltas are undone by subtraction. A min-select into dimension `i`
    /// from dimensions `a` and `b` requires both `a` and `b` to cover `target[i]`,
    /// so `target[i]` is broadcast into both and joined with the rest.
    pub fn inverse(&self, target: &Energy) -> Energy {
        let mut base = target.0;
        for (i, c) in self.0.iter().enumerate() {
            if let UpdateComponent::Relative(delta) = *c {
                base[i] = add_delta(target.0[i], -delta).unwrap_or(0);
            }
        }
        let mut result = Energy(base);
        for (i, c) in self.0.iter().enumerate() {
            if let UpdateComponent::Min(a, b) = *c {
                let mut broadcast = [0; DIMENSIONS];
                broadcast[a as usize - 1] = target.0[i];
                broadcast[b as usize - 1] = target.0[i];
                result = result.sup(&Energy(broadcast));
            }
        }
        result
    }
}

fn add_delta(value: u32, delta: i32) -> Option<u32> {
    if value == Energy::INFINITY {
        return Some(value);
    }
    if delta >= 0 {
        Some(value.saturating_add(delta as u32))
    } else {
        value.checked_sub(delta.unsigned_abs())
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match c {
                UpdateComponent::Relative(d) => write!(f, "{}", d)?,
                UpdateComponent::Min(a, b) => write!(f, "min{{{},{}}}", a, b)?,
            }
        }
        write!(f, ")")
    }
}

/// Antichain of Pareto-minimal budgets.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct EnergySet(Vec<Energy>);

impl EnergySet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn singleton(energy: Energy) -> Self {
        Self(vec![energy])
    }

    /// Reduces arbitrary budgets to their minimal elements.
    pub fn minimize(energies: impl IntoIterator<Item = Energy>) -> Self {
        let mut all: Vec<Energy> = energies.into_iter().collect();
        all.sort_unstable_by_key(|e| e.0);
        all.dedup();

        // Sorted lexicographically, so a strictly smaller element always comes first.
        let mut minimal: Vec<Energy> = Vec::with_capacity(all.len());
        for e in all {
            if !minimal.iter().any(|m| m.leq(&e)) {
                minimal.push(e);
            }
        }
        Self(minimal)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Energy> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Energy] {
        &self.0
    }

    /// Checks whether `energy` is winning, i.e. covers some minimal budget.
    pub fn covers(&self, energy: &Energy) -> bool {
        self.0.iter().any(|m| m.leq(energy))
    }

    /// Minimal elements of the union of both sets.
    pub fn union(&self, other: &EnergySet) -> EnergySet {
        EnergySet::minimize(self.0.iter().chain(other.0.iter()).copied())
    }

    /// Minimal elements of all pairwise suprema, one budget taken from each set.
    pub fn combine(&self, other: &EnergySet) -> EnergySet {
        let mut result = Vec::with_capacity(self.len() * other.len());
        for a in &self.0 {
            for b in &other.0 {
                result.push(a.sup(b));
            }
        }
        EnergySet::minimize(result)
    }
}

impl FromIterator<Energy> for EnergySet {
    fn from_iter<I: IntoIterator<Item = Energy>>(iter: I) -> Self {
        EnergySet::minimize(iter)
    }
}

impl<'a> IntoIterator for &'a EnergySet {
    type Item = &'a Energy;
    type IntoIter = std::slice::Iter<'a, Energy>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for EnergySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", e)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_order() {
        let a = Energy::new([1, 0, 0, 0, 0, 0, 0, 0]);
        let b = Energy::new([1, 1, 0, 0, 0, 0, 0, 0]);
        let c = Energy::new([0, 2, 0, 0, 0, 0, 0, 0]);
        assert!(a.leq(&b) && a.leq(&a));
        assert!(!b.leq(&a));
        assert!(!a.leq(&c) && !c.leq(&a));
        assert!(c.leq(&Energy::infinity()));
    }

    #[test]
    fn test_minimize() {
        let set = EnergySet::minimize([
            Energy::new([2, 0, 0, 0, 0, 0, 0, 0]),
            Energy::new([1, 1, 0, 0, 0, 0, 0, 0]),
            Energy::new([1, 0, 0, 0, 0, 0, 0, 0]),
            Energy::new([0, 3, 0, 0, 0, 0, 0, 0]),
            Energy::new([1, 0, 0, 0, 0, 0, 0, 0]),
        ]);
        assert_eq!(
            set.as_slice(),
            &[Energy::new([0, 3, 0, 0, 0, 0, 0, 0]), Energy::new([1, 0, 0, 0, 0, 0, 0, 0])]
        );
        for a in set.iter() {
            for b in set.iter() {
                assert!(a == b || !a.leq(b));
            }
        }
    }

    #[test]
    fn test_minimize_order_independent() {
        let xs = [
            Energy::new([0, 1, 0, 0, 0, 0, 0, 2]),
            Energy::new([1, 0, 0, 0, 0, 0, 0, 1]),
            Energy::new([1, 1, 0, 0, 0, 0, 0, 2]),
        ];
        let mut ys = xs;
        ys.reverse();
        assert_eq!(EnergySet::minimize(xs), EnergySet::minimize(ys));
        assert_eq!(EnergySet::minimize(xs).len(), 2);
    }

    #[test]
    fn test_inverse_relative() {
        let u = Update::decrement(&[0, 7]);
        let e = Energy::new([1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(u.inverse(&e), Energy::new([2, 0, 0, 0, 0, 0, 0, 1]));
        assert_eq!(u.apply(&u.inverse(&e)), Some(e));
        assert_eq!(u.apply(&Energy::zero()), None);
    }

    #[test]
    fn test_inverse_min_select() {
        // Negative clause: (min{1,7}, 0, 0, 0, 0, 0, 0, -1)
        let u = Update::decrement(&[7]).with_min(0, 1, 7);
        let e = Energy::new([1, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(u.inverse(&e), Energy::new([1, 0, 0, 1, 0, 0, 1, 1]));

        // Branching observation: (min{1,6}, -1, -1, 0, 0, 0, 0, 0)
        let u = Update::decrement(&[1, 2]).with_min(0, 1, 6);
        let e = Energy::new([2, 0, 1, 0, 1, 0, 1, 1]);
        assert_eq!(u.inverse(&e), Energy::new([2, 1, 2, 0, 1, 2, 1, 1]));
    }

    #[test]
    fn test_apply_min_select() {
        let u = Update::zero().with_min(0, 1, 6);
        let e = Energy::new([3, 0, 0, 0, 0, 1, 0, 0]);
        assert_eq!(u.apply(&e), Some(Energy::new([1, 0, 0, 0, 0, 1, 0, 0])));
    }

    #[test]
    fn test_inverse_is_least() {
        let u = Update::decrement(&[1]).with_min(0, 1, 6);
        let target = Energy::new([2, 1, 0, 0, 0, 0, 0, 0]);
        let inv = u.inverse(&target);
        assert!(target.leq(&u.apply(&inv).unwrap()));
        // Lowering any component of the inverse breaks it.
        for d in 0..DIMENSIONS {
            if inv.get(d) == 0 {
                continue;
            }
            let mut lower = *inv.components();
            lower[d] -= 1;
            let ok = u.apply(&Energy::new(lower)).map_or(false, |r| target.leq(&r));
            assert!(!ok, "dimension {} is not tight", d);
        }
    }

    #[test]
    fn test_combine() {
        let a = EnergySet::minimize([Energy::unit(0), Energy::unit(1)]);
        let b = EnergySet::singleton(Energy::unit(2));
        let c = a.combine(&b);
        assert_eq!(c.len(), 2);
        assert!(c.covers(&Energy::new([1, 0, 1, 0, 0, 0, 0, 0])));
        assert!(!c.covers(&Energy::unit(2)));
        assert!(a.combine(&EnergySet::empty()).is_empty());
    }

    #[test]
    fn test_display() {
        let e = Energy::new([1, 0, 0, Energy::INFINITY, 0, 0, 0, 2]);
        assert_eq!(e.to_string(), "(1,0,0,∞,0,0,0,2)");
        let u = Update::decrement(&[7]).with_min(0, 1, 7);
        assert_eq!(u.to_string(), "(min{1,7},0,0,0,0,0,0,-1)");
    }
}
