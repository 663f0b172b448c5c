//! Clause storage.
//!
//! A [`Clause`] keeps its literals (`inner`) immutable after construction and tracks, alongside
//! them, which are currently assigned true, assigned false, or still undecided. Clause identity
//! is a stable index into a [`ClauseDb`], never a raw pointer, so clauses can be stored and
//! addressed by plain `Vec` growth rather than a byte-arena allocator.

use crate::lit::{Lit, Var};

/// Where a literal of a clause currently stands relative to the partial assignment.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum LitStatus {
    True,
    False,
    Undecided,
}

/// A disjunction of literals, with per-search dynamic status tracked per literal.
///
/// Invariant: `true_lits ∪ false_lits ∪ undecided = inner`, pairwise disjoint. This is
/// represented by a status parallel to `inner` plus running counts, rather than three separate
/// sets, since clause arities are small and a linear scan to find a literal's position is cheap.
#[derive(Clone, Debug)]
pub struct Clause {
    inner: Vec<Lit>,
    status: Vec<LitStatus>,
    true_count: usize,
    false_count: usize,
    /// At most two indices into `inner`. Invariant: drawn from `inner`; kept in sync with
    /// the watched-literal maintenance rules as the partition changes.
    watched: [Option<usize>; 2],
}

impl Clause {
    /// Creates a clause from its literals.
    ///
    /// All literals start undecided; the caller is responsible for calling [`assign_literal`]
    /// for any literal already assigned under the current partial assignment (this is how
    /// learned clauses, which are always appended already falsified, get their initial status).
    ///
    /// [`assign_literal`]: Clause::assign_literal
    pub fn new(literals: Vec<Lit>) -> Clause {
        let len = literals.len();
        Clause {
            inner: literals,
            status: vec![LitStatus::Undecided; len],
            true_count: 0,
            false_count: 0,
            watched: [None, None],
        }
    }

    /// The clause's literals, in original order.
    pub fn lits(&self) -> &[Lit] {
        &self.inner
    }

    /// Number of literals in the clause.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn position(&self, lit: Lit) -> usize {
        self.inner
            .iter()
            .position(|&l| l == lit)
            .expect("literal not part of clause")
    }

    /// Whether `var` appears (in either polarity) in the clause.
    pub fn contains_var(&self, var: Var) -> bool {
        self.inner.iter().any(|lit| lit.var() == var)
    }

    /// Moves `lit` from `undecided` into `true_lits` or `false_lits`.
    ///
    /// `lit` must currently be undecided in this clause.
    pub fn assign_literal(&mut self, lit: Lit, value: bool) {
        let idx = self.position(lit);
        debug_assert_eq!(self.status[idx], LitStatus::Undecided);
        if lit.is_positive() == value {
            self.status[idx] = LitStatus::True;
            self.true_count += 1;
        } else {
            self.status[idx] = LitStatus::False;
            self.false_count += 1;
        }
    }

    /// Returns `lit` to `undecided`.
    ///
    /// `lit` must currently be assigned (true or false) in this clause.
    pub fn disassign_literal(&mut self, lit: Lit) {
        let idx = self.position(lit);
        match self.status[idx] {
            LitStatus::True => self.true_count -= 1,
            LitStatus::False => self.false_count -= 1,
            LitStatus::Undecided => panic!("literal already undecided"),
        }
        self.status[idx] = LitStatus::Undecided;
    }

    /// Number of currently undecided literals.
    pub fn undecided_count(&self) -> usize {
        self.inner.len() - self.true_count - self.false_count
    }

    /// `true` iff at least one literal is assigned true.
    pub fn satisfied(&self) -> bool {
        self.true_count > 0
    }

    /// `true` iff every literal is assigned false.
    pub fn falsified(&self) -> bool {
        self.false_count == self.inner.len()
    }

    /// `true` iff the clause has no true literal and exactly one undecided literal.
    pub fn unit(&self) -> bool {
        self.true_count == 0 && self.undecided_count() == 1
    }

    /// The sole undecided literal of a unit clause.
    ///
    /// Panics if the clause is not currently unit.
    pub fn sole_undecided(&self) -> Lit {
        debug_assert!(self.unit());
        self.undecided_lits().next().expect("clause is not unit")
    }

    /// Iterator over the currently undecided literals.
    pub fn undecided_lits(&self) -> impl Iterator<Item = Lit> + '_ {
        self.inner
            .iter()
            .zip(self.status.iter())
            .filter(|(_, status)| **status == LitStatus::Undecided)
            .map(|(&lit, _)| lit)
    }

    /// How many watch slots are currently occupied.
    pub fn watch_count(&self) -> usize {
        self.watched.iter().filter(|w| w.is_some()).count()
    }

    /// Whether `lit` (a member literal) is currently watched.
    pub fn is_watched(&self, lit: Lit) -> bool {
        let idx = self.position(lit);
        self.watched.iter().any(|&w| w == Some(idx))
    }

    /// Adds `lit` as a watch, filling the first free slot.
    ///
    /// Panics if both watch slots are already occupied.
    pub fn add_watch(&mut self, lit: Lit) {
        let idx = self.position(lit);
        let slot = self
            .watched
            .iter_mut()
            .find(|w| w.is_none())
            .expect("both watch slots occupied");
        *slot = Some(idx);
    }

    /// Removes `lit` from the watch slots, if present.
    pub fn remove_watch(&mut self, lit: Lit) {
        let idx = self.position(lit);
        for slot in self.watched.iter_mut() {
            if *slot == Some(idx) {
                *slot = None;
            }
        }
    }

    /// Picks up to two literals (preferring undecided ones) to watch initially.
    ///
    /// Used when a clause is first inserted into the database: any two literals may be chosen,
    /// and preferring undecided literals avoids immediately triggering a watch update.
    pub fn pick_initial_watches(&mut self) -> Vec<Lit> {
        self.watched = [None, None];
        let mut picks: Vec<Lit> = self.undecided_lits().take(2).collect();
        if picks.len() < 2 {
            for &lit in &self.inner {
                if picks.len() >= 2 {
                    break;
                }
                if !picks.contains(&lit) {
                    picks.push(lit);
                }
            }
        }
        for &lit in &picks {
            self.add_watch(lit);
        }
        picks
    }
}

/// Resolve two clauses over `var`.
///
/// Requires `+var` to appear in exactly one of `c1`/`c2` and `-var` in the other. Returns the
/// (duplicate-free) union of both clauses' literals with both polarities of `var` removed.
/// This can in principle produce a tautological resolvent (containing both `+x` and `-x` for
/// some `x != var`); that never arises when resolving along the trail during conflict analysis,
/// since every eliminated variable was the sole undecided literal of its reason clause at the
/// time it was propagated.
pub fn resolve(c1: &Clause, c2: &Clause, var: Var) -> Vec<Lit> {
    let pos = var.positive();
    let neg = var.negative();

    debug_assert!(
        (c1.lits().contains(&pos) && c2.lits().contains(&neg))
            || (c1.lits().contains(&neg) && c2.lits().contains(&pos))
    );

    let mut result: Vec<Lit> = Vec::with_capacity(c1.len() + c2.len());
    for &lit in c1.lits().iter().chain(c2.lits()) {
        if lit.var() == var {
            continue;
        }
        if !result.contains(&lit) {
            result.push(lit);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit::Var;

    fn v(n: usize) -> Var {
        Var::from_index(n)
    }

    #[test]
    fn partition_tracks_assignment() {
        let mut c = Clause::new(vec![v(0).positive(), v(1).negative(), v(2).positive()]);
        assert_eq!(c.undecided_count(), 3);
        assert!(!c.satisfied());
        assert!(!c.falsified());

        c.assign_literal(v(1).negative(), false);
        assert_eq!(c.undecided_count(), 2);
        assert!(!c.satisfied());

        c.assign_literal(v(0).positive(), true);
        assert!(c.satisfied());

        c.disassign_literal(v(0).positive());
        assert!(!c.satisfied());
    }

    #[test]
    fn unit_and_falsified() {
        let mut c = Clause::new(vec![v(0).positive(), v(1).negative()]);
        c.assign_literal(v(0).positive(), false);
        assert!(c.unit());
        assert_eq!(c.sole_undecided(), v(1).negative());

        c.assign_literal(v(1).negative(), true);
        assert!(c.falsified());
        assert!(!c.unit());
    }

    #[test]
    fn resolve_eliminates_pivot_and_dedups() {
        let c1 = Clause::new(vec![v(0).positive(), v(1).positive()]);
        let c2 = Clause::new(vec![v(0).negative(), v(1).positive(), v(2).positive()]);
        let mut resolvent = resolve(&c1, &c2, v(0));
        resolvent.sort_by_key(|l| l.code());
        let mut expected = vec![v(1).positive(), v(2).positive()];
        expected.sort_by_key(|l| l.code());
        assert_eq!(resolvent, expected);
    }

    #[test]
    fn watches_track_two_indices() {
        let mut c = Clause::new(vec![v(0).positive(), v(1).positive(), v(2).positive()]);
        let picked = c.pick_initial_watches();
        assert_eq!(picked.len(), 2);
        assert_eq!(c.watch_count(), 2);
        assert!(c.is_watched(picked[0]));

        c.remove_watch(picked[0]);
        assert_eq!(c.watch_count(), 1);
        c.add_watch(v(2).positive());
        assert_eq!(c.watch_count(), 2);
    }
}
