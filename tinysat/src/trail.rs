//! The trail: a chronological stack of assignments with reasons.
//!
//! Combines the stack of assignments and the current partial assignment into one structure,
//! since this solver has no decision-level bookkeeping to keep separate from the raw stack: the
//! backtracker only needs to pop until the learned clause is unit, not track a level number.

use crate::db::ClauseRef;
use crate::lit::{Lit, Var};

/// Why a literal was set true.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Reason {
    /// Chosen freely by the decision procedure.
    Decision,
    /// Forced because `ClauseRef` became unit under the assignment at the time.
    Propagated(ClauseRef),
}

/// Chronological stack of assignments, plus the current partial assignment (vmap) it agrees with
/// by construction: pushing onto the trail and recording the assignment are the same operation
/// here, so trail/vmap agreement cannot be violated by mistake.
#[derive(Default)]
pub struct Trail {
    entries: Vec<(Lit, Reason)>,
    value: Vec<Option<bool>>,
}

impl Trail {
    pub fn new() -> Trail {
        Trail::default()
    }

    pub fn set_var_count(&mut self, count: usize) {
        self.value.resize(count, None);
    }

    /// Value currently assigned to `var`, if any.
    pub fn var_value(&self, var: Var) -> Option<bool> {
        self.value[var.index()]
    }

    /// Value `lit` would have to take for the variable's current assignment, if assigned.
    pub fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.value[lit.index()].map(|v| v ^ lit.is_negative())
    }

    /// `true` iff `lit` is currently true (i.e. `lit ∈ vmap`).
    pub fn lit_is_true(&self, lit: Lit) -> bool {
        self.lit_value(lit) == Some(true)
    }

    /// `true` iff `lit` is currently false (i.e. `¬lit ∈ vmap`).
    pub fn lit_is_false(&self, lit: Lit) -> bool {
        self.lit_value(lit) == Some(false)
    }

    pub fn is_assigned(&self, var: Var) -> bool {
        self.value[var.index()].is_some()
    }

    /// Pushes `lit` as true with the given reason. `lit`'s variable must currently be
    /// unassigned (invariant 5, no complementary literals; invariant 1).
    pub fn push(&mut self, lit: Lit, reason: Reason) {
        debug_assert!(self.value[lit.index()].is_none());
        self.value[lit.index()] = Some(lit.is_positive());
        self.entries.push((lit, reason));
    }

    /// Pops and returns the most recent entry, unassigning its variable.
    pub fn pop(&mut self) -> Option<(Lit, Reason)> {
        let entry = self.entries.pop()?;
        self.value[entry.0.index()] = None;
        Some(entry)
    }

    /// Number of literals currently on the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walks the trail from newest to oldest.
    pub fn iter_rev(&self) -> impl Iterator<Item = &(Lit, Reason)> {
        self.entries.iter().rev()
    }

    /// The full assignment, `None` for variables the formula left unconstrained.
    pub fn assignment(&self) -> &[Option<bool>] {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ClauseDb;
    use crate::clause::Clause;

    #[test]
    fn push_pop_round_trips_vmap() {
        let mut trail = Trail::new();
        trail.set_var_count(3);
        let lit = Var::from_index(1).negative();

        trail.push(lit, Reason::Decision);
        assert!(trail.lit_is_true(lit));
        assert_eq!(trail.var_value(Var::from_index(1)), Some(false));

        let (popped, reason) = trail.pop().unwrap();
        assert_eq!(popped, lit);
        assert_eq!(reason, Reason::Decision);
        assert!(!trail.is_assigned(Var::from_index(1)));
    }

    #[test]
    fn reason_carries_clause_ref() {
        let mut db = ClauseDb::new();
        let cref = db.add_clause(Clause::new(vec![Var::from_index(0).positive()]));
        let mut trail = Trail::new();
        trail.set_var_count(1);
        trail.push(Var::from_index(0).positive(), Reason::Propagated(cref));
        assert_eq!(
            trail.iter_rev().next().unwrap().1,
            Reason::Propagated(cref)
        );
    }
}
