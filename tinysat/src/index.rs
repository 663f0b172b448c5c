//! Occurrence & watch index.
//!
//! Flat arrays indexed by a literal's `code()`, the same `2v + sign` scheme `Lit` uses
//! internally. Entries are bare `ClauseRef`s rather than a `(ClauseRef, blocking_literal)` pair:
//! a cached blocking literal would save a database lookup in the hot path but has no effect on
//! correctness, and this solver looks the clause up regardless.

use crate::db::ClauseRef;
use crate::lit::Lit;

/// Maps each literal to the clauses that mention it (`occ`) or currently watch it (`watch`).
#[derive(Default)]
pub struct Index {
    occ: Vec<Vec<ClauseRef>>,
    watch: Vec<Vec<ClauseRef>>,
}

impl Index {
    pub fn new() -> Index {
        Index::default()
    }

    /// Grows the flat arrays to cover `count` variables (`2 * count` literal codes).
    pub fn set_var_count(&mut self, count: usize) {
        let slots = count * 2;
        self.occ.resize_with(slots, Vec::new);
        self.watch.resize_with(slots, Vec::new);
    }

    /// Records that `cref` mentions `lit`. Only called once, at clause insertion; `occ`
    /// otherwise only grows, never shrinks.
    pub fn add_occ(&mut self, lit: Lit, cref: ClauseRef) {
        self.occ[lit.code()].push(cref);
    }

    /// All clauses mentioning `lit`.
    pub fn occ(&self, lit: Lit) -> &[ClauseRef] {
        &self.occ[lit.code()]
    }

    /// Starts watching `cref` under `lit`.
    pub fn add_watch(&mut self, lit: Lit, cref: ClauseRef) {
        self.watch[lit.code()].push(cref);
    }

    /// Stops `cref` from being watched under `lit`, if present.
    pub fn remove_watch(&mut self, lit: Lit, cref: ClauseRef) {
        let list = &mut self.watch[lit.code()];
        if let Some(pos) = list.iter().position(|&c| c == cref) {
            list.swap_remove(pos);
        }
    }

    /// All clauses currently watched under `lit`.
    pub fn watch(&self, lit: Lit) -> &[ClauseRef] {
        &self.watch[lit.code()]
    }

    /// A snapshot of the clauses currently watched under `lit`.
    ///
    /// Propagation mutates `watch[¬ℓ]` while scanning it (removing and re-adding entries as
    /// watched literals move). Rather than a scan-cursor tracking swap-with-last removals, this
    /// takes a snapshot up front; any watch moved during the scan either keeps the clause watched
    /// here (harmless double-visit guarded by clause status checks) or is reflected only in later
    /// propagation rounds, never dropping a clause that remains unit.
    pub fn watch_snapshot(&self, lit: Lit) -> Vec<ClauseRef> {
        self.watch[lit.code()].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit::Var;

    #[test]
    fn occ_and_watch_are_independent() {
        let mut idx = Index::new();
        idx.set_var_count(2);
        let lit = Var::from_index(0).positive();
        let cref = make_clause_ref();

        idx.add_occ(lit, cref);
        idx.add_watch(lit, cref);
        assert_eq!(idx.occ(lit), &[cref]);
        assert_eq!(idx.watch(lit), &[cref]);

        idx.remove_watch(lit, cref);
        assert!(idx.watch(lit).is_empty());
        assert_eq!(idx.occ(lit), &[cref], "occ never shrinks");
    }

    // ClauseRef's constructor is private to the db module; build one via the database itself
    // for this test rather than reaching into its internals.
    fn make_clause_ref() -> ClauseRef {
        let mut db = crate::db::ClauseDb::new();
        db.add_clause(crate::clause::Clause::new(vec![Var::from_index(0).positive()]))
    }
}
