//! Update log: which clauses were mutated because a given literal was assigned.
//!
//! Used solely by the backtracker to know exactly which clauses' true/false/undecided partition
//! to revert when a variable is unassigned, without rescanning the whole database.

use crate::db::ClauseRef;
use crate::lit::Lit;

#[derive(Default)]
pub struct UpdateLog {
    updates: Vec<Vec<ClauseRef>>,
}

impl UpdateLog {
    pub fn new() -> UpdateLog {
        UpdateLog::default()
    }

    pub fn set_var_count(&mut self, count: usize) {
        self.updates.resize_with(count * 2, Vec::new);
    }

    /// Records that `cref`'s partition was mutated due to `lit` becoming assigned.
    pub fn record(&mut self, lit: Lit, cref: ClauseRef) {
        self.updates[lit.code()].push(cref);
    }

    /// Drains and returns every clause mutated due to `lit`, so the caller can undo each one.
    pub fn drain(&mut self, lit: Lit) -> Vec<ClauseRef> {
        std::mem::take(&mut self.updates[lit.code()])
    }
}
