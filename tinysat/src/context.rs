//! Central solver data structure.
//!
//! Collects the clause database, the occurrence/watch index, the trail, and the update log that
//! the propagation, analysis, and backtracking modules all operate on. A plain struct with
//! ordinary `&mut self` methods suffices here: there is no variable-activity bookkeeping,
//! incremental-solving state, or proof logging that would need independently-borrowable fields.

use std::collections::VecDeque;

use crate::db::ClauseDb;
use crate::index::Index;
use crate::propagate::Task;
use crate::trail::Trail;
use crate::updates::UpdateLog;

/// All state mutated during search, owned exclusively by the driver: no locking is required,
/// since every mutation is local to a single logical step.
#[derive(Default)]
pub struct Context {
    pub db: ClauseDb,
    pub index: Index,
    pub trail: Trail,
    pub updates: UpdateLog,
    pub unit_q: VecDeque<Task>,
    var_count: usize,
}

impl Context {
    pub fn new() -> Context {
        Context::default()
    }

    /// Grows every per-literal/per-variable structure to cover `count` variables.
    ///
    /// Variables are never removed once introduced; memory grows monotonically during a solve.
    pub fn set_var_count(&mut self, count: usize) {
        if count <= self.var_count {
            return;
        }
        self.var_count = count;
        self.trail.set_var_count(count);
        self.index.set_var_count(count);
        self.updates.set_var_count(count);
    }

    pub fn var_count(&self) -> usize {
        self.var_count
    }
}
