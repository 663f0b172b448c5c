//! Conflict analysis and clause learning.
//!
//! This is full resolution against the entire trail rather than stopping at the first unique
//! implication point: walk the trail newest-to-oldest, resolving the working clause against the
//! reason of every implied (non-decision) literal it still mentions. First-UIP analysis plus
//! recursive minimization against the implication graph would learn smaller, more useful clauses,
//! but isn't needed for correctness and can be added later without changing the clause-learning
//! contract (append a falsified clause, then backtrack until it's unit).

use crate::clause::{resolve, Clause};
use crate::context::Context;
use crate::db::ClauseRef;
use crate::trail::Reason;

/// Derives a learned clause from a falsified clause by resolution over the trail.
///
/// Returns the learned clause's literals. An empty result means the formula is unsatisfiable.
pub fn analyze_conflict(ctx: &Context, conflict: ClauseRef) -> Vec<crate::lit::Lit> {
    let mut working = ctx.db.get(conflict).clone();

    for &(lit, reason) in ctx.trail.iter_rev() {
        let reason_cref = match reason {
            Reason::Decision => continue,
            Reason::Propagated(cref) => cref,
        };
        if !working.contains_var(lit.var()) {
            continue;
        }
        let resolvent = resolve(&working, ctx.db.get(reason_cref), lit.var());
        working = Clause::new(resolvent);
    }

    working.lits().to_vec()
}

/// Appends a learned clause to the database and registers its occurrences and initial watches.
///
/// Every literal of `lits` is currently false under `vmap` (the clause was derived by
/// eliminating every implied literal, leaving only decision-forced literals, every one of which
/// is on the trail with the opposite sign), so the clause is appended *already falsified* and its
/// status reflects that immediately.
pub fn learn_clause(ctx: &mut Context, lits: Vec<crate::lit::Lit>) -> ClauseRef {
    debug_assert!(
        lits.iter().all(|&lit| ctx.trail.lit_is_false(lit)),
        "a freshly learned non-empty clause must be falsified under the current assignment"
    );

    let mut clause = Clause::new(lits.clone());
    for &lit in &lits {
        // Every literal here is currently false under the trail (see the assertion above);
        // `assign_literal` takes the variable's value, the negation of the literal's own polarity.
        clause.assign_literal(lit, !lit.is_positive());
    }
    let cref = ctx.db.add_clause(clause);

    for &lit in &lits {
        ctx.index.add_occ(lit, cref);
        ctx.updates.record(lit, cref);
    }

    let watches = ctx.db.get_mut(cref).pick_initial_watches();
    for lit in watches {
        ctx.index.add_watch(lit, cref);
    }

    cref
}
