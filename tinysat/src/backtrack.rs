//! Backtracking.
//!
//! Undoes trail entries, using the update log to know exactly which clauses' partitions to
//! revert, until the learned clause becomes unit. There is no decision-level concept to key on
//! here: this solver never backjumps to anything other than "the learned clause is unit", so it
//! simply pops until the learned clause's variable set is reached.

use crate::clause::Clause;
use crate::context::Context;
use crate::lit::Lit;

/// Pops trail entries, undoing their effects, until the most recently popped literal's variable
/// appears in `learned`. `learned` is not modified.
///
/// Termination: `learned` was derived by resolution over literals on the trail, so its
/// last-assigned variable is guaranteed to appear before the trail is exhausted.
pub fn backtrack(ctx: &mut Context, learned: &Clause) {
    loop {
        let (lit, _reason) = ctx.trail.pop().expect(
            "backtrack exhausted the trail without reaching a variable of the learned clause",
        );
        undo_literal(ctx, lit);
        if learned.contains_var(lit.var()) {
            return;
        }
    }
}

/// Reverts every clause mutation logged against `lit` and its complement, then (per clause)
/// re-adopts the literal as a watch if doing so is needed to keep the two-watch invariant after
/// the unassignment.
fn undo_literal(ctx: &mut Context, lit: Lit) {
    undo_for(ctx, lit);
    undo_for(ctx, !lit);
}

fn undo_for(ctx: &mut Context, lit: Lit) {
    for cref in ctx.updates.drain(lit) {
        ctx.db.get_mut(cref).disassign_literal(lit);

        // Clauses logged here via the true side never had `lit` removed from `watched` in the
        // first place; re-adding it would duplicate the same index into both watch slots. Only
        // clauses that genuinely lost `lit` as a watch (the false side) need it restored.
        let clause = ctx.db.get(cref);
        let needs_watch =
            clause.watch_count() < 2 && clause.lits().contains(&lit) && !clause.is_watched(lit);
        if needs_watch {
            ctx.db.get_mut(cref).add_watch(lit);
            ctx.index.add_watch(lit, cref);
        }
    }
}
