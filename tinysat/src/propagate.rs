//! Unit propagation engine.
//!
//! Propagation splits into an eager "true side" (occurrence-driven: touches every clause
//! mentioning the newly-true literal) and a lazy "false side" (only watched clauses are touched,
//! with a clause's `false`/`undecided` partition for a given literal only made current the moment
//! that literal is actually examined — either because its clause watches it, or because it's
//! discovered during another clause's watch-replacement scan). Everything here uses safe
//! slice/Vec operations; there is no incremental solving or proof generation whose hot-path cost
//! would justify unsafe pointer walking.

use std::collections::VecDeque;

use crate::context::Context;
use crate::db::ClauseRef;
use crate::lit::Lit;
use crate::trail::Reason;

/// A unit of work for the propagation queue: either a clause known to be unit, or a literal
/// chosen freely by the decision procedure.
#[derive(Copy, Clone, Debug)]
pub enum Task {
    Unit(ClauseRef),
    Decision(Lit),
}

/// A falsified clause, returned when propagation detects a conflict.
pub type Conflict = ClauseRef;

/// Runs unit propagation to closure.
///
/// Returns `Ok(())` once the queue is empty with no clause left unit, or `Err(conflict)` as soon
/// as some clause becomes falsified. On conflict, the caller is responsible for clearing
/// `ctx.unit_q`, which [`Context::clear_queue`] does.
pub fn propagate(ctx: &mut Context) -> Result<(), Conflict> {
    while let Some(task) = ctx.unit_q.pop_front() {
        propagate_step(ctx, task)?;
    }
    Ok(())
}

fn propagate_step(ctx: &mut Context, task: Task) -> Result<(), Conflict> {
    let (lit, reason) = match task {
        Task::Decision(lit) => {
            // A decision enqueued behind a learned unit that happened to force the same
            // variable is stale by the time it's popped; skip it rather than pushing a
            // second assignment for an already-assigned variable.
            if ctx.trail.is_assigned(lit.var()) {
                return Ok(());
            }
            (lit, Reason::Decision)
        }
        Task::Unit(cref) => {
            if ctx.db.get(cref).satisfied() {
                return Ok(());
            }
            debug_assert!(
                ctx.db.get(cref).unit(),
                "clause queued as unit is neither satisfied nor unit"
            );
            let lit = ctx.db.get(cref).sole_undecided();
            if ctx.trail.lit_is_false(lit) {
                return Err(cref);
            }
            (lit, Reason::Propagated(cref))
        }
    };

    ctx.trail.push(lit, reason);

    true_side(ctx, lit);
    false_side(ctx, lit)
}

/// Step 4: every clause mentioning the newly true literal transitions it into `true_lits`.
fn true_side(ctx: &mut Context, lit: Lit) {
    let occurrences = ctx.index.occ(lit).to_vec();
    for cref in occurrences {
        ctx.db.get_mut(cref).assign_literal(lit, lit.is_positive());
        ctx.updates.record(lit, cref);
    }
}

/// Step 5: clauses watching `¬lit` must replace it with a new watch, detect that they're now
/// unit, or detect that they're now falsified.
fn false_side(ctx: &mut Context, lit: Lit) -> Result<(), Conflict> {
    let false_lit = !lit;
    let watchers = ctx.index.watch_snapshot(false_lit);

    for cref in watchers {
        // The clause may have already been processed via an earlier watch move within this same
        // scan (step 5c moves a watch to a different literal's list); re-check it still watches
        // `false_lit` before touching it again.
        if !ctx.db.get(cref).is_watched(false_lit) {
            continue;
        }

        update_watch(ctx, cref, false_lit)?;
    }
    Ok(())
}

/// Performs one clause's watched-literal update for `false_lit`, a literal the clause was
/// watching that just became false.
fn update_watch(ctx: &mut Context, cref: ClauseRef, false_lit: Lit) -> Result<(), Conflict> {
    // (a), (b): false_lit moves to false_lits and stops being watched. `assign_literal` takes the
    // *variable's* assigned value, not the literal's own polarity, so a literal becoming false is
    // always the negation of its own polarity.
    ctx.db.get_mut(cref).assign_literal(false_lit, !false_lit.is_positive());
    ctx.updates.record(false_lit, cref);
    ctx.db.get_mut(cref).remove_watch(false_lit);
    ctx.index.remove_watch(false_lit, cref);

    if ctx.db.get(cref).satisfied() {
        // Already satisfied by its other watched literal; no watch maintenance needed, but the
        // false-lits/watch bookkeeping above still had to run to keep the partition consistent
        // with vmap.
        return Ok(());
    }

    // (c), (d): search for a replacement watch among the clause's literals.
    let candidate = find_replacement(ctx, cref, false_lit);

    if let Some(new_watch) = candidate {
        ctx.db.get_mut(cref).add_watch(new_watch);
        ctx.index.add_watch(new_watch, cref);
        return Ok(());
    }

    // No replacement: the clause is now unit or falsified.
    if ctx.db.get(cref).falsified() {
        return Err(cref);
    }
    if ctx.db.get(cref).unit() {
        ctx.unit_q.push_back(Task::Unit(cref));
    }
    Ok(())
}

/// Searches `clause`'s literals (other than its current watches) for one that isn't false,
/// which becomes the new watch. Any literal found to already be false in `vmap` but not yet
/// reflected in the clause's partition is lazily reconciled here.
fn find_replacement(ctx: &mut Context, cref: ClauseRef, false_lit: Lit) -> Option<Lit> {
    let lits: Vec<Lit> = ctx.db.get(cref).lits().to_vec();

    for lit in lits {
        if lit == false_lit || ctx.db.get(cref).is_watched(lit) {
            continue;
        }
        if ctx.trail.lit_is_true(lit) {
            // Found true while scanning; the clause will be reported satisfied by the caller
            // after this returns, via its true_count (already current, since true literals are
            // always kept current by `true_side`).
            continue;
        }
        if ctx.trail.lit_is_false(lit) {
            lazily_mark_false(ctx, cref, lit);
            continue;
        }
        return Some(lit);
    }
    None
}

fn lazily_mark_false(ctx: &mut Context, cref: ClauseRef, lit: Lit) {
    // The clause's cached status for `lit` may already be `False` if some earlier scan already
    // reconciled it; only transition genuinely-undecided entries.
    let already_false = ctx
        .db
        .get(cref)
        .undecided_lits()
        .all(|undecided| undecided != lit);
    if already_false {
        return;
    }
    ctx.db.get_mut(cref).assign_literal(lit, !lit.is_positive());
    ctx.updates.record(lit, cref);
}

/// Enqueues all clauses that are unit given an empty assignment (the original clauses with
/// exactly one literal). Used by preprocessing right after loading.
///
/// A clause can also already be falsified before any assignment exists: the empty clause, whose
/// `false_lits = inner = ∅` vacuously. `unit()` never holds for it (it has zero undecided
/// literals, not one), so it would otherwise never enter `unit_q` and never be detected as a
/// conflict. Check for this directly rather than relying on the propagation loop to find it.
pub fn seed_initial_units(ctx: &mut Context, crefs: &[ClauseRef]) -> Result<(), Conflict> {
    for &cref in crefs {
        if ctx.db.get(cref).falsified() {
            return Err(cref);
        }
        if ctx.db.get(cref).unit() {
            ctx.unit_q.push_back(Task::Unit(cref));
        }
    }
    Ok(())
}

impl Context {
    /// Clears the propagation queue. Called by the driver after a conflict.
    pub fn clear_queue(&mut self) {
        self.unit_q = VecDeque::new();
    }
}
