//! Loading original clauses into the solver (parsed input feeds in here via the DIMACS crate).

use crate::clause::Clause;
use crate::context::Context;
use crate::db::ClauseRef;
use crate::lit::Lit;

/// Adds an original clause to the database: registers its occurrences, picks its initial
/// watches, and returns its stable reference.
///
/// Duplicate literals within a clause are merged (a structural requirement of the per-literal
/// partition in [`Clause`], not a satisfiability-changing simplification). Tautological clauses
/// (containing both polarities of some variable) are *not* dropped: preprocessing beyond initial
/// unit propagation is out of scope, and the propagation engine satisfies such a clause the first
/// time either polarity is decided, same as any other clause.
///
/// Does not register the clause as unit in the propagation queue; callers doing initial loading
/// should follow up with [`crate::propagate::seed_initial_units`] once all clauses are loaded.
pub fn load_clause(ctx: &mut Context, lits: Vec<Lit>) -> ClauseRef {
    let mut deduped: Vec<Lit> = Vec::with_capacity(lits.len());
    for lit in lits {
        if !deduped.contains(&lit) {
            deduped.push(lit);
        }
    }

    let clause = Clause::new(deduped);
    let cref = ctx.db.add_clause(clause);

    for lit in ctx.db.get(cref).lits().to_vec() {
        ctx.index.add_occ(lit, cref);
    }

    let watches = ctx.db.get_mut(cref).pick_initial_watches();
    for lit in watches {
        ctx.index.add_watch(lit, cref);
    }

    cref
}
