//! Conflict-driven clause learning: the top-level driver.
//!
//! This solver has no incremental interface to preserve control to, so the whole
//! PREPROCESS / SEARCH / DECIDE / PROPAGATE / ANALYZE state machine lives in one function, run to
//! completion in a single call rather than one conflict's worth of work per call.

use crate::analyze::{analyze_conflict, learn_clause};
use crate::backtrack::backtrack;
use crate::context::Context;
use crate::config::SolverConfig;
use crate::db::ClauseRef;
use crate::decision::make_decision;
use crate::propagate::{propagate, seed_initial_units};

/// The result of running the driver to completion.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Sat,
    Unsat,
    /// The configured iteration cap (an opaque cancellation flag) was reached. Internal state is
    /// left undefined and not resumable.
    Unknown,
}

/// Runs the CDCL state machine to completion.
///
/// `original` lists every clause loaded before the first call (i.e. the database's original
/// prefix); it is used only to seed `unit_q` with the initially-unit clauses in PREPROCESS.
pub fn solve(ctx: &mut Context, original: &[ClauseRef], config: &SolverConfig) -> Outcome {
    log::info!(
        "solving formula with {} variables, {} clauses",
        ctx.var_count(),
        ctx.db.len()
    );

    // PREPROCESS
    if let Err(conflict) = seed_initial_units(ctx, original) {
        ctx.clear_queue();
        log::debug!(
            "clause {} is falsified before any assignment exists",
            conflict.index()
        );
        return Outcome::Unsat;
    }
    if let Err(conflict) = propagate(ctx) {
        ctx.clear_queue();
        log::debug!("conflict during preprocessing (clause {})", conflict.index());
        return Outcome::Unsat;
    }

    let mut iterations: u64 = 0;

    loop {
        if let Some(cap) = config.max_iterations {
            if iterations >= cap {
                log::info!("aborting after reaching the iteration cap ({})", cap);
                return Outcome::Unknown;
            }
        }
        iterations += 1;

        // PROPAGATE: resume from a pending learned unit before considering a fresh decision,
        // so a decision is never pushed behind a unit literal still waiting in `unit_q`.
        let conflict = match propagate(ctx) {
            Ok(()) => {
                // SEARCH / DECIDE
                if !make_decision(ctx) {
                    log::info!("all clauses satisfied after {} iterations", iterations);
                    return Outcome::Sat;
                }
                continue;
            }
            Err(conflict) => conflict,
        };
        ctx.clear_queue();

        // ANALYZE
        let learned_lits = analyze_conflict(ctx, conflict);
        if config.verbose {
            log::trace!("learned clause with {} literals", learned_lits.len());
        }

        if learned_lits.is_empty() {
            log::debug!("learned the empty clause, formula is unsatisfiable");
            return Outcome::Unsat;
        }

        // Every literal of `learned_lits` is false under the trail right now; append it to the
        // database while that still holds, then backtrack until it's unit.
        let cref = learn_clause(ctx, learned_lits);
        let learned_clause = ctx.db.get(cref).clone();
        backtrack(ctx, &learned_clause);

        debug_assert!(
            ctx.db.get(cref).unit(),
            "learned clause is not unit immediately after backtracking to it"
        );
        let unit_lit = ctx.db.get(cref).sole_undecided();
        ctx.unit_q
            .push_back(crate::propagate::Task::Unit(cref));
        log::debug!("learned unit literal {:?}, resuming propagation", unit_lit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit::Var;
    use crate::load::load_clause;

    fn v(n: usize) -> Var {
        Var::from_index(n)
    }

    fn run(ctx: &mut Context, clauses: Vec<Vec<crate::lit::Lit>>, var_count: usize) -> Outcome {
        ctx.set_var_count(var_count);
        let original: Vec<ClauseRef> = clauses
            .into_iter()
            .map(|lits| load_clause(ctx, lits))
            .collect();
        ctx.db.mark_original_boundary();
        solve(ctx, &original, &SolverConfig::default())
    }

    #[test]
    fn single_unit_clause_is_sat() {
        let mut ctx = Context::new();
        let outcome = run(&mut ctx, vec![vec![v(0).positive()]], 1);
        assert_eq!(outcome, Outcome::Sat);
        assert_eq!(ctx.trail.var_value(v(0)), Some(true));
    }

    #[test]
    fn conflicting_units_are_unsat() {
        let mut ctx = Context::new();
        let outcome = run(
            &mut ctx,
            vec![vec![v(0).positive()], vec![v(0).negative()]],
            1,
        );
        assert_eq!(outcome, Outcome::Unsat);
    }

    #[test]
    fn simple_chain_is_sat_with_forced_model() {
        // (1 2) (-1 3) (-3) -> x3=false, -1 3 forces x1=false, 1 2 forces x2=true.
        let mut ctx = Context::new();
        let outcome = run(
            &mut ctx,
            vec![
                vec![v(0).positive(), v(1).positive()],
                vec![v(0).negative(), v(2).positive()],
                vec![v(2).negative()],
            ],
            3,
        );
        assert_eq!(outcome, Outcome::Sat);
        assert_eq!(ctx.trail.var_value(v(2)), Some(false));
        assert_eq!(ctx.trail.var_value(v(0)), Some(false));
        assert_eq!(ctx.trail.var_value(v(1)), Some(true));
    }

    #[test]
    fn all_combinations_unsat() {
        // (1 2)(1 -2)(-1 2)(-1 -2) is unsatisfiable regardless of x1/x2.
        let mut ctx = Context::new();
        let outcome = run(
            &mut ctx,
            vec![
                vec![v(0).positive(), v(1).positive()],
                vec![v(0).positive(), v(1).negative()],
                vec![v(0).negative(), v(1).positive()],
                vec![v(0).negative(), v(1).negative()],
            ],
            2,
        );
        assert_eq!(outcome, Outcome::Unsat);
    }

    #[test]
    fn pigeonhole_php_3_2_is_unsat() {
        // 3 pigeons (0,1,2), 2 holes (0,1). var(p, h) = p*2 + h.
        let var = |p: usize, h: usize| v(p * 2 + h);
        let mut clauses = vec![];
        for p in 0..3 {
            clauses.push(vec![var(p, 0).positive(), var(p, 1).positive()]);
        }
        for h in 0..2 {
            for p1 in 0..3 {
                for p2 in (p1 + 1)..3 {
                    clauses.push(vec![var(p1, h).negative(), var(p2, h).negative()]);
                }
            }
        }

        let mut ctx = Context::new();
        let outcome = run(&mut ctx, clauses, 6);
        assert_eq!(outcome, Outcome::Unsat);
    }

    #[test]
    fn empty_formula_is_sat() {
        let mut ctx = Context::new();
        let outcome = run(&mut ctx, vec![], 2);
        assert_eq!(outcome, Outcome::Sat);
    }

    #[test]
    fn empty_clause_is_immediately_unsat() {
        let mut ctx = Context::new();
        let outcome = run(&mut ctx, vec![vec![]], 0);
        assert_eq!(outcome, Outcome::Unsat);
    }

    #[test]
    fn tautological_clause_is_sat() {
        let mut ctx = Context::new();
        let outcome = run(&mut ctx, vec![vec![v(0).positive(), v(0).negative()]], 1);
        assert_eq!(outcome, Outcome::Sat);
    }

    #[test]
    fn learns_and_resumes_after_a_conflict() {
        // (1 2)(-1 2)(1 -2)(-1 -2 3)(-3) forces a conflict requiring clause learning before
        // reaching the correct verdict.
        let mut ctx = Context::new();
        let outcome = run(
            &mut ctx,
            vec![
                vec![v(0).positive(), v(1).positive()],
                vec![v(0).negative(), v(1).positive()],
                vec![v(0).positive(), v(1).negative()],
                vec![v(0).negative(), v(1).negative(), v(2).positive()],
                vec![v(2).negative()],
            ],
            3,
        );
        assert_eq!(outcome, Outcome::Unsat);
        assert!(ctx.db.len() > 5, "expected at least one learned clause");
    }
}
