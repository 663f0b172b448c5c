//! The solver façade, wrapped for external callers.
//!
//! A thin owner of the `Context` exposing `add_formula`/`solve`/`model`. This `Solver` does not
//! itself depend on the DIMACS crate: the parser is an external collaborator, not part of the
//! core, so `tinysat-cli` is responsible for parsing a file and handing the resulting clauses to
//! [`Solver::add_formula`].

use crate::cdcl;
use crate::config::SolverConfig;
use crate::context::Context;
use crate::db::ClauseRef;
use crate::lit::{Lit, Var};
use crate::load::load_clause;

/// A Boolean satisfiability solver.
pub struct Solver {
    ctx: Context,
    original: Vec<ClauseRef>,
    config: SolverConfig,
    outcome: Option<cdcl::Outcome>,
}

impl Default for Solver {
    fn default() -> Solver {
        Solver::new()
    }
}

impl Solver {
    /// Creates a new, empty solver with the default configuration.
    pub fn new() -> Solver {
        Solver {
            ctx: Context::new(),
            original: Vec::new(),
            config: SolverConfig::default(),
            outcome: None,
        }
    }

    /// Creates a new, empty solver with the given configuration.
    pub fn with_config(config: SolverConfig) -> Solver {
        Solver {
            config,
            ..Solver::new()
        }
    }

    /// Declares the number of variables that may appear in subsequently added clauses.
    ///
    /// Variable counts only ever grow; calling this with a smaller count than previously
    /// declared is a no-op.
    pub fn set_var_count(&mut self, count: usize) {
        self.ctx.set_var_count(count);
    }

    /// Adds a single clause to the formula.
    ///
    /// Panics (via `debug_assert`) if called after [`solve`](Solver::solve) has already run; this
    /// solver has no incremental-solving support, so clauses may only be added before the first
    /// call to `solve`.
    pub fn add_clause(&mut self, lits: Vec<Lit>) {
        debug_assert!(
            self.outcome.is_none(),
            "clauses cannot be added after solving has started"
        );
        let max_var = lits.iter().map(|lit| lit.var().index() + 1).max();
        if let Some(needed) = max_var {
            self.set_var_count(needed);
        }
        let cref = load_clause(&mut self.ctx, lits);
        self.original.push(cref);
    }

    /// Adds every clause of a formula, given as an iterator of clauses.
    pub fn add_formula(&mut self, clauses: impl IntoIterator<Item = Vec<Lit>>) {
        for clause in clauses {
            self.add_clause(clause);
        }
    }

    /// Runs the CDCL search to completion and returns the outcome.
    ///
    /// `true` means satisfiable, `false` means unsatisfiable, `None` means the configured
    /// iteration cap was reached before a verdict (an opaque abort, not a normal outcome).
    pub fn solve(&mut self) -> Option<bool> {
        if self.outcome.is_none() {
            self.ctx.db.mark_original_boundary();
            let outcome = cdcl::solve(&mut self.ctx, &self.original, &self.config);
            self.outcome = Some(outcome);
        }

        match self.outcome {
            Some(cdcl::Outcome::Sat) => Some(true),
            Some(cdcl::Outcome::Unsat) => Some(false),
            Some(cdcl::Outcome::Unknown) => None,
            None => unreachable!(),
        }
    }

    /// The satisfying model, if [`solve`](Solver::solve) returned `Some(true)`.
    ///
    /// One entry per declared variable, in order; unconstrained variables may take either value.
    pub fn model(&self) -> Option<Vec<Lit>> {
        if self.outcome != Some(cdcl::Outcome::Sat) {
            return None;
        }
        Some(
            self.ctx
                .trail
                .assignment()
                .iter()
                .enumerate()
                .map(|(index, value)| Var::from_index(index).lit(value.unwrap_or(true)))
                .collect(),
        )
    }

    /// Re-checks that every original clause contains a literal true under the current model.
    ///
    /// A direct re-derivation of "every clause contains at least one literal true under the
    /// model", run as a runtime self-check rather than only a test-suite property. A `false`
    /// return is an internal invariant violation; callers should treat it as fatal, not as a
    /// normal "verification failed" outcome.
    pub fn verify_model(&self) -> bool {
        let model = match self.model() {
            Some(model) => model,
            None => return false,
        };
        self.original.iter().all(|&cref| {
            self.ctx
                .db
                .get(cref)
                .lits()
                .iter()
                .any(|lit| model.contains(lit))
        })
    }
}
