//! Decision heuristic.
//!
//! First-undecided-literal-of-the-first-unsatisfied-clause, deliberately: branching-heuristic
//! quality is out of scope for this solver, and correctness does not depend on which undecided
//! literal of some unsatisfied clause gets picked.

use crate::context::Context;
use crate::propagate::Task;

/// Picks a literal to decide on and pushes it onto the propagation queue.
///
/// Scans the clause database for the first clause that is not satisfied and takes any one of its
/// undecided literals. Returns `false` (and leaves `ctx` untouched) once every clause is
/// satisfied, meaning the current assignment is a model.
pub fn make_decision(ctx: &mut Context) -> bool {
    let lit = ctx
        .db
        .iter()
        .find(|(_, clause)| !clause.satisfied())
        .and_then(|(_, clause)| clause.undecided_lits().next());

    match lit {
        Some(lit) => {
            ctx.unit_q.push_back(Task::Decision(lit));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit::Var;
    use crate::load::load_clause;
    use crate::propagate::{propagate, seed_initial_units};

    fn v(n: usize) -> Var {
        Var::from_index(n)
    }

    #[test]
    fn decides_on_first_unsatisfied_clause() {
        let mut ctx = Context::new();
        ctx.set_var_count(2);
        load_clause(&mut ctx, vec![v(0).positive(), v(1).positive()]);
        ctx.db.mark_original_boundary();

        assert!(make_decision(&mut ctx));
        assert_eq!(ctx.unit_q.len(), 1);
    }

    #[test]
    fn no_decision_once_all_clauses_satisfied() {
        let mut ctx = Context::new();
        ctx.set_var_count(1);
        let unit = load_clause(&mut ctx, vec![v(0).positive()]);
        ctx.db.mark_original_boundary();

        seed_initial_units(&mut ctx, &[unit]).unwrap();
        propagate(&mut ctx).unwrap();

        assert!(!make_decision(&mut ctx));
        assert!(ctx.unit_q.is_empty());
    }
}
