//! Random formula generators used by property tests, not part of the public API.

use proptest::{prelude::*, *};

use rand::distributions::Bernoulli;
use rand::seq::SliceRandom;

use crate::lit::{Lit, Var};

/// Generates a formula guaranteed to be satisfiable: picks a random full assignment first, then
/// only emits clauses containing at least one literal true under that assignment.
pub fn sat_formula(
    vars: impl Strategy<Value = usize>,
    clause_count: impl Strategy<Value = usize>,
    density: impl Strategy<Value = f64>,
    polarity_dist: impl Strategy<Value = f64>,
) -> impl Strategy<Value = Vec<Vec<Lit>>> {
    (vars, clause_count, density, polarity_dist).prop_flat_map(
        |(vars, clause_count, density, polarity_dist)| {
            let density = Bernoulli::new(density);
            let polarity_dist = Bernoulli::new(polarity_dist);

            collection::vec(bool::ANY, vars).prop_perturb(move |negate, mut rng| {
                let lits: Vec<Lit> = negate
                    .into_iter()
                    .enumerate()
                    .map(|(index, negate)| Lit::from_var(Var::from_index(index), negate))
                    .collect();

                let mut clauses: Vec<Vec<Lit>> = vec![];
                for _ in 0..clause_count {
                    let &fixed_lit = lits.choose(&mut rng).unwrap();
                    let mut clause = vec![fixed_lit];
                    for &lit in lits.iter() {
                        if lit != fixed_lit && rng.sample(density) {
                            clause.push(if rng.sample(polarity_dist) { lit } else { !lit });
                        }
                    }
                    clause.shuffle(&mut rng);
                    clauses.push(clause);
                }

                clauses.shuffle(&mut rng);
                clauses
            })
        },
    )
}

/// Generates an arbitrary small formula with no satisfiability guarantee, for brute-force
/// cross-checking against enumeration over all `2^vars` assignments.
pub fn small_formula(
    vars: usize,
    clause_count: impl Strategy<Value = usize>,
) -> impl Strategy<Value = Vec<Vec<Lit>>> {
    clause_count.prop_flat_map(move |clause_count| {
        collection::vec(small_clause(vars), clause_count)
    })
}

fn small_clause(vars: usize) -> impl Strategy<Value = Vec<Lit>> {
    collection::vec((0..vars, bool::ANY), 1..=vars.max(1)).prop_map(|picks| {
        let mut clause: Vec<Lit> = picks
            .into_iter()
            .map(|(index, negate)| Lit::from_var(Var::from_index(index), negate))
            .collect();
        clause.dedup_by_key(|lit| lit.code());
        clause
    })
}

/// Whether `assignment` (one bool per variable, `true` meaning the positive literal holds)
/// satisfies every clause of `formula`.
pub fn satisfies(formula: &[Vec<Lit>], assignment: &[bool]) -> bool {
    formula.iter().all(|clause| {
        clause
            .iter()
            .any(|lit| assignment[lit.var().index()] == lit.is_positive())
    })
}

/// `true` iff some assignment over `vars` variables satisfies every clause of `formula`.
///
/// Brute force, `O(2^vars * |formula|)`; only meant for the small instances proptest feeds it.
pub fn brute_force_satisfiable(formula: &[Vec<Lit>], vars: usize) -> bool {
    if vars > 20 {
        panic!("brute_force_satisfiable is for small instances only");
    }
    (0..(1u32 << vars)).any(|bits| {
        let assignment: Vec<bool> = (0..vars).map(|i| (bits >> i) & 1 == 1).collect();
        satisfies(formula, &assignment)
    })
}
