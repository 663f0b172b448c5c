//! End-to-end scenarios: parse a DIMACS instance, hand it to the solver, check the verdict (and,
//! for SAT, the printed model) against the DIMACS result format.

use tinysat::Solver;
use tinysat_dimacs::{parse_dimacs, write_sat_result, write_unsat_result};

fn solve(input: &str) -> Option<bool> {
    let formula = parse_dimacs(input.as_bytes()).expect("parsing failed");
    let mut solver = Solver::new();
    solver.set_var_count(formula.header.var_count);
    solver.add_formula(formula.clauses);
    solver.solve()
}

#[test]
fn single_true_unit_is_sat() {
    let result = solve("p cnf 1 1\n1 0\n");
    assert_eq!(result, Some(true));
}

#[test]
fn contradictory_units_are_unsat() {
    let result = solve("p cnf 1 2\n1 0\n-1 0\n");
    assert_eq!(result, Some(false));
}

#[test]
fn propagation_chain_forces_a_unique_model() {
    let formula = parse_dimacs(b"p cnf 3 3\n1 2 0\n-1 3 0\n-3 0\n" as &[u8]).unwrap();
    let mut solver = Solver::new();
    solver.set_var_count(formula.header.var_count);
    solver.add_formula(formula.clauses);

    assert_eq!(solver.solve(), Some(true));
    assert!(solver.verify_model());

    let model = solver.model().unwrap();
    assert_eq!(model.len(), 3);
    assert!(model.contains(&tinysat::Lit::from_dimacs(-3)));
    assert!(model.contains(&tinysat::Lit::from_dimacs(-1)));
    assert!(model.contains(&tinysat::Lit::from_dimacs(2)));
}

#[test]
fn all_four_two_variable_clauses_are_unsat() {
    let result = solve("p cnf 2 4\n1 2 0\n1 -2 0\n-1 2 0\n-1 -2 0\n");
    assert_eq!(result, Some(false));
}

#[test]
fn pigeonhole_php_3_2_is_unsat() {
    // 3 pigeons (vars 1-2, 3-4, 5-6 pairs), 2 holes. var(p, h) = 2*p + h + 1, 0-indexed p/h.
    let var = |p: usize, h: usize| (2 * p + h + 1) as isize;
    let mut input = String::from("p cnf 6 9\n");
    for p in 0..3 {
        input.push_str(&format!("{} {} 0\n", var(p, 0), var(p, 1)));
    }
    for h in 0..2 {
        for p1 in 0..3 {
            for p2 in (p1 + 1)..3 {
                input.push_str(&format!("-{} -{} 0\n", var(p1, h), var(p2, h)));
            }
        }
    }

    assert_eq!(solve(&input), Some(false));
}

#[test]
fn empty_formula_is_sat() {
    assert_eq!(solve("p cnf 2 0\n"), Some(true));
}

#[test]
fn formula_with_empty_clause_is_unsat() {
    assert_eq!(solve("p cnf 1 1\n0\n"), Some(false));
}

#[test]
fn tautological_clause_is_sat() {
    assert_eq!(solve("p cnf 1 1\n1 -1 0\n"), Some(true));
}

#[test]
fn sat_result_prints_expected_dimacs_lines() {
    let formula = parse_dimacs(b"p cnf 1 1\n1 0\n" as &[u8]).unwrap();
    let mut solver = Solver::new();
    solver.set_var_count(formula.header.var_count);
    solver.add_formula(formula.clauses);
    assert_eq!(solver.solve(), Some(true));

    let mut out = Vec::new();
    write_sat_result(&mut out, &solver.model().unwrap()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "s SATISFIABLE\nv 1 0\n");
}

#[test]
fn unsat_result_prints_expected_dimacs_line() {
    let mut out = Vec::new();
    write_unsat_result(&mut out).unwrap();
    assert_eq!(out, b"s UNSATISFIABLE\n");
}
