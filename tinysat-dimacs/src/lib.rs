//! DIMACS CNF parser and writer for the tinysat SAT solver.
//!
//! This parser reads a complete input and returns a complete result rather than an incremental,
//! byte-at-a-time state machine: incremental/streaming parsing has no consumer here, since
//! `tinysat` has no incremental-solving interface to feed partial results into.

use std::io::{self, BufRead};

use thiserror::Error;

use tinysat::Lit;

/// Possible errors while parsing a DIMACS CNF formula.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("line {line}: unexpected token in DIMACS CNF input: '{token}'")]
    UnexpectedInput { line: usize, token: String },
    #[error("line {line}: invalid header syntax: '{header}'")]
    InvalidHeader { line: usize, header: String },
    #[error("no 'p cnf' header line found")]
    MissingHeader,
    #[error("line {line}: unterminated clause (missing trailing '0')")]
    UnterminatedClause { line: usize },
    #[error(
        "formula uses variable {used} but the header declares only {declared} variables"
    )]
    VarCount { used: usize, declared: usize },
    #[error(
        "formula has {clause_count} clauses while the header declares {header_clause_count}"
    )]
    ClauseCount {
        clause_count: usize,
        header_clause_count: usize,
    },
}

/// Variable and clause count declared by a DIMACS CNF header line.
#[derive(Copy, Clone, Debug)]
pub struct DimacsHeader {
    pub var_count: usize,
    pub clause_count: usize,
}

/// A fully parsed DIMACS CNF formula.
pub struct DimacsFormula {
    pub header: DimacsHeader,
    pub clauses: Vec<Vec<Lit>>,
}

/// Parses a complete DIMACS CNF input.
///
/// Comment lines (starting with `c`) are ignored. Exactly one `p cnf <nvars> <nclauses>` header
/// line must precede clause lines. A line consisting solely of `%` immediately followed by a line
/// consisting solely of `0` marks the end of the instance; everything after it is ignored, to
/// tolerate SAT-competition benchmark trailers.
pub fn parse_dimacs(input: impl io::Read) -> Result<DimacsFormula, ParserError> {
    let reader = io::BufReader::new(input);

    let mut header: Option<DimacsHeader> = None;
    let mut clauses: Vec<Vec<Lit>> = Vec::new();
    let mut current: Vec<Lit> = Vec::new();
    let mut clause_started = false;
    let mut max_var_used = 0usize;
    let mut pending_trailer_line: Option<usize> = None;

    for (line_number, line) in reader.lines().enumerate().map(|(i, l)| (i + 1, l)) {
        let line = line.map_err(|_| ParserError::UnexpectedInput {
            line: line_number,
            token: String::from("<invalid UTF-8>"),
        })?;
        let trimmed = line.trim();

        if let Some(percent_line) = pending_trailer_line.take() {
            if trimmed == "0" {
                break;
            }
            // The lone '%' line was not actually a benchmark trailer; treat it as what it always
            // was, an unexpected token, now that we know it wasn't followed by a bare '0'.
            return Err(ParserError::UnexpectedInput {
                line: percent_line,
                token: String::from("%"),
            });
        }

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }

        if trimmed == "%" {
            pending_trailer_line = Some(line_number);
            continue;
        }

        if trimmed.starts_with('p') {
            if header.is_some() {
                return Err(ParserError::InvalidHeader {
                    line: line_number,
                    header: trimmed.to_owned(),
                });
            }
            header = Some(parse_header(line_number, trimmed)?);
            continue;
        }

        for token in trimmed.split_whitespace() {
            let value: isize = token.parse().map_err(|_| ParserError::UnexpectedInput {
                line: line_number,
                token: token.to_owned(),
            })?;

            if value == 0 {
                clauses.push(std::mem::take(&mut current));
                clause_started = false;
            } else {
                let lit = Lit::from_dimacs(value);
                max_var_used = max_var_used.max(lit.var().index() + 1);
                current.push(lit);
                clause_started = true;
            }
        }
    }

    if clause_started {
        return Err(ParserError::UnterminatedClause {
            line: clauses.len() + 1,
        });
    }

    let header = header.ok_or(ParserError::MissingHeader)?;

    if max_var_used > header.var_count {
        return Err(ParserError::VarCount {
            used: max_var_used,
            declared: header.var_count,
        });
    }
    if clauses.len() != header.clause_count {
        return Err(ParserError::ClauseCount {
            clause_count: clauses.len(),
            header_clause_count: header.clause_count,
        });
    }

    Ok(DimacsFormula { header, clauses })
}

fn parse_header(line_number: usize, line: &str) -> Result<DimacsHeader, ParserError> {
    let invalid = || ParserError::InvalidHeader {
        line: line_number,
        header: line.to_owned(),
    };

    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("p") || tokens.next() != Some("cnf") {
        return Err(invalid());
    }
    let var_count: usize = tokens.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let clause_count: usize = tokens.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    if tokens.next().is_some() {
        return Err(invalid());
    }

    Ok(DimacsHeader {
        var_count,
        clause_count,
    })
}

/// Writes a DIMACS CNF header line.
pub fn write_dimacs_header(target: &mut impl io::Write, header: DimacsHeader) -> io::Result<()> {
    write!(target, "p cnf ")?;
    itoa::write(&mut *target, header.var_count)?;
    write!(target, " ")?;
    itoa::write(&mut *target, header.clause_count)?;
    writeln!(target)
}

/// Writes every clause, one per line, terminated by `0`.
pub fn write_dimacs_clauses(
    target: &mut impl io::Write,
    clauses: &[Vec<Lit>],
) -> io::Result<()> {
    for clause in clauses {
        for lit in clause {
            itoa::write(&mut *target, lit.to_dimacs())?;
            write!(target, " ")?;
        }
        writeln!(target, "0")?;
    }
    Ok(())
}

/// Writes a complete DIMACS CNF formula (header followed by clauses).
pub fn write_dimacs(target: &mut impl io::Write, formula: &DimacsFormula) -> io::Result<()> {
    write_dimacs_header(target, formula.header)?;
    write_dimacs_clauses(target, &formula.clauses)
}

/// Writes a `s SATISFIABLE` / `v ...` result block.
pub fn write_sat_result(target: &mut impl io::Write, model: &[Lit]) -> io::Result<()> {
    writeln!(target, "s SATISFIABLE")?;
    write!(target, "v ")?;
    for lit in model {
        itoa::write(&mut *target, lit.to_dimacs())?;
        write!(target, " ")?;
    }
    writeln!(target, "0")
}

/// Writes an `s UNSATISFIABLE` result line.
pub fn write_unsat_result(target: &mut impl io::Write) -> io::Result<()> {
    writeln!(target, "s UNSATISFIABLE")
}
