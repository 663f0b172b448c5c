use std::env;
use std::fs;
use std::io::{self, Write};

use clap::{App, Arg};
use env_logger::{fmt, Builder, Target};
use log::{error, info, Level, LevelFilter, Record};

use tinysat::Solver;
use tinysat_dimacs::{parse_dimacs, write_sat_result, write_unsat_result};

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{}", err);
            1
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

/// DIMACS-comment prefixed (`c `) lines on stdout, level controlled by an environment variable.
fn init_logging() {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .format(format)
        .filter(None, LevelFilter::Info);

    if let Ok(env_var) = env::var("TINYSAT_LOG") {
        builder.parse_filters(&env_var);
    }

    builder.init();
}

fn main_with_err() -> Result<i32, anyhow::Error> {
    let matches = App::new("tinysat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A small CDCL SAT solver")
        .arg(
            Arg::with_name("INPUT")
                .help("The DIMACS CNF input file")
                .required(true)
                .index(1),
        )
        .get_matches();

    init_logging();

    let path = matches.value_of("INPUT").expect("INPUT is required");
    info!("reading '{}'", path);
    let file = fs::File::open(path)?;

    let formula = parse_dimacs(file)?;
    info!(
        "parsed {} variables, {} clauses",
        formula.header.var_count,
        formula.clauses.len()
    );

    let mut solver = Solver::new();
    solver.set_var_count(formula.header.var_count);
    solver.add_formula(formula.clauses);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match solver.solve() {
        Some(true) => {
            assert!(
                solver.verify_model(),
                "solver returned SAT with a model that does not satisfy the formula"
            );
            write_sat_result(&mut out, &solver.model().unwrap())?;
            Ok(0)
        }
        Some(false) => {
            write_unsat_result(&mut out)?;
            Ok(0)
        }
        None => unreachable!("the CLI never configures an iteration cap"),
    }
}
