#[macro_use]
extern crate log;

use std::{env::args, path::Path};

use pretty_env_logger::formatted_builder;
use propsat::{
    formula::VariableMap,
    generator::{random_cnf, GeneratorConfig},
    parser::{self, parse_file},
    pipeline::{self, cross_check, Analysis, Options},
    prelude::*,
    report::Report,
    solver::{SolverKind, Witness},
};
use rand::{rngs::StdRng, SeedableRng};

const DEMO_FORMULAS: &[&str] = &[
    "((A→B)∧(B→C))",
    "((A∧B)→(C∨D))",
    "(¬(A∨B))",
    "((A→B)∧(B→C)∧(C→D))",
    "(A↔(¬B))",
    "((A∨B)∧(¬A∨¬B))",
    "(((A→B)∧(B→C))∧A)",
    "(((A↔B)∧(B↔C))∧(C↔D))",
    "((A∧(B∨C))→D)",
    "((¬A∧B)∨(C→D))",
    "(((A∨B)∧(C∨D))→(E↔F))",
    "(A→(B∧C))",
    "(¬(A∧(¬A)))",
    "((A↔B)↔C)",
    "(((A→B)∧A)→B)",
    "((A→(B→C))∧A∧B)",
    "(A↔(B∨(¬C)))",
    "((A∧B)∨(C∧D))",
    "(¬(A↔B))",
    "(((A→B)∧(C→D))∧(E→F))",
];

fn usage_string() -> String {
    format!(
        "Usage: {} <solver_name> <command>

solver_name: auto, dpll, dp, resolution

command:
    check <formula>      - check, convert to CNF and solve a formula (¬ ∧ ∨ → ↔)
    cnf <cnf_text>       - solve CNF text written with & | ~
    dimacs <file_name>   - solve a DIMACS CNF file
    demo                 - run the built-in formula suite
    fuzz <seed> <rounds> - cross-check all solvers on random clause sets",
        args().next().unwrap_or_else(|| "propsat".to_owned())
    )
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unknown solver '{}'\n\n{}", name, usage_string()))]
    UnknownSolver { name: String },
    #[snafu(display("Unknown command '{}'\n\n{}", name, usage_string()))]
    UnknownCommand { name: String },
    #[snafu(display("Failed to analyze formula"))]
    PipelineError { source: pipeline::Error },
    #[snafu(display("Failed to parse CNF"))]
    ParserError { source: parser::Error },
    #[snafu(display("'{}' is not a valid number", value))]
    InvalidNumber {
        value: String,
        source: std::num::ParseIntError,
    },
    #[snafu(display("Solvers disagreed on {} of {} formulas", count, rounds))]
    Disagreement { count: usize, rounds: usize },
    #[snafu(display("Required argument does not exist\n\n{}", usage_string()))]
    MissingArgument,
}

fn pretty_cnf(text: &str) -> String {
    text.replace('&', "∧").replace('|', "∨").replace('~', "¬")
}

fn print_analysis(analysis: &Analysis) {
    println!("CNF: {}", pretty_cnf(&analysis.cnf_text));
    println!("Clauses:");
    for clause in analysis.decoded_clauses() {
        let literals = clause.iter().map(|l| l.to_string()).collect::<Vec<_>>();
        println!("  • [{}]", literals.join(", "));
    }
    println!(
        "Solver: {} ({})",
        analysis.selection.solver, analysis.selection.reason
    );

    let witness = match analysis.verdict.witness() {
        Some(witness) => witness,
        None => {
            println!("UNSAT");
            return;
        }
    };

    println!("SAT");
    let decoded = analysis.decoded_witness().unwrap_or_default();
    match witness {
        Witness::Assignment(_) => {
            for literal in decoded {
                println!("  {} = {}", literal.name(), !literal.negated());
            }
        }
        Witness::EliminationOrder(_) => {
            let names = decoded.iter().map(|l| l.name()).collect::<Vec<_>>();
            println!("  elimination order (not a model): {}", names.join(", "));
        }
        Witness::Saturated { clauses } => {
            println!("  saturated with {} clauses", clauses);
        }
    }
}

fn solve_dimacs(path: &Path, options: &Options) -> Result<Analysis, Error> {
    let formula = parse_file(path).context(ParserError)?;
    let variables = VariableMap::numbered(formula.num_variables());
    let text = formula.to_string();
    Ok(pipeline::solve_encoded(formula, variables, text, options))
}

fn fuzz(seed: u64, rounds: usize) -> Result<(), Error> {
    let mut rng = StdRng::seed_from_u64(seed);
    let config = GeneratorConfig::default();

    let mut count = 0usize;
    for round in 0..rounds {
        let formula = random_cnf(&mut rng, &config);
        let check = cross_check(&formula);
        if !check.agrees() || !check.assignments_hold() {
            count += 1;
            warn!("Round {}: solvers disagree on {}", round, formula);
            for (kind, verdict) in &check.verdicts {
                println!("  {}: {:?}", kind, verdict);
            }
        }
    }

    ensure!(count == 0, Disagreement { count, rounds });
    println!("{} formulas, all solvers agree", rounds);

    Ok(())
}

fn dispatch_command(options: Options, args: Vec<String>) -> Result<(), Error> {
    match args.get(0).map(|s| s.as_str()) {
        Some("check") => {
            ensure!(args.len() > 1, MissingArgument);
            let formula = args[1..].join(" ");
            let analysis = pipeline::analyze_formula(&formula, &options).context(PipelineError)?;
            print_analysis(&analysis);
        }
        Some("cnf") => {
            ensure!(args.len() > 1, MissingArgument);
            let text = args[1..].join(" ");
            let analysis = pipeline::analyze_cnf(&text, &options).context(PipelineError)?;
            print_analysis(&analysis);
        }
        Some("dimacs") => {
            let path = args.get(1).context(MissingArgument)?;
            let analysis = solve_dimacs(path.as_ref(), &options)?;
            print_analysis(&analysis);
        }
        Some("demo") => {
            for (i, formula) in DEMO_FORMULAS.iter().enumerate() {
                println!("\n══════════ Test #{} ══════════", i + 1);
                println!("Formula: {}", formula);
                match pipeline::analyze_formula(formula, &options) {
                    Ok(analysis) => print_analysis(&analysis),
                    Err(e) => println!("✘ {:?}", Report::from(e)),
                }
            }
        }
        Some("fuzz") => {
            let seed = args.get(1).context(MissingArgument)?;
            let rounds = args.get(2).context(MissingArgument)?;
            fuzz(
                seed.parse().context(InvalidNumber { value: seed })?,
                rounds.parse().context(InvalidNumber { value: rounds })?,
            )?;
        }
        Some(name) => UnknownCommand {
            name: name.to_owned(),
        }
        .fail()?,
        None => MissingArgument.fail()?,
    }

    Ok(())
}

fn init_logger() {
    let mut builder = formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else {
        if cfg!(debug_assertions) {
            builder.parse_filters("propsat=debug");
        } else {
            builder.parse_filters("propsat=warn");
        }
    }

    builder.try_init().expect("Failed to initialize the logger");
}

fn main() -> Result<(), Report> {
    init_logger();

    let mut args = args();

    // drop arg[0]
    args.next();

    // solver name
    let solver_name = args.next();
    let remaining: Vec<_> = args.collect();

    let solver = match solver_name.as_deref() {
        Some("auto") => None,
        Some(name) => match SolverKind::from_command_name(name) {
            Some(kind) => Some(kind),
            None => UnknownSolver {
                name: name.to_owned(),
            }
            .fail()?,
        },
        None => {
            println!("{}", usage_string());
            return Ok(());
        }
    };

    let options = Options {
        solver,
        ..Options::default()
    };
    dispatch_command(options, remaining)?;

    Ok(())
}
