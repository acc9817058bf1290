/*!
Drives a formula from text to verdict: well-formedness check, CNF conversion,
clause parsing and encoding, solver selection, and solving.
*/

use crate::{
    convert::{self, DEFAULT_CLAUSE_LIMIT},
    formula::{Cnf, NamedLiteral, VariableMap},
    parser::{self, decode, encode, parse_cnf},
    prelude::*,
    selector::{self, Selection},
    solver::{SolverKind, Verdict, Witness},
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Failed to convert formula to CNF"))]
    Conversion { source: convert::Error },
    #[snafu(display("Malformed CNF text"))]
    MalformedCnf { source: parser::Error },
}

#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Solver to run. `None` lets the selector decide.
    pub solver: Option<SolverKind>,
    /// Upper bound on the number of clauses CNF conversion may produce.
    pub clause_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            solver: None,
            clause_limit: DEFAULT_CLAUSE_LIMIT,
        }
    }
}

#[derive(Debug)]
pub struct Analysis {
    pub cnf_text: String,
    pub formula: Cnf,
    pub variables: VariableMap,
    pub selection: Selection,
    pub verdict: Verdict,
}

impl Analysis {
    pub fn decoded_clauses(&self) -> Vec<Vec<NamedLiteral>> {
        self.formula
            .clauses()
            .iter()
            .map(|clause| {
                clause
                    .iter()
                    .filter_map(|literal| decode(literal, &self.variables))
                    .collect()
            })
            .collect()
    }

    /// The witness spelled with variable names.
    ///
    /// For Davis–Putnam this lists the eliminated variables in order, each
    /// without negation; it is not a model.
    pub fn decoded_witness(&self) -> Option<Vec<NamedLiteral>> {
        match self.verdict.witness()? {
            Witness::Assignment(assignment) => Some(
                assignment
                    .literals()
                    .iter()
                    .filter_map(|&literal| decode(literal, &self.variables))
                    .collect(),
            ),
            Witness::EliminationOrder(order) => Some(
                order
                    .iter()
                    .filter_map(|&variable| self.variables.name(variable))
                    .map(|name| NamedLiteral::new(name, false))
                    .collect(),
            ),
            Witness::Saturated { .. } => None,
        }
    }
}

pub fn choose_solver(formula: &Cnf, options: &Options) -> Selection {
    match options.solver {
        Some(solver) => Selection::requested(solver),
        None => selector::select(formula),
    }
}

/// Solves an already encoded formula.
pub fn solve_encoded(
    formula: Cnf,
    variables: VariableMap,
    cnf_text: String,
    options: &Options,
) -> Analysis {
    let selection = choose_solver(&formula, options);
    let verdict = selection.solver.solve(formula.clone());

    info!(
        "{}: {}",
        selection.solver,
        if verdict.is_satisfiable() {
            "satisfiable"
        } else {
            "unsatisfiable"
        }
    );

    Analysis {
        cnf_text,
        formula,
        variables,
        selection,
        verdict,
    }
}

/// Solves CNF text written with `&`, `|` and `~`.
pub fn analyze_cnf(cnf_text: &str, options: &Options) -> Result<Analysis, Error> {
    let clauses = parse_cnf(cnf_text).context(MalformedCnf)?;
    let (formula, variables) = encode(&clauses);
    debug!("Encoded {}", formula);

    Ok(solve_encoded(
        formula,
        variables,
        cnf_text.to_owned(),
        options,
    ))
}

/// Solves a propositional formula written with `¬ ∧ ∨ → ↔`.
pub fn analyze_formula(text: &str, options: &Options) -> Result<Analysis, Error> {
    let cnf_text = convert::formula_to_cnf(text, options.clause_limit).context(Conversion)?;
    debug!("CNF of '{}': {}", text, cnf_text);

    analyze_cnf(&cnf_text, options)
}

/// Verdicts of every solver on one formula.
#[derive(Debug)]
pub struct CrossCheck {
    pub formula: Cnf,
    pub verdicts: Vec<(SolverKind, Verdict)>,
}

impl CrossCheck {
    /// All solvers reached the same verdict.
    pub fn agrees(&self) -> bool {
        self.verdicts
            .windows(2)
            .all(|pair| pair[0].1.is_satisfiable() == pair[1].1.is_satisfiable())
    }

    /// Every assignment returned as a witness satisfies the formula.
    pub fn assignments_hold(&self) -> bool {
        self.verdicts.iter().all(|(_, verdict)| match verdict {
            Verdict::Satisfiable(Witness::Assignment(assignment)) => {
                assignment.satisfies(&self.formula)
            }
            _ => true,
        })
    }
}

pub fn cross_check(formula: &Cnf) -> CrossCheck {
    let verdicts = SolverKind::ALL
        .iter()
        .map(|&kind| (kind, kind.solve(formula.clone())))
        .collect();

    CrossCheck {
        formula: formula.clone(),
        verdicts,
    }
}
