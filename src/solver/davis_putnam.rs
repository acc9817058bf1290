use std::collections::{BTreeSet, HashSet};

use crate::formula::{Clause, Cnf, Literal, Variable};

use super::{Solver, Verdict, Witness};

/// Outcome of eliminating one variable.
enum Elimination {
    Remaining(Vec<Clause>),
    EmptyResolvent,
}

/// Replaces every clause mentioning `variable` by the resolvents on it.
fn eliminate(clauses: Vec<Clause>, variable: Variable) -> Elimination {
    let positive = Literal::new(variable, true);
    let negative = !positive;

    let mut with_positive = Vec::new();
    let mut with_negative = Vec::new();
    let mut remaining = Vec::new();
    for clause in clauses {
        let has_positive = clause.contains(positive);
        let has_negative = clause.contains(negative);
        if has_positive && has_negative {
            // Holds for either value of `variable`.
            continue;
        } else if has_positive {
            with_positive.push(clause);
        } else if has_negative {
            with_negative.push(clause);
        } else {
            remaining.push(clause);
        }
    }

    let mut seen: HashSet<BTreeSet<Literal>> = HashSet::new();
    for p in &with_positive {
        for n in &with_negative {
            let resolvent = Clause::new(
                p.iter()
                    .chain(n.iter())
                    .filter(|literal| literal.variable() != variable)
                    .collect(),
            );
            if resolvent.is_empty() {
                return Elimination::EmptyResolvent;
            }
            if seen.insert(resolvent.to_set()) {
                remaining.push(resolvent);
            }
        }
    }

    trace!(
        "Eliminated {}: {} positive, {} negative, {} clauses left",
        variable,
        with_positive.len(),
        with_negative.len(),
        remaining.len()
    );

    Elimination::Remaining(remaining)
}

/// Davis–Putnam variable elimination.
///
/// A satisfiable verdict carries the elimination order, not an assignment.
#[derive(Debug)]
pub struct DavisPutnamSolver {
    formula: Cnf,
}

impl Solver for DavisPutnamSolver {
    fn new(formula: Cnf) -> Self {
        DavisPutnamSolver { formula }
    }

    fn solve(self) -> Verdict {
        let variables = self.formula.occurring_variables();
        let mut clauses = self.formula.into_clauses();

        if clauses.iter().any(Clause::is_empty) {
            debug!("Davis-Putnam: input already contains the empty clause");
            return Verdict::Unsatisfiable;
        }

        let mut order = Vec::with_capacity(variables.len());
        for variable in variables {
            clauses = match eliminate(clauses, variable) {
                Elimination::Remaining(remaining) => remaining,
                Elimination::EmptyResolvent => {
                    debug!(
                        "Davis-Putnam: empty resolvent while eliminating {} (step {})",
                        variable,
                        order.len() + 1
                    );
                    return Verdict::Unsatisfiable;
                }
            };
            order.push(variable);
        }

        debug!("Davis-Putnam: eliminated all {} variables", order.len());
        Verdict::Satisfiable(Witness::EliminationOrder(order))
    }
}
