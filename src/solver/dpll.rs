use std::collections::HashMap;

use crate::formula::{Assignment, Clause, Cnf, Literal};

use super::{Solver, Verdict, Witness};

/// Removes clauses satisfied by `literal` and drops `¬literal` from the rest.
fn simplify(clauses: &[Clause], literal: Literal) -> Vec<Clause> {
    clauses
        .iter()
        .filter(|clause| !clause.contains(literal))
        .map(|clause| clause.without(!literal))
        .collect()
}

/// Returns the literal of the first unit clause, if any.
fn search_unit_clause(clauses: &[Clause]) -> Option<Literal> {
    clauses.iter().find_map(Clause::unit)
}

/// Returns the literal with the most occurrences.
/// Ties go to the literal that was encountered first.
fn most_frequent_literal(clauses: &[Clause]) -> Option<Literal> {
    let mut counts: Vec<(Literal, usize)> = Vec::new();
    let mut slots: HashMap<Literal, usize> = HashMap::new();

    for literal in clauses.iter().flat_map(|clause| clause.iter()) {
        match slots.get(&literal) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(literal, counts.len());
                counts.push((literal, 1));
            }
        }
    }

    let mut best: Option<(Literal, usize)> = None;
    for (literal, count) in counts {
        match best {
            Some((_, best_count)) if best_count >= count => (),
            _ => best = Some((literal, count)),
        }
    }

    best.map(|(literal, _)| literal)
}

#[derive(Debug)]
pub struct DpllSolver {
    clauses: Vec<Clause>,
    /// Literals assigned on the current search path.
    assigned_stack: Vec<Literal>,
    decisions: usize,
}

impl DpllSolver {
    /// Assigns `literal` on top of the stack and searches the simplified formula.
    /// The stack is restored if the search fails.
    fn assume(&mut self, clauses: &[Clause], literal: Literal) -> bool {
        self.assigned_stack.push(literal);
        let simplified = simplify(clauses, literal);
        if self.solve_inner(&simplified) {
            return true;
        }
        self.assigned_stack.pop();

        false
    }

    fn solve_inner(&mut self, clauses: &[Clause]) -> bool {
        if clauses.is_empty() {
            // Every clause has been satisfied.
            return true;
        } else if clauses.iter().any(Clause::is_empty) {
            // There is a clause that can be never satisfied.
            return false;
        }

        // One unit per step; any unit clause it creates is handled by the next call.
        if let Some(literal) = search_unit_clause(clauses) {
            trace!("Unit propagation: {}", literal);
            return self.assume(clauses, literal);
        }

        let literal = match most_frequent_literal(clauses) {
            Some(literal) => literal,
            None => return false,
        };

        self.decisions += 1;
        debug!(
            "Decision #{} on {} at depth {}",
            self.decisions,
            literal,
            self.assigned_stack.len()
        );

        // Each branch simplifies its own copy of `clauses`.
        self.assume(clauses, literal) || self.assume(clauses, !literal)
    }
}

impl Solver for DpllSolver {
    fn new(formula: Cnf) -> Self {
        DpllSolver {
            clauses: formula.into_clauses(),
            assigned_stack: Vec::new(),
            decisions: 0,
        }
    }

    fn solve(mut self) -> Verdict {
        let clauses = std::mem::take(&mut self.clauses);

        if self.solve_inner(&clauses) {
            debug!("DPLL found a model after {} decisions", self.decisions);
            Verdict::Satisfiable(Witness::Assignment(Assignment::new(self.assigned_stack)))
        } else {
            debug!("DPLL exhausted the search after {} decisions", self.decisions);
            Verdict::Unsatisfiable
        }
    }
}
