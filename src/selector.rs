/*!
Picks a solver from cheap structural statistics of the formula.

The rules are checked in order:

1. more than 35% of the clauses are unit clauses: DPLL
2. some literal is pure: Davis–Putnam
3. otherwise: DPLL

Resolution is never picked here; it only runs when asked for by name.
*/

use std::{collections::HashSet, fmt::Display};

use crate::{
    formula::{Cnf, Literal},
    solver::SolverKind,
};

pub const UNIT_RATIO_THRESHOLD: f64 = 0.35;

#[derive(Debug, Clone, PartialEq)]
pub struct ClauseStats {
    pub num_clauses: usize,
    pub num_unit_clauses: usize,
    /// Literals whose negation never occurs, in order of first occurrence.
    pub pure_literals: Vec<Literal>,
}

impl ClauseStats {
    pub fn collect(formula: &Cnf) -> Self {
        let clauses = formula.clauses();
        let num_unit_clauses = clauses
            .iter()
            .filter(|clause| clause.unit().is_some())
            .count();

        let occurring: HashSet<Literal> = clauses.iter().flat_map(|clause| clause.iter()).collect();
        let mut pure_literals = Vec::new();
        for literal in clauses.iter().flat_map(|clause| clause.iter()) {
            if !occurring.contains(&!literal) && !pure_literals.contains(&literal) {
                pure_literals.push(literal);
            }
        }

        ClauseStats {
            num_clauses: clauses.len(),
            num_unit_clauses,
            pure_literals,
        }
    }

    /// Fraction of unit clauses, 0 for a formula without clauses.
    pub fn unit_ratio(&self) -> f64 {
        if self.num_clauses == 0 {
            0.0
        } else {
            self.num_unit_clauses as f64 / self.num_clauses as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    HighUnitFrequency,
    PureLiterals,
    Default,
    /// The caller named the solver; no rule was consulted.
    Requested,
}

impl Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Reason::HighUnitFrequency => "high unit-clause frequency",
            Reason::PureLiterals => "pure literal presence",
            Reason::Default => "default",
            Reason::Requested => "requested explicitly",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub solver: SolverKind,
    pub reason: Reason,
}

impl Selection {
    pub fn requested(solver: SolverKind) -> Self {
        Selection {
            solver,
            reason: Reason::Requested,
        }
    }
}

pub fn select_from_stats(stats: &ClauseStats) -> Selection {
    let (solver, reason) = if stats.unit_ratio() > UNIT_RATIO_THRESHOLD {
        (SolverKind::Dpll, Reason::HighUnitFrequency)
    } else if !stats.pure_literals.is_empty() {
        (SolverKind::DavisPutnam, Reason::PureLiterals)
    } else {
        (SolverKind::Dpll, Reason::Default)
    };

    Selection { solver, reason }
}

pub fn select(formula: &Cnf) -> Selection {
    let stats = ClauseStats::collect(formula);
    let selection = select_from_stats(&stats);

    debug!(
        "Selected {} ({}): {} clauses, unit ratio {:.2}, {} pure literals",
        selection.solver,
        selection.reason,
        stats.num_clauses,
        stats.unit_ratio(),
        stats.pure_literals.len()
    );

    selection
}
