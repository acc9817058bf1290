use std::fmt::Display;

use crate::formula::{Assignment, Cnf, Variable};

mod davis_putnam;
mod dpll;
mod resolution;

pub use davis_putnam::DavisPutnamSolver;
pub use dpll::DpllSolver;
pub use resolution::ResolutionSolver;

pub trait Solver {
    /// Creates a new solver instance that owns its copy of the formula.
    fn new(formula: Cnf) -> Self;

    /// Decides satisfiability of the formula.
    fn solve(self) -> Verdict;
}

/// Evidence that comes with a satisfiable verdict. Its meaning depends on the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Witness {
    /// Literals forced by DPLL, in the order they were assigned.
    /// Variables that never had to be assigned are absent.
    Assignment(Assignment),
    /// Variables in the order Davis–Putnam eliminated them.
    /// This is not a model: no polarity is recovered for any variable.
    EliminationOrder(Vec<Variable>),
    /// Resolution saturated without deriving the empty clause.
    Saturated { clauses: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Satisfiable(Witness),
    Unsatisfiable,
}

impl Verdict {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, Verdict::Satisfiable(_))
    }

    pub fn witness(&self) -> Option<&Witness> {
        match self {
            Verdict::Satisfiable(witness) => Some(witness),
            Verdict::Unsatisfiable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    Dpll,
    DavisPutnam,
    Resolution,
}

impl SolverKind {
    pub const ALL: [SolverKind; 3] = [
        SolverKind::Dpll,
        SolverKind::DavisPutnam,
        SolverKind::Resolution,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SolverKind::Dpll => "DPLL",
            SolverKind::DavisPutnam => "Davis-Putnam",
            SolverKind::Resolution => "Resolution",
        }
    }

    /// Short name used on the command line.
    pub fn command_name(&self) -> &'static str {
        match self {
            SolverKind::Dpll => "dpll",
            SolverKind::DavisPutnam => "dp",
            SolverKind::Resolution => "resolution",
        }
    }

    pub fn from_command_name(name: &str) -> Option<Self> {
        SolverKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.command_name() == name)
    }

    /// Runs the solver of this kind on `formula`.
    pub fn solve(&self, formula: Cnf) -> Verdict {
        fn run<T: Solver>(formula: Cnf) -> Verdict {
            T::new(formula).solve()
        }

        match self {
            SolverKind::Dpll => run::<DpllSolver>(formula),
            SolverKind::DavisPutnam => run::<DavisPutnamSolver>(formula),
            SolverKind::Resolution => run::<ResolutionSolver>(formula),
        }
    }
}

impl Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
