use std::collections::BTreeSet;

use crate::formula::{Cnf, Literal};

use super::{Solver, Verdict, Witness};

/// Clauses compared as sets of literals.
type ClauseSet = BTreeSet<Literal>;

/// Resolves `first` against `second` on `pivot`, where `pivot ∈ first` and `¬pivot ∈ second`.
fn resolvent(first: &ClauseSet, second: &ClauseSet, pivot: Literal) -> ClauseSet {
    first
        .iter()
        .filter(|&&literal| literal != pivot)
        .chain(second.iter().filter(|&&literal| literal != !pivot))
        .copied()
        .collect()
}

/// Saturation by pairwise resolution, without subsumption or tautology removal.
#[derive(Debug)]
pub struct ResolutionSolver {
    formula: Cnf,
}

impl Solver for ResolutionSolver {
    fn new(formula: Cnf) -> Self {
        ResolutionSolver { formula }
    }

    fn solve(self) -> Verdict {
        let mut known: BTreeSet<ClauseSet> = self
            .formula
            .clauses()
            .iter()
            .map(|clause| clause.to_set())
            .collect();

        if known.contains(&ClauseSet::new()) {
            debug!("Resolution: input already contains the empty clause");
            return Verdict::Unsatisfiable;
        }

        let mut round = 0;
        loop {
            round += 1;

            let clauses = known.iter().collect::<Vec<_>>();
            let mut derived = BTreeSet::new();

            for (i, first) in clauses.iter().enumerate() {
                for second in &clauses[i + 1..] {
                    for &pivot in first.iter() {
                        if !second.contains(&!pivot) {
                            continue;
                        }

                        let clause = resolvent(first, second, pivot);
                        if clause.is_empty() {
                            debug!("Resolution: empty clause derived in round {}", round);
                            return Verdict::Unsatisfiable;
                        }
                        derived.insert(clause);
                    }
                }
            }

            if derived.is_subset(&known) {
                debug!(
                    "Resolution: saturated after {} rounds with {} clauses",
                    round,
                    known.len()
                );
                return Verdict::Satisfiable(Witness::Saturated {
                    clauses: known.len(),
                });
            }

            debug!(
                "Resolution: round {} derived {} clauses, {} known",
                round,
                derived.len(),
                known.len()
            );
            known.extend(derived);
        }
    }
}
