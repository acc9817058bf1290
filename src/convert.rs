/*!
Conversion of well-formed formulas into CNF text.

Implications and equivalences are expanded, negations are pushed down to the
atoms, and disjunctions are distributed over conjunctions. The result is
written in the text form [`crate::parser::parse_cnf`] reads:

```text
(A | ~B) & C
```
*/

use crate::{
    prelude::*,
    wff::{self, Connective, Formula},
};

pub const DEFAULT_CLAUSE_LIMIT: usize = 4096;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Formula is not well-formed"))]
    NotWellFormed { source: wff::Error },
    #[snafu(display("Conversion produces more than {} clauses", limit))]
    TooManyClauses { limit: usize },
}

/// A literal as `(name, positive)`.
type Lit = (String, bool);
type Clauses = Vec<Vec<Lit>>;

/// Formula in negation normal form.
enum Nnf {
    Literal(Lit),
    And(Vec<Nnf>),
    Or(Vec<Nnf>),
}

/// Rewrites `formula` (negated when `positive` is false) into negation normal form.
fn nnf(mut formula: &Formula, mut positive: bool) -> Nnf {
    loop {
        match formula {
            Formula::Not(inner) => {
                formula = inner;
                positive = !positive;
            }
            Formula::Atom(name) => return Nnf::Literal((name.clone(), positive)),
            Formula::Binary(connective, lhs, rhs) => {
                return binary_nnf(*connective, lhs, rhs, positive)
            }
        }
    }
}

fn binary_nnf(connective: Connective, lhs: &Formula, rhs: &Formula, positive: bool) -> Nnf {
    match (connective, positive) {
        (Connective::And, true) => Nnf::And(vec![nnf(lhs, true), nnf(rhs, true)]),
        (Connective::And, false) => Nnf::Or(vec![nnf(lhs, false), nnf(rhs, false)]),
        (Connective::Or, true) => Nnf::Or(vec![nnf(lhs, true), nnf(rhs, true)]),
        (Connective::Or, false) => Nnf::And(vec![nnf(lhs, false), nnf(rhs, false)]),
        (Connective::Implies, true) => Nnf::Or(vec![nnf(lhs, false), nnf(rhs, true)]),
        (Connective::Implies, false) => Nnf::And(vec![nnf(lhs, true), nnf(rhs, false)]),
        (Connective::Iff, true) => Nnf::And(vec![
            Nnf::Or(vec![nnf(lhs, false), nnf(rhs, true)]),
            Nnf::Or(vec![nnf(lhs, true), nnf(rhs, false)]),
        ]),
        (Connective::Iff, false) => Nnf::And(vec![
            Nnf::Or(vec![nnf(lhs, true), nnf(rhs, true)]),
            Nnf::Or(vec![nnf(lhs, false), nnf(rhs, false)]),
        ]),
    }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

fn distribute(formula: Nnf, limit: usize) -> Result<Clauses, Error> {
    match formula {
        Nnf::Literal(lit) => Ok(vec![vec![lit]]),
        Nnf::And(children) => {
            let mut clauses = Vec::new();
            for child in children {
                for clause in distribute(child, limit)? {
                    push_unique(&mut clauses, clause);
                }
                ensure!(clauses.len() <= limit, TooManyClauses { limit });
            }
            Ok(clauses)
        }
        Nnf::Or(children) => {
            // The disjunction of CNFs is the CNF of every pairwise clause union.
            let mut clauses: Clauses = vec![Vec::new()];
            for child in children {
                let child = distribute(child, limit)?;
                if clauses.len().saturating_mul(child.len()) > limit {
                    warn!(
                        "Distribution would produce {} x {} clauses (limit {})",
                        clauses.len(),
                        child.len(),
                        limit
                    );
                    return TooManyClauses { limit }.fail();
                }

                let mut product = Vec::with_capacity(clauses.len() * child.len());
                for left in &clauses {
                    for right in &child {
                        let mut clause = left.clone();
                        for lit in right {
                            push_unique(&mut clause, lit.clone());
                        }
                        push_unique(&mut product, clause);
                    }
                }
                clauses = product;
            }
            Ok(clauses)
        }
    }
}

fn render(clauses: &Clauses) -> String {
    let render_lit = |(name, positive): &Lit| {
        if *positive {
            name.clone()
        } else {
            format!("~{}", name)
        }
    };

    clauses
        .iter()
        .map(|clause| {
            let literals = clause.iter().map(render_lit).collect::<Vec<_>>();
            if literals.len() == 1 {
                literals[0].clone()
            } else {
                format!("({})", literals.join(" | "))
            }
        })
        .collect::<Vec<_>>()
        .join(" & ")
}

/// Converts a parsed formula into CNF text.
pub fn to_cnf(formula: &Formula, clause_limit: usize) -> Result<String, Error> {
    let clauses = distribute(nnf(formula, true), clause_limit)?;
    Ok(render(&clauses))
}

/// Checks `text` for well-formedness and converts it into CNF text.
pub fn formula_to_cnf(text: &str, clause_limit: usize) -> Result<String, Error> {
    let formula = wff::parse_formula(text).context(NotWellFormed)?;
    to_cnf(&formula, clause_limit)
}
