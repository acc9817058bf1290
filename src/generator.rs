/*!
Random clause sets for cross-checking the solvers against each other.
*/

use rand::Rng;

use crate::formula::{Clause, Cnf, Literal, Variable};

#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    pub max_variables: usize,
    pub max_clauses: usize,
    pub max_clause_len: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            max_variables: 6,
            max_clauses: 10,
            max_clause_len: 3,
        }
    }
}

/// Draws a formula with 1 to `max_variables` variables and 0 to `max_clauses`
/// non-empty clauses.
pub fn random_cnf<R: Rng>(rng: &mut R, config: &GeneratorConfig) -> Cnf {
    let num_variables = rng.gen_range(1..=config.max_variables.max(1));
    let num_clauses = rng.gen_range(0..=config.max_clauses);

    let mut cnf = Cnf::new(num_variables);
    for _ in 0..num_clauses {
        let len = rng.gen_range(1..=config.max_clause_len.max(1));
        let literals = (0..len)
            .map(|_| {
                let variable = Variable::from(rng.gen_range(0..num_variables));
                Literal::new(variable, rng.gen_bool(0.5))
            })
            .collect();
        cnf.add_clause(Clause::new(literals));
    }

    cnf
}
