use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::formula::{Clause, Cnf, Literal, LiteralError, NamedLiteral, VariableMap};
use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("CNF text is empty"))]
    EmptyCnf,
    #[snafu(display("Parentheses are not balanced in CNF text '{}'", text))]
    UnbalancedParentheses { text: String },
    #[snafu(display("Empty clause found in CNF text '{}'", text))]
    EmptyClause { text: String },
    #[snafu(display("Empty literal found in clause '{}'", clause))]
    EmptyLiteral { clause: String },
    #[snafu(display("Invalid variable name '{}' in clause '{}'", name, clause))]
    InvalidVariableName { name: String, clause: String },
    #[snafu(display("I/O error occurred while parsing CNF file '{}'", path.display()))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse line '{}' as clause", clause))]
    MalformedClause { clause: String },
    #[snafu(display("Invalid variable found in clause '{}'", clause))]
    MalformedVariable {
        clause: String,
        source: LiteralError,
    },
    #[snafu(display(
        "Variable {} in clause '{}' exceeds the declared variable count {}",
        literal,
        clause,
        num_variables
    ))]
    VariableOutOfRange {
        literal: i32,
        clause: String,
        num_variables: usize,
    },
    #[snafu(display("Problem line 'p cnf <num_variables> <num_clauses>' is not found"))]
    MalformedProblemDefinition,
    #[snafu(display(
        "The number of clauses ({}) does not match the clauses number in the problem definition ({})",
        found,
        expected,
    ))]
    ClauseCountMismatch { expected: usize, found: usize },
}

/// Clauses whose literals are still spelled by name.
pub type NamedClauses = Vec<Vec<NamedLiteral>>;

fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn parse_literal(token: &str, clause: &str) -> Result<NamedLiteral, Error> {
    let token = token.trim();
    ensure!(
        !token.is_empty(),
        EmptyLiteral {
            clause: clause.trim(),
        }
    );

    let (negated, name) = match token.strip_prefix('~') {
        Some(rest) => (true, rest.trim()),
        None => (false, token),
    };

    ensure!(
        !name.is_empty(),
        EmptyLiteral {
            clause: clause.trim(),
        }
    );
    ensure!(
        is_variable_name(name),
        InvalidVariableName {
            name,
            clause: clause.trim(),
        }
    );

    Ok(NamedLiteral::new(name, negated))
}

/// Splits CNF text such as `(A | ~B) & C` into clauses of named literals.
///
/// `&` separates clauses, `|` separates literals and `~` negates a literal.
/// Parentheses carry no meaning beyond grouping and are dropped once they are
/// known to be balanced.
pub fn parse_cnf(text: &str) -> Result<NamedClauses, Error> {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .context(UnbalancedParentheses { text })?;
            }
            _ => (),
        }
    }
    ensure!(depth == 0, UnbalancedParentheses { text });

    let stripped = text.replace(|c: char| c == '(' || c == ')', "");
    ensure!(!stripped.trim().is_empty(), EmptyCnf);

    let mut clauses = Vec::new();
    for clause in stripped.split('&') {
        ensure!(!clause.trim().is_empty(), EmptyClause { text });

        let literals = clause
            .split('|')
            .map(|token| parse_literal(token, clause))
            .collect::<Result<Vec<_>, _>>()?;
        clauses.push(literals);
    }

    Ok(clauses)
}

/// Numbers variables in the order they are first met, clause by clause, left to right.
pub fn encode(clauses: &[Vec<NamedLiteral>]) -> (Cnf, VariableMap) {
    let mut variables = VariableMap::new();

    let encoded = clauses
        .iter()
        .map(|clause| {
            clause
                .iter()
                .map(|literal| Literal::new(variables.insert(literal.name()), !literal.negated()))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut cnf = Cnf::new(variables.len());
    for literals in encoded {
        cnf.add_clause(Clause::new(literals));
    }

    (cnf, variables)
}

/// Looks up the name of `literal`. `None` if the variable was never encoded.
pub fn decode(literal: Literal, variables: &VariableMap) -> Option<NamedLiteral> {
    variables.decode(literal)
}

/// Parse a DIMACS line to a clause
fn parse_line(line: &str, num_variables: usize) -> Result<Clause, Error> {
    let mut literals = Vec::new();

    let splitted = line.split_whitespace().collect::<Vec<_>>();

    ensure!(
        !splitted.is_empty() && splitted[splitted.len() - 1] == "0",
        MalformedClause { clause: line }
    );

    for s in &splitted[..splitted.len() - 1] {
        let literal = s
            .parse::<Literal>()
            .context(MalformedVariable { clause: line })?;
        ensure!(
            literal.variable().id() as usize <= num_variables,
            VariableOutOfRange {
                literal: literal.to_signed(),
                clause: line,
                num_variables,
            }
        );
        literals.push(literal);
    }

    Ok(Clause::new(literals))
}

/// Parses a DIMACS CNF formula from a reader. `path` is only used in error messages.
pub fn parse_dimacs(reader: impl BufRead, path: &Path) -> Result<Cnf, Error> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line.context(IoError { path })?);
    }

    // skip until we find the problem definition
    let mut lines = lines.into_iter().skip_while(|line| !line.starts_with('p'));

    let prob_line = lines
        .next()
        .ok_or_else(|| MalformedProblemDefinition.build())?;

    let splitted = prob_line.split_whitespace().collect::<Vec<_>>();

    // We only support CNF DIMACS format
    ensure!(
        splitted.len() == 4 && splitted[0] == "p" && splitted[1] == "cnf",
        MalformedProblemDefinition
    );

    let (num_variables, num_clauses) =
        match (splitted[2].parse::<usize>(), splitted[3].parse::<usize>()) {
            (Ok(num_variables), Ok(num_clauses)) if num_variables <= i32::MAX as usize => {
                (num_variables, num_clauses)
            }
            _ => return MalformedProblemDefinition.fail(),
        };

    let mut cnf = Cnf::new(num_variables);

    for line in lines {
        let trimmed = line.trim();
        if trimmed.starts_with('%') {
            // end marker used by the SATLIB benchmark files
            break;
        }
        if trimmed.is_empty() || trimmed.starts_with('c') {
            // empty line, comment
            continue;
        }
        cnf.add_clause(parse_line(trimmed, num_variables)?);
    }

    ensure!(
        cnf.clauses().len() == num_clauses,
        ClauseCountMismatch {
            found: cnf.clauses().len(),
            expected: num_clauses,
        }
    );

    Ok(cnf)
}

/// Parses a DIMACS CNF formula from a file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Cnf, Error> {
    let path = path.as_ref();
    let file = BufReader::new(File::open(path).context(IoError { path })?);

    parse_dimacs(file, path)
}
