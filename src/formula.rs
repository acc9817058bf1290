/*!
A module to represent conjunctive normal form formula.

Variables are dense integer IDs starting at 1. The [`VariableMap`] ties each ID
back to the name it was parsed from, so results can be reported by name.
*/

use std::{
    borrow::Cow,
    collections::{BTreeSet, HashMap},
    convert::TryInto,
    fmt::Display,
    num::NonZeroU32,
    str::FromStr,
};

use typed_index_collections::TiVec;

use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum LiteralError {
    #[snafu(display("Failed to parse literal"))]
    ParseIntError { source: std::num::ParseIntError },
    #[snafu(display("Literal 0 does not name a variable"))]
    ZeroLiteral,
    #[snafu(display(
        "Variable ID {} is out of range (must be within 1 to {})",
        num,
        Variable::MAX_VARIABLE_ID
    ))]
    RangeError { num: i64 },
}

/// Newtype wrapper for variable ID.
/// Invariant: 0 < ID <= MAX_VARIABLE_ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(NonZeroU32);

impl Variable {
    /// Bounded by `i32::MAX` so that every literal has a signed encoding.
    pub const MAX_VARIABLE_ID: usize = std::i32::MAX as usize;
}

impl Variable {
    pub fn id(&self) -> u32 {
        self.0.get()
    }

    pub fn as_index(&self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// Creates a variable from a raw index.
    /// Returns `None` if the index is invalid.
    pub fn from_index(index: usize) -> Option<Self> {
        let id = index.checked_add(1)?;
        if id > Variable::MAX_VARIABLE_ID {
            return None;
        }
        Some(Variable(NonZeroU32::new(id.try_into().ok()?)?))
    }
}

impl From<usize> for Variable {
    fn from(index: usize) -> Self {
        Variable::from_index(index).expect("variable index out of range")
    }
}

impl From<Variable> for usize {
    fn from(variable: Variable) -> Self {
        variable.as_index()
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    id: Variable,
    positive: bool,
}

impl Literal {
    pub fn new(id: Variable, positive: bool) -> Self {
        Literal { id, positive }
    }

    pub fn variable(&self) -> Variable {
        self.id
    }

    pub fn positive(&self) -> bool {
        self.positive
    }

    /// Decodes the signed integer form: magnitude is the variable ID, sign is the polarity.
    pub fn from_signed(value: i32) -> Result<Self, LiteralError> {
        ensure!(value != 0, ZeroLiteral);

        let magnitude = value.checked_abs().context(RangeError {
            num: i64::from(value),
        })?;
        let id = Variable::from_index(magnitude as usize - 1).context(RangeError {
            num: i64::from(value),
        })?;

        Ok(Literal::new(id, value > 0))
    }

    pub fn to_signed(&self) -> i32 {
        let id = self.id.id() as i32;
        if self.positive {
            id
        } else {
            -id
        }
    }
}

impl FromStr for Literal {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Literal::from_signed(s.parse::<i32>().context(ParseIntError)?)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.positive { "" } else { "¬" }, self.id)
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            id: self.id,
            positive: !self.positive,
        }
    }
}

/// Disjunction of literals.
///
/// Literals keep the order they were first given in; repeated literals are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        let mut deduped = Vec::with_capacity(literals.len());
        for literal in literals {
            if !deduped.contains(&literal) {
                deduped.push(literal);
            }
        }

        Self { literals: deduped }
    }

    pub fn num_literals(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Returns the sole literal of a unit clause.
    pub fn unit(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [literal] => Some(*literal),
            _ => None,
        }
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.contains(&literal)
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }

    /// Returns a copy of the clause without `literal`.
    pub fn without(&self, literal: Literal) -> Clause {
        Clause {
            literals: self.iter().filter(|&l| l != literal).collect(),
        }
    }

    pub fn to_set(&self) -> BTreeSet<Literal> {
        self.iter().collect()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;

        let mut iter = self.literals.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for literal in iter {
            write!(f, " ∨ {}", literal)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// Formula representation in Conjunctive Normal Form
#[derive(Debug, Clone)]
pub struct Cnf {
    num_variables: usize,
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(num_variables: usize) -> Self {
        assert!(num_variables <= Variable::MAX_VARIABLE_ID);

        Cnf {
            num_variables,
            clauses: Vec::new(),
        }
    }

    /// Builds a formula from clauses in signed integer form.
    /// The variable count is the largest magnitude seen.
    pub fn from_signed<C: AsRef<[i32]>>(clauses: &[C]) -> Result<Self, LiteralError> {
        let mut parsed = Vec::with_capacity(clauses.len());
        let mut num_variables = 0;

        for clause in clauses {
            let literals = clause
                .as_ref()
                .iter()
                .map(|&value| Literal::from_signed(value))
                .collect::<Result<Vec<_>, _>>()?;
            for literal in &literals {
                num_variables = num_variables.max(literal.variable().id() as usize);
            }
            parsed.push(Clause::new(literals));
        }

        Ok(Cnf {
            num_variables,
            clauses: parsed,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn clauses(&self) -> &Vec<Clause> {
        &self.clauses
    }

    pub fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }

    pub fn add_clause(&mut self, clause: Clause) {
        debug_assert!(clause
            .iter()
            .all(|literal| literal.variable().id() as usize <= self.num_variables));
        self.clauses.push(clause);
    }

    /// Variables that occur in at least one clause, in ascending ID order.
    pub fn occurring_variables(&self) -> BTreeSet<Variable> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.iter())
            .map(|literal| literal.variable())
            .collect()
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CNF with {} variables (", self.num_variables)?;

        let mut iter = self.clauses.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for clause in iter {
            write!(f, " ∧ {}", clause)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// A literal spelled with its variable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedLiteral {
    name: String,
    negated: bool,
}

impl NamedLiteral {
    pub fn new(name: impl Into<String>, negated: bool) -> Self {
        NamedLiteral {
            name: name.into(),
            negated,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn negated(&self) -> bool {
        self.negated
    }
}

impl Display for NamedLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.negated { "¬" } else { "" }, self.name)
    }
}

/// Bijection between variable names and variables.
///
/// IDs are handed out in first-seen order. Entries are never removed or renamed.
/// A numbered map spells `x<id>` on demand for every ID up to its bound, so a
/// large declared variable count costs nothing until a name is asked for.
#[derive(Debug, Clone, Default)]
pub struct VariableMap {
    names: TiVec<Variable, String>,
    ids: HashMap<String, Variable>,
    numbered: usize,
}

impl VariableMap {
    pub fn new() -> Self {
        Default::default()
    }

    /// A map naming `x1` to `x<num_variables>`, for formulas that come without names.
    pub fn numbered(num_variables: usize) -> Self {
        VariableMap {
            numbered: num_variables,
            ..Default::default()
        }
    }

    fn numbered_variable(&self, name: &str) -> Option<Variable> {
        let digits = name.strip_prefix('x')?;
        if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let id = digits.parse::<usize>().ok()?;
        if id > self.numbered {
            return None;
        }
        Variable::from_index(id.checked_sub(1)?)
    }

    /// Returns the variable for `name`, assigning the next ID if it is new.
    pub fn insert(&mut self, name: &str) -> Variable {
        debug_assert_eq!(self.numbered, 0, "numbered maps are not extended by name");
        if let Some(&variable) = self.ids.get(name) {
            return variable;
        }

        let variable = Variable::from(self.names.len());
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), variable);
        variable
    }

    pub fn get(&self, name: &str) -> Option<Variable> {
        self.ids
            .get(name)
            .copied()
            .or_else(|| self.numbered_variable(name))
    }

    pub fn name(&self, variable: Variable) -> Option<Cow<'_, str>> {
        if let Some(name) = self.names.get(variable) {
            return Some(Cow::Borrowed(name));
        }
        if variable.id() as usize <= self.numbered {
            return Some(Cow::Owned(format!("x{}", variable.id())));
        }
        None
    }

    pub fn len(&self) -> usize {
        self.names.len().max(self.numbered)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn decode(&self, literal: Literal) -> Option<NamedLiteral> {
        let name = self.name(literal.variable())?;
        Some(NamedLiteral::new(name, !literal.positive()))
    }
}

/// Ordered list of forced literals, as produced by a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    literals: Vec<Literal>,
}

impl Assignment {
    pub fn new(literals: Vec<Literal>) -> Self {
        Assignment { literals }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Value of `variable`, or `None` if it was never assigned.
    pub fn value(&self, variable: Variable) -> Option<bool> {
        self.literals
            .iter()
            .find(|literal| literal.variable() == variable)
            .map(|literal| literal.positive())
    }

    /// No variable is assigned both polarities.
    pub fn is_consistent(&self) -> bool {
        self.literals
            .iter()
            .all(|&literal| !self.literals.contains(&!literal))
    }

    /// Every clause of `formula` has a literal made true by this assignment.
    pub fn satisfies(&self, formula: &Cnf) -> bool {
        self.is_consistent()
            && formula
                .clauses()
                .iter()
                .all(|clause| clause.iter().any(|literal| self.literals.contains(&literal)))
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut iter = self.literals.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for literal in iter {
            write!(f, " {}", literal)?;
        }

        Ok(())
    }
}
