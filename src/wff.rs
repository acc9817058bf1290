/*!
Well-formed propositional formulas.

```text
formula := atom | '¬' formula | '(' formula connective formula ')'
connective := '∧' | '∨' | '→' | '↔'
atom := 'A' ..= 'Z'
```

Whitespace is ignored. Every binary connective must be wrapped in its own pair
of parentheses, so `(A∧B∧C)` is rejected.
*/

use std::fmt::Display;

use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unexpected character '{}' at position {}", character, position))]
    UnexpectedCharacter { character: char, position: usize },
    #[snafu(display("Expected {} but found '{}' at position {}", expected, found, position))]
    UnexpectedToken {
        expected: &'static str,
        found: Token,
        position: usize,
    },
    #[snafu(display("Formula ended early, expected {}", expected))]
    UnexpectedEnd { expected: &'static str },
    #[snafu(display("Unexpected input after the formula at position {}", position))]
    TrailingInput { position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
    Implies,
    Iff,
}

impl Connective {
    pub fn symbol(&self) -> char {
        match self {
            Connective::And => '∧',
            Connective::Or => '∨',
            Connective::Implies => '→',
            Connective::Iff => '↔',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Not,
    Connective(Connective),
    Open,
    Close,
    Atom(char),
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Not => write!(f, "¬"),
            Token::Connective(connective) => write!(f, "{}", connective.symbol()),
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::Atom(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    Atom(String),
    Not(Box<Formula>),
    Binary(Connective, Box<Formula>, Box<Formula>),
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Atom(name) => write!(f, "{}", name),
            Formula::Not(inner) => write!(f, "¬{}", inner),
            Formula::Binary(connective, lhs, rhs) => {
                write!(f, "({}{}{})", lhs, connective.symbol(), rhs)
            }
        }
    }
}

/// Splits the text into tokens, paired with their character position.
pub fn tokenize(text: &str) -> Result<Vec<(usize, Token)>, Error> {
    let mut tokens = Vec::new();

    for (position, character) in text.chars().enumerate() {
        let token = match character {
            c if c.is_whitespace() => continue,
            '¬' => Token::Not,
            '∧' => Token::Connective(Connective::And),
            '∨' => Token::Connective(Connective::Or),
            '→' => Token::Connective(Connective::Implies),
            '↔' => Token::Connective(Connective::Iff),
            '(' => Token::Open,
            ')' => Token::Close,
            c if c.is_ascii_uppercase() => Token::Atom(c),
            _ => {
                return UnexpectedCharacter {
                    character,
                    position,
                }
                .fail()
            }
        };
        tokens.push((position, token));
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    cursor: usize,
}

impl Parser {
    fn next(&mut self, expected: &'static str) -> Result<(usize, Token), Error> {
        let token = *self
            .tokens
            .get(self.cursor)
            .context(UnexpectedEnd { expected })?;
        self.cursor += 1;
        Ok(token)
    }

    /// Parses one formula. A run of `¬` is folded by parity, so `¬¬A` yields `A`.
    fn formula(&mut self) -> Result<Formula, Error> {
        let mut negated = false;
        let mut token = self.next("a formula")?;
        while let (_, Token::Not) = token {
            negated = !negated;
            token = self.next("a formula")?;
        }

        let formula = self.operand(token)?;
        if negated {
            Ok(Formula::Not(Box::new(formula)))
        } else {
            Ok(formula)
        }
    }

    fn operand(&mut self, token: (usize, Token)) -> Result<Formula, Error> {
        match token {
            (_, Token::Atom(name)) => Ok(Formula::Atom(name.to_string())),
            (_, Token::Open) => {
                let lhs = self.formula()?;
                let connective = match self.next("a binary connective")? {
                    (_, Token::Connective(connective)) => connective,
                    (position, found) => {
                        return UnexpectedToken {
                            expected: "a binary connective",
                            found,
                            position,
                        }
                        .fail()
                    }
                };
                let rhs = self.formula()?;
                match self.next("')'")? {
                    (_, Token::Close) => (),
                    (position, found) => {
                        return UnexpectedToken {
                            expected: "')'",
                            found,
                            position,
                        }
                        .fail()
                    }
                }
                Ok(Formula::Binary(connective, Box::new(lhs), Box::new(rhs)))
            }
            (position, found) => UnexpectedToken {
                expected: "a formula",
                found,
                position,
            }
            .fail(),
        }
    }
}

/// Parses a formula, failing unless the whole text is one well-formed formula.
pub fn parse_formula(text: &str) -> Result<Formula, Error> {
    let mut parser = Parser {
        tokens: tokenize(text)?,
        cursor: 0,
    };

    let formula = parser.formula()?;
    if let Some(&(position, _)) = parser.tokens.get(parser.cursor) {
        return TrailingInput { position }.fail();
    }

    Ok(formula)
}

pub fn is_well_formed(text: &str) -> bool {
    parse_formula(text).is_ok()
}
