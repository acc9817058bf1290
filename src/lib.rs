#[macro_use]
extern crate log;

pub mod convert;
pub mod formula;
pub mod generator;
pub mod parser;
pub mod pipeline;
pub mod prelude;
pub mod report;
pub mod selector;
pub mod solver;
pub mod wff;

#[cfg(test)]
mod tests;
