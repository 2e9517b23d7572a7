//! Abstract Syntax Tree (AST) representation for the expansion engine.
//!
//! Class members live in an [`Arena`] addressed by stable ids, so a handler
//! can rewrite one member's annotation list while a traversal over the same
//! class is in progress without invalidating anything. Statement and
//! expression trees inside method bodies are plain owned enums.

mod arena;
mod nodes;
mod printer;

pub use arena::*;
pub use nodes::*;
pub use printer::*;

/// Source location information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Location {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

/// Span of source code (start and end locations)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    pub fn from_to(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start: Location::new(start_line, start_col, 0),
            end: Location::new(end_line, end_col, 0),
        }
    }
}
