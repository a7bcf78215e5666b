use std::error;

use derive_more::Display;

/// A structural error that occurred while building the raw tree.
/// Fatal, no tree is returned when one of these is encountered.
#[derive(Debug, Display, PartialEq, Eq, Clone)]
pub enum ParsingError {
    /// A scope was closed while the cursor was already at the root, and it
    /// wasn't the final line of the input.
    #[display("unexpected close of the root scope on line {}", line)]
    UnexpectedClose { line: usize },
    /// The input ended with scopes still open.
    #[display("input ended with {} unterminated scope(s)", depth)]
    UnterminatedScope { depth: usize },
    /// A single line section whose body couldn't be delimited.
    #[display("invalid single line section span on line {}", line)]
    InvalidSpan { line: usize },
}

impl error::Error for ParsingError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
