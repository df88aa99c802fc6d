use thiserror::Error;

/// The parser rejected the expression text. Raised by [`crate::parse_formula`]
/// and left entirely to the caller to decide what to do (the sheet layer turns
/// this into `SheetError::FormulaSyntax` and leaves the cell unchanged).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("formula syntax error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        ParseError { message: message.into() }
    }
}

/// An evaluation outcome carried as a cell *value*, not raised as an
/// exception — a formula referencing a cell that itself holds `#DIV/0!`
/// needs to see that error and propagate it, not have evaluation abort.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaError {
    #[error("#REF!")]
    Ref,
    #[error("#VALUE!")]
    Value,
    #[error("#DIV/0!")]
    Div0,
}
