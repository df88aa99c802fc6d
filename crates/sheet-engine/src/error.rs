use sheet_formula::ParseError;
use thiserror::Error;

/// Structural errors raised by [`crate::Sheet`]'s public API. Raising one of
/// these leaves the sheet entirely unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("invalid position")]
    InvalidPosition,
    #[error(transparent)]
    FormulaSyntax(#[from] ParseError),
    #[error("circular dependency")]
    CircularDependency,
}
