//! Sparse-grid sheet: cell content, the dependency graph between cells, cycle
//! rejection, and incremental cache invalidation, built on top of the
//! arithmetic formulas parsed by `sheet-formula`.

mod cell;
mod error;
mod render;
mod sheet;
mod value;

pub use cell::Cell;
pub use error::SheetError;
pub use render::{print_texts, print_values};
pub use sheet::Sheet;
pub use sheet_formula::{FormulaError, Position, Size, MAX_COLS, MAX_ROWS};
pub use value::{format_number, CellValue};
