use crate::error::SheetError;
use crate::sheet::Sheet;
use crate::value::CellValue;
use sheet_formula::{parse_formula, Ast, Position};
use std::cell::RefCell;

const FORMULA_SIGIL: char = '=';
const ESCAPE_SIGIL: char = '\'';

#[derive(Debug, Clone, PartialEq)]
enum CellKind {
    Empty,
    Text(String),
    Formula {
        /// Raw source including the leading `=`.
        source: String,
        ast: Ast,
        referenced: Vec<Position>,
    },
}

/// A single grid location: empty, a text literal, or a formula.
///
/// `Cell` never stores a reference back to its owning [`Sheet`] — evaluation
/// takes `&Sheet` as an explicit parameter instead, which sidesteps the
/// self-referential ownership a stored back-reference would require.
#[derive(Debug)]
pub struct Cell {
    kind: CellKind,
    /// Cache lives behind a `RefCell` so `value()` can populate it through a
    /// shared reference — recursive evaluation only ever takes `&Sheet`, and
    /// cycle rejection at edit time guarantees no cell's evaluation can
    /// re-enter its own cache cell, so this never double-borrows.
    cache: RefCell<Option<CellValue>>,
    dependents: std::collections::HashSet<Position>,
}

impl Cell {
    pub fn empty() -> Cell {
        Cell { kind: CellKind::Empty, cache: RefCell::new(None), dependents: Default::default() }
    }

    /// Set this cell's content from raw input text. On a parse failure the
    /// cell is left completely unchanged — the new `CellKind` is only
    /// committed once parsing succeeds.
    pub fn set(&mut self, text: &str) -> Result<(), SheetError> {
        let new_kind = if text.is_empty() {
            CellKind::Empty
        } else if text.starts_with(FORMULA_SIGIL) && text.len() > 1 {
            let ast = parse_formula(&text[1..])?;
            let referenced = ast.referenced_positions().to_vec();
            CellKind::Formula { source: text.to_string(), ast, referenced }
        } else {
            CellKind::Text(text.to_string())
        };
        self.kind = new_kind;
        *self.cache.borrow_mut() = None;
        Ok(())
    }

    /// Evaluate this cell's value, using `sheet` to resolve any references.
    /// Never fails: evaluation errors surface as `CellValue::Error`.
    pub fn value(&self, sheet: &Sheet) -> CellValue {
        match &self.kind {
            CellKind::Empty => CellValue::Number(0.0),
            CellKind::Text(text) => {
                if text.is_empty() {
                    CellValue::Number(0.0)
                } else if let Some(stripped) = text.strip_prefix(ESCAPE_SIGIL) {
                    CellValue::Text(stripped.to_string())
                } else {
                    CellValue::Text(text.clone())
                }
            }
            CellKind::Formula { ast, .. } => {
                if let Some(cached) = self.cache.borrow().as_ref() {
                    return cached.clone();
                }
                let result = ast.execute(|pos| sheet.resolve(pos));
                let value = match result {
                    Ok(n) => CellValue::Number(n),
                    Err(e) => CellValue::Error(e),
                };
                *self.cache.borrow_mut() = Some(value.clone());
                value
            }
        }
    }

    pub fn text(&self) -> String {
        match &self.kind {
            CellKind::Empty => String::new(),
            CellKind::Text(text) => text.clone(),
            CellKind::Formula { ast, .. } => format!("={}", ast.print_canonical()),
        }
    }

    pub fn referenced_cells(&self) -> &[Position] {
        match &self.kind {
            CellKind::Formula { referenced, .. } => referenced,
            _ => &[],
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self.kind, CellKind::Formula { .. })
    }

    pub fn is_empty_content(&self) -> bool {
        matches!(self.kind, CellKind::Empty)
    }

    pub fn invalidate_cache(&self) {
        *self.cache.borrow_mut() = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cache.borrow().is_some()
    }

    pub(crate) fn dependents(&self) -> &std::collections::HashSet<Position> {
        &self.dependents
    }

    pub(crate) fn add_dependent(&mut self, pos: Position) {
        self.dependents.insert(pos);
    }

    pub(crate) fn remove_dependent(&mut self, pos: Position) {
        self.dependents.remove(&pos);
    }

    pub(crate) fn has_dependents(&self) -> bool {
        !self.dependents.is_empty()
    }

    pub fn is_depended_on_by(&self, pos: Position) -> bool {
        self.dependents.contains(&pos)
    }
}
