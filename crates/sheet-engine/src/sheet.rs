use crate::cell::Cell;
use crate::error::SheetError;
use crate::value::CellValue;
use log::{trace, warn};
use sheet_formula::{FormulaError, Position, Size};
use std::collections::{HashMap, HashSet};

/// Owns the sparse grid of [`Cell`]s, the dependency graph threaded through
/// their `dependents` sets, and the two tracked extents.
///
/// A slot absent from `cells` *is* the "no cell at this position" state — no
/// `Option<Cell>` wrapper is needed on top of the map's own `Option` from
/// `get`/`remove`.
#[derive(Debug, Default)]
pub struct Sheet {
    cells: HashMap<Position, Cell>,
    capacity: Size,
    printable_size: Size,
}

impl Sheet {
    pub fn new() -> Sheet {
        Sheet::default()
    }

    pub fn printable_size(&self) -> Size {
        self.printable_size
    }

    pub fn get_cell(&self, pos: Position) -> Result<Option<&Cell>, SheetError> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }
        Ok(self.cells.get(&pos))
    }

    /// Evaluate the cell at `pos`, treating an absent cell as `0.0` and an
    /// invalid position as `FormulaError::Ref` — the resolver contract a
    /// formula's AST is executed against.
    pub(crate) fn resolve(&self, pos: Position) -> Result<f64, FormulaError> {
        if !pos.is_valid() {
            return Err(FormulaError::Ref);
        }
        match self.cells.get(&pos) {
            None => Ok(0.0),
            Some(cell) => match cell.value(self) {
                CellValue::Number(n) => Ok(n),
                CellValue::Error(e) => Err(e),
                CellValue::Text(s) => s.parse::<f64>().map_err(|_| FormulaError::Value),
            },
        }
    }

    /// Evaluate the cell at `pos` for external callers, returning `0.0` for
    /// an absent (but valid) position, matching `Cell::value`'s "Empty"
    /// behavior.
    pub fn value_at(&self, pos: Position) -> Result<CellValue, SheetError> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }
        Ok(match self.cells.get(&pos) {
            None => CellValue::Number(0.0),
            Some(cell) => cell.value(self),
        })
    }

    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<(), SheetError> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }

        let pre_capacity = self.capacity;
        self.grow_capacity(pos);

        if self.cells.contains_key(&pos) {
            self.edit_cell(pos, text)
        } else {
            self.create_cell(pos, text, pre_capacity)
        }
    }

    fn create_cell(&mut self, pos: Position, text: &str, pre_capacity: Size) -> Result<(), SheetError> {
        let mut cell = Cell::empty();
        if let Err(e) = cell.set(text) {
            // Parsing failed: the slot is never inserted, capacity restored.
            self.capacity = pre_capacity;
            return Err(e);
        }
        self.cells.insert(pos, cell);

        if self.detect_cycle(pos) {
            self.cells.remove(&pos);
            self.capacity = pre_capacity;
            warn!("rejected edit at {pos}: would introduce a circular dependency");
            return Err(SheetError::CircularDependency);
        }

        self.invalidate_cache_transitive(pos);
        self.register_dependencies(pos);
        self.update_printable_size(pos);
        Ok(())
    }

    fn edit_cell(&mut self, pos: Position, text: &str) -> Result<(), SheetError> {
        let old_text = self.cells[&pos].text();
        if old_text == text {
            return Ok(());
        }
        let old_referenced: Vec<Position> = self.cells[&pos].referenced_cells().to_vec();

        let cell = self.cells.get_mut(&pos).expect("checked above");
        cell.set(text)?;

        if self.detect_cycle(pos) {
            let cell = self.cells.get_mut(&pos).expect("checked above");
            cell.set(&old_text).expect("restoring previously-valid text cannot fail");
            warn!("rejected edit at {pos}: would introduce a circular dependency");
            return Err(SheetError::CircularDependency);
        }

        self.invalidate_cache_transitive(pos);
        self.unregister_dependencies(pos, &old_referenced);
        self.register_dependencies(pos);
        self.update_printable_size(pos);
        Ok(())
    }

    /// Depth-first search over the outgoing reference edges of the cell at
    /// `pos`: true iff some path leads back to `pos`. Carries a `visiting`
    /// set to stay O(V+E) on shared sub-DAGs.
    fn detect_cycle(&self, start: Position) -> bool {
        let mut visiting = HashSet::new();
        self.has_path_back_to(start, start, &mut visiting)
    }

    fn has_path_back_to(&self, current: Position, target: Position, visiting: &mut HashSet<Position>) -> bool {
        let Some(cell) = self.cells.get(&current) else {
            return false;
        };
        for &next in cell.referenced_cells() {
            if next == target {
                return true;
            }
            if visiting.insert(next) && self.has_path_back_to(next, target, visiting) {
                return true;
            }
        }
        false
    }

    /// Clear the cached value of the formula at `pos`, and recurse into its
    /// dependents — but only if there was actually something cached. A cell
    /// that was never cached has nothing stale for its dependents to have
    /// inherited (invariant 4's contrapositive), so the walk stops there.
    fn invalidate_cache_transitive(&mut self, pos: Position) {
        let mut stack = vec![pos];
        let mut invalidated = 0usize;
        while let Some(current) = stack.pop() {
            let Some(cell) = self.cells.get(&current) else { continue };
            if !cell.is_cached() {
                continue;
            }
            cell.invalidate_cache();
            invalidated += 1;
            stack.extend(cell.dependents().iter().copied());
        }
        if invalidated > 0 {
            trace!("invalidated {invalidated} cached value(s) starting from {pos}");
        }
    }

    fn register_dependencies(&mut self, pos: Position) {
        let referenced: Vec<Position> = self.cells[&pos].referenced_cells().to_vec();
        for target in referenced {
            self.grow_capacity(target);
            self.cells.entry(target).or_insert_with(Cell::empty);
            self.cells.get_mut(&target).expect("just inserted").add_dependent(pos);
        }
    }

    fn unregister_dependencies(&mut self, pos: Position, old_referenced: &[Position]) {
        for &target in old_referenced {
            if let Some(cell) = self.cells.get_mut(&target) {
                cell.remove_dependent(pos);
            }
        }
    }

    /// Clear a cell's content. Clearing never removes a slot that is still
    /// referenced by a live formula — it resets the slot's content to Empty
    /// instead, which is exactly the state a referenced-but-unset cell is
    /// created in by `register_dependencies`. The slot is dropped from the
    /// map outright only when nothing depends on it.
    pub fn clear_cell(&mut self, pos: Position) -> Result<(), SheetError> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }
        let Some(cell) = self.cells.get(&pos) else {
            return Ok(());
        };
        let old_referenced: Vec<Position> = cell.referenced_cells().to_vec();
        let still_referenced = cell.has_dependents();

        self.invalidate_cache_transitive(pos);
        self.unregister_dependencies(pos, &old_referenced);

        if still_referenced {
            self.cells.get_mut(&pos).expect("checked above").set("").expect("clearing to empty cannot fail");
        } else {
            self.cells.remove(&pos);
        }

        self.update_printable_size(pos);
        Ok(())
    }

    fn grow_capacity(&mut self, pos: Position) {
        self.capacity.rows = self.capacity.rows.max(pos.row + 1);
        self.capacity.cols = self.capacity.cols.max(pos.col + 1);
    }

    /// Keep `printable_size` consistent with `pos`'s current content: grow
    /// to include it if it's now non-empty, or — since shrinking needs to
    /// know about every other cell, not just this one — recompute from
    /// scratch if `pos` was on the frontier and might no longer be covered.
    fn update_printable_size(&mut self, pos: Position) {
        if self.cells.get(&pos).is_some_and(|c| !c.is_empty_content()) {
            self.printable_size.rows = self.printable_size.rows.max(pos.row + 1);
            self.printable_size.cols = self.printable_size.cols.max(pos.col + 1);
        } else {
            self.recompute_printable_size_if_on_frontier(pos);
        }
    }

    fn recompute_printable_size_if_on_frontier(&mut self, pos: Position) {
        let on_frontier = pos.row + 1 == self.printable_size.rows || pos.col + 1 == self.printable_size.cols;
        if !on_frontier {
            return;
        }
        let mut rows = 0;
        let mut cols = 0;
        for (p, cell) in &self.cells {
            if !cell.is_empty_content() {
                rows = rows.max(p.row + 1);
                cols = cols.max(p.col + 1);
            }
        }
        self.printable_size = Size::new(rows, cols);
    }
}
