use sheet_engine::{print_values, CellValue, FormulaError, Position, Sheet, SheetError};

#[test]
fn edit_chain_reprices_a_column_of_running_totals() {
    let mut sheet = Sheet::new();
    sheet.set_cell(Position::new(0, 0), "10").unwrap();
    sheet.set_cell(Position::new(1, 0), "=A1+1").unwrap();
    sheet.set_cell(Position::new(2, 0), "=A2+1").unwrap();
    assert_eq!(sheet.value_at(Position::new(2, 0)).unwrap(), CellValue::Number(12.0));

    sheet.set_cell(Position::new(0, 0), "100").unwrap();
    assert_eq!(sheet.value_at(Position::new(2, 0)).unwrap(), CellValue::Number(102.0));
}

#[test]
fn rejecting_a_cycle_does_not_disturb_unrelated_cells() {
    let mut sheet = Sheet::new();
    sheet.set_cell(Position::new(0, 0), "1").unwrap();
    sheet.set_cell(Position::new(0, 1), "=A1").unwrap();
    sheet.set_cell(Position::new(0, 2), "=B1").unwrap();

    let err = sheet.set_cell(Position::new(0, 0), "=C1").unwrap_err();
    assert_eq!(err, SheetError::CircularDependency);

    assert_eq!(sheet.value_at(Position::new(0, 0)).unwrap(), CellValue::Number(1.0));
    assert_eq!(sheet.value_at(Position::new(0, 1)).unwrap(), CellValue::Number(1.0));
    assert_eq!(sheet.value_at(Position::new(0, 2)).unwrap(), CellValue::Number(1.0));
}

#[test]
fn rendering_reflects_the_printable_frontier_after_a_clear() {
    let mut sheet = Sheet::new();
    sheet.set_cell(Position::new(0, 0), "1").unwrap();
    sheet.set_cell(Position::new(3, 3), "last").unwrap();
    assert_eq!(sheet.printable_size(), sheet_engine::Size::new(4, 4));

    sheet.clear_cell(Position::new(3, 3)).unwrap();
    assert_eq!(sheet.printable_size(), sheet_engine::Size::new(1, 1));

    let mut buf = Vec::new();
    print_values(&sheet, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "1\n");
}

#[test]
fn formula_referencing_a_text_cell_that_does_not_parse_as_a_number_is_value_error() {
    let mut sheet = Sheet::new();
    sheet.set_cell(Position::new(0, 0), "not a number").unwrap();
    sheet.set_cell(Position::new(0, 1), "=A1+1").unwrap();
    assert_eq!(
        sheet.value_at(Position::new(0, 1)).unwrap(),
        CellValue::Error(FormulaError::Value)
    );
}
