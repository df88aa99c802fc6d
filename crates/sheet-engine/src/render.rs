use crate::sheet::Sheet;
use sheet_formula::Position;
use std::io;

/// Write every cell's evaluated value over the sheet's printable extent, one
/// row per line, columns separated by a tab. Each row ends with a trailing
/// newline after its last field rather than before the next row's first
/// field — every column, including the last, gets the same separator
/// treatment, so no special-casing is needed for row or column boundaries.
pub fn print_values<W: io::Write>(sheet: &Sheet, out: &mut W) -> io::Result<()> {
    print_grid(sheet, out, |sheet, pos| {
        sheet.value_at(pos).map(|v| v.to_string()).unwrap_or_default()
    })
}

/// Like [`print_values`], but writes each cell's raw input text (`""`,
/// `"5"`, `"=A1+1"`) instead of its evaluated value.
pub fn print_texts<W: io::Write>(sheet: &Sheet, out: &mut W) -> io::Result<()> {
    print_grid(sheet, out, |sheet, pos| {
        sheet
            .get_cell(pos)
            .ok()
            .flatten()
            .map(|cell| cell.text())
            .unwrap_or_default()
    })
}

fn print_grid<W, F>(sheet: &Sheet, out: &mut W, mut field: F) -> io::Result<()>
where
    W: io::Write,
    F: FnMut(&Sheet, Position) -> String,
{
    let size = sheet.printable_size();
    for row in 0..size.rows {
        for col in 0..size.cols {
            if col > 0 {
                write!(out, "\t")?;
            }
            write!(out, "{}", field(sheet, Position::new(row, col)))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Sheet;

    #[test]
    fn renders_values_tab_and_newline_separated() {
        let mut sheet = Sheet::new();
        sheet.set_cell(Position::new(0, 0), "1").unwrap();
        sheet.set_cell(Position::new(0, 1), "2").unwrap();
        sheet.set_cell(Position::new(1, 0), "=A1+B1").unwrap();

        let mut buf = Vec::new();
        print_values(&sheet, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1\t2\n3\t\n");
    }

    #[test]
    fn renders_texts_preserving_formula_source() {
        let mut sheet = Sheet::new();
        sheet.set_cell(Position::new(0, 0), "1").unwrap();
        sheet.set_cell(Position::new(0, 1), "=A1+1").unwrap();

        let mut buf = Vec::new();
        print_texts(&sheet, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1\t=A1+1\n");
    }

    #[test]
    fn empty_sheet_renders_nothing() {
        let sheet = Sheet::new();
        let mut buf = Vec::new();
        print_values(&sheet, &mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
