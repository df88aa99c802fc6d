use sheet_formula::FormulaError;
use std::fmt;

/// The evaluated content of a cell: a number, a string, or an evaluation
/// error carried as a value rather than raised.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Error(FormulaError),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Error(e) => write!(f, "{e}"),
        }
    }
}

/// Canonical number formatting: integers print as bare digits, non-integers
/// print with two fractional digits, and non-finite values print as the
/// sentinel tokens `#NAN!`/`#INF!` rather than whatever the platform's float
/// formatter happens to produce.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        format!("{n:.0}")
    } else {
        format!("{n:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_integers_without_decimal() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn formats_fractions_with_two_digits() {
        assert_eq!(format_number(1.5), "1.50");
        assert_eq!(format_number(0.3), "0.30");
    }

    #[test]
    fn formats_non_finite_as_sentinels() {
        assert_eq!(format_number(f64::NAN), "#NAN!");
        assert_eq!(format_number(f64::INFINITY), "#INF!");
        assert_eq!(format_number(f64::NEG_INFINITY), "#INF!");
    }

    #[test]
    fn display_error_uses_short_token() {
        assert_eq!(CellValue::Error(FormulaError::Div0).to_string(), "#DIV/0!");
        assert_eq!(CellValue::Error(FormulaError::Ref).to_string(), "#REF!");
        assert_eq!(CellValue::Error(FormulaError::Value).to_string(), "#VALUE!");
    }
}
