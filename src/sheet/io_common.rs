// Primitives shared by the readers.

use lazy_static::lazy_static;
use regex::Regex;
use sheet_validator::columns::slugify;
use sheet_validator::CellValue;

lazy_static! {
    static ref INTEGER_REGEX: Regex = Regex::new(r"^[-+]?[0-9]{1,18}$").expect("invalid integer regex");
    static ref DECIMAL_REGEX: Regex =
        Regex::new(r"^[-+]?[0-9]*\.[0-9]+([eE][-+]?[0-9]+)?$").expect("invalid decimal regex");
}

/// Types the content of a text cell.
///
/// Anything that is neither an integer nor a decimal with a dot stays text,
/// including numbers written with a decimal comma.
pub fn read_cell(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        CellValue::Empty
    } else if INTEGER_REGEX.is_match(s) {
        s.parse::<i64>()
            .map(CellValue::Int)
            .unwrap_or_else(|_| CellValue::Text(s.to_string()))
    } else if DECIMAL_REGEX.is_match(s) {
        s.parse::<f64>()
            .map(CellValue::Decimal)
            .unwrap_or_else(|_| CellValue::Text(s.to_string()))
    } else {
        CellValue::Text(s.to_string())
    }
}

/// The header as expected by the validation: lowercase names without accents.
pub fn normalize_header<'a, I: Iterator<Item = &'a str>>(names: I) -> Vec<String> {
    names.map(slugify).collect()
}
