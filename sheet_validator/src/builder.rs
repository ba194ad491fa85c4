pub use crate::config::*;

/// A builder for assembling a table row by row.
///
/// The tabular readers use it, and it is also the simplest way to feed a
/// table by hand.
///
/// ```
/// use sheet_validator::builder::TableBuilder;
/// use sheet_validator::CellValue;
///
/// let mut builder = TableBuilder::new(&["municipio", "confirmados", "obitos"]);
/// builder.add_row(vec!["TOTAL NO ESTADO".into(), 10.into(), 2.into()]);
/// builder.add_row(vec!["Curitiba".into(), 10.into(), CellValue::Empty]);
///
/// let table = builder.build();
/// assert_eq!(table.rows.len(), 2);
/// assert!(table.is_integer_column("confirmados"));
/// ```
pub struct TableBuilder {
    pub(crate) _field_names: Vec<String>,
    pub(crate) _rows: Vec<Row>,
}

impl TableBuilder {
    pub fn new<S: AsRef<str>>(field_names: &[S]) -> TableBuilder {
        TableBuilder {
            _field_names: field_names.iter().map(|s| s.as_ref().to_string()).collect(),
            _rows: Vec::new(),
        }
    }

    /// Adds a row, with the cells in the same order as the field names.
    ///
    /// Missing trailing cells are empty. Extra cells are dropped.
    pub fn add_row(&mut self, cells: Vec<CellValue>) {
        let mut row = Row::new();
        let mut cells_iter = cells.into_iter();
        for name in self._field_names.iter() {
            let cell = cells_iter.next().unwrap_or(CellValue::Empty);
            row.insert(name.clone(), cell);
        }
        self._rows.push(row);
    }

    pub fn build(self) -> TabularInput {
        TabularInput {
            field_names: self._field_names,
            rows: self._rows,
        }
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Decimal(f)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}
