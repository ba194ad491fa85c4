use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use sheet_validator::builder::TableBuilder;

use crate::sheet::{
    io_common::{normalize_header, read_cell},
    *,
};

pub fn read_xlsx_table(path: &Path, worksheet_name: Option<&str>) -> SheetResult<TabularInput> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu {
        path: path.display().to_string(),
    })?;
    let header_names: Vec<String> = header.iter().map(header_name).collect();
    let field_names = normalize_header(header_names.iter().map(|s| s.as_str()));
    debug!("read_xlsx_table: header: {:?}", field_names);

    let mut builder = TableBuilder::new(&field_names);
    for (idx, row) in iter.enumerate() {
        debug!("read_xlsx_table: idx: {:?} row: {:?}", idx, row);
        builder.add_row(row.iter().map(read_calamine_cell).collect());
    }
    Ok(builder.build())
}

fn header_name(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        _ => "".to_string(),
    }
}

/// Excel stores all the numbers as floating point values. Whole numbers are
/// read back as integers, the others are decimals.
fn read_calamine_cell(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::Int(i) => CellValue::Int(*i),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => CellValue::Int(*f as i64),
        DataType::Float(f) => CellValue::Decimal(*f),
        DataType::String(s) => read_cell(s),
        // Booleans, dates and error cells (such as a broken formula) are kept as text.
        // They are rejected by the validation as any other non-numeric content.
        other => CellValue::Text(format!("{:?}", other)),
    }
}

fn get_range(path: &Path, worksheet_name: Option<&str>) -> SheetResult<Range<DataType>> {
    let path_s = path.display().to_string();
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        &path_s, &worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu {
        path: path_s.clone(),
    })?;

    let wrange = match worksheet_name {
        // A worksheet name was provided, use it.
        Some(name) => workbook.worksheet_range(name),
        None => workbook.worksheet_range_at(0),
    };
    wrange
        .context(EmptyExcelSnafu {
            path: path_s.clone(),
        })?
        .context(OpeningExcelSnafu { path: path_s })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calamine_cells() {
        assert_eq!(read_calamine_cell(&DataType::Float(12.0)), CellValue::Int(12));
        assert_eq!(read_calamine_cell(&DataType::Float(1.25)), CellValue::Decimal(1.25));
        assert_eq!(
            read_calamine_cell(&DataType::String(" 7 ".to_string())),
            CellValue::Int(7)
        );
        assert_eq!(read_calamine_cell(&DataType::Empty), CellValue::Empty);
        assert!(matches!(
            read_calamine_cell(&DataType::Bool(true)),
            CellValue::Text(_)
        ));
    }

    #[test]
    fn header_names() {
        let header = vec![
            DataType::String("Município".to_string()),
            DataType::String("Confirmados".to_string()),
            DataType::Empty,
        ];
        let names: Vec<String> = header.iter().map(header_name).collect();
        assert_eq!(
            normalize_header(names.iter().map(|s| s.as_str())),
            vec!["municipio", "confirmados", ""]
        );
    }

    #[test]
    fn missing_workbook() {
        let res = read_xlsx_table(Path::new("does/not/exist.xlsx"), None);
        assert!(matches!(res, Err(SheetError::OpeningExcel { .. })));
    }
}
