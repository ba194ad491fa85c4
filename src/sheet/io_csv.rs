// Primitives for reading CSV files.

use std::io::{BufRead, BufReader};

use sheet_validator::builder::TableBuilder;

use crate::sheet::{
    io_common::{normalize_header, read_cell},
    *,
};

pub fn read_csv_table(path: &Path) -> SheetResult<TabularInput> {
    let path_s = path.display().to_string();
    let delimiter = sniff_delimiter(path)?;
    debug!("read_csv_table: {:?} delimiter: {:?}", path, delimiter as char);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .context(CsvOpenSnafu {
            path: path_s.clone(),
        })?;
    let header = rdr
        .headers()
        .context(CsvOpenSnafu { path: path_s })?
        .clone();
    let field_names = normalize_header(header.iter());
    debug!("read_csv_table: header: {:?}", field_names);

    let mut builder = TableBuilder::new(&field_names);
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is the first line
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_table: lineno: {:?} row: {:?}", lineno, line);
        builder.add_row(line.iter().map(read_cell).collect());
    }
    Ok(builder.build())
}

/// Spreadsheets exported with a Brazilian locale use semicolons, since the
/// comma is the decimal separator.
fn sniff_delimiter(path: &Path) -> SheetResult<u8> {
    let file = fs::File::open(path).context(ReadingFileSnafu {
        path: path.display().to_string(),
    })?;
    let mut first_line = String::new();
    BufReader::new(file)
        .read_line(&mut first_line)
        .context(ReadingFileSnafu {
            path: path.display().to_string(),
        })?;
    if first_line.contains(';') && !first_line.contains(',') {
        Ok(b';')
    } else {
        Ok(b',')
    }
}
