//! CSV ingest for the processed daily sales table.
//!
//! Turns the upstream CSV into a `SalesTable`:
//! - one designated column is parsed into dates and becomes the index
//! - every other column is a measure, typed by inference (int, float, text)
//! - rows keep file order; nothing is sorted, deduplicated or dropped
//!
//! The first record that cannot be interpreted fails the whole load. There is
//! no row-level skipping: a preview of a partially parsed table would be
//! misleading.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::{debug, warn};

use crate::config::PreviewConfig;
use crate::domain::{Column, ColumnValues, SalesTable};
use crate::error::LoadError;

/// Cell contents treated as a missing value in measure columns.
const MISSING_MARKERS: [&str; 6] = ["NA", "N/A", "NaN", "nan", "null", "NULL"];

const DATETIME_FMTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Load the table at `config.data_path`, indexed by `config.index_column`.
///
/// Returns `LoadError::Missing` when the path does not exist. The file handle
/// lives only for the duration of the parse.
pub fn load_sales_table(config: &PreviewConfig) -> Result<SalesTable, LoadError> {
    let path = config.data_path.as_path();
    if !path.exists() {
        return Err(LoadError::Missing {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| LoadError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    debug!(path = %path.display(), index = %config.index_column, "reading sales table");
    let table = read_sales_table(file, path, &config.index_column)?;

    let shape = table.shape();
    debug!(rows = shape.rows, columns = shape.columns, "sales table loaded");
    if !table.index_is_strictly_increasing() {
        warn!(
            path = %path.display(),
            index = %table.index_name,
            "index is not strictly increasing; rows are kept in file order"
        );
    }

    Ok(table)
}

/// Parse CSV from `reader` into a `SalesTable`.
///
/// `path` is only used to label errors.
pub fn read_sales_table<R: Read>(reader: R, path: &Path, index_column: &str) -> Result<SalesTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .enumerate()
        .map(|(pos, name)| header_name(pos, name))
        .collect::<Vec<_>>();

    if headers.is_empty() {
        return Err(LoadError::data_format(path, None, "No columns found; the file is empty."));
    }
    ensure_unique_headers(path, &headers)?;

    let index_pos = headers
        .iter()
        .position(|h| h == index_column)
        .ok_or_else(|| {
            LoadError::data_format(
                path,
                None,
                format!("Missing index column `{index_column}` (found: {}).", headers.join(", ")),
            )
        })?;

    let measure_pos: Vec<usize> = (0..headers.len()).filter(|&i| i != index_pos).collect();

    let mut index = Vec::new();
    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); measure_pos.len()];

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(path, e))?;
        // Header is line 1; fall back to that assumption if the reader has no position.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        if record.len() > headers.len() {
            return Err(LoadError::data_format(
                path,
                Some(line),
                format!("Expected {} fields, found {}.", headers.len(), record.len()),
            ));
        }

        index.push(parse_index_cell(&record, index_pos, index_column).map_err(|e| {
            LoadError::data_format(path, Some(line), e)
        })?);

        for (slot, &pos) in measure_pos.iter().enumerate() {
            raw[slot].push(get_cell(&record, pos).map(str::to_string));
        }
    }

    let columns = measure_pos
        .iter()
        .zip(raw)
        .map(|(&pos, cells)| Column {
            name: headers[pos].clone(),
            values: infer_column(cells),
        })
        .collect();

    Ok(SalesTable {
        index_name: headers[index_pos].clone(),
        index,
        columns,
    })
}

/// Blank headers are named by position (`Unnamed: 2`).
fn header_name(pos: usize, raw: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = raw.trim().trim_start_matches('\u{feff}').trim();
    if name.is_empty() {
        format!("Unnamed: {pos}")
    } else {
        name.to_string()
    }
}

fn ensure_unique_headers(path: &Path, headers: &[String]) -> Result<(), LoadError> {
    let mut seen = HashSet::new();
    for h in headers {
        if !seen.insert(h.as_str()) {
            return Err(LoadError::data_format(path, None, format!("Duplicate column name `{h}`.")));
        }
    }
    Ok(())
}

fn csv_error(path: &Path, err: csv::Error) -> LoadError {
    if err.is_io_error() {
        return LoadError::Unreadable {
            path: path.to_path_buf(),
            message: err.to_string(),
        };
    }
    let line = err.position().map(|p| p.line() as usize);
    LoadError::data_format(path, line, format!("Malformed CSV: {err}"))
}

fn get_cell(record: &StringRecord, pos: usize) -> Option<&str> {
    record
        .get(pos)
        .map(str::trim)
        .filter(|s| !s.is_empty() && !MISSING_MARKERS.contains(s))
}

fn parse_index_cell(record: &StringRecord, pos: usize, name: &str) -> Result<NaiveDateTime, String> {
    let raw = record
        .get(pos)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing value in index column `{name}`."))?;
    parse_timestamp(raw).ok_or_else(|| {
        format!(
            "Invalid date '{raw}' in index column `{name}`. \
             Expected one of: YYYY-MM-DD, YYYY/MM/DD, DD/MM/YYYY, DD-MM-YYYY, YYYY-MM-DD HH:MM[:SS]."
        )
    })
}

/// Parse a date or date-time; plain dates become midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FMTS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

fn infer_column(cells: Vec<Option<String>>) -> ColumnValues {
    let mut present = cells.iter().flatten().peekable();
    if present.peek().is_none() {
        return ColumnValues::Float(vec![None; cells.len()]);
    }

    if cells.iter().flatten().all(|s| s.parse::<i64>().is_ok()) {
        return ColumnValues::Int(
            cells
                .iter()
                .map(|c| c.as_deref().and_then(|s| s.parse().ok()))
                .collect(),
        );
    }

    if cells.iter().flatten().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnValues::Float(
            cells
                .iter()
                .map(|c| c.as_deref().and_then(|s| s.parse().ok()))
                .collect(),
        );
    }

    ColumnValues::Text(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn read(csv: &str) -> Result<SalesTable, LoadError> {
        read_sales_table(csv.as_bytes(), Path::new("sales_daily.csv"), "order_date")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn expect_data_format(result: Result<SalesTable, LoadError>) -> (Option<usize>, String) {
        match result {
            Err(LoadError::DataFormat { line, message, .. }) => (line, message),
            other => panic!("expected DataFormat, got {other:?}"),
        }
    }

    #[test]
    fn three_day_units_table() {
        let table = read("order_date,units\n2023-01-01,10\n2023-01-02,12\n2023-01-03,9\n").unwrap();

        assert_eq!(table.index_name, "order_date");
        assert_eq!(table.index, vec![date(2023, 1, 1), date(2023, 1, 2), date(2023, 1, 3)]);
        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.columns[0].name, "units");
        assert_eq!(
            table.columns[0].values,
            ColumnValues::Int(vec![Some(10), Some(12), Some(9)])
        );
        assert_eq!(table.shape().to_string(), "(3, 1)");
    }

    #[test]
    fn index_column_need_not_be_first() {
        let table = read("units,order_date,revenue\n10,2023-01-01,99.5\n").unwrap();
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["units", "revenue"]);
        assert_eq!(table.columns[1].values, ColumnValues::Float(vec![Some(99.5)]));
    }

    #[test]
    fn non_date_index_value_is_a_format_error() {
        let (line, message) = expect_data_format(read("order_date,units\n2023-01-01,10\nnot-a-date,12\n"));
        assert_eq!(line, Some(3));
        assert!(message.contains("not-a-date"), "{message}");
    }

    #[test]
    fn empty_index_value_is_a_format_error() {
        let (line, message) = expect_data_format(read("order_date,units\n,10\n"));
        assert_eq!(line, Some(2));
        assert!(message.contains("Missing value"), "{message}");
    }

    #[test]
    fn missing_index_column_is_a_format_error() {
        let (line, message) = expect_data_format(read("date,units\n2023-01-01,10\n"));
        assert_eq!(line, None);
        assert!(message.contains("`order_date`"), "{message}");
    }

    #[test]
    fn empty_file_is_a_format_error() {
        let (_, message) = expect_data_format(read(""));
        assert!(message.contains("empty"), "{message}");
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let (_, message) = expect_data_format(read("order_date,units,units\n2023-01-01,1,2\n"));
        assert!(message.contains("Duplicate"), "{message}");
    }

    #[test]
    fn extra_fields_are_rejected_short_rows_are_padded() {
        let (line, _) = expect_data_format(read("order_date,units\n2023-01-01,10,11\n"));
        assert_eq!(line, Some(2));

        let table = read("order_date,units,revenue\n2023-01-01,10\n2023-01-02,11,5.5\n").unwrap();
        assert_eq!(table.columns[1].values, ColumnValues::Float(vec![None, Some(5.5)]));
    }

    #[test]
    fn header_only_file_has_zero_rows() {
        let table = read("order_date,units,revenue\n").unwrap();
        assert_eq!(table.shape().rows, 0);
        assert_eq!(table.shape().columns, 2);
    }

    #[test]
    fn index_only_file_has_zero_columns() {
        let table = read("order_date\n2023-01-01\n2023-01-02\n").unwrap();
        assert_eq!(table.shape().rows, 2);
        assert_eq!(table.shape().columns, 0);
    }

    #[test]
    fn column_types_are_inferred() {
        let table = read(
            "order_date,units,revenue,region,empty\n\
             2023-01-01,10,1.5,north,\n\
             2023-01-02,NA,2,south,NaN\n",
        )
        .unwrap();

        assert_eq!(table.columns[0].values, ColumnValues::Int(vec![Some(10), None]));
        assert_eq!(table.columns[1].values, ColumnValues::Float(vec![Some(1.5), Some(2.0)]));
        assert_eq!(
            table.columns[2].values,
            ColumnValues::Text(vec![Some("north".to_string()), Some("south".to_string())])
        );
        assert_eq!(table.columns[3].values, ColumnValues::Float(vec![None, None]));
    }

    #[test]
    fn bom_and_padding_in_headers_are_ignored() {
        let table = read("\u{feff}order_date , units\n2023-01-01, 10\n").unwrap();
        assert_eq!(table.index_name, "order_date");
        assert_eq!(table.columns[0].name, "units");
    }

    #[test]
    fn invalid_utf8_is_a_format_error() {
        let result = read_sales_table(
            &b"order_date,units\n2023-01-01,\xff\xfe\n"[..],
            Path::new("sales_daily.csv"),
            "order_date",
        );
        let (line, message) = expect_data_format(result);
        assert_eq!(line, Some(2));
        assert!(message.contains("Malformed CSV"), "{message}");
    }

    #[test]
    fn blank_headers_are_named_by_position() {
        let table = read("order_date,,units,\n2023-01-01,1,2,3\n").unwrap();
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Unnamed: 1", "units", "Unnamed: 3"]);
        assert_eq!(table.columns[0].values, ColumnValues::Int(vec![Some(1)]));
    }

    #[test]
    fn timestamp_formats() {
        assert_eq!(parse_timestamp("2023-01-02"), Some(date(2023, 1, 2)));
        assert_eq!(parse_timestamp("2023/01/02"), Some(date(2023, 1, 2)));
        assert_eq!(parse_timestamp("02/01/2023"), Some(date(2023, 1, 2)));
        assert_eq!(parse_timestamp("02-01-2023"), Some(date(2023, 1, 2)));
        assert_eq!(
            parse_timestamp("2023-01-02 13:45:00"),
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap().and_hms_opt(13, 45, 0)
        );
        assert_eq!(
            parse_timestamp("2023-01-02T13:45:10"),
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap().and_hms_opt(13, 45, 10)
        );
        assert_eq!(parse_timestamp("2023-02-30"), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn load_reports_missing_path() {
        let tmp = tempfile::tempdir().unwrap();
        let config = PreviewConfig {
            data_path: tmp.path().join("data/processed/sales_daily.csv"),
            ..PreviewConfig::default()
        };

        match load_sales_table(&config) {
            Err(LoadError::Missing { path }) => assert_eq!(path, config.data_path),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn load_reads_file_from_configured_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path: PathBuf = tmp.path().join("daily.csv");
        std::fs::write(&path, "day,units\n2023-01-01,10\n2023-01-02,12\n").unwrap();

        let config = PreviewConfig {
            data_path: path,
            index_column: "day".to_string(),
            ..PreviewConfig::default()
        };
        let table = load_sales_table(&config).unwrap();
        assert_eq!(table.shape().rows, 2);
        assert_eq!(table.index_name, "day");
    }

    #[test]
    fn load_directory_is_unreadable() {
        let tmp = tempfile::tempdir().unwrap();
        let config = PreviewConfig {
            data_path: tmp.path().to_path_buf(),
            ..PreviewConfig::default()
        };

        let err = load_sales_table(&config).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }), "{err:?}");
    }
}
