// src/data_input/table_parser.rs

use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::data_input::table_data::{Column, Table};
use crate::measurement::{parse_level_spec, MeasurementLevel};

/// Parses the CSV data file into a `Table` and tags each column with its
/// measurement level from the level specification string.
///
/// The level specification carries one token per column ("int int nom ord");
/// a missing specification tags every column as unknown.
pub fn parse_table_file(
    input_file_path: &Path,
    level_spec: Option<&str>,
) -> Result<Table, Box<dyn Error>> {
    let file = File::open(input_file_path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let header_record = reader.headers()?.clone();
    let names: Vec<String> = header_record.iter().map(|h| h.trim().to_string()).collect();
    if names.is_empty() {
        return Err("No columns found in the CSV header".into());
    }
    println!("Headers found in CSV: {:?}", names);

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    let mut row_count = 0usize;

    for (row_index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                for (col_index, column_cells) in cells.iter_mut().enumerate() {
                    let value = record.get(col_index).map(str::trim).unwrap_or("");
                    column_cells.push(if value.is_empty() {
                        None
                    } else {
                        Some(value.to_string())
                    });
                }
                row_count += 1;
            }
            Err(e) => {
                eprintln!(
                    "Warning: Skipping row {} due to CSV read error: {}",
                    row_index + 1,
                    e
                );
            }
        }
    }

    let levels = match level_spec {
        Some(spec) => {
            let parsed = parse_level_spec(spec)?;
            if parsed.len() != names.len() {
                return Err(format!(
                    "Level specification has {} tokens but the data has {} columns",
                    parsed.len(),
                    names.len()
                )
                .into());
            }
            parsed
        }
        None => vec![MeasurementLevel::Unknown; names.len()],
    };

    let columns: Vec<Column> = names
        .into_iter()
        .zip(levels)
        .zip(cells)
        .map(|((name, level), raw)| Column::new(name, level, raw))
        .collect();

    println!("Finished reading {} data rows.", row_count);
    Ok(Table { columns, row_count })
}

/// Parse a table from in-memory CSV text; the file-based loader delegates the
/// same column construction. Used by the regression tests.
pub fn parse_table_str(csv_text: &str, level_spec: &str) -> Result<Table, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());
    let names: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    let mut row_count = 0usize;
    for result in reader.records() {
        let record = result?;
        for (col_index, column_cells) in cells.iter_mut().enumerate() {
            let value = record.get(col_index).map(str::trim).unwrap_or("");
            column_cells.push(if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            });
        }
        row_count += 1;
    }

    let levels = parse_level_spec(level_spec)?;
    if levels.len() != names.len() {
        return Err(format!(
            "Level specification has {} tokens but the data has {} columns",
            levels.len(),
            names.len()
        )
        .into());
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(levels)
        .zip(cells)
        .map(|((name, level), raw)| Column::new(name, level, raw))
        .collect();
    Ok(Table { columns, row_count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_str() {
        let table = parse_table_str("a,b,g\n1,4.5,x\n2,,y\n3,6.5,x\n", "int int nom").unwrap();
        assert_eq!(table.row_count, 3);
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.numeric_values("a").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(table.column("b").unwrap().n_missing(), 1);
        assert_eq!(table.level("g").unwrap(), MeasurementLevel::Nominal);
    }

    #[test]
    fn test_level_arity_mismatch() {
        assert!(parse_table_str("a,b\n1,2\n", "int").is_err());
    }
}

// src/data_input/table_parser.rs
