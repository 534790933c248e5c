// src/data_input/table_data.rs

use crate::measurement::MeasurementLevel;
use std::error::Error;

/// One named variable of the loaded table.
/// Cells are kept as raw text with `None` for missing values; a numeric view
/// is cached when every present cell parses as `f64`.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub level: MeasurementLevel,
    pub raw: Vec<Option<String>>,
    pub numeric: Option<Vec<Option<f64>>>,
}

impl Column {
    pub fn new(name: String, level: MeasurementLevel, raw: Vec<Option<String>>) -> Self {
        let parsed: Vec<Option<f64>> = raw
            .iter()
            .map(|cell| cell.as_ref().and_then(|s| s.parse::<f64>().ok()))
            .collect();
        // Numeric only if no present cell failed to parse.
        let all_numeric = raw
            .iter()
            .zip(parsed.iter())
            .all(|(cell, num)| cell.is_none() || num.is_some());
        Column {
            name,
            level,
            numeric: if all_numeric { Some(parsed) } else { None },
            raw,
        }
    }

    pub fn n_valid(&self) -> usize {
        self.raw.iter().filter(|c| c.is_some()).count()
    }

    pub fn n_missing(&self) -> usize {
        self.raw.len() - self.n_valid()
    }
}

/// Rectangular table of named variables, each tagged with a measurement
/// level. Levels are mutable at runtime and drive the analysis dispatch.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<Column>,
    pub row_count: usize,
}

impl Table {
    pub fn column(&self, name: &str) -> Result<&Column, Box<dyn Error>> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| format!("Variable '{}' not found in the data", name).into())
    }

    pub fn level(&self, name: &str) -> Result<MeasurementLevel, Box<dyn Error>> {
        Ok(self.column(name)?.level)
    }

    /// Reclassify a variable at runtime; analyses re-dispatch accordingly.
    pub fn set_level(&mut self, name: &str, level: MeasurementLevel) -> Result<(), Box<dyn Error>> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| format!("Variable '{}' not found in the data", name))?;
        column.level = level;
        Ok(())
    }

    /// Non-missing numeric values of one variable, in row order.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>, Box<dyn Error>> {
        let column = self.column(name)?;
        let numeric = column
            .numeric
            .as_ref()
            .ok_or_else(|| format!("Variable '{}' contains non-numeric values", name))?;
        Ok(numeric.iter().filter_map(|v| *v).collect())
    }

    /// Row-wise complete cases over the given variables: rows where every
    /// listed variable is present and numeric. Returns one value vector per
    /// variable plus the number of dropped rows.
    pub fn complete_numeric_cases(
        &self,
        names: &[&str],
    ) -> Result<(Vec<Vec<f64>>, usize), Box<dyn Error>> {
        let mut numeric_columns = Vec::with_capacity(names.len());
        for name in names {
            let column = self.column(name)?;
            let numeric = column
                .numeric
                .as_ref()
                .ok_or_else(|| format!("Variable '{}' contains non-numeric values", name))?;
            numeric_columns.push(numeric);
        }
        let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
        let mut dropped = 0usize;
        for row in 0..self.row_count {
            if numeric_columns.iter().all(|col| col[row].is_some()) {
                for (var_index, col) in numeric_columns.iter().enumerate() {
                    values[var_index].push(col[row].unwrap_or_default());
                }
            } else {
                dropped += 1;
            }
        }
        Ok((values, dropped))
    }

    /// Row-wise complete cases over the given variables, returning the raw
    /// labels. Used by the nominal branches (crosstabs, mosaic plots).
    pub fn complete_label_cases(
        &self,
        names: &[&str],
    ) -> Result<(Vec<Vec<String>>, usize), Box<dyn Error>> {
        let mut raw_columns = Vec::with_capacity(names.len());
        for name in names {
            raw_columns.push(&self.column(name)?.raw);
        }
        let mut values: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        let mut dropped = 0usize;
        for row in 0..self.row_count {
            if raw_columns.iter().all(|col| col[row].is_some()) {
                for (var_index, col) in raw_columns.iter().enumerate() {
                    values[var_index].push(col[row].clone().unwrap_or_default());
                }
            } else {
                dropped += 1;
            }
        }
        Ok((values, dropped))
    }

    /// Sorted distinct labels of one variable (missing cells skipped).
    pub fn category_levels(&self, name: &str) -> Result<Vec<String>, Box<dyn Error>> {
        let column = self.column(name)?;
        let mut levels: Vec<String> = Vec::new();
        for cell in column.raw.iter().flatten() {
            if !levels.iter().any(|l| l == cell) {
                levels.push(cell.clone());
            }
        }
        // Numeric group codes sort numerically, everything else lexically.
        levels.sort_by(|a, b| match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
            _ => a.cmp(b),
        });
        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| {
                if v.is_empty() {
                    None
                } else {
                    Some(v.to_string())
                }
            })
            .collect()
    }

    #[test]
    fn test_numeric_detection() {
        let numeric = Column::new(
            "a".into(),
            MeasurementLevel::Interval,
            cells(&["1.5", "", "2"]),
        );
        assert!(numeric.numeric.is_some());
        assert_eq!(numeric.n_valid(), 2);
        assert_eq!(numeric.n_missing(), 1);

        let text = Column::new(
            "g".into(),
            MeasurementLevel::Nominal,
            cells(&["ctrl", "exp"]),
        );
        assert!(text.numeric.is_none());
    }

    #[test]
    fn test_complete_cases_drop_rows() {
        let table = Table {
            columns: vec![
                Column::new(
                    "a".into(),
                    MeasurementLevel::Interval,
                    cells(&["1", "2", ""]),
                ),
                Column::new(
                    "b".into(),
                    MeasurementLevel::Interval,
                    cells(&["4", "", "6"]),
                ),
            ],
            row_count: 3,
        };
        let (values, dropped) = table.complete_numeric_cases(&["a", "b"]).unwrap();
        assert_eq!(values[0], vec![1.0]);
        assert_eq!(values[1], vec![4.0]);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn test_category_levels_numeric_order() {
        let table = Table {
            columns: vec![Column::new(
                "g".into(),
                MeasurementLevel::Nominal,
                cells(&["10", "2", "10", "1"]),
            )],
            row_count: 4,
        };
        assert_eq!(table.category_levels("g").unwrap(), vec!["1", "2", "10"]);
    }
}

// src/data_input/table_data.rs
