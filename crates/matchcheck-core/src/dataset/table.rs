use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use super::cell::{is_int_literal, is_null, parse_bool, parse_float, parse_int};
use super::DatasetError;

/// Storage type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Every cell is a non-null integer literal.
    Int64,
    /// Every cell is numeric or null, and the column is not all integers.
    Float64,
    /// Every cell is a boolean literal.
    Bool,
    /// Anything else, including columns with no rows.
    Object,
}

impl ColumnType {
    pub fn is_integer(self) -> bool {
        self == ColumnType::Int64
    }

    fn infer(cells: &[String]) -> Self {
        if cells.is_empty() {
            return ColumnType::Object;
        }
        if cells.iter().all(|c| is_int_literal(c)) {
            return ColumnType::Int64;
        }
        if cells.iter().all(|c| is_null(c) || parse_float(c).is_some()) {
            return ColumnType::Float64;
        }
        if cells.iter().all(|c| parse_bool(c).is_some()) {
            return ColumnType::Bool;
        }
        ColumnType::Object
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Bool => "bool",
            ColumnType::Object => "object",
        };
        f.write_str(s)
    }
}

/// One named column of raw cells.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    cells: Vec<String>,
    dtype: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<String>) -> Self {
        let dtype = ColumnType::infer(&cells);
        Self {
            name: name.into(),
            cells,
            dtype,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> ColumnType {
        self.dtype
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw cell text.
    pub fn raw(&self, row: usize) -> &str {
        &self.cells[row]
    }

    pub fn is_null(&self, row: usize) -> bool {
        is_null(&self.cells[row])
    }

    pub fn int(&self, row: usize) -> Option<i64> {
        parse_int(&self.cells[row])
    }

    pub fn float(&self, row: usize) -> Option<f64> {
        parse_float(&self.cells[row])
    }
}

/// Column-major table with the header order preserved.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    rows: usize,
}

impl Table {
    /// Build from columns of equal length. Panics if lengths differ.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        assert!(
            columns.iter().all(|c| c.len() == rows),
            "columns must have equal length"
        );
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self {
            columns,
            index,
            rows,
        }
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path).map_err(|e| DatasetError::Csv {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        Self::from_reader(file).map_err(|e| match e {
            DatasetError::Csv { source, .. } => DatasetError::Csv {
                path: path.to_path_buf(),
                source,
            },
            DatasetError::Ragged {
                line,
                expected,
                found,
                ..
            } => DatasetError::Ragged {
                path: path.to_path_buf(),
                line,
                expected,
                found,
            },
            other => other,
        })
    }

    /// Read CSV with a header row. Short rows are padded with empty cells;
    /// rows with more fields than the header are rejected.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let csv_err = |source| DatasetError::Csv {
            path: Default::default(),
            source,
        };
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let names = dedupe_names(rdr.headers().map_err(csv_err)?.iter());
        let width = names.len();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); width];

        for record in rdr.records() {
            let record = record.map_err(csv_err)?;
            if record.len() > width {
                return Err(DatasetError::Ragged {
                    path: Default::default(),
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    expected: width,
                    found: record.len(),
                });
            }
            for (i, col) in cells.iter_mut().enumerate() {
                col.push(record.get(i).unwrap_or("").to_string());
            }
        }

        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::new(name, cells))
            .collect();
        Ok(Self::from_columns(columns))
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }
}

/// Repeated header names get `.1`, `.2`, ... suffixes so every column stays addressable.
fn dedupe_names<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::new();
    for name in raw {
        let n = seen.entry(name.to_string()).or_insert(0);
        if *n == 0 {
            out.push(name.to_string());
        } else {
            out.push(format!("{name}.{n}"));
        }
        *n += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> Table {
        Table::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn infers_column_types() {
        let t = table("id,score,ratio,flag,name\n1,2,0.5,True,A\n2,,1,False,B\n");
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.column("id").unwrap().dtype(), ColumnType::Int64);
        assert_eq!(t.column("score").unwrap().dtype(), ColumnType::Float64);
        assert_eq!(t.column("ratio").unwrap().dtype(), ColumnType::Float64);
        assert_eq!(t.column("flag").unwrap().dtype(), ColumnType::Bool);
        assert_eq!(t.column("name").unwrap().dtype(), ColumnType::Object);
    }

    #[test]
    fn header_only_columns_are_object() {
        let t = table("id,name\n");
        assert_eq!(t.row_count(), 0);
        assert_eq!(t.column("id").unwrap().dtype(), ColumnType::Object);
    }

    #[test]
    fn short_rows_are_padded() {
        let t = table("a,b,c\n1,2\n");
        let c = t.column("c").unwrap();
        assert!(c.is_null(0));
        assert_eq!(c.dtype(), ColumnType::Float64);
    }

    #[test]
    fn duplicate_headers_are_suffixed() {
        let t = table("a,a,b,a\n1,2,3,4\n");
        let names: Vec<&str> = t.column_names().collect();
        assert_eq!(names, vec!["a", "a.1", "b", "a.2"]);
        assert_eq!(t.column("a.1").unwrap().int(0), Some(2));
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let t = table("home_team,stage\n\"Brighton & Hove Albion, FC\",REGULAR_SEASON\n");
        assert_eq!(
            t.column("home_team").unwrap().raw(0),
            "Brighton & Hove Albion, FC"
        );
    }

    #[test]
    fn column_type_display() {
        assert_eq!(ColumnType::Int64.to_string(), "int64");
        assert_eq!(ColumnType::Float64.to_string(), "float64");
        assert_eq!(ColumnType::Object.to_string(), "object");
    }
}
