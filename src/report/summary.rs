// src/report/summary.rs

use std::collections::HashSet;
use std::fmt;

use crate::process::{Record, COLUMNS};
use crate::report::write::to_fields;

/// Records shown in the preview at the top of the summary.
pub const HEAD_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Int64,
    Float64,
    Bool,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnType::Text => "text",
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Bool => "bool",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub ty: ColumnType,
    pub non_null: usize,
}

/// Read-only overview of a derived table: a preview of the first records,
/// shape, per-column types and null counts, and the distinct values of each
/// categorical column.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// First [`HEAD_ROWS`] records, in table order.
    pub head: Vec<Record>,
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    /// Categorical column name → distinct values in first-appearance order.
    pub distinct: Vec<(&'static str, Vec<Option<String>>)>,
}

/// Distinct values in first-appearance order; `None` counts as a value.
fn distinct_values<'a, I>(values: I) -> Vec<Option<String>>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for v in values {
        if seen.insert(v) {
            out.push(v.map(str::to_string));
        }
    }
    out
}

impl Summary {
    pub fn from_records(records: &[Record]) -> Self {
        let rows = records.len();
        let quintil_non_null = records.iter().filter(|r| r.quintil.is_some()).count();
        let valor_non_null = records.iter().filter(|r| r.valor.is_some()).count();

        let types = [
            (ColumnType::Text, rows),
            (ColumnType::Text, rows),
            (ColumnType::Text, rows),
            (ColumnType::Text, rows),
            (ColumnType::Text, quintil_non_null),
            (ColumnType::Int64, rows),
            (ColumnType::Float64, valor_non_null),
            (ColumnType::Bool, rows),
        ];
        let columns = COLUMNS
            .iter()
            .zip(types)
            .map(|(&name, (ty, non_null))| ColumnInfo { name, ty, non_null })
            .collect();

        let distinct = vec![
            (
                "indice",
                distinct_values(records.iter().map(|r| Some(r.indice.as_str()))),
            ),
            (
                "dato",
                distinct_values(records.iter().map(|r| Some(r.dato.as_str()))),
            ),
            (
                "tipo_dato",
                distinct_values(records.iter().map(|r| Some(r.tipo_dato.as_str()))),
            ),
            (
                "descripcion",
                distinct_values(records.iter().map(|r| Some(r.descripcion.as_str()))),
            ),
            (
                "quintil",
                distinct_values(records.iter().map(|r| r.quintil.as_deref())),
            ),
        ];

        Summary {
            head: records.iter().take(HEAD_ROWS).cloned().collect(),
            rows,
            columns,
            distinct,
        }
    }

    pub fn distinct_for(&self, column: &str) -> Option<&[Option<String>]> {
        self.distinct
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, values)| values.as_slice())
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", COLUMNS.join(" | "))?;
        for r in &self.head {
            writeln!(f, "{}", to_fields(r).join(" | "))?;
        }
        if self.rows > self.head.len() {
            writeln!(f, "... {} more", self.rows - self.head.len())?;
        }
        writeln!(f, "rows: {}, columns: {}", self.rows, self.columns.len())?;
        writeln!(f, " #  {:<12} {:>9}  type", "column", "non-null")?;
        for (i, c) in self.columns.iter().enumerate() {
            writeln!(f, "{:>2}  {:<12} {:>9}  {}", i, c.name, c.non_null, c.ty)?;
        }
        for (name, values) in &self.distinct {
            let rendered: Vec<&str> = values
                .iter()
                .map(|v| v.as_deref().unwrap_or("<null>"))
                .collect();
            writeln!(
                f,
                "distinct {} ({}): {:?}",
                name,
                values.len(),
                rendered
            )?;
        }
        Ok(())
    }
}
