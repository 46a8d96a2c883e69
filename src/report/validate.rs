// src/report/validate.rs

use std::fmt;

use crate::process::Record;

pub const TOTAL_QUINTIL: &str = "Total";
pub const DISTRIBUTION_DESCRIPCION: &str = "Distribución (porcentajes verticales)";
pub const GENERAL_INDEX_DATO: &str = "Índice general";

/// Allowed distance from 100 for a sum of parsed percentages.
pub const TOLERANCE: f64 = 1e-6;

/// Outcome of summing the vertical-percentage rows of one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionCheck {
    pub year: i32,
    /// Rows selected by the filter, null values included.
    pub rows: usize,
    pub sum: f64,
    /// `sum == 100.0` bit for bit.
    pub exact: bool,
    /// `|sum - 100| < TOLERANCE`.
    pub matches: bool,
}

fn in_distribution(r: &Record, year: i32) -> bool {
    r.anyo == year
        && r.quintil.as_deref() == Some(TOTAL_QUINTIL)
        && r.descripcion == DISTRIBUTION_DESCRIPCION
        && r.dato != GENERAL_INDEX_DATO
}

/// Sum `valor` over the `Total`-quintile distribution rows of `year`, excluding
/// the general index. Null values are skipped.
pub fn check_distribution(records: &[Record], year: i32) -> DistributionCheck {
    let selected: Vec<&Record> = records.iter().filter(|r| in_distribution(r, year)).collect();
    let sum: f64 = selected.iter().filter_map(|r| r.valor).sum();

    DistributionCheck {
        year,
        rows: selected.len(),
        sum,
        exact: sum == 100.0,
        matches: (sum - 100.0).abs() < TOLERANCE,
    }
}

impl fmt::Display for DistributionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} distribution rows sum to {}",
            self.year, self.rows, self.sum
        )?;
        match (self.matches, self.exact) {
            (true, true) => write!(f, " (matches 100%)"),
            (true, false) => write!(f, " (matches 100% within {:e})", TOLERANCE),
            _ => write!(f, " (does not match 100%)"),
        }
    }
}
