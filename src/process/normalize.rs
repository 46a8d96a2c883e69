// src/process/normalize.rs

use tracing::debug;

use crate::error::SchemaError;
use crate::fetch::RawTable;

/// Literal prefix carried by every label of the 2006-base annual series.
pub const LABEL_PREFIX: &str = "Base 2006. Anual.";

/// One data point flattened out of its table, before the label is split.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub nombre: String,
    pub anyo: i32,
    pub valor: Option<f64>,
    pub secreto: bool,
}

/// Remove every occurrence of [`LABEL_PREFIX`], then trim surrounding whitespace.
pub fn clean_label(raw: &str) -> String {
    raw.replace(LABEL_PREFIX, "").trim().to_string()
}

/// Flatten tables into rows: one row per data point, in table order then point order.
pub fn normalize(tables: &[RawTable]) -> Result<Vec<FlatRow>, SchemaError> {
    let capacity = tables
        .iter()
        .map(|t| t.data.as_ref().map_or(0, Vec::len))
        .sum();
    let mut rows = Vec::with_capacity(capacity);

    for (i, table) in tables.iter().enumerate() {
        let nombre = table.nombre.as_deref().ok_or(SchemaError {
            table: i,
            field: "Nombre",
        })?;
        let data = table.data.as_ref().ok_or(SchemaError {
            table: i,
            field: "Data",
        })?;

        let nombre = clean_label(nombre);
        rows.extend(data.iter().map(|p| FlatRow {
            nombre: nombre.clone(),
            anyo: p.anyo,
            valor: p.valor,
            secreto: p.secreto,
        }));
    }

    debug!(tables = tables.len(), rows = rows.len(), "normalized");
    Ok(rows)
}
