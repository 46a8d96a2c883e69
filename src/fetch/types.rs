// src/fetch/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

/// One element of the `DATOS_TABLA` response array.
///
/// Both fields are optional at the decoding level so that a payload missing
/// either one surfaces as a `SchemaError` from the normalizer, naming the table.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct RawTable {
    /// Composite, dot-separated label, e.g. `"Base 2006. Anual. Índice general. ..."`.
    #[serde(rename = "Nombre", default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<RawDataPoint>>,
}

/// A single yearly observation inside a table's `Data` array.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
pub struct RawDataPoint {
    #[serde(rename = "Anyo")]
    pub anyo: i32,
    #[serde(rename = "Valor", default)]
    pub valor: Option<f64>,
    #[serde(rename = "Secreto", default, deserialize_with = "null_as_false")]
    pub secreto: bool,
}

/// `"Secreto": null` reads the same as a missing key.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Tables decoded from one GET, with where and when they came from.
#[derive(Debug, Clone)]
pub struct FetchedTables {
    pub source_url: Url,
    pub fetched_at: DateTime<Utc>,
    pub tables: Vec<RawTable>,
}

impl FetchedTables {
    pub fn point_count(&self) -> usize {
        self.tables
            .iter()
            .map(|t| t.data.as_ref().map_or(0, Vec::len))
            .sum()
    }
}
