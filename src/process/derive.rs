// src/process/derive.rs

use tracing::{debug, warn};

use crate::error::{DeriveError, MalformedLabel};
use crate::process::normalize::FlatRow;

/// Final column order of the output table.
pub const COLUMNS: [&str; 8] = [
    "indice",
    "dato",
    "tipo_dato",
    "descripcion",
    "quintil",
    "anyo",
    "valor",
    "secreto",
];

/// Label segments. Aggregate rows carry four dimensions, quintile breakdowns five.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label<'a> {
    Aggregate {
        indice: &'a str,
        dato: &'a str,
        tipo_dato: &'a str,
        descripcion: &'a str,
    },
    Quintile {
        indice: &'a str,
        dato: &'a str,
        tipo_dato: &'a str,
        descripcion: &'a str,
        /// Everything after the fourth separator, dots included.
        quintil: &'a str,
    },
}

/// Split a cleaned label on `.` with at most four splits.
pub fn parse_label(label: &str) -> Result<Label<'_>, MalformedLabel> {
    let parts: Vec<&str> = label.splitn(5, '.').collect();
    match parts.as_slice() {
        &[indice, dato, tipo_dato, descripcion] => Ok(Label::Aggregate {
            indice,
            dato,
            tipo_dato,
            descripcion,
        }),
        &[indice, dato, tipo_dato, descripcion, quintil] => Ok(Label::Quintile {
            indice,
            dato,
            tipo_dato,
            descripcion,
            quintil,
        }),
        _ => Err(MalformedLabel {
            label: label.to_string(),
            segments: parts.len(),
        }),
    }
}

/// Strip surrounding whitespace and dots; nothing left means no quintile.
pub fn clean_quintil(raw: &str) -> Option<String> {
    let q = raw.trim().trim_matches('.').trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_string())
    }
}

/// A fully derived output row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub indice: String,
    pub dato: String,
    pub tipo_dato: String,
    pub descripcion: String,
    pub quintil: Option<String>,
    pub anyo: i32,
    pub valor: Option<f64>,
    pub secreto: bool,
}

impl Record {
    pub fn from_row(row: &FlatRow) -> Result<Self, MalformedLabel> {
        let (indice, dato, tipo_dato, descripcion, quintil) = match parse_label(&row.nombre)? {
            Label::Aggregate {
                indice,
                dato,
                tipo_dato,
                descripcion,
            } => (indice, dato, tipo_dato, descripcion, None),
            Label::Quintile {
                indice,
                dato,
                tipo_dato,
                descripcion,
                quintil,
            } => (indice, dato, tipo_dato, descripcion, clean_quintil(quintil)),
        };

        Ok(Record {
            indice: indice.trim().to_string(),
            dato: dato.trim().to_string(),
            tipo_dato: tipo_dato.trim().to_string(),
            descripcion: descripcion.trim().to_string(),
            quintil,
            anyo: row.anyo,
            valor: row.valor,
            secreto: row.secreto,
        })
    }
}

/// Split every row's label into the categorical columns.
///
/// Malformed labels do not stop the scan: all of them are collected (distinct,
/// first-seen order) and returned together so the caller sees the whole set.
pub fn derive(rows: &[FlatRow]) -> Result<Vec<Record>, DeriveError> {
    let mut records = Vec::with_capacity(rows.len());
    let mut malformed: Vec<String> = Vec::new();

    for row in rows {
        match Record::from_row(row) {
            Ok(rec) => records.push(rec),
            Err(e) => {
                if !malformed.contains(&e.label) {
                    warn!(label = %e.label, segments = e.segments, "malformed label");
                    malformed.push(e.label);
                }
            }
        }
    }

    if !malformed.is_empty() {
        return Err(DeriveError::MalformedLabels(malformed));
    }

    debug!(records = records.len(), "derived columns");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(nombre: &str) -> FlatRow {
        FlatRow {
            nombre: nombre.to_string(),
            anyo: 2022,
            valor: Some(100.0),
            secreto: false,
        }
    }

    #[test]
    fn four_segments_parse_as_aggregate() {
        assert_eq!(
            parse_label("A.B.C.D").unwrap(),
            Label::Aggregate {
                indice: "A",
                dato: "B",
                tipo_dato: "C",
                descripcion: "D"
            }
        );
    }

    #[test]
    fn fifth_segment_keeps_the_remainder() {
        match parse_label("A.B.C.D.E.F.").unwrap() {
            Label::Quintile { quintil, .. } => assert_eq!(quintil, "E.F."),
            other => panic!("expected quintile label, got {:?}", other),
        }
    }

    #[test]
    fn fewer_than_four_segments_is_malformed() {
        let err = parse_label("A.B.C").unwrap_err();
        assert_eq!(err.segments, 3);
        assert_eq!(parse_label("").unwrap_err().segments, 1);
    }

    #[test]
    fn quintil_cleaning() {
        assert_eq!(clean_quintil("Total."), Some("Total".to_string()));
        assert_eq!(clean_quintil(" Quintil 1 .."), Some("Quintil 1".to_string()));
        assert_eq!(clean_quintil("."), None);
        assert_eq!(clean_quintil(""), None);
        assert_eq!(clean_quintil(" . "), None);
    }

    #[test]
    fn scenario_prefixed_label_with_total() {
        let nombre = crate::process::normalize::clean_label("Base 2006. Anual.1.2.3.4.Total.");
        let rec = Record::from_row(&row(&nombre)).unwrap();
        assert_eq!(
            rec,
            Record {
                indice: "1".into(),
                dato: "2".into(),
                tipo_dato: "3".into(),
                descripcion: "4".into(),
                quintil: Some("Total".into()),
                anyo: 2022,
                valor: Some(100.0),
                secreto: false,
            }
        );
    }

    #[test]
    fn four_segment_label_has_no_quintil() {
        let rec = Record::from_row(&row("A.B.C.D")).unwrap();
        assert_eq!(rec.quintil, None);
        assert_eq!(rec.descripcion, "D");
    }

    #[test]
    fn trailing_dot_on_four_segments_has_no_quintil() {
        let rec = Record::from_row(&row("A.B.C.D.")).unwrap();
        assert_eq!(rec.quintil, None);
    }

    #[test]
    fn segments_are_trimmed() {
        let rec = Record::from_row(&row(
            "Total Nacional. Índice general. Gasto medio por hogar. Distribución (porcentajes verticales). Total.",
        ))
        .unwrap();
        assert_eq!(rec.indice, "Total Nacional");
        assert_eq!(rec.dato, "Índice general");
        assert_eq!(rec.descripcion, "Distribución (porcentajes verticales)");
        assert_eq!(rec.quintil.as_deref(), Some("Total"));
    }

    #[test]
    fn derive_collects_distinct_malformed_labels() {
        let rows = vec![row("A.B"), row("A.B.C.D"), row("A.B"), row("X")];
        assert_eq!(
            derive(&rows).unwrap_err(),
            DeriveError::MalformedLabels(vec!["A.B".into(), "X".into()])
        );
    }

    #[test]
    fn derive_preserves_order_and_values() {
        let mut second = row("E.F.G.H.Quintil 2");
        second.valor = None;
        second.secreto = true;
        let recs = derive(&[row("A.B.C.D"), second]).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].indice, "A");
        assert_eq!(recs[1].quintil.as_deref(), Some("Quintil 2"));
        assert_eq!(recs[1].valor, None);
        assert!(recs[1].secreto);
    }
}
