use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{info, instrument};

use crate::error::WriteError;
use crate::process::{Record, COLUMNS};

/// `valor` as text: shortest round-trip form, integral values keep a `.0`, null is empty.
pub fn format_valor(valor: Option<f64>) -> String {
    match valor {
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => format!("{:.1}", v),
        Some(v) if v.is_finite() => format!("{}", v),
        _ => String::new(),
    }
}

pub fn format_secreto(secreto: bool) -> &'static str {
    if secreto {
        "True"
    } else {
        "False"
    }
}

pub(crate) fn to_fields(r: &Record) -> [String; 8] {
    [
        r.indice.clone(),
        r.dato.clone(),
        r.tipo_dato.clone(),
        r.descripcion.clone(),
        r.quintil.clone().unwrap_or_default(),
        r.anyo.to_string(),
        format_valor(r.valor),
        format_secreto(r.secreto).to_string(),
    ]
}

/// Write the header and one line per record to `w`.
pub fn write_records<W: Write>(w: W, records: &[Record]) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(w);
    wtr.write_record(COLUMNS)?;
    for r in records {
        wtr.write_record(to_fields(r))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `records` as CSV to `path`.
///
/// The table goes to a temp file in the same directory which then replaces
/// `path` in one rename; on any failure the existing file is left untouched.
#[instrument(level = "info", skip(records), fields(path = %path.display(), rows = records.len()))]
pub fn write_csv(path: &Path, records: &[Record]) -> Result<(), WriteError> {
    let dir: PathBuf = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(&dir).map_err(io_err)?;
    let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;

    write_records(tmp.as_file_mut(), records).map_err(|source| WriteError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tmp.as_file().sync_all().map_err(io_err)?;

    // temp files are created 0600; give the output the usual 0644
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644)).map_err(io_err)?;
    }

    tmp.persist(path).map_err(|source| WriteError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    info!("wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
