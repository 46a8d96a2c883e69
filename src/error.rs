use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid source URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("GET {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {url} is not a list of tables: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// HTTP status of the failed request, when the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// A table in the API payload lacks a field the normalizer needs.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("table #{table} is missing field `{field}`")]
pub struct SchemaError {
    pub table: usize,
    pub field: &'static str,
}

/// A cleaned label that does not split into at least four segments.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("label {label:?} has {segments} segment(s), expected 4 or 5")]
pub struct MalformedLabel {
    pub label: String,
    pub segments: usize,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeriveError {
    #[error("{} malformed label(s): {}", .0.len(), .0.join(" | "))]
    MalformedLabels(Vec<String>),
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("writing {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("encoding CSV for {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("replacing {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Derive(#[from] DeriveError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
