// src/process/mod.rs
pub mod derive;
pub mod normalize;

pub use derive::{clean_quintil, derive, parse_label, Label, Record, COLUMNS};
pub use normalize::{clean_label, normalize, FlatRow, LABEL_PREFIX};
