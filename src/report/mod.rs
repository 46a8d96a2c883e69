pub mod summary;
pub mod validate;
pub mod write;

pub use summary::{ColumnInfo, ColumnType, Summary};
pub use validate::{check_distribution, DistributionCheck};
pub use write::{write_csv, write_records};
