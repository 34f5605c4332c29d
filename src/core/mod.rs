pub mod etl;
pub mod filter;
pub mod mac_xref;
pub mod merge;
pub mod split;
pub mod tabulate;

pub use crate::domain::model::{ScanHost, ValueKind};
pub use crate::domain::ports::Pipeline;
pub use crate::utils::error::Result;
