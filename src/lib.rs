pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::filter_rules::{FilterMode, FilterRules};
pub use core::etl::EtlEngine;
pub use domain::ports::Pipeline;
pub use utils::error::{EtlError, Result};
