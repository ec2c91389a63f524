pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, RunConfig};

pub use crate::core::{etl::EtlEngine, etl::RunOutcome, pipeline::CataloguePipeline};
pub use domain::model::{FieldFormat, MalformedCardPolicy, Product};
pub use utils::error::{EtlError, Result};
