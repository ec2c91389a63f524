pub mod etl;
pub mod extractor;
pub mod pipeline;
pub mod writer;

pub use crate::domain::model::{CardListing, FieldFormat, MalformedCardPolicy, Product};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
