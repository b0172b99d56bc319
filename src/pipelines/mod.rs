//! Pipelines.
//!
//! The two batch stages are implemented here:
//! - [Extraction] turns a raw dump into deduplicated year files,
//! - [Classification] tags the articles of year files with language and field of study.
//!
//! Both implement the light [pipeline::Pipeline] trait.
pub mod classification;
pub mod extraction;
pub mod pipeline;

pub use classification::Classification;
pub use extraction::{Extraction, ExtractionStats};
pub use pipeline::Pipeline;
