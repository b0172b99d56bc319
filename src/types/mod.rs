//! Article and collection types shared by the extraction and classification pipelines.
mod article;
mod collection;

pub use article::{Article, ArticleDigest, Enrichment, Fields, Scored};
pub use collection::YearCollection;
