pub mod config;
pub mod error;
pub mod extract;
pub mod identifiers;
pub mod io;
pub mod pipelines;
pub mod report;
pub mod types;
