/*!
# IO utilities

Reading of raw dumps, and saving/loading of year files.
!*/
mod reader;
pub mod yearfile;

pub use reader::DumpReader;
