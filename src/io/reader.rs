/*! Line reader over raw dumps.

Dumps can be plain or gzipped (detected by a `.gz` extension).
Lines are split on `\n` and decoded lossily, so that a stray invalid byte sequence
only affects the record it is in.
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::Error;

/// Iterator over the lines of a dump.
pub struct DumpReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl DumpReader<BufReader<Box<dyn Read>>> {
    /// Opens a dump, using a [MultiGzDecoder] if the path ends with `.gz`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let inner: Box<dyn Read> = match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Box::new(MultiGzDecoder::new(file)),
            _ => Box::new(file),
        };

        Ok(Self::new(BufReader::new(inner)))
    }
}

impl<R: BufRead> DumpReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for DumpReader<R> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(String::from_utf8_lossy(&self.buf).into_owned())),
            Err(e) => Some(Err(e.into())),
        }
    }
}
