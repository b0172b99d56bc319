//! Extraction pipeline
//!
//! Streams a raw dump line by line, parses every record fragment it finds,
//! deduplicates articles per (year, setSpec) and writes one `<year>.json` per year.
//!
//! Fragments lacking a date, a year or a setSpec are skipped; extraction never stops on a bad record.
use std::fmt;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::error::Error;
use crate::extract::{fragments, parse_record, Aggregator};
use crate::io::DumpReader;
use crate::pipelines::pipeline::Pipeline;

/// Lines between two progress messages.
const PROGRESS_EVERY: usize = 100_000;

/// Counters of an extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub lines: usize,
    pub fragments: usize,
    pub rejected: usize,
    pub duplicates: usize,
    /// `(year, unique articles)`, sorted by year.
    pub years: Vec<(String, usize)>,
}

impl ExtractionStats {
    /// Number of unique articles, all years included.
    pub fn unique(&self) -> usize {
        self.years.iter().map(|(_, count)| count).sum()
    }
}

impl fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Done!")?;
        writeln!(f, "Count: {} unique articles", self.unique())?;
        writeln!(
            f,
            "({} lines, {} records, {} rejected, {} duplicates)",
            self.lines, self.fragments, self.rejected, self.duplicates
        )?;
        for (year, count) in &self.years {
            writeln!(f, "{}: {} articles", year, count)?;
        }
        Ok(())
    }
}

pub struct Extraction {
    src: PathBuf,
    dst: PathBuf,
}

impl Extraction {
    pub fn new(src: PathBuf, dst: PathBuf) -> Self {
        Self { src, dst }
    }

    /// Folds lines into an [Aggregator].
    ///
    /// `stats.years` is left empty, see [Aggregator::year_counts].
    pub fn aggregate<L>(lines: L) -> Result<(Aggregator, ExtractionStats), Error>
    where
        L: Iterator<Item = Result<String, Error>>,
    {
        let mut aggregator = Aggregator::new();
        let mut stats = ExtractionStats::default();

        for line in lines {
            let line = line?;
            stats.lines += 1;
            if stats.lines % PROGRESS_EVERY == 0 {
                debug!(
                    "{} lines, {} unique articles",
                    stats.lines,
                    aggregator.len()
                );
            }

            for fragment in fragments(&line) {
                stats.fragments += 1;
                match parse_record(fragment) {
                    Ok(record) => {
                        if !aggregator.insert_record(record) {
                            stats.duplicates += 1;
                        }
                    }
                    Err(rejection) => {
                        debug!("line {}: skipping record ({})", stats.lines, rejection);
                        stats.rejected += 1;
                    }
                }
            }
        }

        Ok((aggregator, stats))
    }
}

impl Pipeline<ExtractionStats> for Extraction {
    fn run(&self) -> Result<ExtractionStats, Error> {
        if !self.dst.exists() {
            warn!("Destination does not exist. Creating {:?}", self.dst);
            std::fs::create_dir_all(&self.dst)?;
        }

        if !self.dst.is_dir() {
            return Err(Error::Config(format!(
                "Destination has to be a directory: {:?}",
                self.dst
            )));
        }

        info!("extracting records from {:?}", self.src);
        let reader = DumpReader::from_path(&self.src)?;
        let (aggregator, mut stats) = Self::aggregate(reader)?;

        info!(
            "{} unique articles ({} records, {} rejected, {} duplicates)",
            aggregator.len(),
            stats.fragments,
            stats.rejected,
            stats.duplicates
        );

        stats.years = aggregator.write(&self.dst)?;
        Ok(stats)
    }
}
