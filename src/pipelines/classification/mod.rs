//! Language and field of study classification pipeline
//!
//! Year files are processed one after the other. For each of them:
//! 1. the year collection is loaded and flattened into `(setSpec, article)` pairs,
//! 1. pairs are split into at most `workers` contiguous chunks,
//! 1. chunks are classified in parallel, each worker holding its own models,
//! 1. results are merged back in chunk order and the year file is overwritten.
//!
//! If a worker can't load its models, the year fails and its file is left untouched.
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::error::Error;
use crate::io::yearfile;
use crate::pipelines::pipeline::Pipeline;
use crate::report::Distribution;

pub mod chunks;
pub mod merge;
pub mod worker;

pub use chunks::{flatten, partition, Pair};
pub use merge::merge;
pub use worker::{run_pool, WorkerContext, WorkerInit};

pub struct Classification<I> {
    sources: Vec<PathBuf>,
    workers: usize,
    init: I,
}

impl<I: WorkerInit> Classification<I> {
    pub fn new(sources: Vec<PathBuf>, workers: usize, init: I) -> Result<Self, Error> {
        if workers == 0 {
            return Err(Error::Config("worker count must be at least 1".to_string()));
        }
        Ok(Self {
            sources,
            workers,
            init,
        })
    }

    /// Classifies a single year file in place.
    pub fn process_year(&self, path: &Path) -> Result<Distribution, Error> {
        let year = yearfile::year_of(path)
            .ok_or_else(|| Error::Custom(format!("no year in file name {:?}", path)))?
            .to_string();

        let collection = yearfile::load(path)?;
        info!(
            "[{}] {} articles in {} setSpecs",
            year,
            collection.len(),
            collection.nb_setspecs()
        );

        let pairs = flatten(collection);
        let chunks = partition(pairs, self.workers)?;
        info!(
            "[{}] {} chunks of at most {} articles",
            year,
            chunks.len(),
            chunks.first().map(Vec::len).unwrap_or(0)
        );

        let results = run_pool(&self.init, chunks, self.workers)?;
        let merged = merge(results);

        yearfile::save(path, &merged)?;
        Ok(Distribution::new(&year, &merged))
    }
}

impl<I: WorkerInit> Classification<I> {
    /// Classifies every year file in order, handing each report to `on_year` as soon as
    /// its file is saved.
    ///
    /// Stops at the first failing year: earlier years stay classified and reported.
    pub fn run_with<F>(&self, mut on_year: F) -> Result<Vec<Distribution>, Error>
    where
        F: FnMut(&Distribution),
    {
        let files = yearfile::list_year_files(&self.sources)?;
        if files.is_empty() {
            warn!("no year file found in {:?}", self.sources);
        }

        let mut distributions = Vec::with_capacity(files.len());
        for file in files {
            info!("processing {:?}", file);
            let distribution = self.process_year(&file).map_err(|e| {
                error!("could not classify {:?}: {}", file, e);
                e
            })?;
            on_year(&distribution);
            distributions.push(distribution);
        }
        Ok(distributions)
    }
}

impl<I: WorkerInit> Pipeline<Vec<Distribution>> for Classification<I> {
    fn run(&self) -> Result<Vec<Distribution>, Error> {
        self.run_with(|distribution| info!("\n{}", distribution))
    }
}
