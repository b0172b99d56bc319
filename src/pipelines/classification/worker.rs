/*! Classification workers.

Each worker owns a [WorkerContext], built by a [WorkerInit] hook when the worker picks up a chunk.
Models are never shared between workers.

For each article of a chunk:
1. title, description and publisher values are joined into a single line,
1. the line goes through language identification,
1. if the top language is `en`, title/description/publisher go through the field of study predictor,
   otherwise no field of study is predicted.

A failure on one article does not stop the chunk: the article is kept,
with what could be predicted and the failure message in `classification_error`.
!*/
use log::{error, info};
use rayon::prelude::*;

use crate::error::Error;
use crate::identifiers::{FosInput, FosPredict, Predict};
use crate::types::{Article, Enrichment, Fields, Scored};

use super::chunks::Pair;

/// Language label for which field of study is predicted.
pub const FOS_LANGUAGE: &str = "en";

/// Worker startup hook.
///
/// Called from worker threads, once per chunk.
pub trait WorkerInit: Sync {
    type Lid: Predict;
    type Fos: FosPredict;

    fn init(&self) -> Result<WorkerContext<Self::Lid, Self::Fos>, Error>;
}

/// Models owned by a single worker.
pub struct WorkerContext<L, F> {
    lid: L,
    fos: F,
}

/// Line sent to the language identifier.
pub fn classification_text(fields: &Fields) -> String {
    fields
        .title
        .iter()
        .chain(fields.description.iter())
        .chain(fields.publisher.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\n', " ")
        // fastText fails on NUL
        .replace('\0', "")
}

/// Input sent to the field of study predictor.
pub fn fos_input(fields: &Fields) -> FosInput {
    FosInput {
        title: fields.title.join(" "),
        abstract_text: fields.description.join(" "),
        journal_name: fields.publisher.join(" "),
    }
}

impl<L: Predict, F: FosPredict> WorkerContext<L, F> {
    pub fn new(lid: L, fos: F) -> Self {
        Self { lid, fos }
    }

    fn predict_fos(&mut self, fields: &Fields) -> Result<Vec<Scored>, Error> {
        let output = self.fos.predict(&[fos_input(fields)])?;
        output
            .scores
            .into_iter()
            .next()
            .ok_or_else(|| Error::Predictor("no scores returned".to_string()))
    }

    /// Predicts language, then field of study for English articles.
    pub fn classify(&mut self, article: &Article) -> Enrichment {
        let fields = article.fields();

        let predicted_language = match self.lid.predict(&classification_text(fields)) {
            Ok(p) => p,
            Err(e) => {
                return Enrichment {
                    predicted_language: Some(Vec::new()),
                    predicted_fos: Some(Vec::new()),
                    classification_error: Some(format!("language identification: {e}")),
                }
            }
        };

        let is_fos_language = matches!(
            predicted_language.first(),
            Some((label, _)) if label == FOS_LANGUAGE
        );
        let (predicted_fos, classification_error) = if is_fos_language {
            match self.predict_fos(fields) {
                Ok(fos) => (fos, None),
                Err(e) => (Vec::new(), Some(format!("field of study: {e}"))),
            }
        } else {
            (Vec::new(), None)
        };

        Enrichment {
            predicted_language: Some(predicted_language),
            predicted_fos: Some(predicted_fos),
            classification_error,
        }
    }

    /// Classifies every article of a chunk, keeping order.
    pub fn process_chunk(&mut self, chunk: Vec<Pair>) -> Vec<Pair> {
        chunk
            .into_iter()
            .map(|(setspec, mut article)| {
                let enrichment = self.classify(&article);
                if let Some(e) = &enrichment.classification_error {
                    error!("[{}] {:?}: {}", setspec, article.fields().identifier, e);
                }
                article.set_enrichment(enrichment);
                (setspec, article)
            })
            .collect()
    }
}

/// Runs chunks on a pool of `workers` threads.
///
/// Blocks until every chunk is done. Results are in chunk order, whatever the completion order.
/// Fails if a worker context can't be built.
pub fn run_pool<I: WorkerInit>(
    init: &I,
    chunks: Vec<Vec<Pair>>,
    workers: usize,
) -> Result<Vec<Vec<Pair>>, Error> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|idx| format!("classify-{idx}"))
        .build()?;

    let nb_chunks = chunks.len();
    pool.install(|| {
        chunks
            .into_par_iter()
            .enumerate()
            .map(|(idx, chunk)| -> Result<Vec<Pair>, Error> {
                let mut context = init.init()?;
                let results = context.process_chunk(chunk);
                info!("chunk {}/{}: {} articles", idx + 1, nb_chunks, results.len());
                Ok(results)
            })
            .collect()
    })
}
