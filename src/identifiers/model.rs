/*! fastText models.

[FastText] wraps a fastText `.bin` model. It is used as is for language identification
(`lid.176.bin`), and through [FastTextFos] for supervised field of study models.
* !*/
use std::path::Path;

use fasttext::FastText as FastTextLib;

use crate::error::Error;
use crate::types::Scored;

use super::identification::{clean_label, FosInput, FosOutput, FosPredict, Predict};

/// FastTextModel.
pub struct FastText {
    inner: FastTextLib,
    pub k: i32,
    pub threshold: f32,
}

impl Predict for FastText {
    fn predict(&self, line: &str) -> Result<Vec<Scored>, Error> {
        let predictions = self
            .inner
            .predict(line, self.k, self.threshold)
            .map_err(Error::FastText)?;

        Ok(predictions
            .into_iter()
            .map(|pred| (clean_label(&pred.label), pred.prob))
            .collect())
    }
}

/// Fasttext builder.
pub struct FastTextBuilder<'a> {
    path: Option<&'a Path>,
    k: Option<i32>,
    threshold: Option<f32>,
}

impl<'a> FastTextBuilder<'a> {
    fn init_fasttextlib(path: &Path) -> Result<FastTextLib, Error> {
        let path = path
            .to_str()
            .ok_or_else(|| Error::Config(format!("Could not parse path {:?}", path)))?;
        let mut ft = FastTextLib::new();
        ft.load_model(path).map_err(Error::FastText)?;
        Ok(ft)
    }

    pub fn build(&self) -> Result<FastText, Error> {
        let path = self
            .path
            .ok_or_else(|| Error::Config("No path provided".to_string()))?;
        let k = self
            .k
            .ok_or_else(|| Error::Config("No k provided".to_string()))?;
        let threshold = self
            .threshold
            .ok_or_else(|| Error::Config("No threshold provided".to_string()))?;

        if k < 1 {
            return Err(Error::Config(format!("k must be at least 1, got {k}")));
        }

        Ok(FastText {
            inner: Self::init_fasttextlib(path)?,
            k,
            threshold,
        })
    }

    pub fn path<'b>(&'b mut self, path: &'a Path) -> &'b mut FastTextBuilder<'a> {
        self.path = Some(path);
        self
    }

    pub fn k<'b>(&'b mut self, k: i32) -> &'b mut FastTextBuilder<'a> {
        self.k = Some(k);
        self
    }

    pub fn threshold<'b>(&'b mut self, threshold: f32) -> &'b mut FastTextBuilder<'a> {
        self.threshold = Some(threshold);
        self
    }
}

impl<'a> Default for FastTextBuilder<'a> {
    fn default() -> Self {
        Self {
            path: Some(Path::new("lid.176.bin")),
            k: Some(1),
            threshold: Some(0.0),
        }
    }
}

/// Field of study predictor over a supervised fastText model.
///
/// Title, abstract and journal name are joined into a single line.
pub struct FastTextFos {
    model: FastText,
}

impl FastTextFos {
    pub fn new(model: FastText) -> Self {
        Self { model }
    }

    fn line(input: &FosInput) -> String {
        [
            input.title.as_str(),
            input.abstract_text.as_str(),
            input.journal_name.as_str(),
        ]
        .join(" ")
        .replace('\n', " ")
        .replace('\0', "")
    }
}

impl FosPredict for FastTextFos {
    fn predict(&mut self, inputs: &[FosInput]) -> Result<FosOutput, Error> {
        let scores = inputs
            .iter()
            .map(|input| self.model.predict(&Self::line(input)))
            .collect::<Result<_, _>>()?;
        Ok(FosOutput { scores })
    }
}
