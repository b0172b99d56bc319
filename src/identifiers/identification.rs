/*! Prediction traits

Language identifiers implement [Predict], field of study predictors implement [FosPredict].
Both are object-safe so that workers can hold boxed instances.
!*/
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::Scored;

/// fastText label prefix.
pub const LABEL_PREFIX: &str = "__label__";

/// removes `__label__` from label start
pub fn clean_label(label: &str) -> String {
    label.strip_prefix(LABEL_PREFIX).unwrap_or(label).to_string()
}

/// Language identification on a single line.
pub trait Predict {
    /// Ranked `(label, confidence)` predictions, highest confidence first.
    /// Labels do not carry the `__label__` prefix.
    fn predict(&self, line: &str) -> Result<Vec<Scored>, Error>;
}

/// Field of study predictor input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FosInput {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub journal_name: String,
}

/// Field of study predictor output: one ranked `(label, score)` list per input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FosOutput {
    pub scores: Vec<Vec<Scored>>,
}

pub trait FosPredict {
    fn predict(&mut self, inputs: &[FosInput]) -> Result<FosOutput, Error>;
}

impl<T: Predict + ?Sized> Predict for Box<T> {
    fn predict(&self, line: &str) -> Result<Vec<Scored>, Error> {
        (**self).predict(line)
    }
}

impl<T: FosPredict + ?Sized> FosPredict for Box<T> {
    fn predict(&mut self, inputs: &[FosInput]) -> Result<FosOutput, Error> {
        (**self).predict(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_label() {
        assert_eq!(clean_label("__label__en"), "en");
        assert_eq!(clean_label("en"), "en");
        assert_eq!(clean_label("__label__Computer Science"), "Computer Science");
    }

    #[test]
    fn fos_input_json() {
        let input = FosInput {
            title: "t".to_string(),
            abstract_text: "a".to_string(),
            journal_name: "j".to_string(),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "t", "abstract": "a", "journal_name": "j"})
        );
    }

    #[test]
    fn fos_output_json() {
        let out: FosOutput =
            serde_json::from_str(r#"{"scores": [[["Physics", 0.75], ["Mathematics", 0.25]]]}"#)
                .unwrap();
        assert_eq!(
            out.scores,
            vec![vec![
                ("Physics".to_string(), 0.75),
                ("Mathematics".to_string(), 0.25)
            ]]
        );
    }
}
