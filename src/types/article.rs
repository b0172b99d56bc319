use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A `(label, score)` pair, as produced by the language identifier or the
/// field of study predictor.
pub type Scored = (String, f32);

/// Content digest of an article's harvested fields.
pub type ArticleDigest = [u8; 32];

/// Harvested Dublin Core fields.
///
/// Each field holds every occurrence of the matching element, in document order.
/// Serialized as a flat map of field name to list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    pub identifier: Vec<String>,
    pub date: Vec<String>,
    pub creator: Vec<String>,
    pub publisher: Vec<String>,
    pub title: Vec<String>,
    pub description: Vec<String>,
    pub source: Vec<String>,
    pub relation: Vec<String>,
    pub language: Vec<String>,
    pub rights: Vec<String>,
}

impl Fields {
    /// Fields in canonical order.
    pub fn canonical(&self) -> [(&'static str, &[String]); 10] {
        [
            ("identifier", &self.identifier),
            ("date", &self.date),
            ("creator", &self.creator),
            ("publisher", &self.publisher),
            ("title", &self.title),
            ("description", &self.description),
            ("source", &self.source),
            ("relation", &self.relation),
            ("language", &self.language),
            ("rights", &self.rights),
        ]
    }

    /// SHA-256 over a length-prefixed encoding of [Fields::canonical].
    ///
    /// Length prefixes keep `["ab"]` and `["a", "b"]` apart.
    pub fn digest(&self) -> ArticleDigest {
        let mut hasher = Sha256::new();
        for (_, values) in self.canonical() {
            hasher.update((values.len() as u64).to_le_bytes());
            for value in values {
                hasher.update((value.len() as u64).to_le_bytes());
                hasher.update(value.as_bytes());
            }
        }
        hasher.finalize().into()
    }
}

/// Predictions attached to an [Article] by the classification pipeline.
///
/// Absent fields mean the article has not been classified yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_language: Option<Vec<Scored>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_fos: Option<Vec<Scored>>,
    /// Set when classification of this article failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_error: Option<String>,
}

/// A harvested article: its original fields plus optional predictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(flatten)]
    fields: Fields,
    #[serde(flatten)]
    enrichment: Enrichment,
}

impl Article {
    pub fn new(fields: Fields) -> Self {
        Self {
            fields,
            enrichment: Enrichment::default(),
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn enrichment(&self) -> &Enrichment {
        &self.enrichment
    }

    pub fn set_enrichment(&mut self, enrichment: Enrichment) {
        self.enrichment = enrichment;
    }

    /// Top-1 predicted language label, if any.
    pub fn top_language(&self) -> Option<&str> {
        top_label(self.enrichment.predicted_language.as_deref())
    }

    /// Top-1 predicted field of study label, if any.
    pub fn top_fos(&self) -> Option<&str> {
        top_label(self.enrichment.predicted_fos.as_deref())
    }
}

fn top_label(scores: Option<&[Scored]>) -> Option<&str> {
    scores
        .and_then(|s| s.first())
        .map(|(label, _)| label.as_str())
}
