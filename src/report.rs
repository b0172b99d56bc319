//! Per-year distributions of predicted languages and fields of study.
use std::collections::HashMap;
use std::fmt;

use crate::types::YearCollection;

/// Label counts over the articles of a year.
///
/// Only top-1 predictions are counted. Percentages are computed over every article of the year,
/// including the ones without prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    year: String,
    total: usize,
    languages: Vec<(String, usize)>,
    fos: Vec<(String, usize)>,
}

/// Sorts by count descending, then label.
fn sorted(counts: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    counts.sort_by(|(l1, c1), (l2, c2)| c2.cmp(c1).then_with(|| l1.cmp(l2)));
    counts
}

impl Distribution {
    pub fn new(year: &str, collection: &YearCollection) -> Self {
        let mut languages = HashMap::new();
        let mut fos = HashMap::new();

        for article in collection.articles() {
            if let Some(lang) = article.top_language() {
                *languages.entry(lang).or_insert(0) += 1;
            }
            if let Some(field) = article.top_fos() {
                *fos.entry(field).or_insert(0) += 1;
            }
        }

        Self {
            year: year.to_string(),
            total: collection.len(),
            languages: sorted(languages),
            fos: sorted(fos),
        }
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn languages(&self) -> &[(String, usize)] {
        &self.languages
    }

    pub fn fos(&self) -> &[(String, usize)] {
        &self.fos
    }

    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }

    fn write_counts(&self, f: &mut fmt::Formatter<'_>, counts: &[(String, usize)]) -> fmt::Result {
        for (label, count) in counts {
            writeln!(f, "{}: {} ({:.2}%)", label, count, self.percentage(*count))?;
        }
        Ok(())
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Year: {}", self.year)?;
        writeln!(f, "Language Distribution:")?;
        self.write_counts(f, &self.languages)?;
        writeln!(f)?;
        writeln!(f, "Discipline Distribution:")?;
        self.write_counts(f, &self.fos)
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{Article, Enrichment, Fields, YearCollection};

    use super::Distribution;

    fn classified(lang: &str, fos: Option<&str>) -> Article {
        let mut article = Article::new(Fields::default());
        article.set_enrichment(Enrichment {
            predicted_language: Some(vec![(lang.to_string(), 0.9), ("zz".to_string(), 0.1)]),
            predicted_fos: Some(fos.map(|f| vec![(f.to_string(), 0.8)]).unwrap_or_default()),
            classification_error: None,
        });
        article
    }

    fn collection() -> YearCollection {
        let mut c = YearCollection::new();
        c.push("a".to_string(), classified("en", Some("Physics")));
        c.push("a".to_string(), classified("en", Some("Biology")));
        c.push("b".to_string(), classified("fr", None));
        c.push("b".to_string(), classified("en", Some("Physics")));
        c.push("b".to_string(), Article::default());
        c
    }

    #[test]
    fn counts() {
        let d = Distribution::new("2019", &collection());
        assert_eq!(d.total(), 5);
        assert_eq!(
            d.languages(),
            &[("en".to_string(), 3), ("fr".to_string(), 1)]
        );
        assert_eq!(
            d.fos(),
            &[("Physics".to_string(), 2), ("Biology".to_string(), 1)]
        );
    }

    #[test]
    fn display() {
        let d = Distribution::new("2019", &collection());
        let expected = "Year: 2019
Language Distribution:
en: 3 (60.00%)
fr: 1 (20.00%)

Discipline Distribution:
Physics: 2 (40.00%)
Biology: 1 (20.00%)
";
        assert_eq!(d.to_string(), expected);
    }

    #[test]
    fn ties_sorted_by_label() {
        let mut c = YearCollection::new();
        c.push("a".to_string(), classified("pt", None));
        c.push("a".to_string(), classified("de", None));
        let d = Distribution::new("2000", &c);
        assert_eq!(
            d.languages(),
            &[("de".to_string(), 1), ("pt".to_string(), 1)]
        );
    }

    #[test]
    fn empty_year() {
        let d = Distribution::new("1999", &YearCollection::new());
        assert_eq!(d.percentage(0), 0.0);
        assert!(d.languages().is_empty());
    }
}
