/*! Deduplicating aggregation of parsed records.

Articles are grouped by year, then by setSpec.
Inside a (year, setSpec) group, an article is kept only once, using the digest of its fields as key:
the same article harvested twice (on different lines, or twice on the same line) collapses into one.

Years are kept sorted, setSpecs and articles in first-seen order.
!*/
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::io::yearfile;
use crate::types::{Article, ArticleDigest, YearCollection};

use super::record::ParsedRecord;

#[derive(Debug, Default)]
struct YearBucket {
    collection: YearCollection,
    seen: HashMap<String, HashSet<ArticleDigest>>,
}

#[derive(Debug, Default)]
pub struct Aggregator {
    years: BTreeMap<String, YearBucket>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an article, returning `false` if it already was in its (year, setSpec) group.
    pub fn insert(&mut self, year: String, setspec: String, article: Article) -> bool {
        let digest = article.fields().digest();
        let bucket = self.years.entry(year).or_default();

        let is_new = bucket
            .seen
            .entry(setspec.clone())
            .or_default()
            .insert(digest);

        if is_new {
            bucket.collection.push(setspec, article);
        }
        is_new
    }

    pub fn insert_record(&mut self, record: ParsedRecord) -> bool {
        self.insert(record.year, record.setspec, record.article)
    }

    /// Number of unique articles, all years included.
    pub fn len(&self) -> usize {
        self.years.values().map(|b| b.collection.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(year, number of articles)`, sorted by year.
    pub fn year_counts(&self) -> Vec<(String, usize)> {
        self.years
            .iter()
            .map(|(year, bucket)| (year.clone(), bucket.collection.len()))
            .collect()
    }

    pub fn get(&self, year: &str) -> Option<&YearCollection> {
        self.years.get(year).map(|b| &b.collection)
    }

    /// Consumes the aggregator into per-year collections, sorted by year.
    pub fn into_years(self) -> impl Iterator<Item = (String, YearCollection)> {
        self.years
            .into_iter()
            .map(|(year, bucket)| (year, bucket.collection))
    }

    /// Writes one year file per year in `dst`, returning the per-year article counts.
    pub fn write(self, dst: &Path) -> Result<Vec<(String, usize)>, Error> {
        let mut counts = Vec::with_capacity(self.years.len());
        for (year, collection) in self.into_years() {
            let path = yearfile::year_path(dst, &year);
            info!("{}: {} articles -> {:?}", year, collection.len(), path);
            yearfile::save(&path, &collection)?;
            counts.push((year, collection.len()));
        }
        Ok(counts)
    }
}
