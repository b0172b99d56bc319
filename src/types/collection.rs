/*! Per-year collection of articles, grouped by setSpec.

Insertion order of setSpecs and of articles is kept, both in memory and on (de)serialization,
so that chunking and merging are reproducible.
!*/
use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Article;

/// setSpec -> list of [Article], in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearCollection {
    sets: Vec<(String, Vec<Article>)>,
    index: HashMap<String, usize>,
}

impl YearCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `article` to `setspec`'s list, creating it at the end if needed.
    pub fn push(&mut self, setspec: String, article: Article) {
        match self.index.get(&setspec) {
            Some(&idx) => self.sets[idx].1.push(article),
            None => {
                self.index.insert(setspec.clone(), self.sets.len());
                self.sets.push((setspec, vec![article]));
            }
        }
    }

    /// Appends a whole list, merging into an existing setSpec if present.
    pub fn extend_set(&mut self, setspec: String, articles: Vec<Article>) {
        match self.index.get(&setspec) {
            Some(&idx) => self.sets[idx].1.extend(articles),
            None => {
                self.index.insert(setspec.clone(), self.sets.len());
                self.sets.push((setspec, articles));
            }
        }
    }

    pub fn get(&self, setspec: &str) -> Option<&[Article]> {
        self.index
            .get(setspec)
            .map(|&idx| self.sets[idx].1.as_slice())
    }

    /// Iterates over `(setSpec, articles)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Article])> {
        self.sets
            .iter()
            .map(|(setspec, articles)| (setspec.as_str(), articles.as_slice()))
    }

    /// Iterates over every article, regardless of setSpec.
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.sets.iter().flat_map(|(_, articles)| articles.iter())
    }

    /// Total number of articles across setSpecs.
    pub fn len(&self) -> usize {
        self.sets.iter().map(|(_, articles)| articles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn nb_setspecs(&self) -> usize {
        self.sets.len()
    }

    /// Consumes the collection into `(setSpec, articles)` pairs, in order.
    pub fn into_sets(self) -> Vec<(String, Vec<Article>)> {
        self.sets
    }
}

impl FromIterator<(String, Article)> for YearCollection {
    fn from_iter<I: IntoIterator<Item = (String, Article)>>(iter: I) -> Self {
        let mut collection = YearCollection::new();
        for (setspec, article) in iter {
            collection.push(setspec, article);
        }
        collection
    }
}

impl Serialize for YearCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sets.len()))?;
        for (setspec, articles) in &self.sets {
            map.serialize_entry(setspec, articles)?;
        }
        map.end()
    }
}

struct YearCollectionVisitor;

impl<'de> Visitor<'de> for YearCollectionVisitor {
    type Value = YearCollection;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of setSpec to a list of articles")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut collection = YearCollection::new();
        while let Some((setspec, articles)) = access.next_entry::<String, Vec<Article>>()? {
            collection.extend_set(setspec, articles);
        }
        Ok(collection)
    }
}

impl<'de> Deserialize<'de> for YearCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(YearCollectionVisitor)
    }
}
