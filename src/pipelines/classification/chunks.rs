/*!
Flattening and positional chunking of a year's articles.

*/
use crate::error::Error;
use crate::types::{Article, YearCollection};

/// An article along with its setSpec.
pub type Pair = (String, Article);

/// Flattens a collection into `(setSpec, article)` pairs,
/// following setSpec order then article order.
pub fn flatten(collection: YearCollection) -> Vec<Pair> {
    collection
        .into_sets()
        .into_iter()
        .flat_map(|(setspec, articles)| {
            articles
                .into_iter()
                .map(move |article| (setspec.clone(), article))
        })
        .collect()
}

/// Size of each chunk when splitting `total` items between `workers`.
pub fn chunk_size(total: usize, workers: usize) -> usize {
    total.div_ceil(workers)
}

/// Splits `items` into contiguous chunks of [chunk_size] items.
///
/// The last chunk may be shorter, and there are fewer chunks than workers
/// when there are fewer items than workers.
/// No items means no chunks.
pub fn partition<T>(items: Vec<T>, workers: usize) -> Result<Vec<Vec<T>>, Error> {
    if workers == 0 {
        return Err(Error::Config("worker count must be at least 1".to_string()));
    }

    let size = chunk_size(items.len(), workers);
    if size == 0 {
        return Ok(Vec::new());
    }

    let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
    let mut items = items.into_iter();
    loop {
        let chunk: Vec<T> = items.by_ref().take(size).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use crate::types::{Article, Fields, YearCollection};

    use super::*;

    fn article(title: &str) -> Article {
        Article::new(Fields {
            title: vec![title.to_string()],
            ..Default::default()
        })
    }

    #[test]
    fn flatten_order() {
        let mut c = YearCollection::new();
        c.push("A".to_string(), article("a1"));
        c.push("B".to_string(), article("b1"));
        c.push("A".to_string(), article("a2"));

        let flat = flatten(c);
        let names: Vec<(&str, &str)> = flat
            .iter()
            .map(|(s, a)| (s.as_str(), a.fields().title[0].as_str()))
            .collect();
        assert_eq!(names, vec![("A", "a1"), ("A", "a2"), ("B", "b1")]);
    }

    #[test]
    fn coverage() {
        for total in 0..40 {
            for workers in 1..9 {
                let items: Vec<usize> = (0..total).collect();
                let chunks = partition(items.clone(), workers).unwrap();

                assert!(chunks.len() <= workers);
                assert!(chunks.iter().all(|c| !c.is_empty()));
                assert!(chunks
                    .iter()
                    .all(|c| c.len() <= chunk_size(total, workers)));

                let concat: Vec<usize> = chunks.into_iter().flatten().collect();
                assert_eq!(concat, items);
            }
        }
    }

    #[test]
    fn last_chunk_shorter() {
        let chunks = partition((0..10).collect::<Vec<_>>(), 3).unwrap();
        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn fewer_items_than_workers() {
        let chunks = partition(vec!['a', 'b'], 15).unwrap();
        assert_eq!(chunks, vec![vec!['a'], vec!['b']]);
    }

    #[test]
    fn empty() {
        let chunks = partition(Vec::<u8>::new(), 4).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn no_workers() {
        assert!(matches!(partition(vec![1], 0), Err(Error::Config(_))));
    }
}
