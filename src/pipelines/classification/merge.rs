//! Merging of chunk results back into a [YearCollection].
use crate::types::YearCollection;

use super::chunks::Pair;

/// Regroups chunk results by setSpec.
///
/// `results` must be in chunk order: setSpecs and articles are inserted in the order they come.
pub fn merge(results: Vec<Vec<Pair>>) -> YearCollection {
    results.into_iter().flatten().collect()
}
