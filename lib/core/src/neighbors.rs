//! k-nearest neighbor selection over a linear scan

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::distance::euclidean;
use crate::error::{Error, Result};
use crate::point::QueryPoint;
use crate::sample::SoilSample;

/// A sample annotated with its distance to the current query
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NeighborCandidate<'a> {
    pub sample: &'a SoilSample,
    /// Position of the sample in the dataset
    pub index: usize,
    pub distance: f64,
}

/// Map a signed neighbor count onto `[1, len]`
///
/// Non-positive requests become 1. `len` of zero still yields 1 so callers
/// surface the empty-dataset error from selection rather than here.
pub fn clamp_k(k: i64, len: usize) -> usize {
    let k = usize::try_from(k).unwrap_or(0).max(1);
    k.min(len.max(1))
}

/// Every sample with its distance to `query`, nearest first
///
/// Sorting is stable, so equidistant samples keep dataset order.
pub fn rank_candidates<'a>(samples: &'a [SoilSample], query: &QueryPoint) -> Vec<NeighborCandidate<'a>> {
    let mut candidates: Vec<NeighborCandidate<'a>> = samples
        .iter()
        .enumerate()
        .map(|(index, sample)| NeighborCandidate {
            sample,
            index,
            distance: euclidean(query, &sample.location()),
        })
        .collect();

    candidates.sort_by_key(|c| OrderedFloat(c.distance));
    candidates
}

/// The `min(k, samples.len())` samples closest to `query`
///
/// `k = 0` is treated as 1.
pub fn select_neighbors<'a>(
    samples: &'a [SoilSample],
    query: &QueryPoint,
    k: usize,
) -> Result<Vec<NeighborCandidate<'a>>> {
    if samples.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let k = k.clamp(1, samples.len());
    let mut ranked = rank_candidates(samples, query);
    ranked.truncate(k);
    Ok(ranked)
}
