//! Pure similarity math: cosine similarity and candidate ranking.

use engram_models::{MemoryEntry, SearchResult};

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in [-1, 1] where:
/// - 1.0 means identical direction
/// - 0.0 means orthogonal
/// - -1.0 means opposite direction
///
/// Vectors of different lengths come from mismatched model generations and
/// are treated as unrelated (0.0), as is any zero-magnitude vector.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

/// Rank candidates against a query vector.
///
/// Entries without an embedding are skipped, results below `threshold`
/// (inclusive lower bound) are dropped, the rest are sorted descending by
/// similarity and truncated to `limit`. The sort is stable so entries with
/// equal similarity keep their original relative order.
pub fn rank(
    candidates: &[MemoryEntry],
    query: &[f32],
    threshold: f32,
    limit: usize,
) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = candidates
        .iter()
        .filter_map(|entry| {
            let embedding = entry.embedding.as_ref()?;
            let similarity = cosine_similarity(embedding, query);
            (similarity >= threshold).then(|| SearchResult {
                entry: entry.clone(),
                similarity,
            })
        })
        .collect();

    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(limit);
    results
}
