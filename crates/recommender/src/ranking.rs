//! Ranking a similarity row.
//!
//! ## Algorithm
//! 1. Pair every column with its score: `(index, score)`
//! 2. Stable sort by score, highest first (equal scores keep column order)
//! 3. Drop rank 1, which is the query movie itself (maximal self-similarity)
//! 4. Keep the next `window` entries as candidates

/// Every column of `row`, best first
pub fn rank(row: &[f64]) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Candidates for a query: ranks 2 through `window + 1`
pub fn scan_window(ranked: &[(usize, f64)], window: usize) -> &[(usize, f64)] {
    let end = ranked.len().min(window.saturating_add(1));
    ranked.get(1..end).unwrap_or(&[])
}
