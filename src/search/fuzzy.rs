use std::collections::HashSet;

use crate::models::ArtworkRecord;

/// Case-insensitive Ratcliff/Obershelp similarity in `[0, 1]`.
///
/// `2·M / (|a| + |b|)` where `M` counts characters in the longest common
/// block plus, recursively, the blocks to its left and right. Two empty
/// strings are identical.
pub fn similarity(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * matching_chars(&a, &b)) as f32 / total as f32
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as
/// `(start_a, start_b, len)`. Ties go to the earliest block in `a`, then `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // run[j] = length of the common suffix ending at a[i-1], b[j-1]
    let mut prev = vec![0usize; bhi - blo + 1];
    let mut cur = vec![0usize; bhi - blo + 1];

    for (i, ca) in a.iter().enumerate().take(ahi).skip(alo) {
        for (j, cb) in b.iter().enumerate().take(bhi).skip(blo) {
            let col = j - blo + 1;
            cur[col] = if ca == cb { prev[col - 1] + 1 } else { 0 };
            let k = cur[col];
            if k > best_k {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_k = k;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    (best_i, best_j, best_k)
}

/// Best unused catalogue entry for a hint, with its similarity.
///
/// Ties resolve to the lowest index.
pub fn best_match(
    hint: &str,
    catalogue: &[ArtworkRecord],
    used: &HashSet<usize>,
) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, artwork) in catalogue.iter().enumerate() {
        if used.contains(&idx) {
            continue;
        }
        let s = similarity(hint, &artwork.title);
        if best.is_none_or(|(_, b)| s > b) {
            best = Some((idx, s));
        }
    }
    best
}

/// Map a hint title onto one catalogue entry, or drop it.
///
/// The best unused entry is accepted only when its similarity reaches
/// `threshold`; an accepted index is marked used so no two hints share a
/// target.
pub fn resolve(
    hint: &str,
    catalogue: &[ArtworkRecord],
    used: &mut HashSet<usize>,
    threshold: f32,
) -> Option<usize> {
    let (idx, score) = best_match(hint, catalogue, used)?;
    if score >= threshold {
        tracing::debug!("Hint '{hint}' -> '{}' ({score:.3})", catalogue[idx].title);
        used.insert(idx);
        Some(idx)
    } else {
        tracing::debug!(
            "Hint '{hint}' dropped: best '{}' scored {score:.3} < {threshold}",
            catalogue[idx].title
        );
        None
    }
}
