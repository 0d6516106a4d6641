//! Longest common subsequence engine (spec.md §4.4, C4).
//!
//! Hunt–McIlroy with patience-style threshold search: `O((|A| + M) log |A|)`
//! where `M` is the number of fingerprint matches between the two files.

use std::collections::HashMap;

use crate::lines::LineSequence;

/// Sentinel for "no predecessor" in the threshold chain.
const NONE_B: i64 = -1;

/// Compute the LCS of `a` and `b` keyed by line fingerprint.
///
/// Returns parallel index vectors `(lcs_a, lcs_b)`: `lcs_a[i]` and
/// `lcs_b[i]` are a matched pair, and both vectors are strictly
/// ascending. Ties are broken toward the lexicographically smallest
/// sequence of `b`-indices, per the threshold-array construction below.
pub fn longest_common_subsequence(a: &LineSequence, b: &LineSequence) -> (Vec<usize>, Vec<usize>) {
    let n = a.len();
    if n == 0 || b.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let fingerprint_map = build_fingerprint_map(b);

    // thresholds[k] = smallest b-index ending any discovered length-k
    // common subsequence. thresholds[0] is the sentinel "before the
    // start"; unset slots are +infinity.
    let mut thresholds: Vec<i64> = vec![i64::MAX; n + 1];
    thresholds[0] = NONE_B;

    // predecessor_a[i]: the threshold value (a b-index, or the sentinel)
    // that this A-line extended a chain from, when it caused an update.
    let mut predecessor_a: Vec<i64> = vec![NONE_B; n];

    // Reverse lookup from a threshold's b-value back to the A-index
    // that most recently set it — equivalent to "largest a with
    // predecessor_b[a] == b" from the traceback rule, built on the fly
    // instead of scanned for at traceback time.
    let mut b_to_a: HashMap<i64, usize> = HashMap::new();

    let mut lcs_len: usize = 0;

    for i in 0..n {
        let Some(candidates) = fingerprint_map.get(&a.lines[i].fingerprint) else {
            continue;
        };
        for &b_index in candidates {
            let b_val = b_index as i64;
            let k = threshold_search(&thresholds, lcs_len, b_val);
            if b_val < thresholds[k] {
                predecessor_a[i] = thresholds[k - 1];
                thresholds[k] = b_val;
                b_to_a.insert(b_val, i);
                if k > lcs_len {
                    lcs_len = k;
                }
            }
        }
    }

    if lcs_len == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut pairs = Vec::with_capacity(lcs_len);
    let mut cur_b = thresholds[lcs_len];
    while cur_b != NONE_B {
        let a_index = b_to_a[&cur_b];
        pairs.push((a_index, cur_b as usize));
        cur_b = predecessor_a[a_index];
    }
    pairs.reverse();

    let lcs_a = pairs.iter().map(|&(a, _)| a).collect();
    let lcs_b = pairs.iter().map(|&(_, b)| b).collect();
    (lcs_a, lcs_b)
}

/// fingerprint → positions in B holding it, ascending.
fn build_fingerprint_map(b: &LineSequence) -> HashMap<u32, Vec<usize>> {
    let mut map: HashMap<u32, Vec<usize>> = HashMap::new();
    for (index, line) in b.lines.iter().enumerate() {
        map.entry(line.fingerprint).or_default().push(index);
    }
    map
}

/// Smallest `k` in `1..=lcs_len + 1` with `thresholds[k] >= target`.
/// `thresholds[lcs_len + 1]` is always +infinity, so this always finds a
/// slot, extending the chain length by one when no shorter chain fits.
fn threshold_search(thresholds: &[i64], lcs_len: usize, target: i64) -> usize {
    let mut lo = 1usize;
    let mut hi = lcs_len + 1;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if thresholds[mid] >= target {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}
