//! Resync filter: drop short coincidental matches from the LCS (spec.md §4.5, C5).

/// Keep only maximal runs of consecutive `(a, b)` pairs whose length is
/// at least `resync_lines`. `resync_lines <= 1` is the identity: every
/// run, even length 1, already satisfies the threshold.
pub fn filter(lcs_a: &[usize], lcs_b: &[usize], resync_lines: u32) -> (Vec<usize>, Vec<usize>) {
    if resync_lines <= 1 || lcs_a.is_empty() {
        return (lcs_a.to_vec(), lcs_b.to_vec());
    }

    let min_run = resync_lines as usize;
    let mut kept_a = Vec::with_capacity(lcs_a.len());
    let mut kept_b = Vec::with_capacity(lcs_b.len());

    let mut run_start = 0usize;
    let mut i = 1usize;
    while i <= lcs_a.len() {
        let breaks = i == lcs_a.len()
            || lcs_a[i] != lcs_a[i - 1] + 1
            || lcs_b[i] != lcs_b[i - 1] + 1;
        if breaks {
            let run_len = i - run_start;
            if run_len >= min_run {
                kept_a.extend_from_slice(&lcs_a[run_start..i]);
                kept_b.extend_from_slice(&lcs_b[run_start..i]);
            }
            run_start = i;
        }
        i += 1;
    }

    (kept_a, kept_b)
}
