//! Difference blocks, the callback contract, and the LCS walk that
//! produces text-mode blocks (spec.md §3 "DiffBlock"/"UserContext",
//! §4.6, C6).

use std::path::Path;

use crate::error::CompareOutcome;
use crate::lines::LineSequence;

/// Kind of a reported difference (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Add,
    Delete,
    Change,
    SizeMismatch,
    BinaryChange,
}

/// A single reported difference.
///
/// In text modes, `start_a..end_a` and `start_b..end_b` are half-open
/// line-index ranges. In binary mode the fields are reused: for
/// `BinaryChange`, `start_a` holds the byte offset and `end_a`/`end_b`
/// hold the mismatching byte values; for `SizeMismatch`, `start_a` and
/// `start_b` hold the two file sizes and `end_a`/`end_b` are unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffBlock {
    pub kind: DiffKind,
    pub start_a: u64,
    pub end_a: u64,
    pub start_b: u64,
    pub end_b: u64,
}

/// Context passed to the callback alongside each `DiffBlock`.
///
/// `lines_a`/`lines_b` are `None` in binary mode. There is no
/// `user_data` field: a Rust closure captures its own state, so the
/// narrow-interface callback the source threads an opaque pointer
/// through collapses to an ordinary `FnMut` here (see `DESIGN.md`).
pub struct UserContext<'a> {
    pub path_a: &'a Path,
    pub path_b: &'a Path,
    pub lines_a: Option<&'a LineSequence>,
    pub lines_b: Option<&'a LineSequence>,
}

/// The callback contract (spec.md §6 "Callback contract").
///
/// Blanket-implemented for any `FnMut(&UserContext<'_>, &DiffBlock)`, so
/// callers normally just pass a closure rather than a named type.
pub trait DiffSink {
    fn emit(&mut self, context: &UserContext<'_>, block: &DiffBlock);
}

impl<F> DiffSink for F
where
    F: FnMut(&UserContext<'_>, &DiffBlock),
{
    fn emit(&mut self, context: &UserContext<'_>, block: &DiffBlock) {
        self(context, block)
    }
}

/// Walk the resync-filtered LCS and emit add/delete/change blocks
/// (spec.md §4.6).
pub fn emit_text_diff(
    lcs_a: &[usize],
    lcs_b: &[usize],
    len_a: usize,
    len_b: usize,
    context: &UserContext<'_>,
    sink: &mut impl DiffSink,
) -> CompareOutcome {
    debug_assert_eq!(lcs_a.len(), lcs_b.len());

    let mut cur_a = 0usize;
    let mut cur_b = 0usize;
    let mut emitted_any = false;
    let steps = lcs_a.len() + 1;

    for i in 0..steps {
        let anchor_a = lcs_a.get(i).copied().unwrap_or(len_a);
        let anchor_b = lcs_b.get(i).copied().unwrap_or(len_b);

        let kind = if cur_a < anchor_a && cur_b < anchor_b {
            Some(DiffKind::Change)
        } else if cur_a < anchor_a {
            Some(DiffKind::Delete)
        } else if cur_b < anchor_b {
            Some(DiffKind::Add)
        } else {
            None
        };

        if let Some(kind) = kind {
            sink.emit(
                context,
                &DiffBlock {
                    kind,
                    start_a: cur_a as u64,
                    end_a: anchor_a as u64,
                    start_b: cur_b as u64,
                    end_b: anchor_b as u64,
                },
            );
            emitted_any = true;
        }

        cur_a = anchor_a + 1;
        cur_b = anchor_b + 1;
    }

    if emitted_any {
        CompareOutcome::Different
    } else {
        CompareOutcome::Identical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn ctx<'a>() -> UserContext<'a> {
        UserContext {
            path_a: Path::new("a"),
            path_b: Path::new("b"),
            lines_a: None,
            lines_b: None,
        }
    }

    #[test]
    fn full_match_is_identical_with_no_blocks() {
        let context = ctx();
        let mut blocks = Vec::new();
        let mut sink = |_: &UserContext<'_>, b: &DiffBlock| blocks.push(*b);
        let outcome = emit_text_diff(&[0, 1, 2], &[0, 1, 2], 3, 3, &context, &mut sink);
        assert_eq!(outcome, CompareOutcome::Identical);
        assert!(blocks.is_empty());
    }

    #[test]
    fn middle_change_block() {
        let context = ctx();
        let mut blocks = Vec::new();
        let mut sink = |_: &UserContext<'_>, b: &DiffBlock| blocks.push(*b);
        // A = [L0, L1, L2], B = [L0, X, L2] -> lcs matches indices 0 and 2.
        let outcome = emit_text_diff(&[0, 2], &[0, 2], 3, 3, &context, &mut sink);
        assert_eq!(outcome, CompareOutcome::Different);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, DiffKind::Change);
        assert_eq!((blocks[0].start_a, blocks[0].end_a), (1, 2));
        assert_eq!((blocks[0].start_b, blocks[0].end_b), (1, 2));
    }

    #[test]
    fn pure_insertion_is_an_add_block() {
        let context = ctx();
        let mut blocks = Vec::new();
        let mut sink = |_: &UserContext<'_>, b: &DiffBlock| blocks.push(*b);
        let outcome = emit_text_diff(&[0], &[0], 1, 2, &context, &mut sink);
        assert_eq!(outcome, CompareOutcome::Different);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, DiffKind::Add);
        assert_eq!((blocks[0].start_b, blocks[0].end_b), (1, 2));
    }

    #[test]
    fn pure_deletion_is_a_delete_block() {
        let context = ctx();
        let mut blocks = Vec::new();
        let mut sink = |_: &UserContext<'_>, b: &DiffBlock| blocks.push(*b);
        let outcome = emit_text_diff(&[0], &[0], 2, 1, &context, &mut sink);
        assert_eq!(outcome, CompareOutcome::Different);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, DiffKind::Delete);
        assert_eq!((blocks[0].start_a, blocks[0].end_a), (1, 2));
    }

    #[test]
    fn empty_files_are_identical() {
        let context = ctx();
        let mut sink = |_: &UserContext<'_>, _: &DiffBlock| panic!("no block expected");
        let outcome = emit_text_diff(&[], &[], 0, 0, &context, &mut sink);
        assert_eq!(outcome, CompareOutcome::Identical);
    }
}
