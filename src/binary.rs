//! Byte-level binary comparison via memory-mapped I/O (spec.md §4.7, C7).

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::diff::{DiffBlock, DiffKind, DiffSink, UserContext};
use crate::error::{CompareError, CompareOutcome, CompareResult};

/// Compare two files byte-for-byte.
///
/// A size mismatch is reported as a single `SizeMismatch` block and the
/// comparison stops there — there is no byte content to compare once
/// lengths disagree. Otherwise every differing offset is reported as
/// its own `BinaryChange` block; the callback may be invoked once per
/// differing byte.
pub fn compare(
    path_a: &Path,
    path_b: &Path,
    context: &UserContext<'_>,
    sink: &mut impl DiffSink,
) -> CompareResult<CompareOutcome> {
    let file_a = File::open(path_a).map_err(|e| CompareError::io(path_a, e))?;
    let file_b = File::open(path_b).map_err(|e| CompareError::io(path_b, e))?;

    let size_a = file_a
        .metadata()
        .map_err(|e| CompareError::io(path_a, e))?
        .len();
    let size_b = file_b
        .metadata()
        .map_err(|e| CompareError::io(path_b, e))?
        .len();

    if size_a != size_b {
        sink.emit(
            context,
            &DiffBlock {
                kind: DiffKind::SizeMismatch,
                start_a: size_a,
                end_a: 0,
                start_b: size_b,
                end_b: 0,
            },
        );
        return Ok(CompareOutcome::Different);
    }

    if size_a == 0 {
        return Ok(CompareOutcome::Identical);
    }

    // SAFETY: both files are opened read-only for the duration of this
    // call and are not concurrently truncated by this process; a
    // third-party truncation during the mapping is a platform-level
    // race the mmap crate itself cannot prevent.
    let map_a = unsafe { Mmap::map(&file_a) }.map_err(|e| CompareError::io(path_a, e))?;
    let map_b = unsafe { Mmap::map(&file_b) }.map_err(|e| CompareError::io(path_b, e))?;

    let mut emitted_any = false;
    for (offset, (&byte_a, &byte_b)) in map_a.iter().zip(map_b.iter()).enumerate() {
        if byte_a != byte_b {
            sink.emit(
                context,
                &DiffBlock {
                    kind: DiffKind::BinaryChange,
                    start_a: offset as u64,
                    end_a: byte_a as u64,
                    start_b: 0,
                    end_b: byte_b as u64,
                },
            );
            emitted_any = true;
        }
    }

    // Mapping drops here, unmapping both files before returning.
    if emitted_any {
        Ok(CompareOutcome::Different)
    } else {
        Ok(CompareOutcome::Identical)
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

    fn write_temp(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn identical_files_report_no_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(&dir, "a.bin", b"\x00\xff\x7f\x80");
        let b = write_temp(&dir, "b.bin", b"\x00\xff\x7f\x80");
        let context = ctx();
        let mut sink = |_: &UserContext<'_>, _: &DiffBlock| panic!("no block expected");
        let outcome = compare(&a, &b, &context, &mut sink).unwrap();
        assert_eq!(outcome, CompareOutcome::Identical);
    }

    #[test]
    fn single_byte_difference_reported_at_its_offset() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(&dir, "a.bin", &[0, 0xff, 0x7f, 0x80]);
        let b = write_temp(&dir, "b.bin", &[0, 0xff, 0x7e, 0x80]);
        let context = ctx();
        let mut blocks = Vec::new();
        let mut sink = |_: &UserContext<'_>, blk: &DiffBlock| blocks.push(*blk);
        let outcome = compare(&a, &b, &context, &mut sink).unwrap();
        assert_eq!(outcome, CompareOutcome::Different);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, DiffKind::BinaryChange);
        assert_eq!(blocks[0].start_a, 2);
        assert_eq!(blocks[0].end_a, 0x7f);
        assert_eq!(blocks[0].end_b, 0x7e);
    }

    #[test]
    fn size_mismatch_reported_once_with_both_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(&dir, "a.bin", &[1, 2, 3]);
        let b = write_temp(&dir, "b.bin", &[1, 2, 3, 4]);
        let context = ctx();
        let mut blocks = Vec::new();
        let mut sink = |_: &UserContext<'_>, blk: &DiffBlock| blocks.push(*blk);
        let outcome = compare(&a, &b, &context, &mut sink).unwrap();
        assert_eq!(outcome, CompareOutcome::Different);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, DiffKind::SizeMismatch);
        assert_eq!(blocks[0].start_a, 3);
        assert_eq!(blocks[0].start_b, 4);
    }

    #[test]
    fn empty_files_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_temp(&dir, "a.bin", b"");
        let b = write_temp(&dir, "b.bin", b"");
        let context = ctx();
        let mut sink = |_: &UserContext<'_>, _: &DiffBlock| panic!("no block expected");
        let outcome = compare(&a, &b, &context, &mut sink).unwrap();
        assert_eq!(outcome, CompareOutcome::Identical);
    }
}
