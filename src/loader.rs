//! Content loader and encoding classifier (spec.md §4.2, C2).

use std::path::Path;

use crate::error::{CompareError, CompareResult};

/// Addressable-limit cutoff for a single file. Files larger than this
/// surface as `CompareError::Memory` rather than being partially read.
const MAX_COMPARABLE_FILE_SIZE: u64 = 1 << 40; // 1 TiB

/// Number of leading bytes inspected by `classify`.
const CLASSIFY_PREFIX_LEN: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Text,
    Binary,
}

/// Read an entire file into memory.
///
/// A zero-length file yields an empty buffer, not an error. Oversize
/// files surface as `CompareError::Memory`; open/read failures surface
/// as `CompareError::Io`.
pub fn load(path: &Path) -> CompareResult<Vec<u8>> {
    let metadata = std::fs::metadata(path).map_err(|e| CompareError::io(path, e))?;
    let size = metadata.len();
    if size > MAX_COMPARABLE_FILE_SIZE {
        return Err(CompareError::memory(format!(
            "'{}' is {size} bytes, exceeds the {MAX_COMPARABLE_FILE_SIZE} byte addressable limit",
            path.display()
        )));
    }
    std::fs::read(path).map_err(|e| CompareError::io(path, e))
}

/// Classify a buffer as text or binary using a leading 4 KiB prefix.
///
/// Used only in `Mode::Auto`. A BOM at the start of the prefix forces
/// text; otherwise the prefix is scanned for a ratio of printable-ASCII
/// plus tab/CR/LF bytes, any NUL byte forcing binary outright.
pub fn classify(bytes: &[u8]) -> Classification {
    let prefix = &bytes[..bytes.len().min(CLASSIFY_PREFIX_LEN)];

    if has_utf_bom(prefix) {
        return Classification::Text;
    }
    if prefix.is_empty() {
        return Classification::Text;
    }

    let mut countable = 0usize;
    for &b in prefix {
        if b == 0 {
            return Classification::Binary;
        }
        if (32..=126).contains(&b) || matches!(b, b'\t' | b'\r' | b'\n') {
            countable += 1;
        }
    }

    let ratio = countable as f64 / prefix.len() as f64;
    if ratio >= 0.90 {
        Classification::Text
    } else {
        Classification::Binary
    }
}

/// Both files must classify as text for the text branch to be chosen
/// (spec.md §4.2 point 3).
pub fn both_text(a: &[u8], b: &[u8]) -> bool {
    classify(a) == Classification::Text && classify(b) == Classification::Text
}

/// Classify a file from disk without materializing it in full: only the
/// leading 4 KiB prefix `classify` actually inspects is read. Used by
/// the AUTO-mode dispatcher so a binary-bound file never gets loaded
/// whole just to decide which branch to take.
pub fn classify_file(path: &Path) -> CompareResult<Classification> {
    use std::io::Read;
    let mut file = std::fs::File::open(path).map_err(|e| CompareError::io(path, e))?;
    let mut buf = vec![0u8; CLASSIFY_PREFIX_LEN];
    let read = file.read(&mut buf).map_err(|e| CompareError::io(path, e))?;
    buf.truncate(read);
    Ok(classify(&buf))
}

fn has_utf_bom(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0xEF, 0xBB, 0xBF])
        || bytes.starts_with(&[0xFF, 0xFE])
        || bytes.starts_with(&[0xFE, 0xFF])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_utf8_bom_as_text() {
        let mut buf = vec![0xEF, 0xBB, 0xBF];
        buf.extend_from_slice(b"hello\n");
        assert_eq!(classify(&buf), Classification::Text);
    }

    #[test]
    fn classifies_utf16_bom_as_text() {
        assert_eq!(classify(&[0xFF, 0xFE, b'h', 0]), Classification::Text);
        assert_eq!(classify(&[0xFE, 0xFF, 0, b'h']), Classification::Text);
    }

    #[test]
    fn nul_byte_forces_binary() {
        assert_eq!(classify(&[b'a', 0, b'b']), Classification::Binary);
    }

    #[test]
    fn mostly_printable_is_text() {
        let text = b"the quick brown fox\njumps over\tthe lazy dog\r\n".to_vec();
        assert_eq!(classify(&text), Classification::Text);
    }

    #[test]
    fn mostly_nonprintable_is_binary() {
        let bytes: Vec<u8> = (0u8..=200).step_by(2).collect();
        assert_eq!(classify(&bytes), Classification::Binary);
    }

    #[test]
    fn empty_buffer_classifies_as_text() {
        assert_eq!(classify(&[]), Classification::Text);
    }

    #[test]
    fn empty_file_loads_as_empty_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, b"").unwrap();
        let bytes = load(&path).unwrap();
        assert!(bytes.is_empty());
    }
}
