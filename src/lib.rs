//! File comparison engine: text-mode line diff and binary-mode byte
//! diff, a feature-compatible reimplementation of the classic `fc`
//! utility's comparison core.
//!
//! The public surface is two entry points — [`compare_wide`] and
//! [`compare_utf8`] — plus the types needed to configure a comparison
//! and receive its results through a [`DiffSink`]. Everything else
//! (path canonicalization, content loading, line normalization, the
//! LCS engine, the resync filter, and the binary comparator) is an
//! internal collaborator; modules are `pub` for unit testing and
//! advanced embedding, not because callers are expected to reach past
//! the dispatcher.

pub mod binary;
pub mod config;
pub mod diff;
pub mod error;
pub mod lcs;
pub mod lines;
pub mod loader;
pub mod path;
pub mod resync;

use std::path::Path;

pub use config::{CompareConfig, Flags, Mode};
pub use diff::{DiffBlock, DiffKind, DiffSink, UserContext};
pub use error::{CompareError, CompareOutcome, CompareResult};
pub use lines::LineSequence;

use loader::Classification;

/// Primary entry point (spec.md §6, C8 Mode Dispatcher).
///
/// Canonicalizes both paths, resolves AUTO mode if configured, runs the
/// selected comparison branch, and reports every difference to `sink`
/// before returning the aggregate outcome. All transient state — line
/// sequences, fingerprint maps, LCS arrays — is freed when this
/// function returns, win or lose.
pub fn compare_wide(
    path_a: &Path,
    path_b: &Path,
    config: &CompareConfig,
    sink: &mut impl DiffSink,
) -> CompareResult<CompareOutcome> {
    let canonical_a = path::canonicalize(path_a)?;
    let canonical_b = path::canonicalize(path_b)?;

    match resolve_branch(config.mode, &canonical_a, &canonical_b)? {
        Branch::Text(variant) => run_text(&canonical_a, &canonical_b, variant, config, sink),
        Branch::Binary => run_binary(&canonical_a, &canonical_b, sink),
    }
}

/// Convenience wrapper over [`compare_wide`] for UTF-8 paths.
///
/// The source converts a UTF-8 path to the engine's native wide string
/// form and rejects invalid UTF-8 as `invalid-param`. In Rust, `&str`
/// is already a validated UTF-8 view, so that rejection path can never
/// trigger here — this wrapper exists purely for API-contract parity
/// with `compare_wide`, not because a validation step remains to run.
pub fn compare_utf8(
    path_a: &str,
    path_b: &str,
    config: &CompareConfig,
    sink: &mut impl DiffSink,
) -> CompareResult<CompareOutcome> {
    compare_wide(Path::new(path_a), Path::new(path_b), config, sink)
}

enum Branch {
    Text(lines::TextVariant),
    Binary,
}

fn resolve_branch(mode: Mode, path_a: &Path, path_b: &Path) -> CompareResult<Branch> {
    Ok(match mode {
        Mode::TextAscii => Branch::Text(lines::TextVariant::Ascii),
        Mode::TextUnicode => Branch::Text(lines::TextVariant::Unicode),
        Mode::Binary => Branch::Binary,
        Mode::Auto => {
            let class_a = loader::classify_file(path_a)?;
            let class_b = loader::classify_file(path_b)?;
            if class_a == Classification::Text && class_b == Classification::Text {
                // AUTO never pins down ASCII vs Unicode folding; Unicode
                // is the safe superset (see lines::TextVariant).
                Branch::Text(lines::TextVariant::Unicode)
            } else {
                Branch::Binary
            }
        }
    })
}

fn run_text(
    path_a: &Path,
    path_b: &Path,
    variant: lines::TextVariant,
    config: &CompareConfig,
    sink: &mut impl DiffSink,
) -> CompareResult<CompareOutcome> {
    let bytes_a = loader::load(path_a)?;
    let bytes_b = loader::load(path_b)?;

    let seq_a = lines::extract(&bytes_a, variant, config.flags)?;
    let seq_b = lines::extract(&bytes_b, variant, config.flags)?;

    let (lcs_a, lcs_b) = lcs::longest_common_subsequence(&seq_a, &seq_b);
    let (filtered_a, filtered_b) = resync::filter(&lcs_a, &lcs_b, config.resync_lines);

    let context = UserContext {
        path_a,
        path_b,
        lines_a: Some(&seq_a),
        lines_b: Some(&seq_b),
    };

    let outcome = diff::emit_text_diff(
        &filtered_a,
        &filtered_b,
        seq_a.len(),
        seq_b.len(),
        &context,
        sink,
    );
    Ok(outcome)
}

fn run_binary(
    path_a: &Path,
    path_b: &Path,
    sink: &mut impl DiffSink,
) -> CompareResult<CompareOutcome> {
    let context = UserContext {
        path_a,
        path_b,
        lines_a: None,
        lines_b: None,
    };
    binary::compare(path_a, path_b, &context, sink)
}
