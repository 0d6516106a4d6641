//! Comparison configuration (spec.md §3 "Config").

/// Comparison mode selection.
///
/// Mirrors the `/B`, `/L`, `/U` flags of the classic tool, plus the
/// auto-detect default chosen in spec.md §9 (the richer, later source
/// variant defaults to auto rather than ASCII text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// Auto-detect text vs binary per file (spec.md §4.2).
    #[default]
    Auto,
    /// Force line-based comparison, ASCII case folding.
    TextAscii,
    /// Force line-based comparison, Unicode-aware case folding.
    TextUnicode,
    /// Force byte-for-byte comparison via memory-mapped I/O.
    Binary,
}

/// Normalization/behavior flags (spec.md §3 "flags").
///
/// Individual `bool` fields, not a bitflags type: this mirrors how the
/// teacher represents a small, fixed option set (`NormalizationOptions`
/// in `compare_it::types`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Flags {
    /// Fold case when fingerprinting lines.
    pub ignore_case: bool,
    /// Strip spaces/tabs before fingerprinting; drop lines left empty.
    pub ignore_whitespace: bool,
    /// Advisory: ask the front end to show line numbers. The engine
    /// itself does not format output, so this has no effect on the
    /// emitted `DiffBlock`s.
    pub show_line_numbers: bool,
    /// Do not expand tabs to four spaces before comparing.
    pub raw_tabs: bool,
}

/// Configuration for a single comparison call (spec.md §3 "Config").
#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub mode: Mode,
    pub flags: Flags,
    /// Minimum run of consecutive matched lines considered a stable
    /// anchor (spec.md §4.5). Must be >= 1; `<= 1` makes the resync
    /// filter the identity transform.
    pub resync_lines: u32,
    /// Advisory capacity hint, kept for CLI-contract fidelity
    /// (`/LBn`); the engine does not preallocate based on it.
    pub buffer_lines: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            flags: Flags::default(),
            resync_lines: 2,
            buffer_lines: 100,
        }
    }
}
