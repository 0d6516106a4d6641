//! `fccmp` — command-line front end for the file comparison engine.
//!
//! Parses the classic `fc`-style option set (`/B /L /U /C /W /N /T`,
//! `/<n>`, `/LB<n>`, plus their `-`-prefixed equivalents), runs the
//! comparison, prints a plain-text rendering of each difference block,
//! and maps the outcome onto the historical exit-code contract.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use fccmp::{
    compare_wide, CompareConfig, CompareError, CompareOutcome, DiffBlock, DiffKind, Flags, Mode,
    UserContext,
};

/// `fccmp [options] path_a path_b`
#[derive(Parser)]
#[command(name = "fccmp", author, version, about, long_about = None)]
struct Cli {
    /// Force binary (byte-for-byte) comparison.
    #[arg(short = 'b', long)]
    binary: bool,

    /// Force text comparison with ASCII case folding.
    #[arg(short = 'l', long)]
    ascii: bool,

    /// Force text comparison with Unicode-aware case folding.
    #[arg(short = 'u', long)]
    unicode: bool,

    /// Ignore case when comparing lines.
    #[arg(short = 'c', long)]
    ignore_case: bool,

    /// Ignore spaces and tabs when comparing lines.
    #[arg(short = 'w', long)]
    ignore_whitespace: bool,

    /// Ask the front end to display line numbers (advisory, no effect
    /// on which differences are found).
    #[arg(short = 'n', long = "line-numbers")]
    line_numbers: bool,

    /// Do not expand tabs to four spaces before comparing.
    #[arg(short = 't', long = "raw-tabs")]
    raw_tabs: bool,

    /// Minimum run of matching lines treated as a resync point.
    #[arg(short = 'r', long = "resync", value_name = "N", default_value_t = 2)]
    resync_lines: u32,

    /// Advisory line-buffer capacity hint.
    #[arg(long = "lb", value_name = "N", default_value_t = 100)]
    buffer_lines: usize,

    /// First file to compare.
    path_a: PathBuf,

    /// Second file to compare.
    path_b: PathBuf,
}

/// DOS-style `/flag` tokens are rewritten into the `-`/`--` form `Cli`
/// understands before clap ever sees them. Grounded in the option map
/// the original `fc.c` builds by hand (`g_OptionMap`): a single switch
/// statement over the character following `/`, plus special-cased
/// numeric and `LB` forms.
fn normalize_dos_args(raw: &[String]) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(raw.len());
    for arg in raw {
        let Some(rest) = arg.strip_prefix('/') else {
            out.push(arg.clone());
            continue;
        };

        let upper = rest.to_ascii_uppercase();
        match upper.as_str() {
            "B" => out.push("--binary".to_string()),
            "L" => out.push("--ascii".to_string()),
            "U" => out.push("--unicode".to_string()),
            "C" => out.push("--ignore-case".to_string()),
            "W" => out.push("--ignore-whitespace".to_string()),
            "N" => out.push("--line-numbers".to_string()),
            "T" => out.push("--raw-tabs".to_string()),
            _ if upper.starts_with("LB") && upper[2..].chars().all(|c| c.is_ascii_digit()) => {
                out.push("--lb".to_string());
                out.push(upper[2..].to_string());
            }
            _ if !upper.is_empty() && upper.chars().all(|c| c.is_ascii_digit()) => {
                out.push("--resync".to_string());
                out.push(upper);
            }
            _ => bail!("unrecognized option '/{rest}'"),
        }
    }
    Ok(out)
}

fn resolve_mode(cli: &Cli) -> Result<Mode> {
    match (cli.binary, cli.ascii, cli.unicode) {
        (false, false, false) => Ok(Mode::Auto),
        (true, false, false) => Ok(Mode::Binary),
        (false, true, false) => Ok(Mode::TextAscii),
        (false, false, true) => Ok(Mode::TextUnicode),
        _ => bail!("only one of /B, /L, /U may be given"),
    }
}

fn print_block(context: &UserContext<'_>, block: &DiffBlock, show_line_numbers: bool) {
    match block.kind {
        DiffKind::Change | DiffKind::Add | DiffKind::Delete => {
            print_text_block(context, block, show_line_numbers)
        }
        DiffKind::SizeMismatch => {
            println!(
                "files are different sizes: {} is {} bytes, {} is {} bytes",
                context.path_a.display(),
                block.start_a,
                context.path_b.display(),
                block.start_b
            );
        }
        DiffKind::BinaryChange => {
            println!(
                "offset {:#x}: {:#04x} != {:#04x}",
                block.start_a, block.end_a, block.end_b
            );
        }
    }
}

fn print_text_block(context: &UserContext<'_>, block: &DiffBlock, show_line_numbers: bool) {
    let label = match block.kind {
        DiffKind::Add => "add",
        DiffKind::Delete => "delete",
        DiffKind::Change => "change",
        _ => unreachable!(),
    };
    println!(
        "***** {} ({}) [{},{}) -> ({}) [{},{})",
        label,
        context.path_a.display(),
        block.start_a,
        block.end_a,
        context.path_b.display(),
        block.start_b,
        block.end_b
    );
    if block.kind != DiffKind::Add {
        if let Some(lines) = context.lines_a {
            for index in block.start_a as usize..block.end_a as usize {
                print_side_line('<', index, lines, show_line_numbers);
            }
        }
    }
    if block.kind != DiffKind::Delete {
        if let Some(lines) = context.lines_b {
            for index in block.start_b as usize..block.end_b as usize {
                print_side_line('>', index, lines, show_line_numbers);
            }
        }
    }
}

fn print_side_line(marker: char, index: usize, lines: &fccmp::LineSequence, show_line_numbers: bool) {
    let Some(line) = lines.get(index) else {
        return;
    };
    let text = String::from_utf8_lossy(&line.text);
    if show_line_numbers {
        println!("{marker} {}: {text}", index + 1);
    } else {
        println!("{marker} {text}");
    }
}

fn run() -> Result<ExitCode> {
    let raw: Vec<String> = std::env::args().collect();
    let normalized = normalize_dos_args(&raw[1..])?;
    let mut full = Vec::with_capacity(normalized.len() + 1);
    full.push(raw[0].clone());
    full.extend(normalized);

    let cli = Cli::try_parse_from(full).context("usage")?;
    let mode = resolve_mode(&cli)?;

    let config = CompareConfig {
        mode,
        flags: Flags {
            ignore_case: cli.ignore_case,
            ignore_whitespace: cli.ignore_whitespace,
            show_line_numbers: cli.line_numbers,
            raw_tabs: cli.raw_tabs,
        },
        resync_lines: cli.resync_lines,
        buffer_lines: cli.buffer_lines,
    };

    let show_line_numbers = cli.line_numbers;
    let mut sink = |context: &UserContext<'_>, block: &DiffBlock| {
        print_block(context, block, show_line_numbers)
    };

    match compare_wide(&cli.path_a, &cli.path_b, &config, &mut sink) {
        Ok(CompareOutcome::Identical) => Ok(ExitCode::from(0)),
        Ok(CompareOutcome::Different) => Ok(ExitCode::from(1)),
        Err(CompareError::InvalidParam(reason)) => {
            eprintln!("fccmp: {reason}");
            Ok(ExitCode::from(255)) // historical -1, truncated to u8
        }
        Err(other) => {
            eprintln!("fccmp: {other}");
            Ok(ExitCode::from(2))
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("fccmp: {err:#}");
            ExitCode::from(255)
        }
    }
}
