//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. Results go
//! to stdout; warnings and errors go to stderr.

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a completed step (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("✓ {}", message);
    }
}

/// Print a result line that must survive quiet mode (summaries, reports).
pub fn always(message: impl Display) {
    println!("{}", message);
}

/// Format rows as a two-column table with a header rule.
///
/// ```
/// use sysml_v2::ui::output::format_table;
///
/// let table = format_table(("File", "Error"), &[("a.sysml".into(), "bad".into())]);
/// assert_eq!(table, "File     Error\n-------  -----\na.sysml  bad");
/// ```
pub fn format_table(header: (&str, &str), rows: &[(String, String)]) -> String {
    let width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .chain(std::iter::once(header.0.chars().count()))
        .max()
        .unwrap_or(0);
    let right_width = rows
        .iter()
        .map(|(_, right)| right.lines().map(|l| l.chars().count()).max().unwrap_or(0))
        .chain(std::iter::once(header.1.chars().count()))
        .max()
        .unwrap_or(0);

    let mut lines = vec![
        format!("{:<width$}  {}", header.0, header.1, width = width),
        format!("{}  {}", "-".repeat(width), "-".repeat(right_width)),
    ];

    for (left, right) in rows {
        let mut right_lines = right.lines();
        let first = right_lines.next().unwrap_or_default();
        lines.push(format!("{:<width$}  {}", left, first, width = width));
        for continuation in right_lines {
            lines.push(format!("{:<width$}  {}", "", continuation, width = width));
        }
    }

    lines
        .into_iter()
        .map(|l| l.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
