//! Terminal Emitter
//!
//! Human-readable reports with optional ANSI colors:
//!
//! ```text
//! (file) semantic error: main.wpp:3:1 => function not found
//!   3 | greet("bob", "x")
//!     | ⤷ attempting to invoke function 'greet' which is undefined
//!   hint: are you passing the correct number of arguments?
//! ```

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use wpp_ir::{Source, SourceMap, SourceMode, Span};

use crate::{Diagnostic, ReportKind, Severity};

use super::{ColorMode, DiagnosticEmitter};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[31m";
    pub const WARNING: &str = "\x1b[34m";
    pub const NOTE: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const HINT: &str = "\x1b[1;33m";
    pub const RESET: &str = "\x1b[0m";
}

const INDENT: &str = "  ";

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    /// Print each report on a single line.
    inline: bool,
    /// Paths are printed relative to this directory when possible.
    root: PathBuf,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            inline: false,
            root: PathBuf::new(),
        }
    }

    /// Switch to the compact single-line form.
    #[must_use]
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Directory that printed paths are made relative to.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Consume the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&self, out: &mut String, text: &str, color: &str) {
        if self.colors {
            let _ = write!(out, "{color}{text}{}", colors::RESET);
        } else {
            out.push_str(text);
        }
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        }
    }

    /// Render a diagnostic to a string.
    pub fn render(&self, diag: &Diagnostic, sources: &SourceMap) -> String {
        let mut out = String::new();
        let color = Self::severity_color(diag.severity);

        let Some((source_id, span)) = diag.location else {
            self.paint(&mut out, &diag.severity.to_string(), color);
            out.push_str(": ");
            self.paint(&mut out, &diag.overview, colors::BOLD);
            out.push('\n');
            return out;
        };
        let source = sources.get(source_id);

        let _ = write!(out, "({}) ", source.mode);
        self.paint(&mut out, &format!("{} {}", diag.kind, diag.severity), color);
        if source.mode != SourceMode::Repl {
            let _ = write!(
                out,
                ": {}:{}",
                relative(&source.path, &self.root).display(),
                position(source, span, diag.kind)
            );
        }
        out.push_str(" => ");
        self.paint(&mut out, &diag.overview, colors::BOLD);

        if self.inline {
            if !diag.detail.is_empty() {
                let _ = write!(out, " ({})", diag.detail);
            }
            out.push('\n');
            return out;
        }

        out.push('\n');
        self.snippet(&mut out, diag, source, span, color);

        if let Some(hint) = &diag.hint {
            out.push_str(INDENT);
            self.paint(&mut out, "hint: ", colors::HINT);
            out.push_str(hint);
            out.push('\n');
        }

        out.push('\n');
        out
    }

    /// The source line with an arrow under the offending position.
    fn snippet(&self, out: &mut String, diag: &Diagnostic, source: &Source, span: Span, color: &str) {
        let offset = span.start;

        if source.is_eof(offset) {
            let gutter = if source.mode == SourceMode::Repl {
                String::new()
            } else {
                "(eof)".to_owned()
            };
            let _ = writeln!(out, "{INDENT}{gutter} | {}", diag.detail);
            return;
        }

        if diag.kind == ReportKind::Utf8 {
            let _ = writeln!(out, "{INDENT}{offset}(byte) | {}", diag.detail);
            return;
        }

        let bounds = source.line_bounds(offset);
        let line = &source.text[bounds.clone()];
        let lead = line.iter().take_while(|b| b.is_ascii_whitespace()).count();
        let trail = line.iter().rev().take_while(|b| b.is_ascii_whitespace()).count();
        let trimmed = &line[lead..line.len() - trail.min(line.len() - lead)];

        let text_start = bounds.start + lead;
        let arrow_col = source.text[text_start..(offset as usize).max(text_start)]
            .iter()
            .filter(|&&b| (b & 0xC0) != 0x80)
            .count();

        let gutter = format!("{INDENT}{}", source.location(offset).line);
        let _ = writeln!(out, "{gutter} | {}", String::from_utf8_lossy(trimmed));
        let _ = write!(out, "{} | {}", " ".repeat(gutter.len()), " ".repeat(arrow_col));
        self.paint(out, "⤷ ", color);
        out.push_str(&diag.detail);
        out.push('\n');
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic, sources: &SourceMap) {
        let text = self.render(diagnostic, sources);
        let _ = self.writer.write_all(text.as_bytes());
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

/// `path` relative to `root`, or `path` itself when it is not below `root`.
fn relative<'p>(path: &'p Path, root: &Path) -> &'p Path {
    if root.as_os_str().is_empty() {
        return path;
    }
    path.strip_prefix(root).unwrap_or(path)
}

/// `line:col`, `eof`, or `N(byte)` for UTF-8 reports.
fn position(source: &Source, span: Span, kind: ReportKind) -> String {
    if kind == ReportKind::Utf8 {
        return format!("{}(byte)", span.start);
    }
    if source.is_eof(span.start) {
        return "eof".to_owned();
    }
    let loc = source.location(span.start);
    format!("{}:{}", loc.line, loc.column)
}
