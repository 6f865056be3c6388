//! Registry of every text the parser has seen during one run.
//!
//! Besides the input files this holds the strings re-parsed by `eval` and
//! the files pulled in by `use`, so a diagnostic can always be traced back
//! to the exact bytes it refers to.

use std::fmt;
use std::path::{Path, PathBuf};

/// Index into the [`SourceMap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct SourceId(u32);

impl SourceId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        SourceId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a source entered the run. Printed at the start of every report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceMode {
    /// An input file named on the command line.
    File,
    /// Text produced at run time and re-parsed by `eval` / `!`.
    Eval,
    /// A file pulled in by `use` / `source`.
    Source,
    /// One line typed at the REPL prompt.
    Repl,
}

impl SourceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceMode::File => "file",
            SourceMode::Eval => "eval",
            SourceMode::Source => "source",
            SourceMode::Repl => "repl",
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-based line and column (columns count characters, not bytes).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// One registered text.
#[derive(Clone, Debug)]
pub struct Source {
    /// File the text belongs to. `eval` sources inherit the path of the
    /// source that evaluated them.
    pub path: PathBuf,
    pub text: Vec<u8>,
    pub mode: SourceMode,
}

impl Source {
    /// Line and column of byte `offset`.
    pub fn location(&self, offset: u32) -> Location {
        let end = (offset as usize).min(self.text.len());
        let mut line = 1;
        let mut column = 1;
        let mut i = 0;

        while i < end {
            if self.text[i] == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
            i += utf8_width(self.text[i]);
        }

        Location { line, column }
    }

    /// Byte range of the line containing `offset`, without its newline.
    pub fn line_bounds(&self, offset: u32) -> std::ops::Range<usize> {
        let offset = (offset as usize).min(self.text.len());
        let start = self.text[..offset]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let end = self.text[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.text.len(), |i| offset + i);
        start..end
    }

    /// `true` when `offset` is at or past the end of the text.
    pub fn is_eof(&self, offset: u32) -> bool {
        offset as usize >= self.text.len()
    }
}

/// Width of the UTF-8 sequence introduced by `lead`; invalid leads count as one byte.
fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Append-only list of sources.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    sources: Vec<Source>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a text and return its id.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` sources are registered.
    pub fn add(&mut self, path: impl AsRef<Path>, text: Vec<u8>, mode: SourceMode) -> SourceId {
        let index = u32::try_from(self.sources.len())
            .unwrap_or_else(|_| panic!("source map exceeded u32::MAX sources"));
        self.sources.push(Source {
            path: path.as_ref().to_path_buf(),
            text,
            mode,
        });
        SourceId::new(index)
    }

    #[inline]
    pub fn get(&self, id: SourceId) -> &Source {
        &self.sources[id.index()]
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
