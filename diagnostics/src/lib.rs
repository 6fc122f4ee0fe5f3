//! Diagnostics shared by the tools that inspect syntax trees.
//!
//! A [`Diagnostic`] is plain data: a stable code, a severity, a message, an
//! optional primary span and any number of secondary labels and notes. The
//! [`render`] module turns one into text, either as a source snippet with
//! carets or as a single `line:column` line.
//!
//! ```
//! use diagnostics::render::render_diagnostic;
//! use diagnostics::render::SourceFile;
//! use diagnostics::Diagnostic;
//! use diagnostics::FileId;
//! use diagnostics::Span;
//! use diagnostics::TextRange;
//!
//! let source = SourceFile {
//!   name: "example.js",
//!   text: "let x = 1;",
//! };
//! let diag = Diagnostic::error(
//!   "TEST0001",
//!   "an example error",
//!   Span::new(FileId(0), TextRange::new(4, 5)),
//! );
//!
//! let rendered = render_diagnostic(&source, &diag);
//! assert!(rendered.contains("TEST0001"));
//! assert!(rendered.contains("--> example.js:1:5"));
//! ```

pub mod render;

use ast_js::loc::Loc;
use std::fmt::Display;
use std::fmt::Formatter;

/// A stable identifier for a file in a program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct FileId(pub u32);

/// A byte range in a file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TextRange {
  pub start: u32,
  pub end: u32,
}

impl TextRange {
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  pub fn len(&self) -> u32 {
    self.end.saturating_sub(self.start)
  }

  pub fn is_empty(&self) -> bool {
    self.start >= self.end
  }

  pub fn to_loc(self) -> Loc {
    Loc(self.start as usize, self.end as usize)
  }

  /// Converts a node location, saturating offsets that do not fit in `u32`
  /// and returning a note describing the truncation if any occurred.
  pub fn from_loc_with_overflow_note(loc: Loc) -> (Self, Option<String>) {
    let (start, start_overflow) = saturating_to_u32(loc.0);
    let (end, end_overflow) = saturating_to_u32(loc.1);
    let note = (start_overflow || end_overflow).then(|| {
      format!(
        "byte offsets truncated to fit u32 (start={}, end={})",
        loc.0, loc.1
      )
    });
    (Self { start, end }, note)
  }
}

impl From<Loc> for TextRange {
  /// Saturates to `u32`. Use [`TextRange::from_loc_with_overflow_note`] to
  /// surface truncation.
  fn from(value: Loc) -> Self {
    TextRange::from_loc_with_overflow_note(value).0
  }
}

/// A range in a specific file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Span {
  pub file: FileId,
  pub range: TextRange,
}

impl Span {
  pub const fn new(file: FileId, range: TextRange) -> Self {
    Self { file, range }
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Severity {
  Error,
  Warning,
  Note,
  Help,
}

impl Severity {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
      Severity::Note => "note",
      Severity::Help => "help",
    }
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A highlighted range with its own message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
  pub span: Span,
  pub message: String,
  pub is_primary: bool,
}

impl Label {
  pub fn new(span: Span, message: impl Into<String>, is_primary: bool) -> Self {
    Self {
      span,
      message: message.into(),
      is_primary,
    }
  }

  pub fn primary(span: Span, message: impl Into<String>) -> Self {
    Self::new(span, message, true)
  }

  pub fn secondary(span: Span, message: impl Into<String>) -> Self {
    Self::new(span, message, false)
  }
}

/// A user-facing diagnostic.
///
/// `primary` is `None` when the subject has no place in any source text, for
/// example a node a tool synthesized. Such a diagnostic still renders, just
/// without a snippet or position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub code: &'static str,
  pub severity: Severity,
  pub message: String,
  pub primary: Option<Span>,
  pub labels: Vec<Label>,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(
    severity: Severity,
    code: &'static str,
    message: impl Into<String>,
    primary: Option<Span>,
  ) -> Self {
    Self {
      code,
      severity,
      message: message.into(),
      primary,
      labels: Vec::new(),
      notes: Vec::new(),
    }
  }

  pub fn error(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Error, code, message, Some(primary))
  }

  pub fn warning(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Warning, code, message, Some(primary))
  }

  /// An error about something with no source position.
  pub fn unplaced_error(code: &'static str, message: impl Into<String>) -> Self {
    Self::new(Severity::Error, code, message, None)
  }

  pub fn with_label(mut self, label: Label) -> Self {
    self.labels.push(label);
    self
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.notes.push(note.into());
    self
  }
}

/// Orders diagnostics by file and position, then code and message. Unplaced
/// diagnostics come first.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
  diagnostics.sort_by(|a, b| {
    let key = |d: &Diagnostic| d.primary.map(|s| (s.file, s.range.start, s.range.end));
    key(a)
      .cmp(&key(b))
      .then(a.code.cmp(b.code))
      .then(a.message.cmp(&b.message))
  });
}

fn saturating_to_u32(value: usize) -> (u32, bool) {
  match u32::try_from(value) {
    Ok(v) => (v, false),
    Err(_) => (u32::MAX, true),
  }
}
