use serde::Serialize;
use std::cmp::{max, min};
use std::ops::{Add, AddAssign};

/// A location within the current source file expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn add_option(self, rhs: Option<Loc>) -> Loc {
    let mut new = self;
    if let Some(rhs) = rhs {
      new.extend(rhs);
    };
    new
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

/// A resolved region of original source text.
///
/// Offsets are UTF-8 byte offsets. Lines and columns are zero-based, and
/// columns count UTF-16 code units so they can be written into source maps
/// directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct SourceSpan {
  pub start: usize,
  pub end: usize,
  pub start_line: u32,
  pub start_column: u32,
  pub end_line: u32,
  pub end_column: u32,
}

/// Resolves node locations to source spans.
///
/// Returning `None` is always allowed: a node may have been synthesized, or the
/// location may not belong to the source this resolver knows about.
pub trait LocationOf {
  fn location_of(&self, loc: Loc) -> Option<SourceSpan>;
}

/// Line start table over a source text.
#[derive(Clone, Debug)]
pub struct LineIndex<'a> {
  text: &'a str,
  line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
  pub fn new(text: &'a str) -> LineIndex<'a> {
    let bytes = text.as_bytes();
    let mut line_starts = vec![0];
    let mut i = 0;
    while i < bytes.len() {
      match bytes[i] {
        b'\n' => line_starts.push(i + 1),
        b'\r' => {
          if bytes.get(i + 1) == Some(&b'\n') {
            i += 1;
          }
          line_starts.push(i + 1);
        }
        // U+2028 and U+2029 are line terminators too (E2 80 A8 / E2 80 A9).
        0xE2 if bytes.get(i + 1) == Some(&0x80) && matches!(bytes.get(i + 2).copied(), Some(0xA8 | 0xA9)) => {
          i += 2;
          line_starts.push(i + 1);
        }
        _ => {}
      };
      i += 1;
    }
    LineIndex { text, line_starts }
  }

  pub fn text(&self) -> &'a str {
    self.text
  }

  pub fn line_count(&self) -> usize {
    self.line_starts.len()
  }

  /// Zero-based line and UTF-16 column of a byte offset, or `None` if the offset
  /// is outside the text or not on a character boundary.
  pub fn line_col(&self, offset: usize) -> Option<(u32, u32)> {
    if offset > self.text.len() || !self.text.is_char_boundary(offset) {
      return None;
    }
    let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
    let line_start = self.line_starts[line];
    let column = self.text[line_start..offset].encode_utf16().count();
    Some((line as u32, column as u32))
  }
}

impl LocationOf for LineIndex<'_> {
  fn location_of(&self, loc: Loc) -> Option<SourceSpan> {
    if loc.0 > loc.1 {
      return None;
    }
    let (start_line, start_column) = self.line_col(loc.0)?;
    let (end_line, end_column) = self.line_col(loc.1)?;
    Some(SourceSpan {
      start: loc.0,
      end: loc.1,
      start_line,
      start_column,
      end_line,
      end_column,
    })
  }
}
