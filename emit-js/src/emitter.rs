//! Boundary-aware text writer used when flattening fragments.
//!
//! Callers write whole tokens through the typed helpers ([`Emitter::write_keyword`],
//! [`Emitter::write_identifier`], [`Emitter::write_punct`], ...). The emitter
//! inserts the minimal whitespace needed to stop adjacent tokens from lexing
//! as something else (`returnx`, `a+++b`, `a--b`, `/a//b/`), and breaks up
//! accidental HTML-like comments (`<!--`, and `-->` at the start of a line).
//! Soft whitespace requested by the formatting policy goes through
//! [`Emitter::write_soft_space`] and [`Emitter::write_line`].

use crate::policy::FormatPolicy;
use ast_js::loc::Loc;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitErrorKind {
  /// The node has a shape that has no valid source rendering.
  Unsupported(&'static str),
  /// A child that the node's syntax requires is absent.
  MissingChild(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitError {
  pub kind: EmitErrorKind,
  /// Location of the innermost node that carried one.
  pub loc: Option<Loc>,
}

impl EmitError {
  pub(crate) fn unsupported(message: &'static str) -> Self {
    Self {
      kind: EmitErrorKind::Unsupported(message),
      loc: None,
    }
  }

  pub(crate) fn missing(child: &'static str) -> Self {
    Self {
      kind: EmitErrorKind::MissingChild(child),
      loc: None,
    }
  }

  pub(crate) fn with_loc(mut self, loc: Loc) -> Self {
    if self.loc.is_none() {
      self.loc = Some(loc);
    }
    self
  }
}

impl Display for EmitError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.kind {
      EmitErrorKind::Unsupported(msg) => write!(f, "cannot emit node: {msg}")?,
      EmitErrorKind::MissingChild(child) => write!(f, "node is missing its {child}")?,
    };
    if let Some(loc) = self.loc {
      write!(f, " at {}..{}", loc.0, loc.1)?;
    }
    Ok(())
  }
}

impl std::error::Error for EmitError {}

pub type EmitResult<T> = Result<T, EmitError>;

pub(crate) fn with_node_context<T>(loc: Loc, f: impl FnOnce() -> EmitResult<T>) -> EmitResult<T> {
  f().map_err(|err| err.with_loc(loc))
}

/// An output range recorded for a node location while flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawSpan {
  pub loc: Loc,
  pub start: usize,
  pub end: usize,
}

#[derive(Debug)]
pub struct Emitter<'p> {
  out: String,
  policy: &'p FormatPolicy,
  depth: usize,
  state: State,
  spans: Vec<RawSpan>,
  // Spans whose start is the next token written.
  pending: Vec<usize>,
}

#[derive(Debug, Clone, Copy)]
struct State {
  trailing: Boundary,
  line_start: LineStart,
}

impl Default for State {
  fn default() -> Self {
    State {
      trailing: Boundary::None,
      line_start: LineStart::Start,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
  None,
  Word,
  Number,
  Plus,
  PlusPlus,
  Minus,
  MinusMinus,
  Slash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leading {
  Word,
  Number,
  Plus,
  Minus,
  Slash,
  Star,
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
  Word,
  Number,
  Plus,
  PlusPlus,
  Minus,
  MinusMinus,
  Other,
}

/// Tracks whether the current line so far is only whitespace followed by
/// dashes, which is where `-->` opens a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStart {
  Start,
  Dash,
  DashDash,
  Other,
}

impl<'p> Emitter<'p> {
  pub fn new(policy: &'p FormatPolicy) -> Self {
    Emitter {
      out: String::new(),
      policy,
      depth: 0,
      state: State::default(),
      spans: Vec::new(),
      pending: Vec::new(),
    }
  }

  pub fn policy(&self) -> &FormatPolicy {
    self.policy
  }

  /// Byte length of the output so far.
  pub fn len(&self) -> usize {
    self.out.len()
  }

  pub fn is_empty(&self) -> bool {
    self.out.is_empty()
  }

  pub fn as_str(&self) -> &str {
    &self.out
  }

  pub fn into_string(self) -> String {
    self.out
  }

  pub fn write_keyword(&mut self, keyword: &str) {
    self.write_with_kind(keyword, Kind::Word);
  }

  pub fn write_identifier(&mut self, identifier: &str) {
    self.write_with_kind(identifier, Kind::Word);
  }

  pub fn write_number(&mut self, number: &str) {
    self.write_with_kind(number, Kind::Number);
  }

  pub fn write_punct(&mut self, punct: &str) {
    let kind = match punct {
      "+" => Kind::Plus,
      "++" => Kind::PlusPlus,
      "-" => Kind::Minus,
      "--" => Kind::MinusMinus,
      _ => Kind::Other,
    };
    self.write_with_kind(punct, kind);
  }

  /// Writes an opaque literal token (string, regex, template chunk); its
  /// boundaries are derived from its first and last bytes.
  pub fn write_literal(&mut self, text: &str) {
    self.write_with_kind(text, Kind::Other);
  }

  /// Space that the policy asked for; never required for correctness.
  pub fn write_soft_space(&mut self) {
    if self.policy.spaces {
      self.push_space();
    }
  }

  pub fn write_brace_space(&mut self) {
    if self.policy.brace_spacing {
      self.push_space();
    }
  }

  /// Line break followed by indentation at the current depth, if the policy
  /// uses newlines.
  pub fn write_line(&mut self) {
    if !self.policy.newlines {
      return;
    }
    self.out.push('\n');
    for _ in 0..self.depth {
      self.out.push_str(&self.policy.indent);
    }
    self.state = State::default();
  }

  pub fn indent(&mut self) {
    self.depth += 1;
  }

  pub fn dedent(&mut self) {
    self.depth = self.depth.saturating_sub(1);
  }

  pub(crate) fn open_span(&mut self, loc: Loc) -> usize {
    let idx = self.spans.len();
    self.spans.push(RawSpan {
      loc,
      start: self.out.len(),
      end: self.out.len(),
    });
    self.pending.push(idx);
    idx
  }

  pub(crate) fn close_span(&mut self, idx: usize) {
    // A span that wrote nothing starts and ends here.
    if let Some(pos) = self.pending.iter().position(|&p| p == idx) {
      self.pending.swap_remove(pos);
      self.spans[idx].start = self.out.len();
    }
    self.spans[idx].end = self.out.len();
  }

  pub(crate) fn take_spans(&mut self) -> Vec<RawSpan> {
    std::mem::take(&mut self.spans)
  }

  fn push_space(&mut self) {
    if self.out.is_empty() || self.out.ends_with(|c: char| c == ' ' || c == '\n') {
      return;
    }
    self.out.push(' ');
    self.state.trailing = Boundary::None;
    if self.state.line_start != LineStart::Start {
      self.state.line_start = LineStart::Other;
    }
  }

  fn write_with_kind(&mut self, text: &str, kind: Kind) {
    let bytes = text.as_bytes();
    let Some(&first) = bytes.first() else {
      return;
    };

    let leading = match kind {
      Kind::Other => classify_leading_char(first),
      _ => kind.leading(),
    };
    if needs_space(self.state.trailing, leading) || self.would_open_html_comment(bytes) {
      self.out.push(' ');
      self.state.line_start = LineStart::Other;
    }

    for idx in self.pending.drain(..) {
      self.spans[idx].start = self.out.len();
    }

    self.out.push_str(text);
    self.state.trailing = kind.trailing(bytes, bytes.len() - 1);
    self.state.line_start = advance_line_start(self.state.line_start, bytes);
  }

  fn would_open_html_comment(&self, next: &[u8]) -> bool {
    // `<!--` anywhere.
    let tail = self.out.as_bytes();
    let split = (1..4).any(|k| {
      let (head, rest) = b"<!--".split_at(k);
      tail.ends_with(head) && next.starts_with(rest)
    });
    if split {
      return true;
    }
    // `-->` where only whitespace precedes it on the line.
    let mut state = self.state.line_start;
    for &byte in next {
      let (next_state, hazard) = next_line_start(state, byte);
      if hazard {
        return true;
      }
      state = next_state;
    }
    false
  }
}

fn needs_space(prev: Boundary, next: Leading) -> bool {
  matches!(
    (prev, next),
    (Boundary::Word | Boundary::Number, Leading::Word | Leading::Number)
      | (Boundary::Plus | Boundary::PlusPlus, Leading::Plus)
      | (Boundary::Minus | Boundary::MinusMinus, Leading::Minus)
      | (Boundary::Slash, Leading::Slash | Leading::Star)
  )
}

fn classify_leading_char(ch: u8) -> Leading {
  match ch {
    b'0'..=b'9' => Leading::Number,
    b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' | 0x80..=0xFF => Leading::Word,
    b'+' => Leading::Plus,
    b'-' => Leading::Minus,
    b'/' => Leading::Slash,
    b'*' => Leading::Star,
    _ => Leading::Other,
  }
}

fn classify_trailing_char(bytes: &[u8], idx: usize) -> Boundary {
  match bytes[idx] {
    b'0'..=b'9' => Boundary::Number,
    b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' | 0x80..=0xFF => Boundary::Word,
    b'+' if idx >= 1 && bytes[idx - 1] == b'+' => Boundary::PlusPlus,
    b'+' => Boundary::Plus,
    b'-' if idx >= 1 && bytes[idx - 1] == b'-' => Boundary::MinusMinus,
    b'-' => Boundary::Minus,
    b'/' => Boundary::Slash,
    _ => Boundary::None,
  }
}

impl Kind {
  fn leading(self) -> Leading {
    match self {
      Kind::Word => Leading::Word,
      Kind::Number => Leading::Number,
      Kind::Plus | Kind::PlusPlus => Leading::Plus,
      Kind::Minus | Kind::MinusMinus => Leading::Minus,
      Kind::Other => Leading::Other,
    }
  }

  fn trailing(self, bytes: &[u8], trailing_idx: usize) -> Boundary {
    match self {
      Kind::PlusPlus => Boundary::PlusPlus,
      Kind::MinusMinus => Boundary::MinusMinus,
      Kind::Plus => Boundary::Plus,
      Kind::Minus => Boundary::Minus,
      Kind::Word => Boundary::Word,
      Kind::Number => Boundary::Number,
      Kind::Other => classify_trailing_char(bytes, trailing_idx),
    }
  }
}

fn advance_line_start(mut state: LineStart, bytes: &[u8]) -> LineStart {
  for &byte in bytes {
    state = next_line_start(state, byte).0;
  }
  state
}

fn next_line_start(state: LineStart, byte: u8) -> (LineStart, bool) {
  match (state, byte) {
    (_, b'\n' | b'\r') => (LineStart::Start, false),
    (LineStart::Start, b' ' | b'\t') => (LineStart::Start, false),
    (LineStart::Start, b'-') => (LineStart::Dash, false),
    (LineStart::Dash, b'-') => (LineStart::DashDash, false),
    (LineStart::DashDash, b'>') => (LineStart::Other, true),
    _ => (LineStart::Other, false),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn minimal() -> FormatPolicy {
    FormatPolicy::minimal()
  }

  #[test]
  fn separates_words_and_numbers() {
    let policy = minimal();
    let mut em = Emitter::new(&policy);
    em.write_keyword("return");
    em.write_identifier("x");
    em.write_keyword("in");
    em.write_number("1");
    em.write_punct(";");
    assert_eq!(em.as_str(), "return x in 1;");
  }

  #[test]
  fn separates_sign_runs() {
    let policy = minimal();
    let mut em = Emitter::new(&policy);
    em.write_identifier("a");
    em.write_punct("+");
    em.write_punct("++");
    em.write_identifier("b");
    em.write_punct("-");
    em.write_punct("-");
    em.write_identifier("c");
    assert_eq!(em.as_str(), "a+ ++b- -c");
  }

  #[test]
  fn separates_slash_from_regex_and_star() {
    let policy = minimal();
    let mut em = Emitter::new(&policy);
    em.write_identifier("a");
    em.write_punct("/");
    em.write_literal("/b/g");
    em.write_punct("/");
    em.write_punct("*");
    assert_eq!(em.as_str(), "a/ /b/g/ *");
  }

  #[test]
  fn breaks_html_open_comment_anywhere() {
    let policy = minimal();
    let mut em = Emitter::new(&policy);
    em.write_identifier("a");
    em.write_punct("<");
    em.write_punct("!");
    em.write_punct("--");
    em.write_identifier("b");
    assert_eq!(em.as_str(), "a<! --b");
  }

  #[test]
  fn breaks_html_close_comment_at_line_start() {
    let policy = FormatPolicy::pretty();
    let mut em = Emitter::new(&policy);
    em.write_identifier("a");
    em.write_punct(";");
    em.write_line();
    em.write_punct("--");
    em.write_punct(">");
    assert_eq!(em.as_str(), "a;\n-- >");

    let mut em = Emitter::new(&policy);
    em.write_identifier("x");
    em.write_punct("--");
    em.write_punct(">");
    assert_eq!(em.as_str(), "x-->");
  }

  #[test]
  fn soft_whitespace_follows_policy() {
    let pretty = FormatPolicy::pretty();
    let mut em = Emitter::new(&pretty);
    em.write_punct("{");
    em.indent();
    em.write_line();
    em.write_identifier("a");
    em.write_soft_space();
    em.write_punct("=");
    em.write_soft_space();
    em.write_number("1");
    em.dedent();
    em.write_line();
    em.write_punct("}");
    assert_eq!(em.as_str(), "{\n  a = 1\n}");

    let minimal = minimal();
    let mut em = Emitter::new(&minimal);
    em.write_identifier("a");
    em.write_soft_space();
    em.write_line();
    em.write_identifier("b");
    assert_eq!(em.as_str(), "a b");
  }

  #[test]
  fn spans_start_at_the_next_token() {
    let policy = minimal();
    let mut em = Emitter::new(&policy);
    em.write_keyword("return");
    let idx = em.open_span(Loc(7, 8));
    em.write_identifier("x");
    em.close_span(idx);
    let spans = em.take_spans();
    assert_eq!(spans[0].start, 7);
    assert_eq!(spans[0].end, 8);
  }
}
