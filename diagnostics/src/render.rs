use crate::Diagnostic;
use crate::FileId;
use crate::Label;
use ast_js::loc::LocationOf;
use std::collections::BTreeMap;

const TAB_WIDTH: usize = 2;

/// Provides access to source text for rendering diagnostics.
pub trait SourceProvider {
  fn file_name(&self, file: FileId) -> Option<&str>;
  fn file_text(&self, file: FileId) -> Option<&str>;
}

/// One named source text. Answers for every file id.
#[derive(Clone, Copy, Debug)]
pub struct SourceFile<'a> {
  pub name: &'a str,
  pub text: &'a str,
}

impl SourceProvider for SourceFile<'_> {
  fn file_name(&self, _file: FileId) -> Option<&str> {
    Some(self.name)
  }

  fn file_text(&self, _file: FileId) -> Option<&str> {
    Some(self.text)
  }
}

/// Renders a diagnostic as a header, a source snippet per file with carets
/// under each label, then its notes.
///
/// The primary label comes first, then the rest ordered by file and range,
/// so the output does not depend on the order labels were added in.
pub fn render_diagnostic(provider: &dyn SourceProvider, diagnostic: &Diagnostic) -> String {
  let mut out = format!(
    "{}[{}]: {}\n",
    diagnostic.severity, diagnostic.code, diagnostic.message
  );

  let mut labels = Vec::with_capacity(diagnostic.labels.len() + 1);
  if let Some(primary) = diagnostic.primary {
    labels.push(Label::primary(primary, diagnostic.message.clone()));
  }
  labels.extend(diagnostic.labels.iter().cloned());
  labels.sort_by(|a, b| {
    b.is_primary
      .cmp(&a.is_primary)
      .then(a.span.file.cmp(&b.span.file))
      .then(a.span.range.start.cmp(&b.span.range.start))
      .then(a.span.range.end.cmp(&b.span.range.end))
      .then(a.message.cmp(&b.message))
  });

  let mut start = 0;
  while start < labels.len() {
    let file = labels[start].span.file;
    let end = labels[start..]
      .iter()
      .position(|label| label.span.file != file)
      .map_or(labels.len(), |n| start + n);
    render_file(provider, &mut out, file, &labels[start..end]);
    start = end;
  }

  for note in &diagnostic.notes {
    out.push_str(&format!("= note: {}\n", note));
  }
  out
}

/// Renders `line:column: CODE message` with one-based positions, or
/// `CODE message` when there is no primary span or `locator` cannot place it.
pub fn render_line(diagnostic: &Diagnostic, locator: &dyn LocationOf) -> String {
  let position = diagnostic
    .primary
    .and_then(|span| locator.location_of(span.range.to_loc()));
  match position {
    Some(position) => format!(
      "{}:{}: {} {}",
      position.start_line + 1,
      position.start_column + 1,
      diagnostic.code,
      diagnostic.message
    ),
    None => format!("{} {}", diagnostic.code, diagnostic.message),
  }
}

struct Highlight<'a> {
  column: usize,
  width: usize,
  is_primary: bool,
  message: Option<&'a str>,
}

fn render_file(provider: &dyn SourceProvider, out: &mut String, file: FileId, labels: &[Label]) {
  let name = provider.file_name(file).unwrap_or("<unknown file>");
  let Some(text) = provider.file_text(file) else {
    out.push_str(&format!(" --> {}:?:?\n  | (source unavailable)\n", name));
    for label in labels.iter().filter(|l| !l.message.is_empty()) {
      out.push_str(&format!("  = label: {}\n", label.message));
    }
    return;
  };

  let lines = LineTable::new(text);
  let first = lines.clamp(labels[0].span.range.start as usize);
  let first_line = lines.line_of(first);
  let column = text[lines.bounds(first_line).0..first].chars().count();
  out.push_str(&format!(" --> {}:{}:{}\n", name, first_line + 1, column + 1));

  let mut rows: BTreeMap<usize, Vec<Highlight>> = BTreeMap::new();
  for label in labels {
    let start = lines.clamp(label.span.range.start as usize);
    let end = lines.clamp(label.span.range.end as usize).max(start);
    let top = lines.line_of(start);
    let bottom = if end > start { lines.line_of(end - 1) } else { top };
    for line in top..=bottom {
      let (line_start, line_end) = lines.bounds(line);
      let from = start.clamp(line_start, line_end);
      let to = end.clamp(from, line_end);
      rows.entry(line).or_default().push(Highlight {
        column: display_width(&text[line_start..from]),
        width: display_width(&text[from..to]).max(1),
        is_primary: label.is_primary,
        message: (line == top && !label.message.is_empty()).then_some(label.message.as_str()),
      });
    }
  }

  let last_line = rows.keys().next_back().copied().unwrap_or(first_line);
  let gutter = (last_line + 1).to_string().len();
  out.push_str(&format!("{:>w$} |\n", "", w = gutter));
  let mut prev: Option<usize> = None;
  for (&line, highlights) in rows.iter_mut() {
    if prev.is_some_and(|p| line > p + 1) {
      out.push_str(&format!("{:>w$} | ...\n", "", w = gutter));
    }
    let (line_start, line_end) = lines.bounds(line);
    out.push_str(&format!(
      "{:>w$} | {}\n",
      line + 1,
      expand_tabs(&text[line_start..line_end]),
      w = gutter
    ));
    highlights.sort_by(|a, b| {
      b.is_primary
        .cmp(&a.is_primary)
        .then(a.column.cmp(&b.column))
        .then(a.width.cmp(&b.width))
    });
    for highlight in highlights.iter() {
      let marker = if highlight.is_primary { "^" } else { "-" };
      let mut row = format!(
        "{:>w$} | {}{}",
        "",
        " ".repeat(highlight.column),
        marker.repeat(highlight.width),
        w = gutter
      );
      if let Some(message) = highlight.message {
        row.push(' ');
        row.push_str(message);
      }
      row.push('\n');
      out.push_str(&row);
    }
    prev = Some(line);
  }
}

/// Line starts of a text split on `\n`. A trailing `\r` is not part of a line.
struct LineTable<'a> {
  text: &'a str,
  starts: Vec<usize>,
}

impl<'a> LineTable<'a> {
  fn new(text: &'a str) -> Self {
    let mut starts = vec![0];
    starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
    Self { text, starts }
  }

  /// Pulls an offset into the text and back onto a character boundary.
  fn clamp(&self, offset: usize) -> usize {
    let mut offset = offset.min(self.text.len());
    while !self.text.is_char_boundary(offset) {
      offset -= 1;
    }
    offset
  }

  fn line_of(&self, offset: usize) -> usize {
    self.starts.partition_point(|&start| start <= offset) - 1
  }

  fn bounds(&self, line: usize) -> (usize, usize) {
    let start = self.starts[line];
    let end = self
      .starts
      .get(line + 1)
      .map_or(self.text.len(), |next| next - 1);
    if self.text[start..end].ends_with('\r') {
      (start, end - 1)
    } else {
      (start, end)
    }
  }
}

fn display_width(s: &str) -> usize {
  s.chars().map(|c| if c == '\t' { TAB_WIDTH } else { 1 }).sum()
}

fn expand_tabs(s: &str) -> String {
  s.replace('\t', &" ".repeat(TAB_WIDTH))
}
