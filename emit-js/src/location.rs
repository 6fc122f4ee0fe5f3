//! Mapping from emitted output ranges back to original source spans.

use crate::emitter::RawSpan;
use ast_js::loc::LocationOf;
use ast_js::loc::SourceSpan;
use serde::Serialize;

/// One node's output range, with the original span it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SpanMapping {
  /// Byte offsets into the emitted text.
  pub output_start: usize,
  pub output_end: usize,
  pub original: SourceSpan,
}

/// Mappings for every emitted node whose location resolved, in the order the
/// nodes were entered. A node's mapping comes before those of its children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SpanMap {
  mappings: Vec<SpanMapping>,
}

impl SpanMap {
  pub(crate) fn resolve(raw: Vec<RawSpan>, locator: &dyn LocationOf) -> SpanMap {
    let mappings = raw
      .into_iter()
      .filter_map(|span| {
        let original = locator.location_of(span.loc)?;
        Some(SpanMapping {
          output_start: span.start,
          output_end: span.end,
          original,
        })
      })
      .collect();
    SpanMap { mappings }
  }

  pub fn mappings(&self) -> &[SpanMapping] {
    &self.mappings
  }

  pub fn len(&self) -> usize {
    self.mappings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.mappings.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &SpanMapping> {
    self.mappings.iter()
  }

  /// The innermost mapping whose output range contains `offset`.
  pub fn lookup(&self, offset: usize) -> Option<&SpanMapping> {
    self
      .mappings
      .iter()
      .rev()
      .find(|m| m.output_start <= offset && offset < m.output_end)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use ast_js::loc::LineIndex;
  use ast_js::loc::Loc;

  #[test]
  fn drops_unresolvable_locations_and_finds_innermost() {
    let source = "a+b";
    let index = LineIndex::new(source);
    let raw = vec![
      RawSpan { loc: Loc(0, 3), start: 0, end: 3 },
      RawSpan { loc: Loc(0, 1), start: 0, end: 1 },
      RawSpan { loc: Loc(40, 41), start: 2, end: 3 },
    ];
    let map = SpanMap::resolve(raw, &index);
    assert_eq!(map.len(), 2);
    assert_eq!(map.lookup(0).map(|m| m.original.end), Some(1));
    assert_eq!(map.lookup(2).map(|m| m.original.end), Some(3));
    assert!(map.lookup(3).is_none());
  }
}
