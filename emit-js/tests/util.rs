#![allow(dead_code)]

use serde_json::Value;
use similar::ChangeTag;
use similar::TextDiff;

pub fn strip_locs(value: &mut Value) {
  match value {
    Value::Object(map) => {
      map.remove("loc");
      for v in map.values_mut() {
        strip_locs(v);
      }
    }
    Value::Array(items) => {
      for item in items {
        strip_locs(item);
      }
    }
    _ => {}
  }
}

pub fn serialize_without_locs<T: serde::Serialize>(value: &T) -> Value {
  let mut serialized = serde_json::to_value(value).expect("serialize value");
  strip_locs(&mut serialized);
  serialized
}

pub fn strip_whitespace(text: &str) -> String {
  text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Panics with a line diff when `actual` differs from `expected`.
pub fn assert_text(actual: &str, expected: &str) {
  if actual == expected {
    return;
  }
  let diff = TextDiff::from_lines(expected, actual);
  let mut report = String::new();
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    report.push_str(sign);
    report.push_str(change.value());
    if change.missing_newline() {
      report.push('\n');
    }
  }
  panic!("emitted text differs from expected (-expected +actual):\n{report}");
}
