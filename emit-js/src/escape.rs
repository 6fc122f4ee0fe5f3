/// Renders a string literal, choosing whichever quote needs fewer escapes
/// (double quotes on a tie). Non-ASCII characters are kept as UTF-8 except
/// U+2028/U+2029, which are always escaped.
pub fn string_literal(value: &str) -> String {
  let doubles = value.bytes().filter(|&b| b == b'"').count();
  let singles = value.bytes().filter(|&b| b == b'\'').count();
  let quote = if singles < doubles { '\'' } else { '"' };

  let mut out = String::with_capacity(value.len() + 2);
  out.push(quote);
  let mut chars = value.chars().peekable();
  while let Some(ch) = chars.next() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\0' => {
        let next_is_digit = chars.peek().is_some_and(|c| c.is_ascii_digit());
        if next_is_digit {
          out.push_str("\\x00");
        } else {
          out.push_str("\\0");
        }
      }
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      ch if ch == quote => {
        out.push('\\');
        out.push(ch);
      }
      ch if ch < '\u{20}' => {
        // Other control characters are emitted as fixed-width hex escapes for
        // determinism.
        out.push_str(&format!("\\x{:02X}", ch as u32));
      }
      ch => out.push(ch),
    }
  }
  out.push(quote);
  out
}

/// Shortest source text for a finite, non-negative number: `.5` rather than
/// `0.5`, `1e21` rather than twenty-two digits.
pub fn number_literal(value: f64) -> String {
  if value == 0.0 {
    return "0".to_string();
  }
  let mut decimal = format!("{value}");
  if let Some(rest) = decimal.strip_prefix("0.") {
    decimal = format!(".{rest}");
  }
  let exponent = format!("{value:e}");
  if exponent.len() < decimal.len() {
    exponent
  } else {
    decimal
  }
}

/// Whether a `.` written directly after `number` would be read as its
/// decimal point.
pub fn needs_dot_for_member(number: &str) -> bool {
  number.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escapes_backslashes_and_controls() {
    assert_eq!(string_literal("a\\c"), "\"a\\\\c\"");
    assert_eq!(string_literal("a\nb\tc"), "\"a\\nb\\tc\"");
    assert_eq!(string_literal("a\u{0007}b"), "\"a\\x07b\"");
  }

  #[test]
  fn picks_the_quote_needing_fewer_escapes() {
    assert_eq!(string_literal("it's"), "\"it's\"");
    assert_eq!(string_literal("say \"hi\""), "'say \"hi\"'");
    assert_eq!(string_literal("'\""), "\"'\\\"\"");
  }

  #[test]
  fn escapes_zero_followed_by_digit() {
    assert_eq!(string_literal("\u{0000}9"), "\"\\x009\"");
    assert_eq!(string_literal("\u{0000}a"), "\"\\0a\"");
  }

  #[test]
  fn escapes_line_separators() {
    assert_eq!(string_literal("a\u{2028}b"), "\"a\\u2028b\"");
    assert_eq!(string_literal("a\u{2029}b"), "\"a\\u2029b\"");
  }

  #[test]
  fn formats_numbers_compactly() {
    assert_eq!(number_literal(0.0), "0");
    assert_eq!(number_literal(0.5), ".5");
    assert_eq!(number_literal(1.0), "1");
    assert_eq!(number_literal(123.0), "123");
    assert_eq!(number_literal(1e21), "1e21");
    assert_eq!(number_literal(100.0), "100");
    assert_eq!(number_literal(1000.0), "1e3");
    assert_eq!(number_literal(1e-7), "1e-7");
    assert_eq!(number_literal(1.5e300), "1.5e300");
  }

  #[test]
  fn integer_receivers_need_a_dot() {
    assert!(needs_dot_for_member("1"));
    assert!(!needs_dot_for_member(".5"));
    assert!(!needs_dot_for_member("1e21"));
  }
}
