use core::hash::Hash;
use core::hash::Hasher;
use serde::Serialize;
use serde::Serializer;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    if self.0.is_nan() {
      return other.0.is_nan();
    };
    self.0.eq(&other.0)
  }
}

impl Eq for JsNumber {}

impl Ord for JsNumber {
  fn cmp(&self, other: &Self) -> Ordering {
    // Only NaNs cannot be compared, and we treat them as equal.
    self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
  }
}

impl PartialOrd for JsNumber {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}

/// Classification of numeric literal source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericLiteralForm {
  Decimal,
  Hex,
  Octal,
  Binary,
  /// `0` followed only by octal digits, e.g. `017`.
  LegacyOctal,
  /// `0` followed by decimal digits with at least one `8` or `9`, e.g. `089`.
  NonOctalDecimal,
}

impl NumericLiteralForm {
  pub fn of_raw(raw: &str) -> NumericLiteralForm {
    let bytes = raw.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
      return NumericLiteralForm::Decimal;
    }
    match bytes[1] {
      b'x' | b'X' => NumericLiteralForm::Hex,
      b'o' | b'O' => NumericLiteralForm::Octal,
      b'b' | b'B' => NumericLiteralForm::Binary,
      b'0'..=b'9' => {
        let digits = bytes[1..]
          .iter()
          .take_while(|b| b.is_ascii_digit() || **b == b'_');
        if digits.clone().any(|b| matches!(b, b'8' | b'9')) {
          NumericLiteralForm::NonOctalDecimal
        } else {
          NumericLiteralForm::LegacyOctal
        }
      }
      _ => NumericLiteralForm::Decimal,
    }
  }

  /// Forms that are early errors in strict mode code.
  pub fn is_legacy(self) -> bool {
    matches!(
      self,
      NumericLiteralForm::LegacyOctal | NumericLiteralForm::NonOctalDecimal
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn nan_equals_nan() {
    assert_eq!(JsNumber(f64::NAN), JsNumber(f64::NAN));
    assert_ne!(JsNumber(f64::NAN), JsNumber(0.0));
    assert_eq!(JsNumber(1.5), JsNumber(1.5));
  }

  #[test]
  fn classifies_numeric_literal_forms() {
    assert_eq!(NumericLiteralForm::of_raw("0"), NumericLiteralForm::Decimal);
    assert_eq!(NumericLiteralForm::of_raw("0.5"), NumericLiteralForm::Decimal);
    assert_eq!(NumericLiteralForm::of_raw("10"), NumericLiteralForm::Decimal);
    assert_eq!(NumericLiteralForm::of_raw("0x1F"), NumericLiteralForm::Hex);
    assert_eq!(NumericLiteralForm::of_raw("0o17"), NumericLiteralForm::Octal);
    assert_eq!(NumericLiteralForm::of_raw("0b1"), NumericLiteralForm::Binary);
    assert_eq!(NumericLiteralForm::of_raw("017"), NumericLiteralForm::LegacyOctal);
    assert_eq!(NumericLiteralForm::of_raw("08"), NumericLiteralForm::NonOctalDecimal);
    assert_eq!(NumericLiteralForm::of_raw("09.5"), NumericLiteralForm::NonOctalDecimal);
    assert!(NumericLiteralForm::of_raw("017").is_legacy());
    assert!(!NumericLiteralForm::of_raw("0o17").is_legacy());
  }
}
