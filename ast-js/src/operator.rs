use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Comma,
  Conditional,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  Multiplication,
  NullishCoalescing,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
}

impl OperatorName {
  /// Source text of the operator token.
  pub fn text(self) -> &'static str {
    match self {
      OperatorName::Addition => "+",
      OperatorName::Assignment => "=",
      OperatorName::AssignmentAddition => "+=",
      OperatorName::AssignmentBitwiseAnd => "&=",
      OperatorName::AssignmentBitwiseLeftShift => "<<=",
      OperatorName::AssignmentBitwiseOr => "|=",
      OperatorName::AssignmentBitwiseRightShift => ">>=",
      OperatorName::AssignmentBitwiseUnsignedRightShift => ">>>=",
      OperatorName::AssignmentBitwiseXor => "^=",
      OperatorName::AssignmentDivision => "/=",
      OperatorName::AssignmentExponentiation => "**=",
      OperatorName::AssignmentLogicalAnd => "&&=",
      OperatorName::AssignmentLogicalOr => "||=",
      OperatorName::AssignmentMultiplication => "*=",
      OperatorName::AssignmentNullishCoalescing => "??=",
      OperatorName::AssignmentRemainder => "%=",
      OperatorName::AssignmentSubtraction => "-=",
      OperatorName::Await => "await",
      OperatorName::BitwiseAnd => "&",
      OperatorName::BitwiseLeftShift => "<<",
      OperatorName::BitwiseNot => "~",
      OperatorName::BitwiseOr => "|",
      OperatorName::BitwiseRightShift => ">>",
      OperatorName::BitwiseUnsignedRightShift => ">>>",
      OperatorName::BitwiseXor => "^",
      OperatorName::Comma => ",",
      OperatorName::Conditional => "?",
      OperatorName::Delete => "delete",
      OperatorName::Division => "/",
      OperatorName::Equality => "==",
      OperatorName::Exponentiation => "**",
      OperatorName::GreaterThan => ">",
      OperatorName::GreaterThanOrEqual => ">=",
      OperatorName::In => "in",
      OperatorName::Inequality => "!=",
      OperatorName::Instanceof => "instanceof",
      OperatorName::LessThan => "<",
      OperatorName::LessThanOrEqual => "<=",
      OperatorName::LogicalAnd => "&&",
      OperatorName::LogicalNot => "!",
      OperatorName::LogicalOr => "||",
      OperatorName::Multiplication => "*",
      OperatorName::NullishCoalescing => "??",
      OperatorName::PostfixDecrement | OperatorName::PrefixDecrement => "--",
      OperatorName::PostfixIncrement | OperatorName::PrefixIncrement => "++",
      OperatorName::Remainder => "%",
      OperatorName::StrictEquality => "===",
      OperatorName::StrictInequality => "!==",
      OperatorName::Subtraction => "-",
      OperatorName::Typeof => "typeof",
      OperatorName::UnaryNegation => "-",
      OperatorName::UnaryPlus => "+",
      OperatorName::Void => "void",
    }
  }

  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentBitwiseAnd
        | OperatorName::AssignmentBitwiseLeftShift
        | OperatorName::AssignmentBitwiseOr
        | OperatorName::AssignmentBitwiseRightShift
        | OperatorName::AssignmentBitwiseUnsignedRightShift
        | OperatorName::AssignmentBitwiseXor
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentExponentiation
        | OperatorName::AssignmentLogicalAnd
        | OperatorName::AssignmentLogicalOr
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentNullishCoalescing
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }

  pub fn is_update(self) -> bool {
    matches!(
      self,
      OperatorName::PostfixDecrement
        | OperatorName::PostfixIncrement
        | OperatorName::PrefixDecrement
        | OperatorName::PrefixIncrement
    )
  }

  /// Whether the operator token is a keyword, and so needs word separation.
  pub fn is_keyword(self) -> bool {
    matches!(
      self,
      OperatorName::Await
        | OperatorName::Delete
        | OperatorName::In
        | OperatorName::Instanceof
        | OperatorName::Typeof
        | OperatorName::Void
    )
  }

  pub fn precedence(self) -> u8 {
    OPERATORS[&self].precedence
  }

  pub fn associativity(self) -> Associativity {
    OPERATORS[&self].associativity
  }
}

#[derive(Clone, Copy, Debug)]
pub struct Operator {
  pub name: OperatorName,
  pub precedence: u8,
  pub associativity: Associativity,
}

pub const PRECEDENCE_COMMA: u8 = 1;
pub const PRECEDENCE_ASSIGNMENT: u8 = 2;
pub const PRECEDENCE_CONDITIONAL: u8 = 3;
pub const PRECEDENCE_NULLISH: u8 = 4;
pub const PRECEDENCE_LOGICAL_OR: u8 = 5;
pub const PRECEDENCE_LOGICAL_AND: u8 = 6;
pub const PRECEDENCE_BITWISE_OR: u8 = 7;
pub const PRECEDENCE_BITWISE_XOR: u8 = 8;
pub const PRECEDENCE_BITWISE_AND: u8 = 9;
pub const PRECEDENCE_EQUALITY: u8 = 10;
pub const PRECEDENCE_RELATIONAL: u8 = 11;
pub const PRECEDENCE_SHIFT: u8 = 12;
pub const PRECEDENCE_ADDITIVE: u8 = 13;
pub const PRECEDENCE_MULTIPLICATIVE: u8 = 14;
pub const PRECEDENCE_EXPONENTIATION: u8 = 15;
pub const PRECEDENCE_UNARY: u8 = 16;
pub const PRECEDENCE_UPDATE: u8 = 17;
pub const PRECEDENCE_CALL_MEMBER: u8 = 18;
pub const PRECEDENCE_PRIMARY: u8 = 19;

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;

  let mut map = HashMap::<OperatorName, Operator>::new();
  let mut add = |name: OperatorName, precedence: u8, associativity: Associativity| {
    map.insert(name, Operator { name, precedence, associativity });
  };

  add(Comma, PRECEDENCE_COMMA, Left);

  for name in [
    Assignment, AssignmentAddition, AssignmentBitwiseAnd, AssignmentBitwiseLeftShift,
    AssignmentBitwiseOr, AssignmentBitwiseRightShift, AssignmentBitwiseUnsignedRightShift,
    AssignmentBitwiseXor, AssignmentDivision, AssignmentExponentiation, AssignmentLogicalAnd,
    AssignmentLogicalOr, AssignmentMultiplication, AssignmentNullishCoalescing,
    AssignmentRemainder, AssignmentSubtraction,
  ] {
    add(name, PRECEDENCE_ASSIGNMENT, Right);
  }

  add(Conditional, PRECEDENCE_CONDITIONAL, Right);
  add(NullishCoalescing, PRECEDENCE_NULLISH, Left);
  add(LogicalOr, PRECEDENCE_LOGICAL_OR, Left);
  add(LogicalAnd, PRECEDENCE_LOGICAL_AND, Left);
  add(BitwiseOr, PRECEDENCE_BITWISE_OR, Left);
  add(BitwiseXor, PRECEDENCE_BITWISE_XOR, Left);
  add(BitwiseAnd, PRECEDENCE_BITWISE_AND, Left);

  for name in [Equality, Inequality, StrictEquality, StrictInequality] {
    add(name, PRECEDENCE_EQUALITY, Left);
  }
  for name in [LessThan, LessThanOrEqual, GreaterThan, GreaterThanOrEqual, In, Instanceof] {
    add(name, PRECEDENCE_RELATIONAL, Left);
  }
  for name in [BitwiseLeftShift, BitwiseRightShift, BitwiseUnsignedRightShift] {
    add(name, PRECEDENCE_SHIFT, Left);
  }
  for name in [Addition, Subtraction] {
    add(name, PRECEDENCE_ADDITIVE, Left);
  }
  for name in [Multiplication, Division, Remainder] {
    add(name, PRECEDENCE_MULTIPLICATIVE, Left);
  }

  add(Exponentiation, PRECEDENCE_EXPONENTIATION, Right);

  for name in [Await, BitwiseNot, Delete, LogicalNot, Typeof, UnaryNegation, UnaryPlus, Void] {
    add(name, PRECEDENCE_UNARY, Right);
  }
  for name in [PrefixDecrement, PrefixIncrement] {
    add(name, PRECEDENCE_UPDATE, Right);
  }
  for name in [PostfixDecrement, PostfixIncrement] {
    add(name, PRECEDENCE_UPDATE, Left);
  }

  map
});

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_operator_has_an_entry() {
    for op in [
      OperatorName::Addition,
      OperatorName::AssignmentNullishCoalescing,
      OperatorName::Await,
      OperatorName::Comma,
      OperatorName::Conditional,
      OperatorName::PostfixIncrement,
      OperatorName::Void,
    ] {
      assert_eq!(OPERATORS[&op].name, op);
    }
    assert_eq!(OPERATORS.len(), 55);
  }

  #[test]
  fn exponentiation_binds_tighter_than_multiplication_and_groups_right() {
    assert!(OperatorName::Exponentiation.precedence() > OperatorName::Multiplication.precedence());
    assert_eq!(OperatorName::Exponentiation.associativity(), Associativity::Right);
    assert_eq!(OperatorName::Subtraction.associativity(), Associativity::Left);
  }

  #[test]
  fn nullish_sits_below_logical_or() {
    assert!(OperatorName::NullishCoalescing.precedence() < OperatorName::LogicalOr.precedence());
    assert!(OperatorName::NullishCoalescing.precedence() > OperatorName::Conditional.precedence());
  }
}
