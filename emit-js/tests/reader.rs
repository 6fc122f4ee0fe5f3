//! A small expression reader for checking emitted text. It covers
//! identifiers, numbers, parentheses, member access, calls, prefix, postfix,
//! binary, conditional and assignment operators, and rejects the operator
//! mixes the language forbids (`a ?? b || c`, `-a ** b`).

#![allow(dead_code)]

use ast_js::ast::expr::Expr;
use ast_js::ast::node::Node;
use ast_js::build;
use ast_js::operator::Associativity;
use ast_js::operator::OperatorName;

#[derive(Clone, Debug, PartialEq)]
enum Tok {
  Ident(String),
  Num(f64),
  Punct(&'static str),
}

const PUNCTUATORS: &[&str] = &[
  ">>>=", "**=", "===", "!==", ">>>", "<<=", ">>=", "&&=", "||=", "??=", "**", "==", "!=", "<=",
  ">=", "<<", ">>", "&&", "||", "??", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
  "(", ")", ",", ".", "?", ":", "<", ">", "+", "-", "*", "/", "%", "&", "|", "^", "!", "~", "=",
];

fn lex(source: &str) -> Result<Vec<Tok>, String> {
  let bytes = source.as_bytes();
  let mut tokens = Vec::new();
  let mut i = 0;
  while i < bytes.len() {
    let c = bytes[i];
    if c.is_ascii_whitespace() {
      i += 1;
      continue;
    }
    if c.is_ascii_alphabetic() || c == b'_' || c == b'$' {
      let start = i;
      while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'$') {
        i += 1;
      }
      tokens.push(Tok::Ident(source[start..i].to_string()));
      continue;
    }
    let starts_number = c.is_ascii_digit()
      || (c == b'.' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit()));
    if starts_number {
      let start = i;
      while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
      }
      if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
          i += 1;
        }
      }
      if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
          i += 1;
        }
        while i < bytes.len() && bytes[i].is_ascii_digit() {
          i += 1;
        }
      }
      let text = &source[start..i];
      let value = text
        .parse::<f64>()
        .map_err(|err| format!("bad number {text:?}: {err}"))?;
      tokens.push(Tok::Num(value));
      continue;
    }
    let punct = PUNCTUATORS
      .iter()
      .find(|p| source[i..].starts_with(**p))
      .ok_or_else(|| format!("unexpected character at {i} in {source:?}"))?;
    tokens.push(Tok::Punct(punct));
    i += punct.len();
  }
  Ok(tokens)
}

fn binary_operator(tok: &Tok) -> Option<OperatorName> {
  use OperatorName::*;
  Some(match tok {
    Tok::Ident(word) => match word.as_str() {
      "in" => In,
      "instanceof" => Instanceof,
      _ => return None,
    },
    Tok::Punct(p) => match *p {
      "??" => NullishCoalescing,
      "||" => LogicalOr,
      "&&" => LogicalAnd,
      "|" => BitwiseOr,
      "^" => BitwiseXor,
      "&" => BitwiseAnd,
      "==" => Equality,
      "!=" => Inequality,
      "===" => StrictEquality,
      "!==" => StrictInequality,
      "<" => LessThan,
      "<=" => LessThanOrEqual,
      ">" => GreaterThan,
      ">=" => GreaterThanOrEqual,
      "<<" => BitwiseLeftShift,
      ">>" => BitwiseRightShift,
      ">>>" => BitwiseUnsignedRightShift,
      "+" => Addition,
      "-" => Subtraction,
      "*" => Multiplication,
      "/" => Division,
      "%" => Remainder,
      "**" => Exponentiation,
      _ => return None,
    },
    Tok::Num(_) => return None,
  })
}

fn assignment_operator(tok: &Tok) -> Option<OperatorName> {
  use OperatorName::*;
  let Tok::Punct(p) = tok else {
    return None;
  };
  Some(match *p {
    "=" => Assignment,
    "+=" => AssignmentAddition,
    "-=" => AssignmentSubtraction,
    "*=" => AssignmentMultiplication,
    "/=" => AssignmentDivision,
    "%=" => AssignmentRemainder,
    "**=" => AssignmentExponentiation,
    "<<=" => AssignmentBitwiseLeftShift,
    ">>=" => AssignmentBitwiseRightShift,
    ">>>=" => AssignmentBitwiseUnsignedRightShift,
    "&=" => AssignmentBitwiseAnd,
    "|=" => AssignmentBitwiseOr,
    "^=" => AssignmentBitwiseXor,
    "&&=" => AssignmentLogicalAnd,
    "||=" => AssignmentLogicalOr,
    "??=" => AssignmentNullishCoalescing,
    _ => return None,
  })
}

fn prefix_operator(tok: &Tok) -> Option<OperatorName> {
  use OperatorName::*;
  Some(match tok {
    Tok::Ident(word) => match word.as_str() {
      "typeof" => Typeof,
      "void" => Void,
      "delete" => Delete,
      "await" => Await,
      _ => return None,
    },
    Tok::Punct(p) => match *p {
      "!" => LogicalNot,
      "~" => BitwiseNot,
      "+" => UnaryPlus,
      "-" => UnaryNegation,
      "++" => PrefixIncrement,
      "--" => PrefixDecrement,
      _ => return None,
    },
    Tok::Num(_) => return None,
  })
}

/// A parsed expression, and whether it was written inside parentheses.
struct Parsed {
  expr: Node<Expr>,
  parenthesized: bool,
}

impl Parsed {
  fn bare(expr: Node<Expr>) -> Parsed {
    Parsed {
      expr,
      parenthesized: false,
    }
  }

  fn operator(&self) -> Option<OperatorName> {
    if self.parenthesized {
      return None;
    }
    match self.expr.stx.as_ref() {
      Expr::Binary(binary) => Some(binary.stx.operator),
      Expr::Unary(unary) => Some(unary.stx.operator),
      _ => None,
    }
  }
}

struct Reader {
  tokens: Vec<Tok>,
  next: usize,
}

impl Reader {
  fn peek(&self) -> Option<&Tok> {
    self.tokens.get(self.next)
  }

  fn bump(&mut self) -> Option<Tok> {
    let tok = self.tokens.get(self.next).cloned();
    self.next += 1;
    tok
  }

  fn eat(&mut self, punct: &str) -> bool {
    if self.peek() == Some(&Tok::Punct(punct_static(punct))) {
      self.next += 1;
      true
    } else {
      false
    }
  }

  fn expect(&mut self, punct: &str) -> Result<(), String> {
    if self.eat(punct) {
      Ok(())
    } else {
      Err(format!("expected {punct:?}, found {:?}", self.peek()))
    }
  }

  fn expression(&mut self) -> Result<Parsed, String> {
    let mut left = self.assignment()?;
    while self.eat(",") {
      let right = self.assignment()?;
      left = Parsed::bare(build::binary(OperatorName::Comma, left.expr, right.expr));
    }
    Ok(left)
  }

  fn assignment(&mut self) -> Result<Parsed, String> {
    let target = self.conditional()?;
    let Some(op) = self.peek().and_then(assignment_operator) else {
      return Ok(target);
    };
    let assignable = matches!(target.expr.stx.as_ref(), Expr::Id(_) | Expr::Member(_));
    if !assignable || target.parenthesized {
      return Err("invalid assignment target".to_string());
    }
    self.next += 1;
    let value = self.assignment()?;
    Ok(Parsed::bare(build::binary(op, target.expr, value.expr)))
  }

  fn conditional(&mut self) -> Result<Parsed, String> {
    let test = self.binary(OperatorName::NullishCoalescing.precedence())?;
    if !self.eat("?") {
      return Ok(test);
    }
    let consequent = self.assignment()?;
    self.expect(":")?;
    let alternate = self.assignment()?;
    Ok(Parsed::bare(build::cond(test.expr, consequent.expr, alternate.expr)))
  }

  fn binary(&mut self, min: u8) -> Result<Parsed, String> {
    let mut left = self.unary()?;
    loop {
      let Some(op) = self.peek().and_then(binary_operator) else {
        return Ok(left);
      };
      let prec = op.precedence();
      if prec < min {
        return Ok(left);
      }
      if op == OperatorName::Exponentiation {
        let unary_left = matches!(left.operator(), Some(l) if l.precedence() == OperatorName::Typeof.precedence());
        if unary_left {
          return Err("unary operand of ** must be parenthesized".to_string());
        }
      }
      self.next += 1;
      let right = match op.associativity() {
        Associativity::Left => self.binary(prec + 1)?,
        Associativity::Right => self.binary(prec)?,
      };
      check_nullish_mix(op, &left, &right)?;
      left = Parsed::bare(build::binary(op, left.expr, right.expr));
    }
  }

  fn unary(&mut self) -> Result<Parsed, String> {
    let Some(op) = self.peek().and_then(prefix_operator) else {
      return self.postfix();
    };
    self.next += 1;
    let argument = self.unary()?;
    if op.is_update() && !matches!(argument.expr.stx.as_ref(), Expr::Id(_) | Expr::Member(_)) {
      return Err("invalid update target".to_string());
    }
    Ok(Parsed::bare(build::unary(op, argument.expr)))
  }

  fn postfix(&mut self) -> Result<Parsed, String> {
    let operand = self.call_member()?;
    let op = match self.peek() {
      Some(Tok::Punct("++")) => OperatorName::PostfixIncrement,
      Some(Tok::Punct("--")) => OperatorName::PostfixDecrement,
      _ => return Ok(operand),
    };
    if operand.parenthesized || !matches!(operand.expr.stx.as_ref(), Expr::Id(_) | Expr::Member(_)) {
      return Err("invalid update target".to_string());
    }
    self.next += 1;
    Ok(Parsed::bare(build::postfix(op, operand.expr)))
  }

  fn call_member(&mut self) -> Result<Parsed, String> {
    let mut expr = self.primary()?;
    loop {
      if self.eat(".") {
        let Some(Tok::Ident(name)) = self.bump() else {
          return Err("expected property name".to_string());
        };
        expr = Parsed::bare(build::member(expr.expr, &name));
      } else if self.eat("(") {
        let mut args = Vec::new();
        while !self.eat(")") {
          if !args.is_empty() {
            self.expect(",")?;
          }
          args.push(self.assignment()?.expr);
        }
        expr = Parsed::bare(build::call(expr.expr, args));
      } else {
        return Ok(expr);
      }
    }
  }

  fn primary(&mut self) -> Result<Parsed, String> {
    match self.bump() {
      Some(Tok::Ident(name)) => Ok(Parsed::bare(build::id(&name))),
      Some(Tok::Num(value)) => Ok(Parsed::bare(build::num(value))),
      Some(Tok::Punct("(")) => {
        let inner = self.expression()?;
        self.expect(")")?;
        Ok(Parsed {
          expr: inner.expr,
          parenthesized: true,
        })
      }
      other => Err(format!("unexpected token {other:?}")),
    }
  }
}

fn punct_static(punct: &str) -> &'static str {
  PUNCTUATORS
    .iter()
    .copied()
    .find(|p| *p == punct)
    .unwrap_or("")
}

fn check_nullish_mix(op: OperatorName, left: &Parsed, right: &Parsed) -> Result<(), String> {
  use OperatorName::*;
  let logical = |o: Option<OperatorName>| matches!(o, Some(LogicalOr | LogicalAnd));
  let nullish = |o: Option<OperatorName>| matches!(o, Some(NullishCoalescing));
  let mixed = match op {
    NullishCoalescing => logical(left.operator()) || logical(right.operator()),
    LogicalOr | LogicalAnd => nullish(left.operator()) || nullish(right.operator()),
    _ => false,
  };
  if mixed {
    Err("?? mixed with || or && without parentheses".to_string())
  } else {
    Ok(())
  }
}

/// Reads a complete expression, failing on leftover input.
pub fn read_expr(source: &str) -> Result<Node<Expr>, String> {
  let mut reader = Reader {
    tokens: lex(source)?,
    next: 0,
  };
  let parsed = reader.expression()?;
  if reader.next != reader.tokens.len() {
    return Err(format!("trailing input in {source:?}"));
  }
  Ok(parsed.expr)
}
