//! Rendering fragments: the intermediate tree between AST nodes and text.
//!
//! Every expression fragment carries its precedence, so a parent decides
//! whether to parenthesize a child by looking only at the child fragment.
//! Whitespace that the formatting policy may or may not want is kept as
//! [`Soft`] leaves and resolved when flattening; required separation between
//! tokens is left to the [`Emitter`].

use crate::emitter::Emitter;
use crate::policy::FormatPolicy;
use crate::precedence;
use crate::precedence::Prec;
use ast_js::loc::Loc;
use ast_js::operator::Associativity;
use std::borrow::Cow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
  Keyword,
  Identifier,
  Number,
  Punct,
  /// Strings, regexes and template chunks, written verbatim.
  Literal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub text: Cow<'static, str>,
}

static OPEN_PAREN: Token = Token {
  kind: TokenKind::Punct,
  text: Cow::Borrowed("("),
};
static CLOSE_PAREN: Token = Token {
  kind: TokenKind::Punct,
  text: Cow::Borrowed(")"),
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Soft {
  /// Around operators, after commas and keywords.
  Space,
  /// Just inside `{` and `}` of single-line braced lists.
  BraceSpace,
  /// Between statements and members; followed by indentation.
  Line,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
  Seq,
  Paren,
  Indent,
  /// Binary operator application; parts alternate operands and operators.
  Op(Associativity),
}

#[derive(Debug)]
pub struct Group {
  shape: Shape,
  prec: Prec,
  width: usize,
  parts: Vec<Fragment>,
}

#[derive(Debug)]
pub struct Mark {
  pub loc: Loc,
  pub inner: Fragment,
}

#[derive(Debug)]
pub enum Fragment {
  Token(Token),
  Soft(Soft),
  Group(Box<Group>),
  Mark(Box<Mark>),
}

impl Fragment {
  pub fn token(kind: TokenKind, text: impl Into<Cow<'static, str>>) -> Fragment {
    Fragment::Token(Token {
      kind,
      text: text.into(),
    })
  }

  pub fn keyword(text: &'static str) -> Fragment {
    Fragment::token(TokenKind::Keyword, text)
  }

  pub fn ident(text: impl Into<Cow<'static, str>>) -> Fragment {
    Fragment::token(TokenKind::Identifier, text)
  }

  pub fn punct(text: &'static str) -> Fragment {
    Fragment::token(TokenKind::Punct, text)
  }

  pub fn number(text: String) -> Fragment {
    Fragment::token(TokenKind::Number, text)
  }

  pub fn literal(text: impl Into<Cow<'static, str>>) -> Fragment {
    Fragment::token(TokenKind::Literal, text)
  }

  pub fn soft(soft: Soft) -> Fragment {
    Fragment::Soft(soft)
  }

  pub fn space() -> Fragment {
    Fragment::Soft(Soft::Space)
  }

  pub fn brace_space() -> Fragment {
    Fragment::Soft(Soft::BraceSpace)
  }

  pub fn line() -> Fragment {
    Fragment::Soft(Soft::Line)
  }

  fn group(shape: Shape, prec: Prec, parts: Vec<Fragment>) -> Fragment {
    let mut width: usize = parts.iter().map(Fragment::width).sum();
    if shape == Shape::Paren {
      width += 2;
    }
    Fragment::Group(Box::new(Group {
      shape,
      prec,
      width,
      parts,
    }))
  }

  /// Concatenation of non-expression parts (statements, lists, heads).
  pub fn seq(parts: Vec<Fragment>) -> Fragment {
    Fragment::group(Shape::Seq, precedence::PRIMARY, parts)
  }

  /// An expression made of `parts` whose own precedence is `prec`. The caller
  /// is responsible for having placed its operands with [`Fragment::operand`].
  pub fn expr(prec: Prec, parts: Vec<Fragment>) -> Fragment {
    Fragment::group(Shape::Seq, prec, parts)
  }

  pub fn paren(inner: Fragment) -> Fragment {
    Fragment::group(Shape::Paren, precedence::PRIMARY, vec![inner])
  }

  /// Line breaks inside `parts` are indented one level deeper.
  pub fn indent(parts: Vec<Fragment>) -> Fragment {
    Fragment::group(Shape::Indent, precedence::PRIMARY, parts)
  }

  /// Records the output range of `inner` against `loc`.
  pub fn mark(loc: Loc, inner: Fragment) -> Fragment {
    Fragment::Mark(Box::new(Mark { loc, inner }))
  }

  /// Places `self` where an expression of at least `min` precedence is
  /// required, parenthesizing it only if it binds looser.
  pub fn operand(self, min: Prec) -> Fragment {
    if self.prec() < min {
      tracing::trace!(child = self.prec().value(), min = min.value(), "parenthesized operand");
      Fragment::paren(self)
    } else {
      self
    }
  }

  /// `left op right` at `prec`. An operand of equal precedence on the side
  /// opposite the associativity is parenthesized. Left-associative chains at
  /// the same precedence are spliced into one flat group.
  pub fn binary(
    left: Fragment,
    op: Fragment,
    right: Fragment,
    prec: Prec,
    assoc: Associativity,
  ) -> Fragment {
    let (left_min, right_min) = match assoc {
      Associativity::Left => (prec, prec.tighter()),
      Associativity::Right => (prec.tighter(), prec),
    };
    let left = left.operand(left_min);
    let right = right.operand(right_min);
    let comma = prec == precedence::COMMA;

    let mut tail = Vec::with_capacity(4);
    if !comma {
      tail.push(Fragment::space());
    }
    tail.push(op);
    tail.push(Fragment::space());
    tail.push(right);

    match left {
      Fragment::Group(mut group)
        if assoc == Associativity::Left
          && group.shape == Shape::Op(Associativity::Left)
          && group.prec == prec =>
      {
        group.width += tail.iter().map(Fragment::width).sum::<usize>();
        group.parts.append(&mut tail);
        Fragment::Group(group)
      }
      left => {
        let mut parts = Vec::with_capacity(5);
        parts.push(left);
        parts.append(&mut tail);
        Fragment::group(Shape::Op(assoc), prec, parts)
      }
    }
  }

  /// `op operand` at `prec`. Keyword operators get a soft space.
  pub fn prefix(op: Fragment, operand: Fragment, prec: Prec) -> Fragment {
    let operand = operand.operand(prec);
    let keyword = matches!(&op, Fragment::Token(Token { kind: TokenKind::Keyword, .. }));
    let mut parts = vec![op];
    if keyword {
      parts.push(Fragment::space());
    }
    parts.push(operand);
    Fragment::expr(prec, parts)
  }

  /// `operand op` at `prec`.
  pub fn postfix(operand: Fragment, op: Fragment, prec: Prec) -> Fragment {
    let operand = operand.operand(prec.tighter());
    Fragment::expr(prec, vec![operand, op])
  }

  pub fn prec(&self) -> Prec {
    let mut cur = self;
    loop {
      match cur {
        Fragment::Token(_) | Fragment::Soft(_) => return precedence::PRIMARY,
        Fragment::Group(group) => return group.prec,
        Fragment::Mark(mark) => cur = &mark.inner,
      }
    }
  }

  /// Length of the fragment's tokens without any whitespace.
  pub fn width(&self) -> usize {
    let mut cur = self;
    loop {
      match cur {
        Fragment::Token(token) => return token.text.len(),
        Fragment::Soft(_) => return 0,
        Fragment::Group(group) => return group.width,
        Fragment::Mark(mark) => cur = &mark.inner,
      }
    }
  }

  pub(crate) fn events(&self) -> Events<'_> {
    Events {
      stack: vec![Step::Visit(self)],
    }
  }

  /// Tokens in output order, including parentheses from paren groups.
  pub fn tokens(&self) -> impl Iterator<Item = &Token> {
    self.events().filter_map(|event| match event {
      Event::Token(token) => Some(token),
      _ => None,
    })
  }

  pub fn flatten(&self, policy: &FormatPolicy) -> String {
    let mut em = Emitter::new(policy);
    self.flatten_into(&mut em);
    em.into_string()
  }

  pub fn flatten_into(&self, em: &mut Emitter) {
    let mut open = Vec::new();
    for event in self.events() {
      match event {
        Event::Token(token) => match token.kind {
          TokenKind::Keyword => em.write_keyword(&token.text),
          TokenKind::Identifier => em.write_identifier(&token.text),
          TokenKind::Number => em.write_number(&token.text),
          TokenKind::Punct => em.write_punct(&token.text),
          TokenKind::Literal => em.write_literal(&token.text),
        },
        Event::Soft(Soft::Space) => em.write_soft_space(),
        Event::Soft(Soft::BraceSpace) => em.write_brace_space(),
        Event::Soft(Soft::Line) => em.write_line(),
        Event::Indent => em.indent(),
        Event::Dedent => em.dedent(),
        Event::Open(loc) => open.push(em.open_span(loc)),
        Event::Close => {
          if let Some(idx) = open.pop() {
            em.close_span(idx);
          }
        }
      }
    }
  }

  /// Whether both fragments render to the same text under `policy`.
  pub fn same_text(&self, other: &Fragment, policy: &FormatPolicy) -> bool {
    self.flatten(policy) == other.flatten(policy)
  }
}

impl Drop for Group {
  // Operator chains and nested statements can be arbitrarily deep; take the
  // children apart with a worklist instead of recursing.
  fn drop(&mut self) {
    let mut stack = std::mem::take(&mut self.parts);
    while let Some(frag) = stack.pop() {
      match frag {
        Fragment::Group(mut group) => stack.append(&mut group.parts),
        Fragment::Mark(mut mark) => {
          stack.push(std::mem::replace(&mut mark.inner, Fragment::Soft(Soft::Space)));
        }
        Fragment::Token(_) | Fragment::Soft(_) => {}
      }
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Event<'a> {
  Token(&'a Token),
  Soft(Soft),
  Indent,
  Dedent,
  Open(Loc),
  Close,
}

enum Step<'a> {
  Visit(&'a Fragment),
  Emit(Event<'a>),
}

/// Pre-order walk over a fragment tree with an explicit stack.
pub(crate) struct Events<'a> {
  stack: Vec<Step<'a>>,
}

impl<'a> Iterator for Events<'a> {
  type Item = Event<'a>;

  fn next(&mut self) -> Option<Event<'a>> {
    loop {
      let frag = match self.stack.pop()? {
        Step::Emit(event) => return Some(event),
        Step::Visit(frag) => frag,
      };
      match frag {
        Fragment::Token(token) => return Some(Event::Token(token)),
        Fragment::Soft(soft) => return Some(Event::Soft(*soft)),
        Fragment::Mark(mark) => {
          self.stack.push(Step::Emit(Event::Close));
          self.stack.push(Step::Visit(&mark.inner));
          return Some(Event::Open(mark.loc));
        }
        Fragment::Group(group) => {
          let first = match group.shape {
            Shape::Paren => {
              self.stack.push(Step::Emit(Event::Token(&CLOSE_PAREN)));
              Some(Event::Token(&OPEN_PAREN))
            }
            Shape::Indent => {
              self.stack.push(Step::Emit(Event::Dedent));
              Some(Event::Indent)
            }
            Shape::Seq | Shape::Op(_) => None,
          };
          self
            .stack
            .extend(group.parts.iter().rev().map(Step::Visit));
          if let Some(event) = first {
            return Some(event);
          }
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::precedence::{ASSIGNMENT, EXPONENTIATION, UNARY};

  fn add(left: Fragment, right: Fragment) -> Fragment {
    Fragment::binary(
      left,
      Fragment::punct("+"),
      right,
      Prec::new(13),
      Associativity::Left,
    )
  }

  fn minimal(frag: &Fragment) -> String {
    frag.flatten(&FormatPolicy::minimal())
  }

  #[test]
  fn parenthesizes_by_precedence_and_associativity() {
    let left_nested = add(add(Fragment::ident("a"), Fragment::ident("b")), Fragment::ident("c"));
    assert_eq!(minimal(&left_nested), "a+b+c");
    let right_nested = add(Fragment::ident("a"), add(Fragment::ident("b"), Fragment::ident("c")));
    assert_eq!(minimal(&right_nested), "a+(b+c)");

    let pow = |l, r| Fragment::binary(l, Fragment::punct("**"), r, EXPONENTIATION, Associativity::Right);
    let right_pow = pow(Fragment::ident("a"), pow(Fragment::ident("b"), Fragment::ident("c")));
    assert_eq!(minimal(&right_pow), "a**b**c");
    let left_pow = pow(pow(Fragment::ident("a"), Fragment::ident("b")), Fragment::ident("c"));
    assert_eq!(minimal(&left_pow), "(a**b)**c");
  }

  #[test]
  fn splices_left_chains() {
    let mut chain = Fragment::ident("x");
    for _ in 0..10_000 {
      chain = add(chain, Fragment::ident("x"));
    }
    match &chain {
      Fragment::Group(group) => assert_eq!(group.parts.len(), 1 + 10_000 * 4),
      _ => panic!("expected a group"),
    }
    assert_eq!(chain.width(), 1 + 10_000 * 2);
    assert_eq!(minimal(&chain).len(), chain.width());
  }

  #[test]
  fn deep_nesting_flattens_and_drops_without_recursion() {
    let mut frag = Fragment::ident("x");
    for _ in 0..100_000 {
      frag = Fragment::prefix(Fragment::punct("!"), frag, UNARY);
    }
    let text = minimal(&frag);
    assert_eq!(text.len(), 100_001);
    assert!(text.starts_with("!!!"));
  }

  #[test]
  fn soft_whitespace_only_differs_between_policies() {
    let frag = Fragment::binary(
      Fragment::ident("a"),
      Fragment::punct("="),
      Fragment::prefix(Fragment::keyword("typeof"), Fragment::ident("b"), UNARY),
      ASSIGNMENT,
      Associativity::Right,
    );
    assert_eq!(minimal(&frag), "a=typeof b");
    assert_eq!(frag.flatten(&FormatPolicy::pretty()), "a = typeof b");
    let texts: Vec<&str> = frag.tokens().map(|t| t.text.as_ref()).collect();
    assert_eq!(texts, ["a", "=", "typeof", "b"]);
  }

  #[test]
  fn marks_are_transparent() {
    let marked = Fragment::mark(Loc(0, 3), add(Fragment::ident("a"), Fragment::ident("b")));
    assert_eq!(marked.prec(), Prec::new(13));
    let wrapped = Fragment::prefix(Fragment::punct("-"), marked, UNARY);
    assert_eq!(minimal(&wrapped), "-(a+b)");
    assert!(wrapped.same_text(
      &Fragment::prefix(
        Fragment::punct("-"),
        add(Fragment::ident("a"), Fragment::ident("b")),
        UNARY
      ),
      &FormatPolicy::minimal()
    ));
  }
}
