use ast_js::ast::expr::Expr;
use ast_js::ast::node::Node;
use ast_js::operator;
use ast_js::operator::OperatorName;

/// Wrapper around a precedence value with total ordering.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Prec(u8);

impl Prec {
  pub const LOWEST: Prec = Prec(0);

  pub const fn new(value: u8) -> Self {
    Prec(value)
  }

  pub const fn tighter(self) -> Self {
    Prec(self.0 + 1)
  }

  pub const fn value(self) -> u8 {
    self.0
  }
}

pub const COMMA: Prec = Prec::new(operator::PRECEDENCE_COMMA);
/// Assignment, arrow functions and `yield`.
pub const ASSIGNMENT: Prec = Prec::new(operator::PRECEDENCE_ASSIGNMENT);
pub const CONDITIONAL: Prec = Prec::new(operator::PRECEDENCE_CONDITIONAL);
pub const NULLISH: Prec = Prec::new(operator::PRECEDENCE_NULLISH);
pub const LOGICAL_OR: Prec = Prec::new(operator::PRECEDENCE_LOGICAL_OR);
pub const LOGICAL_AND: Prec = Prec::new(operator::PRECEDENCE_LOGICAL_AND);
pub const BITWISE_OR: Prec = Prec::new(operator::PRECEDENCE_BITWISE_OR);
pub const EXPONENTIATION: Prec = Prec::new(operator::PRECEDENCE_EXPONENTIATION);
pub const UNARY: Prec = Prec::new(operator::PRECEDENCE_UNARY);
pub const UPDATE: Prec = Prec::new(operator::PRECEDENCE_UPDATE);
/// Member access, calls, `new` with arguments, tagged templates and `import()`.
pub const CALL_MEMBER: Prec = Prec::new(operator::PRECEDENCE_CALL_MEMBER);
pub const PRIMARY: Prec = Prec::new(operator::PRECEDENCE_PRIMARY);

pub fn operator_prec(op: OperatorName) -> Prec {
  Prec::new(op.precedence())
}

/// Minimum precedence of a `??` operand. `a ?? b || c` is a syntax error, so
/// `||`/`&&` operands are always wrapped, while a left `??` chains.
pub fn nullish_operand_min(child_prec: Prec, left: bool) -> Prec {
  if left && child_prec == NULLISH {
    NULLISH
  } else {
    BITWISE_OR
  }
}

/// Minimum precedence of the left operand of `**`; `-a ** b` is a syntax error.
pub const EXPONENTIATION_LEFT_MIN: Prec = UPDATE;

pub fn starts_with_optional_chaining(expr: &Node<Expr>) -> bool {
  let mut cur = expr;
  loop {
    cur = match cur.stx.as_ref() {
      Expr::Member(member) if member.stx.optional_chaining => return true,
      Expr::ComputedMember(member) if member.stx.optional_chaining => return true,
      Expr::Call(call) if call.stx.optional_chaining => return true,
      Expr::Member(member) => &member.stx.left,
      Expr::ComputedMember(member) => &member.stx.object,
      Expr::Call(call) => &call.stx.callee,
      _ => return false,
    };
  }
}

/// Whether a `new` callee must be parenthesized because its member chain
/// contains a call (`new (a())()`, `new (a().b)()`) or an optional chain.
pub fn new_callee_needs_parens(callee: &Node<Expr>) -> bool {
  let mut cur = callee;
  loop {
    cur = match cur.stx.as_ref() {
      Expr::Call(_) | Expr::Import(_) => return true,
      Expr::Member(member) if member.stx.optional_chaining => return true,
      Expr::ComputedMember(member) if member.stx.optional_chaining => return true,
      Expr::Member(member) => &member.stx.left,
      Expr::ComputedMember(member) => &member.stx.object,
      Expr::TaggedTemplate(tagged) => &tagged.stx.function,
      _ => return false,
    };
  }
}
