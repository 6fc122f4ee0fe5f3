use crate::emitter::with_node_context;
use crate::emitter::EmitError;
use crate::emitter::EmitResult;
use crate::escape::needs_dot_for_member;
use crate::escape::number_literal;
use crate::escape::string_literal;
use crate::fragment::Fragment;
use crate::policy::EmitOptions;
use crate::precedence;
use crate::precedence::new_callee_needs_parens;
use crate::precedence::nullish_operand_min;
use crate::precedence::operator_prec;
use crate::precedence::starts_with_optional_chaining;
use crate::precedence::ASSIGNMENT;
use crate::precedence::CALL_MEMBER;
use crate::precedence::CONDITIONAL;
use crate::precedence::NULLISH;
use crate::precedence::UNARY;
use crate::precedence::UPDATE;
use crate::stmt_start::arrow_body_needs_parens;
use ast_js::ast::expr::lit::LitArrElem;
use ast_js::ast::expr::lit::LitTemplatePart;
use ast_js::ast::expr::CallArg;
use ast_js::ast::expr::Expr;
use ast_js::ast::expr::MemberExpr;
use ast_js::ast::func::Func;
use ast_js::ast::func::FuncBody;
use ast_js::ast::node::Node;
use ast_js::ast::expr::pat::Pat;
use ast_js::operator::Associativity;
use ast_js::operator::OperatorName;
use derive_visitor::Drive;
use derive_visitor::DriveMut;

/// Braced lists wider than this are laid out one item per line when the
/// policy uses newlines.
const MAX_INLINE_WIDTH: usize = 80;

/// Turns AST nodes into fragments. One instance serves a whole emit call;
/// it holds no state besides options.
pub(crate) struct Renderer {
  track_locations: bool,
}

impl Renderer {
  pub fn new(opts: &EmitOptions) -> Renderer {
    Renderer {
      track_locations: opts.track_locations,
    }
  }

  pub fn mark<S: Drive + DriveMut>(&self, node: &Node<S>, frag: Fragment) -> Fragment {
    if self.track_locations && !node.is_synthetic() {
      Fragment::mark(node.loc, frag)
    } else {
      frag
    }
  }

  /// Operators, conditionals and access chains nest through one child each
  /// (the left or right operand, the argument, the alternate, the receiver).
  /// That spine is walked with a loop and folded back from the innermost node,
  /// so depth along it does not grow the native stack.
  pub fn expr(&self, root: &Node<Expr>) -> EmitResult<Fragment> {
    let mut spine = Vec::new();
    let mut cur = root;
    while let Some(inner) = spine_child(cur) {
      spine.push(cur);
      cur = inner;
    }

    // `1.toString()` would read the dot as a decimal point.
    let member_receiver = matches!(
      spine.last().map(|n| n.stx.as_ref()),
      Some(Expr::Member(_))
    );
    let mut acc = with_node_context(cur.loc, || {
      let frag = match cur.stx.as_ref() {
        Expr::LitNum(num) if member_receiver => number(num.stx.value.0, true),
        _ => self.expr_node(cur)?,
      };
      Ok(self.mark(cur, frag))
    })?;

    for node in spine.into_iter().rev() {
      acc = with_node_context(node.loc, || {
        let frag = self.link(node, acc)?;
        Ok(self.mark(node, frag))
      })?;
    }
    Ok(acc)
  }

  fn expr_node(&self, expr: &Node<Expr>) -> EmitResult<Fragment> {
    Ok(match expr.stx.as_ref() {
      Expr::ArrowFunc(arrow) => self.arrow(&arrow.stx.func)?,
      Expr::Class(class) => Fragment::seq(self.class(
        class.stx.name.as_ref().map(|n| Fragment::ident(n.stx.name.clone())),
        class.stx.extends.as_ref(),
        &class.stx.members,
      )?),
      Expr::Func(func) => {
        let name = func.stx.name.as_ref().map(|n| Fragment::ident(n.stx.name.clone()));
        self.function(name, &func.stx.func)?
      }
      Expr::Id(id) => Fragment::ident(id.stx.name.clone()),
      Expr::Import(import) => Fragment::expr(CALL_MEMBER, vec![
        Fragment::keyword("import"),
        Fragment::punct("("),
        self.expr(&import.stx.module)?.operand(ASSIGNMENT),
        Fragment::punct(")"),
      ]),
      Expr::ImportMeta(_) => Fragment::seq(vec![
        Fragment::keyword("import"),
        Fragment::punct("."),
        Fragment::ident("meta"),
      ]),
      Expr::New(new) => {
        let callee = self.expr(&new.stx.callee)?;
        let callee = if new_callee_needs_parens(&new.stx.callee) {
          Fragment::paren(callee)
        } else {
          callee.operand(CALL_MEMBER)
        };
        let mut parts = vec![Fragment::keyword("new"), callee];
        parts.extend(self.arguments(&new.stx.arguments)?);
        Fragment::expr(CALL_MEMBER, parts)
      }
      Expr::NewTarget(_) => Fragment::seq(vec![
        Fragment::keyword("new"),
        Fragment::punct("."),
        Fragment::ident("target"),
      ]),
      Expr::Super(_) => Fragment::keyword("super"),
      Expr::This(_) => Fragment::keyword("this"),
      Expr::Yield(yield_) => {
        let mut parts = vec![Fragment::keyword("yield")];
        if yield_.stx.delegate {
          parts.push(Fragment::punct("*"));
        }
        match &yield_.stx.argument {
          Some(argument) => {
            parts.push(Fragment::space());
            parts.push(self.expr(argument)?.operand(ASSIGNMENT));
          }
          None if yield_.stx.delegate => return Err(EmitError::missing("yield* argument")),
          None => {}
        };
        Fragment::expr(ASSIGNMENT, parts)
      }
      Expr::LitArr(arr) => {
        let mut items = Vec::with_capacity(arr.stx.elements.len());
        for element in &arr.stx.elements {
          items.push(match element {
            LitArrElem::Single(value) => Some(self.expr(value)?.operand(ASSIGNMENT)),
            LitArrElem::Rest(value) => Some(Fragment::seq(vec![
              Fragment::punct("..."),
              self.expr(value)?.operand(ASSIGNMENT),
            ])),
            LitArrElem::Empty => None,
          });
        }
        bracketed_with_holes(items)
      }
      Expr::LitBigInt(big) => Fragment::number(format!("{}n", big.stx.value)),
      Expr::LitBool(b) => Fragment::keyword(if b.stx.value { "true" } else { "false" }),
      Expr::LitNull(_) => Fragment::keyword("null"),
      Expr::LitNum(num) => number(num.stx.value.0, false),
      Expr::LitObj(obj) => self.object(&obj.stx.members)?,
      Expr::LitRegex(regex) => Fragment::literal(regex.stx.value.clone()),
      Expr::LitStr(s) => Fragment::literal(string_literal(&s.stx.value)),
      Expr::LitTemplate(template) => Fragment::seq(self.template(&template.stx.parts)?),
      Expr::ArrPat(pat) => self.arr_pat(pat, false)?,
      Expr::IdPat(pat) => Fragment::ident(pat.stx.name.clone()),
      Expr::ObjPat(pat) => self.obj_pat(pat, false)?,
      Expr::Binary(_)
      | Expr::Cond(_)
      | Expr::Unary(_)
      | Expr::UnaryPostfix(_)
      | Expr::Member(_)
      | Expr::ComputedMember(_)
      | Expr::Call(_)
      | Expr::TaggedTemplate(_) => unreachable!("handled earlier"),
    })
  }

  /// Renders `node` around `inner`, the already rendered fragment of its
  /// spine child.
  fn link(&self, node: &Node<Expr>, inner: Fragment) -> EmitResult<Fragment> {
    Ok(match node.stx.as_ref() {
      Expr::Binary(binary) => {
        let op = binary.stx.operator;
        if op.associativity() == Associativity::Left {
          let right = self.expr(&binary.stx.right)?;
          binary_op(op, inner, right)
        } else {
          let left = self.expr(&binary.stx.left)?;
          binary_op(op, left, inner)
        }
      }
      Expr::Cond(cond) => {
        let test = self.expr(&cond.stx.test)?.operand(NULLISH);
        let consequent = self.expr(&cond.stx.consequent)?.operand(ASSIGNMENT);
        Fragment::expr(CONDITIONAL, vec![
          test,
          Fragment::space(),
          Fragment::punct("?"),
          Fragment::space(),
          consequent,
          Fragment::space(),
          Fragment::punct(":"),
          Fragment::space(),
          inner.operand(ASSIGNMENT),
        ])
      }
      Expr::Unary(unary) => {
        let op = unary.stx.operator;
        let argument = if op.is_update() {
          inner.operand(CALL_MEMBER)
        } else {
          inner
        };
        Fragment::prefix(operator_token(op), argument, operator_prec(op))
      }
      Expr::UnaryPostfix(unary) => Fragment::postfix(
        inner.operand(CALL_MEMBER),
        operator_token(unary.stx.operator),
        UPDATE,
      ),
      Expr::Member(member) => member_access(inner, &member.stx),
      Expr::ComputedMember(member) => {
        let mut parts = vec![inner.operand(CALL_MEMBER)];
        if member.stx.optional_chaining {
          parts.push(Fragment::punct("?."));
        }
        parts.push(Fragment::punct("["));
        parts.push(self.expr(&member.stx.member)?);
        parts.push(Fragment::punct("]"));
        Fragment::expr(CALL_MEMBER, parts)
      }
      Expr::Call(call) => {
        let mut parts = vec![inner.operand(CALL_MEMBER)];
        if call.stx.optional_chaining {
          parts.push(Fragment::punct("?."));
        }
        parts.extend(self.arguments(&call.stx.arguments)?);
        Fragment::expr(CALL_MEMBER, parts)
      }
      Expr::TaggedTemplate(tagged) => {
        let tag = if starts_with_optional_chaining(&tagged.stx.function) {
          Fragment::paren(inner)
        } else {
          inner.operand(CALL_MEMBER)
        };
        let mut parts = vec![tag];
        parts.extend(self.template(&tagged.stx.parts)?);
        Fragment::expr(CALL_MEMBER, parts)
      }
      _ => inner,
    })
  }

  fn arguments(&self, arguments: &[Node<CallArg>]) -> EmitResult<Vec<Fragment>> {
    let mut parts = vec![Fragment::punct("(")];
    for (i, arg) in arguments.iter().enumerate() {
      if i > 0 {
        parts.push(Fragment::punct(","));
        parts.push(Fragment::space());
      }
      let value = self.expr(&arg.stx.value)?.operand(ASSIGNMENT);
      parts.push(if arg.stx.spread {
        Fragment::seq(vec![Fragment::punct("..."), value])
      } else {
        value
      });
    }
    parts.push(Fragment::punct(")"));
    Ok(parts)
  }

  pub(crate) fn template(&self, parts: &[LitTemplatePart]) -> EmitResult<Vec<Fragment>> {
    let mut out = Vec::new();
    let mut chunk = String::from("`");
    for part in parts {
      match part {
        LitTemplatePart::String(raw) => chunk.push_str(raw),
        LitTemplatePart::Substitution(expr) => {
          chunk.push_str("${");
          out.push(Fragment::literal(std::mem::take(&mut chunk)));
          out.push(self.expr(expr)?);
          chunk.push('}');
        }
      }
    }
    chunk.push('`');
    out.push(Fragment::literal(chunk));
    Ok(out)
  }

  fn arrow(&self, func_node: &Node<Func>) -> EmitResult<Fragment> {
    let frag = with_node_context(func_node.loc, || {
      let func = func_node.stx.as_ref();
      if func.generator {
        return Err(EmitError::unsupported("generator arrow function"));
      }
      let mut parts = Vec::new();
      if func.async_ {
        parts.push(Fragment::keyword("async"));
        parts.push(Fragment::space());
      }
      match func.parameters.as_slice() {
        [param]
          if !param.stx.rest
            && param.stx.default_value.is_none()
            && matches!(param.stx.pattern.stx.as_ref(), Pat::Id(_)) =>
        {
          parts.push(self.param(param)?);
        }
        params => parts.push(self.params(params)?),
      };
      parts.push(Fragment::space());
      parts.push(Fragment::punct("=>"));
      parts.push(Fragment::space());
      parts.push(match &func.body {
        FuncBody::Block(body) => self.body_block(body)?,
        FuncBody::Expression(body) => {
          let body = self.expr(body)?.operand(ASSIGNMENT);
          if arrow_body_needs_parens(&body) {
            Fragment::paren(body)
          } else {
            body
          }
        }
      });
      Ok(Fragment::expr(ASSIGNMENT, parts))
    })?;
    Ok(self.mark(func_node, frag))
  }

  /// `[async] function[*] [name](params) {body}`.
  pub(crate) fn function(&self, name: Option<Fragment>, func_node: &Node<Func>) -> EmitResult<Fragment> {
    let frag = with_node_context(func_node.loc, || {
      let func = func_node.stx.as_ref();
      let mut parts = Vec::new();
      if func.async_ {
        parts.push(Fragment::keyword("async"));
        parts.push(Fragment::space());
      }
      parts.push(Fragment::keyword("function"));
      if func.generator {
        parts.push(Fragment::punct("*"));
      }
      if let Some(name) = name {
        parts.push(Fragment::space());
        parts.push(name);
      }
      parts.extend(self.callable_tail(func)?);
      Ok(Fragment::seq(parts))
    })?;
    Ok(self.mark(func_node, frag))
  }

  /// `(params) {body}` of a non-arrow function.
  pub(crate) fn callable_tail(&self, func: &Func) -> EmitResult<Vec<Fragment>> {
    let FuncBody::Block(body) = &func.body else {
      return Err(EmitError::unsupported("expression body on a non-arrow function"));
    };
    Ok(vec![
      self.params(&func.parameters)?,
      Fragment::space(),
      self.body_block(body)?,
    ])
  }
}

fn member_access(object: Fragment, member: &MemberExpr) -> Fragment {
  Fragment::expr(CALL_MEMBER, vec![
    object.operand(CALL_MEMBER),
    Fragment::punct(if member.optional_chaining { "?." } else { "." }),
    Fragment::ident(member.right.clone()),
  ])
}

/// The child an expression nests through when it forms a chain: the operand
/// on the side its operator associates to, the argument of an update or unary
/// operator, the alternate of a conditional, the receiver of an access.
fn spine_child(expr: &Node<Expr>) -> Option<&Node<Expr>> {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => Some(match binary.stx.operator.associativity() {
      Associativity::Left => &binary.stx.left,
      Associativity::Right => &binary.stx.right,
    }),
    Expr::Cond(cond) => Some(&cond.stx.alternate),
    Expr::Unary(unary) => Some(&unary.stx.argument),
    Expr::UnaryPostfix(unary) => Some(&unary.stx.argument),
    Expr::Member(member) => Some(&member.stx.left),
    Expr::ComputedMember(member) => Some(&member.stx.object),
    Expr::Call(call) => Some(&call.stx.callee),
    Expr::TaggedTemplate(tagged) => Some(&tagged.stx.function),
    _ => None,
  }
}

pub(crate) fn operator_token(op: OperatorName) -> Fragment {
  if op.is_keyword() {
    Fragment::keyword(op.text())
  } else {
    Fragment::punct(op.text())
  }
}

/// Applies the operand rules of `op` that plain precedence does not cover,
/// then builds the operator fragment.
pub(crate) fn binary_op(op: OperatorName, left: Fragment, right: Fragment) -> Fragment {
  let (left, right) = match op {
    OperatorName::NullishCoalescing => {
      let left_min = nullish_operand_min(left.prec(), true);
      let right_min = nullish_operand_min(right.prec(), false);
      (left.operand(left_min), right.operand(right_min))
    }
    OperatorName::Exponentiation => (left.operand(precedence::EXPONENTIATION_LEFT_MIN), right),
    op if op.is_assignment() => (left.operand(CALL_MEMBER), right),
    _ => (left, right),
  };
  Fragment::binary(
    left,
    operator_token(op),
    right,
    operator_prec(op),
    op.associativity(),
  )
}

/// Numbers render from their value. Negative values become a unary minus and
/// non-finite values the global identifiers.
pub(crate) fn number(value: f64, member_receiver: bool) -> Fragment {
  if value.is_nan() {
    return Fragment::ident("NaN");
  }
  let negative = value.is_sign_negative();
  let magnitude = value.abs();
  let body = if magnitude.is_infinite() {
    Fragment::ident("Infinity")
  } else {
    let mut text = number_literal(magnitude);
    if member_receiver && !negative && needs_dot_for_member(&text) {
      text.push('.');
    }
    Fragment::number(text)
  };
  if negative {
    Fragment::prefix(Fragment::punct("-"), body, UNARY)
  } else {
    body
  }
}

/// `item, item` with a soft space after each comma.
pub(crate) fn comma_separated(items: Vec<Fragment>) -> Vec<Fragment> {
  let mut parts = Vec::with_capacity(items.len() * 3);
  for (i, item) in items.into_iter().enumerate() {
    if i > 0 {
      parts.push(Fragment::punct(","));
      parts.push(Fragment::space());
    }
    parts.push(item);
  }
  parts
}

/// `[a, , b]`; a trailing hole needs its own comma to be kept.
pub(crate) fn bracketed_with_holes(items: Vec<Option<Fragment>>) -> Fragment {
  let trailing_hole = matches!(items.last(), Some(None));
  let mut parts = vec![Fragment::punct("[")];
  for (i, item) in items.into_iter().enumerate() {
    if i > 0 {
      parts.push(Fragment::punct(","));
    }
    if let Some(item) = item {
      if i > 0 {
        parts.push(Fragment::space());
      }
      parts.push(item);
    }
  }
  if trailing_hole {
    parts.push(Fragment::punct(","));
  }
  parts.push(Fragment::punct("]"));
  Fragment::seq(parts)
}

/// `{a, b}` on one line, or one item per line past [`MAX_INLINE_WIDTH`].
pub(crate) fn braced(items: Vec<Fragment>) -> Fragment {
  if items.is_empty() {
    return Fragment::seq(vec![Fragment::punct("{"), Fragment::punct("}")]);
  }
  let width: usize = items.iter().map(Fragment::width).sum();
  if width > MAX_INLINE_WIDTH {
    let mut inner = Vec::with_capacity(items.len() * 3);
    for (i, item) in items.into_iter().enumerate() {
      if i > 0 {
        inner.push(Fragment::punct(","));
      }
      inner.push(Fragment::line());
      inner.push(item);
    }
    Fragment::seq(vec![
      Fragment::punct("{"),
      Fragment::indent(inner),
      Fragment::line(),
      Fragment::punct("}"),
    ])
  } else {
    let mut parts = vec![Fragment::punct("{"), Fragment::brace_space()];
    parts.extend(comma_separated(items));
    parts.push(Fragment::brace_space());
    parts.push(Fragment::punct("}"));
    Fragment::seq(parts)
  }
}
