use ast_js::ast::expr::lit::LitArrElem;
use ast_js::ast::expr::Expr;
use ast_js::ast::node::Node;
use ast_js::ast::stmt::decl::VarDeclMode;
use ast_js::ast::stmt::Stmt;
use ast_js::build::*;
use ast_js::operator::OperatorName;
use semantic_js::find_early_errors;
use semantic_js::EarlyErrorKind;
use semantic_js::EarlyErrorKind::*;
use semantic_js::TopLevelMode;

const DEPTH: usize = 50_000;

/// Checks the program `build` returns on a thread with a 2 MiB stack, so
/// native recursion proportional to nesting depth shows up as an overflow.
fn check_on_small_stack(
  build: impl FnOnce() -> Vec<Node<Stmt>> + Send + 'static,
) -> Vec<EarlyErrorKind> {
  std::thread::Builder::new()
    .stack_size(2 << 20)
    .spawn(move || {
      let top = top_level(build());
      let kinds = find_early_errors(&top, TopLevelMode::Global)
        .iter()
        .map(|f| f.kind)
        .collect();
      // The tree's own drop glue is derived and recursive.
      std::mem::forget(top);
      kinds
    })
    .expect("spawn thread")
    .join()
    .expect("thread panicked")
}

fn nest_expr(leaf: Node<Expr>, wrap: impl Fn(Node<Expr>) -> Node<Expr>) -> Node<Expr> {
  let mut cur = leaf;
  for _ in 0..DEPTH {
    cur = wrap(cur);
  }
  cur
}

fn nest_stmt(leaf: Node<Stmt>, wrap: impl Fn(Node<Stmt>) -> Node<Stmt>) -> Node<Stmt> {
  let mut cur = leaf;
  for _ in 0..DEPTH {
    cur = wrap(cur);
  }
  cur
}

fn yield_bare() -> Node<Expr> {
  yield_(None, false)
}

#[test]
fn deep_conditional_chain_reaches_its_innermost_alternate() {
  let found = check_on_small_stack(|| {
    let chain = nest_expr(yield_bare(), |e| cond(id("t"), id("c"), e));
    vec![var_decl(VarDeclMode::Let, "x", Some(chain))]
  });
  assert_eq!(found, [YieldOutsideGenerator]);
}

#[test]
fn deep_nested_blocks_keep_scopes_and_targets() {
  let found = check_on_small_stack(|| {
    let inner = block(vec![
      var_decl(VarDeclMode::Let, "a", None),
      var_decl(VarDeclMode::Let, "a", None),
      break_(None),
    ]);
    vec![nest_stmt(inner, |s| block(vec![s]))]
  });
  assert_eq!(found, [DuplicateBinding, UndefinedBreakTarget]);
}

#[test]
fn deep_else_if_chain() {
  let found = check_on_small_stack(|| {
    let chain = nest_stmt(continue_(None), |s| if_(id("t"), empty(), Some(s)));
    vec![chain]
  });
  assert_eq!(found, [UndefinedContinueTarget]);
}

#[test]
fn deep_loops_balance_their_break_targets() {
  let found = check_on_small_stack(|| {
    let loops = nest_stmt(break_(None), |s| while_(id("t"), s));
    vec![loops, break_(None)]
  });
  assert_eq!(found, [UndefinedBreakTarget]);
}

#[test]
fn deep_array_nesting() {
  let found = check_on_small_stack(|| {
    let nested = nest_expr(new_target(), |e| arr(vec![LitArrElem::Single(e)]));
    vec![expr_stmt(nested)]
  });
  assert_eq!(found, [NewTargetOutsideFunction]);
}

#[test]
fn deep_right_nested_operands() {
  let found = check_on_small_stack(|| {
    let sum = nest_expr(yield_bare(), |e| binary(OperatorName::Addition, id("a"), e));
    let power = nest_expr(new_target(), |e| binary(OperatorName::Exponentiation, id("a"), e));
    vec![expr_stmt(sum), expr_stmt(power)]
  });
  assert_eq!(found, [YieldOutsideGenerator, NewTargetOutsideFunction]);
}

#[test]
fn deep_assignment_and_unary_chains() {
  let found = check_on_small_stack(|| {
    let assignments = nest_expr(yield_bare(), |e| assign(id("a"), e));
    let unaries = nest_expr(new_target(), |e| unary(OperatorName::LogicalNot, e));
    vec![expr_stmt(assignments), expr_stmt(unaries)]
  });
  assert_eq!(found, [YieldOutsideGenerator, NewTargetOutsideFunction]);
}

#[test]
fn findings_stay_in_pre_order_across_chains() {
  let level = |alternate| cond(yield_bare(), new_target(), alternate);
  let top = top_level(vec![
    expr_stmt(level(level(id("x")))),
    block(vec![
      break_(None),
      block(vec![continue_(None)]),
      return_(None),
    ]),
  ]);
  let found: Vec<EarlyErrorKind> = find_early_errors(&top, TopLevelMode::Global)
    .iter()
    .map(|f| f.kind)
    .collect();
  assert_eq!(found, [
    YieldOutsideGenerator,
    NewTargetOutsideFunction,
    YieldOutsideGenerator,
    NewTargetOutsideFunction,
    UndefinedBreakTarget,
    UndefinedContinueTarget,
    ReturnOutsideFunction,
  ]);
}
