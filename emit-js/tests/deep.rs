use ast_js::ast::expr::Expr;
use ast_js::ast::node::Node;
use ast_js::ast::stmt::Stmt;
use ast_js::build::*;
use ast_js::operator::OperatorName::*;
use emit_js::emit_expr;
use emit_js::emit_top_level;
use emit_js::EmitOptions;

const DEPTH: usize = 50_000;

/// Runs `f` on a thread with a 2 MiB stack, so native recursion proportional
/// to nesting depth shows up as an overflow.
fn on_small_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
  std::thread::Builder::new()
    .stack_size(2 << 20)
    .spawn(f)
    .expect("spawn thread")
    .join()
    .expect("thread panicked")
}

fn nest(depth: usize, leaf: Node<Expr>, wrap: impl Fn(Node<Expr>) -> Node<Expr>) -> Node<Expr> {
  let mut cur = leaf;
  for _ in 0..depth {
    cur = wrap(cur);
  }
  cur
}

fn emit_deep(build: impl FnOnce() -> Node<Expr> + Send + 'static) -> String {
  on_small_stack(move || {
    let tree = build();
    let out = emit_expr(&tree, &EmitOptions::minimal()).expect("emit");
    // The tree's own drop glue is derived and recursive.
    std::mem::forget(tree);
    out
  })
}

#[test]
fn deep_prefix_unary_chain() {
  let out = emit_deep(|| nest(DEPTH, id("x"), |e| unary(LogicalNot, e)));
  assert_eq!(out.len(), DEPTH + 1);
  assert!(out.starts_with("!!!!"));
  assert!(out.ends_with("!x"));
}

#[test]
fn deep_assignment_chain() {
  let out = emit_deep(|| nest(DEPTH, id("b"), |e| assign(id("a"), e)));
  assert_eq!(out, format!("{}b", "a=".repeat(DEPTH)));
}

#[test]
fn deep_exponentiation_chain() {
  let out = emit_deep(|| nest(DEPTH, id("b"), |e| binary(Exponentiation, id("a"), e)));
  assert_eq!(out, format!("{}b", "a**".repeat(DEPTH)));
}

#[test]
fn deep_conditional_alternate_chain() {
  let out = emit_deep(|| nest(DEPTH, id("x"), |e| cond(id("t"), id("c"), e)));
  assert_eq!(out, format!("{}x", "t?c:".repeat(DEPTH)));
}

#[test]
fn deep_left_chain_still_flat() {
  let out = emit_deep(|| nest(DEPTH, id("a"), |e| binary(Addition, e, id("b"))));
  assert_eq!(out, format!("a{}", "+b".repeat(DEPTH)));
}

#[test]
fn deep_chain_mixing_kinds() {
  let out = emit_deep(|| {
    nest(DEPTH, id("x"), |e| {
      unary(LogicalNot, cond(id("t"), member(call(id("f"), vec![]), "p"), e))
    })
  });
  let expected = format!("{}x{}", "!(t?f().p:".repeat(DEPTH), ")".repeat(DEPTH));
  assert_eq!(out, expected);
}

#[test]
fn deep_expression_statement_through_top_level() {
  let out = on_small_stack(|| {
    let body: Vec<Node<Stmt>> = vec![
      expr_stmt(nest(DEPTH, id("x"), |e| cond(id("t"), id("c"), e))),
      expr_stmt(nest(DEPTH, id("y"), |e| unary(Typeof, e))),
    ];
    let top = top_level(body);
    let out = emit_top_level(&top, &EmitOptions::minimal()).expect("emit");
    std::mem::forget(top);
    out
  });
  let expected = format!(
    "{}x;{}y;",
    "t?c:".repeat(DEPTH),
    "typeof ".repeat(DEPTH)
  );
  assert_eq!(out, expected);
}
