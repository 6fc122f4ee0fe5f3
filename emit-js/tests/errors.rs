use ast_js::ast::func::FuncBody;
use ast_js::ast::node::Node;
use ast_js::ast::stmt::decl::ClassDecl;
use ast_js::ast::stmt::decl::VarDeclMode;
use ast_js::ast::stmt::BlockStmt;
use ast_js::ast::stmt::Stmt;
use ast_js::ast::stmt::TryStmt;
use ast_js::build::*;
use ast_js::loc::Loc;
use emit_js::emit_expr;
use emit_js::emit_top_level;
use emit_js::EmitError;
use emit_js::EmitErrorKind;
use emit_js::EmitOptions;

fn program_error(body: Vec<Node<Stmt>>) -> EmitError {
  emit_top_level(&top_level(body), &EmitOptions::minimal()).expect_err("emit should fail")
}

#[test]
fn try_needs_a_handler() {
  let err = program_error(vec![try_(vec![], None, None)]);
  assert_eq!(err.kind, EmitErrorKind::MissingChild("catch or finally clause"));
}

#[test]
fn error_carries_the_innermost_location() {
  let try_stmt = Node::new(
    Loc(3, 9),
    Stmt::Try(Node::new(Loc(3, 9), TryStmt {
      wrapped: Node::new(Loc(7, 9), BlockStmt { body: vec![] }),
      catch: None,
      finally: None,
    })),
  );
  let outer = Node::new(Loc(0, 11), Stmt::Block(Node::new(Loc(0, 11), BlockStmt {
    body: vec![try_stmt],
  })));
  let err = program_error(vec![outer]);
  assert_eq!(err.loc, Some(Loc(3, 9)));
  assert_eq!(err.to_string(), "node is missing its catch or finally clause at 3..9");
}

#[test]
fn anonymous_class_declaration_needs_default_export() {
  let decl = stmt(ClassDecl {
    export: true,
    export_default: false,
    name: None,
    extends: None,
    members: vec![],
  });
  let err = program_error(vec![decl]);
  assert_eq!(err.kind, EmitErrorKind::MissingChild("class name"));

  let default = stmt(ClassDecl {
    export: false,
    export_default: true,
    name: None,
    extends: None,
    members: vec![],
  });
  let out = emit_top_level(&top_level(vec![default]), &EmitOptions::minimal()).unwrap();
  assert_eq!(out, "export default class{}");
}

#[test]
fn declaration_without_declarators() {
  let err = program_error(vec![decl(VarDeclMode::Const, vec![])]);
  assert_eq!(err.kind, EmitErrorKind::MissingChild("declarator"));
}

#[test]
fn rest_parameter_must_be_last() {
  let err = program_error(vec![func_decl("f", vec![rest_param("a"), param("b")], vec![])]);
  assert!(matches!(err.kind, EmitErrorKind::Unsupported(_)), "{err:?}");
}

#[test]
fn delegating_yield_needs_an_argument() {
  let err = emit_expr(&yield_(None, true), &EmitOptions::minimal()).expect_err("emit should fail");
  assert_eq!(err.kind, EmitErrorKind::MissingChild("yield* argument"));
  assert_eq!(emit_expr(&yield_(None, false), &EmitOptions::minimal()).unwrap(), "yield");
}

#[test]
fn non_arrow_function_needs_a_block_body() {
  let mut function = func(vec![], vec![]);
  function.stx.body = FuncBody::Expression(id("a"));
  let err = emit_expr(&func_expr(None, function), &EmitOptions::minimal()).expect_err("emit should fail");
  assert!(matches!(err.kind, EmitErrorKind::Unsupported(_)), "{err:?}");
}

#[test]
fn getter_takes_no_parameters() {
  let class = class_expr(None, None, vec![class_getter("x", false, func(vec![param("a")], vec![]))]);
  let err = emit_expr(&class, &EmitOptions::minimal()).expect_err("emit should fail");
  assert!(matches!(err.kind, EmitErrorKind::Unsupported(_)), "{err:?}");
}
