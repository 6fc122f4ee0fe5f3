use ast_js::ast::expr::lit::LitNumExpr;
use ast_js::ast::expr::pat::IdPat;
use ast_js::ast::expr::pat::Pat;
use ast_js::ast::expr::BinaryExpr;
use ast_js::ast::expr::Expr;
use ast_js::ast::expr::IdExpr;
use ast_js::ast::node::Node;
use ast_js::ast::stmt::decl::VarDecl;
use ast_js::ast::stmt::decl::VarDeclMode;
use ast_js::ast::stmt::decl::VarDeclarator;
use ast_js::ast::stmt::Stmt;
use ast_js::ast::stx::TopLevel;
use ast_js::build;
use ast_js::loc::LineIndex;
use ast_js::loc::Loc;
use ast_js::num::JsNumber;
use ast_js::operator::OperatorName;
use emit_js::emit_top_level_with_spans;
use emit_js::EmitOptions;
use emit_js::SpanMap;

const SOURCE: &str = "let a = b + 1;";

/// The tree a parser would produce for [`SOURCE`].
fn parsed() -> Node<TopLevel> {
  let b = Node::new(Loc(8, 9), Expr::Id(Node::new(Loc(8, 9), IdExpr { name: "b".into() })));
  let one = Node::new(
    Loc(12, 13),
    Expr::LitNum(Node::new(Loc(12, 13), LitNumExpr {
      value: JsNumber(1.0),
      raw: Some("1".into()),
    })),
  );
  let sum = Node::new(
    Loc(8, 13),
    Expr::Binary(Node::new(Loc(8, 13), BinaryExpr {
      operator: OperatorName::Addition,
      left: b,
      right: one,
    })),
  );
  let pattern = Node::new(Loc(4, 5), Pat::Id(Node::new(Loc(4, 5), IdPat { name: "a".into() })));
  let decl = Node::new(Loc(0, 13), VarDecl {
    export: false,
    mode: VarDeclMode::Let,
    declarators: vec![VarDeclarator {
      pattern,
      initializer: Some(sum),
    }],
  });
  let stmt = Node::new(Loc(0, 14), Stmt::VarDecl(decl));
  Node::new(Loc(0, 14), TopLevel { body: vec![stmt] })
}

fn emit(opts: &EmitOptions) -> (String, SpanMap) {
  let index = LineIndex::new(SOURCE);
  emit_top_level_with_spans(&parsed(), opts, &index).expect("emit")
}

#[test]
fn minimal_output_maps_back_to_source() {
  let (out, map) = emit(&EmitOptions::minimal());
  assert_eq!(out, "let a=b+1;");

  let sum = map
    .iter()
    .find(|m| m.original.start == 8 && m.original.end == 13)
    .expect("mapping for b + 1");
  assert_eq!((sum.output_start, sum.output_end), (6, 9));
  assert_eq!(&out[sum.output_start..sum.output_end], "b+1");

  let name = map
    .iter()
    .find(|m| m.original.start == 4)
    .expect("mapping for the binding");
  assert_eq!(&out[name.output_start..name.output_end], "a");

  let innermost = map.lookup(8).expect("mapping at the literal");
  assert_eq!((innermost.original.start, innermost.original.end), (12, 13));
  assert_eq!(innermost.original.start_column, 12);
}

#[test]
fn mappings_are_in_entry_order_and_nest() {
  let (_, map) = emit(&EmitOptions::minimal());
  let mappings = map.mappings();
  assert!(mappings.len() >= 7, "{mappings:?}");
  for pair in mappings.windows(2) {
    assert!(pair[0].output_start <= pair[1].output_start, "{mappings:?}");
  }
  for (i, outer) in mappings.iter().enumerate() {
    for inner in &mappings[i + 1..] {
      let disjoint = inner.output_start >= outer.output_end;
      let nested = inner.output_start >= outer.output_start && inner.output_end <= outer.output_end;
      assert!(disjoint || nested, "{outer:?} and {inner:?} overlap");
    }
  }
}

#[test]
fn pretty_output_of_canonical_source_maps_onto_itself() {
  let (out, map) = emit(&EmitOptions::pretty());
  assert_eq!(out, SOURCE);
  assert!(!map.is_empty());
  for m in map.iter() {
    assert_eq!((m.output_start, m.output_end), (m.original.start, m.original.end), "{m:?}");
  }
}

#[test]
fn synthetic_nodes_have_no_mappings() {
  let top = build::top_level(vec![build::var_decl(
    VarDeclMode::Let,
    "a",
    Some(build::binary(OperatorName::Addition, build::id("b"), build::num(1.0))),
  )]);
  let index = LineIndex::new(SOURCE);
  let (out, map) = emit_top_level_with_spans(&top, &EmitOptions::minimal(), &index).expect("emit");
  assert_eq!(out, "let a=b+1;");
  assert!(map.is_empty());
}

#[test]
fn span_map_serializes() {
  let (_, map) = emit(&EmitOptions::minimal());
  let json = serde_json::to_value(&map).expect("serialize");
  let first = &json["mappings"][0];
  assert_eq!(first["output_start"], 0);
  assert_eq!(first["original"]["end"], 14);
}
