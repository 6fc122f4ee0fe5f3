//! Constructors for synthesizing syntax trees.
//!
//! Every node built here is marked [`Synthetic`](crate::ast::node::Synthetic),
//! so location-aware consumers know it has no source position. Use
//! [`Node::new`] directly when a location is known.

use crate::ast::class_or_object::{
  ClassMember, ClassOrObjGetter, ClassOrObjKey, ClassOrObjMemberDirectKey, ClassOrObjMethod,
  ClassOrObjSetter, ClassOrObjVal, ClassStaticBlock, DirectKeyKind, ObjMember, ObjMemberType,
};
use crate::ast::expr::lit::{
  LitArrElem, LitArrExpr, LitBigIntExpr, LitBoolExpr, LitNullExpr, LitNumExpr, LitObjExpr,
  LitRegexExpr, LitStrExpr, LitTemplateExpr, LitTemplatePart,
};
use crate::ast::expr::pat::{ArrPat, ArrPatElem, ClassOrFuncName, IdPat, ObjPat, ObjPatProp, Pat};
use crate::ast::expr::{
  ArrowFuncExpr, BinaryExpr, CallArg, CallExpr, ClassExpr, ComputedMemberExpr, CondExpr, Expr,
  FuncExpr, IdExpr, ImportExpr, ImportMeta, MemberExpr, NewExpr, NewTarget, SuperExpr,
  TaggedTemplateExpr, ThisExpr, UnaryExpr, UnaryPostfixExpr, YieldExpr,
};
use crate::ast::func::{Func, FuncBody};
use crate::ast::node::Node;
use crate::ast::stmt::decl::{ClassDecl, FuncDecl, ParamDecl, VarDecl, VarDeclMode, VarDeclarator};
use crate::ast::stmt::{
  BlockStmt, BreakStmt, CatchBlock, ContinueStmt, DebuggerStmt, DoWhileStmt, EmptyStmt,
  ExportDefaultExprStmt, ExprStmt, ForBody, ForInOfLhs, ForInStmt, ForOfStmt, ForTripleStmt,
  ForTripleStmtInit, IfStmt, LabelStmt, ReturnStmt, Stmt, SwitchBranch, SwitchStmt, ThrowStmt,
  TryStmt, WhileStmt, WithStmt,
};
use crate::ast::stx::TopLevel;
use crate::num::JsNumber;
use crate::operator::OperatorName;
use derive_visitor::{Drive, DriveMut};

pub fn node<S: Drive + DriveMut>(stx: S) -> Node<S> {
  Node::synthetic(stx)
}

pub fn expr<S: Drive + DriveMut>(stx: S) -> Node<Expr>
where
  Node<S>: Into<Expr>,
{
  node(node(stx).into())
}

pub fn stmt<S: Drive + DriveMut>(stx: S) -> Node<Stmt>
where
  Node<S>: Into<Stmt>,
{
  node(node(stx).into())
}

// Expressions.

pub fn id(name: &str) -> Node<Expr> {
  expr(IdExpr { name: name.into() })
}

pub fn this() -> Node<Expr> {
  expr(ThisExpr {})
}

pub fn super_() -> Node<Expr> {
  expr(SuperExpr {})
}

pub fn new_target() -> Node<Expr> {
  expr(NewTarget {})
}

pub fn import_meta() -> Node<Expr> {
  expr(ImportMeta {})
}

pub fn null() -> Node<Expr> {
  expr(LitNullExpr {})
}

pub fn bool_(value: bool) -> Node<Expr> {
  expr(LitBoolExpr { value })
}

pub fn num(value: f64) -> Node<Expr> {
  expr(LitNumExpr {
    value: JsNumber(value),
    raw: None,
  })
}

/// A number literal that remembers its source spelling, e.g. `010`.
pub fn num_raw(value: f64, raw: &str) -> Node<Expr> {
  expr(LitNumExpr {
    value: JsNumber(value),
    raw: Some(raw.into()),
  })
}

pub fn bigint(digits: &str) -> Node<Expr> {
  expr(LitBigIntExpr {
    value: digits.into(),
  })
}

pub fn str_(value: &str) -> Node<Expr> {
  expr(LitStrExpr {
    value: value.into(),
    raw: None,
  })
}

/// A string literal with its source spelling (including quotes).
pub fn str_raw(value: &str, raw: &str) -> Node<Expr> {
  expr(LitStrExpr {
    value: value.into(),
    raw: Some(raw.into()),
  })
}

pub fn regex(value: &str) -> Node<Expr> {
  expr(LitRegexExpr {
    value: value.into(),
  })
}

pub fn template(parts: Vec<LitTemplatePart>) -> Node<Expr> {
  expr(LitTemplateExpr { parts })
}

pub fn tagged_template(function: Node<Expr>, parts: Vec<LitTemplatePart>) -> Node<Expr> {
  expr(TaggedTemplateExpr { function, parts })
}

pub fn arr(elements: Vec<LitArrElem>) -> Node<Expr> {
  expr(LitArrExpr { elements })
}

pub fn obj(members: Vec<Node<ObjMember>>) -> Node<Expr> {
  expr(LitObjExpr { members })
}

pub fn binary(operator: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  expr(BinaryExpr {
    operator,
    left,
    right,
  })
}

pub fn assign(left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  binary(OperatorName::Assignment, left, right)
}

pub fn unary(operator: OperatorName, argument: Node<Expr>) -> Node<Expr> {
  expr(UnaryExpr { operator, argument })
}

pub fn postfix(operator: OperatorName, argument: Node<Expr>) -> Node<Expr> {
  expr(UnaryPostfixExpr { operator, argument })
}

pub fn cond(test: Node<Expr>, consequent: Node<Expr>, alternate: Node<Expr>) -> Node<Expr> {
  expr(CondExpr {
    test,
    consequent,
    alternate,
  })
}

pub fn arg(value: Node<Expr>) -> Node<CallArg> {
  node(CallArg {
    spread: false,
    value,
  })
}

pub fn spread_arg(value: Node<Expr>) -> Node<CallArg> {
  node(CallArg {
    spread: true,
    value,
  })
}

pub fn call(callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  expr(CallExpr {
    optional_chaining: false,
    callee,
    arguments: arguments.into_iter().map(arg).collect(),
  })
}

pub fn optional_call(callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  expr(CallExpr {
    optional_chaining: true,
    callee,
    arguments: arguments.into_iter().map(arg).collect(),
  })
}

pub fn new_(callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  expr(NewExpr {
    callee,
    arguments: arguments.into_iter().map(arg).collect(),
  })
}

pub fn import_call(module: Node<Expr>) -> Node<Expr> {
  expr(ImportExpr { module })
}

pub fn member(left: Node<Expr>, right: &str) -> Node<Expr> {
  expr(MemberExpr {
    optional_chaining: false,
    left,
    right: right.into(),
  })
}

pub fn optional_member(left: Node<Expr>, right: &str) -> Node<Expr> {
  expr(MemberExpr {
    optional_chaining: true,
    left,
    right: right.into(),
  })
}

pub fn computed_member(object: Node<Expr>, member: Node<Expr>) -> Node<Expr> {
  expr(ComputedMemberExpr {
    optional_chaining: false,
    object,
    member,
  })
}

pub fn yield_(argument: Option<Node<Expr>>, delegate: bool) -> Node<Expr> {
  expr(YieldExpr { delegate, argument })
}

pub fn await_(argument: Node<Expr>) -> Node<Expr> {
  unary(OperatorName::Await, argument)
}

pub fn func_expr(name: Option<&str>, func: Node<Func>) -> Node<Expr> {
  expr(FuncExpr {
    name: name.map(class_or_func_name),
    func,
  })
}

pub fn arrow(parameters: Vec<Node<ParamDecl>>, body: impl Into<FuncBody>) -> Node<Expr> {
  expr(ArrowFuncExpr {
    func: node(Func {
      arrow: true,
      async_: false,
      generator: false,
      parameters,
      body: body.into(),
    }),
  })
}

pub fn class_expr(
  name: Option<&str>,
  extends: Option<Node<Expr>>,
  members: Vec<Node<ClassMember>>,
) -> Node<Expr> {
  expr(ClassExpr {
    name: name.map(class_or_func_name),
    extends,
    members,
  })
}

// Patterns.

pub fn id_pat(name: &str) -> Node<IdPat> {
  node(IdPat { name: name.into() })
}

pub fn pat_id(name: &str) -> Node<Pat> {
  node(Pat::Id(id_pat(name)))
}

pub fn pat_arr(elements: Vec<Option<ArrPatElem>>, rest: Option<Node<Pat>>) -> Node<Pat> {
  node(Pat::Arr(node(ArrPat { elements, rest })))
}

pub fn pat_obj(properties: Vec<Node<ObjPatProp>>, rest: Option<Node<Pat>>) -> Node<Pat> {
  node(Pat::Obj(node(ObjPat { properties, rest })))
}

pub fn pat_target(target: Node<Expr>) -> Node<Pat> {
  node(Pat::AssignTarget(target))
}

pub fn arr_pat_elem(target: Node<Pat>) -> Option<ArrPatElem> {
  Some(ArrPatElem {
    target,
    default_value: None,
  })
}

pub fn obj_pat_shorthand(name: &str) -> Node<ObjPatProp> {
  node(ObjPatProp {
    key: direct_key(name, DirectKeyKind::Ident),
    target: pat_id(name),
    shorthand: true,
    default_value: None,
  })
}

pub fn obj_pat_prop(key: &str, target: Node<Pat>) -> Node<ObjPatProp> {
  node(ObjPatProp {
    key: direct_key(key, DirectKeyKind::Ident),
    target,
    shorthand: false,
    default_value: None,
  })
}

/// `[a, b]` as an assignment target expression.
pub fn arr_pat_expr(elements: Vec<Option<ArrPatElem>>, rest: Option<Node<Pat>>) -> Node<Expr> {
  expr(ArrPat { elements, rest })
}

/// `{a, b}` as an assignment target expression.
pub fn obj_pat_expr(properties: Vec<Node<ObjPatProp>>, rest: Option<Node<Pat>>) -> Node<Expr> {
  expr(ObjPat { properties, rest })
}

pub fn class_or_func_name(name: &str) -> Node<ClassOrFuncName> {
  node(ClassOrFuncName { name: name.into() })
}

// Functions, classes and objects.

pub fn param(name: &str) -> Node<ParamDecl> {
  node(ParamDecl {
    rest: false,
    pattern: pat_id(name),
    default_value: None,
  })
}

pub fn param_with_default(name: &str, default_value: Node<Expr>) -> Node<ParamDecl> {
  node(ParamDecl {
    rest: false,
    pattern: pat_id(name),
    default_value: Some(default_value),
  })
}

pub fn rest_param(name: &str) -> Node<ParamDecl> {
  node(ParamDecl {
    rest: true,
    pattern: pat_id(name),
    default_value: None,
  })
}

pub fn func(parameters: Vec<Node<ParamDecl>>, body: Vec<Node<Stmt>>) -> Node<Func> {
  node(Func {
    arrow: false,
    async_: false,
    generator: false,
    parameters,
    body: FuncBody::Block(body),
  })
}

pub fn direct_key(key: &str, kind: DirectKeyKind) -> ClassOrObjKey {
  ClassOrObjKey::Direct(node(ClassOrObjMemberDirectKey {
    key: key.into(),
    kind,
  }))
}

pub fn obj_prop(key: &str, value: Node<Expr>) -> Node<ObjMember> {
  node(ObjMember {
    typ: ObjMemberType::Valued {
      key: direct_key(key, DirectKeyKind::Ident),
      val: ClassOrObjVal::Prop(Some(value)),
    },
  })
}

pub fn obj_shorthand(name: &str) -> Node<ObjMember> {
  node(ObjMember {
    typ: ObjMemberType::Shorthand {
      id: node(IdExpr { name: name.into() }),
    },
  })
}

pub fn obj_spread(value: Node<Expr>) -> Node<ObjMember> {
  node(ObjMember {
    typ: ObjMemberType::Rest { val: value },
  })
}

pub fn class_method(key: &str, static_: bool, func: Node<Func>) -> Node<ClassMember> {
  node(ClassMember {
    key: direct_key(key, DirectKeyKind::Ident),
    static_,
    val: ClassOrObjVal::Method(node(ClassOrObjMethod { func })),
  })
}

pub fn class_getter(key: &str, static_: bool, func: Node<Func>) -> Node<ClassMember> {
  node(ClassMember {
    key: direct_key(key, DirectKeyKind::Ident),
    static_,
    val: ClassOrObjVal::Getter(node(ClassOrObjGetter { func })),
  })
}

pub fn class_setter(key: &str, static_: bool, func: Node<Func>) -> Node<ClassMember> {
  node(ClassMember {
    key: direct_key(key, DirectKeyKind::Ident),
    static_,
    val: ClassOrObjVal::Setter(node(ClassOrObjSetter { func })),
  })
}

pub fn class_field(key: &str, static_: bool, value: Option<Node<Expr>>) -> Node<ClassMember> {
  node(ClassMember {
    key: direct_key(key, DirectKeyKind::Ident),
    static_,
    val: ClassOrObjVal::Prop(value),
  })
}

pub fn class_static_block(body: Vec<Node<Stmt>>) -> Node<ClassMember> {
  node(ClassMember {
    key: direct_key("static", DirectKeyKind::Ident),
    static_: true,
    val: ClassOrObjVal::StaticBlock(node(ClassStaticBlock { body })),
  })
}

// Statements.

pub fn expr_stmt(expr: Node<Expr>) -> Node<Stmt> {
  stmt(ExprStmt { expr })
}

/// A directive prologue entry, e.g. `"use strict"`.
pub fn directive(value: &str) -> Node<Stmt> {
  expr_stmt(str_raw(value, &format!("\"{value}\"")))
}

pub fn block(body: Vec<Node<Stmt>>) -> Node<Stmt> {
  stmt(BlockStmt { body })
}

pub fn block_stmt(body: Vec<Node<Stmt>>) -> Node<BlockStmt> {
  node(BlockStmt { body })
}

pub fn empty() -> Node<Stmt> {
  stmt(EmptyStmt {})
}

pub fn debugger() -> Node<Stmt> {
  stmt(DebuggerStmt {})
}

pub fn var_decl(mode: VarDeclMode, name: &str, initializer: Option<Node<Expr>>) -> Node<Stmt> {
  decl(mode, vec![declarator(pat_id(name), initializer)])
}

pub fn declarator(pattern: Node<Pat>, initializer: Option<Node<Expr>>) -> VarDeclarator {
  VarDeclarator {
    pattern,
    initializer,
  }
}

pub fn decl(mode: VarDeclMode, declarators: Vec<VarDeclarator>) -> Node<Stmt> {
  stmt(VarDecl {
    export: false,
    mode,
    declarators,
  })
}

pub fn var_decl_node(mode: VarDeclMode, declarators: Vec<VarDeclarator>) -> Node<VarDecl> {
  node(VarDecl {
    export: false,
    mode,
    declarators,
  })
}

pub fn func_decl(name: &str, parameters: Vec<Node<ParamDecl>>, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  stmt(FuncDecl {
    export: false,
    export_default: false,
    name: Some(class_or_func_name(name)),
    function: func(parameters, body),
  })
}

pub fn func_decl_with(name: &str, function: Node<Func>) -> Node<Stmt> {
  stmt(FuncDecl {
    export: false,
    export_default: false,
    name: Some(class_or_func_name(name)),
    function,
  })
}

pub fn class_decl(
  name: &str,
  extends: Option<Node<Expr>>,
  members: Vec<Node<ClassMember>>,
) -> Node<Stmt> {
  stmt(ClassDecl {
    export: false,
    export_default: false,
    name: Some(class_or_func_name(name)),
    extends,
    members,
  })
}

pub fn if_(test: Node<Expr>, consequent: Node<Stmt>, alternate: Option<Node<Stmt>>) -> Node<Stmt> {
  stmt(IfStmt {
    test,
    consequent,
    alternate,
  })
}

pub fn while_(condition: Node<Expr>, body: Node<Stmt>) -> Node<Stmt> {
  stmt(WhileStmt { condition, body })
}

pub fn do_while(body: Node<Stmt>, condition: Node<Expr>) -> Node<Stmt> {
  stmt(DoWhileStmt { condition, body })
}

pub fn for_body(body: Vec<Node<Stmt>>) -> Node<ForBody> {
  node(ForBody { body })
}

pub fn for_triple(
  init: ForTripleStmtInit,
  cond: Option<Node<Expr>>,
  post: Option<Node<Expr>>,
  body: Vec<Node<Stmt>>,
) -> Node<Stmt> {
  stmt(ForTripleStmt {
    init,
    cond,
    post,
    body: for_body(body),
  })
}

pub fn for_in(lhs: ForInOfLhs, rhs: Node<Expr>, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  stmt(ForInStmt {
    lhs,
    rhs,
    body: for_body(body),
  })
}

pub fn for_of(lhs: ForInOfLhs, rhs: Node<Expr>, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  stmt(ForOfStmt {
    await_: false,
    lhs,
    rhs,
    body: for_body(body),
  })
}

pub fn label(name: &str, statement: Node<Stmt>) -> Node<Stmt> {
  stmt(LabelStmt {
    name: name.into(),
    statement,
  })
}

pub fn break_(label: Option<&str>) -> Node<Stmt> {
  stmt(BreakStmt {
    label: label.map(Into::into),
  })
}

pub fn continue_(label: Option<&str>) -> Node<Stmt> {
  stmt(ContinueStmt {
    label: label.map(Into::into),
  })
}

pub fn return_(value: Option<Node<Expr>>) -> Node<Stmt> {
  stmt(ReturnStmt { value })
}

pub fn throw(value: Node<Expr>) -> Node<Stmt> {
  stmt(ThrowStmt { value })
}

pub fn try_(
  wrapped: Vec<Node<Stmt>>,
  catch: Option<(Option<Node<Pat>>, Vec<Node<Stmt>>)>,
  finally: Option<Vec<Node<Stmt>>>,
) -> Node<Stmt> {
  stmt(TryStmt {
    wrapped: block_stmt(wrapped),
    catch: catch.map(|(parameter, body)| node(CatchBlock { parameter, body })),
    finally: finally.map(block_stmt),
  })
}

pub fn switch(test: Node<Expr>, branches: Vec<(Option<Node<Expr>>, Vec<Node<Stmt>>)>) -> Node<Stmt> {
  stmt(SwitchStmt {
    test,
    branches: branches
      .into_iter()
      .map(|(case, body)| node(SwitchBranch { case, body }))
      .collect(),
  })
}

pub fn with(object: Node<Expr>, body: Node<Stmt>) -> Node<Stmt> {
  stmt(WithStmt { object, body })
}

pub fn export_default_expr(expression: Node<Expr>) -> Node<Stmt> {
  stmt(ExportDefaultExprStmt { expression })
}

pub fn top_level(body: Vec<Node<Stmt>>) -> Node<TopLevel> {
  node(TopLevel { body })
}
