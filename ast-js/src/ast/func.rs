use derive_more::derive::From;
use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

use super::{expr::Expr, node::Node, stmt::{decl::ParamDecl, Stmt}};

// This common type exists for better downstream usage, as one type is easier to match on and wrangle than many different types (ArrowFuncExpr, ClassOrObjMethod, FuncDecl, etc.).
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub arrow: bool,
  #[drive(skip)]
  pub async_: bool,
  #[drive(skip)]
  pub generator: bool,
  pub parameters: Vec<Node<ParamDecl>>,
  pub body: FuncBody,
}

impl Func {
  /// Whether every parameter is a plain identifier without default or rest.
  pub fn has_simple_parameters(&self) -> bool {
    self.parameters.iter().all(|p| {
      !p.stx.rest
        && p.stx.default_value.is_none()
        && matches!(p.stx.pattern.stx.as_ref(), super::expr::pat::Pat::Id(_))
    })
  }
}

// A function body is different from a block statement, as the scopes are different. This doesn't mean much at the syntax level, but helps with downstream usages.
#[derive(Debug, Drive, DriveMut, From, Serialize)]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  // If arrow function.
  Expression(Node<Expr>),
}
