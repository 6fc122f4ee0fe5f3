use derive_visitor::{Drive, DriveMut};
use serde::Serialize;
use std::fmt;

use crate::ast::class_or_object::ClassMember;
use crate::ast::expr::pat::{ClassOrFuncName, Pat};
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::node::Node;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub export_default: bool,
  pub name: Option<Node<ClassOrFuncName>>, // Name can only be omitted in a default export.
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub export_default: bool,
  pub name: Option<Node<ClassOrFuncName>>, // Name can only be omitted in a default export, although a default export function can still have a name.
  pub function: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ParamDecl {
  #[drive(skip)]
  pub rest: bool,
  pub pattern: Node<Pat>,
  pub default_value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDecl {
  #[drive(skip)]
  pub export: bool,
  pub mode: VarDeclMode,
  pub declarators: Vec<VarDeclarator>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDeclarator {
  pub pattern: Node<Pat>,
  pub initializer: Option<Node<Expr>>,
}

/// The declaration keyword of a variable declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Drive, DriveMut, Serialize)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

impl VarDeclMode {
  pub const ALL: [VarDeclMode; 3] = [VarDeclMode::Const, VarDeclMode::Let, VarDeclMode::Var];

  pub fn as_str(self) -> &'static str {
    match self {
      VarDeclMode::Const => "const",
      VarDeclMode::Let => "let",
      VarDeclMode::Var => "var",
    }
  }

  /// `let` and `const` are block scoped; `var` is function scoped.
  pub fn is_lexical(self) -> bool {
    !matches!(self, VarDeclMode::Var)
  }
}

impl fmt::Display for VarDeclMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
