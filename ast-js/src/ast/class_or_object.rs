use derive_more::derive::From;
use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

use super::{expr::{Expr, IdExpr}, func::Func, node::Node, stmt::Stmt};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DirectKeyKind {
  // Identifier or keyword.
  Ident,
  // `key` holds the decoded string value.
  Str,
  // `key` holds the numeric literal text as it should be emitted.
  Num,
  // `#name`; `key` excludes the `#`.
  Private,
}

/// This is a node as the key may not the same as source[node.loc], due to decoding/normalization.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrObjMemberDirectKey {
  #[drive(skip)]
  pub key: String,
  #[drive(skip)]
  pub kind: DirectKeyKind,
}

// WARNING: This enum must exist, and the two variants cannot be merged by representing Direct with an IdExpr, as it's not a usage of a variable.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ClassOrObjKey {
  // Identifier, keyword, string, number, or private name.
  // NOTE: This isn't used by ObjMemberType::Shorthand.
  Direct(Node<ClassOrObjMemberDirectKey>),
  Computed(Node<Expr>),
}

impl ClassOrObjKey {
  /// The property name if statically known and not private.
  pub fn static_name(&self) -> Option<&str> {
    match self {
      ClassOrObjKey::Direct(key) if key.stx.kind != DirectKeyKind::Private => Some(&key.stx.key),
      _ => None,
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrObjGetter {
  pub func: Node<Func>, // `parameters` is empty.
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrObjMethod {
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrObjSetter {
  pub func: Node<Func>, // `parameters` contains exactly one ParamDecl with no `rest`.
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassStaticBlock {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, From, Serialize)]
pub enum ClassOrObjVal {
  Getter(Node<ClassOrObjGetter>),
  Setter(Node<ClassOrObjSetter>),
  Method(Node<ClassOrObjMethod>),
  // Must be Some if object, as shorthands are covered by ObjMemberType::Shorthand.
  // Unlike the others, this is not its own struct as if None, there is no source range.
  Prop(Option<Node<Expr>>),
  // Classes only; the key is ignored.
  StaticBlock(Node<ClassStaticBlock>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ObjMemberType {
  Valued {
    key: ClassOrObjKey,
    val: ClassOrObjVal,
  },
  Shorthand {
    id: Node<IdExpr>,
  },
  Rest {
    val: Node<Expr>,
  },
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassMember {
  pub key: ClassOrObjKey,
  #[drive(skip)]
  pub static_: bool,
  pub val: ClassOrObjVal,
}

// This is a node instead of an enum so that we can replace it when minifying e.g. expanding shorthand to `key: value`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjMember {
  pub typ: ObjMemberType,
}
