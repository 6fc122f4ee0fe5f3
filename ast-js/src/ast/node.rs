use crate::loc::Loc;
use ahash::HashMap;
use derive_visitor::{Drive, DriveMut};
use serde::{Serialize, Serializer};
use std::any::{Any, TypeId};
use std::fmt;
use std::fmt::{Debug, Formatter};

#[derive(Default)]
pub struct NodeAssocData {
  // Make Node movable across threads by bounding value to Send + Sync too.
  map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl NodeAssocData {
  pub fn get<T: Any>(&self) -> Option<&T> {
    let t = TypeId::of::<T>();
    self.map.get(&t).and_then(|v| v.downcast_ref())
  }

  pub fn set<T: Any + Send + Sync>(&mut self, v: T) {
    let t = TypeId::of::<T>();
    self.map.insert(t, Box::from(v));
  }

  pub fn has<T: Any>(&self) -> bool {
    self.map.contains_key(&TypeId::of::<T>())
  }
}

/// Marks a node that was created by a tool rather than read from source; its
/// `loc` carries no meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Synthetic;

#[derive(Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  // A location is not a SourceSpan; a node may be synthesized after parsing, or carry only a best-effort location.
  #[drive(skip)]
  pub loc: Loc,
  pub stx: Box<S>,
  #[drive(skip)]
  pub assoc: NodeAssocData,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
      assoc: NodeAssocData::default(),
    }
  }

  /// Creates a node with no source location.
  pub fn synthetic(stx: S) -> Node<S> {
    let mut node = Node::new(Loc::default(), stx);
    node.assoc.set(Synthetic);
    node
  }

  pub fn is_synthetic(&self) -> bool {
    self.assoc.has::<Synthetic>()
  }

  /// The node's source location, unless it was synthesized.
  pub fn source_loc(&self) -> Option<Loc> {
    (!self.is_synthetic()).then_some(self.loc)
  }

  pub fn into_stx<T: From<S> + Drive + DriveMut>(self) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(T::from(*self.stx)),
      assoc: self.assoc,
    }
  }

  /// Maps the syntax, keeping the location and associated data.
  pub fn map_stx<T: Drive + DriveMut, F: FnOnce(S) -> T>(self, f: F) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(f(*self.stx)),
      assoc: self.assoc,
    }
  }

  /// Wraps the node inside another node with the same loc, with syntax derived from the provided callback.
  pub fn wrap<T: Drive + DriveMut, F: FnOnce(Node<S>) -> T>(self, f: F) -> Node<T> {
    let loc = self.loc;
    let synthetic = self.is_synthetic();
    let stx = f(self);
    let mut node = Node::new(loc, stx);
    if synthetic {
      node.assoc.set(Synthetic);
    }
    node
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

impl<S: Serialize + Drive + DriveMut> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    self.stx.serialize(serializer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::expr::IdExpr;

  #[test]
  fn test_node_assoc_data() {
    struct MyType(u32);
    let mut assoc = NodeAssocData::default();
    assoc.set(MyType(32));
    let v = assoc.get::<MyType>().unwrap();
    assert_eq!(v.0, 32);
    assert!(!assoc.has::<Synthetic>());
  }

  #[test]
  fn synthetic_nodes_have_no_source_loc() {
    let parsed = Node::new(Loc(3, 4), IdExpr { name: "a".into() });
    assert_eq!(parsed.source_loc(), Some(Loc(3, 4)));
    let synthesized = Node::synthetic(IdExpr { name: "a".into() });
    assert!(synthesized.is_synthetic());
    assert_eq!(synthesized.source_loc(), None);
  }
}
