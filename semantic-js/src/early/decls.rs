use super::NodeRef;
use ahash::HashSet;
use ast_js::ast::expr::pat::IdPat;
use ast_js::ast::expr::pat::Pat;
use ast_js::ast::import_export::ImportNames;
use ast_js::ast::node::Node;
use ast_js::ast::stmt::decl::VarDecl;
use ast_js::ast::stmt::decl::VarDeclMode;
use ast_js::ast::stmt::ForInOfLhs;
use ast_js::ast::stmt::ForTripleStmtInit;
use ast_js::ast::stmt::Stmt;

/// Pushes every identifier a binding pattern declares, left to right.
pub(super) fn bound_names<'a>(pat: &'a Node<Pat>, out: &mut Vec<&'a Node<IdPat>>) {
  let mut stack = vec![pat];
  while let Some(pat) = stack.pop() {
    match pat.stx.as_ref() {
      Pat::Id(id) => out.push(id),
      Pat::Arr(arr) => {
        if let Some(rest) = &arr.stx.rest {
          stack.push(rest);
        }
        for elem in arr.stx.elements.iter().rev().flatten() {
          stack.push(&elem.target);
        }
      }
      Pat::Obj(obj) => {
        if let Some(rest) = &obj.stx.rest {
          stack.push(rest);
        }
        for prop in obj.stx.properties.iter().rev() {
          stack.push(&prop.stx.target);
        }
      }
      // Only valid in assignment patterns, which bind nothing.
      Pat::AssignTarget(_) => {}
    };
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum DeclLevel {
  Block,
  FunctionBody,
  Script,
  Module,
}

impl DeclLevel {
  /// At the top of a function or script, function declarations hoist like `var`.
  fn functions_are_lexical(self) -> bool {
    matches!(self, DeclLevel::Block | DeclLevel::Module)
  }
}

#[derive(Clone, Copy, Debug)]
pub(super) struct Declared<'a> {
  pub name: &'a str,
  pub node: NodeRef<'a>,
  /// A plain `function` declaration; sloppy blocks may repeat these.
  pub plain_function: bool,
}

/// The declarations a statement list makes directly in its own scope.
#[derive(Default)]
pub(super) struct ScopeDecls<'a> {
  /// In source order.
  pub lexical: Vec<Declared<'a>>,
  /// Top-level function names of a function body or script.
  pub var_functions: Vec<&'a str>,
}

pub(super) fn scope_decls<'a>(
  stmts: impl IntoIterator<Item = &'a Node<Stmt>>,
  level: DeclLevel,
) -> ScopeDecls<'a> {
  let mut decls = ScopeDecls::default();
  let mut ids = Vec::new();
  for stmt in stmts {
    let mut stmt = stmt;
    while let Stmt::Label(label) = stmt.stx.as_ref() {
      stmt = &label.stx.statement;
    }
    match stmt.stx.as_ref() {
      Stmt::VarDecl(decl) if decl.stx.mode.is_lexical() => {
        for declarator in decl.stx.declarators.iter() {
          bound_names(&declarator.pattern, &mut ids);
        }
      }
      Stmt::ClassDecl(decl) => {
        if let Some(name) = &decl.stx.name {
          decls.lexical.push(Declared {
            name: &name.stx.name,
            node: NodeRef::Name(name),
            plain_function: false,
          });
        }
      }
      Stmt::FunctionDecl(decl) => {
        let Some(name) = &decl.stx.name else {
          continue;
        };
        if level.functions_are_lexical() {
          let func = &decl.stx.function.stx;
          decls.lexical.push(Declared {
            name: &name.stx.name,
            node: NodeRef::Name(name),
            plain_function: !func.async_ && !func.generator,
          });
        } else {
          decls.var_functions.push(&name.stx.name);
        }
      }
      Stmt::Import(import) => {
        if let Some(default) = &import.stx.default {
          ids.push(default);
        }
        match &import.stx.names {
          Some(ImportNames::All(alias)) => ids.push(alias),
          Some(ImportNames::Specific(names)) => {
            ids.extend(names.iter().map(|n| &n.stx.alias));
          }
          None => {}
        };
      }
      _ => {}
    };
    decls.lexical.extend(ids.drain(..).map(|id| Declared {
      name: &id.stx.name,
      node: NodeRef::IdPat(id),
      plain_function: false,
    }));
  }
  decls
}

/// Names declared with `var` anywhere under a statement list, without
/// entering nested functions or static blocks. Only statements can declare
/// `var` bindings outside those, so the walk never descends into expressions.
#[derive(Default)]
pub(super) struct VarNames<'a> {
  pub names: HashSet<&'a str>,
  /// The subset declared by `for (var … of …)` heads.
  pub for_of_names: HashSet<&'a str>,
}

impl<'a> VarNames<'a> {
  pub fn of(stmts: impl IntoIterator<Item = &'a Node<Stmt>>) -> VarNames<'a> {
    let mut vars = VarNames::default();
    let mut stack: Vec<&'a Node<Stmt>> = stmts.into_iter().collect();
    while let Some(stmt) = stack.pop() {
      match stmt.stx.as_ref() {
        Stmt::VarDecl(decl) => vars.add_decl(decl),
        Stmt::Block(block) => stack.extend(block.stx.body.iter()),
        Stmt::DoWhile(do_while) => stack.push(&do_while.stx.body),
        Stmt::While(while_stmt) => stack.push(&while_stmt.stx.body),
        Stmt::ForIn(for_in) => {
          if let ForInOfLhs::Decl(VarDeclMode::Var, pat) = &for_in.stx.lhs {
            vars.add_pattern(pat, false);
          }
          stack.extend(for_in.stx.body.stx.body.iter());
        }
        Stmt::ForOf(for_of) => {
          if let ForInOfLhs::Decl(VarDeclMode::Var, pat) = &for_of.stx.lhs {
            vars.add_pattern(pat, true);
          }
          stack.extend(for_of.stx.body.stx.body.iter());
        }
        Stmt::ForTriple(for_triple) => {
          if let ForTripleStmtInit::Decl(decl) = &for_triple.stx.init {
            vars.add_decl(decl);
          }
          stack.extend(for_triple.stx.body.stx.body.iter());
        }
        Stmt::If(if_stmt) => {
          stack.push(&if_stmt.stx.consequent);
          if let Some(alternate) = &if_stmt.stx.alternate {
            stack.push(alternate);
          }
        }
        Stmt::Label(label) => stack.push(&label.stx.statement),
        Stmt::Switch(switch) => {
          for branch in switch.stx.branches.iter() {
            stack.extend(branch.stx.body.iter());
          }
        }
        Stmt::Try(try_stmt) => {
          stack.extend(try_stmt.stx.wrapped.stx.body.iter());
          if let Some(catch) = &try_stmt.stx.catch {
            stack.extend(catch.stx.body.iter());
          }
          if let Some(finally) = &try_stmt.stx.finally {
            stack.extend(finally.stx.body.iter());
          }
        }
        Stmt::With(with) => stack.push(&with.stx.body),
        _ => {}
      };
    }
    vars
  }

  pub fn contains(&self, name: &str) -> bool {
    self.names.contains(name)
  }

  fn add_decl(&mut self, decl: &'a Node<VarDecl>) {
    if decl.stx.mode != VarDeclMode::Var {
      return;
    }
    for declarator in decl.stx.declarators.iter() {
      self.add_pattern(&declarator.pattern, false);
    }
  }

  fn add_pattern(&mut self, pat: &'a Node<Pat>, for_of: bool) {
    let mut ids = Vec::new();
    bound_names(pat, &mut ids);
    for id in ids {
      if for_of {
        self.for_of_names.insert(&id.stx.name);
      }
      self.names.insert(&id.stx.name);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::bound_names;
  use super::scope_decls;
  use super::DeclLevel;
  use super::VarNames;
  use ast_js::ast::stmt::decl::VarDeclMode;
  use ast_js::ast::stmt::ForInOfLhs;
  use ast_js::build::*;

  #[test]
  fn pattern_names_are_in_source_order() {
    let pat = pat_arr(
      vec![
        arr_pat_elem(pat_id("a")),
        None,
        arr_pat_elem(pat_obj(vec![obj_pat_shorthand("b"), obj_pat_prop("k", pat_id("c"))], None)),
      ],
      Some(pat_id("d")),
    );
    let mut ids = Vec::new();
    bound_names(&pat, &mut ids);
    let names: Vec<&str> = ids.iter().map(|id| id.stx.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c", "d"]);
  }

  #[test]
  fn functions_are_lexical_only_in_blocks_and_modules() {
    let body = vec![
      func_decl("f", vec![], vec![]),
      var_decl(VarDeclMode::Let, "x", None),
      label("l", class_decl("C", None, vec![])),
      var_decl(VarDeclMode::Var, "v", None),
    ];
    let block = scope_decls(&body, DeclLevel::Block);
    let names: Vec<&str> = block.lexical.iter().map(|d| d.name).collect();
    assert_eq!(names, ["f", "x", "C"]);
    assert!(block.lexical[0].plain_function);

    let script = scope_decls(&body, DeclLevel::Script);
    let names: Vec<&str> = script.lexical.iter().map(|d| d.name).collect();
    assert_eq!(names, ["x", "C"]);
    assert_eq!(script.var_functions, ["f"]);
  }

  #[test]
  fn var_names_skip_nested_functions() {
    let body = vec![
      block(vec![var_decl(VarDeclMode::Var, "a", None)]),
      func_decl("f", vec![], vec![var_decl(VarDeclMode::Var, "b", None)]),
      for_of(
        ForInOfLhs::Decl(VarDeclMode::Var, pat_id("c")),
        id("xs"),
        vec![],
      ),
    ];
    let vars = VarNames::of(&body);
    assert!(vars.contains("a"));
    assert!(!vars.contains("b"));
    assert!(vars.contains("c"));
    assert!(vars.for_of_names.contains("c"));
    assert!(!vars.contains("f"));
  }

  #[test]
  fn var_names_found_under_every_statement_kind() {
    let var = |name: &str| var_decl(VarDeclMode::Var, name, None);
    let body = vec![
      if_(id("t"), var("a"), Some(while_(id("t"), var("b")))),
      label("l", do_while(var("c"), id("t"))),
      try_(vec![var("d")], Some((None, vec![var("e")])), Some(vec![var("f")])),
      switch(id("s"), vec![(Some(id("k")), vec![var("g")])]),
      with(id("o"), block(vec![var_decl(VarDeclMode::Let, "h", None)])),
    ];
    let vars = VarNames::of(&body);
    for name in ["a", "b", "c", "d", "e", "f", "g"] {
      assert!(vars.contains(name), "missing {name}");
    }
    assert!(!vars.contains("h"));
  }

  #[test]
  fn var_names_walk_deep_blocks_without_recursion() {
    let mut stmt = var_decl(VarDeclMode::Var, "deep", None);
    for _ in 0..50_000 {
      stmt = block(vec![stmt]);
    }
    let body = vec![stmt];
    let handle = std::thread::Builder::new()
      .stack_size(2 << 20)
      .spawn(move || {
        let found = VarNames::of(&body).contains("deep");
        // The tree's own drop glue is derived and recursive.
        std::mem::forget(body);
        found
      })
      .expect("spawn thread");
    assert!(handle.join().expect("thread panicked"));
  }
}
