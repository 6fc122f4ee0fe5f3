use crate::emitter::with_node_context;
use crate::emitter::EmitError;
use crate::emitter::EmitResult;
use crate::escape::string_literal;
use crate::expr::braced;
use crate::expr::comma_separated;
use crate::expr::Renderer;
use crate::fragment::Fragment;
use crate::precedence::ASSIGNMENT;
use crate::stmt_start::export_default_needs_parens;
use crate::stmt_start::expr_stmt_needs_parens;
use crate::stmt_start::for_init_needs_parens;
use crate::stmt_start::for_in_of_target_needs_parens;
use crate::stmt_start::has_unbracketed_in;
use ast_js::ast::expr::Expr;
use ast_js::ast::import_export::ExportNames;
use ast_js::ast::import_export::ImportNames;
use ast_js::ast::import_export::ModuleExportImportName;
use ast_js::ast::node::Node;
use ast_js::ast::stmt::decl::VarDecl;
use ast_js::ast::stmt::ForBody;
use ast_js::ast::stmt::ForInOfLhs;
use ast_js::ast::stmt::ForTripleStmtInit;
use ast_js::ast::stmt::Stmt;
use ast_js::ast::stx::TopLevel;

fn semicolon(mut parts: Vec<Fragment>) -> Fragment {
  parts.push(Fragment::punct(";"));
  Fragment::seq(parts)
}

fn module_name(name: &ModuleExportImportName) -> Fragment {
  match name {
    ModuleExportImportName::Ident(name) => Fragment::ident(name.clone()),
    ModuleExportImportName::Str(name) => Fragment::literal(string_literal(name)),
  }
}

/// Follows a statement down its trailing substatements to see whether it ends
/// in an `if` without `else`, which would capture a following `else`.
fn ends_with_open_if(stmt: &Node<Stmt>) -> bool {
  let mut cur = stmt;
  loop {
    cur = match cur.stx.as_ref() {
      Stmt::If(if_stmt) => match &if_stmt.stx.alternate {
        None => return true,
        Some(alternate) => alternate,
      },
      Stmt::Label(label) => &label.stx.statement,
      Stmt::While(while_stmt) => &while_stmt.stx.body,
      Stmt::With(with) => &with.stx.body,
      _ => return false,
    };
  }
}

impl Renderer {
  pub fn top_level(&self, top: &Node<TopLevel>) -> EmitResult<Fragment> {
    let parts = self.stmt_list(&top.stx.body, true)?;
    Ok(self.mark(top, Fragment::seq(parts)))
  }

  /// Statements separated by soft line breaks. A leading run of string
  /// literal statements is a directive prologue when `prologue` is set.
  fn stmt_list(&self, stmts: &[Node<Stmt>], prologue: bool) -> EmitResult<Vec<Fragment>> {
    let mut parts = Vec::with_capacity(stmts.len() * 2);
    let mut in_prologue = prologue;
    for (i, stmt) in stmts.iter().enumerate() {
      if i > 0 {
        parts.push(Fragment::line());
      }
      let directive = match stmt.stx.as_ref() {
        Stmt::Expr(expr_stmt) if in_prologue => match expr_stmt.stx.expr.stx.as_ref() {
          Expr::LitStr(lit) => Some(lit),
          _ => None,
        },
        _ => None,
      };
      in_prologue = directive.is_some();
      parts.push(match directive {
        Some(lit) => {
          // Escapes can turn a directive into a different one, so parsed
          // directives keep their source text.
          let text = match &lit.stx.raw {
            Some(raw) => raw.clone(),
            None => string_literal(&lit.stx.value),
          };
          self.mark(stmt, semicolon(vec![Fragment::literal(text)]))
        }
        None => self.stmt(stmt)?,
      });
    }
    Ok(parts)
  }

  fn braced_stmts(&self, stmts: &[Node<Stmt>], prologue: bool) -> EmitResult<Fragment> {
    if stmts.is_empty() {
      return Ok(Fragment::seq(vec![Fragment::punct("{"), Fragment::punct("}")]));
    }
    let mut inner = vec![Fragment::line()];
    inner.extend(self.stmt_list(stmts, prologue)?);
    Ok(Fragment::seq(vec![
      Fragment::punct("{"),
      Fragment::indent(inner),
      Fragment::line(),
      Fragment::punct("}"),
    ]))
  }

  /// A function body, which may open with directives.
  pub fn body_block(&self, stmts: &[Node<Stmt>]) -> EmitResult<Fragment> {
    self.braced_stmts(stmts, true)
  }

  pub fn block(&self, stmts: &[Node<Stmt>]) -> EmitResult<Fragment> {
    self.braced_stmts(stmts, false)
  }

  fn for_body(&self, body: &Node<ForBody>) -> EmitResult<Fragment> {
    let frag = self.block(&body.stx.body)?;
    Ok(self.mark(body, frag))
  }

  /// The body of `if`, `else`, loops, `with` and labels, with its leading
  /// soft space.
  fn sub_stmt(&self, stmt: &Node<Stmt>) -> EmitResult<Vec<Fragment>> {
    Ok(match stmt.stx.as_ref() {
      Stmt::Empty(_) => vec![self.stmt(stmt)?],
      _ => vec![Fragment::space(), self.stmt(stmt)?],
    })
  }

  pub fn stmt(&self, stmt: &Node<Stmt>) -> EmitResult<Fragment> {
    if let Stmt::If(_) = stmt.stx.as_ref() {
      return self.if_chain(stmt);
    }
    with_node_context(stmt.loc, || {
      let frag = self.stmt_node(stmt)?;
      Ok(self.mark(stmt, frag))
    })
  }

  fn stmt_node(&self, stmt: &Node<Stmt>) -> EmitResult<Fragment> {
    Ok(match stmt.stx.as_ref() {
      Stmt::Block(block) => self.block(&block.stx.body)?,
      Stmt::Break(brk) => {
        let mut parts = vec![Fragment::keyword("break")];
        if let Some(label) = &brk.stx.label {
          parts.push(Fragment::ident(label.clone()));
        }
        semicolon(parts)
      }
      Stmt::Continue(cont) => {
        let mut parts = vec![Fragment::keyword("continue")];
        if let Some(label) = &cont.stx.label {
          parts.push(Fragment::ident(label.clone()));
        }
        semicolon(parts)
      }
      Stmt::Debugger(_) => semicolon(vec![Fragment::keyword("debugger")]),
      Stmt::DoWhile(do_while) => {
        let mut parts = vec![Fragment::keyword("do")];
        parts.extend(self.sub_stmt(&do_while.stx.body)?);
        parts.extend([
          Fragment::space(),
          Fragment::keyword("while"),
          Fragment::space(),
          Fragment::punct("("),
          self.expr(&do_while.stx.condition)?,
          Fragment::punct(")"),
        ]);
        semicolon(parts)
      }
      Stmt::Empty(_) => Fragment::punct(";"),
      Stmt::ExportDefaultExpr(export) => {
        let value = self.expr(&export.stx.expression)?.operand(ASSIGNMENT);
        let value = if export_default_needs_parens(&value) {
          Fragment::paren(value)
        } else {
          value
        };
        semicolon(vec![
          Fragment::keyword("export"),
          Fragment::keyword("default"),
          Fragment::space(),
          value,
        ])
      }
      Stmt::ExportList(export) => {
        let mut parts = vec![Fragment::keyword("export"), Fragment::space()];
        match &export.stx.names {
          ExportNames::All(alias) => {
            parts.push(Fragment::punct("*"));
            if let Some(alias) = alias {
              parts.extend([
                Fragment::space(),
                Fragment::keyword("as"),
                Fragment::space(),
                module_name(alias),
              ]);
            }
            if export.stx.from.is_none() {
              return Err(EmitError::missing("module specifier"));
            }
          }
          ExportNames::Specific(names) => {
            let items = names
              .iter()
              .map(|name| {
                let frag = if name.stx.exportable == name.stx.alias {
                  module_name(&name.stx.exportable)
                } else {
                  Fragment::seq(vec![
                    module_name(&name.stx.exportable),
                    Fragment::space(),
                    Fragment::keyword("as"),
                    Fragment::space(),
                    module_name(&name.stx.alias),
                  ])
                };
                self.mark(name, frag)
              })
              .collect();
            parts.push(braced(items));
          }
        };
        if let Some(from) = &export.stx.from {
          parts.extend([
            Fragment::space(),
            Fragment::keyword("from"),
            Fragment::space(),
            Fragment::literal(string_literal(from)),
          ]);
        }
        semicolon(parts)
      }
      Stmt::Expr(expr_stmt) => {
        let expr = self.expr(&expr_stmt.stx.expr)?;
        let expr = if expr_stmt_needs_parens(&expr) {
          Fragment::paren(expr)
        } else {
          expr
        };
        semicolon(vec![expr])
      }
      Stmt::ForIn(for_in) => Fragment::seq(vec![
        Fragment::keyword("for"),
        Fragment::space(),
        Fragment::punct("("),
        self.for_in_of_lhs(&for_in.stx.lhs, false)?,
        Fragment::keyword("in"),
        Fragment::space(),
        self.expr(&for_in.stx.rhs)?,
        Fragment::punct(")"),
        Fragment::space(),
        self.for_body(&for_in.stx.body)?,
      ]),
      Stmt::ForOf(for_of) => {
        let mut parts = vec![Fragment::keyword("for")];
        if for_of.stx.await_ {
          parts.push(Fragment::keyword("await"));
        }
        parts.extend([
          Fragment::space(),
          Fragment::punct("("),
          self.for_in_of_lhs(&for_of.stx.lhs, true)?,
          Fragment::keyword("of"),
          Fragment::space(),
          self.expr(&for_of.stx.rhs)?.operand(ASSIGNMENT),
          Fragment::punct(")"),
          Fragment::space(),
          self.for_body(&for_of.stx.body)?,
        ]);
        Fragment::seq(parts)
      }
      Stmt::ForTriple(for_triple) => {
        let mut parts = vec![
          Fragment::keyword("for"),
          Fragment::space(),
          Fragment::punct("("),
        ];
        match &for_triple.stx.init {
          ForTripleStmtInit::None => {}
          ForTripleStmtInit::Expr(init) => {
            let init = self.expr(init)?;
            parts.push(if has_unbracketed_in(&init) || for_init_needs_parens(&init) {
              Fragment::paren(init)
            } else {
              init
            });
          }
          ForTripleStmtInit::Decl(decl) => parts.push(self.var_decl(decl, true)?),
        };
        parts.push(Fragment::punct(";"));
        if let Some(cond) = &for_triple.stx.cond {
          parts.push(Fragment::space());
          parts.push(self.expr(cond)?);
        }
        parts.push(Fragment::punct(";"));
        if let Some(post) = &for_triple.stx.post {
          parts.push(Fragment::space());
          parts.push(self.expr(post)?);
        }
        parts.extend([
          Fragment::punct(")"),
          Fragment::space(),
          self.for_body(&for_triple.stx.body)?,
        ]);
        Fragment::seq(parts)
      }
      Stmt::If(_) => return self.if_chain(stmt),
      Stmt::Import(import) => {
        let mut parts = vec![Fragment::keyword("import")];
        let mut clauses = Vec::new();
        if let Some(default) = &import.stx.default {
          clauses.push(self.mark(default, Fragment::ident(default.stx.name.clone())));
        }
        match &import.stx.names {
          Some(ImportNames::All(alias)) => clauses.push(Fragment::seq(vec![
            Fragment::punct("*"),
            Fragment::space(),
            Fragment::keyword("as"),
            Fragment::space(),
            self.mark(alias, Fragment::ident(alias.stx.name.clone())),
          ])),
          Some(ImportNames::Specific(names)) => {
            let items = names
              .iter()
              .map(|name| {
                let alias = self.mark(&name.stx.alias, Fragment::ident(name.stx.alias.stx.name.clone()));
                let same = matches!(
                  &name.stx.importable,
                  ModuleExportImportName::Ident(importable) if *importable == name.stx.alias.stx.name
                );
                let frag = if same {
                  alias
                } else {
                  Fragment::seq(vec![
                    module_name(&name.stx.importable),
                    Fragment::space(),
                    Fragment::keyword("as"),
                    Fragment::space(),
                    alias,
                  ])
                };
                self.mark(name, frag)
              })
              .collect();
            clauses.push(braced(items));
          }
          None => {}
        };
        let has_clauses = !clauses.is_empty();
        if has_clauses {
          parts.push(Fragment::space());
          parts.extend(comma_separated(clauses));
          parts.extend([Fragment::space(), Fragment::keyword("from")]);
        }
        parts.push(Fragment::space());
        parts.push(Fragment::literal(string_literal(&import.stx.module)));
        semicolon(parts)
      }
      Stmt::Label(label) => {
        let mut parts = vec![Fragment::ident(label.stx.name.clone()), Fragment::punct(":")];
        parts.extend(self.sub_stmt(&label.stx.statement)?);
        Fragment::seq(parts)
      }
      Stmt::Return(ret) => {
        let mut parts = vec![Fragment::keyword("return")];
        if let Some(value) = &ret.stx.value {
          parts.push(Fragment::space());
          parts.push(self.expr(value)?);
        }
        semicolon(parts)
      }
      Stmt::Switch(switch) => {
        let mut parts = vec![
          Fragment::keyword("switch"),
          Fragment::space(),
          Fragment::punct("("),
          self.expr(&switch.stx.test)?,
          Fragment::punct(")"),
          Fragment::space(),
          Fragment::punct("{"),
        ];
        let mut branches = Vec::new();
        for branch in &switch.stx.branches {
          let frag = with_node_context(branch.loc, || {
            let mut head = match &branch.stx.case {
              Some(case) => vec![
                Fragment::keyword("case"),
                Fragment::space(),
                self.expr(case)?,
              ],
              None => vec![Fragment::keyword("default")],
            };
            head.push(Fragment::punct(":"));
            if !branch.stx.body.is_empty() {
              let mut body = vec![Fragment::line()];
              body.extend(self.stmt_list(&branch.stx.body, false)?);
              head.push(Fragment::indent(body));
            }
            Ok(self.mark(branch, Fragment::seq(head)))
          })?;
          branches.push(Fragment::line());
          branches.push(frag);
        }
        if !branches.is_empty() {
          parts.push(Fragment::indent(branches));
          parts.push(Fragment::line());
        }
        parts.push(Fragment::punct("}"));
        Fragment::seq(parts)
      }
      Stmt::Throw(throw) => semicolon(vec![
        Fragment::keyword("throw"),
        Fragment::space(),
        self.expr(&throw.stx.value)?,
      ]),
      Stmt::Try(try_stmt) => {
        if try_stmt.stx.catch.is_none() && try_stmt.stx.finally.is_none() {
          return Err(EmitError::missing("catch or finally clause"));
        }
        let wrapped = self.block(&try_stmt.stx.wrapped.stx.body)?;
        let mut parts = vec![
          Fragment::keyword("try"),
          Fragment::space(),
          self.mark(&try_stmt.stx.wrapped, wrapped),
        ];
        if let Some(catch) = &try_stmt.stx.catch {
          let mut clause = vec![Fragment::keyword("catch"), Fragment::space()];
          if let Some(param) = &catch.stx.parameter {
            clause.extend([
              Fragment::punct("("),
              self.pat(param, true)?,
              Fragment::punct(")"),
              Fragment::space(),
            ]);
          }
          clause.push(self.block(&catch.stx.body)?);
          parts.push(Fragment::space());
          parts.push(self.mark(catch, Fragment::seq(clause)));
        }
        if let Some(finally) = &try_stmt.stx.finally {
          let body = self.block(&finally.stx.body)?;
          parts.extend([
            Fragment::space(),
            Fragment::keyword("finally"),
            Fragment::space(),
            self.mark(finally, body),
          ]);
        }
        Fragment::seq(parts)
      }
      Stmt::While(while_stmt) => {
        let mut parts = vec![
          Fragment::keyword("while"),
          Fragment::space(),
          Fragment::punct("("),
          self.expr(&while_stmt.stx.condition)?,
          Fragment::punct(")"),
        ];
        parts.extend(self.sub_stmt(&while_stmt.stx.body)?);
        Fragment::seq(parts)
      }
      Stmt::With(with) => {
        let mut parts = vec![
          Fragment::keyword("with"),
          Fragment::space(),
          Fragment::punct("("),
          self.expr(&with.stx.object)?,
          Fragment::punct(")"),
        ];
        parts.extend(self.sub_stmt(&with.stx.body)?);
        Fragment::seq(parts)
      }
      Stmt::ClassDecl(decl) => {
        if decl.stx.name.is_none() && !decl.stx.export_default {
          return Err(EmitError::missing("class name"));
        }
        let mut parts = export_prefix(decl.stx.export, decl.stx.export_default);
        let name = decl
          .stx
          .name
          .as_ref()
          .map(|name| self.mark(name, Fragment::ident(name.stx.name.clone())));
        parts.extend(self.class(name, decl.stx.extends.as_ref(), &decl.stx.members)?);
        Fragment::seq(parts)
      }
      Stmt::FunctionDecl(decl) => {
        if decl.stx.name.is_none() && !decl.stx.export_default {
          return Err(EmitError::missing("function name"));
        }
        if decl.stx.function.stx.arrow {
          return Err(EmitError::unsupported("arrow function as a declaration"));
        }
        let mut parts = export_prefix(decl.stx.export, decl.stx.export_default);
        let name = decl
          .stx
          .name
          .as_ref()
          .map(|name| self.mark(name, Fragment::ident(name.stx.name.clone())));
        parts.push(self.function(name, &decl.stx.function)?);
        Fragment::seq(parts)
      }
      Stmt::VarDecl(decl) => {
        let mut parts = export_prefix(decl.stx.export, false);
        parts.push(self.var_decl(decl, false)?);
        semicolon(parts)
      }
    })
  }

  /// `if` statements with their `else if` chain, rendered innermost first so
  /// long chains do not recurse.
  fn if_chain(&self, stmt: &Node<Stmt>) -> EmitResult<Fragment> {
    let mut chain = Vec::new();
    let mut cur = stmt;
    while let Stmt::If(if_stmt) = cur.stx.as_ref() {
      chain.push(cur);
      match &if_stmt.stx.alternate {
        Some(alternate) => cur = alternate,
        None => break,
      };
    }
    // The final alternate, unless the chain ends without `else`.
    let mut acc = match cur.stx.as_ref() {
      Stmt::If(_) => None,
      _ => Some(self.stmt(cur)?),
    };

    for node in chain.into_iter().rev() {
      let Stmt::If(if_stmt) = node.stx.as_ref() else {
        continue;
      };
      let frag = with_node_context(node.loc, || {
        let mut parts = vec![
          Fragment::keyword("if"),
          Fragment::space(),
          Fragment::punct("("),
          self.expr(&if_stmt.stx.test)?,
          Fragment::punct(")"),
        ];
        let consequent = &if_stmt.stx.consequent;
        let has_else = acc.is_some();
        if has_else && ends_with_open_if(consequent) {
          let wrapped = Fragment::seq(vec![
            Fragment::punct("{"),
            Fragment::indent(vec![Fragment::line(), self.stmt(consequent)?]),
            Fragment::line(),
            Fragment::punct("}"),
          ]);
          parts.push(Fragment::space());
          parts.push(wrapped);
        } else {
          parts.extend(self.sub_stmt(consequent)?);
        }
        if let Some(alternate) = acc.take() {
          parts.push(Fragment::space());
          parts.push(Fragment::keyword("else"));
          if !matches!(alternate.tokens().next(), Some(t) if t.text == ";") {
            parts.push(Fragment::space());
          }
          parts.push(alternate);
        }
        Ok(self.mark(node, Fragment::seq(parts)))
      })?;
      acc = Some(frag);
    }
    acc.ok_or(EmitError::unsupported("not an if statement"))
  }

  fn for_in_of_lhs(&self, lhs: &ForInOfLhs, of: bool) -> EmitResult<Fragment> {
    let frag = match lhs {
      ForInOfLhs::Decl(mode, pat) => Fragment::seq(vec![
        Fragment::keyword(mode.as_str()),
        Fragment::space(),
        self.pat(pat, true)?,
      ]),
      ForInOfLhs::Assign(pat) => {
        let target = self.pat(pat, false)?;
        if for_in_of_target_needs_parens(&target, of) {
          Fragment::paren(target)
        } else {
          target
        }
      }
    };
    Ok(Fragment::seq(vec![frag, Fragment::space()]))
  }

  /// `var a = 1, b`. Inside a for-loop head, initializers with a bare `in`
  /// are parenthesized.
  pub fn var_decl(&self, decl: &Node<VarDecl>, in_for_init: bool) -> EmitResult<Fragment> {
    if decl.stx.declarators.is_empty() {
      return Err(EmitError::missing("declarator").with_loc(decl.loc));
    }
    let mut declarators = Vec::with_capacity(decl.stx.declarators.len());
    for declarator in &decl.stx.declarators {
      let pattern = self.pat(&declarator.pattern, true)?;
      let frag = match &declarator.initializer {
        None => pattern,
        Some(init) => {
          let init = self.expr(init)?.operand(ASSIGNMENT);
          let init = if in_for_init && has_unbracketed_in(&init) {
            Fragment::paren(init)
          } else {
            init
          };
          Fragment::seq(vec![
            pattern,
            Fragment::space(),
            Fragment::punct("="),
            Fragment::space(),
            init,
          ])
        }
      };
      declarators.push(frag);
    }
    let mut parts = vec![Fragment::keyword(decl.stx.mode.as_str()), Fragment::space()];
    parts.extend(comma_separated(declarators));
    Ok(self.mark(decl, Fragment::seq(parts)))
  }
}

fn export_prefix(export: bool, export_default: bool) -> Vec<Fragment> {
  let mut parts = Vec::new();
  if export || export_default {
    parts.push(Fragment::keyword("export"));
    parts.push(Fragment::space());
  }
  if export_default {
    parts.push(Fragment::keyword("default"));
    parts.push(Fragment::space());
  }
  parts
}

#[cfg(test)]
mod tests {
  use crate::expr::Renderer;
  use crate::policy::EmitOptions;
  use crate::policy::FormatPolicy;
  use ast_js::ast::node::Node;
  use ast_js::ast::stmt::Stmt;
  use ast_js::build;
  use ast_js::operator::OperatorName;

  fn render(stmt: &Node<Stmt>) -> String {
    Renderer::new(&EmitOptions::default())
      .stmt(stmt)
      .unwrap()
      .flatten(&FormatPolicy::minimal())
  }

  #[test]
  fn braces_consequent_that_would_capture_else() {
    let stmt = build::if_(
      build::id("a"),
      build::if_(build::id("b"), build::expr_stmt(build::id("c")), None),
      Some(build::expr_stmt(build::id("d"))),
    );
    assert_eq!(render(&stmt), "if(a){if(b)c;}else d;");
  }

  #[test]
  fn else_if_chains_stay_flat() {
    let mut stmt = build::expr_stmt(build::id("z"));
    for i in 0..500 {
      stmt = build::if_(build::id(&format!("c{i}")), build::empty(), Some(stmt));
    }
    let out = render(&stmt);
    assert!(out.starts_with("if(c499);else if(c498);"));
    assert!(out.ends_with("else z;"));
  }

  #[test]
  fn parenthesizes_in_inside_for_init() {
    let in_expr = build::binary(OperatorName::In, build::id("a"), build::id("b"));
    let stmt = build::for_triple(
      ast_js::ast::stmt::ForTripleStmtInit::Expr(in_expr),
      None,
      None,
      vec![],
    );
    assert_eq!(render(&stmt), "for((a in b);;){}");
  }

  #[test]
  fn for_init_starting_with_let_is_wrapped_only_before_bracket() {
    use ast_js::ast::stmt::ForTripleStmtInit;
    let member = build::member(build::id("let"), "x");
    let stmt = build::for_triple(ForTripleStmtInit::Expr(member), None, None, vec![]);
    assert_eq!(render(&stmt), "for(let.x;;){}");
    let computed = build::computed_member(build::id("let"), build::num(0.0));
    let stmt = build::for_triple(ForTripleStmtInit::Expr(computed), None, None, vec![]);
    assert_eq!(render(&stmt), "for((let[0]);;){}");
  }

  #[test]
  fn statement_expressions_starting_with_function_are_wrapped() {
    let call = build::call(build::func_expr(None, build::func(vec![], vec![])), vec![]);
    assert_eq!(render(&build::expr_stmt(call)), "(function(){}());");
  }
}
