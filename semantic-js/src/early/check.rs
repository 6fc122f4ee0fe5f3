use super::decls::bound_names;
use super::decls::scope_decls;
use super::decls::DeclLevel;
use super::decls::VarNames;
use super::EarlyError;
use super::EarlyErrorKind;
use super::NodeRef;
use crate::TopLevelMode;
use ahash::HashMap;
use ahash::HashSet;
use ast_js::ast::class_or_object::ClassMember;
use ast_js::ast::class_or_object::ClassOrObjKey;
use ast_js::ast::class_or_object::ClassOrObjVal;
use ast_js::ast::class_or_object::DirectKeyKind;
use ast_js::ast::class_or_object::ObjMember;
use ast_js::ast::class_or_object::ObjMemberType;
use ast_js::ast::expr::lit::LitArrElem;
use ast_js::ast::expr::lit::LitTemplatePart;
use ast_js::ast::expr::pat::ArrPat;
use ast_js::ast::expr::pat::ClassOrFuncName;
use ast_js::ast::expr::pat::IdPat;
use ast_js::ast::expr::pat::ObjPat;
use ast_js::ast::expr::pat::Pat;
use ast_js::ast::expr::CallArg;
use ast_js::ast::expr::Expr;
use ast_js::ast::func::Func;
use ast_js::ast::func::FuncBody;
use ast_js::ast::import_export::ExportNames;
use ast_js::ast::import_export::ImportNames;
use ast_js::ast::import_export::ModuleExportImportName;
use ast_js::ast::node::Node;
use ast_js::ast::stmt::decl::VarDecl;
use ast_js::ast::stmt::decl::VarDeclMode;
use ast_js::ast::stmt::CatchBlock;
use ast_js::ast::stmt::ExportListStmt;
use ast_js::ast::stmt::ForBody;
use ast_js::ast::stmt::ForInOfLhs;
use ast_js::ast::stmt::ForTripleStmtInit;
use ast_js::ast::stmt::ImportStmt;
use ast_js::ast::stmt::LabelStmt;
use ast_js::ast::stmt::Stmt;
use ast_js::ast::stmt::SwitchStmt;
use ast_js::ast::stx::TopLevel;
use ast_js::num::NumericLiteralForm;
use ast_js::operator::OperatorName;
use std::mem;
use tracing::trace;

/// Reserved only in strict mode code.
const STRICT_RESERVED: &[&str] = &[
  "implements",
  "interface",
  "let",
  "package",
  "private",
  "protected",
  "public",
  "static",
  "yield",
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ScopeKind {
  TopLevel,
  Function,
  Block,
  Catch,
  For,
  Switch,
  Class,
  FieldInitializer,
  StaticBlock,
}

#[derive(Clone, Copy, Debug)]
struct Scope {
  kind: ScopeKind,
  strict: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum FnKind {
  Function,
  Arrow,
  Method,
  Constructor { derived: bool },
}

/// Where a statement sits, for the rules on declarations in statement
/// positions and on module items.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Position {
  ModuleItem,
  List,
  If,
  Loop,
  With,
  LabelledInList,
  LabelledInSingle,
}

impl Position {
  fn is_statement_list(self) -> bool {
    matches!(self, Position::ModuleItem | Position::List)
  }
}

#[derive(Clone, Copy, Debug)]
enum PatternMode {
  Binding { lexical: bool },
  Assignment,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum PrivateSlot {
  Getter(bool),
  Setter(bool),
  Other,
}

struct Label<'a> {
  name: &'a str,
  is_loop: bool,
}

/// Pending steps of the walk. Statements and expressions nest through this
/// stack rather than the native one; only function and class boundaries
/// recurse. Children are pushed in reverse so findings come out in source
/// order.
enum Work<'a> {
  Stmt(&'a Node<Stmt>, Position),
  Expr(&'a Node<Expr>),
  Block(&'a [Node<Stmt>]),
  Catch(&'a Node<CatchBlock>),
  PopScope,
  LeaveLoop,
  LeaveSwitch,
  PopLabel,
}

/// What the innermost function-like boundary permits.
struct FnContext<'a> {
  allow_await: bool,
  allow_yield: bool,
  allow_return: bool,
  allow_new_target: bool,
  allow_super_call: bool,
  allow_super_property: bool,
  in_class_init: bool,
  labels: Vec<Label<'a>>,
  loops: usize,
  breakables: usize,
}

impl<'a> FnContext<'a> {
  fn top_level(mode: TopLevelMode) -> FnContext<'a> {
    FnContext {
      allow_await: mode == TopLevelMode::Module,
      allow_yield: false,
      allow_return: false,
      allow_new_target: false,
      allow_super_call: false,
      allow_super_property: false,
      in_class_init: false,
      labels: Vec::new(),
      loops: 0,
      breakables: 0,
    }
  }

  /// Field initializers and static blocks.
  fn class_initializer() -> FnContext<'a> {
    FnContext {
      allow_await: false,
      allow_yield: false,
      allow_return: false,
      allow_new_target: true,
      allow_super_call: false,
      allow_super_property: true,
      in_class_init: true,
      labels: Vec::new(),
      loops: 0,
      breakables: 0,
    }
  }
}

fn has_use_strict_directive(stmts: &[Node<Stmt>]) -> bool {
  for stmt in stmts.iter() {
    let Stmt::Expr(expr_stmt) = stmt.stx.as_ref() else {
      break;
    };
    let Expr::LitStr(lit) = expr_stmt.stx.expr.stx.as_ref() else {
      break;
    };
    // An escaped spelling is not a directive.
    let exact = match lit.stx.raw.as_deref() {
      Some(raw) => raw == "'use strict'" || raw == "\"use strict\"",
      None => lit.stx.value == "use strict",
    };
    if exact {
      return true;
    }
  }
  false
}

/// `\0` followed by a digit, or `\1` through `\9`.
fn has_legacy_octal_escape(raw: &str) -> bool {
  let bytes = raw.as_bytes();
  let mut i = 0;
  while i < bytes.len() {
    if bytes[i] != b'\\' {
      i += 1;
      continue;
    }
    match bytes.get(i + 1) {
      Some(b'0') if bytes.get(i + 2).is_some_and(u8::is_ascii_digit) => return true,
      Some(b'1'..=b'9') => return true,
      _ => {}
    };
    i += 2;
  }
  false
}

fn is_optional_chain(expr: &Node<Expr>) -> bool {
  let mut current = expr;
  loop {
    current = match current.stx.as_ref() {
      Expr::Member(member) => {
        if member.stx.optional_chaining {
          return true;
        }
        &member.stx.left
      }
      Expr::ComputedMember(member) => {
        if member.stx.optional_chaining {
          return true;
        }
        &member.stx.object
      }
      Expr::Call(call) => {
        if call.stx.optional_chaining {
          return true;
        }
        &call.stx.callee
      }
      _ => return false,
    };
  }
}

fn is_module_item(stmt: &Node<Stmt>) -> bool {
  match stmt.stx.as_ref() {
    Stmt::Import(_) | Stmt::ExportList(_) | Stmt::ExportDefaultExpr(_) => true,
    Stmt::ClassDecl(decl) => decl.stx.export || decl.stx.export_default,
    Stmt::FunctionDecl(decl) => decl.stx.export || decl.stx.export_default,
    Stmt::VarDecl(decl) => decl.stx.export,
    _ => false,
  }
}

fn is_loop(stmt: &Node<Stmt>) -> bool {
  matches!(
    stmt.stx.as_ref(),
    Stmt::DoWhile(_) | Stmt::ForIn(_) | Stmt::ForOf(_) | Stmt::ForTriple(_) | Stmt::While(_)
  )
}

/// Every name declared at the top level of a module.
fn module_declared_names(body: &[Node<Stmt>]) -> HashSet<&str> {
  let mut names: HashSet<&str> = scope_decls(body, DeclLevel::Module)
    .lexical
    .iter()
    .map(|decl| decl.name)
    .collect();
  names.extend(VarNames::of(body).names);
  names
}

pub(crate) struct Checker<'a> {
  mode: TopLevelMode,
  findings: Vec<EarlyError<'a>>,
  scopes: Vec<Scope>,
  ctx: FnContext<'a>,
  outer_contexts: Vec<FnContext<'a>>,
  module_names: HashSet<&'a str>,
  exported: HashSet<&'a str>,
}

impl<'a> Checker<'a> {
  pub fn new(mode: TopLevelMode) -> Checker<'a> {
    Checker {
      mode,
      findings: Vec::new(),
      scopes: Vec::new(),
      ctx: FnContext::top_level(mode),
      outer_contexts: Vec::new(),
      module_names: HashSet::default(),
      exported: HashSet::default(),
    }
  }

  pub fn check_top_level(mut self, top: &'a Node<TopLevel>) -> Vec<EarlyError<'a>> {
    let body = &top.stx.body;
    let module = self.mode == TopLevelMode::Module;
    let strict = module || has_use_strict_directive(body);
    self.push_scope(ScopeKind::TopLevel, strict);
    let (level, position) = if module {
      self.module_names = module_declared_names(body);
      (DeclLevel::Module, Position::ModuleItem)
    } else {
      (DeclLevel::Script, Position::List)
    };
    self.check_declarations(body, level, &[]);
    self.stmts(body, position);
    self.pop_scope();
    self.findings
  }

  fn report(&mut self, kind: EarlyErrorKind, node: NodeRef<'a>, message: impl Into<String>) {
    self.findings.push(EarlyError {
      kind,
      message: message.into(),
      node,
    });
  }

  fn strict(&self) -> bool {
    self.scopes.last().is_some_and(|scope| scope.strict)
  }

  fn push_scope(&mut self, kind: ScopeKind, strict: bool) {
    self.scopes.push(Scope { kind, strict });
    trace!(?kind, strict, depth = self.scopes.len(), "enter scope");
  }

  fn pop_scope(&mut self) {
    if let Some(scope) = self.scopes.pop() {
      trace!(kind = ?scope.kind, depth = self.scopes.len(), "exit scope");
    }
  }

  fn enter_context(&mut self, ctx: FnContext<'a>) {
    let outer = mem::replace(&mut self.ctx, ctx);
    self.outer_contexts.push(outer);
  }

  fn exit_context(&mut self) {
    if let Some(outer) = self.outer_contexts.pop() {
      self.ctx = outer;
    }
  }

  /// Duplicate and colliding declarations of a scope about to be entered.
  /// `params` are names bound just outside the statement list that lexical
  /// declarations may not shadow.
  fn check_declarations<I>(&mut self, stmts: I, level: DeclLevel, params: &[&str])
  where
    I: IntoIterator<Item = &'a Node<Stmt>> + Clone,
  {
    let decls = scope_decls(stmts.clone(), level);
    if decls.lexical.is_empty() {
      return;
    }
    let vars = VarNames::of(stmts);
    let annex_b = level == DeclLevel::Block && !self.strict();
    let mut seen: HashMap<&'a str, bool> = HashMap::default();
    for decl in decls.lexical.iter() {
      match seen.get(decl.name) {
        Some(&plain_function) => {
          if !(annex_b && plain_function && decl.plain_function) {
            self.report(
              EarlyErrorKind::DuplicateBinding,
              decl.node,
              format!("`{}` has already been declared", decl.name),
            );
          }
        }
        None => {
          seen.insert(decl.name, decl.plain_function);
        }
      };
      if vars.contains(decl.name) || decls.var_functions.contains(&decl.name) {
        self.report(
          EarlyErrorKind::LexicalVarCollision,
          decl.node,
          format!(
            "lexical declaration of `{}` conflicts with a `var` declaration of the same name",
            decl.name
          ),
        );
      }
      if params.contains(&decl.name) {
        self.report(
          EarlyErrorKind::DuplicateBinding,
          decl.node,
          format!("`{}` is already declared as a parameter", decl.name),
        );
      }
    }
  }

  /// Bindings of a `for` head must be distinct and must not be redeclared with `var` in the body.
  fn lexical_head(
    &mut self,
    patterns: impl IntoIterator<Item = &'a Node<Pat>>,
    body: &'a Node<ForBody>,
  ) {
    let mut ids = Vec::new();
    for pat in patterns {
      bound_names(pat, &mut ids);
    }
    let vars = VarNames::of(&body.stx.body);
    let mut seen: Vec<&'a str> = Vec::new();
    for &id in ids.iter() {
      let name = id.stx.name.as_str();
      if seen.contains(&name) {
        self.report(
          EarlyErrorKind::DuplicateBinding,
          NodeRef::IdPat(id),
          format!("`{name}` has already been declared"),
        );
      } else {
        seen.push(name);
      }
      if vars.contains(name) {
        self.report(
          EarlyErrorKind::LexicalVarCollision,
          NodeRef::IdPat(id),
          format!("lexical declaration of `{name}` conflicts with a `var` declaration of the same name"),
        );
      }
    }
  }

  fn check_binding_name(&mut self, name: &str, node: NodeRef<'a>, lexical: bool, strict: bool) {
    if strict {
      if name == "eval" || name == "arguments" {
        self.report(
          EarlyErrorKind::StrictBinding,
          node,
          format!("`{name}` cannot be declared in strict mode code"),
        );
      } else if STRICT_RESERVED.contains(&name) {
        self.report(
          EarlyErrorKind::StrictBinding,
          node,
          format!("`{name}` is a reserved word in strict mode code"),
        );
      }
    }
    if self.mode == TopLevelMode::Module && name == "await" {
      self.report(
        EarlyErrorKind::StrictBinding,
        node,
        "`await` is a reserved word in module code",
      );
    }
    if lexical && name == "let" {
      self.report(
        EarlyErrorKind::LexicalBindingNamedLet,
        node,
        "lexical declarations cannot bind `let`",
      );
    }
  }

  fn strict_assignment_name(&mut self, name: &str, node: NodeRef<'a>) {
    if self.strict() && (name == "eval" || name == "arguments") {
      self.report(
        EarlyErrorKind::InvalidAssignmentTarget,
        node,
        format!("cannot assign to `{name}` in strict mode code"),
      );
    }
  }

  fn check_simple_target(&mut self, target: &'a Node<Expr>, allow_patterns: bool) {
    let valid = match target.stx.as_ref() {
      Expr::Id(id) => {
        self.strict_assignment_name(&id.stx.name, NodeRef::Expr(target));
        true
      }
      Expr::IdPat(id) => {
        self.strict_assignment_name(&id.stx.name, NodeRef::Expr(target));
        true
      }
      Expr::Member(_) | Expr::ComputedMember(_) => !is_optional_chain(target),
      Expr::ArrPat(_) | Expr::ObjPat(_) => allow_patterns,
      _ => false,
    };
    if !valid {
      self.report(
        EarlyErrorKind::InvalidAssignmentTarget,
        NodeRef::Expr(target),
        "invalid assignment target",
      );
    }
  }

  fn identifier_reference(&mut self, name: &str, node: NodeRef<'a>) {
    if name == "arguments" && self.ctx.in_class_init {
      self.report(
        EarlyErrorKind::ArgumentsInClassInitializer,
        node,
        "`arguments` is not allowed in class field initializers or static blocks",
      );
    }
  }

  fn export_name(&mut self, name: &'a str, node: NodeRef<'a>) {
    if self.mode != TopLevelMode::Module {
      return;
    }
    if !self.exported.insert(name) {
      self.report(
        EarlyErrorKind::DuplicateExport,
        node,
        format!("duplicate export of `{name}`"),
      );
    }
  }

  fn run(&mut self, mut work: Vec<Work<'a>>) {
    while let Some(step) = work.pop() {
      match step {
        Work::Stmt(stmt, position) => self.stmt(stmt, position, &mut work),
        Work::Expr(expr) => self.expr_step(expr, &mut work),
        Work::Block(body) => self.block(body, &mut work),
        Work::Catch(catch) => self.catch(catch, &mut work),
        Work::PopScope => self.pop_scope(),
        Work::LeaveLoop => {
          self.ctx.loops -= 1;
          self.ctx.breakables -= 1;
        }
        Work::LeaveSwitch => self.ctx.breakables -= 1,
        Work::PopLabel => {
          self.ctx.labels.pop();
        }
      };
    }
  }

  fn stmts(&mut self, body: &'a [Node<Stmt>], position: Position) {
    let mut work = Vec::with_capacity(body.len());
    push_stmts(&mut work, body, position);
    self.run(work);
  }

  fn expr(&mut self, expr: &'a Node<Expr>) {
    self.run(vec![Work::Expr(expr)]);
  }

  // Statements.

  fn stmt(&mut self, stmt: &'a Node<Stmt>, position: Position, work: &mut Vec<Work<'a>>) {
    if is_module_item(stmt) {
      if self.mode == TopLevelMode::Global {
        self.report(
          EarlyErrorKind::ModuleSyntaxInScript,
          NodeRef::Stmt(stmt),
          "`import` and `export` may only appear in modules",
        );
      } else if position != Position::ModuleItem {
        self.report(
          EarlyErrorKind::NestedModuleItem,
          NodeRef::Stmt(stmt),
          "`import` and `export` may only appear at the top level of a module",
        );
      }
    }
    match stmt.stx.as_ref() {
      Stmt::Block(block) => self.block(&block.stx.body, work),
      Stmt::Break(brk) => match &brk.stx.label {
        Some(label) => {
          if !self.ctx.labels.iter().any(|l| l.name == label.as_str()) {
            self.report(
              EarlyErrorKind::UndefinedBreakTarget,
              NodeRef::Stmt(stmt),
              format!("label `{label}` does not enclose this `break`"),
            );
          }
        }
        None => {
          if self.ctx.breakables == 0 {
            self.report(
              EarlyErrorKind::UndefinedBreakTarget,
              NodeRef::Stmt(stmt),
              "`break` must be inside a loop or `switch`",
            );
          }
        }
      },
      Stmt::Continue(cont) => match &cont.stx.label {
        Some(label) => match self.ctx.labels.iter().rev().find(|l| l.name == label.as_str()) {
          Some(l) if l.is_loop => {}
          Some(_) => self.report(
            EarlyErrorKind::UndefinedContinueTarget,
            NodeRef::Stmt(stmt),
            format!("label `{label}` does not name an enclosing loop"),
          ),
          None => self.report(
            EarlyErrorKind::UndefinedContinueTarget,
            NodeRef::Stmt(stmt),
            format!("label `{label}` does not enclose this `continue`"),
          ),
        },
        None => {
          if self.ctx.loops == 0 {
            self.report(
              EarlyErrorKind::UndefinedContinueTarget,
              NodeRef::Stmt(stmt),
              "`continue` must be inside a loop",
            );
          }
        }
      },
      Stmt::Debugger(_) | Stmt::Empty(_) => {}
      Stmt::DoWhile(do_while) => {
        work.push(Work::Expr(&do_while.stx.condition));
        self.loop_body(&do_while.stx.body, work);
      }
      Stmt::ExportDefaultExpr(export) => {
        self.export_name("default", NodeRef::Stmt(stmt));
        self.expr(&export.stx.expression);
      }
      Stmt::ExportList(list) => self.export_list(stmt, &list.stx),
      Stmt::Expr(expr_stmt) => work.push(Work::Expr(&expr_stmt.stx.expr)),
      Stmt::ForIn(for_in) => {
        self.push_scope(ScopeKind::For, self.strict());
        self.for_in_of_lhs(&for_in.stx.lhs, &for_in.stx.body);
        self.expr(&for_in.stx.rhs);
        work.push(Work::PopScope);
        self.for_body(&for_in.stx.body, work);
      }
      Stmt::ForOf(for_of) => {
        if for_of.stx.await_ && !self.ctx.allow_await {
          self.report(
            EarlyErrorKind::AwaitOutsideAsync,
            NodeRef::Stmt(stmt),
            "`for await` is only valid in async functions and at the top level of modules",
          );
        }
        self.push_scope(ScopeKind::For, self.strict());
        self.for_in_of_lhs(&for_of.stx.lhs, &for_of.stx.body);
        self.expr(&for_of.stx.rhs);
        work.push(Work::PopScope);
        self.for_body(&for_of.stx.body, work);
      }
      Stmt::ForTriple(for_triple) => {
        let for_triple = for_triple.stx.as_ref();
        self.push_scope(ScopeKind::For, self.strict());
        match &for_triple.init {
          ForTripleStmtInit::None => {}
          ForTripleStmtInit::Expr(init) => self.expr(init),
          ForTripleStmtInit::Decl(decl) => {
            self.var_decl(decl);
            if decl.stx.mode.is_lexical() {
              let patterns = decl.stx.declarators.iter().map(|d| &d.pattern);
              self.lexical_head(patterns, &for_triple.body);
            }
          }
        };
        if let Some(cond) = &for_triple.cond {
          self.expr(cond);
        }
        if let Some(post) = &for_triple.post {
          self.expr(post);
        }
        work.push(Work::PopScope);
        self.for_body(&for_triple.body, work);
      }
      Stmt::If(if_stmt) => {
        self.expr(&if_stmt.stx.test);
        if let Some(alternate) = &if_stmt.stx.alternate {
          work.push(Work::Stmt(alternate, Position::If));
        }
        work.push(Work::Stmt(&if_stmt.stx.consequent, Position::If));
      }
      Stmt::Import(import) => self.import(&import.stx),
      Stmt::Label(label) => self.label(stmt, &label.stx, position, work),
      Stmt::Return(ret) => {
        if !self.ctx.allow_return {
          self.report(
            EarlyErrorKind::ReturnOutsideFunction,
            NodeRef::Stmt(stmt),
            "`return` is only valid inside a function",
          );
        }
        if let Some(value) = &ret.stx.value {
          self.expr(value);
        }
      }
      Stmt::Switch(switch) => self.switch(&switch.stx, work),
      Stmt::Throw(throw) => self.expr(&throw.stx.value),
      Stmt::Try(try_stmt) => {
        if let Some(finally) = &try_stmt.stx.finally {
          work.push(Work::Block(&finally.stx.body));
        }
        if let Some(catch) = &try_stmt.stx.catch {
          work.push(Work::Catch(catch));
        }
        work.push(Work::Block(&try_stmt.stx.wrapped.stx.body));
      }
      Stmt::While(while_stmt) => {
        self.expr(&while_stmt.stx.condition);
        self.loop_body(&while_stmt.stx.body, work);
      }
      Stmt::With(with) => {
        if self.strict() {
          self.report(
            EarlyErrorKind::StrictWith,
            NodeRef::Stmt(stmt),
            "`with` is not allowed in strict mode code",
          );
        }
        self.expr(&with.stx.object);
        work.push(Work::Stmt(&with.stx.body, Position::With));
      }
      Stmt::ClassDecl(decl) => {
        if !position.is_statement_list() {
          self.report(
            EarlyErrorKind::DeclarationInStatementPosition,
            NodeRef::Stmt(stmt),
            "class declarations cannot be the body of a statement; wrap them in a block",
          );
        }
        if decl.stx.export_default {
          self.export_name("default", NodeRef::Stmt(stmt));
        } else if decl.stx.export {
          if let Some(name) = &decl.stx.name {
            self.export_name(&name.stx.name, NodeRef::Name(name));
          }
        }
        self.class(decl.stx.name.as_ref(), decl.stx.extends.as_ref(), &decl.stx.members);
      }
      Stmt::FunctionDecl(decl) => {
        let func = decl.stx.function.stx.as_ref();
        let allowed = match position {
          Position::ModuleItem | Position::List => true,
          Position::If | Position::LabelledInList => {
            !self.strict() && !func.async_ && !func.generator
          }
          Position::Loop | Position::With | Position::LabelledInSingle => false,
        };
        if !allowed {
          self.report(
            EarlyErrorKind::DeclarationInStatementPosition,
            NodeRef::Stmt(stmt),
            "function declarations are not allowed here; wrap them in a block",
          );
        }
        if decl.stx.export_default {
          self.export_name("default", NodeRef::Stmt(stmt));
        } else if decl.stx.export {
          if let Some(name) = &decl.stx.name {
            self.export_name(&name.stx.name, NodeRef::Name(name));
          }
        }
        self.function(&decl.stx.function, decl.stx.name.as_ref(), FnKind::Function);
      }
      Stmt::VarDecl(decl) => {
        if decl.stx.mode.is_lexical() && !position.is_statement_list() {
          self.report(
            EarlyErrorKind::DeclarationInStatementPosition,
            NodeRef::Stmt(stmt),
            format!(
              "`{}` declarations cannot be the body of a statement; wrap them in a block",
              decl.stx.mode
            ),
          );
        }
        if decl.stx.export {
          let mut ids = Vec::new();
          for declarator in decl.stx.declarators.iter() {
            bound_names(&declarator.pattern, &mut ids);
          }
          for id in ids {
            self.export_name(&id.stx.name, NodeRef::IdPat(id));
          }
        }
        self.var_decl(decl);
      }
    };
  }

  fn block(&mut self, body: &'a [Node<Stmt>], work: &mut Vec<Work<'a>>) {
    self.push_scope(ScopeKind::Block, self.strict());
    self.check_declarations(body, DeclLevel::Block, &[]);
    work.push(Work::PopScope);
    push_stmts(work, body, Position::List);
  }

  fn enter_loop(&mut self, work: &mut Vec<Work<'a>>) {
    self.ctx.loops += 1;
    self.ctx.breakables += 1;
    work.push(Work::LeaveLoop);
  }

  fn loop_body(&mut self, body: &'a Node<Stmt>, work: &mut Vec<Work<'a>>) {
    self.enter_loop(work);
    work.push(Work::Stmt(body, Position::Loop));
  }

  fn for_body(&mut self, body: &'a Node<ForBody>, work: &mut Vec<Work<'a>>) {
    self.enter_loop(work);
    work.push(Work::Block(&body.stx.body));
  }

  fn for_in_of_lhs(&mut self, lhs: &'a ForInOfLhs, body: &'a Node<ForBody>) {
    match lhs {
      ForInOfLhs::Assign(pat) => self.pattern(pat, PatternMode::Assignment),
      ForInOfLhs::Decl(mode, pat) => {
        self.pattern(pat, PatternMode::Binding {
          lexical: mode.is_lexical(),
        });
        if mode.is_lexical() {
          self.lexical_head([pat], body);
        }
      }
    };
  }

  fn label(
    &mut self,
    stmt: &'a Node<Stmt>,
    label: &'a LabelStmt,
    position: Position,
    work: &mut Vec<Work<'a>>,
  ) {
    let name = label.name.as_str();
    if self.ctx.labels.iter().any(|l| l.name == name) {
      self.report(
        EarlyErrorKind::DuplicateLabel,
        NodeRef::Stmt(stmt),
        format!("label `{name}` is already declared"),
      );
    }
    let mut target = &label.statement;
    while let Stmt::Label(inner) = target.stx.as_ref() {
      target = &inner.stx.statement;
    }
    self.ctx.labels.push(Label {
      name,
      is_loop: is_loop(target),
    });
    let inner_position = match position {
      Position::ModuleItem | Position::List | Position::LabelledInList => Position::LabelledInList,
      _ => Position::LabelledInSingle,
    };
    work.push(Work::PopLabel);
    work.push(Work::Stmt(&label.statement, inner_position));
  }

  fn switch(&mut self, switch: &'a SwitchStmt, work: &mut Vec<Work<'a>>) {
    self.expr(&switch.test);
    self.push_scope(ScopeKind::Switch, self.strict());
    let cases = switch.branches.iter().flat_map(|branch| branch.stx.body.iter());
    self.check_declarations(cases, DeclLevel::Block, &[]);
    self.ctx.breakables += 1;
    work.push(Work::PopScope);
    work.push(Work::LeaveSwitch);
    for branch in switch.branches.iter().rev() {
      push_stmts(work, &branch.stx.body, Position::List);
      if let Some(case) = &branch.stx.case {
        work.push(Work::Expr(case));
      }
    }
  }

  fn catch(&mut self, catch: &'a Node<CatchBlock>, work: &mut Vec<Work<'a>>) {
    self.push_scope(ScopeKind::Catch, self.strict());
    let mut params: Vec<&'a Node<IdPat>> = Vec::new();
    let mut simple = true;
    if let Some(param) = &catch.stx.parameter {
      bound_names(param, &mut params);
      simple = matches!(param.stx.as_ref(), Pat::Id(_));
      let mut seen: Vec<&'a str> = Vec::new();
      for &id in params.iter() {
        let name = id.stx.name.as_str();
        if seen.contains(&name) {
          self.report(
            EarlyErrorKind::DuplicateBinding,
            NodeRef::IdPat(id),
            format!("`{name}` has already been declared"),
          );
        } else {
          seen.push(name);
        }
      }
      self.pattern(param, PatternMode::Binding { lexical: false });
    }
    let body = &catch.stx.body;
    let names: Vec<&'a str> = params.iter().map(|&id| id.stx.name.as_str()).collect();
    self.check_declarations(body, DeclLevel::Block, &names);
    if !params.is_empty() {
      let vars = VarNames::of(body);
      for &id in params.iter() {
        // A simple parameter may be redeclared with `var`, except by a `for-of` head.
        let collides = if simple {
          vars.for_of_names.contains(id.stx.name.as_str())
        } else {
          vars.contains(&id.stx.name)
        };
        if collides {
          self.report(
            EarlyErrorKind::LexicalVarCollision,
            NodeRef::IdPat(id),
            format!(
              "catch parameter `{}` conflicts with a `var` declaration in the catch block",
              id.stx.name
            ),
          );
        }
      }
    }
    work.push(Work::PopScope);
    push_stmts(work, body, Position::List);
  }

  fn var_decl(&mut self, decl: &'a Node<VarDecl>) {
    let mode = decl.stx.mode;
    for declarator in decl.stx.declarators.iter() {
      self.pattern(&declarator.pattern, PatternMode::Binding {
        lexical: mode.is_lexical(),
      });
      if mode == VarDeclMode::Const && declarator.initializer.is_none() {
        self.report(
          EarlyErrorKind::MissingConstInitializer,
          NodeRef::Pat(&declarator.pattern),
          "`const` declarations must be initialized",
        );
      }
      if let Some(initializer) = &declarator.initializer {
        self.expr(initializer);
      }
    }
  }

  fn import(&mut self, import: &'a ImportStmt) {
    let strict = self.strict();
    if let Some(default) = &import.default {
      self.check_binding_name(&default.stx.name, NodeRef::IdPat(default), false, strict);
    }
    match &import.names {
      Some(ImportNames::All(alias)) => {
        self.check_binding_name(&alias.stx.name, NodeRef::IdPat(alias), false, strict);
      }
      Some(ImportNames::Specific(names)) => {
        for name in names.iter() {
          let alias = &name.stx.alias;
          self.check_binding_name(&alias.stx.name, NodeRef::IdPat(alias), false, strict);
        }
      }
      None => {}
    };
  }

  fn export_list(&mut self, stmt: &'a Node<Stmt>, list: &'a ExportListStmt) {
    match &list.names {
      ExportNames::All(alias) => {
        if let Some(alias) = alias {
          self.export_name(alias.as_str(), NodeRef::Stmt(stmt));
        }
      }
      ExportNames::Specific(names) => {
        for name in names.iter() {
          self.export_name(name.stx.alias.as_str(), NodeRef::ExportName(name));
          if list.from.is_some() || self.mode != TopLevelMode::Module {
            continue;
          }
          match &name.stx.exportable {
            ModuleExportImportName::Ident(local) => {
              if !self.module_names.contains(local.as_str()) {
                self.report(
                  EarlyErrorKind::UnresolvedExport,
                  NodeRef::ExportName(name),
                  format!("exported name `{local}` is not declared in this module"),
                );
              }
            }
            ModuleExportImportName::Str(local) => self.report(
              EarlyErrorKind::UnresolvedExport,
              NodeRef::ExportName(name),
              format!("string export name \"{local}\" requires a `from` clause"),
            ),
          };
        }
      }
    };
  }

  // Patterns.

  fn pattern(&mut self, pat: &'a Node<Pat>, mode: PatternMode) {
    match pat.stx.as_ref() {
      Pat::Id(id) => match mode {
        PatternMode::Binding { lexical } => {
          let strict = self.strict();
          self.check_binding_name(&id.stx.name, NodeRef::IdPat(id), lexical, strict);
        }
        PatternMode::Assignment => {
          self.strict_assignment_name(&id.stx.name, NodeRef::IdPat(id));
          self.identifier_reference(&id.stx.name, NodeRef::IdPat(id));
        }
      },
      Pat::Arr(arr) => self.arr_pattern(&arr.stx, mode),
      Pat::Obj(obj) => self.obj_pattern(&obj.stx, mode),
      Pat::AssignTarget(target) => {
        match mode {
          PatternMode::Binding { .. } => self.report(
            EarlyErrorKind::InvalidAssignmentTarget,
            NodeRef::Pat(pat),
            "declarations can only bind identifiers",
          ),
          PatternMode::Assignment => self.check_simple_target(target, true),
        };
        self.expr(target);
      }
    };
  }

  fn arr_pattern(&mut self, arr: &'a ArrPat, mode: PatternMode) {
    for elem in arr.elements.iter().flatten() {
      self.pattern(&elem.target, mode);
      if let Some(default) = &elem.default_value {
        self.expr(default);
      }
    }
    if let Some(rest) = &arr.rest {
      self.pattern(rest, mode);
    }
  }

  fn obj_pattern(&mut self, obj: &'a ObjPat, mode: PatternMode) {
    for prop in obj.properties.iter() {
      if let ClassOrObjKey::Computed(key) = &prop.stx.key {
        self.expr(key);
      }
      self.pattern(&prop.stx.target, mode);
      if let Some(default) = &prop.stx.default_value {
        self.expr(default);
      }
    }
    if let Some(rest) = &obj.rest {
      self.pattern(rest, mode);
    }
  }

  // Functions and classes.

  fn function(
    &mut self,
    func: &'a Node<Func>,
    name: Option<&'a Node<ClassOrFuncName>>,
    kind: FnKind,
  ) {
    let f = func.stx.as_ref();
    let directive = match &f.body {
      FuncBody::Block(body) => has_use_strict_directive(body),
      FuncBody::Expression(_) => false,
    };
    let strict = self.strict() || directive;
    let simple_parameters = f.has_simple_parameters();
    if let Some(name) = name {
      self.check_binding_name(&name.stx.name, NodeRef::Name(name), false, strict);
    }
    if directive && !simple_parameters {
      self.report(
        EarlyErrorKind::UseStrictNonSimpleParameters,
        NodeRef::Func(func),
        "functions with non-simple parameters cannot contain a \"use strict\" directive",
      );
    }

    let arrow = kind == FnKind::Arrow;
    let ctx = FnContext {
      allow_await: f.async_,
      allow_yield: f.generator && !arrow,
      allow_return: true,
      allow_new_target: !arrow || self.ctx.allow_new_target,
      allow_super_call: match kind {
        FnKind::Arrow => self.ctx.allow_super_call,
        FnKind::Constructor { derived } => derived,
        FnKind::Function | FnKind::Method => false,
      },
      allow_super_property: match kind {
        FnKind::Arrow => self.ctx.allow_super_property,
        FnKind::Method | FnKind::Constructor { .. } => true,
        FnKind::Function => false,
      },
      in_class_init: arrow && self.ctx.in_class_init,
      labels: Vec::new(),
      loops: 0,
      breakables: 0,
    };
    self.enter_context(ctx);
    self.push_scope(ScopeKind::Function, strict);

    let check_duplicates = strict || kind != FnKind::Function || !simple_parameters;
    let mut param_names: Vec<&'a str> = Vec::new();
    let mut ids = Vec::new();
    for param in f.parameters.iter() {
      ids.clear();
      bound_names(&param.stx.pattern, &mut ids);
      for &id in ids.iter() {
        let id_name = id.stx.name.as_str();
        if check_duplicates && param_names.contains(&id_name) {
          self.report(
            EarlyErrorKind::DuplicateParameter,
            NodeRef::IdPat(id),
            format!("duplicate parameter `{id_name}`"),
          );
        }
        param_names.push(id_name);
      }
      self.pattern(&param.stx.pattern, PatternMode::Binding { lexical: false });
      if let Some(default) = &param.stx.default_value {
        self.expr(default);
      }
    }

    match &f.body {
      FuncBody::Block(body) => {
        self.check_declarations(body, DeclLevel::FunctionBody, &param_names);
        self.stmts(body, Position::List);
      }
      FuncBody::Expression(body) => self.expr(body),
    };
    self.pop_scope();
    self.exit_context();
  }

  fn class(
    &mut self,
    name: Option<&'a Node<ClassOrFuncName>>,
    extends: Option<&'a Node<Expr>>,
    members: &'a [Node<ClassMember>],
  ) {
    // All parts of a class are strict mode code.
    if let Some(name) = name {
      self.check_binding_name(&name.stx.name, NodeRef::Name(name), false, true);
    }
    self.push_scope(ScopeKind::Class, true);
    if let Some(extends) = extends {
      self.expr(extends);
    }
    let derived = extends.is_some();
    let mut has_constructor = false;
    let mut private: HashMap<&'a str, PrivateSlot> = HashMap::default();
    for member in members.iter() {
      let m = member.stx.as_ref();
      let node = NodeRef::ClassMember(member);
      let mut constructor = false;
      match &m.key {
        ClassOrObjKey::Direct(key) if !matches!(m.val, ClassOrObjVal::StaticBlock(_)) => {
          let key = key.stx.as_ref();
          if key.kind == DirectKeyKind::Private {
            if key.key == "constructor" {
              self.report(
                EarlyErrorKind::InvalidConstructor,
                node,
                "`#constructor` is not a valid private name",
              );
            }
            let slot = match &m.val {
              ClassOrObjVal::Getter(_) => PrivateSlot::Getter(m.static_),
              ClassOrObjVal::Setter(_) => PrivateSlot::Setter(m.static_),
              _ => PrivateSlot::Other,
            };
            match private.get(key.key.as_str()).copied() {
              None => {
                private.insert(&key.key, slot);
              }
              Some(prev) => {
                let accessor_pair = matches!(
                  (prev, slot),
                  (PrivateSlot::Getter(a), PrivateSlot::Setter(b))
                    | (PrivateSlot::Setter(a), PrivateSlot::Getter(b)) if a == b
                );
                if accessor_pair {
                  private.insert(&key.key, PrivateSlot::Other);
                } else {
                  self.report(
                    EarlyErrorKind::DuplicatePrivateName,
                    node,
                    format!("private name `#{}` is already declared", key.key),
                  );
                }
              }
            };
          } else if key.key == "constructor" {
            match &m.val {
              ClassOrObjVal::Prop(_) => self.report(
                EarlyErrorKind::InvalidConstructor,
                node,
                "class fields cannot be named `constructor`",
              ),
              _ if m.static_ => {}
              ClassOrObjVal::Method(method) => {
                let func = method.stx.func.stx.as_ref();
                if func.async_ || func.generator {
                  self.report(
                    EarlyErrorKind::InvalidConstructor,
                    node,
                    "class constructors cannot be async or generators",
                  );
                } else {
                  if has_constructor {
                    self.report(
                      EarlyErrorKind::DuplicateConstructor,
                      node,
                      "a class may only have one constructor",
                    );
                  }
                  has_constructor = true;
                  constructor = true;
                }
              }
              ClassOrObjVal::Getter(_) | ClassOrObjVal::Setter(_) => self.report(
                EarlyErrorKind::InvalidConstructor,
                node,
                "class constructors cannot be getters or setters",
              ),
              ClassOrObjVal::StaticBlock(_) => {}
            };
          } else if m.static_ && key.key == "prototype" {
            self.report(
              EarlyErrorKind::StaticPrototype,
              node,
              "static class members cannot be named `prototype`",
            );
          }
        }
        ClassOrObjKey::Computed(key) => self.expr(key),
        ClassOrObjKey::Direct(_) => {}
      };

      match &m.val {
        ClassOrObjVal::Getter(getter) => self.function(&getter.stx.func, None, FnKind::Method),
        ClassOrObjVal::Setter(setter) => self.function(&setter.stx.func, None, FnKind::Method),
        ClassOrObjVal::Method(method) => {
          let kind = if constructor {
            FnKind::Constructor { derived }
          } else {
            FnKind::Method
          };
          self.function(&method.stx.func, None, kind);
        }
        ClassOrObjVal::Prop(Some(init)) => {
          self.enter_context(FnContext::class_initializer());
          self.push_scope(ScopeKind::FieldInitializer, true);
          self.expr(init);
          self.pop_scope();
          self.exit_context();
        }
        ClassOrObjVal::Prop(None) => {}
        ClassOrObjVal::StaticBlock(block) => {
          let body = &block.stx.body;
          self.enter_context(FnContext::class_initializer());
          self.push_scope(ScopeKind::StaticBlock, true);
          self.check_declarations(body, DeclLevel::FunctionBody, &[]);
          self.stmts(body, Position::List);
          self.pop_scope();
          self.exit_context();
        }
      };
    }
    self.pop_scope();
  }

  fn object_literal(&mut self, members: &'a [Node<ObjMember>]) {
    let mut has_proto = false;
    for member in members.iter() {
      match &member.stx.typ {
        ObjMemberType::Valued { key, val } => {
          if let (ClassOrObjKey::Direct(direct), ClassOrObjVal::Prop(Some(_))) = (key, val) {
            let direct = direct.stx.as_ref();
            let named = matches!(direct.kind, DirectKeyKind::Ident | DirectKeyKind::Str);
            if named && direct.key == "__proto__" {
              if has_proto {
                self.report(
                  EarlyErrorKind::DuplicateProto,
                  NodeRef::ObjMember(member),
                  "duplicate `__proto__` property in object literal",
                );
              }
              has_proto = true;
            }
          }
          if let ClassOrObjKey::Computed(key) = key {
            self.expr(key);
          }
          match val {
            ClassOrObjVal::Getter(getter) => self.function(&getter.stx.func, None, FnKind::Method),
            ClassOrObjVal::Setter(setter) => self.function(&setter.stx.func, None, FnKind::Method),
            ClassOrObjVal::Method(method) => self.function(&method.stx.func, None, FnKind::Method),
            ClassOrObjVal::Prop(Some(value)) => self.expr(value),
            ClassOrObjVal::Prop(None) | ClassOrObjVal::StaticBlock(_) => {}
          };
        }
        ObjMemberType::Shorthand { id } => {
          self.identifier_reference(&id.stx.name, NodeRef::ObjMember(member));
        }
        ObjMemberType::Rest { val } => self.expr(val),
      };
    }
  }

  // Expressions.

  fn expr_step(&mut self, expr: &'a Node<Expr>, work: &mut Vec<Work<'a>>) {
    match expr.stx.as_ref() {
      Expr::ArrowFunc(arrow) => self.function(&arrow.stx.func, None, FnKind::Arrow),
      Expr::Binary(bin) => {
        let op = bin.stx.operator;
        if op.is_assignment() {
          self.check_simple_target(&bin.stx.left, op == OperatorName::Assignment);
        }
        work.push(Work::Expr(&bin.stx.right));
        work.push(Work::Expr(&bin.stx.left));
      }
      Expr::Call(call) => {
        push_args(work, &call.stx.arguments);
        self.receiver(&call.stx.callee, expr, work);
      }
      Expr::ComputedMember(member) => {
        work.push(Work::Expr(&member.stx.member));
        self.receiver(&member.stx.object, expr, work);
      }
      Expr::Member(member) => self.receiver(&member.stx.left, expr, work),
      Expr::TaggedTemplate(tagged) => {
        push_template_parts(work, &tagged.stx.parts);
        self.receiver(&tagged.stx.function, expr, work);
      }
      Expr::Class(class) => self.class(
        class.stx.name.as_ref(),
        class.stx.extends.as_ref(),
        &class.stx.members,
      ),
      Expr::Cond(cond) => {
        work.push(Work::Expr(&cond.stx.alternate));
        work.push(Work::Expr(&cond.stx.consequent));
        work.push(Work::Expr(&cond.stx.test));
      }
      Expr::Func(func) => self.function(&func.stx.func, func.stx.name.as_ref(), FnKind::Function),
      Expr::Id(id) => self.identifier_reference(&id.stx.name, NodeRef::Expr(expr)),
      Expr::IdPat(id) => self.identifier_reference(&id.stx.name, NodeRef::Expr(expr)),
      Expr::Import(import) => work.push(Work::Expr(&import.stx.module)),
      Expr::ImportMeta(_) => {
        if self.mode == TopLevelMode::Global {
          self.report(
            EarlyErrorKind::ModuleSyntaxInScript,
            NodeRef::Expr(expr),
            "`import.meta` may only appear in modules",
          );
        }
      }
      Expr::New(new) => {
        push_args(work, &new.stx.arguments);
        work.push(Work::Expr(&new.stx.callee));
      }
      Expr::NewTarget(_) => {
        if !self.ctx.allow_new_target {
          self.report(
            EarlyErrorKind::NewTargetOutsideFunction,
            NodeRef::Expr(expr),
            "`new.target` is only valid inside functions",
          );
        }
      }
      Expr::Super(_) => self.report(
        EarlyErrorKind::InvalidSuper,
        NodeRef::Expr(expr),
        "`super` must be called or followed by a property access",
      ),
      Expr::This(_)
      | Expr::LitBigInt(_)
      | Expr::LitBool(_)
      | Expr::LitNull(_)
      | Expr::LitRegex(_) => {}
      Expr::Unary(unary) => {
        let argument = &unary.stx.argument;
        match unary.stx.operator {
          OperatorName::Await => {
            if !self.ctx.allow_await {
              self.report(
                EarlyErrorKind::AwaitOutsideAsync,
                NodeRef::Expr(expr),
                "`await` is only valid in async functions and at the top level of modules",
              );
            }
          }
          OperatorName::Delete => {
            if self.strict() && matches!(argument.stx.as_ref(), Expr::Id(_)) {
              self.report(
                EarlyErrorKind::StrictDelete,
                NodeRef::Expr(expr),
                "cannot delete an unqualified identifier in strict mode code",
              );
            }
          }
          op if op.is_update() => self.check_simple_target(argument, false),
          _ => {}
        };
        work.push(Work::Expr(argument));
      }
      Expr::UnaryPostfix(postfix) => {
        self.check_simple_target(&postfix.stx.argument, false);
        work.push(Work::Expr(&postfix.stx.argument));
      }
      Expr::Yield(yield_expr) => {
        if !self.ctx.allow_yield {
          self.report(
            EarlyErrorKind::YieldOutsideGenerator,
            NodeRef::Expr(expr),
            "`yield` is only valid inside generator functions",
          );
        }
        if let Some(argument) = &yield_expr.stx.argument {
          work.push(Work::Expr(argument));
        }
      }
      Expr::LitArr(arr) => {
        for elem in arr.stx.elements.iter().rev() {
          match elem {
            LitArrElem::Single(value) | LitArrElem::Rest(value) => work.push(Work::Expr(value)),
            LitArrElem::Empty => {}
          };
        }
      }
      Expr::LitNum(num) => {
        let legacy = num
          .stx
          .raw
          .as_deref()
          .is_some_and(|raw| NumericLiteralForm::of_raw(raw).is_legacy());
        if legacy && self.strict() {
          self.report(
            EarlyErrorKind::StrictOctalLiteral,
            NodeRef::Expr(expr),
            "legacy octal literals are not allowed in strict mode code",
          );
        }
      }
      Expr::LitObj(obj) => self.object_literal(&obj.stx.members),
      Expr::LitStr(s) => {
        let octal = s.stx.raw.as_deref().is_some_and(has_legacy_octal_escape);
        if octal && self.strict() {
          self.report(
            EarlyErrorKind::StrictOctalEscape,
            NodeRef::Expr(expr),
            "octal escape sequences are not allowed in strict mode code",
          );
        }
      }
      Expr::LitTemplate(template) => push_template_parts(work, &template.stx.parts),
      Expr::ArrPat(pat) => self.arr_pattern(&pat.stx, PatternMode::Assignment),
      Expr::ObjPat(pat) => self.obj_pattern(&pat.stx, PatternMode::Assignment),
    };
  }

  /// The object or callee of an access link. A `super` receiver is only
  /// valid in some links, so it is judged with its link instead of alone.
  fn receiver(&mut self, receiver: &'a Node<Expr>, link: &'a Node<Expr>, work: &mut Vec<Work<'a>>) {
    match receiver.stx.as_ref() {
      Expr::Super(_) => self.super_use(receiver, link),
      _ => work.push(Work::Expr(receiver)),
    };
  }

  fn super_use(&mut self, sup: &'a Node<Expr>, parent: &'a Node<Expr>) {
    match parent.stx.as_ref() {
      Expr::Call(_) => {
        if !self.ctx.allow_super_call {
          self.report(
            EarlyErrorKind::InvalidSuper,
            NodeRef::Expr(sup),
            "`super()` is only valid inside the constructor of a derived class",
          );
        }
      }
      Expr::Member(_) | Expr::ComputedMember(_) => {
        if !self.ctx.allow_super_property {
          self.report(
            EarlyErrorKind::InvalidSuper,
            NodeRef::Expr(sup),
            "`super` properties are only valid inside methods",
          );
        }
      }
      _ => self.report(
        EarlyErrorKind::InvalidSuper,
        NodeRef::Expr(sup),
        "`super` must be called or followed by a property access",
      ),
    };
  }
}

fn push_stmts<'a>(work: &mut Vec<Work<'a>>, body: &'a [Node<Stmt>], position: Position) {
  work.extend(body.iter().rev().map(|stmt| Work::Stmt(stmt, position)));
}

fn push_args<'a>(work: &mut Vec<Work<'a>>, args: &'a [Node<CallArg>]) {
  work.extend(args.iter().rev().map(|arg| Work::Expr(&arg.stx.value)));
}

fn push_template_parts<'a>(work: &mut Vec<Work<'a>>, parts: &'a [LitTemplatePart]) {
  for part in parts.iter().rev() {
    if let LitTemplatePart::Substitution(value) = part {
      work.push(Work::Expr(value));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::has_legacy_octal_escape;
  use super::has_use_strict_directive;
  use ast_js::build::*;

  #[test]
  fn directive_must_be_spelled_exactly() {
    assert!(has_use_strict_directive(&[directive("use strict")]));
    assert!(has_use_strict_directive(&[
      directive("use asm"),
      directive("use strict")
    ]));
    assert!(!has_use_strict_directive(&[expr_stmt(str_raw(
      "use strict",
      "'use\\x20strict'"
    ))]));
    assert!(!has_use_strict_directive(&[
      expr_stmt(id("a")),
      directive("use strict")
    ]));
  }

  #[test]
  fn finds_legacy_octal_escapes() {
    assert!(has_legacy_octal_escape(r#""\01""#));
    assert!(has_legacy_octal_escape(r#"'\7'"#));
    assert!(has_legacy_octal_escape(r#"'\8'"#));
    assert!(!has_legacy_octal_escape(r#"'\0'"#));
    assert!(!has_legacy_octal_escape(r#"'\\1'"#));
    assert!(!has_legacy_octal_escape(r#"'\x41'"#));
  }
}
