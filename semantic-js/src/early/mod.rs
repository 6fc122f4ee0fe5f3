//! Early errors: static semantic violations the language requires an
//! implementation to report before running any code.
//!
//! [`crate::find_early_errors`] walks a tree once, in pre-order, and returns
//! every violation it sees as an [`EarlyError`]. Findings are data: the walk
//! never stops at the first one, and the same rule firing twice on one node
//! produces two findings.

mod check;
mod decls;

use ast_js::ast::class_or_object::ClassMember;
use ast_js::ast::class_or_object::ObjMember;
use ast_js::ast::expr::pat::ClassOrFuncName;
use ast_js::ast::expr::pat::IdPat;
use ast_js::ast::expr::pat::Pat;
use ast_js::ast::expr::Expr;
use ast_js::ast::func::Func;
use ast_js::ast::import_export::ExportName;
use ast_js::ast::node::Node;
use ast_js::ast::stmt::Stmt;
use ast_js::loc::Loc;
use ast_js::loc::LocationOf;
use diagnostics::render::render_diagnostic;
use diagnostics::render::render_line;
use diagnostics::render::SourceProvider;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use diagnostics::Span;
use diagnostics::TextRange;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

pub(crate) use check::Checker;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EarlyErrorKind {
  DuplicateBinding,
  LexicalVarCollision,
  UndefinedBreakTarget,
  UndefinedContinueTarget,
  DuplicateLabel,
  DuplicateParameter,
  InvalidAssignmentTarget,
  StrictOctalLiteral,
  StrictOctalEscape,
  StrictWith,
  StrictDelete,
  StrictBinding,
  LexicalBindingNamedLet,
  ReturnOutsideFunction,
  AwaitOutsideAsync,
  YieldOutsideGenerator,
  NewTargetOutsideFunction,
  InvalidSuper,
  ModuleSyntaxInScript,
  NestedModuleItem,
  DuplicateExport,
  UnresolvedExport,
  UseStrictNonSimpleParameters,
  DuplicateConstructor,
  InvalidConstructor,
  StaticPrototype,
  DuplicatePrivateName,
  ArgumentsInClassInitializer,
  DeclarationInStatementPosition,
  MissingConstInitializer,
  DuplicateProto,
}

impl EarlyErrorKind {
  /// Stable code for this rule.
  pub fn code(self) -> &'static str {
    match self {
      EarlyErrorKind::DuplicateBinding => "EE0001",
      EarlyErrorKind::LexicalVarCollision => "EE0002",
      EarlyErrorKind::UndefinedBreakTarget => "EE0003",
      EarlyErrorKind::UndefinedContinueTarget => "EE0004",
      EarlyErrorKind::DuplicateLabel => "EE0005",
      EarlyErrorKind::DuplicateParameter => "EE0006",
      EarlyErrorKind::InvalidAssignmentTarget => "EE0007",
      EarlyErrorKind::StrictOctalLiteral => "EE0008",
      EarlyErrorKind::StrictOctalEscape => "EE0009",
      EarlyErrorKind::StrictWith => "EE0010",
      EarlyErrorKind::StrictDelete => "EE0011",
      EarlyErrorKind::StrictBinding => "EE0012",
      EarlyErrorKind::LexicalBindingNamedLet => "EE0013",
      EarlyErrorKind::ReturnOutsideFunction => "EE0014",
      EarlyErrorKind::AwaitOutsideAsync => "EE0015",
      EarlyErrorKind::YieldOutsideGenerator => "EE0016",
      EarlyErrorKind::NewTargetOutsideFunction => "EE0017",
      EarlyErrorKind::InvalidSuper => "EE0018",
      EarlyErrorKind::ModuleSyntaxInScript => "EE0019",
      EarlyErrorKind::NestedModuleItem => "EE0020",
      EarlyErrorKind::DuplicateExport => "EE0021",
      EarlyErrorKind::UnresolvedExport => "EE0022",
      EarlyErrorKind::UseStrictNonSimpleParameters => "EE0023",
      EarlyErrorKind::DuplicateConstructor => "EE0024",
      EarlyErrorKind::InvalidConstructor => "EE0025",
      EarlyErrorKind::StaticPrototype => "EE0026",
      EarlyErrorKind::DuplicatePrivateName => "EE0027",
      EarlyErrorKind::ArgumentsInClassInitializer => "EE0028",
      EarlyErrorKind::DeclarationInStatementPosition => "EE0029",
      EarlyErrorKind::MissingConstInitializer => "EE0030",
      EarlyErrorKind::DuplicateProto => "EE0031",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      EarlyErrorKind::DuplicateBinding => "duplicate-binding",
      EarlyErrorKind::LexicalVarCollision => "lexical-var-collision",
      EarlyErrorKind::UndefinedBreakTarget => "undefined-break-target",
      EarlyErrorKind::UndefinedContinueTarget => "undefined-continue-target",
      EarlyErrorKind::DuplicateLabel => "duplicate-label",
      EarlyErrorKind::DuplicateParameter => "duplicate-parameter",
      EarlyErrorKind::InvalidAssignmentTarget => "invalid-assignment-target",
      EarlyErrorKind::StrictOctalLiteral => "strict-octal-literal",
      EarlyErrorKind::StrictOctalEscape => "strict-octal-escape",
      EarlyErrorKind::StrictWith => "strict-with",
      EarlyErrorKind::StrictDelete => "strict-delete",
      EarlyErrorKind::StrictBinding => "strict-binding",
      EarlyErrorKind::LexicalBindingNamedLet => "lexical-binding-named-let",
      EarlyErrorKind::ReturnOutsideFunction => "return-outside-function",
      EarlyErrorKind::AwaitOutsideAsync => "await-outside-async",
      EarlyErrorKind::YieldOutsideGenerator => "yield-outside-generator",
      EarlyErrorKind::NewTargetOutsideFunction => "new-target-outside-function",
      EarlyErrorKind::InvalidSuper => "invalid-super",
      EarlyErrorKind::ModuleSyntaxInScript => "module-syntax-in-script",
      EarlyErrorKind::NestedModuleItem => "nested-module-item",
      EarlyErrorKind::DuplicateExport => "duplicate-export",
      EarlyErrorKind::UnresolvedExport => "unresolved-export",
      EarlyErrorKind::UseStrictNonSimpleParameters => "use-strict-non-simple-parameters",
      EarlyErrorKind::DuplicateConstructor => "duplicate-constructor",
      EarlyErrorKind::InvalidConstructor => "invalid-constructor",
      EarlyErrorKind::StaticPrototype => "static-prototype",
      EarlyErrorKind::DuplicatePrivateName => "duplicate-private-name",
      EarlyErrorKind::ArgumentsInClassInitializer => "arguments-in-class-initializer",
      EarlyErrorKind::DeclarationInStatementPosition => "declaration-in-statement-position",
      EarlyErrorKind::MissingConstInitializer => "missing-const-initializer",
      EarlyErrorKind::DuplicateProto => "duplicate-proto",
    }
  }
}

impl Display for EarlyErrorKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The node a finding is about.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
  Stmt(&'a Node<Stmt>),
  Expr(&'a Node<Expr>),
  Pat(&'a Node<Pat>),
  IdPat(&'a Node<IdPat>),
  Name(&'a Node<ClassOrFuncName>),
  Func(&'a Node<Func>),
  ClassMember(&'a Node<ClassMember>),
  ObjMember(&'a Node<ObjMember>),
  ExportName(&'a Node<ExportName>),
}

impl<'a> NodeRef<'a> {
  pub fn loc(&self) -> Loc {
    match self {
      NodeRef::Stmt(n) => n.loc,
      NodeRef::Expr(n) => n.loc,
      NodeRef::Pat(n) => n.loc,
      NodeRef::IdPat(n) => n.loc,
      NodeRef::Name(n) => n.loc,
      NodeRef::Func(n) => n.loc,
      NodeRef::ClassMember(n) => n.loc,
      NodeRef::ObjMember(n) => n.loc,
      NodeRef::ExportName(n) => n.loc,
    }
  }

  /// Whether the node came from source rather than a tool.
  pub fn has_source_location(&self) -> bool {
    let synthetic = match self {
      NodeRef::Stmt(n) => n.is_synthetic(),
      NodeRef::Expr(n) => n.is_synthetic(),
      NodeRef::Pat(n) => n.is_synthetic(),
      NodeRef::IdPat(n) => n.is_synthetic(),
      NodeRef::Name(n) => n.is_synthetic(),
      NodeRef::Func(n) => n.is_synthetic(),
      NodeRef::ClassMember(n) => n.is_synthetic(),
      NodeRef::ObjMember(n) => n.is_synthetic(),
      NodeRef::ExportName(n) => n.is_synthetic(),
    };
    !synthetic
  }
}

#[derive(Clone, Debug)]
pub struct EarlyError<'a> {
  pub kind: EarlyErrorKind,
  pub message: String,
  pub node: NodeRef<'a>,
}

impl<'a> EarlyError<'a> {
  pub fn code(&self) -> &'static str {
    self.kind.code()
  }

  /// The finding as an error diagnostic in `file`. A synthesized node has no
  /// primary span.
  pub fn to_diagnostic(&self, file: FileId) -> Diagnostic {
    if !self.node.has_source_location() {
      return Diagnostic::unplaced_error(self.code(), self.message.clone())
        .with_note("the node was synthesized and has no source position");
    }
    let (range, overflow) = TextRange::from_loc_with_overflow_note(self.node.loc());
    let diagnostic = Diagnostic::error(self.code(), self.message.clone(), Span::new(file, range));
    match overflow {
      Some(note) => diagnostic.with_note(note),
      None => diagnostic,
    }
  }

  /// `line:column: code message`, with one-based line and column, when the
  /// node has a resolvable location; otherwise `code message`.
  pub fn render(&self, locator: &dyn LocationOf) -> String {
    render_line(&self.to_diagnostic(FileId(0)), locator)
  }
}

impl<'a> Display for EarlyError<'a> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code(), self.message)
  }
}

/// Renders findings one per line, in the order given.
pub fn render_findings(findings: &[EarlyError<'_>], locator: &dyn LocationOf) -> String {
  let mut out = String::new();
  for finding in findings {
    out.push_str(&finding.render(locator));
    out.push('\n');
  }
  out
}

/// Renders findings in `file` as source snippets with carets, in the order
/// given.
pub fn render_finding_snippets(
  findings: &[EarlyError<'_>],
  provider: &dyn SourceProvider,
  file: FileId,
) -> String {
  findings
    .iter()
    .map(|finding| render_diagnostic(provider, &finding.to_diagnostic(file)))
    .collect()
}
