//! Static semantics for JavaScript syntax trees.
//!
//! The main entry point is [`find_early_errors`], which walks an `ast-js`
//! tree and reports the early errors the language requires an implementation
//! to raise before evaluation: duplicate and colliding bindings, unresolvable
//! `break`/`continue` targets, strict mode restrictions, misplaced `return`,
//! `await`, `yield`, `super` and `new.target`, module item rules and class
//! body rules.
//!
//! ```
//! use ast_js::ast::stmt::decl::VarDeclMode;
//! use ast_js::build;
//! use semantic_js::early::EarlyErrorKind;
//! use semantic_js::find_early_errors;
//! use semantic_js::TopLevelMode;
//!
//! let top = build::top_level(vec![build::block(vec![
//!   build::var_decl(VarDeclMode::Let, "x", None),
//!   build::var_decl(VarDeclMode::Let, "x", None),
//! ])]);
//! let findings = find_early_errors(&top, TopLevelMode::Global);
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].kind, EarlyErrorKind::DuplicateBinding);
//! ```
//!
//! The checker never mutates the tree and never stops early. Findings come
//! back in traversal order and are not deduplicated, so two calls on the same
//! tree return equal sequences.

use ast_js::ast::node::Node;
use ast_js::ast::stx::TopLevel;
use std::str::FromStr;
use tracing::debug;
use tracing::debug_span;

pub mod early;

pub use early::EarlyError;
pub use early::EarlyErrorKind;
pub use early::NodeRef;

/// How the top level of a program is interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TopLevelMode {
  /// A classic script. Sloppy unless the program opts in with a directive.
  #[default]
  Global,
  /// An ECMAScript module: always strict, and `import`/`export` are allowed.
  Module,
}

impl TopLevelMode {
  pub fn as_str(self) -> &'static str {
    match self {
      TopLevelMode::Global => "global",
      TopLevelMode::Module => "module",
    }
  }
}

impl FromStr for TopLevelMode {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "global" | "Global" | "script" | "Script" => Ok(TopLevelMode::Global),
      "module" | "Module" => Ok(TopLevelMode::Module),
      _ => Err(()),
    }
  }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CheckOptions {
  pub mode: TopLevelMode,
}

/// Collects every early error in `top`, in pre-order.
pub fn find_early_errors(top: &Node<TopLevel>, mode: TopLevelMode) -> Vec<EarlyError<'_>> {
  find_early_errors_with_options(top, CheckOptions { mode })
}

pub fn find_early_errors_with_options(
  top: &Node<TopLevel>,
  options: CheckOptions,
) -> Vec<EarlyError<'_>> {
  let span = debug_span!(
    "semantic_js.find_early_errors",
    statements = top.stx.body.len(),
    mode = options.mode.as_str(),
  );
  let _enter = span.enter();
  let findings = early::Checker::new(options.mode).check_top_level(top);
  debug!(findings = findings.len(), "early error check finished");
  findings
}

#[cfg(test)]
mod tests {
  use super::TopLevelMode;

  #[test]
  fn mode_parses_from_config_strings() {
    assert_eq!("module".parse(), Ok(TopLevelMode::Module));
    assert_eq!("Global".parse(), Ok(TopLevelMode::Global));
    assert_eq!("script".parse(), Ok(TopLevelMode::Global));
    assert_eq!("strict".parse::<TopLevelMode>(), Err(()));
  }
}
