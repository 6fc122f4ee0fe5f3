//! JavaScript code generation from `ast-js` syntax trees.
//!
//! Rendering happens in two steps. The engine turns nodes into a
//! [`Fragment`] tree that already has every required parenthesis and
//! statement terminator in place; flattening then writes the tokens through
//! an [`Emitter`], which adds the whitespace the [`FormatPolicy`] asks for
//! and the separation the lexer needs. Both policies produce the same token
//! stream, so minimal and pretty output always parse to the same tree.

mod class;
pub mod emitter;
pub mod escape;
mod expr;
pub mod fragment;
pub mod location;
mod pat;
pub mod policy;
pub mod precedence;
mod stmt;
pub mod stmt_start;

use ast_js::ast::expr::Expr;
use ast_js::ast::node::Node;
use ast_js::ast::stmt::Stmt;
use ast_js::ast::stx::TopLevel;
use ast_js::loc::LocationOf;
use expr::Renderer;

pub use emitter::EmitError;
pub use emitter::EmitErrorKind;
pub use emitter::EmitResult;
pub use emitter::Emitter;
pub use fragment::Fragment;
pub use location::SpanMap;
pub use location::SpanMapping;
pub use policy::EmitMode;
pub use policy::EmitOptions;
pub use policy::FormatPolicy;

pub fn render_top_level(top: &Node<TopLevel>, opts: &EmitOptions) -> EmitResult<Fragment> {
  Renderer::new(opts).top_level(top)
}

pub fn render_stmt(stmt: &Node<Stmt>, opts: &EmitOptions) -> EmitResult<Fragment> {
  Renderer::new(opts).stmt(stmt)
}

pub fn render_expr(expr: &Node<Expr>, opts: &EmitOptions) -> EmitResult<Fragment> {
  Renderer::new(opts).expr(expr)
}

/// Renders a whole program or module to source text.
pub fn emit_top_level(top: &Node<TopLevel>, opts: &EmitOptions) -> EmitResult<String> {
  let _span = tracing::debug_span!(
    "emit_js.emit_top_level",
    statements = top.stx.body.len(),
    mode = ?opts.mode,
  )
  .entered();
  let frag = render_top_level(top, opts)?;
  let out = frag.flatten(&opts.effective_policy());
  tracing::debug!(bytes = out.len(), "emitted top level");
  Ok(out)
}

/// Like [`emit_top_level`], and also maps output ranges back to the source
/// spans `locator` resolves. Location tracking is switched on regardless of
/// `opts.track_locations`.
pub fn emit_top_level_with_spans(
  top: &Node<TopLevel>,
  opts: &EmitOptions,
  locator: &dyn LocationOf,
) -> EmitResult<(String, SpanMap)> {
  let _span = tracing::debug_span!(
    "emit_js.emit_top_level_with_spans",
    statements = top.stx.body.len(),
    mode = ?opts.mode,
  )
  .entered();
  let opts = EmitOptions {
    track_locations: true,
    ..opts.clone()
  };
  let frag = render_top_level(top, &opts)?;
  let policy = opts.effective_policy();
  let mut em = Emitter::new(&policy);
  frag.flatten_into(&mut em);
  let raw = em.take_spans();
  let out = em.into_string();
  let map = SpanMap::resolve(raw, locator);
  tracing::debug!(bytes = out.len(), mappings = map.len(), "emitted top level with spans");
  Ok((out, map))
}

/// Renders a single expression to source text.
pub fn emit_expr(expr: &Node<Expr>, opts: &EmitOptions) -> EmitResult<String> {
  let frag = render_expr(expr, opts)?;
  Ok(frag.flatten(&opts.effective_policy()))
}
