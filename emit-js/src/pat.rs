use crate::emitter::with_node_context;
use crate::emitter::EmitError;
use crate::emitter::EmitResult;
use crate::expr::bracketed_with_holes;
use crate::expr::braced;
use crate::expr::Renderer;
use crate::fragment::Fragment;
use crate::precedence::ASSIGNMENT;
use crate::precedence::CALL_MEMBER;
use ast_js::ast::expr::pat::ArrPat;
use ast_js::ast::expr::pat::ObjPat;
use ast_js::ast::expr::pat::Pat;
use ast_js::ast::expr::Expr;
use ast_js::ast::node::Node;
use ast_js::ast::stmt::decl::ParamDecl;

impl Renderer {
  /// Renders a pattern. Binding patterns (declarations, parameters, catch
  /// clauses) may only contain identifiers as targets.
  pub fn pat(&self, pat: &Node<Pat>, binding: bool) -> EmitResult<Fragment> {
    with_node_context(pat.loc, || {
      let frag = match pat.stx.as_ref() {
        Pat::Id(id) => self.mark(id, Fragment::ident(id.stx.name.clone())),
        Pat::Arr(arr) => self.arr_pat(arr, binding)?,
        Pat::Obj(obj) => self.obj_pat(obj, binding)?,
        Pat::AssignTarget(_) if binding => {
          return Err(EmitError::unsupported("assignment target in a binding pattern"))
        }
        Pat::AssignTarget(target) => self.expr(target)?.operand(CALL_MEMBER),
      };
      Ok(self.mark(pat, frag))
    })
  }

  fn with_default(&self, target: Fragment, default_value: Option<&Node<Expr>>) -> EmitResult<Fragment> {
    let Some(default_value) = default_value else {
      return Ok(target);
    };
    Ok(Fragment::seq(vec![
      target,
      Fragment::space(),
      Fragment::punct("="),
      Fragment::space(),
      self.expr(default_value)?.operand(ASSIGNMENT),
    ]))
  }

  pub fn arr_pat(&self, arr: &Node<ArrPat>, binding: bool) -> EmitResult<Fragment> {
    let mut items = Vec::with_capacity(arr.stx.elements.len() + 1);
    for element in &arr.stx.elements {
      items.push(match element {
        Some(element) => {
          let target = self.pat(&element.target, binding)?;
          Some(self.with_default(target, element.default_value.as_ref())?)
        }
        None => None,
      });
    }
    if let Some(rest) = &arr.stx.rest {
      items.push(Some(Fragment::seq(vec![
        Fragment::punct("..."),
        self.pat(rest, binding)?,
      ])));
    }
    Ok(self.mark(arr, bracketed_with_holes(items)))
  }

  pub fn obj_pat(&self, obj: &Node<ObjPat>, binding: bool) -> EmitResult<Fragment> {
    let mut items = Vec::with_capacity(obj.stx.properties.len() + 1);
    for prop in &obj.stx.properties {
      let item = with_node_context(prop.loc, || {
        let target = self.pat(&prop.stx.target, binding)?;
        let entry = if prop.stx.shorthand {
          target
        } else {
          Fragment::seq(vec![
            self.key(&prop.stx.key)?,
            Fragment::punct(":"),
            Fragment::space(),
            target,
          ])
        };
        let entry = self.with_default(entry, prop.stx.default_value.as_ref())?;
        Ok(self.mark(prop, entry))
      })?;
      items.push(item);
    }
    if let Some(rest) = &obj.stx.rest {
      items.push(Fragment::seq(vec![
        Fragment::punct("..."),
        self.pat(rest, binding)?,
      ]));
    }
    Ok(self.mark(obj, braced(items)))
  }

  /// `(a, b = 1, ...c)`.
  pub fn params(&self, params: &[Node<ParamDecl>]) -> EmitResult<Fragment> {
    let mut parts = vec![Fragment::punct("(")];
    for (i, param) in params.iter().enumerate() {
      if param.stx.rest && i + 1 != params.len() {
        return Err(EmitError::unsupported("rest parameter before the last position").with_loc(param.loc));
      }
      if i > 0 {
        parts.push(Fragment::punct(","));
        parts.push(Fragment::space());
      }
      parts.push(self.param(param)?);
    }
    parts.push(Fragment::punct(")"));
    Ok(Fragment::seq(parts))
  }

  pub fn param(&self, param: &Node<ParamDecl>) -> EmitResult<Fragment> {
    with_node_context(param.loc, || {
      let pattern = self.pat(&param.stx.pattern, true)?;
      let frag = if param.stx.rest {
        if param.stx.default_value.is_some() {
          return Err(EmitError::unsupported("rest parameter with a default value"));
        }
        Fragment::seq(vec![Fragment::punct("..."), pattern])
      } else {
        self.with_default(pattern, param.stx.default_value.as_ref())?
      };
      Ok(self.mark(param, frag))
    })
  }
}
