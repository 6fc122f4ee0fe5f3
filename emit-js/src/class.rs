use crate::emitter::with_node_context;
use crate::emitter::EmitError;
use crate::emitter::EmitResult;
use crate::escape::string_literal;
use crate::expr::braced;
use crate::expr::Renderer;
use crate::fragment::Fragment;
use crate::precedence::ASSIGNMENT;
use crate::precedence::CALL_MEMBER;
use ast_js::ast::class_or_object::ClassMember;
use ast_js::ast::class_or_object::ClassOrObjKey;
use ast_js::ast::class_or_object::ClassOrObjVal;
use ast_js::ast::class_or_object::DirectKeyKind;
use ast_js::ast::class_or_object::ObjMember;
use ast_js::ast::class_or_object::ObjMemberType;
use ast_js::ast::expr::Expr;
use ast_js::ast::node::Node;

impl Renderer {
  pub fn key(&self, key: &ClassOrObjKey) -> EmitResult<Fragment> {
    Ok(match key {
      ClassOrObjKey::Direct(direct) => {
        let frag = match direct.stx.kind {
          DirectKeyKind::Ident => Fragment::ident(direct.stx.key.clone()),
          DirectKeyKind::Str => Fragment::literal(string_literal(&direct.stx.key)),
          DirectKeyKind::Num => Fragment::number(direct.stx.key.clone()),
          DirectKeyKind::Private => Fragment::ident(format!("#{}", direct.stx.key)),
        };
        self.mark(direct, frag)
      }
      ClassOrObjKey::Computed(expr) => Fragment::seq(vec![
        Fragment::punct("["),
        self.expr(expr)?.operand(ASSIGNMENT),
        Fragment::punct("]"),
      ]),
    })
  }

  pub fn object(&self, members: &[Node<ObjMember>]) -> EmitResult<Fragment> {
    let mut items = Vec::with_capacity(members.len());
    for member in members {
      let item = with_node_context(member.loc, || {
        let frag = match &member.stx.typ {
          ObjMemberType::Valued { key, val } => match val {
            ClassOrObjVal::Prop(Some(value)) => Fragment::seq(vec![
              self.key(key)?,
              Fragment::punct(":"),
              Fragment::space(),
              self.expr(value)?.operand(ASSIGNMENT),
            ]),
            ClassOrObjVal::Prop(None) => return Err(EmitError::missing("property value")),
            ClassOrObjVal::StaticBlock(_) => {
              return Err(EmitError::unsupported("static block in an object literal"))
            }
            val => self.method_like(Vec::new(), key, val)?,
          },
          ObjMemberType::Shorthand { id } => self.mark(id, Fragment::ident(id.stx.name.clone())),
          ObjMemberType::Rest { val } => Fragment::seq(vec![
            Fragment::punct("..."),
            self.expr(val)?.operand(ASSIGNMENT),
          ]),
        };
        Ok(self.mark(member, frag))
      })?;
      items.push(item);
    }
    Ok(braced(items))
  }

  /// `class [name] [extends heritage] {members}`.
  pub fn class(
    &self,
    name: Option<Fragment>,
    extends: Option<&Node<Expr>>,
    members: &[Node<ClassMember>],
  ) -> EmitResult<Vec<Fragment>> {
    let mut parts = vec![Fragment::keyword("class")];
    if let Some(name) = name {
      parts.push(Fragment::space());
      parts.push(name);
    }
    if let Some(extends) = extends {
      parts.push(Fragment::space());
      parts.push(Fragment::keyword("extends"));
      parts.push(Fragment::space());
      parts.push(self.expr(extends)?.operand(CALL_MEMBER));
    }
    parts.push(Fragment::space());
    if members.is_empty() {
      parts.push(Fragment::punct("{"));
      parts.push(Fragment::punct("}"));
      return Ok(parts);
    }
    let mut body = Vec::with_capacity(members.len() * 2);
    for member in members {
      body.push(Fragment::line());
      body.push(with_node_context(member.loc, || {
        let frag = self.class_member(member.stx.as_ref())?;
        Ok(self.mark(member, frag))
      })?);
    }
    parts.push(Fragment::punct("{"));
    parts.push(Fragment::indent(body));
    parts.push(Fragment::line());
    parts.push(Fragment::punct("}"));
    Ok(parts)
  }

  fn class_member(&self, member: &ClassMember) -> EmitResult<Fragment> {
    if let ClassOrObjVal::StaticBlock(block) = &member.val {
      let frag = Fragment::seq(vec![
        Fragment::keyword("static"),
        Fragment::space(),
        self.block(&block.stx.body)?,
      ]);
      return Ok(self.mark(block, frag));
    }
    let mut prefix = Vec::new();
    if member.static_ {
      prefix.push(Fragment::keyword("static"));
      prefix.push(Fragment::space());
    }
    match &member.val {
      ClassOrObjVal::Prop(value) => {
        prefix.push(self.key(&member.key)?);
        if let Some(value) = value {
          prefix.push(Fragment::space());
          prefix.push(Fragment::punct("="));
          prefix.push(Fragment::space());
          prefix.push(self.expr(value)?.operand(ASSIGNMENT));
        }
        prefix.push(Fragment::punct(";"));
        Ok(Fragment::seq(prefix))
      }
      val => self.method_like(prefix, &member.key, val),
    }
  }

  /// Getters, setters and methods of classes and object literals.
  fn method_like(&self, mut parts: Vec<Fragment>, key: &ClassOrObjKey, val: &ClassOrObjVal) -> EmitResult<Fragment> {
    let func = match val {
      ClassOrObjVal::Getter(getter) => {
        if !getter.stx.func.stx.parameters.is_empty() {
          return Err(EmitError::unsupported("getter with parameters").with_loc(getter.loc));
        }
        parts.push(Fragment::keyword("get"));
        parts.push(Fragment::space());
        &getter.stx.func
      }
      ClassOrObjVal::Setter(setter) => {
        let params = &setter.stx.func.stx.parameters;
        if params.len() != 1 || params[0].stx.rest {
          return Err(EmitError::unsupported("setter without exactly one parameter").with_loc(setter.loc));
        }
        parts.push(Fragment::keyword("set"));
        parts.push(Fragment::space());
        &setter.stx.func
      }
      ClassOrObjVal::Method(method) => {
        let func = &method.stx.func;
        if func.stx.async_ {
          parts.push(Fragment::keyword("async"));
          parts.push(Fragment::space());
        }
        if func.stx.generator {
          parts.push(Fragment::punct("*"));
        }
        func
      }
      ClassOrObjVal::Prop(_) | ClassOrObjVal::StaticBlock(_) => {
        return Err(EmitError::unsupported("member is not a method"))
      }
    };
    parts.push(self.key(key)?);
    let tail = with_node_context(func.loc, || self.callable_tail(func.stx.as_ref()))?;
    parts.extend(tail);
    Ok(self.mark(func, Fragment::seq(parts)))
  }
}
