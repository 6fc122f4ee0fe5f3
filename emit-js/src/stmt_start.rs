//! Checks on the leading tokens of already rendered fragments, for positions
//! where the grammar forbids certain starts (expression statements, arrow
//! bodies, `export default`, for heads).

use crate::fragment::Event;
use crate::fragment::Fragment;
use crate::fragment::Token;
use crate::fragment::TokenKind;

fn is(token: Option<&Token>, kind: TokenKind, text: &str) -> bool {
  token.is_some_and(|t| t.kind == kind && t.text == text)
}

fn is_word(token: Option<&Token>, text: &str) -> bool {
  is(token, TokenKind::Keyword, text) || is(token, TokenKind::Identifier, text)
}

fn starts_function_or_class(first: Option<&Token>, second: Option<&Token>) -> bool {
  is(first, TokenKind::Keyword, "function")
    || is(first, TokenKind::Keyword, "class")
    || (is_word(first, "async") && is(second, TokenKind::Keyword, "function"))
}

/// Whether an expression statement rendered as `frag` would be read as a
/// block, declaration or `let` declaration instead.
pub fn expr_stmt_needs_parens(frag: &Fragment) -> bool {
  let mut tokens = frag.tokens();
  let first = tokens.next();
  let second = tokens.next();
  is(first, TokenKind::Punct, "{")
    || starts_function_or_class(first, second)
    || starts_let_bracket(first, second)
}

fn starts_let_bracket(first: Option<&Token>, second: Option<&Token>) -> bool {
  is(first, TokenKind::Identifier, "let") && is(second, TokenKind::Punct, "[")
}

/// A `for (init; ...)` initializer may start with `let` but not with `let [`,
/// which reads as a lexical declaration.
pub fn for_init_needs_parens(frag: &Fragment) -> bool {
  let mut tokens = frag.tokens();
  let first = tokens.next();
  let second = tokens.next();
  starts_let_bracket(first, second)
}

/// A concise arrow body starting with `{` would be read as a block.
pub fn arrow_body_needs_parens(frag: &Fragment) -> bool {
  is(frag.tokens().next(), TokenKind::Punct, "{")
}

/// `export default function () {}` is a declaration, not an expression.
pub fn export_default_needs_parens(frag: &Fragment) -> bool {
  let mut tokens = frag.tokens();
  let first = tokens.next();
  let second = tokens.next();
  starts_function_or_class(first, second)
}

/// for-in/of assignment targets starting with `let` are read as declarations,
/// and `for (async of x)` is reserved.
pub fn for_in_of_target_needs_parens(frag: &Fragment, of: bool) -> bool {
  let mut tokens = frag.tokens();
  let first = tokens.next();
  if is(first, TokenKind::Identifier, "let") {
    return true;
  }
  of && is(first, TokenKind::Identifier, "async") && tokens.next().is_none()
}

/// Whether `frag` contains an `in` operator that is not enclosed in any
/// bracket, parenthesis, brace or template substitution. Such an `in` would
/// end a `for (init; ...)` initializer early.
pub fn has_unbracketed_in(frag: &Fragment) -> bool {
  let mut depth = 0usize;
  for event in frag.events() {
    let Event::Token(token) = event else {
      continue;
    };
    match (token.kind, token.text.as_ref()) {
      (TokenKind::Punct, "(" | "[" | "{") => depth += 1,
      (TokenKind::Punct, ")" | "]" | "}") => depth = depth.saturating_sub(1),
      (TokenKind::Keyword, "in") if depth == 0 => return true,
      (TokenKind::Literal, text) if text.starts_with('`') || text.starts_with('}') => {
        if text.starts_with('}') {
          depth = depth.saturating_sub(1);
        }
        if text.ends_with("${") {
          depth += 1;
        }
      }
      _ => {}
    }
  }
  false
}
