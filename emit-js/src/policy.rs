use serde::Deserialize;
use serde::Serialize;
use std::str::FromStr;

/// Whitespace choices made when flattening fragments. None of these affect
/// which tokens are produced, so any two policies render the same token
/// sequence for the same tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatPolicy {
  /// Text written once per nesting level after a line break.
  pub indent: String,
  /// Spaces around binary operators, after commas and keywords, and before
  /// block braces.
  pub spaces: bool,
  /// Spaces just inside braces of object literals, patterns and import/export
  /// lists.
  pub brace_spacing: bool,
  /// One statement or class member per line.
  pub newlines: bool,
}

impl FormatPolicy {
  pub fn minimal() -> FormatPolicy {
    FormatPolicy {
      indent: String::new(),
      spaces: false,
      brace_spacing: false,
      newlines: false,
    }
  }

  pub fn pretty() -> FormatPolicy {
    FormatPolicy {
      indent: "  ".to_string(),
      spaces: true,
      brace_spacing: true,
      newlines: true,
    }
  }
}

impl Default for FormatPolicy {
  fn default() -> Self {
    FormatPolicy::minimal()
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitMode {
  #[default]
  Minimal,
  Pretty,
}

impl EmitMode {
  pub fn policy(self) -> FormatPolicy {
    match self {
      EmitMode::Minimal => FormatPolicy::minimal(),
      EmitMode::Pretty => FormatPolicy::pretty(),
    }
  }
}

impl FromStr for EmitMode {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "minimal" => Ok(EmitMode::Minimal),
      "pretty" => Ok(EmitMode::Pretty),
      other => Err(format!("unknown emit mode `{other}`")),
    }
  }
}

/// Options for a single emit call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
  pub mode: EmitMode,
  /// Overrides the mode's policy when set.
  pub policy: Option<FormatPolicy>,
  /// Record output ranges for nodes that carry a source location.
  pub track_locations: bool,
}

impl EmitOptions {
  pub fn minimal() -> EmitOptions {
    EmitOptions::default()
  }

  pub fn pretty() -> EmitOptions {
    EmitOptions {
      mode: EmitMode::Pretty,
      ..EmitOptions::default()
    }
  }

  pub fn with_locations(mut self) -> EmitOptions {
    self.track_locations = true;
    self
  }

  /// The policy in effect.
  pub fn effective_policy(&self) -> FormatPolicy {
    self
      .policy
      .clone()
      .unwrap_or_else(|| self.mode.policy())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn options_deserialize_with_defaults() {
    let opts: EmitOptions = serde_json::from_str(r#"{"mode":"pretty"}"#).unwrap();
    assert_eq!(opts.mode, EmitMode::Pretty);
    assert!(!opts.track_locations);
    assert_eq!(opts.effective_policy(), FormatPolicy::pretty());

    let opts: EmitOptions =
      serde_json::from_str(r#"{"policy":{"indent":"\t","newlines":true}}"#).unwrap();
    let policy = opts.effective_policy();
    assert_eq!(policy.indent, "\t");
    assert!(policy.newlines);
    assert!(!policy.spaces);
  }

  #[test]
  fn parses_mode_names() {
    assert_eq!("pretty".parse::<EmitMode>(), Ok(EmitMode::Pretty));
    assert!("compact".parse::<EmitMode>().is_err());
  }
}
