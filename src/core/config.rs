//! Release configuration resolved from the environment
//!
//! All settings follow the CI convention of `INPUT_<NAME>` variables set by
//! the pipeline step definition, with a bare `<NAME>` fallback for local
//! invocation. The environment is snapshotted once at startup; nothing else
//! in the crate reads variables by string key.

use crate::core::error::{ConfigError, ShipResult};
use regex::Regex;
use std::collections::HashMap;

/// Default commit-message pattern: release keyword plus captured version
pub const DEFAULT_COMMIT_PATTERN: &str = r"^(?:Release|Version) (\S+)";

/// Placeholder substituted with the version in tag templates
pub const VERSION_PLACEHOLDER: &str = "%s";

const DEFAULT_TAG_TEMPLATE: &str = "v%s";

/// Snapshot of the process environment taken once at startup
pub struct EnvSource {
  vars: HashMap<String, String>,
}

impl EnvSource {
  /// Snapshot the current process environment
  pub fn from_process() -> Self {
    Self {
      vars: std::env::vars().collect(),
    }
  }

  /// Build a source from explicit variables
  #[cfg(test)]
  pub fn from_vars(vars: HashMap<String, String>) -> Self {
    Self { vars }
  }

  /// Look up a variable with no `INPUT_` indirection
  pub fn raw(&self, name: &str) -> Option<&str> {
    self.vars.get(name).map(String::as_str)
  }

  /// Look up a configuration value: `INPUT_<NAME>` first, then `<NAME>`
  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .vars
      .get(&format!("INPUT_{}", name))
      .or_else(|| self.vars.get(name))
      .map(String::as_str)
  }
}

/// Publish strategy selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishCommand {
  /// `yarn publish --non-interactive --new-version <version>`
  Yarn,
  /// `npm publish` (version comes from package.json on disk)
  Npm,
  /// Arbitrary executable, invoked with only the configured extra args
  Custom(String),
}

impl PublishCommand {
  pub fn parse(value: &str) -> Self {
    match value {
      "yarn" => PublishCommand::Yarn,
      "npm" => PublishCommand::Npm,
      other => PublishCommand::Custom(other.to_string()),
    }
  }
}

/// Immutable configuration for one release run
///
/// Invariants enforced at load time, before any I/O:
/// - the commit pattern compiles and has exactly one capture group
/// - both tag templates contain the `%s` placeholder
#[derive(Debug)]
pub struct ReleaseConfig {
  /// Commit-message pattern with one capture group for the version
  pub commit_pattern: Regex,

  /// Create and push an annotated tag before publishing
  pub create_tag: bool,

  /// Tag name template, e.g. `v%s`
  pub tag_name: String,

  /// Tag message template, e.g. `v%s`
  pub tag_message: String,

  /// Committer identity override for the tag operation
  pub tag_author_name: Option<String>,
  pub tag_author_email: Option<String>,

  /// Publish strategy
  pub publish_command: PublishCommand,

  /// Extra arguments appended verbatim to the publish invocation
  pub publish_args: Vec<String>,
}

impl ReleaseConfig {
  /// Resolve configuration from an environment snapshot
  pub fn from_env(env: &EnvSource) -> ShipResult<Self> {
    let pattern = env.get("COMMIT_PATTERN").unwrap_or(DEFAULT_COMMIT_PATTERN);
    let commit_pattern = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
      pattern: pattern.to_string(),
      reason: e.to_string(),
    })?;

    // captures_len() counts the implicit whole-match group
    let groups = commit_pattern.captures_len() - 1;
    if groups != 1 {
      return Err(
        ConfigError::PatternArity {
          pattern: pattern.to_string(),
          groups,
        }
        .into(),
      );
    }

    // "false" disables; any other value, including absent, enables
    let create_tag = env.get("CREATE_TAG") != Some("false");

    let tag_name = validated_template(env, "TAG_NAME")?;
    let tag_message = validated_template(env, "TAG_MESSAGE")?;

    let publish_command = PublishCommand::parse(env.get("PUBLISH_COMMAND").unwrap_or("yarn"));

    let publish_args = env
      .get("PUBLISH_ARGS")
      .map(|raw| raw.split_whitespace().map(String::from).collect())
      .unwrap_or_default();

    Ok(Self {
      commit_pattern,
      create_tag,
      tag_name,
      tag_message,
      tag_author_name: non_empty(env.get("TAG_AUTHOR_NAME")),
      tag_author_email: non_empty(env.get("TAG_AUTHOR_EMAIL")),
      publish_command,
      publish_args,
    })
  }
}

/// Read a tag template, rejecting it when the placeholder is absent
fn validated_template(env: &EnvSource, name: &str) -> ShipResult<String> {
  let template = env.get(name).unwrap_or(DEFAULT_TAG_TEMPLATE).to_string();
  if !template.contains(VERSION_PLACEHOLDER) {
    return Err(
      ConfigError::MissingPlaceholder {
        name: name.to_string(),
        template,
      }
      .into(),
    );
  }
  Ok(template)
}

fn non_empty(value: Option<&str>) -> Option<String> {
  value.filter(|v| !v.is_empty()).map(String::from)
}
