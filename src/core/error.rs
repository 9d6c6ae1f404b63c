//! Error types for autoship with contextual messages and exit codes
//!
//! Two tiers of failure exist at the process level: neutral stops (handled as
//! `RunOutcome::Skipped`, never as errors) and fatal errors, which all travel
//! through `ShipError` until `main` maps them to an exit status.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for autoship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, event payload, package manifest)
  User = 1,
  /// System error (git, subprocess, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for autoship
#[derive(Debug)]
pub enum ShipError {
  /// Configuration and input errors
  Config(ConfigError),

  /// Subprocess execution errors
  Exec(ExecError),

  /// Git operation errors
  Git(GitError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message { message: String, context: Option<String> },
}

impl ShipError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ShipError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ShipError::Message { message, context } => ShipError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ShipError::Config(_) => ExitCode::User,
      ShipError::Exec(_) => ExitCode::System,
      ShipError::Git(_) => ExitCode::System,
      ShipError::Io(_) => ExitCode::System,
      ShipError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ShipError::Config(e) => e.help_message(),
      ShipError::Exec(e) => e.help_message(),
      ShipError::Git(e) => e.help_message(),
      _ => None,
    }
  }
}

impl fmt::Display for ShipError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ShipError::Config(e) => write!(f, "{}", e),
      ShipError::Exec(e) => write!(f, "{}", e),
      ShipError::Git(e) => write!(f, "{}", e),
      ShipError::Io(e) => write!(f, "I/O error: {}", e),
      ShipError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ShipError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ShipError::Io(e) => Some(e),
      ShipError::Exec(ExecError::Launch { source, .. }) => Some(source),
      _ => None,
    }
  }
}

impl From<ConfigError> for ShipError {
  fn from(err: ConfigError) -> Self {
    ShipError::Config(err)
  }
}

impl From<ExecError> for ShipError {
  fn from(err: ExecError) -> Self {
    ShipError::Exec(err)
  }
}

impl From<GitError> for ShipError {
  fn from(err: GitError) -> Self {
    ShipError::Git(err)
  }
}

impl From<io::Error> for ShipError {
  fn from(err: io::Error) -> Self {
    ShipError::Io(err)
  }
}

impl From<String> for ShipError {
  fn from(msg: String) -> Self {
    ShipError::message(msg)
  }
}

impl From<&str> for ShipError {
  fn from(msg: &str) -> Self {
    ShipError::message(msg)
  }
}

impl From<serde_json::Error> for ShipError {
  fn from(err: serde_json::Error) -> Self {
    ShipError::message(format!("JSON error: {}", err))
  }
}

impl From<anyhow::Error> for ShipError {
  fn from(err: anyhow::Error) -> Self {
    ShipError::message(err.to_string())
  }
}

/// Configuration and input errors
#[derive(Debug)]
pub enum ConfigError {
  /// No event payload path is available
  EventPathUnset,

  /// Event payload file missing or unreadable
  EventNotFound { path: PathBuf },

  /// Event payload is not valid JSON of the expected shape
  EventInvalid { path: PathBuf, reason: String },

  /// package.json missing from the workspace
  PackageNotFound { path: PathBuf },

  /// package.json unparseable
  PackageInvalid { path: PathBuf, reason: String },

  /// package.json has no usable version field
  MissingVersion { path: PathBuf },

  /// Commit pattern failed to compile
  InvalidPattern { pattern: String, reason: String },

  /// Commit pattern has the wrong number of capture groups
  PatternArity { pattern: String, groups: usize },

  /// Tag template lacks the version placeholder
  MissingPlaceholder { name: String, template: String },

  /// No usable tag author identity
  MissingTagAuthor,
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::EventPathUnset => {
        Some("Set GITHUB_EVENT_PATH to the push event payload, or pass --event <FILE>.".to_string())
      }
      ConfigError::PatternArity { .. } => Some(
        "Wrap the version in exactly one capture group, e.g. COMMIT_PATTERN='^Release (\\S+)$'. \
         Use (?:...) for grouping that should not capture."
          .to_string(),
      ),
      ConfigError::MissingPlaceholder { name, .. } => Some(format!(
        "Include %s where the version belongs, e.g. {}='v%s'.",
        name
      )),
      ConfigError::MissingTagAuthor => Some(
        "Set TAG_AUTHOR_NAME and TAG_AUTHOR_EMAIL, or disable tagging with CREATE_TAG=false.".to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::EventPathUnset => {
        write!(f, "No event payload available (GITHUB_EVENT_PATH is not set)")
      }
      ConfigError::EventNotFound { path } => {
        write!(f, "Event payload not found at: {}", path.display())
      }
      ConfigError::EventInvalid { path, reason } => {
        write!(f, "Failed to parse event payload {}: {}", path.display(), reason)
      }
      ConfigError::PackageNotFound { path } => {
        write!(f, "Package file not found: {}", path.display())
      }
      ConfigError::PackageInvalid { path, reason } => {
        write!(f, "Failed to parse package file {}: {}", path.display(), reason)
      }
      ConfigError::MissingVersion { path } => {
        write!(f, "No version field in {}", path.display())
      }
      ConfigError::InvalidPattern { pattern, reason } => {
        write!(f, "Invalid commit pattern '{}': {}", pattern, reason)
      }
      ConfigError::PatternArity { pattern, groups } => {
        write!(
          f,
          "Commit pattern '{}' must have exactly one capture group (found {})",
          pattern, groups
        )
      }
      ConfigError::MissingPlaceholder { name, template } => {
        write!(f, "{} template '{}' is missing the %s version placeholder", name, template)
      }
      ConfigError::MissingTagAuthor => {
        write!(f, "No tag author identity available from configuration or event payload")
      }
    }
  }
}

/// Subprocess execution errors
///
/// The runner reports these neutrally; callers own the interpretation of
/// specific exit codes.
#[derive(Debug)]
pub enum ExecError {
  /// The executable could not be started at all
  Launch { program: String, source: io::Error },

  /// The process ran to completion with a non-zero status
  Exit {
    program: String,
    code: Option<i32>,
    stderr: String,
  },
}

impl ExecError {
  fn help_message(&self) -> Option<String> {
    match self {
      ExecError::Launch { program, .. } => {
        Some(format!("Check that '{}' is installed and on PATH.", program))
      }
      ExecError::Exit { .. } => None,
    }
  }
}

impl fmt::Display for ExecError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ExecError::Launch { program, source } => {
        write!(f, "Failed to launch '{}': {}", program, source)
      }
      ExecError::Exit { program, code, stderr } => {
        match code {
          Some(code) => write!(f, "'{}' failed with exit status {}", program, code)?,
          None => write!(f, "'{}' was terminated by a signal", program)?,
        }
        if !stderr.is_empty() {
          write!(f, "\n{}", stderr)?;
        }
        Ok(())
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Tag push failed
  PushFailed { tag: String, reason: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { reason, .. } => {
        if reason.contains("already exists") || reason.contains("non-fast-forward") {
          Some("The remote already has this ref. A concurrent run may have tagged first; re-running is safe.".to_string())
        } else if reason.contains("permission denied") || reason.contains("403") {
          Some("Check that the workflow token is allowed to push tags to this repository.".to_string())
        } else {
          None
        }
      }
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::PushFailed { tag, reason } => {
        write!(f, "Push of tag '{}' to origin failed: {}", tag, reason)
      }
    }
  }
}

/// Result type alias for autoship
pub type ShipResult<T> = Result<T, ShipError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ShipResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ShipError>,
{
  fn context(self, ctx: impl Into<String>) -> ShipResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ShipResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ShipError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
