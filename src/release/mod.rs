//! Release orchestration
//!
//! Sequences one run: load package version → find matching commit →
//! optionally create tag → publish. Expected "nothing to do" outcomes come
//! back as `Skipped`; collaborator failures propagate unchanged as
//! `ShipError` until `main` maps them to the exit status.

pub mod matcher;
pub mod publish;
pub mod tags;

use crate::core::config::ReleaseConfig;
use crate::core::error::{ConfigError, ShipError, ShipResult};
use crate::input::event::PushEvent;
use crate::input::package;
use std::fmt;
use std::path::PathBuf;
use tags::{TagAuthor, TagOutcome};

/// Everything one run needs; owned for the process lifetime
pub struct ReleaseContext {
  pub workspace: PathBuf,
  pub config: ReleaseConfig,
  pub event: PushEvent,
  pub dry_run: bool,
}

/// Terminal result of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
  /// A release was tagged (unless disabled) and published
  Released { version: String, commit: String },
  /// Nothing to do; not an error for the pipeline
  Skipped(SkipReason),
}

/// Expected neutral stops
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
  /// No commit in the push matches the release pattern for this version
  NoReleaseCommit { version: String },
  /// The release was already tagged; publishing must not run again
  TagExists { tag: String },
  /// Dry-run stopped before any side effect
  DryRun { version: String, commit: String },
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::NoReleaseCommit { version } => {
        write!(f, "no release commit for version {} in this push", version)
      }
      SkipReason::TagExists { tag } => write!(f, "tag {} already exists", tag),
      SkipReason::DryRun { version, commit } => {
        write!(f, "dry-run: would release {} (commit {})", version, commit)
      }
    }
  }
}

/// Drive one release run to its terminal outcome
pub fn run(ctx: &ReleaseContext) -> ShipResult<RunOutcome> {
  let version = package::read_version(&ctx.workspace)?;
  println!("📦 Package version: {}", version);

  let Some(commit) = matcher::find_release_commit(&ctx.config.commit_pattern, &ctx.event.commits, &version) else {
    return Ok(RunOutcome::Skipped(SkipReason::NoReleaseCommit { version }));
  };
  println!("🔖 Release commit {}: {}", commit.id, first_line(&commit.message));

  if ctx.dry_run {
    // Read-only half only: probe the tag but never create or publish
    if ctx.config.create_tag {
      let tag = tags::render_template(&ctx.config.tag_name, &version);
      if tags::tag_exists(&ctx.workspace, &tag)? {
        return Ok(RunOutcome::Skipped(SkipReason::TagExists { tag }));
      }
    }
    return Ok(RunOutcome::Skipped(SkipReason::DryRun {
      version,
      commit: commit.id.clone(),
    }));
  }

  if ctx.config.create_tag {
    let author = resolve_tag_author(ctx)?;
    match tags::ensure_tag(&ctx.workspace, &ctx.config, &author, &version)? {
      TagOutcome::AlreadyExists(tag) => {
        return Ok(RunOutcome::Skipped(SkipReason::TagExists { tag }));
      }
      TagOutcome::Created(tag) => println!("🏷️  Created tag {}", tag),
    }
  }

  publish::run_publish(&ctx.workspace, &ctx.config, &version)?;
  println!("🚀 Published {}", version);

  Ok(RunOutcome::Released {
    version,
    commit: commit.id.clone(),
  })
}

/// Tag author: explicit configuration first, then the event's repository owner
fn resolve_tag_author(ctx: &ReleaseContext) -> ShipResult<TagAuthor> {
  let owner = &ctx.event.repository.owner;

  let name = ctx.config.tag_author_name.clone().or_else(|| owner.name.clone());
  let email = ctx.config.tag_author_email.clone().or_else(|| owner.email.clone());

  match (name, email) {
    (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => Ok(TagAuthor { name, email }),
    _ => Err(ShipError::Config(ConfigError::MissingTagAuthor)),
  }
}

fn first_line(message: &str) -> &str {
  message.lines().next().unwrap_or(message)
}
