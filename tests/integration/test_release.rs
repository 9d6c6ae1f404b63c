//! End-to-end release scenarios

use crate::helpers::{TestRepo, git};
use anyhow::Result;

// Publish stand-ins: the default strategy is yarn, which isn't available in
// the test environment, so every scenario selects the custom-executable
// strategy. `git --version` succeeds; a bogus subcommand fails if invoked.
const PUBLISH_OK: [(&str, &str); 2] = [("PUBLISH_COMMAND", "git"), ("PUBLISH_ARGS", "--version")];
const PUBLISH_MUST_NOT_RUN: [(&str, &str); 2] = [
  ("PUBLISH_COMMAND", "git"),
  ("PUBLISH_ARGS", "this-subcommand-does-not-exist"),
];

#[test]
fn test_release_commit_creates_tag_and_publishes() -> Result<()> {
  let repo = TestRepo::new("1.2.0")?;
  repo.write_event(&[("a1", "fix typo"), ("b2", "Release 1.2.0")])?;

  let output = repo.run_autoship(&[], &PUBLISH_OK)?;
  assert!(
    output.status.success(),
    "stderr: {}",
    String::from_utf8_lossy(&output.stderr)
  );

  assert!(repo.local_tag_exists("v1.2.0"));
  assert!(repo.origin_tag_exists("v1.2.0"), "tag should be pushed to origin");

  let outputs = repo.read_outputs()?;
  assert!(outputs.contains("changed=true"), "outputs: {}", outputs);
  assert!(outputs.contains("version=1.2.0"), "outputs: {}", outputs);
  assert!(outputs.contains("commit=b2"), "outputs: {}", outputs);

  Ok(())
}

#[test]
fn test_no_matching_commit_is_neutral_stop() -> Result<()> {
  let repo = TestRepo::new("1.2.0")?;
  repo.write_event(&[("a1", "fix typo"), ("b2", "chore: bump")])?;

  let output = repo.run_autoship(&[], &PUBLISH_MUST_NOT_RUN)?;
  assert!(
    output.status.success(),
    "neutral stop must exit cleanly, stderr: {}",
    String::from_utf8_lossy(&output.stderr)
  );

  assert!(!repo.local_tag_exists("v1.2.0"));
  assert!(repo.read_outputs()?.contains("changed=false"));

  Ok(())
}

#[test]
fn test_existing_tag_skips_publish() -> Result<()> {
  let repo = TestRepo::new("1.2.0")?;
  repo.write_event(&[("b2", "Release 1.2.0")])?;

  // Tag the release beforehand, locally only
  git(&repo.workspace, &["tag", "-a", "-m", "v1.2.0", "v1.2.0"])?;

  let output = repo.run_autoship(&[], &PUBLISH_MUST_NOT_RUN)?;
  assert!(
    output.status.success(),
    "existing tag is a neutral stop, stderr: {}",
    String::from_utf8_lossy(&output.stderr)
  );

  // No push, no publish, no error
  assert!(!repo.origin_tag_exists("v1.2.0"));
  assert!(repo.read_outputs()?.contains("changed=false"));

  Ok(())
}

#[test]
fn test_rerun_after_release_is_idempotent() -> Result<()> {
  let repo = TestRepo::new("1.2.0")?;
  repo.write_event(&[("b2", "Release 1.2.0")])?;

  let first = repo.run_autoship(&[], &PUBLISH_OK)?;
  assert!(first.status.success());
  assert!(repo.read_outputs()?.contains("changed=true"));

  // Same push delivered again: tag exists now, so nothing happens
  repo.clear_outputs()?;
  let second = repo.run_autoship(&[], &PUBLISH_MUST_NOT_RUN)?;
  assert!(
    second.status.success(),
    "stderr: {}",
    String::from_utf8_lossy(&second.stderr)
  );
  assert!(repo.read_outputs()?.contains("changed=false"));

  Ok(())
}

#[test]
fn test_create_tag_disabled_still_publishes() -> Result<()> {
  let repo = TestRepo::new("1.2.0")?;
  repo.write_event(&[("b2", "Release 1.2.0")])?;

  let mut vars = PUBLISH_OK.to_vec();
  vars.push(("CREATE_TAG", "false"));

  let output = repo.run_autoship(&[], &vars)?;
  assert!(
    output.status.success(),
    "stderr: {}",
    String::from_utf8_lossy(&output.stderr)
  );

  assert!(!repo.local_tag_exists("v1.2.0"), "tag step should be skipped");
  let outputs = repo.read_outputs()?;
  assert!(outputs.contains("changed=true"));
  assert!(outputs.contains("version=1.2.0"));

  Ok(())
}

#[test]
fn test_custom_commit_pattern_and_tag_template() -> Result<()> {
  let repo = TestRepo::new("0.4.2")?;
  repo.write_event(&[("c3", "chore(release): 0.4.2")])?;

  let mut vars = PUBLISH_OK.to_vec();
  vars.push(("COMMIT_PATTERN", r"^chore\(release\): (\S+)$"));
  vars.push(("TAG_NAME", "release-%s"));
  vars.push(("TAG_MESSAGE", "Release %s"));

  let output = repo.run_autoship(&[], &vars)?;
  assert!(
    output.status.success(),
    "stderr: {}",
    String::from_utf8_lossy(&output.stderr)
  );

  assert!(repo.local_tag_exists("release-0.4.2"));
  assert!(repo.origin_tag_exists("release-0.4.2"));

  Ok(())
}

#[test]
fn test_dry_run_has_no_side_effects() -> Result<()> {
  let repo = TestRepo::new("1.2.0")?;
  repo.write_event(&[("b2", "Release 1.2.0")])?;

  let output = repo.run_autoship(&["--dry-run"], &PUBLISH_MUST_NOT_RUN)?;
  assert!(
    output.status.success(),
    "stderr: {}",
    String::from_utf8_lossy(&output.stderr)
  );

  assert!(!repo.local_tag_exists("v1.2.0"));
  assert!(!repo.origin_tag_exists("v1.2.0"));
  assert!(repo.read_outputs()?.contains("changed=false"));

  Ok(())
}

#[test]
fn test_publish_failure_is_fatal_after_tagging() -> Result<()> {
  let repo = TestRepo::new("1.2.0")?;
  repo.write_event(&[("b2", "Release 1.2.0")])?;

  let output = repo.run_autoship(
    &[],
    &[("PUBLISH_COMMAND", "git"), ("PUBLISH_ARGS", "bogus-subcommand")],
  )?;

  assert!(!output.status.success(), "publish failure must fail the run");
  assert_eq!(output.status.code(), Some(2), "system-error exit code");

  // Partial state is surfaced, not rolled back: the tag was already pushed
  assert!(repo.local_tag_exists("v1.2.0"));
  assert!(repo.origin_tag_exists("v1.2.0"));
  assert!(repo.read_outputs()?.contains("changed=false"));

  Ok(())
}
