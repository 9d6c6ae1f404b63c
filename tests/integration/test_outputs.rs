//! Pipeline output reporting

use crate::helpers::TestRepo;
use anyhow::Result;

#[test]
fn test_output_file_format() -> Result<()> {
  let repo = TestRepo::new("1.2.0")?;
  repo.write_event(&[("b2", "Release 1.2.0")])?;

  let output = repo.run_autoship(&[], &[("PUBLISH_COMMAND", "git"), ("PUBLISH_ARGS", "--version")])?;
  assert!(
    output.status.success(),
    "stderr: {}",
    String::from_utf8_lossy(&output.stderr)
  );

  assert_eq!(repo.read_outputs()?, "changed=true\nversion=1.2.0\ncommit=b2\n");

  Ok(())
}

#[test]
fn test_set_output_fallback_without_output_file() -> Result<()> {
  let repo = TestRepo::new("1.2.0")?;
  repo.write_event(&[("a1", "fix typo")])?;

  let output = repo.run_autoship(&[], &[("GITHUB_OUTPUT", "")])?;
  assert!(output.status.success());

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(
    stdout.contains("::set-output name=changed::false"),
    "stdout: {}",
    stdout
  );

  Ok(())
}
