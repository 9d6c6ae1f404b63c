//! Neutral subprocess execution
//!
//! Runs one command to completion per call. The runner knows nothing about
//! what the command means; callers own the interpretation of exit codes
//! (the tag-existence probe in `release::tags` is the only place a specific
//! non-zero status is absorbed).

use crate::core::error::ExecError;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run `program` with `args` in `dir`, waiting for completion.
///
/// stdin and stdout are discarded; stderr is captured and trimmed for
/// diagnostic logging by the caller. Exit status 0 maps to `Ok(())`, any
/// other completion to `ExecError::Exit`. A process that cannot be started
/// at all is the distinct `ExecError::Launch`.
pub fn run(dir: &Path, program: &str, args: &[&str]) -> Result<(), ExecError> {
  let output = Command::new(program)
    .current_dir(dir)
    .args(args)
    .stdin(Stdio::null())
    .stdout(Stdio::null())
    .output()
    .map_err(|source| ExecError::Launch {
      program: program.to_string(),
      source,
    })?;

  if output.status.success() {
    return Ok(());
  }

  Err(ExecError::Exit {
    program: program.to_string(),
    code: output.status.code(),
    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
  })
}
