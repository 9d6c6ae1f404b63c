//! Release-commit matching
//!
//! Pure scan over the push's commits. A commit qualifies when the configured
//! pattern matches its message and the pattern's single capture group equals
//! the package version by exact string comparison. Earlier commits in the
//! push win.

use crate::input::event::Commit;
use regex::Regex;

/// Find the first commit whose captured version equals `version`
///
/// The pattern is guaranteed at config load to carry exactly one capture
/// group. No normalization happens on either side of the comparison.
pub fn find_release_commit<'a>(pattern: &Regex, commits: &'a [Commit], version: &str) -> Option<&'a Commit> {
  commits.iter().find(|commit| {
    pattern
      .captures(&commit.message)
      .and_then(|caps| caps.get(1))
      .is_some_and(|m| m.as_str() == version)
  })
}
