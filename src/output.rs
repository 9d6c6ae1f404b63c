//! Pipeline output reporting
//!
//! Records named key/value results for the invoking workflow: appended as
//! `name=value` lines to the file named by GITHUB_OUTPUT when present,
//! otherwise emitted as the legacy `::set-output` workflow command on stdout.
//! Values are percent-encoded so multi-line data survives the transport.

use crate::core::error::{ResultExt, ShipResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Sink for name/value results consumed by the invoking pipeline
pub struct OutputSink {
  file: Option<PathBuf>,
}

impl OutputSink {
  /// Resolve the sink from the current environment
  pub fn from_env() -> Self {
    Self {
      file: std::env::var("GITHUB_OUTPUT")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from),
    }
  }

  /// Sink writing to an explicit file
  #[cfg(test)]
  pub fn to_file(path: PathBuf) -> Self {
    Self { file: Some(path) }
  }

  /// Record one named result
  pub fn set(&self, name: &str, value: &str) -> ShipResult<()> {
    let value = escape_data(value);
    match &self.file {
      Some(path) => {
        let mut file = OpenOptions::new()
          .create(true)
          .append(true)
          .open(path)
          .with_context(|| format!("Failed to open output file {}", path.display()))?;
        writeln!(file, "{}={}", name, value).context("Failed to write pipeline output")?;
      }
      None => println!("::set-output name={}::{}", name, value),
    }
    Ok(())
  }
}

/// Percent-encode characters that would break the name=value transport
fn escape_data(value: &str) -> String {
  value.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}
