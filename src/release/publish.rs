//! Publish strategy dispatch
//!
//! Builds the command line for the configured strategy and hands it to the
//! process runner. Selection is pure; any runner failure propagates unchanged.

use crate::core::config::{PublishCommand, ReleaseConfig};
use crate::core::error::ShipResult;
use crate::exec;
use std::path::Path;

/// Build the `(program, argv)` pair for a publish strategy
pub fn publish_args(command: &PublishCommand, version: &str, extra: &[String]) -> (String, Vec<String>) {
  match command {
    PublishCommand::Yarn => {
      let mut args = vec![
        "publish".to_string(),
        "--non-interactive".to_string(),
        "--new-version".to_string(),
        version.to_string(),
      ];
      args.extend(extra.iter().cloned());
      ("yarn".to_string(), args)
    }
    PublishCommand::Npm => {
      // npm derives the version from package.json already on disk
      let mut args = vec!["publish".to_string()];
      args.extend(extra.iter().cloned());
      ("npm".to_string(), args)
    }
    PublishCommand::Custom(program) => (program.clone(), extra.to_vec()),
  }
}

/// Run the configured publish command in the workspace
pub fn run_publish(workspace: &Path, config: &ReleaseConfig, version: &str) -> ShipResult<()> {
  let (program, args) = publish_args(&config.publish_command, version, &config.publish_args);
  let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
  exec::run(workspace, &program, &arg_refs)?;
  Ok(())
}
