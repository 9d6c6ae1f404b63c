mod core;
mod exec;
mod input;
mod output;
mod release;

use crate::core::config::{EnvSource, ReleaseConfig};
use crate::core::error::{ConfigError, ShipError, ShipResult, print_error};
use crate::input::event::PushEvent;
use crate::output::OutputSink;
use crate::release::{ReleaseContext, RunOutcome};
use clap::Parser;
use std::path::PathBuf;

/// Tag and publish a package when a release commit lands
#[derive(Parser)]
#[command(name = "autoship")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Workspace directory containing package.json (overrides GITHUB_WORKSPACE)
  #[arg(long)]
  workspace: Option<PathBuf>,

  /// Path to the push event payload (overrides GITHUB_EVENT_PATH)
  #[arg(long)]
  event: Option<PathBuf>,

  /// Resolve the release decision without tagging or publishing
  #[arg(long)]
  dry_run: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
}

fn main() {
  let cli = Cli::parse();
  let outputs = OutputSink::from_env();

  match run(&cli) {
    Ok(RunOutcome::Released { version, commit }) => {
      println!("✅ Released {}", version);
      let reported = outputs
        .set("changed", "true")
        .and_then(|()| outputs.set("version", &version))
        .and_then(|()| outputs.set("commit", &commit));
      if let Err(err) = reported {
        handle_error(err);
      }
    }
    Ok(RunOutcome::Skipped(reason)) => {
      println!("⏭️  Nothing to do: {}", reason);
      if let Err(err) = outputs.set("changed", "false") {
        handle_error(err);
      }
    }
    Err(err) => {
      // Best effort; the original failure decides the exit status
      let _ = outputs.set("changed", "false");
      handle_error(err);
    }
  }
}

fn run(cli: &Cli) -> ShipResult<RunOutcome> {
  let env = EnvSource::from_process();
  let config = ReleaseConfig::from_env(&env)?;

  let workspace = cli
    .workspace
    .clone()
    .or_else(|| env.raw("GITHUB_WORKSPACE").map(PathBuf::from))
    .unwrap_or_else(|| PathBuf::from("."));

  let event_path = cli
    .event
    .clone()
    .or_else(|| env.raw("GITHUB_EVENT_PATH").map(PathBuf::from))
    .ok_or(ShipError::Config(ConfigError::EventPathUnset))?;
  let event = PushEvent::load(&event_path)?;

  let ctx = ReleaseContext {
    workspace,
    config,
    event,
    dry_run: cli.dry_run,
  };

  release::run(&ctx)
}

fn handle_error(err: ShipError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
