use std::time::{Duration, Instant};

use anyhow::Result;

use extforge_lib::pipeline::BuildReport;
use extforge_lib::{BuildConfig, Pipeline};

use crate::cmd::run_pipeline;
use crate::output::{OutputFormat, format_bytes, format_duration, print_json, print_stat, print_success};

pub fn cmd_build(config: BuildConfig, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let pipeline = Pipeline::new(config);
  let report = run_pipeline(pipeline.build())?;

  if output.is_json() {
    print_json(&report)?;
  } else {
    println!();
    print_success("Build complete!");
    print_build_stats(&report, start.elapsed());
  }

  Ok(())
}

/// Stats shared by `build` and `install` text output.
pub(super) fn print_build_stats(report: &BuildReport, elapsed: Duration) {
  print_stat("Target", &report.setup.target);
  print_stat("Artifact", &report.output.path.display().to_string());
  print_stat("Size", &format_bytes(report.output.bytes));
  print_stat("SHA-256", &report.output.sha256.to_string());
  print_stat("Duration", &format_duration(elapsed));
}
