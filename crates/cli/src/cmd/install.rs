use std::time::Instant;

use anyhow::Result;

use extforge_lib::{BuildConfig, Pipeline};

use crate::cmd::build::print_build_stats;
use crate::cmd::run_pipeline;
use crate::output::{OutputFormat, print_json, print_stat, print_success};

pub fn cmd_install(config: BuildConfig, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let pipeline = Pipeline::new(config);
  let report = run_pipeline(pipeline.install())?;

  if output.is_json() {
    print_json(&report)?;
  } else {
    println!();
    print_success("Install complete!");
    print_stat("Installed to", &report.installed.dir.display().to_string());
    print_build_stats(&report.build, start.elapsed());
  }

  Ok(())
}
