use std::time::Instant;

use anyhow::Result;

use extforge_lib::{BuildConfig, Pipeline};

use crate::cmd::run_pipeline;
use crate::output::{OutputFormat, format_duration, print_json, print_stat, print_success, yes_no};

pub fn cmd_clean(config: BuildConfig, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let pipeline = Pipeline::new(config);
  let cleaned = run_pipeline(pipeline.clean())?;

  if output.is_json() {
    print_json(&cleaned)?;
  } else {
    println!();
    print_success("Clean complete!");
    print_stat("Output", &cleaned.output.display().to_string());
    print_stat("Output removed", yes_no(cleaned.output_removed));
    print_stat("Duration", &format_duration(start.elapsed()));
  }

  Ok(())
}
