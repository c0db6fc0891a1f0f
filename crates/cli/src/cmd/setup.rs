use anyhow::Result;

use extforge_lib::BuildConfig;
use extforge_lib::Pipeline;
use extforge_lib::pipeline::Provisioned;

use crate::cmd::run_pipeline;
use crate::output::{OutputFormat, print_info, print_json, print_success};

pub fn cmd_setup(config: BuildConfig, output: OutputFormat) -> Result<()> {
  let pipeline = Pipeline::new(config);
  let report = run_pipeline(pipeline.setup())?;

  if output.is_json() {
    print_json(&report)?;
  } else {
    match report.provisioned {
      Provisioned::AlreadyInstalled => print_info(&format!("Target {} is already installed", report.target)),
      Provisioned::Installed => print_success(&format!("Installed target {}", report.target)),
    }
  }

  Ok(())
}
