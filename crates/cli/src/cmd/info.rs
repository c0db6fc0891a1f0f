use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use extforge_lib::BuildConfig;
use extforge_lib::artifact::{BuildArtifact, InstallTarget, OutputArtifact};
use extforge_lib::platform::Os;

use crate::output::{OutputFormat, print_json, print_stat, yes_no};

#[derive(Serialize)]
struct InfoReport<'a> {
  platform: Option<Os>,
  config: &'a BuildConfig,
  paths: Paths,
  output_exists: bool,
  installed: bool,
}

#[derive(Serialize)]
struct Paths {
  build_artifact: BuildArtifact,
  output_artifact: OutputArtifact,
  manifest: PathBuf,
  install_target: InstallTarget,
}

pub fn cmd_info(config: BuildConfig, output: OutputFormat) -> Result<()> {
  let paths = Paths {
    build_artifact: config.build_artifact(),
    output_artifact: config.output_artifact(),
    manifest: config.manifest_path(),
    install_target: config.install_target(),
  };
  let report = InfoReport {
    platform: Os::current(),
    output_exists: paths.output_artifact.path().is_file(),
    installed: paths.install_target.path().join(config.output_file()).is_file(),
    config: &config,
    paths,
  };

  if output.is_json() {
    return print_json(&report);
  }

  println!("System:");
  match report.platform {
    Some(os) => print_stat("Platform", os.as_str()),
    None => print_stat("Platform", "unknown"),
  }

  println!("Configuration:");
  print_stat("Project", &config.project_dir().display().to_string());
  print_stat("Target", config.target());
  print_stat("Crate", config.crate_name());
  print_stat("Extension id", config.extension_id());

  println!("Paths:");
  print_stat("Build artifact", &report.paths.build_artifact.to_string());
  print_stat("Output artifact", &report.paths.output_artifact.to_string());
  print_stat("Manifest", &report.paths.manifest.display().to_string());
  print_stat("Install target", &report.paths.install_target.to_string());

  println!("State:");
  print_stat("Output built", yes_no(report.output_exists));
  print_stat("Installed", yes_no(report.installed));

  Ok(())
}
