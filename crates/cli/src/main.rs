mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use extforge_lib::{BuildConfig, ConfigError, ConfigOverrides, PipelineError};

use crate::cmd::{cmd_build, cmd_clean, cmd_info, cmd_install, cmd_setup};
use crate::output::{OutputFormat, print_error, print_pipeline_error};

/// extforge - build and install a compiled editor extension
#[derive(Parser)]
#[command(name = "extforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short = 'o', long, global = true, value_enum, default_value = "text")]
  output: OutputFormat,

  #[command(flatten)]
  config: ConfigArgs,

  #[command(subcommand)]
  command: Commands,
}

/// Configuration overrides. Each also reads `EXTFORGE_<NAME>` from the
/// environment; flags win.
#[derive(Args, Debug)]
struct ConfigArgs {
  /// Directory of the extension crate [env: EXTFORGE_PROJECT_DIR]
  #[arg(long, global = true, value_name = "DIR")]
  project_dir: Option<PathBuf>,

  /// Compilation target [env: EXTFORGE_TARGET]
  #[arg(long, global = true, value_name = "TRIPLE")]
  target: Option<String>,

  /// Name of the crate being compiled [env: EXTFORGE_CRATE_NAME]
  #[arg(long, global = true, value_name = "NAME")]
  crate_name: Option<String>,

  /// File extension of the compiled module [env: EXTFORGE_ARTIFACT_EXTENSION]
  #[arg(long, global = true, value_name = "EXT")]
  artifact_extension: Option<String>,

  /// File name of the relocated artifact [env: EXTFORGE_OUTPUT_FILE]
  #[arg(long, global = true, value_name = "FILE")]
  output_file: Option<String>,

  /// Extension identifier, the install directory name [env: EXTFORGE_EXTENSION_ID]
  #[arg(long, global = true, value_name = "ID")]
  extension_id: Option<String>,

  /// Manifest file installed next to the artifact [env: EXTFORGE_MANIFEST]
  #[arg(long = "manifest", global = true, value_name = "FILE")]
  manifest_file: Option<String>,

  /// Host directory of installed extensions [env: EXTFORGE_EXTENSIONS_DIR]
  #[arg(long, global = true, value_name = "DIR")]
  extensions_dir: Option<PathBuf>,
}

impl From<ConfigArgs> for ConfigOverrides {
  fn from(args: ConfigArgs) -> Self {
    ConfigOverrides {
      project_dir: args.project_dir,
      target: args.target,
      crate_name: args.crate_name,
      artifact_extension: args.artifact_extension,
      output_file: args.output_file,
      extension_id: args.extension_id,
      manifest_file: args.manifest_file,
      extensions_dir: args.extensions_dir,
      cargo: None,
      rustup: None,
    }
  }
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Install the compilation target
  Setup,

  /// Compile the extension and copy it to the output file
  Build,

  /// Build, then install the artifact and manifest into the host
  Install,

  /// Remove the build cache and the output file
  Clean,

  /// Show the resolved configuration and artifact paths
  Info,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => report_failure(&err),
  }
}

fn init_tracing(verbose: bool) {
  let default_filter = if verbose { "extforge=debug,extforge_lib=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  let overrides = ConfigOverrides::from(cli.config).or(ConfigOverrides::from_env());
  let config = BuildConfig::resolve(overrides)?;
  debug!(command = ?cli.command, "running");

  match cli.command {
    Commands::Setup => cmd_setup(config, cli.output),
    Commands::Build => cmd_build(config, cli.output),
    Commands::Install => cmd_install(config, cli.output),
    Commands::Clean => cmd_clean(config, cli.output),
    Commands::Info => cmd_info(config, cli.output),
  }
}

/// Print `err` and pick the exit code: the failing tool's code for pipeline
/// failures, 2 for configuration errors, 1 otherwise.
fn report_failure(err: &anyhow::Error) -> ExitCode {
  if let Some(pipeline_err) = err.downcast_ref::<PipelineError>() {
    print_pipeline_error(pipeline_err);
    return ExitCode::from(pipeline_err.exit_code());
  }

  print_error(&format!("{:#}", err));
  if err.downcast_ref::<ConfigError>().is_some() {
    ExitCode::from(2)
  } else {
    ExitCode::FAILURE
  }
}
