use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use edconf::{
    find_config_file, generate_init_file, load_config, merge_settings, run, should_use_colors,
    CliOptions, EdconfToml, OutputContext, OutputMode,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "edconf")]
#[command(version, about = "Show the .editorconfig rules that apply to files")]
struct Cli {
    /// Target files or directories
    #[arg(required_unless_present = "init")]
    paths: Vec<PathBuf>,

    /// Print raw resolved properties, including unknown ones
    #[arg(short, long)]
    raw: bool,

    /// Output only the names of files that have rules
    #[arg(short, long)]
    quiet: bool,

    /// Config file name to look for in each directory
    #[arg(short, long, value_name = "NAME")]
    file_name: Option<String>,

    /// Generate a template edconf.toml configuration file
    #[arg(long)]
    init: bool,

    /// Specify config file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show which config files each result came from, and debug logs
    #[arg(short, long)]
    verbose: bool,

    /// Force colored output
    #[arg(long)]
    color: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle --init command
    if cli.init {
        return handle_init();
    }

    let toml_config = load_configuration(&cli.config);

    let cli_options = CliOptions {
        file_name: cli.file_name.clone(),
        raw: cli.raw.then_some(true),
    };
    let settings = merge_settings(&cli_options, toml_config.as_ref());

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let ctx = OutputContext::new(
        mode,
        should_use_colors(cli.color, cli.no_color),
        cli.verbose,
    );

    match run(&cli.paths, &settings, &ctx) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to install logger: {e}");
    }
}

fn handle_init() -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn load_configuration(explicit_path: &Option<PathBuf>) -> Option<EdconfToml> {
    let config_path = explicit_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|d| find_config_file(&d))
    });

    config_path.and_then(|p| match load_config(&p) {
        Ok(config) => {
            tracing::debug!(path = %p.display(), "using config");
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: Failed to load {}: {}", p.display(), e);
            None
        }
    })
}
