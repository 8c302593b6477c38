//! minapi-lint: fast linter for ASP.NET Core minimal API handlers.
//!
//! # Usage
//!
//! ```bash
//! # Check C# files for issues
//! minapi-lint check src/
//!
//! # Restrict to one rule, machine-readable output
//! minapi-lint check src/ --select ASP0004 --format json
//!
//! # List available rules
//! minapi-lint rules
//!
//! # Generate default config
//! minapi-lint init
//!
//! # Run with debug logging
//! minapi-lint --debug check src/
//! ```

use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use minapi_lint::cli::{validate_cli_semantics, Cli, Commands};
use minapi_lint::exit_code;
use minapi_lint::lint::{init_color, print_rules, ColorMode, LintConfig, LintEngine, OutputFormat};
use minapi_lint::lint_config::{discover_and_load_config, LintFileConfig, CONFIG_FILE_NAME};

fn main() {
    let cli = Cli::parse();

    // Initialize color output before anything else writes to stdout.
    init_color(cli.color);

    let log_level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(!matches!(cli.color, ColorMode::Never))
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(exit_code::INTERNAL_ERROR);
    }

    for warning in validate_cli_semantics(&cli) {
        eprintln!("{}", warning);
    }

    let file_config = load_file_config(&cli);

    match cli.command {
        Commands::Check {
            paths,
            select,
            ignore,
            format,
            max_diagnostics,
            exit_zero,
        } => {
            let config = build_lint_config(select, ignore, max_diagnostics, &file_config);
            if config.has_empty_selection() {
                std::process::exit(exit_code::CONFIG_ERROR);
            }
            let format = resolve_format(format, &file_config);

            let engine = LintEngine::new(config);
            let code = engine.check(&paths, format);
            if exit_zero && code == exit_code::LINT_ISSUES {
                std::process::exit(exit_code::CLEAN);
            }
            std::process::exit(code);
        }
        Commands::Rules => {
            print_rules();
        }
        Commands::Init { force } => {
            let path = PathBuf::from(CONFIG_FILE_NAME);
            if path.exists() && !force {
                eprintln!(
                    "Error: {} already exists (use --force to overwrite)",
                    path.display()
                );
                std::process::exit(exit_code::CONFIG_ERROR);
            }
            if let Err(e) = std::fs::write(&path, LintFileConfig::default_toml()) {
                eprintln!("Error: could not write {}: {}", path.display(), e);
                std::process::exit(exit_code::IO_ERROR);
            }
            println!("Wrote {}", path.display());
        }
    }
}

/// Load the config file named on the CLI, or discover one from the current
/// directory. Missing config is fine; a broken one is a hard error.
fn load_file_config(cli: &Cli) -> LintFileConfig {
    if let Some(path) = &cli.config {
        match LintFileConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: could not load {}: {}", path.display(), e);
                std::process::exit(exit_code::CONFIG_ERROR);
            }
        }
    } else {
        let start = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match discover_and_load_config(&start) {
            Ok(Some(config)) => config,
            Ok(None) => LintFileConfig::default(),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(exit_code::CONFIG_ERROR);
            }
        }
    }
}

/// Merge CLI flags with file config; CLI always wins.
fn build_lint_config(
    select: Option<String>,
    ignore: Option<String>,
    max_diagnostics: Option<usize>,
    file_config: &LintFileConfig,
) -> LintConfig {
    let select = select.or_else(|| file_config.select_arg());
    let ignore = ignore.or_else(|| file_config.ignore_arg());
    LintConfig::new(select, ignore)
        .with_max_diagnostics(max_diagnostics)
        .with_excludes(file_config.files.exclude.clone())
}

/// CLI format, falling back to the config file's `[output] format`, then text.
fn resolve_format(cli_format: Option<OutputFormat>, file_config: &LintFileConfig) -> OutputFormat {
    cli_format
        .or_else(|| {
            file_config
                .output
                .format
                .as_deref()
                .and_then(|name| OutputFormat::from_str(name, true).ok())
        })
        .unwrap_or_default()
}
