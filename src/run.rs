//! Application run modes: logger init, formatting a message, config and completions output.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chatmark::format::{FencePolicy, format_text};
use chatmark::render::{self, ansi, tree};
use clap::CommandFactory;

use crate::cli::{self, Args, OutputFormat};
use crate::core;
use crate::core::config::{Config, ConfigError};

/// Errors surfaced to the user by the binary. Formatting itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Failed to read {}: {source}", .path.display())]
    Input { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("Failed to serialize blocks: {0}")]
    Json(#[from] serde_json::Error),
}

/// Initialize env_logger on stderr so stdout stays clean for formatted output.
pub fn init_logger(args: &Args) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level()),
    )
    .target(env_logger::Target::Stderr)
    .try_init();
}

/// Read the message from `input`, or stdin when it is `None` or `-`.
pub fn read_input(input: Option<&Path>) -> Result<String, RunError> {
    match input {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| RunError::Input {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| RunError::Input {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(text)
        }
    }
}

/// Command-line flags take precedence over the loaded config.
fn apply_args(mut config: Config, args: &Args) -> Config {
    if let Some(width) = args.width {
        config.wrap_width = width;
    }
    if args.drop_unterminated_fence {
        config.unterminated_fence = FencePolicy::Drop;
    }
    if args.no_color {
        config.color = false;
    }
    config
}

/// Format the input message and write it to stdout in the requested format.
pub fn format_input(args: &Args, config: Config) -> Result<(), RunError> {
    let config = apply_args(config, args);
    let text = read_input(args.input.as_deref())?;
    let blocks = format_text(&text, &config.format_options());
    log::info!("{} blocks from {} bytes", blocks.len(), text.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &blocks)?;
            writeln!(out)?;
        }
        OutputFormat::Tree => tree::write_tree(&mut out, &blocks)?,
        OutputFormat::Ansi | OutputFormat::Plain => {
            let lines = render::to_lines(&blocks, &config.render_options());
            let color = args.format == OutputFormat::Ansi && config.color;
            ansi::write_lines(&mut out, &lines, color)?;
        }
    }
    Ok(())
}

/// Print config path, whether it exists, and the effective settings.
pub fn show_config() -> Result<(), RunError> {
    let path = core::config::config_path();
    let config = core::config::load()?;
    let mut out = io::stdout().lock();
    writeln!(out, "{} {}", core::app::NAME, core::app::VERSION)?;
    match &path {
        Some(p) => writeln!(
            out,
            "config: {} ({})",
            p.display(),
            if p.exists() { "found" } else { "not found, using defaults" }
        )?,
        None => writeln!(out, "config: no config directory available")?,
    }
    serde_json::to_writer_pretty(&mut out, &config)?;
    writeln!(out)?;
    Ok(())
}

pub fn print_completions(shell: clap_complete::Shell) {
    let mut cmd = Args::command();
    cli::generate(shell, &mut cmd, core::app::NAME, &mut io::stdout());
}
