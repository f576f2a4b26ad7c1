//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  chatmark message.md              Format a file for the terminal
  cat reply.txt | chatmark         Read the message from stdin
  chatmark -f json message.md      Dump the block tree as JSON
  chatmark -f tree -               Debug view of blocks and inline spans
  chatmark -w 60 message.md        Wrap to 60 columns
  chatmark config                  Show config path and effective settings
  chatmark completions bash        Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Format chat messages with lightweight markup",
    after_help = AFTER_HELP,
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Message file to format ('-' or omitted reads stdin)
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Ansi)]
    pub format: OutputFormat,

    /// Wrap width in columns (0 disables wrapping); overrides config
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Discard a code block whose closing fence is missing instead of showing it
    #[arg(long)]
    pub drop_unterminated_fence: bool,

    /// Disable colors in ansi output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled terminal text
    Ansi,
    /// Rendered text without styling
    Plain,
    /// Indented block and span listing
    Tree,
    /// Block tree as JSON
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show config path and effective settings
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_defaults() {
        let args = Args::try_parse_from(["chatmark"]).expect("parse");
        assert!(args.command.is_none());
        assert!(args.input.is_none());
        assert_eq!(args.format, OutputFormat::Ansi);
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn parse_input_and_flags() {
        let args = Args::try_parse_from(["chatmark", "-f", "json", "-w", "40", "-vv", "msg.md"])
            .expect("parse");
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.width, Some(40));
        assert_eq!(args.input, Some(PathBuf::from("msg.md")));
        assert_eq!(args.log_level(), "debug");
    }

    #[test]
    fn parse_subcommand() {
        let args = Args::try_parse_from(["chatmark", "config"]).expect("parse");
        assert!(matches!(args.command, Some(Commands::Config)));
    }

    #[test]
    fn quiet_wins_over_verbose() {
        let args = Args::try_parse_from(["chatmark", "-q", "-v"]).expect("parse");
        assert_eq!(args.log_level(), "error");
    }
}
