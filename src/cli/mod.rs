//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// things-json - check and normalize to-do documents
#[derive(Parser, Debug)]
#[command(name = "tj", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Date format for creation/completion dates (iso8601, fixed)
    #[arg(long, global = true, env = "TJ_DATE_FORMAT")]
    pub date_format: Option<String>,

    /// strftime pattern used with --date-format fixed
    #[arg(long, global = true, env = "TJ_DATE_PATTERN")]
    pub date_pattern: Option<String>,

    /// Treat validation findings as errors
    #[arg(long, global = true)]
    pub strict: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a document and report what it contains
    Check {
        /// Document path (reads stdin when omitted or `-`)
        file: Option<PathBuf>,
    },

    /// Re-emit a document in canonical form
    Fmt {
        /// Document path (reads stdin when omitted or `-`)
        file: Option<PathBuf>,

        /// Indent the output
        #[arg(long)]
        pretty: bool,

        /// Rewrite the file in place instead of printing
        #[arg(long, short)]
        write: bool,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fmt_flags() {
        let cli = Cli::try_parse_from(["tj", "fmt", "todos.json", "--pretty", "-w"]).unwrap();
        match cli.command {
            Commands::Fmt { file, pretty, write } => {
                assert_eq!(file, Some(PathBuf::from("todos.json")));
                assert!(pretty);
                assert!(write);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tj", "check", "--strict", "--json", "-vv"]).unwrap();
        assert!(cli.strict);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Check { file: None }));
    }
}
