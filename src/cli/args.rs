use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI argument parsing with environment variable support.
///
/// `AI_PROVIDER` selects the provider when `--provider` is not given.
#[derive(Parser, Debug)]
#[command(name = "rulegen")]
#[command(about = "Generate AI coding-assistant rulesets from a project description")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// LLM provider (openai, ollama, huggingface, gemini)
    #[arg(short, long, global = true, env = "AI_PROVIDER")]
    pub provider: Option<String>,

    /// Model to use with the selected provider
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Config file path
    #[arg(short, long, global = true, env = "RULEGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a ruleset from a project description (JSON)
    Generate(GenerateArgs),
    /// Report the status of the configured provider
    Health,
    /// List the option catalog for project descriptions
    Options,
    /// Send a fixed prompt to the configured provider and show a preview
    Test,
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Project description file, or `-` for stdin
    pub input: PathBuf,

    /// Directory for RULESET.md and ruleset.json
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output format(s), comma-separated
    #[arg(short, long, value_delimiter = ',')]
    pub format: Vec<OutputFormat>,

    /// Print the generated markdown instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Print the prompt without calling the provider
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite existing output files
    #[arg(long)]
    pub force: bool,
}

impl GenerateArgs {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_generate_flags() {
        let args = Args::try_parse_from([
            "rulegen",
            "generate",
            "project.json",
            "--format",
            "markdown,json",
            "--dry-run",
            "-vv",
        ])
        .expect("valid arguments");

        assert_eq!(args.verbose, 2);
        let Command::Generate(generate) = args.command else {
            panic!("expected generate subcommand");
        };
        assert_eq!(generate.format, vec![OutputFormat::Markdown, OutputFormat::Json]);
        assert!(generate.dry_run);
        assert!(!generate.reads_stdin());
    }

    #[test]
    fn test_global_provider_after_subcommand() {
        let args = Args::try_parse_from(["rulegen", "health", "--provider", "ollama"])
            .expect("valid arguments");
        assert_eq!(args.provider.as_deref(), Some("ollama"));
        assert!(matches!(args.command, Command::Health));
    }

    #[test]
    fn test_stdin_input() {
        let args = Args::try_parse_from(["rulegen", "generate", "-"]).expect("valid arguments");
        let Command::Generate(generate) = args.command else {
            panic!("expected generate subcommand");
        };
        assert!(generate.reads_stdin());
    }
}
