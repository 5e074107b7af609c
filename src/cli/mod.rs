pub mod args;
pub mod config;

use crate::generator::build_ruleset_prompt;
use crate::llm::ProviderRouter;
use crate::output::{WriteOptions, write_outputs};
use crate::project::ProjectInfo;
use crate::project::catalog::project_options;
use anyhow::{Context, Result};
use args::{Args, Command, GenerateArgs};
use config::Config;
use console::style;
use std::io::Read;

/// Dispatch a parsed command line against the loaded configuration.
pub async fn run(args: Args, config: Config) -> Result<()> {
    tracing::info!("rulegen v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        provider = %config.llm.provider,
        model = config.llm.selected_model().unwrap_or("unknown"),
        timeout_secs = config.llm.timeout_secs,
        "Configuration resolved"
    );

    match args.command {
        Command::Generate(generate) => run_generate(&generate, &config, args.quiet).await,
        Command::Health => {
            let report = ProviderRouter::new(&config.llm)?.health().await;
            print_json(&report)
        }
        Command::Options => print_json(&project_options()),
        Command::Test => {
            let report = ProviderRouter::new(&config.llm)?.smoke_test().await?;
            print_json(&report)
        }
    }
}

async fn read_input(generate: &GenerateArgs) -> Result<String> {
    if generate.reads_stdin() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read project description from stdin")?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(&generate.input)
        .await
        .with_context(|| format!("Failed to read {}", generate.input.display()))
}

#[allow(clippy::print_stdout)]
async fn run_generate(generate: &GenerateArgs, config: &Config, quiet: bool) -> Result<()> {
    let input = read_input(generate).await?;
    let info = ProjectInfo::from_json(&input)?;

    if generate.dry_run {
        println!("{}", build_ruleset_prompt(&info));
        return Ok(());
    }

    let result = crate::generate_ruleset(&config.llm, &info).await?;

    if generate.stdout {
        println!("{}", result.markdown);
        return Ok(());
    }

    let formats = if generate.format.is_empty() {
        config.output.formats.clone()
    } else {
        generate.format.clone()
    };
    let options = WriteOptions::new(
        generate
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output.dir.clone()),
    )
    .with_formats(formats)
    .with_force(generate.force);

    let written = write_outputs(&result, &options)?;
    if !quiet {
        for path in &written {
            eprintln!("{} {}", style("\u{2713}").green(), path.display());
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
