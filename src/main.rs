use anyhow::Result;
use rulegen::cli;
use rulegen::utils::error::{RulegenError, format_error};

#[tokio::main]
async fn main() {
    // Verbosity is needed for error formatting even when argument parsing fails later
    let verbose = std::env::args().any(|arg| arg.starts_with("-v"));

    if let Err(e) = run_main().await {
        display_error(&e, verbose);
        std::process::exit(1);
    }
}

/// Display an error with contextual formatting.
///
/// Tries to downcast to `RulegenError` for rich formatting, falls back to
/// anyhow's error chain display for other errors.
fn display_error(error: &anyhow::Error, verbose: bool) {
    if let Some(rulegen_error) = error.downcast_ref::<RulegenError>() {
        eprintln!("{}", format_error(rulegen_error, verbose));
        return;
    }

    eprintln!("\n\u{26a0} Error: {error}");

    let causes: Vec<_> = error.chain().skip(1).collect();
    if !causes.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in causes.iter().enumerate() {
            let prefix = if i == causes.len() - 1 {
                "\u{2514}\u{2500}"
            } else {
                "\u{251c}\u{2500}"
            };
            eprintln!("{prefix} {cause}");
        }
    }

    if verbose {
        let backtrace = error.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            eprintln!("\nBacktrace:\n{backtrace}");
        }
    }
}

async fn run_main() -> Result<()> {
    let args = cli::args::parse();

    rulegen::init_logging(args.verbose, args.quiet);

    let config = cli::config::load(&args)?;

    cli::run(args, config).await
}
