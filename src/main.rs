use abstats::cli::{Cli, OutputFormat};
use abstats::comparison::{compare, AnalysisConfig};
use abstats::input::read_input;
use abstats::json_output::JsonOutput;
use abstats::terminal_output::TerminalRenderer;
use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; -v enables debug, -vv trace
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Build the analysis configuration: defaults, then --config, then flags
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::debug!("loading analysis config from {}", path.display());
            AnalysisConfig::from_file(path)?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(confidence) = args.confidence {
        config.confidence = confidence;
    }
    if let Some(max_regression) = args.max_regression {
        config.max_regression = max_regression;
    }
    if let Some(max_interval_percent) = args.max_interval_percent {
        config.max_interval_percent = max_interval_percent;
    }
    if let Some(histogram_buckets) = args.histogram_buckets {
        config.histogram_buckets = histogram_buckets;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &Cli) -> Result<bool> {
    let config = load_config(args)?;
    let input = read_input(args.input_file.as_deref())?;

    let outcome = compare(&input.groups, &args.display_unit, &config)?;

    match args.format {
        OutputFormat::Text => {
            let color = !args.no_color && std::io::stdout().is_terminal();
            let renderer = TerminalRenderer::new(color, args.verbose > 0);
            print!("{}", renderer.render(&outcome));
        }
        OutputFormat::Json => {
            println!("{}", JsonOutput::new(&outcome, config.confidence).to_json()?);
        }
    }

    Ok(outcome.verdict)
}

fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    init_tracing(args.verbose);

    if run(&args)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
