use clap::Parser;
use rbspeed::{run_scan, Cli, JsonReporter, OutputFormat, Reporter, TerminalReporter};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let report = match run_scan(&cli.path) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(2);
        }
    };

    let output = match cli.format {
        OutputFormat::Terminal => TerminalReporter::new().report(&report),
        OutputFormat::Json => JsonReporter::new().report(&report),
    };
    print!("{}", output);

    if report.has_findings() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
