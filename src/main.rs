mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_analyze_image, run_extract};
use log::LevelFilter;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let args = cli::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Extract {
            file,
            output_dir,
            format,
        } => run_extract(args.config, file, output_dir, format).await,
        Commands::AnalyzeImage {
            image,
            prompt_file,
            output,
            format,
        } => run_analyze_image(args.config, image, prompt_file, output, format).await,
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}
