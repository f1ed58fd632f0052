use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dtx")]
#[command(
    version,
    about = "Design Token Extractor - Normalize Figma files and screenshots into design-system JSON",
    long_about = "Design Token Extractor (dtx)\n\nModes:\n- extract: fetch a Figma file and write design-tokens.json and component-specs.json.\n- analyze-image: describe the components in a design screenshot using a vision model.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        short,
        global = true,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) for Figma/vision endpoints, timeouts and output defaults; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract design tokens and component specs from a Figma file
    Extract {
        #[arg(
            long,
            help = "Figma file key or URL (https://www.figma.com/design/<FILE_KEY>/...)"
        )]
        file: String,

        #[arg(
            long,
            value_name = "DIR",
            help = "Directory for design-tokens.json and component-specs.json (config default: ./output)"
        )]
        output_dir: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },

    /// Generate component specs from a design screenshot
    AnalyzeImage {
        #[arg(long, help = "Screenshot to analyze (PNG, JPEG or WebP, max 20 MB)")]
        image: PathBuf,

        #[arg(
            long,
            value_name = "PATH",
            help = "File containing a system prompt that replaces the built-in one"
        )]
        prompt_file: Option<PathBuf>,

        #[arg(
            long,
            short,
            help = "Write the component-specs document to this file (included in stdout status if omitted)"
        )]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
