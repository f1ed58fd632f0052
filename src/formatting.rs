use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dtx_lib::output::DTX_OUTPUT_VERSION;
use dtx_lib::{DtxError, DtxOutput, ErrorOutput};

use crate::cli::OutputFormat;

/// Most skipped items listed in pretty output.
const MAX_SKIPPED_SHOWN: usize = 10;

/// Write output in the requested format.
pub fn write_output(
    body: &DtxOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the fatal exit code.
pub fn render_error(err: DtxError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    log::debug!("command failed: {err:?}");
    let error_payload = err.to_payload();
    let payload = DtxOutput::Error(ErrorOutput {
        version: DTX_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(body: &DtxOutput, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &DtxOutput, output: Option<&Path>) -> io::Result<()> {
    let use_human = output.is_none() && std::io::stdout().is_terminal();

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &DtxOutput, colorize: bool) -> String {
    match body {
        DtxOutput::Extract(out) => {
            let mut buf = String::new();
            let header = color("[EXTRACT]", "32", colorize);
            let name = if out.file_name.is_empty() {
                out.file_key.as_str()
            } else {
                out.file_name.as_str()
            };
            writeln!(buf, "{} {} ({})", header, name, out.file_key).ok();

            let counts = &out.counts;
            writeln!(buf, "Tokens:").ok();
            for (label, count) in [
                ("color", counts.color),
                ("typography", counts.typography),
                ("spacing", counts.spacing),
                ("effects", counts.effects),
                ("borderRadius", counts.border_radius),
                ("strokeWeight", counts.stroke_weight),
            ] {
                writeln!(buf, "- {:14} {}", label, count).ok();
            }
            writeln!(buf, "Components: {}", counts.components).ok();

            writeln!(buf, "Files:").ok();
            writeln!(buf, "- {:14} {}", "tokens", out.tokens_path.display()).ok();
            writeln!(buf, "- {:14} {}", "components", out.components_path.display()).ok();

            if !out.skipped.is_empty() {
                let title = format!("Skipped ({}):", out.skipped.len());
                writeln!(buf, "{}", color(&title, "33", colorize)).ok();
                for skipped in out.skipped.iter().take(MAX_SKIPPED_SHOWN) {
                    writeln!(buf, "- {}: {}", skipped.item, skipped.reason).ok();
                }
                if out.skipped.len() > MAX_SKIPPED_SHOWN {
                    writeln!(buf, "- ... {} more", out.skipped.len() - MAX_SKIPPED_SHOWN).ok();
                }
            }
            buf
        }
        DtxOutput::AnalyzeImage(out) => {
            let mut buf = String::new();
            let header = color("[ANALYZE]", "36", colorize);
            writeln!(buf, "{} {} (model: {})", header, out.image.display(), out.model).ok();
            if let Some(count) = out.component_count {
                writeln!(buf, "Components: {}", count).ok();
            }
            if let Some(path) = &out.output_path {
                writeln!(buf, "Written to: {}", path.display()).ok();
            } else if let Some(specs) = &out.specs {
                let json = serde_json::to_string_pretty(specs).unwrap_or_default();
                writeln!(buf, "{json}").ok();
            }
            buf
        }
        DtxOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
