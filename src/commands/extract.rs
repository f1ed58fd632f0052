use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;

use dtx_lib::output::DTX_OUTPUT_VERSION;
use dtx_lib::{
    extract_design_system, fetch_design_payload, parse_file_key, Config, DirectorySource,
    DtxOutput, ExtractOutput, FigmaAuth, FigmaClient, Result, TokenCounts,
};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::{format_effective_config, load_config, resolve_output_dir};

pub const TOKENS_FILE: &str = "design-tokens.json";
pub const COMPONENTS_FILE: &str = "component-specs.json";

/// Run the extract command.
pub async fn run_extract(
    config_path: Option<PathBuf>,
    file: String,
    output_dir: Option<PathBuf>,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    log::debug!("{}", format_effective_config(&config, config_path.as_deref()));

    let file_key = match parse_file_key(&file) {
        Ok(key) => key,
        Err(err) => return render_error(err.into(), format, None),
    };
    let output_dir = resolve_output_dir(output_dir, &config);

    let body = match extract(&config, &file_key, &output_dir).await {
        Ok(body) => body,
        Err(err) => return render_error(err, format, None),
    };
    if let Err(err) = write_output(&body, format, None) {
        return render_error(dtx_lib::DtxError::Config(err.to_string()), format, None);
    }
    ExitCode::SUCCESS
}

async fn extract(config: &Config, file_key: &str, output_dir: &Path) -> Result<DtxOutput> {
    let payload = match DirectorySource::from_env() {
        Some(source) => {
            log::info!("reading design payload from {}", source.dir().display());
            fetch_design_payload(&source, file_key).await?
        }
        None => {
            let client = FigmaClient::with_base_url_and_timeout(
                FigmaAuth::require_from_env()?,
                &config.figma.base_url,
                config.figma.timeout,
            )?;
            fetch_design_payload(&client, file_key).await?
        }
    };

    let system = extract_design_system(&payload);
    log::info!(
        "{} tokens, {} components, {} skipped",
        system.tokens.token_count(),
        system.components.components.len(),
        system.skipped.len()
    );

    tokio::fs::create_dir_all(output_dir).await?;
    let tokens_path = output_dir.join(TOKENS_FILE);
    let components_path = output_dir.join(COMPONENTS_FILE);
    write_document(&tokens_path, &system.tokens, config.output.pretty).await?;
    write_document(&components_path, &system.components, config.output.pretty).await?;

    Ok(DtxOutput::Extract(ExtractOutput {
        version: DTX_OUTPUT_VERSION.to_string(),
        file_key: file_key.to_string(),
        file_name: payload.file.name.clone(),
        tokens_path,
        components_path,
        counts: TokenCounts::new(&system.tokens, system.components.components.len()),
        skipped: system.skipped,
    }))
}

pub(crate) async fn write_document<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let content = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    tokio::fs::write(path, content).await?;
    log::info!("wrote {}", path.display());
    Ok(())
}
