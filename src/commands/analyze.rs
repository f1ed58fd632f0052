use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde_json::Value;

use dtx_lib::output::DTX_OUTPUT_VERSION;
use dtx_lib::{
    analyze_screenshot, load_screenshot, AnalyzeImageOutput, Config, DtxError, DtxOutput,
    ImageAnalyzer, Result, StaticAnalyzer, VisionClient, VisionClientConfig,
    DEFAULT_SYSTEM_PROMPT,
};

use crate::cli::OutputFormat;
use crate::commands::extract::write_document;
use crate::formatting::{render_error, write_output};
use crate::settings::{format_effective_config, load_config};

/// Run the analyze-image command.
pub async fn run_analyze_image(
    config_path: Option<PathBuf>,
    image: PathBuf,
    prompt_file: Option<PathBuf>,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    log::debug!("{}", format_effective_config(&config, config_path.as_deref()));

    let body = match analyze(&config, &image, prompt_file.as_deref(), output.as_deref()).await {
        Ok(body) => body,
        Err(err) => return render_error(err, format, None),
    };
    if let Err(err) = write_output(&body, format, None) {
        return render_error(DtxError::Config(err.to_string()), format, None);
    }
    ExitCode::SUCCESS
}

async fn analyze(
    config: &Config,
    image_path: &Path,
    prompt_file: Option<&Path>,
    output: Option<&Path>,
) -> Result<DtxOutput> {
    let image = load_screenshot(image_path)?;
    let prompt = load_prompt(prompt_file).await?;

    let analyzer: Box<dyn ImageAnalyzer> = match StaticAnalyzer::from_env(&config.vision.model)? {
        Some(mock) => {
            log::info!("using canned vision response");
            Box::new(mock)
        }
        None => Box::new(VisionClient::new(VisionClientConfig::from_settings(
            &config.vision,
        )?)?),
    };

    let specs = analyze_screenshot(analyzer.as_ref(), &image, &prompt).await?;
    let component_count = specs
        .get("components")
        .and_then(Value::as_array)
        .map(Vec::len);

    if let Some(path) = output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        write_document(path, &specs, config.output.pretty).await?;
    }

    Ok(DtxOutput::AnalyzeImage(AnalyzeImageOutput {
        version: DTX_OUTPUT_VERSION.to_string(),
        image: image_path.to_path_buf(),
        model: analyzer.model().to_string(),
        output_path: output.map(Path::to_path_buf),
        component_count,
        specs: if output.is_none() { Some(specs) } else { None },
    }))
}

async fn load_prompt(prompt_file: Option<&Path>) -> Result<String> {
    let Some(path) = prompt_file else {
        return Ok(DEFAULT_SYSTEM_PROMPT.to_string());
    };
    let prompt = tokio::fs::read_to_string(path).await?;
    if prompt.trim().is_empty() {
        return Err(DtxError::Config(format!(
            "Prompt file {} is empty",
            path.display()
        )));
    }
    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_prompt_defaults_and_rejects_empty_files() {
        assert_eq!(load_prompt(None).await.unwrap(), DEFAULT_SYSTEM_PROMPT);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "  \n").unwrap();
        assert!(matches!(
            load_prompt(Some(&path)).await,
            Err(DtxError::Config(_))
        ));

        std::fs::write(&path, "Describe buttons only.").unwrap();
        assert_eq!(load_prompt(Some(&path)).await.unwrap(), "Describe buttons only.");
    }
}
