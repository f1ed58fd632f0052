use std::path::{Path, PathBuf};

use dtx_lib::{Config, DtxError};
use humantime_serde::re::humantime::format_duration;

/// Load config from `path` (or the central config) and validate it.
pub fn load_config(path: Option<&Path>) -> Result<Config, DtxError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        DtxError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        DtxError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Output directory for extraction, preferring the CLI flag over config.
pub fn resolve_output_dir(cli_output_dir: Option<PathBuf>, config: &Config) -> PathBuf {
    cli_output_dir.unwrap_or_else(|| config.output.directory.clone())
}

/// One-line summary of the settings a command runs with.
pub fn format_effective_config(config: &Config, config_source: Option<&Path>) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective config [{source}]: figma={} (timeout {}), vision={} model={} max_tokens={} temperature={:.2} (timeout {}), output={} pretty={}",
        config.figma.base_url,
        format_duration(config.figma.timeout),
        config.vision.endpoint,
        config.vision.model,
        config.vision.max_tokens,
        config.vision.temperature,
        format_duration(config.vision.timeout),
        config.output.directory.display(),
        config.output.pretty,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn load_config_reports_invalid_values_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dtx.toml");
        std::fs::write(&path, "[vision]\nmax_tokens = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        match err {
            DtxError::Config(msg) => {
                assert!(msg.starts_with("Invalid config ("));
                assert!(msg.contains("max_tokens"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn load_config_reports_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn resolve_output_dir_prefers_flag() {
        let cfg = Config::default();
        assert_eq!(
            resolve_output_dir(Some(PathBuf::from("tokens")), &cfg),
            PathBuf::from("tokens")
        );
        assert_eq!(resolve_output_dir(None, &cfg), PathBuf::from("./output"));
    }

    #[test]
    fn format_effective_config_includes_all_fields() {
        let mut cfg = Config::default();
        cfg.figma.timeout = Duration::from_secs(45);
        let summary = format_effective_config(&cfg, Some(Path::new("dtx.toml")));

        assert!(summary.contains("dtx.toml"));
        assert!(summary.contains("https://api.figma.com"));
        assert!(summary.contains("timeout 45s"));
        assert!(summary.contains("model=gpt-4o"));
        assert!(summary.contains("max_tokens=4000"));
        assert!(summary.contains("temperature=0.10"));
        assert!(summary.contains("timeout 2m"));
        assert!(summary.contains("pretty=true"));
    }
}
