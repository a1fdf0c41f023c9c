//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;

use crate::application::config::{
    Config, DEFAULT_ANSWER_WIDTH, DEFAULT_INTRO_TAGLINE, DEFAULT_MENU_MESSAGE,
    DEFAULT_PROCESSING_DELAY_MS, DEFAULT_RESULT_PREVIEW_CHARS, DEFAULT_SPINNER_INTERVAL_MS,
    DEFAULT_STARTUP_DELAY_MS,
};

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: Config,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한다.
pub(crate) fn load_merged_config() -> Result<LoadedConfig> {
    let paths = config_paths();

    if let Ok(path) = env::var("DEXTER_CONFIG")
        && !Path::new(&path).exists()
    {
        bootstrap_template(Path::new(&path))?;
    }

    let (mut merged, mut loaded_paths) = merge_config_files(&paths)?;

    if loaded_paths.is_empty() {
        // 최초 실행 경험을 위해 로컬 기본 설정 템플릿을 자동 생성한다.
        let bootstrap_target = default_bootstrap_config_path();
        bootstrap_template(&bootstrap_target)?;

        let raw = fs::read_to_string(&bootstrap_target).with_context(|| {
            format!(
                "failed to read bootstrapped config at {}",
                bootstrap_target.display()
            )
        })?;
        let parsed: Config = serde_json::from_str(&raw).with_context(|| {
            format!(
                "failed to parse bootstrapped JSON in {}",
                bootstrap_target.display()
            )
        })?;
        merged.merge_from(parsed);
        loaded_paths.push(bootstrap_target);
    }

    debug!(loaded = loaded_paths.len(), "config files merged");

    Ok(LoadedConfig {
        config: merged,
        searched_paths: paths,
        loaded_paths,
    })
}

/// 주어진 경로 목록을 순서대로 병합한다(없는 파일은 건너뜀).
fn merge_config_files(paths: &[PathBuf]) -> Result<(Config, Vec<PathBuf>)> {
    // 낮은 우선순위에서 높은 우선순위 순서로 병합한다.
    let mut merged = Config::default();
    let mut loaded_paths = Vec::new();

    for path in paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        merged.merge_from(parsed);
        loaded_paths.push(path.to_path_buf());
    }

    Ok((merged, loaded_paths))
}

/// 기본 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    // 낮은 우선순위 -> 높은 우선순위 순서로 병합됨.
    let mut paths = vec![PathBuf::from("/etc/dexter/config.json")];

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("dexter").join("config.json"));
    }

    paths.push(PathBuf::from(".dexter/config.json"));

    if let Ok(path) = env::var("DEXTER_CONFIG") {
        paths.push(Path::new(&path).to_path_buf());
    }

    dedup_paths(paths)
}

/// 편집 대상 설정 파일 경로를 결정한다.
/// 로딩된 파일 중 최고 우선순위 경로를 반환하고,
/// 로딩된 파일이 없으면 `.dexter/config.json`을 생성한다.
pub(crate) fn editable_config_path() -> Result<PathBuf> {
    let loaded = load_merged_config();

    if let Ok(lc) = loaded
        && let Some(last) = lc.loaded_paths.last()
    {
        return Ok(last.clone());
    }

    let fallback = PathBuf::from(".dexter/config.json");
    if let Some(parent) = fallback.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(&fallback, "{}\n")
        .with_context(|| format!("failed to create default config at {}", fallback.display()))?;
    Ok(fallback)
}

fn default_bootstrap_config_path() -> PathBuf {
    if let Ok(path) = env::var("DEXTER_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from(".dexter/config.json")
}

fn bootstrap_template(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let template = json!({
        "defaults": {
            "answer_width": DEFAULT_ANSWER_WIDTH,
            "startup_delay_ms": DEFAULT_STARTUP_DELAY_MS,
            "processing_delay_ms": DEFAULT_PROCESSING_DELAY_MS,
            "result_preview_chars": DEFAULT_RESULT_PREVIEW_CHARS,
            "intro_tagline": DEFAULT_INTRO_TAGLINE,
            "show_intro": true
        },
        "ui": {
            "spinner_interval_ms": DEFAULT_SPINNER_INTERVAL_MS
        },
        "menu": {
            "message": DEFAULT_MENU_MESSAGE,
            "options": [
                { "value": "pizza", "label": "Pizza with mushrooms" },
                { "value": "salad", "label": "Salad with tomatoes" },
                { "value": "sushi", "label": "Sushi" }
            ]
        }
    });

    let rendered = serde_json::to_string_pretty(&template)?;
    fs::write(config_path, format!("{rendered}\n"))
        .with_context(|| format!("failed to create config template at {}", config_path.display()))
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn merge_skips_missing_files_and_applies_last_wins() {
        let dir = TempDir::new().unwrap();
        let low = dir.path().join("low.json");
        let high = dir.path().join("high.json");
        let missing = dir.path().join("missing.json");

        fs::write(
            &low,
            r#"{"defaults": {"answer_width": 60, "startup_delay_ms": 10}}"#,
        )
        .unwrap();
        fs::write(&high, r#"{"defaults": {"answer_width": 100}}"#).unwrap();

        let (config, loaded) =
            merge_config_files(&[low.clone(), missing, high.clone()]).unwrap();

        assert_eq!(loaded, vec![low, high]);
        assert_eq!(config.answer_width(), 100);
        assert_eq!(config.startup_delay_ms(), 10);
    }

    #[test]
    fn merge_fails_on_invalid_json() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();

        let err = merge_config_files(&[broken]).unwrap_err();
        assert!(err.to_string().contains("failed to parse JSON"));
    }

    #[test]
    fn bootstrap_template_is_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        bootstrap_template(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let config: Config = serde_json::from_str(&raw).unwrap();
        assert_eq!(config.answer_width(), DEFAULT_ANSWER_WIDTH);
        assert_eq!(config.menu_options().len(), 3);
    }

    #[test]
    fn bootstrap_template_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"defaults": {"answer_width": 42}}"#).unwrap();

        bootstrap_template(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let config: Config = serde_json::from_str(&raw).unwrap();
        assert_eq!(config.answer_width(), 42);
    }
}
