//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use crate::application::config::DefaultsConfig;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub defaults: DefaultsConfig,
    pub effective_defaults: EffectiveDefaults,
    pub ui: UiInspection,
    pub menu: MenuInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveDefaults {
    pub answer_width: usize,
    pub startup_delay_ms: u64,
    pub processing_delay_ms: u64,
    pub result_preview_chars: usize,
    pub intro_tagline: String,
    pub show_intro: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UiInspection {
    /// 강제 설정값(미지정 시 TTY 자동 감지)
    pub color: Option<bool>,
    pub spinner_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuInspection {
    pub message: String,
    pub option_count: usize,
    pub option_values: Vec<String>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let config = &loaded.config;
        let options = config.menu_options();

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            defaults: config.defaults.clone(),
            effective_defaults: EffectiveDefaults {
                answer_width: config.answer_width(),
                startup_delay_ms: config.startup_delay_ms(),
                processing_delay_ms: config.processing_delay_ms(),
                result_preview_chars: config.result_preview_chars(),
                intro_tagline: config.intro_tagline(),
                show_intro: config.show_intro(),
            },
            ui: UiInspection {
                color: config.ui.color,
                spinner_interval_ms: config.spinner_interval_ms(),
            },
            menu: MenuInspection {
                message: config.menu_message(),
                option_count: options.len(),
                option_values: options.into_iter().map(|o| o.value).collect(),
            },
        }
    }
}
