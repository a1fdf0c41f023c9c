//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/터미널 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

use crate::domain::session::MenuOption;

pub const DEFAULT_ANSWER_WIDTH: usize = 80;
pub const DEFAULT_STARTUP_DELAY_MS: u64 = 3_000;
pub const DEFAULT_PROCESSING_DELAY_MS: u64 = 5_000;
pub const DEFAULT_RESULT_PREVIEW_CHARS: usize = 150;
pub const DEFAULT_SPINNER_INTERVAL_MS: u64 = 80;
pub const DEFAULT_INTRO_TAGLINE: &str = "Your AI assistant for financial analysis.";
pub const DEFAULT_MENU_MESSAGE: &str = "Please select a dish";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// 콘솔 출력 스타일 설정
    #[serde(default)]
    pub ui: UiConfig,
    /// 선택 다이얼로그 설정
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 응답 박스 폭(컬럼)
    pub answer_width: Option<usize>,
    /// 세션 시작 대기 시간(ms)
    pub startup_delay_ms: Option<u64>,
    /// 에이전트 처리 대기 시간(ms)
    pub processing_delay_ms: Option<u64>,
    /// 도구 실행 결과 미리보기 길이(문자)
    pub result_preview_chars: Option<usize>,
    /// 인트로 화면 하단 소개 문구
    pub intro_tagline: Option<String>,
    /// 인트로 화면 표시 여부(기본 true)
    pub show_intro: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct UiConfig {
    /// 색상 강제 on/off (미지정 시 TTY 자동 감지)
    pub color: Option<bool>,
    /// 스피너 프레임 간격(ms)
    pub spinner_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MenuConfig {
    /// 다이얼로그 상단 메시지
    pub message: Option<String>,
    /// 선택 항목 목록(미지정 시 기본 데모 메뉴)
    pub options: Option<Vec<MenuEntry>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MenuEntry {
    pub value: String,
    pub label: String,
}

impl Config {
    pub fn answer_width(&self) -> usize {
        self.defaults.answer_width.unwrap_or(DEFAULT_ANSWER_WIDTH)
    }

    pub fn startup_delay_ms(&self) -> u64 {
        self.defaults
            .startup_delay_ms
            .unwrap_or(DEFAULT_STARTUP_DELAY_MS)
    }

    pub fn processing_delay_ms(&self) -> u64 {
        self.defaults
            .processing_delay_ms
            .unwrap_or(DEFAULT_PROCESSING_DELAY_MS)
    }

    pub fn result_preview_chars(&self) -> usize {
        self.defaults
            .result_preview_chars
            .unwrap_or(DEFAULT_RESULT_PREVIEW_CHARS)
    }

    pub fn intro_tagline(&self) -> String {
        self.defaults
            .intro_tagline
            .clone()
            .unwrap_or_else(|| DEFAULT_INTRO_TAGLINE.to_string())
    }

    pub fn show_intro(&self) -> bool {
        self.defaults.show_intro.unwrap_or(true)
    }

    pub fn spinner_interval_ms(&self) -> u64 {
        self.ui
            .spinner_interval_ms
            .unwrap_or(DEFAULT_SPINNER_INTERVAL_MS)
    }

    pub fn menu_message(&self) -> String {
        self.menu
            .message
            .clone()
            .unwrap_or_else(|| DEFAULT_MENU_MESSAGE.to_string())
    }

    /// 설정된 메뉴 항목을 도메인 값 객체로 변환한다.
    /// 항목이 비어 있으면 기본 데모 메뉴를 돌려준다.
    pub fn menu_options(&self) -> Vec<MenuOption> {
        let configured: Vec<MenuOption> = self
            .menu
            .options
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|entry| MenuOption::new(&entry.value, &entry.label))
            .collect();

        if configured.is_empty() {
            default_menu_options()
        } else {
            configured
        }
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);
        self.ui.merge_from(other.ui);
        self.menu.merge_from(other.menu);
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.answer_width.is_some() {
            self.answer_width = other.answer_width;
        }
        if other.startup_delay_ms.is_some() {
            self.startup_delay_ms = other.startup_delay_ms;
        }
        if other.processing_delay_ms.is_some() {
            self.processing_delay_ms = other.processing_delay_ms;
        }
        if other.result_preview_chars.is_some() {
            self.result_preview_chars = other.result_preview_chars;
        }
        if other.intro_tagline.is_some() {
            self.intro_tagline = other.intro_tagline;
        }
        if other.show_intro.is_some() {
            self.show_intro = other.show_intro;
        }
    }
}

impl UiConfig {
    pub fn merge_from(&mut self, other: UiConfig) {
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.spinner_interval_ms.is_some() {
            self.spinner_interval_ms = other.spinner_interval_ms;
        }
    }
}

impl MenuConfig {
    pub fn merge_from(&mut self, other: MenuConfig) {
        if other.message.is_some() {
            self.message = other.message;
        }
        // 메뉴 항목은 필드 단위가 아니라 목록 전체를 교체한다.
        if other.options.is_some() {
            self.options = other.options;
        }
    }
}

/// 원본 데모와 동일한 기본 메뉴.
pub fn default_menu_options() -> Vec<MenuOption> {
    vec![
        MenuOption::new("pizza", "Pizza with mushrooms"),
        MenuOption::new("salad", "Salad with tomatoes"),
        MenuOption::new("sushi", "Sushi"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_missing() {
        let config = Config::default();
        assert_eq!(config.answer_width(), DEFAULT_ANSWER_WIDTH);
        assert_eq!(config.startup_delay_ms(), DEFAULT_STARTUP_DELAY_MS);
        assert_eq!(config.processing_delay_ms(), DEFAULT_PROCESSING_DELAY_MS);
        assert_eq!(config.result_preview_chars(), DEFAULT_RESULT_PREVIEW_CHARS);
        assert!(config.show_intro());
        assert_eq!(config.menu_options().len(), 3);
    }

    #[test]
    fn merge_is_last_wins_per_field() {
        let mut base: Config = serde_json::from_str(
            r#"{"defaults": {"answer_width": 60, "startup_delay_ms": 100}}"#,
        )
        .unwrap();
        let overlay: Config =
            serde_json::from_str(r#"{"defaults": {"startup_delay_ms": 0}}"#).unwrap();

        base.merge_from(overlay);

        // 겹치지 않은 필드는 유지, 겹친 필드는 후순위 값
        assert_eq!(base.answer_width(), 60);
        assert_eq!(base.startup_delay_ms(), 0);
    }

    #[test]
    fn merge_replaces_menu_options_wholesale() {
        let mut base: Config = serde_json::from_str(
            r#"{"menu": {"options": [
                {"value": "a", "label": "A"},
                {"value": "b", "label": "B"}
            ]}}"#,
        )
        .unwrap();
        let overlay: Config = serde_json::from_str(
            r#"{"menu": {"options": [{"value": "c", "label": "C"}]}}"#,
        )
        .unwrap();

        base.merge_from(overlay);

        let options = base.menu_options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "c");
    }

    #[test]
    fn empty_menu_options_fall_back_to_default_menu() {
        let config: Config = serde_json::from_str(r#"{"menu": {"options": []}}"#).unwrap();
        let options = config.menu_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "pizza");
    }
}
