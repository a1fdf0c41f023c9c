//! 애플리케이션 조립(composition root) 모듈.

use std::io::{self, IsTerminal};

use crate::application::config::Config;
use crate::application::ports::{Agent, ConfigRepository, Ui};
use crate::application::usecases::ask::AskUseCase;
use crate::application::usecases::demo::DemoUseCase;
use crate::application::usecases::edit_config::EditConfigUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::menu::MenuUseCase;
use crate::infrastructure::adapters::{
    ConsoleProgress, ConsoleUi, EchoAgent, JsonConfigRepository, StdinPrompt, TerminalMenuPrompt,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config: Config,
    config_repo: JsonConfigRepository,
    ui: ConsoleUi,
    progress: ConsoleProgress,
    line_prompt: StdinPrompt,
    menu_prompt: TerminalMenuPrompt,
    agent: EchoAgent,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self::new(false)
    }
}

impl AppComposition {
    /// plain 모드 여부를 받아 실행 조합을 생성한다.
    /// 설정 로딩에 실패하면 기본값으로 동작한다(조립은 실패하지 않는다).
    pub fn new(plain: bool) -> Self {
        let config_repo = JsonConfigRepository;
        let config = config_repo.load().unwrap_or_else(|err| {
            tracing::warn!("config load failed, using defaults: {err:#}");
            Config::default()
        });

        // 색상 우선순위: --plain > ui.color 강제값 > colored의 TTY 자동 감지
        if plain {
            colored::control::set_override(false);
        } else if let Some(forced) = config.ui.color {
            colored::control::set_override(forced);
        }

        let animated = !plain && io::stdout().is_terminal();

        Self {
            ui: ConsoleUi::new(config.answer_width(), config.result_preview_chars()),
            progress: ConsoleProgress::new(animated, config.spinner_interval_ms()),
            line_prompt: StdinPrompt,
            menu_prompt: TerminalMenuPrompt::new(animated),
            agent: EchoAgent::new(config.processing_delay_ms()),
            config,
            config_repo,
        }
    }

    /// 조립 시점에 로딩한 설정 스냅샷.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ui(&self) -> &dyn Ui {
        &self.ui
    }

    pub fn agent_name(&self) -> &'static str {
        self.agent.name()
    }

    /// 질문 처리 유스케이스를 생성한다.
    pub fn ask_usecase(&self) -> AskUseCase<'_> {
        AskUseCase {
            agent: &self.agent,
            ui: &self.ui,
            progress: &self.progress,
        }
    }

    /// 데모 세션 유스케이스를 생성한다.
    pub fn demo_usecase(&self) -> DemoUseCase<'_> {
        DemoUseCase {
            config_repo: &self.config_repo,
            agent: &self.agent,
            ui: &self.ui,
            progress: &self.progress,
            line_prompt: &self.line_prompt,
        }
    }

    /// 메뉴 선택 유스케이스를 생성한다.
    pub fn menu_usecase(&self) -> MenuUseCase<'_> {
        MenuUseCase {
            config_repo: &self.config_repo,
            ui: &self.ui,
            progress: &self.progress,
            menu_prompt: &self.menu_prompt,
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 설정 편집 유스케이스를 생성한다.
    pub fn edit_config_usecase(&self) -> EditConfigUseCase<'_> {
        EditConfigUseCase {
            config_repo: &self.config_repo,
        }
    }
}
