//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::Config;
use crate::domain::session::{AgentReply, MenuOption, UserQuery};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
    fn editable_config_path(&self) -> Result<PathBuf>;
}

/// 콘솔 출력 추상화 포트.
/// 출력한 모든 줄은 세션 트랜스크립트로 보관된다.
pub trait Ui: Send + Sync {
    fn header(&self, text: &str);
    fn user_query(&self, text: &str);
    fn task_list(&self, tasks: &[String]);
    fn task_start(&self, desc: &str);
    fn task_done(&self, desc: &str);
    fn tool_run(&self, params: &str, result: &str);
    fn answer(&self, body: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn transcript(&self) -> Vec<String>;
}

/// 진행 표시(스피너) 시작 포트.
pub trait ProgressReporter: Send + Sync {
    fn start(&self, message: &str) -> Box<dyn ProgressHandle + '_>;
}

/// 실행 중인 진행 표시 핸들.
/// 성공/실패 종료 시 스피너 줄을 지우고 결과 줄을 남긴다.
pub trait ProgressHandle: Send {
    fn update(&mut self, message: &str);
    fn finish_success(self: Box<Self>, message: &str);
    fn finish_failure(self: Box<Self>, message: &str);
}

/// 자유 입력 한 줄을 읽는 포트. EOF면 `None`.
pub trait LinePrompt: Send + Sync {
    fn read_line(&self, prompt: &str) -> Result<Option<String>>;
}

/// 선택 다이얼로그 포트. 사용자가 취소하면 `None`.
pub trait MenuPrompt: Send + Sync {
    fn choose(&self, message: &str, options: &[MenuOption]) -> Result<Option<MenuOption>>;
}

/// 질문에 응답하는 에이전트 포트.
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &'static str;
    async fn respond(&self, query: &UserQuery) -> Result<AgentReply>;
}
