//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod console_ui;
mod demo_agent;
mod line_prompt;
mod menu_prompt;
mod spinner;

pub use config_repository::JsonConfigRepository;
pub use console_ui::ConsoleUi;
pub use demo_agent::EchoAgent;
pub use line_prompt::StdinPrompt;
pub use menu_prompt::TerminalMenuPrompt;
pub use spinner::ConsoleProgress;
