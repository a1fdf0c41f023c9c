//! 스크립트된 대화 데모 유스케이스.
//! 인사 → 초기화 대기 → 입력 수집 → 분석 응답 순서로 진행한다.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{
    Agent, ConfigRepository, LinePrompt, ProgressReporter, Ui,
};
use crate::domain::policy;
use crate::domain::session::UserQuery;

const INPUT_PROMPT: &str = "Please tell me something: ";

/// 전체 데모 흐름을 조율한다.
pub struct DemoUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub agent: &'a dyn Agent,
    pub ui: &'a dyn Ui,
    pub progress: &'a dyn ProgressReporter,
    pub line_prompt: &'a dyn LinePrompt,
}

impl<'a> DemoUseCase<'a> {
    pub async fn execute(&self) -> Result<()> {
        let config = self.config_repo.load()?;

        self.ui.header("Dexter - Simple Interactive Demo");
        self.ui
            .user_query("Hello! I'm Dexter, a simple interactive assistant.");

        self.ui.task_list(&[
            "Initialize system".to_string(),
            "Collect user input".to_string(),
            "Analyze and echo input".to_string(),
        ]);

        self.ui.task_start("Initialize system");
        let startup = config.startup_delay_ms();
        let mut spinner = self.progress.start("Initializing system...");
        tokio::time::sleep(Duration::from_millis(startup / 2)).await;
        spinner.update("Warming up the agent...");
        tokio::time::sleep(Duration::from_millis(startup - startup / 2)).await;
        spinner.finish_success("System ready!");
        self.ui.task_done("Initialize system");

        self.ui.task_start("Collect user input");
        self.ui.info("I'm ready to listen to you!");
        let input = self.line_prompt.read_line(INPUT_PROMPT)?;
        self.ui.task_done("Collect user input");

        let Some(input) = input else {
            self.ui.warning("Input interrupted by user");
            self.ui.info("Goodbye from Dexter!");
            return Ok(());
        };

        self.ui.task_start("Analyze and echo input");
        if input.trim().is_empty() {
            self.ui.warning("No input received or input was empty");
        } else {
            let query = UserQuery::new(input.trim());
            let reply = self.agent.respond(&query).await?;

            let analysis = policy::analyze_input(&query.text);
            self.ui.tool_run(
                &format!("analyze_input(\"{}\")", query.text),
                &format!(
                    "chars={}, words={}, digits={}, special={}",
                    analysis.chars, analysis.words, analysis.has_digits, analysis.has_special
                ),
            );
            self.ui.answer(&reply.body);
        }
        self.ui.task_done("Analyze and echo input");

        self.ui.info("Demo session complete. Thank you!");
        self.ui.info("Goodbye from Dexter!");
        Ok(())
    }
}
