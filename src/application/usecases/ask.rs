//! 질문 한 건을 끝까지 처리하는 유스케이스.

use anyhow::Result;

use crate::application::ports::{Agent, ProgressReporter, Ui};
use crate::domain::policy;
use crate::domain::session::UserQuery;

/// 질문 출력 → 에이전트 실행(스피너) → 응답 박스 출력 흐름을 조율한다.
pub struct AskUseCase<'a> {
    pub agent: &'a dyn Agent,
    pub ui: &'a dyn Ui,
    pub progress: &'a dyn ProgressReporter,
}

impl<'a> AskUseCase<'a> {
    pub async fn execute(&self, raw_query: &str) -> Result<()> {
        let query = UserQuery::new(raw_query.trim());
        if query.text.is_empty() {
            self.ui.warning("No input received or input was empty");
            return Ok(());
        }

        self.ui.user_query(&query.text);

        let spinner = self.progress.start("Processing your input...");
        match self.agent.respond(&query).await {
            Ok(reply) => {
                spinner.finish_success("Processing complete!");

                let analysis = policy::analyze_input(&query.text);
                self.ui.tool_run(
                    &format!("analyze_input(\"{}\")", query.text),
                    &format!(
                        "chars={}, words={}, digits={}, special={}",
                        analysis.chars, analysis.words, analysis.has_digits, analysis.has_special
                    ),
                );
                self.ui.answer(&reply.body);
                Ok(())
            }
            Err(err) => {
                spinner.finish_failure(&format!("Failed: {err}"));
                Err(err)
            }
        }
    }
}
