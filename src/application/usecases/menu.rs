//! 선택 다이얼로그 데모 유스케이스.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{ConfigRepository, MenuPrompt, ProgressReporter, Ui};

/// 메뉴 선택 → 처리 대기(스피너) → 결과 출력 흐름을 조율한다.
pub struct MenuUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub ui: &'a dyn Ui,
    pub progress: &'a dyn ProgressReporter,
    pub menu_prompt: &'a dyn MenuPrompt,
}

impl<'a> MenuUseCase<'a> {
    pub async fn execute(&self) -> Result<()> {
        let config = self.config_repo.load()?;
        let options = config.menu_options();

        let Some(chosen) = self.menu_prompt.choose(&config.menu_message(), &options)? else {
            self.ui.warning("Selection cancelled");
            return Ok(());
        };

        self.ui.info(&format!("You have chosen: {}", chosen.value));

        let spinner = self.progress.start("Processing your input...");
        tokio::time::sleep(Duration::from_millis(config.processing_delay_ms())).await;
        spinner.finish_success("Processing complete!");

        self.ui.info(&format!("Processed: {}", chosen.value));
        Ok(())
    }
}
