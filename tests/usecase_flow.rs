//! 유스케이스 오케스트레이션 통합 테스트.
//! 터미널 어댑터 대신 인메모리 포트 구현으로 전체 흐름을 검증한다.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use dexter::application::config::Config;
use dexter::application::ports::{
    Agent, ConfigRepository, LinePrompt, MenuPrompt, ProgressHandle, ProgressReporter, Ui,
};
use dexter::application::usecases::ask::AskUseCase;
use dexter::application::usecases::demo::DemoUseCase;
use dexter::application::usecases::menu::MenuUseCase;
use dexter::domain::session::{AgentReply, MenuOption, UserQuery};

fn zero_delay_config() -> Config {
    serde_json::from_str(
        r#"{"defaults": {"startup_delay_ms": 0, "processing_delay_ms": 0}}"#,
    )
    .unwrap()
}

struct InMemoryConfigRepo {
    config: Config,
}

impl ConfigRepository for InMemoryConfigRepo {
    fn load(&self) -> Result<Config> {
        Ok(self.config.clone())
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }

    fn editable_config_path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from(".dexter/config.json"))
    }
}

#[derive(Default)]
struct RecordingUi {
    lines: Mutex<Vec<String>>,
}

impl RecordingUi {
    fn push(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }

    fn joined(&self) -> String {
        self.lines.lock().unwrap().join("\n")
    }
}

impl Ui for RecordingUi {
    fn header(&self, text: &str) {
        self.push(format!("[header] {text}"));
    }

    fn user_query(&self, text: &str) {
        self.push(format!("[query] {text}"));
    }

    fn task_list(&self, tasks: &[String]) {
        self.push(format!("[tasks] {}", tasks.join(" | ")));
    }

    fn task_start(&self, desc: &str) {
        self.push(format!("[start] {desc}"));
    }

    fn task_done(&self, desc: &str) {
        self.push(format!("[done] {desc}"));
    }

    fn tool_run(&self, params: &str, result: &str) {
        self.push(format!("[tool] {params} -> {result}"));
    }

    fn answer(&self, body: &str) {
        self.push(format!("[answer] {body}"));
    }

    fn info(&self, message: &str) {
        self.push(format!("[info] {message}"));
    }

    fn warning(&self, message: &str) {
        self.push(format!("[warn] {message}"));
    }

    fn error(&self, message: &str) {
        self.push(format!("[error] {message}"));
    }

    fn transcript(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[derive(Default)]
struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

struct RecordingHandle<'a> {
    events: &'a Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingProgress {
    fn start(&self, message: &str) -> Box<dyn ProgressHandle + '_> {
        self.events.lock().unwrap().push(format!("start: {message}"));
        Box::new(RecordingHandle {
            events: &self.events,
        })
    }
}

impl ProgressHandle for RecordingHandle<'_> {
    fn update(&mut self, message: &str) {
        self.events.lock().unwrap().push(format!("update: {message}"));
    }

    fn finish_success(self: Box<Self>, message: &str) {
        self.events.lock().unwrap().push(format!("ok: {message}"));
    }

    fn finish_failure(self: Box<Self>, message: &str) {
        self.events.lock().unwrap().push(format!("fail: {message}"));
    }
}

struct ScriptedPrompt {
    line: Option<String>,
}

impl LinePrompt for ScriptedPrompt {
    fn read_line(&self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.line.clone())
    }
}

struct PickFirst {
    cancel: bool,
}

impl MenuPrompt for PickFirst {
    fn choose(&self, _message: &str, options: &[MenuOption]) -> Result<Option<MenuOption>> {
        if self.cancel {
            Ok(None)
        } else {
            Ok(Some(options[0].clone()))
        }
    }
}

struct InstantEchoAgent;

#[async_trait]
impl Agent for InstantEchoAgent {
    fn name(&self) -> &'static str {
        "instant-echo"
    }

    async fn respond(&self, query: &UserQuery) -> Result<AgentReply> {
        Ok(AgentReply {
            body: format!("You said: \"{}\"", query.text),
        })
    }
}

struct FailingAgent;

#[async_trait]
impl Agent for FailingAgent {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn respond(&self, _query: &UserQuery) -> Result<AgentReply> {
        anyhow::bail!("model unavailable")
    }
}

#[tokio::test]
async fn ask_flow_runs_spinner_and_prints_answer() {
    let ui = RecordingUi::default();
    let progress = RecordingProgress::default();
    let agent = InstantEchoAgent;

    let usecase = AskUseCase {
        agent: &agent,
        ui: &ui,
        progress: &progress,
    };
    usecase.execute("hello world").await.unwrap();

    let output = ui.joined();
    assert!(output.contains("[query] hello world"));
    assert!(output.contains("[tool] analyze_input(\"hello world\")"));
    assert!(output.contains("[answer] You said: \"hello world\""));

    let events = progress.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "start: Processing your input...".to_string(),
            "ok: Processing complete!".to_string(),
        ]
    );
}

#[tokio::test]
async fn ask_flow_reports_failure_through_spinner() {
    let ui = RecordingUi::default();
    let progress = RecordingProgress::default();
    let agent = FailingAgent;

    let usecase = AskUseCase {
        agent: &agent,
        ui: &ui,
        progress: &progress,
    };
    let err = usecase.execute("anything").await.unwrap_err();
    assert!(err.to_string().contains("model unavailable"));

    let events = progress.events.lock().unwrap().clone();
    assert_eq!(events.last().unwrap(), "fail: Failed: model unavailable");
}

#[tokio::test]
async fn ask_flow_warns_on_empty_input_without_spinner() {
    let ui = RecordingUi::default();
    let progress = RecordingProgress::default();
    let agent = InstantEchoAgent;

    let usecase = AskUseCase {
        agent: &agent,
        ui: &ui,
        progress: &progress,
    };
    usecase.execute("   ").await.unwrap();

    assert!(ui.joined().contains("[warn] No input received"));
    assert!(progress.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn demo_flow_walks_all_tasks_and_echoes_input() {
    let config_repo = InMemoryConfigRepo {
        config: zero_delay_config(),
    };
    let ui = RecordingUi::default();
    let progress = RecordingProgress::default();
    let agent = InstantEchoAgent;
    let line_prompt = ScriptedPrompt {
        line: Some("stocks 101".to_string()),
    };

    let usecase = DemoUseCase {
        config_repo: &config_repo,
        agent: &agent,
        ui: &ui,
        progress: &progress,
        line_prompt: &line_prompt,
    };
    usecase.execute().await.unwrap();

    let output = ui.joined();
    assert!(output.contains("[header] Dexter - Simple Interactive Demo"));
    assert!(output.contains("[tasks] Initialize system | Collect user input"));
    assert!(output.contains("[done] Initialize system"));
    assert!(output.contains("[answer] You said: \"stocks 101\""));
    assert!(output.contains("[info] Goodbye from Dexter!"));

    let events = progress.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "start: Initializing system...".to_string(),
            "update: Warming up the agent...".to_string(),
            "ok: System ready!".to_string(),
        ]
    );
}

#[tokio::test]
async fn demo_flow_handles_interrupted_input() {
    let config_repo = InMemoryConfigRepo {
        config: zero_delay_config(),
    };
    let ui = RecordingUi::default();
    let progress = RecordingProgress::default();
    let agent = InstantEchoAgent;
    let line_prompt = ScriptedPrompt { line: None };

    let usecase = DemoUseCase {
        config_repo: &config_repo,
        agent: &agent,
        ui: &ui,
        progress: &progress,
        line_prompt: &line_prompt,
    };
    usecase.execute().await.unwrap();

    let output = ui.joined();
    assert!(output.contains("[warn] Input interrupted by user"));
    assert!(!output.contains("[answer]"));
}

#[tokio::test]
async fn menu_flow_processes_the_chosen_option() {
    let config_repo = InMemoryConfigRepo {
        config: zero_delay_config(),
    };
    let ui = RecordingUi::default();
    let progress = RecordingProgress::default();
    let menu_prompt = PickFirst { cancel: false };

    let usecase = MenuUseCase {
        config_repo: &config_repo,
        ui: &ui,
        progress: &progress,
        menu_prompt: &menu_prompt,
    };
    usecase.execute().await.unwrap();

    let output = ui.joined();
    // 기본 메뉴의 첫 항목은 pizza
    assert!(output.contains("[info] You have chosen: pizza"));
    assert!(output.contains("[info] Processed: pizza"));

    let events = progress.events.lock().unwrap().clone();
    assert_eq!(events.last().unwrap(), "ok: Processing complete!");
}

#[tokio::test]
async fn menu_flow_warns_when_cancelled() {
    let config_repo = InMemoryConfigRepo {
        config: zero_delay_config(),
    };
    let ui = RecordingUi::default();
    let progress = RecordingProgress::default();
    let menu_prompt = PickFirst { cancel: true };

    let usecase = MenuUseCase {
        config_repo: &config_repo,
        ui: &ui,
        progress: &progress,
        menu_prompt: &menu_prompt,
    };
    usecase.execute().await.unwrap();

    assert!(ui.joined().contains("[warn] Selection cancelled"));
    assert!(progress.events.lock().unwrap().is_empty());
}
