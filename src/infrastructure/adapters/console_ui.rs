//! 콘솔 UI 포트 구현 어댑터.
//! 출력한 모든 줄의 무색 버전을 세션 트랜스크립트로 보관한다.

use std::sync::Mutex;

use colored::Colorize;

use crate::application::ports::Ui;
use crate::infrastructure::render;

const TASK_LIST_RULE_WIDTH: usize = 50;

/// colored 기반 콘솔 UI 어댑터.
pub struct ConsoleUi {
    answer_width: usize,
    preview_chars: usize,
    transcript: Mutex<Vec<String>>,
}

impl ConsoleUi {
    pub fn new(answer_width: usize, preview_chars: usize) -> Self {
        Self {
            answer_width,
            preview_chars,
            transcript: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, plain: &str) {
        if let Ok(mut transcript) = self.transcript.lock() {
            transcript.push(plain.to_string());
        }
    }

    fn emit(&self, plain: String, colored_line: String) {
        println!("{colored_line}");
        self.record(&plain);
    }
}

impl Ui for ConsoleUi {
    fn header(&self, text: &str) {
        println!();
        self.emit(
            format!("╭─ {text}"),
            format!("{}", format!("╭─ {text}").blue().bold()),
        );
    }

    fn user_query(&self, text: &str) {
        println!();
        self.emit(
            format!("You: {text}"),
            format!("{}", format!("You: {text}").bright_blue().bold()),
        );
        println!();
    }

    fn task_list(&self, tasks: &[String]) {
        if tasks.is_empty() {
            return;
        }

        self.header("Planned Tasks");
        for task in tasks {
            self.emit(
                format!("│ + {task}"),
                format!("{} {} {task}", "│".blue(), "+".dimmed()),
            );
        }
        let rule = format!("╰{}", "─".repeat(TASK_LIST_RULE_WIDTH));
        self.emit(rule.clone(), format!("{}", rule.blue()));
        println!();
    }

    fn task_start(&self, desc: &str) {
        println!();
        self.emit(
            format!("▶ Task: {desc}"),
            format!("{} {desc}", "▶ Task:".cyan().bold()),
        );
    }

    fn task_done(&self, desc: &str) {
        self.emit(
            format!("  ✓ Completed │ {desc}"),
            format!(
                "  {} {}",
                "✓ Completed".green(),
                format!("│ {desc}").dimmed()
            ),
        );
    }

    fn tool_run(&self, params: &str, result: &str) {
        self.emit(
            format!("  →  Parameters: {params}"),
            format!("  {}  Parameters: {}", "→".magenta(), params.dimmed()),
        );

        let shown = render::preview(result, self.preview_chars);
        self.emit(
            format!("  ⚡ Result: ({shown})"),
            format!("  {} Result: {}", "⚡".yellow(), format!("({shown})").dimmed()),
        );
    }

    fn answer(&self, body: &str) {
        let width = self.answer_width.max(20);
        let inner = width - 4;

        let mut rows: Vec<String> = Vec::new();
        rows.push(String::new());
        for line in body.lines() {
            if line.is_empty() {
                rows.push(String::new());
            } else {
                rows.extend(render::wrap_words(line, inner));
            }
        }
        rows.push(String::new());

        let title = "ANSWER";
        let padding = (width - 2 - title.len()) / 2;
        let title_row = format!(
            "{}{title}{}",
            " ".repeat(padding),
            " ".repeat(width - 2 - title.len() - padding)
        );

        println!();
        self.emit(
            format!("╔{}╗", "═".repeat(width - 2)),
            format!("{}", format!("╔{}╗", "═".repeat(width - 2)).blue().bold()),
        );
        self.emit(
            format!("║{title_row}║"),
            format!("{}", format!("║{title_row}║").blue().bold()),
        );
        self.emit(
            format!("╠{}╣", "═".repeat(width - 2)),
            format!("{}", format!("╠{}╣", "═".repeat(width - 2)).blue()),
        );
        for row in rows {
            let padded = render::pad_display(&row, inner);
            self.emit(
                format!("║ {padded} ║"),
                format!("{} {padded} {}", "║".blue(), "║".blue()),
            );
        }
        self.emit(
            format!("╚{}╝", "═".repeat(width - 2)),
            format!("{}", format!("╚{}╝", "═".repeat(width - 2)).blue().bold()),
        );
        println!();
    }

    fn info(&self, message: &str) {
        self.emit(message.to_string(), format!("{}", message.dimmed()));
    }

    fn warning(&self, message: &str) {
        self.emit(
            format!("⚠ Warning: {message}"),
            format!("{} {message}", "⚠ Warning:".yellow()),
        );
    }

    fn error(&self, message: &str) {
        self.emit(
            format!("✗ Error: {message}"),
            format!("{} {message}", "✗ Error:".red()),
        );
    }

    fn transcript(&self) -> Vec<String> {
        self.transcript
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}
