//! 진행 표시(스피너) 포트 구현 어댑터.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::{ProgressHandle, ProgressReporter};

// 점자 패턴 프레임. 마지막 빈 프레임은 indicatif의 종료 프레임 자리.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""];

/// indicatif 기반 콘솔 스피너.
/// plain 모드에서는 애니메이션 없이 시작/종료 줄만 출력한다.
pub struct ConsoleProgress {
    animated: bool,
    interval: Duration,
}

impl ConsoleProgress {
    pub fn new(animated: bool, interval_ms: u64) -> Self {
        Self {
            animated,
            interval: Duration::from_millis(interval_ms),
        }
    }
}

impl ProgressReporter for ConsoleProgress {
    fn start(&self, message: &str) -> Box<dyn ProgressHandle + '_> {
        if !self.animated {
            println!("{message}");
            return Box::new(PlainHandle);
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(FRAMES);
        pb.set_style(style);
        pb.enable_steady_tick(self.interval);
        pb.set_message(message.to_string());

        Box::new(SpinnerHandle { pb })
    }
}

struct SpinnerHandle {
    pb: ProgressBar,
}

impl ProgressHandle for SpinnerHandle {
    fn update(&mut self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn finish_success(self: Box<Self>, message: &str) {
        self.pb.finish_and_clear();
        println!("{} {message}", "✓".green());
    }

    fn finish_failure(self: Box<Self>, message: &str) {
        self.pb.finish_and_clear();
        println!("{} {message}", "✗".red());
    }
}

struct PlainHandle;

impl ProgressHandle for PlainHandle {
    fn update(&mut self, message: &str) {
        println!("{message}");
    }

    fn finish_success(self: Box<Self>, message: &str) {
        println!("✓ {message}");
    }

    fn finish_failure(self: Box<Self>, message: &str) {
        println!("✗ {message}");
    }
}
