//! `dexter` 대화형 쉘(REPL) 인터페이스.

use std::io::{self, Write};
use std::process::Command;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;

use crate::domain::policy;
use crate::infrastructure::render::{clip_display, pad_display};
use crate::interface::cli::composition::AppComposition;
use crate::interface::cli::repl_input::read_repl_input;

/// 대화형 입력으로 질문과 `/command`를 처리한다.
pub async fn run_repl(composition: &AppComposition) -> Result<()> {
    print_welcome(composition);
    io::stdout().flush()?;
    let mut next_prefill: Option<String> = None;

    loop {
        let prefill = next_prefill.take();
        let Some(raw_input) = read_repl_input(prefill.as_deref())? else {
            println!();
            break;
        };
        let input = raw_input.trim();
        if input.is_empty() {
            continue;
        }

        match parse_repl_command(input) {
            Ok(ReplCommand::Exit) => break,
            Ok(ReplCommand::AskNeedsArgs) => {
                // 질문이 빠진 `/ask`는 별도 프롬프트를 띄우지 않고 입력창에 재프리필한다.
                next_prefill = Some("/ask ".to_string());
            }
            Ok(cmd) => {
                if let Err(err) = execute_command(composition, cmd).await {
                    eprintln!("error: {err:#}");
                }
            }
            Err(msg) => {
                eprintln!("error: {msg}");
                eprintln!("hint: start typing / for command suggestions");
            }
        }
    }

    Ok(())
}

#[derive(Debug)]
enum ReplCommand {
    Exit,
    InspectConfig,
    EditConfig,
    /// `/ask`만 입력된 상태. 다음 입력 라운드에 `/ask `를 프리필한다.
    AskNeedsArgs,
    Ask(String),
    Demo,
    Menu,
    History,
}

async fn execute_command(composition: &AppComposition, command: ReplCommand) -> Result<()> {
    match command {
        ReplCommand::Exit | ReplCommand::AskNeedsArgs => Ok(()),
        ReplCommand::InspectConfig => {
            let json = composition.inspect_config_usecase().execute()?;
            println!("{json}");
            Ok(())
        }
        ReplCommand::EditConfig => {
            let path = composition.edit_config_usecase().execute()?;
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

            // 에디터가 정상 동작하도록 raw mode를 해제한다.
            let _ = crossterm::terminal::disable_raw_mode();
            let status = Command::new(&editor)
                .arg(&path)
                .status()
                .with_context(|| format!("failed to launch editor: {editor}"))?;

            if status.success() {
                println!("config saved: {}", path.display());
            } else {
                eprintln!("editor exited with: {status}");
            }
            Ok(())
        }
        ReplCommand::Ask(question) => composition.ask_usecase().execute(&question).await,
        ReplCommand::Demo => composition.demo_usecase().execute().await,
        ReplCommand::Menu => composition.menu_usecase().execute().await,
        ReplCommand::History => {
            let transcript = composition.ui().transcript();
            if transcript.is_empty() {
                println!("no session history yet");
                return Ok(());
            }

            println!("--- session history ({} lines) ---", transcript.len());
            for line in transcript {
                println!("{line}");
            }
            println!("--- end of history ---");
            Ok(())
        }
    }
}

fn parse_repl_command(input: &str) -> Result<ReplCommand, String> {
    if !input.starts_with('/') {
        // 일반 텍스트는 질문으로 처리하고, exit/quit 단어는 세션을 끝낸다.
        if policy::is_exit_word(input) {
            return Ok(ReplCommand::Exit);
        }
        return Ok(ReplCommand::Ask(input.to_string()));
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.is_empty() {
        return Err("empty command".to_string());
    }

    match parts[0] {
        "/exit" | "/quit" => Ok(ReplCommand::Exit),
        "/config" => {
            if parts.len() == 1 {
                return Ok(ReplCommand::InspectConfig);
            }
            if parts.len() == 2 && parts[1] == "edit" {
                return Ok(ReplCommand::EditConfig);
            }
            Err("usage: /config [edit]".to_string())
        }
        "/ask" => {
            let question = input.strip_prefix("/ask").unwrap_or_default().trim();
            if question.is_empty() {
                Ok(ReplCommand::AskNeedsArgs)
            } else {
                Ok(ReplCommand::Ask(question.to_string()))
            }
        }
        "/demo" => {
            if parts.len() == 1 {
                Ok(ReplCommand::Demo)
            } else {
                Err("usage: /demo".to_string())
            }
        }
        "/menu" => {
            if parts.len() == 1 {
                Ok(ReplCommand::Menu)
            } else {
                Err("usage: /menu".to_string())
            }
        }
        "/history" => {
            if parts.len() == 1 {
                Ok(ReplCommand::History)
            } else {
                Err("usage: /history".to_string())
            }
        }
        other => Err(format!("unknown command: {other}")),
    }
}

fn print_welcome(composition: &AppComposition) {
    // 인트로 배너가 바로 위에 있으므로 화면은 지우지 않는다.
    println!("+------------------------------------------------------------+");
    println!("| {} |", fit_cell("Dexter interactive shell", 58).cyan().bold());
    println!("| {} |", fit_cell("your terminal assistant", 58).dimmed());
    println!("+------------------------------------------------------------+");
    println!("| Status Dashboard                                            |");
    for line in build_startup_dashboard_lines(composition) {
        println!("| {} |", fit_cell(&line, 58));
    }
    println!("+------------------------------------------------------------+");
    println!("| Quick start                                                 |");
    println!("|  0) {} |", fit_cell("type a question and press Enter", 54));
    println!("|  1) {} |", fit_cell("/ask <question>", 54).green());
    println!("|  2) {} |", fit_cell("/demo · /menu · /history", 54).magenta());
    println!("|  3) {} |", fit_cell("/config [edit]", 54).yellow());
    println!("|  4) {} |", fit_cell("/exit", 54).red());
    println!("+------------------------------------------------------------+");
    println!();
}

/// 셀 폭에 맞춰 자르고 패딩한다. 색은 패딩 이후에 입혀 폭 계산이 깨지지 않게 한다.
fn fit_cell(text: &str, width: usize) -> String {
    pad_display(&clip_display(text, width), width)
}

fn build_startup_dashboard_lines(composition: &AppComposition) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Agent: {}", composition.agent_name()));

    let inspection_json = match composition.inspect_config_usecase().execute() {
        Ok(raw) => raw,
        Err(err) => {
            lines.push("Config: error".to_string());
            lines.push(format!("detail: {err}"));
            lines.push("hint: run `/config` to inspect and fix".to_string());
            return lines;
        }
    };

    let value: Value = match serde_json::from_str(&inspection_json) {
        Ok(v) => v,
        Err(_) => {
            lines.push("Config: loaded (dashboard parse fallback)".to_string());
            lines.push("hint: run `/config` to inspect details".to_string());
            return lines;
        }
    };

    let loaded_count = value
        .get("loaded_paths")
        .and_then(|v| v.as_array())
        .map(|arr| arr.len())
        .unwrap_or(0);
    lines.push(format!("Config: ok (loaded files: {loaded_count})"));

    let answer_width = value
        .pointer("/effective_defaults/answer_width")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let processing_ms = value
        .pointer("/effective_defaults/processing_delay_ms")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    lines.push(format!(
        "Answer width: {answer_width} · processing delay: {processing_ms}ms"
    ));

    match value.pointer("/menu/option_values").and_then(|v| v.as_array()) {
        Some(values) if !values.is_empty() => {
            let joined = values
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("Menu: {} options ({joined})", values.len()));
        }
        _ => lines.push("Menu: not configured".to_string()),
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_becomes_a_question() {
        assert!(matches!(
            parse_repl_command("what is AAPL doing"),
            Ok(ReplCommand::Ask(q)) if q == "what is AAPL doing"
        ));
    }

    #[test]
    fn bare_exit_words_end_the_session() {
        assert!(matches!(parse_repl_command("exit"), Ok(ReplCommand::Exit)));
        assert!(matches!(parse_repl_command("quit"), Ok(ReplCommand::Exit)));
        assert!(matches!(parse_repl_command("/quit"), Ok(ReplCommand::Exit)));
    }

    #[test]
    fn ask_without_arguments_requests_prefill() {
        assert!(matches!(
            parse_repl_command("/ask"),
            Ok(ReplCommand::AskNeedsArgs)
        ));
        assert!(matches!(
            parse_repl_command("/ask  hello there"),
            Ok(ReplCommand::Ask(q)) if q == "hello there"
        ));
    }

    #[test]
    fn config_subcommands_are_validated() {
        assert!(matches!(
            parse_repl_command("/config"),
            Ok(ReplCommand::InspectConfig)
        ));
        assert!(matches!(
            parse_repl_command("/config edit"),
            Ok(ReplCommand::EditConfig)
        ));
        assert!(parse_repl_command("/config nope").is_err());
    }

    #[test]
    fn no_arg_commands_reject_extra_arguments() {
        assert!(matches!(parse_repl_command("/menu"), Ok(ReplCommand::Menu)));
        assert!(parse_repl_command("/menu pizza").is_err());
        assert!(matches!(parse_repl_command("/demo"), Ok(ReplCommand::Demo)));
        assert!(parse_repl_command("/demo now").is_err());
        assert!(matches!(
            parse_repl_command("/history"),
            Ok(ReplCommand::History)
        ));
    }

    #[test]
    fn unknown_slash_command_is_an_error() {
        let err = parse_repl_command("/reset").unwrap_err();
        assert!(err.contains("unknown command"));
    }
}
