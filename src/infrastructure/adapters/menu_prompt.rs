//! 선택 다이얼로그 포트 구현 어댑터.
//! TTY에서는 방향키 선택 UI, 그 외에는 번호 입력 폴백을 사용한다.

use std::env;
use std::io::{self, IsTerminal, Write};

use anyhow::{Result, bail};
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};

use crate::application::ports::MenuPrompt;
use crate::domain::session::MenuOption;
use crate::infrastructure::render::{display_width, pad_display};

const TOOLBAR_HINT: &str = " Press [Up]/[Down] to select, [Enter] to accept. ";

/// crossterm 기반 선택 다이얼로그 어댑터.
pub struct TerminalMenuPrompt {
    interactive: bool,
}

impl TerminalMenuPrompt {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl MenuPrompt for TerminalMenuPrompt {
    fn choose(&self, message: &str, options: &[MenuOption]) -> Result<Option<MenuOption>> {
        if options.is_empty() {
            bail!("menu has no options");
        }

        if !self.interactive || !supports_interactive_dialog() {
            return choose_fallback(message, options);
        }

        match choose_interactive(message, options) {
            Ok(v) => Ok(v),
            Err(_) => choose_fallback(message, options),
        }
    }
}

fn supports_interactive_dialog() -> bool {
    if !io::stdout().is_terminal() {
        return false;
    }

    // dumb 터미널에서는 제어 시퀀스 기반 UI를 비활성화한다.
    if let Ok(term) = env::var("TERM")
        && term.eq_ignore_ascii_case("dumb")
    {
        return false;
    }

    true
}

fn choose_fallback(message: &str, options: &[MenuOption]) -> Result<Option<MenuOption>> {
    println!("{message}:");
    for (idx, option) in options.iter().enumerate() {
        println!("  {}) {}", idx + 1, option.label);
    }
    print!("select [1-{}] (empty to cancel): ", options.len());
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }

    Ok(parse_fallback_selection(&line, options.len()).map(|idx| options[idx].clone()))
}

/// 번호 입력을 0 기반 인덱스로 해석한다. 범위 밖/비숫자/빈 입력은 취소.
fn parse_fallback_selection(input: &str, option_count: usize) -> Option<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let number: usize = trimmed.parse().ok()?;
    if number == 0 || number > option_count {
        return None;
    }

    Some(number - 1)
}

fn choose_interactive(message: &str, options: &[MenuOption]) -> Result<Option<MenuOption>> {
    let mut stdout = io::stdout();
    let _guard = DialogGuard::enter(&mut stdout)?;

    let mut selected = 0usize;
    let total_rows = options.len() + 3;

    draw_dialog(&mut stdout, message, options, selected, false)?;

    loop {
        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Up => selected = selected.saturating_sub(1),
                    KeyCode::Down => selected = (selected + 1).min(options.len() - 1),
                    KeyCode::Enter => {
                        clear_dialog(&mut stdout, total_rows)?;
                        return Ok(Some(options[selected].clone()));
                    }
                    KeyCode::Esc => {
                        clear_dialog(&mut stdout, total_rows)?;
                        return Ok(None);
                    }
                    KeyCode::Char('c') | KeyCode::Char('d')
                        if key.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        clear_dialog(&mut stdout, total_rows)?;
                        return Ok(None);
                    }
                    _ => {}
                }
            }
            _ => {}
        }

        draw_dialog(&mut stdout, message, options, selected, true)?;
    }
}

/// 다이얼로그 전체를 무색 텍스트 줄로 구성한다.
/// [상단 테두리(메시지 포함), 항목들, 하단 테두리, 툴바] 순서.
fn dialog_lines(message: &str, options: &[MenuOption], selected: usize) -> Vec<String> {
    let content_width = options
        .iter()
        .map(|o| display_width(&o.label) + 2)
        .chain([display_width(message) + 1])
        .max()
        .unwrap_or(1);

    let mut lines = Vec::new();
    lines.push(format!(
        "┌─ {message} {}┐",
        "─".repeat(content_width - display_width(message) - 1)
    ));

    for (idx, option) in options.iter().enumerate() {
        let marker = if idx == selected { ">" } else { " " };
        lines.push(format!(
            "│ {} │",
            pad_display(&format!("{marker} {}", option.label), content_width)
        ));
    }

    lines.push(format!("└{}┘", "─".repeat(content_width + 2)));
    lines.push(TOOLBAR_HINT.to_string());
    lines
}

fn draw_dialog(
    stdout: &mut io::Stdout,
    message: &str,
    options: &[MenuOption],
    selected: usize,
    redraw: bool,
) -> Result<()> {
    let lines = dialog_lines(message, options, selected);

    if redraw {
        execute!(stdout, cursor::MoveUp(lines.len() as u16))?;
    }

    let last = lines.len() - 1;
    for (idx, line) in lines.iter().enumerate() {
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine)
        )?;

        if idx == 0 || idx == last - 1 {
            // 테두리
            execute!(stdout, SetForegroundColor(Color::Red), Print(line), ResetColor)?;
        } else if idx == last {
            // 하단 툴바
            execute!(
                stdout,
                SetBackgroundColor(Color::DarkGrey),
                SetForegroundColor(Color::White),
                Print(line),
                ResetColor
            )?;
        } else if idx == selected + 1 {
            execute!(
                stdout,
                SetAttribute(Attribute::Bold),
                Print(line),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            execute!(stdout, Print(line))?;
        }

        execute!(stdout, Print("\r\n"))?;
    }

    stdout.flush()?;
    Ok(())
}

fn clear_dialog(stdout: &mut io::Stdout, total_rows: usize) -> Result<()> {
    // 선택이 끝나면 다이얼로그 잔상을 남기지 않는다.
    execute!(
        stdout,
        cursor::MoveUp(total_rows as u16),
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::FromCursorDown)
    )?;
    stdout.flush()?;
    Ok(())
}

struct DialogGuard;

impl DialogGuard {
    fn enter(stdout: &mut io::Stdout) -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for DialogGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, ResetColor);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}
