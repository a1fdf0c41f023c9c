//! REPL 입력 처리기.
//! `/`로 시작하면 입력 중 실시간으로 명령 추천을 표시하고,
//! 일반 텍스트는 그대로 질문으로 넘긴다.

use std::env;
use std::io::{self, IsTerminal, Write};

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType};

use crate::domain::policy;
use crate::infrastructure::render::{char_display_width, clip_display, display_width, pad_display};

struct Suggestion {
    slash: &'static str,
    description: &'static str,
    usage: &'static str,
}

const SUGGESTIONS: [Suggestion; 6] = [
    Suggestion {
        slash: "/ask",
        description: "ask the assistant a question",
        usage: "/ask <question>",
    },
    Suggestion {
        slash: "/demo",
        description: "run the scripted demo session",
        usage: "/demo",
    },
    Suggestion {
        slash: "/menu",
        description: "open the selection dialog",
        usage: "/menu",
    },
    Suggestion {
        slash: "/history",
        description: "show this session's transcript",
        usage: "/history",
    },
    Suggestion {
        slash: "/config",
        description: "show effective merged config",
        usage: "/config [edit]",
    },
    Suggestion {
        slash: "/exit",
        description: "exit interactive shell",
        usage: "/exit",
    },
];

// 입력 영역 기본 높이: 상단 구분선 + 입력줄 + 하단 구분선
const PANEL_BASE_HEIGHT: usize = 3;
const PLACEHOLDER: &str = "Ask anything · / commands · ↑↓ select · Tab autocomplete";

/// REPL 한 줄 입력을 읽는다.
/// - TTY + 지원 터미널: 실시간 추천 + 방향키 선택
/// - non-TTY/미지원 터미널: 일반 라인 입력
pub fn read_repl_input(prefill: Option<&str>) -> Result<Option<String>> {
    let initial = prefill.unwrap_or("");

    if !supports_interactive_input() {
        return read_line_fallback(initial);
    }

    match read_line_interactive(initial) {
        Ok(v) => Ok(v),
        Err(_) => read_line_fallback(initial),
    }
}

fn supports_interactive_input() -> bool {
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

fn read_line_fallback(initial: &str) -> Result<Option<String>> {
    print!("dexter> {initial}");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }

    let typed = trim_newline(line);
    if initial.is_empty() || typed.starts_with('/') || typed.starts_with(initial) {
        return Ok(Some(typed));
    }

    Ok(Some(format!("{initial}{typed}")))
}

fn read_line_interactive(initial: &str) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    let _guard = InputGuard::enter(&mut stdout)?;

    let mut input = initial.to_string();
    let mut cursor_chars = input.chars().count();
    let mut selected_idx = 0usize;

    loop {
        let suggestions = match_suggestions(&input);
        if suggestions.is_empty() {
            selected_idx = 0;
        } else if selected_idx >= suggestions.len() {
            selected_idx = suggestions.len() - 1;
        }

        render_frame(&mut stdout, &input, cursor_chars, &suggestions, selected_idx)?;

        match event::read()? {
            Event::Paste(text) => {
                for ch in text.chars() {
                    insert_char_at(&mut input, cursor_chars, ch);
                    cursor_chars += 1;
                }
            }
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Enter => {
                        // 인자가 필요한 명령은 즉시 실행하지 않고 인자 입력 상태로 확장한다.
                        if let Some(expanded) = expand_input(&input, &suggestions, selected_idx) {
                            input = expanded;
                            cursor_chars = input.chars().count();
                            continue;
                        }
                        let final_input = finalize_input(&input, &suggestions, selected_idx);
                        clear_panel_for_output(&mut stdout)?;
                        return Ok(Some(final_input));
                    }
                    KeyCode::Backspace => {
                        if cursor_chars > 0 {
                            remove_char_at(&mut input, cursor_chars - 1);
                            cursor_chars -= 1;
                        }
                    }
                    KeyCode::Delete => {
                        if cursor_chars < input.chars().count() {
                            remove_char_at(&mut input, cursor_chars);
                        }
                    }
                    KeyCode::Left => {
                        cursor_chars = cursor_chars.saturating_sub(1);
                    }
                    KeyCode::Right => {
                        cursor_chars = (cursor_chars + 1).min(input.chars().count());
                    }
                    KeyCode::Home => {
                        cursor_chars = 0;
                    }
                    KeyCode::End => {
                        cursor_chars = input.chars().count();
                    }
                    KeyCode::Up => {
                        if !suggestions.is_empty() {
                            selected_idx = selected_idx.saturating_sub(1);
                        }
                    }
                    KeyCode::Down => {
                        if !suggestions.is_empty() {
                            selected_idx = (selected_idx + 1).min(suggestions.len() - 1);
                        }
                    }
                    KeyCode::Tab => {
                        if !suggestions.is_empty() && input.starts_with('/') && !input.contains(' ')
                        {
                            input = suggestions[selected_idx].slash.to_string();
                            cursor_chars = input.chars().count();
                        } else if let Some(completed) = complete_subcommand(&input) {
                            input = completed;
                            cursor_chars = input.chars().count();
                        }
                    }
                    KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        clear_panel_for_output(&mut stdout)?;
                        return Ok(None);
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        clear_panel_for_output(&mut stdout)?;
                        return Ok(Some("/exit".to_string()));
                    }
                    KeyCode::Char(ch) => {
                        if !key.modifiers.contains(KeyModifiers::CONTROL)
                            && !key.modifiers.contains(KeyModifiers::ALT)
                        {
                            insert_char_at(&mut input, cursor_chars, ch);
                            cursor_chars += 1;
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn match_suggestions(input: &str) -> Vec<&'static Suggestion> {
    if !input.starts_with('/') {
        return Vec::new();
    }

    if input.contains(' ') {
        return Vec::new();
    }

    let q = input.to_ascii_lowercase();
    SUGGESTIONS
        .iter()
        .filter(|s| s.slash.starts_with(&q) || q == "/")
        .collect()
}

fn finalize_input(input: &str, suggestions: &[&Suggestion], selected_idx: usize) -> String {
    if input.starts_with('/') && !input.contains(' ') && !suggestions.is_empty() {
        return suggestions[selected_idx].slash.to_string();
    }
    input.to_string()
}

/// 인자가 필요한 명령을 단독 입력 시 공백을 추가해 확장한다.
fn expand_input(input: &str, suggestions: &[&Suggestion], selected_idx: usize) -> Option<String> {
    if input.contains(' ') {
        return None;
    }

    const EXPANDABLE: &[&str] = &["/ask", "/config"];

    if EXPANDABLE.contains(&input) {
        return Some(format!("{input} "));
    }

    if input.starts_with('/')
        && !suggestions.is_empty()
        && EXPANDABLE.contains(&suggestions[selected_idx].slash)
    {
        return Some(format!("{} ", suggestions[selected_idx].slash));
    }

    None
}

/// 명령별 실시간 힌트를 통합 반환한다.
fn realtime_hint(input: &str) -> Option<(Color, String)> {
    ask_realtime_hint(input)
        .or_else(|| config_realtime_hint(input))
        .or_else(|| bare_command_hint(input))
        .or_else(|| free_text_hint(input))
}

/// `/ask` 실시간 힌트를 반환한다.
fn ask_realtime_hint(input: &str) -> Option<(Color, String)> {
    let trimmed = input.trim_start();
    let after = trimmed.strip_prefix("/ask")?;

    if !after.is_empty() && !after.starts_with(' ') {
        return None;
    }

    if after.trim().is_empty() {
        return Some((Color::Yellow, "hint: /ask <question>".to_string()));
    }

    Some((Color::Green, "ready: press Enter to ask".to_string()))
}

/// `/config` 서브커맨드 실시간 힌트를 반환한다.
fn config_realtime_hint(input: &str) -> Option<(Color, String)> {
    let trimmed = input.trim_start();
    let after = trimmed.strip_prefix("/config")?;

    if !after.is_empty() && !after.starts_with(' ') {
        return None;
    }

    let rest = after.trim();
    if rest.is_empty() {
        return Some((Color::Yellow, "hint: /config [edit]".to_string()));
    }

    if rest == "edit" {
        return Some((Color::Green, "ready: press Enter to open $EDITOR".to_string()));
    }

    if "edit".starts_with(rest) {
        return Some((Color::Yellow, "hint: /config [edit]".to_string()));
    }

    Some((Color::Red, format!("error: unknown subcommand `{rest}`")))
}

/// 인자를 받지 않는 명령에 인자가 붙으면 경고한다.
fn bare_command_hint(input: &str) -> Option<(Color, String)> {
    const BARE: &[&str] = &["/demo", "/menu", "/history", "/exit", "/quit"];

    let trimmed = input.trim_start();
    for cmd in BARE {
        if let Some(after) = trimmed.strip_prefix(cmd) {
            if after.trim().is_empty() {
                return None;
            }
            if after.starts_with(' ') {
                return Some((Color::Red, format!("error: {cmd} takes no arguments")));
            }
        }
    }

    None
}

/// 슬래시 없는 일반 텍스트는 그대로 질문이 된다.
fn free_text_hint(input: &str) -> Option<(Color, String)> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with('/') {
        return None;
    }

    if policy::is_exit_word(trimmed) {
        return Some((Color::Yellow, "ready: press Enter to end the session".to_string()));
    }

    Some((Color::Green, "ready: press Enter to ask Dexter".to_string()))
}

/// 서브커맨드 탭 완성을 시도한다.
fn complete_subcommand(input: &str) -> Option<String> {
    let trimmed = input.trim_start();
    let after = trimmed.strip_prefix("/config")?;

    if !after.starts_with(' ') {
        return None;
    }

    let rest = after.trim();
    let subs = ["edit"];
    let matches: Vec<&str> = subs
        .iter()
        .copied()
        .filter(|s| s.starts_with(rest))
        .collect();
    if matches.len() == 1 && rest != matches[0] {
        return Some(format!("/config {}", matches[0]));
    }

    None
}

fn render_frame(
    stdout: &mut io::Stdout,
    input: &str,
    cursor_chars: usize,
    suggestions: &[&Suggestion],
    selected_idx: usize,
) -> Result<()> {
    let (w, h) = terminal::size().unwrap_or((120, 40));
    // 패널 배경의 우측 끊김을 막기 위해 터미널 전체 폭을 사용한다.
    let width = (w as usize).max(20);
    let total_rows = h as usize;

    // 힌트/추천 유무에 따라 패널 높이를 동적으로 결정한다.
    let hint_rows = usize::from(realtime_hint(input).is_some());
    let suggestion_rows = suggestions.len();
    let panel_height = PANEL_BASE_HEIGHT + hint_rows + suggestion_rows;
    let panel_top = total_rows.saturating_sub(panel_height);

    let input_header_row = panel_top;
    let input_row = panel_top + 1;
    let panel_divider_row = panel_top + 2;
    // 하단 구분선 아래부터 힌트·추천을 배치한다.
    let extra_start = panel_divider_row + 1;

    // 이전 프레임 잔상을 지우기 위해 가능한 최대 영역을 클리어한다.
    let max_panel_height = PANEL_BASE_HEIGHT + 1 + SUGGESTIONS.len();
    let clear_top = total_rows.saturating_sub(max_panel_height);
    for row in clear_top..total_rows {
        execute!(
            stdout,
            cursor::MoveTo(0, row as u16),
            terminal::Clear(ClearType::CurrentLine)
        )?;
    }

    // 입력 영역(구분선 + 입력줄 + 구분선)에만 배경색을 적용한다.
    let divider = "─".repeat(width);
    draw_panel_line_at(stdout, input_header_row as u16, &divider, width, Color::White)?;

    if input.is_empty() {
        draw_panel_line_at(
            stdout,
            input_row as u16,
            &render_prompt_line(PLACEHOLDER, width),
            width,
            Color::Grey,
        )?;
    } else {
        draw_panel_line_at(
            stdout,
            input_row as u16,
            &render_prompt_line(input, width),
            width,
            Color::White,
        )?;
    }

    draw_panel_line_at(stdout, panel_divider_row as u16, &divider, width, Color::White)?;

    // 하단 구분선 아래: 배경 없이 힌트와 추천을 표시한다.
    let mut next_row = extra_start;

    if let Some((color, line)) = realtime_hint(input) {
        draw_line_at(stdout, next_row as u16, &clip_display(&line, width), width, color)?;
        next_row += 1;
    }

    for (idx, item) in suggestions.iter().enumerate() {
        let marker = if idx == selected_idx { ">" } else { " " };
        draw_line_at(
            stdout,
            next_row as u16,
            &clip_display(
                &format!(
                    "{marker} {:<10} - {} | usage: {}",
                    item.slash, item.description, item.usage
                ),
                width,
            ),
            width,
            Color::White,
        )?;
        next_row += 1;
    }

    let prompt_cursor_col = prompt_cursor_col(input, cursor_chars, width) as u16;
    execute!(
        stdout,
        cursor::MoveTo(prompt_cursor_col, input_row as u16),
        cursor::Show
    )?;
    stdout.flush()?;
    Ok(())
}

fn render_prompt_line(input: &str, width: usize) -> String {
    let prefix = "> ";
    let available = width.saturating_sub(display_width(prefix));
    let shown = tail_with_ellipsis(input, available);
    clip_display(&format!("{prefix}{shown}"), width)
}

fn prompt_cursor_col(input: &str, cursor_chars: usize, width: usize) -> usize {
    let prefix_width = display_width("> ");
    let available = width.saturating_sub(prefix_width);
    let before_cursor: String = input.chars().take(cursor_chars).collect();

    if display_width(input) <= available {
        return (prefix_width + display_width(&before_cursor)).min(width.saturating_sub(1));
    }

    // 오버플로우 상태에서는 현재 tail 표시 정책상 커서를 입력 끝쪽으로 정렬한다.
    (prefix_width + display_width(&tail_with_ellipsis(input, available)))
        .min(width.saturating_sub(1))
}

/// 긴 입력은 뒤쪽을 남기고 앞을 말줄임 처리한다.
fn tail_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    if display_width(text) <= max_width {
        return text.to_string();
    }

    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let target = max_width - 3;
    let mut tail_rev = String::new();
    let mut used = 0usize;

    for ch in text.chars().rev() {
        let cw = char_display_width(ch);
        if used + cw > target {
            break;
        }
        tail_rev.push(ch);
        used += cw;
    }

    let tail: String = tail_rev.chars().rev().collect();
    format!("...{tail}")
}

fn trim_newline(mut s: String) -> String {
    while matches!(s.chars().last(), Some('\n' | '\r')) {
        s.pop();
    }
    s
}

// 배경색이 있는 패널 라인 (입력 영역용).
fn draw_panel_line_at(
    stdout: &mut io::Stdout,
    row: u16,
    text: &str,
    width: usize,
    fg: Color,
) -> Result<()> {
    execute!(
        stdout,
        cursor::MoveTo(0, row),
        SetBackgroundColor(Color::DarkGrey),
        SetForegroundColor(fg),
        terminal::Clear(ClearType::CurrentLine)
    )?;
    write!(stdout, "{}", pad_display(&clip_display(text, width), width))?;
    execute!(stdout, ResetColor)?;
    Ok(())
}

// 배경색 없는 일반 라인 (힌트/추천 영역용).
fn draw_line_at(
    stdout: &mut io::Stdout,
    row: u16,
    text: &str,
    width: usize,
    fg: Color,
) -> Result<()> {
    execute!(
        stdout,
        cursor::MoveTo(0, row),
        terminal::Clear(ClearType::CurrentLine),
        SetForegroundColor(fg)
    )?;
    write!(stdout, "{}", pad_display(&clip_display(text, width), width))?;
    execute!(stdout, ResetColor)?;
    Ok(())
}

fn clear_panel_for_output(stdout: &mut io::Stdout) -> Result<()> {
    // 명령 실행 출력은 항상 상단에서 시작하도록 화면을 정리한다.
    execute!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(ClearType::All),
        ResetColor,
        cursor::Show
    )?;
    stdout.flush()?;
    Ok(())
}

struct InputGuard;

impl InputGuard {
    fn enter(stdout: &mut io::Stdout) -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout, cursor::Show)?;
        Ok(Self)
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, ResetColor);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

fn insert_char_at(input: &mut String, char_idx: usize, ch: char) {
    let byte_idx = byte_index_at_char(input, char_idx);
    input.insert(byte_idx, ch);
}

fn remove_char_at(input: &mut String, char_idx: usize) {
    let start = byte_index_at_char(input, char_idx);
    let end = byte_index_at_char(input, char_idx + 1);
    if start < end && end <= input.len() {
        input.replace_range(start..end, "");
    }
}

fn byte_index_at_char(input: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    input
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_filter_by_prefix() {
        let all = match_suggestions("/");
        assert_eq!(all.len(), SUGGESTIONS.len());

        let ask = match_suggestions("/a");
        assert_eq!(ask.len(), 1);
        assert_eq!(ask[0].slash, "/ask");

        assert!(match_suggestions("hello").is_empty());
        assert!(match_suggestions("/ask something").is_empty());
    }

    #[test]
    fn enter_expands_commands_that_need_arguments() {
        let suggestions = match_suggestions("/ask");
        assert_eq!(
            expand_input("/ask", &suggestions, 0),
            Some("/ask ".to_string())
        );

        let suggestions = match_suggestions("/demo");
        assert_eq!(expand_input("/demo", &suggestions, 0), None);
    }

    #[test]
    fn finalize_snaps_partial_input_to_selection() {
        let suggestions = match_suggestions("/hi");
        assert_eq!(finalize_input("/hi", &suggestions, 0), "/history");

        // 공백이 있으면 입력 그대로 확정
        assert_eq!(finalize_input("/ask hello", &[], 0), "/ask hello");
    }

    #[test]
    fn hints_follow_input_state() {
        assert_eq!(
            ask_realtime_hint("/ask").map(|(_, h)| h),
            Some("hint: /ask <question>".to_string())
        );
        assert_eq!(
            config_realtime_hint("/config edit").map(|(_, h)| h),
            Some("ready: press Enter to open $EDITOR".to_string())
        );
        assert!(
            config_realtime_hint("/config nope")
                .map(|(_, h)| h)
                .unwrap()
                .contains("unknown subcommand")
        );
        assert_eq!(
            bare_command_hint("/menu extra").map(|(_, h)| h),
            Some("error: /menu takes no arguments".to_string())
        );
        assert_eq!(
            free_text_hint("quit").map(|(_, h)| h),
            Some("ready: press Enter to end the session".to_string())
        );
        assert!(free_text_hint("/ask").is_none());
    }

    #[test]
    fn tab_completes_config_subcommand() {
        assert_eq!(
            complete_subcommand("/config e"),
            Some("/config edit".to_string())
        );
        assert_eq!(complete_subcommand("/config edit"), None);
        assert_eq!(complete_subcommand("/demo"), None);
    }

    #[test]
    fn tail_ellipsis_keeps_the_end_of_long_input() {
        assert_eq!(tail_with_ellipsis("abcdefgh", 6), "...fgh");
        assert_eq!(tail_with_ellipsis("short", 10), "short");
    }

    #[test]
    fn char_editing_is_utf8_safe() {
        let mut input = "한glish".to_string();
        insert_char_at(&mut input, 1, '국');
        assert_eq!(input, "한국glish");

        remove_char_at(&mut input, 0);
        assert_eq!(input, "국glish");
    }
}
