//! 시작 화면(배너/소개 문구) 출력 모듈.

use colored::Colorize;

use crate::infrastructure::render::display_width;

const WELCOME_BOX_WIDTH: usize = 80;
const WELCOME_TEXT: &str = "Welcome to Dexter";

const BANNER: &str = r#"
██████╗ ███████╗██╗  ██╗████████╗███████╗██████╗
██╔══██╗██╔════╝╚██╗██╔╝╚══██╔══╝██╔════╝██╔══██╗
██║  ██║█████╗   ╚███╔╝    ██║   █████╗  ██████╔╝
██║  ██║██╔══╝   ██╔██╗    ██║   ██╔══╝  ██╔══██╗
██████╔╝███████╗██╔╝ ██╗   ██║   ███████╗██║  ██║
╚═════╝ ╚══════╝╚═╝  ╚═╝   ╚═╝   ╚══════╝╚═╝  ╚═╝
"#;

/// 인트로 화면을 출력한다: 환영 박스 + 배너 + 소개 문구 + 사용 안내.
pub fn print_intro(tagline: &str) {
    println!("\n");

    for line in welcome_box_lines(WELCOME_TEXT, WELCOME_BOX_WIDTH) {
        println!("{}", line.bright_blue());
    }
    println!();

    for line in BANNER.lines().skip(1) {
        println!("{}", line.bright_blue());
    }

    println!();
    println!("{tagline}");
    println!("Ask me any questions. Type 'exit' or 'quit' to end.");
    println!();
}

/// 가운데 정렬된 환영 문구를 담은 박스 줄들을 만든다.
fn welcome_box_lines(text: &str, width: usize) -> Vec<String> {
    let text_width = display_width(text);
    let padding = width.saturating_sub(text_width + 2) / 2;
    let remainder = width.saturating_sub(text_width + padding + 2);

    vec![
        "═".repeat(width),
        format!("║{}{text}{}║", " ".repeat(padding), " ".repeat(remainder)),
        "═".repeat(width),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_box_centers_text_at_full_width() {
        let lines = welcome_box_lines("hello", 20);
        assert_eq!(lines.len(), 3);
        assert_eq!(display_width(&lines[0]), 20);
        assert_eq!(display_width(&lines[1]), 20);
        assert!(lines[1].starts_with('║') && lines[1].ends_with('║'));
        assert!(lines[1].contains("hello"));
    }

    #[test]
    fn banner_is_non_empty_block_art() {
        let rows: Vec<&str> = BANNER.lines().skip(1).filter(|l| !l.is_empty()).collect();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|r| r.contains('█') || r.contains('╚')));
    }
}
