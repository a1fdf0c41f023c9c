//! 도메인 정책(입력 분석 규칙, 응답 본문 구성, 종료어 판정).

use crate::domain::session::InputAnalysis;

/// 입력 텍스트를 분석한다.
/// - 단어 수는 공백 분리 기준
/// - 특수문자는 영숫자/공백이 아닌 모든 문자
pub fn analyze_input(text: &str) -> InputAnalysis {
    InputAnalysis {
        chars: text.chars().count(),
        words: text.split_whitespace().count(),
        has_digits: text.chars().any(|c| c.is_ascii_digit()),
        has_special: text
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
    }
}

/// 입력을 되돌려주는 응답 본문을 구성한다.
pub fn build_echo_reply(query: &str, analysis: &InputAnalysis) -> String {
    let yes_no = |flag: bool| if flag { "Yes" } else { "No" };

    format!(
        "You said: \"{query}\"\n\
         \n\
         Thank you for sharing that with me! I received your message successfully.\n\
         \n\
         Input analysis:\n\
         - Length: {} characters\n\
         - Word count: {} words\n\
         - Contains numbers: {}\n\
         - Contains special chars: {}",
        analysis.chars,
        analysis.words,
        yes_no(analysis.has_digits),
        yes_no(analysis.has_special),
    )
}

/// 세션을 끝내는 일반 단어인지 판정한다(슬래시 명령과 별개).
pub fn is_exit_word(input: &str) -> bool {
    matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "exit" | "quit"
    )
}
