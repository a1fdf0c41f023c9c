//! 대화 세션 도메인 엔티티/값 객체.

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub query: Option<String>,
    pub plain: bool,
}

/// 사용자가 입력한 질문 한 건.
#[derive(Debug, Clone)]
pub struct UserQuery {
    pub text: String,
}

impl UserQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// 에이전트가 돌려준 응답 본문.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub body: String,
}

/// 입력 텍스트 분석 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAnalysis {
    pub chars: usize,
    pub words: usize,
    pub has_digits: bool,
    pub has_special: bool,
}

/// 선택 다이얼로그의 항목 하나(값 + 표시 라벨).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub value: String,
    pub label: String,
}

impl MenuOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}
