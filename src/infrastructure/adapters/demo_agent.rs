//! 내장 데모 에이전트 어댑터.
//! 실제 모델 호출 대신 입력 분석 결과를 되돌려준다.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::Agent;
use crate::domain::policy;
use crate::domain::session::{AgentReply, UserQuery};

/// 처리 지연을 흉내 낸 뒤 입력 분석 리포트를 반환하는 에이전트.
pub struct EchoAgent {
    processing_delay: Duration,
}

impl EchoAgent {
    pub fn new(processing_delay_ms: u64) -> Self {
        Self {
            processing_delay: Duration::from_millis(processing_delay_ms),
        }
    }
}

#[async_trait]
impl Agent for EchoAgent {
    fn name(&self) -> &'static str {
        "dexter-echo"
    }

    async fn respond(&self, query: &UserQuery) -> Result<AgentReply> {
        tokio::time::sleep(self.processing_delay).await;

        let analysis = policy::analyze_input(&query.text);
        Ok(AgentReply {
            body: policy::build_echo_reply(&query.text, &analysis),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echo_agent_reports_analysis_of_the_query() {
        let agent = EchoAgent::new(0);
        let reply = agent
            .respond(&UserQuery::new("hello world 42"))
            .await
            .unwrap();

        assert!(reply.body.contains("You said: \"hello world 42\""));
        assert!(reply.body.contains("Word count: 3 words"));
        assert!(reply.body.contains("Contains numbers: Yes"));
    }
}
