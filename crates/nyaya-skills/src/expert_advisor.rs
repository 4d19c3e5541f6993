//! Expert Advisor skill: answers legal questions from the topic knowledge base.

use nyaya_core::{AgentSkill, KnowledgeBase, Language, SessionContext};
use std::sync::Arc;

const SKILL_NAME: &str = "ExpertAdvisor";

/// Answers a free-text question with the first matching topic, or the
/// language's fallback topic when nothing matches. Never fails on content:
/// the only error is a missing query in the payload.
pub struct ExpertAdvisor {
    knowledge: Arc<KnowledgeBase>,
}

impl ExpertAdvisor {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }
}

#[async_trait::async_trait]
impl AgentSkill for ExpertAdvisor {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(
        &self,
        ctx: &SessionContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let payload = payload.unwrap_or(serde_json::Value::Null);
        let query = payload
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or("ExpertAdvisor requires payload: { query: string }")?
            .to_string();
        let lang_tag = payload
            .get("lang")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ctx.resolved_lang());
        let lang = Language::from_tag(lang_tag);

        let matched = self.knowledge.match_topic(&query, lang);
        let (topic, hit) = match matched {
            Some(topic) => (topic, true),
            None => (&self.knowledge.pack(lang).fallback, false),
        };

        tracing::info!(
            target: "nyaya::expert",
            lang = lang.code(),
            topic = %topic.id,
            matched = hit,
            "Expert query answered"
        );

        Ok(serde_json::json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "lang": lang.code(),
            "matched": hit,
            "topic": {
                "id": topic.id,
                "title": topic.title,
                "content": topic.content,
                "follow_up": topic.follow_up
            }
        }))
    }
}
