//! Local Summary skill: keyword-heuristic document summary, no network.

use nyaya_core::{summarize_document, AgentSkill, Language, SessionContext};

const SKILL_NAME: &str = "LocalSummary";

/// Summarizes pasted document text with the core heuristic. Registered so
/// clients can call the offline path by name even when the router is
/// configured for the remote service.
#[derive(Default)]
pub struct LocalSummary;

impl LocalSummary {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl AgentSkill for LocalSummary {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(
        &self,
        ctx: &SessionContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let payload = payload.unwrap_or(serde_json::Value::Null);
        let document_text = payload
            .get("document_text")
            .and_then(|v| v.as_str())
            .ok_or("LocalSummary requires payload: { document_text: string }")?
            .to_string();
        let document_type = payload
            .get("document_type")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("legal-document");
        let lang_tag = payload
            .get("lang")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ctx.resolved_lang());
        let lang = Language::from_tag(lang_tag);

        let result = summarize_document(&document_text, lang_tag);

        Ok(serde_json::json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "lang": lang.code(),
            "data": {
                "documentType": document_type,
                "summary": result.summary,
                "keyPoints": result.key_points
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SessionContext {
        SessionContext {
            session_id: "test".into(),
            correlation_id: None,
            lang: None,
        }
    }

    #[tokio::test]
    async fn summarizes_a_sale_deed() {
        let result = LocalSummary::new()
            .execute(
                &ctx(),
                Some(serde_json::json!({
                    "document_text": "SALE DEED executed for the land in village Rampur"
                })),
            )
            .await
            .unwrap();

        assert_eq!(result["status"], "ok");
        let summary = result["data"]["summary"].as_str().unwrap();
        assert!(summary.starts_with("This document appears to be a sale deed"));
        assert!(result["data"]["keyPoints"].as_array().unwrap().len() >= 3);
        assert_eq!(result["data"]["documentType"], "legal-document");
    }

    #[tokio::test]
    async fn missing_text_is_an_error() {
        let err = LocalSummary::new()
            .execute(&ctx(), Some(serde_json::json!({ "lang": "en" })))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("document_text"));
    }
}
