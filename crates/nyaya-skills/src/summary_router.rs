//! Summary Router skill: routes document analysis to the local heuristic or
//! a remote analysis service.

use nyaya_core::{summarize_document, AgentSkill, Language, SessionContext};
use serde::{Deserialize, Serialize};
use std::fmt;

const SKILL_NAME: &str = "SummaryRouter";
const ENV_SUMMARY_MODE: &str = "NYAYA_SUMMARY_MODE";
const ENV_SUMMARY_API_URL: &str = "NYAYA_SUMMARY_API_URL";
const ENV_SUMMARY_API_KEY: &str = "NYAYA_SUMMARY_API_KEY";

/// Mode for document analysis: local heuristic or remote service when configured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SummaryMode {
    #[default]
    Local,
    Remote,
}

impl SummaryMode {
    fn from_env() -> Self {
        match std::env::var(ENV_SUMMARY_MODE).as_deref() {
            Ok("remote") => SummaryMode::Remote,
            _ => SummaryMode::Local,
        }
    }

    /// Resolves a config value; anything other than "remote" means local.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "remote" => SummaryMode::Remote,
            _ => SummaryMode::Local,
        }
    }
}

#[derive(Debug)]
struct RemoteSummaryError(String);

impl fmt::Display for RemoteSummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "remote summary service failed: {}", self.0)
    }
}

impl std::error::Error for RemoteSummaryError {}

/// Request body for the remote analysis service.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoteSummaryRequest<'a> {
    document_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    document_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_base64: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_mime_type: Option<&'a str>,
}

/// Success envelope from the remote service.
#[derive(Deserialize)]
struct RemoteSummaryEnvelope {
    data: RemoteSummaryData,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RemoteSummaryData {
    document_type: Option<String>,
    summary: Option<String>,
    urgency: Option<String>,
    key_points: Option<Vec<String>>,
    recommendations: Option<Vec<String>>,
    next_steps: Option<Vec<String>>,
}

/// Error body the remote service returns with non-2xx statuses.
#[derive(Deserialize)]
struct RemoteErrorBody {
    message: Option<String>,
}

/// Routes a document to the local heuristic or the remote service. Remote
/// mode needs both the URL and the API key configured; otherwise the router
/// degrades to the local path. A configured remote that fails surfaces the
/// failure to the caller, it is never silently papered over with local output.
pub struct SummaryRouter {
    mode: SummaryMode,
    client: reqwest::Client,
}

impl SummaryRouter {
    pub fn new() -> Self {
        Self {
            mode: SummaryMode::from_env(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_mode(mode: SummaryMode) -> Self {
        Self {
            mode,
            client: reqwest::Client::new(),
        }
    }

    /// Remote endpoint configuration; both URL and key must be set.
    fn remote_endpoint() -> Option<(String, String)> {
        let url = std::env::var(ENV_SUMMARY_API_URL)
            .ok()
            .filter(|s| !s.is_empty());
        let key = std::env::var(ENV_SUMMARY_API_KEY)
            .ok()
            .filter(|s| !s.is_empty());
        match (url, key) {
            (Some(url), Some(key)) => Some((url, key)),
            _ => None,
        }
    }

    fn local_analyze(&self, document_text: &str, document_type: &str, lang_tag: &str) -> serde_json::Value {
        let result = summarize_document(document_text, lang_tag);
        serde_json::json!({
            "documentType": document_type,
            "summary": result.summary,
            "keyPoints": result.key_points
        })
    }

    async fn remote_analyze(
        &self,
        url: &str,
        key: &str,
        request: &RemoteSummaryRequest<'_>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .client
            .post(url)
            .bearer_auth(key)
            .json(request)
            .send()
            .await
            .map_err(|e| RemoteSummaryError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<RemoteErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("status {}", status));
            return Err(RemoteSummaryError(message).into());
        }

        let envelope: RemoteSummaryEnvelope = response
            .json()
            .await
            .map_err(|e| RemoteSummaryError(e.to_string()))?;
        let data = envelope.data;

        // keyPoints and recommendations are the same concept under two names,
        // varying with the document type; merge them for the client.
        let mut key_points = data.key_points.unwrap_or_default();
        key_points.extend(data.recommendations.unwrap_or_default());

        let mut out = serde_json::Map::new();
        out.insert(
            "documentType".into(),
            serde_json::json!(data
                .document_type
                .unwrap_or_else(|| request.document_type.to_string())),
        );
        out.insert(
            "summary".into(),
            serde_json::json!(data.summary.unwrap_or_default()),
        );
        if let Some(urgency) = data.urgency {
            out.insert("urgency".into(), serde_json::json!(urgency));
        }
        if !key_points.is_empty() {
            out.insert("keyPoints".into(), serde_json::json!(key_points));
        }
        if let Some(next_steps) = data.next_steps {
            out.insert("nextSteps".into(), serde_json::json!(next_steps));
        }
        Ok(serde_json::Value::Object(out))
    }
}

impl Default for SummaryRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AgentSkill for SummaryRouter {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(
        &self,
        ctx: &SessionContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let payload = payload.unwrap_or(serde_json::Value::Null);
        let document_text = payload.get("document_text").and_then(|v| v.as_str());
        let image_base64 = payload.get("image_base64").and_then(|v| v.as_str());
        let image_mime_type = payload.get("image_mime_type").and_then(|v| v.as_str());
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

        let (mode_label, data) = match (self.mode, Self::remote_endpoint()) {
            (SummaryMode::Remote, Some((url, key))) => {
                let request = RemoteSummaryRequest {
                    document_type,
                    document_text,
                    image_base64,
                    image_mime_type,
                };
                ("remote", self.remote_analyze(&url, &key, &request).await?)
            }
            _ => {
                let text = document_text.filter(|s| !s.trim().is_empty()).ok_or(
                    "SummaryRouter requires payload: { document_text: string } in local mode; \
                     image analysis needs the remote service, paste the document text instead",
                )?;
                ("local", self.local_analyze(text, document_type, lang_tag))
            }
        };

        tracing::info!(
            target: "nyaya::summary",
            mode = mode_label,
            lang = lang.code(),
            "Document analyzed"
        );

        Ok(serde_json::json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "mode": mode_label,
            "lang": lang.code(),
            "data": data
        }))
    }
}
