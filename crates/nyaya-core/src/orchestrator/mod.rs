//! Goal dispatch: routes incoming goals to registered skills.

use crate::shared::{Goal, SessionContext};
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct UnknownSkill(String);

impl fmt::Display for UnknownSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown skill: {}", self.0)
    }
}

impl std::error::Error for UnknownSkill {}

/// Trait implemented by all agent capabilities (skills).
#[async_trait::async_trait]
pub trait AgentSkill: Send + Sync {
    /// Unique skill name for routing.
    fn name(&self) -> &str;

    /// Executes the skill with the given context and optional payload.
    async fn execute(
        &self,
        ctx: &SessionContext,
        payload: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>>;
}

/// Registry of agent skills that can be dispatched by name.
pub struct SkillRegistry {
    skills: Vec<Arc<dyn AgentSkill>>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self {
            skills: Vec::new(),
        }
    }

    pub fn register(&mut self, skill: Arc<dyn AgentSkill>) {
        self.skills.push(skill);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AgentSkill>> {
        self.skills.iter().find(|s| s.name() == name).cloned()
    }

    /// Returns the names of all registered skills (for the status endpoints).
    pub fn skill_names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name().to_string()).collect()
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Orchestrator dispatches goals to skills. The well-known goals map onto
/// named skills so clients can use either the typed goal or a raw
/// ExecuteSkill with the same payload.
pub struct Orchestrator {
    registry: Arc<SkillRegistry>,
}

impl Orchestrator {
    pub fn new(registry: Arc<SkillRegistry>) -> Self {
        Self {
            registry: Arc::clone(&registry),
        }
    }

    pub fn skill_names(&self) -> Vec<String> {
        self.registry.skill_names()
    }

    /// Dispatches a goal; ExecuteSkill is routed to the registered skill and executed.
    pub async fn dispatch(
        &self,
        ctx: &SessionContext,
        goal: Goal,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        match goal {
            Goal::ExecuteSkill { name, payload } => {
                let skill = self
                    .registry
                    .get(&name)
                    .ok_or_else(|| UnknownSkill(name.clone()))?;
                skill.execute(ctx, payload).await
            }
            Goal::AskExpert { query, lang } => {
                let payload = serde_json::json!({ "query": query, "lang": lang });
                let skill = self
                    .registry
                    .get("ExpertAdvisor")
                    .ok_or_else(|| UnknownSkill("ExpertAdvisor".into()))?;
                skill.execute(ctx, Some(payload)).await
            }
            Goal::SummarizeDocument { document_text, lang } => {
                let payload = serde_json::json!({ "document_text": document_text, "lang": lang });
                let skill = self
                    .registry
                    .get("SummaryRouter")
                    .ok_or_else(|| UnknownSkill("SummaryRouter".into()))?;
                skill.execute(ctx, Some(payload)).await
            }
            Goal::Custom(s) => Ok(serde_json::json!({ "custom": s, "status": "dispatched" })),
        }
    }
}
