//! Trait-based agent capability registry and concrete skills.

pub use nyaya_core::{AgentSkill, SkillRegistry};

mod expert_advisor;
mod local_summary;
mod summary_router;

pub use expert_advisor::ExpertAdvisor;
pub use local_summary::LocalSummary;
pub use summary_router::{SummaryMode, SummaryRouter};
