//! nyaya-core: legal-assistance core library (shared types, orchestrator,
//! bilingual topic knowledge base, document summary heuristic).
//!
//! Everything here is deterministic and side-effect free; network work lives
//! in the skills crate and the gateway.

mod knowledge;
mod orchestrator;
mod shared;
mod summary;

// Shared
pub use shared::{CoreConfig, Goal, SessionContext, DEFAULT_LANG};

// Knowledge base
pub use knowledge::{
    KnowledgeBase, KnowledgeError, Language, LanguagePack, LanguageStatus, Topic,
};

// Document summary heuristic
pub use summary::{summarize_document, DocumentSummary};

// Orchestrator
pub use orchestrator::{AgentSkill, Orchestrator, SkillRegistry};
