//! Knowledge module: bilingual topic store plus the query responder.

mod responder;
mod store;

pub use store::{KnowledgeBase, KnowledgeError, Language, LanguagePack, LanguageStatus, Topic};
