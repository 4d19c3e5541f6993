//! Bilingual topic knowledge base loaded once at startup.
//!
//! Topics are plain data: an ordered list per language plus a fallback topic.
//! Order inside a pack is load-bearing: the responder returns the first topic
//! with a keyword contained in the query, so overlapping keyword sets resolve
//! by list position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Built-in bilingual topic pack compiled into the crate.
const BUILTIN_KNOWLEDGE: &str = include_str!("../../data/knowledge.json");

/// Supported response languages.
///
/// Only the two-letter prefix of a tag is significant: "hi", "hi-IN", and
/// "HI" all select Hindi; everything else selects English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    Hi,
}

impl Language {
    /// Resolves a language tag to a supported language (never fails).
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("hi") {
            Language::Hi
        } else {
            Language::En
        }
    }

    /// Two-letter language code.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// Human-readable label.
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi (हिन्दी)",
        }
    }

    /// All supported languages in order.
    pub fn all() -> [Self; 2] {
        [Self::En, Self::Hi]
    }
}

/// A single answerable topic: trigger keywords plus the canned guidance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Stable identifier (slug), unique within a language pack.
    pub id: String,
    /// Lowercase keywords scanned against queries. Empty only on the fallback topic.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Short title shown above the answer.
    pub title: String,
    /// Full answer text. May carry light markup (**bold**, "\n- " bullets).
    pub content: String,
    /// Suggested follow-up prompts for the client.
    #[serde(default)]
    pub follow_up: Vec<String>,
}

/// Ordered topics plus the fallback answer for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagePack {
    /// Returned when no topic keyword matches. Its keywords are never scanned.
    pub fallback: Topic,
    /// Scanned in order; the first keyword hit wins.
    pub topics: Vec<Topic>,
}

/// Status information for a single language pack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageStatus {
    pub code: String,
    pub label: String,
    pub topic_count: usize,
    pub fallback_title: String,
}

/// Error loading or validating a knowledge file.
#[derive(Debug)]
pub enum KnowledgeError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for KnowledgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeError::Io(e) => write!(f, "knowledge file unreadable: {}", e),
            KnowledgeError::Parse(e) => write!(f, "knowledge file is not valid JSON: {}", e),
            KnowledgeError::Invalid(msg) => write!(f, "knowledge file rejected: {}", msg),
        }
    }
}

impl std::error::Error for KnowledgeError {}

impl From<std::io::Error> for KnowledgeError {
    fn from(e: std::io::Error) -> Self {
        KnowledgeError::Io(e)
    }
}

impl From<serde_json::Error> for KnowledgeError {
    fn from(e: serde_json::Error) -> Self {
        KnowledgeError::Parse(e)
    }
}

/// Raw file shape: one pack per language code.
#[derive(Deserialize)]
struct KnowledgeFile {
    en: LanguagePack,
    hi: LanguagePack,
}

/// Immutable mapping of language to topic pack, built once at startup.
/// There is no runtime mutation API; content changes ship as data changes.
#[derive(Debug)]
pub struct KnowledgeBase {
    en: LanguagePack,
    hi: LanguagePack,
}

impl KnowledgeBase {
    /// Parses and validates the built-in pack compiled into the crate.
    pub fn builtin() -> Result<Self, KnowledgeError> {
        Self::from_json_str(BUILTIN_KNOWLEDGE)
    }

    /// Parses and validates a knowledge pack from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, KnowledgeError> {
        let file: KnowledgeFile = serde_json::from_str(json)?;
        let kb = Self {
            en: file.en,
            hi: file.hi,
        };
        kb.validated()
    }

    /// Loads and validates a knowledge pack from a JSON file on disk.
    pub fn load_json_path<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads the external file when a path is configured, the built-in pack otherwise.
    pub fn load(path: Option<&str>) -> Result<Self, KnowledgeError> {
        match path.filter(|p| !p.trim().is_empty()) {
            Some(p) => {
                let kb = Self::load_json_path(p)?;
                tracing::info!(target: "nyaya::knowledge", path = %p, "Loaded external knowledge pack");
                Ok(kb)
            }
            None => Self::builtin(),
        }
    }

    /// Normalizes keywords to lowercase and rejects malformed packs.
    ///
    /// An empty keyword would match every query, so it is a load error, not
    /// a silent skip.
    fn validated(mut self) -> Result<Self, KnowledgeError> {
        for lang in Language::all() {
            let pack = match lang {
                Language::En => &mut self.en,
                Language::Hi => &mut self.hi,
            };
            if pack.topics.is_empty() {
                return Err(KnowledgeError::Invalid(format!(
                    "{} pack has no topics",
                    lang.code()
                )));
            }
            if pack.fallback.title.trim().is_empty() || pack.fallback.content.trim().is_empty() {
                return Err(KnowledgeError::Invalid(format!(
                    "{} fallback topic is incomplete",
                    lang.code()
                )));
            }
            for topic in pack.topics.iter_mut() {
                if topic.id.trim().is_empty()
                    || topic.title.trim().is_empty()
                    || topic.content.trim().is_empty()
                {
                    return Err(KnowledgeError::Invalid(format!(
                        "{} topic '{}' is missing id, title, or content",
                        lang.code(),
                        topic.id
                    )));
                }
                if topic.keywords.is_empty() {
                    return Err(KnowledgeError::Invalid(format!(
                        "{} topic '{}' has no keywords",
                        lang.code(),
                        topic.id
                    )));
                }
                for kw in topic.keywords.iter_mut() {
                    let normalized = kw.trim().to_lowercase();
                    if normalized.is_empty() {
                        return Err(KnowledgeError::Invalid(format!(
                            "{} topic '{}' has an empty keyword",
                            lang.code(),
                            topic.id
                        )));
                    }
                    *kw = normalized;
                }
            }
        }
        Ok(self)
    }

    /// The pack for a resolved language.
    pub fn pack(&self, lang: Language) -> &LanguagePack {
        match lang {
            Language::En => &self.en,
            Language::Hi => &self.hi,
        }
    }

    /// Per-language status for the gateway status endpoints.
    pub fn status(&self) -> Vec<LanguageStatus> {
        Language::all()
            .iter()
            .map(|lang| {
                let pack = self.pack(*lang);
                LanguageStatus {
                    code: lang.code().to_string(),
                    label: lang.label().to_string(),
                    topic_count: pack.topics.len(),
                    fallback_title: pack.fallback.title.clone(),
                }
            })
            .collect()
    }
}
