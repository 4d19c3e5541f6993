//! Query matching against the knowledge base.
//!
//! Matching is deliberately simple: lowercase the query, walk the topics in
//! their listed order, and return the first topic with any keyword contained
//! in the query as a substring. No scoring, no ranking. When two topics could
//! both match, list position decides, which keeps answers stable across
//! releases of the same pack.

use super::store::{KnowledgeBase, Language, Topic};

impl KnowledgeBase {
    /// First topic whose keywords hit the query, in pack order.
    ///
    /// Keywords are stored lowercase, so a single lowercase pass over the
    /// query makes the scan case-insensitive. Returns `None` for an empty
    /// query or when nothing matches.
    pub fn match_topic(&self, query: &str, lang: Language) -> Option<&Topic> {
        let query = query.to_lowercase();
        self.pack(lang)
            .topics
            .iter()
            .find(|topic| topic.keywords.iter().any(|kw| query.contains(kw.as_str())))
    }

    /// Total lookup: the first matching topic, or the language's fallback.
    ///
    /// This never fails and never returns an empty answer. The language tag
    /// is resolved by its two-letter prefix, so "hi-IN" and "hi" both get
    /// the Hindi pack.
    pub fn expert_response(&self, query: &str, lang_tag: &str) -> &Topic {
        let lang = Language::from_tag(lang_tag);
        self.match_topic(query, lang)
            .unwrap_or(&self.pack(lang).fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::builtin().unwrap()
    }

    #[test]
    fn lost_aadhaar_hits_the_lost_topic_not_the_update_topic() {
        let kb = kb();
        let topic = kb.expert_response("I lost my aadhaar card", "en");
        assert_eq!(topic.id, "aadhaar-lost");
    }

    #[test]
    fn update_phrasing_reaches_the_update_topic() {
        let kb = kb();
        // No keyword of the earlier aadhaar-lost topic appears here, so the
        // scan falls through to the update topic via "update address".
        let topic = kb.expert_response("I moved house, how do I update address?", "en");
        assert_eq!(topic.id, "aadhaar-update");
    }

    #[test]
    fn earliest_listed_topic_wins_on_overlap() {
        let kb = kb();
        // This query matches aadhaar-lost (via "aadhaar") and aadhaar-update
        // (via "update aadhaar"). List position decides, not specificity.
        let topic = kb.expert_response("i want to update aadhaar", "en");
        assert_eq!(topic.id, "aadhaar-lost");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let kb = kb();
        let topic = kb.expert_response("WHERE IS MY PAN CARD", "en");
        assert_eq!(topic.id, "pan-card");
    }

    #[test]
    fn unmatched_query_gets_the_fallback() {
        let kb = kb();
        let topic = kb.expert_response("what is the weather today", "en");
        assert_eq!(topic.id, "fallback");
        assert!(!topic.content.is_empty());
    }

    #[test]
    fn empty_query_gets_the_fallback() {
        let kb = kb();
        assert_eq!(kb.expert_response("", "en").id, "fallback");
        assert_eq!(kb.expert_response("   ", "hi").id, "fallback");
    }

    #[test]
    fn hindi_tag_selects_the_hindi_pack() {
        let kb = kb();
        let topic = kb.expert_response("मेरा आधार खो गया है", "hi-IN");
        assert_eq!(topic.id, "aadhaar-lost");
        // Hindi pack content is written in Devanagari.
        assert!(topic.content.contains("आधार"));
    }

    #[test]
    fn romanized_hindi_keywords_also_match_in_the_hindi_pack() {
        let kb = kb();
        let topic = kb.expert_response("mera aadhaar kho gaya", "hi");
        assert_eq!(topic.id, "aadhaar-lost");
    }

    #[test]
    fn unknown_tag_falls_back_to_english() {
        let kb = kb();
        let topic = kb.expert_response("I lost my aadhaar card", "ta-IN");
        assert_eq!(topic.id, "aadhaar-lost");
        assert!(topic.content.is_ascii() || topic.content.contains("Aadhaar"));
    }

    #[test]
    fn lookup_is_deterministic() {
        let kb = kb();
        let first = kb.expert_response("police station fir", "en").id.clone();
        for _ in 0..5 {
            assert_eq!(kb.expert_response("police station fir", "en").id, first);
        }
    }
}
