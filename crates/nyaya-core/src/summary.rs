//! Heuristic document summarizer.
//!
//! A single synchronous pass over lowercased text. Category detection is an
//! else-if chain (notice, then sale deed, then court order), so exactly one
//! category shapes the summary even when a document mentions several. The
//! land and lawyer checks run after the chain and are independent of it.
//! Keyword tables carry English and Hindi variants side by side so one scan
//! covers both scripts.

use serde::{Deserialize, Serialize};

use crate::knowledge::Language;

/// Phrases that mark a document as a legal notice.
const NOTICE_KEYWORDS: &[&str] = &[
    "legal notice",
    "notice",
    "कानूनी नोटिस",
    "नोटिस",
];

/// Phrases that mark a document as a sale deed. "bainama" is the common
/// romanized form seen in scanned North Indian deeds.
const SALE_DEED_KEYWORDS: &[&str] = &[
    "sale deed",
    "conveyance deed",
    "deed of sale",
    "बिक्री विलेख",
    "विक्रय विलेख",
    "बैनामा",
    "bainama",
];

/// Phrases that mark a document as a court order, summons, or judgment.
const COURT_KEYWORDS: &[&str] = &[
    "court",
    "summons",
    "summon",
    "hearing",
    "tribunal",
    "judgment",
    "judgement",
    "decree",
    "writ",
    "अदालत",
    "न्यायालय",
    "समन",
    "सुनवाई",
    "आदेश",
];

/// Land and property markers, including the revenue-record terms villagers
/// actually use (khasra, khatauni).
const LAND_KEYWORDS: &[&str] = &[
    "land",
    "property",
    "plot",
    "khasra",
    "khatauni",
    "mutation",
    "zameen",
    "jameen",
    "जमीन",
    "ज़मीन",
    "भूमि",
    "संपत्ति",
    "खसरा",
    "खतौनी",
];

/// Mentions of legal counsel that trigger the consult-a-lawyer point.
const LAWYER_KEYWORDS: &[&str] = &[
    "lawyer",
    "advocate",
    "counsel",
    "legal advice",
    "vakil",
    "वकील",
    "अधिवक्ता",
    "कानूनी सलाह",
];

/// Output of one summarizer pass. Field names follow the wire shape the
/// summarize endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub summary: String,
    pub key_points: Vec<String>,
}

/// All user-facing strings the summarizer can emit, per language.
struct Phrases {
    notice_opening: &'static str,
    sale_deed_opening: &'static str,
    court_opening: &'static str,
    generic_opening: &'static str,
    summary_tail: &'static str,
    notice_points: &'static [&'static str],
    sale_deed_points: &'static [&'static str],
    court_points: &'static [&'static str],
    land_point: &'static str,
    lawyer_point: &'static str,
    generic_point: &'static str,
}

static EN_PHRASES: Phrases = Phrases {
    notice_opening: "This document appears to be a legal notice.",
    sale_deed_opening: "This document appears to be a sale deed (property transfer document).",
    court_opening: "This document appears to be a court order or summons.",
    generic_opening: "This appears to be a legal document.",
    summary_tail: "Please read every clause carefully before acting on it.",
    notice_points: &[
        "Check who sent the notice and the deadline for your reply.",
        "A reply sent after the deadline can weaken your position.",
    ],
    sale_deed_points: &[
        "Verify the buyer and seller details against their identity documents.",
        "Check that the property description and boundaries match the actual site.",
    ],
    court_points: &[
        "Note the date and time you are required to appear.",
        "Note the court name and the case number for all future reference.",
    ],
    land_point: "This concerns land or property. Verify the ownership records (khasra/khatauni) at the local revenue office.",
    lawyer_point: "The document refers to legal counsel. Consult a qualified lawyer before signing or replying.",
    generic_point: "Read the full document carefully and contact a legal aid centre if anything is unclear.",
};

static HI_PHRASES: Phrases = Phrases {
    notice_opening: "यह दस्तावेज़ एक कानूनी नोटिस प्रतीत होता है।",
    sale_deed_opening: "यह दस्तावेज़ एक बिक्री विलेख (बैनामा) प्रतीत होता है।",
    court_opening: "यह दस्तावेज़ अदालत का आदेश या समन प्रतीत होता है।",
    generic_opening: "यह एक कानूनी दस्तावेज़ प्रतीत होता है।",
    summary_tail: "कोई भी कदम उठाने से पहले हर शर्त ध्यान से पढ़ें।",
    notice_points: &[
        "देखें कि नोटिस किसने भेजा है और जवाब देने की अंतिम तिथि क्या है।",
        "समय सीमा के बाद भेजा गया जवाब आपकी स्थिति कमज़ोर कर सकता है।",
    ],
    sale_deed_points: &[
        "खरीदार और विक्रेता का विवरण उनके पहचान दस्तावेज़ों से मिलाएं।",
        "संपत्ति का विवरण और चौहद्दी मौके की स्थिति से मिलाएं।",
    ],
    court_points: &[
        "पेश होने की तारीख और समय नोट करें।",
        "अदालत का नाम और केस नंबर आगे के संदर्भ के लिए नोट करें।",
    ],
    land_point: "यह मामला जमीन या संपत्ति से जुड़ा है। खसरा/खतौनी रिकॉर्ड स्थानीय तहसील कार्यालय से जांचें।",
    lawyer_point: "दस्तावेज़ में कानूनी सलाह का उल्लेख है। हस्ताक्षर या जवाब देने से पहले योग्य वकील से सलाह लें।",
    generic_point: "पूरा दस्तावेज़ ध्यान से पढ़ें और कुछ भी अस्पष्ट हो तो विधिक सेवा केंद्र से संपर्क करें।",
};

fn phrases(lang: Language) -> &'static Phrases {
    match lang {
        Language::En => &EN_PHRASES,
        Language::Hi => &HI_PHRASES,
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Summarizes a legal document with keyword heuristics. Pure and total: any
/// input, including an empty string, yields a non-empty summary and at least
/// one key point.
pub fn summarize_document(document_text: &str, lang_tag: &str) -> DocumentSummary {
    let lang = Language::from_tag(lang_tag);
    let p = phrases(lang);
    let text = document_text.to_lowercase();

    let mut key_points: Vec<String> = Vec::new();

    // Categories are mutually exclusive; the chain order is part of the
    // contract. A court summons that also says "notice" reads as a notice.
    let opening = if contains_any(&text, NOTICE_KEYWORDS) {
        key_points.extend(p.notice_points.iter().map(|s| (*s).to_string()));
        p.notice_opening
    } else if contains_any(&text, SALE_DEED_KEYWORDS) {
        key_points.extend(p.sale_deed_points.iter().map(|s| (*s).to_string()));
        p.sale_deed_opening
    } else if contains_any(&text, COURT_KEYWORDS) {
        key_points.extend(p.court_points.iter().map(|s| (*s).to_string()));
        p.court_opening
    } else {
        p.generic_opening
    };

    // These two run regardless of the category outcome.
    if contains_any(&text, LAND_KEYWORDS) {
        key_points.push(p.land_point.to_string());
    }
    if contains_any(&text, LAWYER_KEYWORDS) {
        key_points.push(p.lawyer_point.to_string());
    }

    if key_points.is_empty() {
        key_points.push(p.generic_point.to_string());
    }

    DocumentSummary {
        summary: format!("{} {}", opening, p.summary_tail),
        key_points,
    }
}
