//! Literal-cue metadata inference.
//!
//! Each descriptor has a table of lowercase substring cues; the first table
//! row with a matching cue wins. Fields without a matching cue stay `None`,
//! partial hints are the normal case.

use content_model::{ContentKind, Difficulty, TargetAudience};

use crate::models::MetadataHints;

const DIFFICULTY_CUES: &[(Difficulty, &[&str])] = &[
    (
        Difficulty::Scholar,
        &["scholar", "ijazah", "usul", "research", "dissertation"],
    ),
    (
        Difficulty::Advanced,
        &["advanced", "in-depth", "detailed analysis", "deep dive"],
    ),
    (
        Difficulty::Beginner,
        &["beginner", "introduction", "intro to", "basics", "101", "getting started", "new to"],
    ),
    (Difficulty::Intermediate, &["intermediate"]),
];

const KIND_CUES: &[(ContentKind, &[&str])] = &[
    (
        ContentKind::Practical,
        &["how to", "guide", "step by step", "step-by-step", "practical", "tips"],
    ),
    (
        ContentKind::Historical,
        &["history", "story of", "biography", "life of", "era of"],
    ),
    (
        ContentKind::Devotional,
        &["dua", "dhikr", "worship", "supplication", "devotion"],
    ),
    (
        ContentKind::Inspirational,
        &["inspir", "motivat", "uplifting", "reminder"],
    ),
];

const AUDIENCE_CUES: &[(TargetAudience, &[&str])] = &[
    (
        TargetAudience::StudentsOfKnowledge,
        &["students of knowledge", "talib al-ilm", "seekers of knowledge"],
    ),
    (
        TargetAudience::NewMuslims,
        &["new muslim", "convert", "revert", "just accepted islam"],
    ),
    (TargetAudience::Children, &["children", "kids", "for young ones"]),
    (TargetAudience::Youth, &["youth", "teenager", "teens", "young adult"]),
    (TargetAudience::Women, &["women", "sisters", "for the muslimah"]),
];

fn first_match<T: Copy>(haystack: &str, cues: &[(T, &[&str])]) -> Option<T> {
    cues.iter()
        .find(|(_, needles)| needles.iter().any(|n| haystack.contains(n)))
        .map(|(value, _)| *value)
}

/// Infer partial metadata from lowercased text
pub fn infer_hints(haystack: &str) -> MetadataHints {
    MetadataHints {
        difficulty: first_match(haystack, DIFFICULTY_CUES),
        kind: first_match(haystack, KIND_CUES),
        audience: first_match(haystack, AUDIENCE_CUES),
    }
}
