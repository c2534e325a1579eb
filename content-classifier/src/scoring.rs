//! Per-category scorers combined by the categorization engine.
//!
//! All scorers take lowercased text and return a score in [0, 1]; the engine
//! owns the weighting, these functions own the evidence.

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use content_model::Category;

/// Lowercased word tokens, dropping one- and two-character noise
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .filter(|w| w.len() > 2)
        .map(|w| w.to_lowercase())
        .collect()
}

/// Unique normalized terms of a text, for set-overlap comparisons
pub fn term_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Jaccard overlap of two term sets (0 when either is empty)
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f32 / union as f32
}

/// Fraction of the category's keywords found as substrings of the text
pub fn keyword_score(haystack: &str, keywords: &[String]) -> f32 {
    if keywords.is_empty() {
        return 0.0;
    }
    let matched = keywords
        .iter()
        .filter(|kw| haystack.contains(kw.to_lowercase().as_str()))
        .count();
    matched as f32 / keywords.len() as f32
}

/// Fraction of the category's semantic patterns that match the text
pub fn semantic_score(haystack: &str, patterns: &[Regex]) -> f32 {
    if patterns.is_empty() {
        return 0.0;
    }
    let matched = patterns.iter().filter(|p| p.is_match(haystack)).count();
    matched as f32 / patterns.len() as f32
}

/// Honorifics that signal a category-specific author.
///
/// ("qari", "quran") means an author named "Qari ..." boosts the quran
/// category; the empty string marks generic scholarly honorifics that give
/// every category a small boost.
const AUTHOR_HONORIFICS: &[(&str, &str)] = &[
    ("qari", "quran"),
    ("hafiz", "quran"),
    ("hafidh", "quran"),
    ("mufti", "fiqh"),
    ("faqih", "fiqh"),
    ("muhaddith", "hadith"),
    ("sheikh", ""),
    ("shaykh", ""),
    ("imam", ""),
    ("ustadh", ""),
    ("ustadha", ""),
    ("mawlana", ""),
    ("dr", ""),
];

/// Additive contextual bonuses from author, language and existing tags,
/// clamped to [0, 1].
pub fn context_score(
    category: &Category,
    author: Option<&str>,
    language: Option<&str>,
    existing_tags: &[String],
) -> f32 {
    let mut score: f32 = 0.0;

    if let Some(author) = author {
        let author = author.to_lowercase();
        for (honorific, target) in AUTHOR_HONORIFICS {
            if !author.contains(honorific) {
                continue;
            }
            if *target == category.id {
                score += 0.3;
                debug!(category = %category.id, honorific, "Context: author honorific (+0.3)");
            } else if target.is_empty() {
                score += 0.1;
                debug!(category = %category.id, honorific, "Context: scholarly author (+0.1)");
            }
        }
    }

    // Arabic-language content leans towards the scriptural categories
    if matches!(language, Some("ar")) && matches!(category.id.as_str(), "quran" | "hadith") {
        score += 0.2;
        debug!(category = %category.id, "Context: arabic language (+0.2)");
    }

    if !existing_tags.is_empty() {
        let overlapping = existing_tags
            .iter()
            .filter(|tag| {
                let tag = tag.to_lowercase();
                category
                    .keywords
                    .iter()
                    .any(|kw| kw.to_lowercase() == tag)
            })
            .count();
        if overlapping > 0 {
            let bonus = (overlapping as f32 * 0.15).min(0.45);
            score += bonus;
            debug!(category = %category.id, overlapping, "Context: tag overlap (+{bonus:.2})");
        }
    }

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quran_category() -> Category {
        Category {
            keywords: vec![
                "quran".to_string(),
                "surah".to_string(),
                "tafsir".to_string(),
                "tajwid".to_string(),
            ],
            ..Category::new("quran", "Quran & Tafsir")
        }
    }

    #[test]
    fn test_tokenize_drops_short_words() {
        let tokens = tokenize("An in-depth Tafsir of Surah al-Kahf");
        assert!(tokens.contains(&"tafsir".to_string()));
        assert!(tokens.contains(&"surah".to_string()));
        assert!(!tokens.iter().any(|t| t == "an" || t == "of"));
    }

    #[test]
    fn test_jaccard() {
        let a = term_set("quran tafsir tajwid");
        let b = term_set("quran tafsir fiqh");
        // 2 shared of 4 total
        assert!((jaccard(&a, &b) - 0.5).abs() < 1e-6);
        assert_eq!(jaccard(&a, &HashSet::new()), 0.0);
    }

    #[test]
    fn test_keyword_score_is_match_fraction() {
        let category = quran_category();
        let score = keyword_score("a tafsir of surah al-baqarah", &category.keywords);
        // surah and tafsir match, quran and tajwid do not
        assert!((score - 0.5).abs() < 1e-6);
        assert_eq!(keyword_score("nothing relevant", &category.keywords), 0.0);
    }

    #[test]
    fn test_semantic_score_is_pattern_fraction() {
        let patterns = vec![
            Regex::new(r"\btafsir\b").unwrap(),
            Regex::new(r"\bsurah\b").unwrap(),
        ];
        assert_eq!(semantic_score("tafsir of surah yasin", &patterns), 1.0);
        assert_eq!(semantic_score("tafsir only", &patterns), 0.5);
        assert_eq!(semantic_score("anything", &[]), 0.0);
    }

    #[test]
    fn test_context_author_honorific_targets_category() {
        let category = quran_category();
        let targeted = context_score(&category, Some("Qari Ahmed"), None, &[]);
        let generic = context_score(&category, Some("Sheikh Ahmed"), None, &[]);
        let plain = context_score(&category, Some("Ahmed"), None, &[]);

        assert!(targeted > generic);
        assert!(generic > plain);
        assert_eq!(plain, 0.0);
    }

    #[test]
    fn test_context_arabic_boosts_scriptural_categories() {
        let quran = quran_category();
        let fiqh = Category {
            keywords: vec!["fiqh".to_string()],
            ..Category::new("fiqh", "Fiqh")
        };
        assert!(context_score(&quran, None, Some("ar"), &[]) > 0.0);
        assert_eq!(context_score(&fiqh, None, Some("ar"), &[]), 0.0);
    }

    #[test]
    fn test_context_tag_overlap_is_capped() {
        let category = quran_category();
        let tags: Vec<String> = category.keywords.clone();
        let score = context_score(&category, None, None, &tags);
        assert!(score <= 0.45 + 1e-6);
    }
}
