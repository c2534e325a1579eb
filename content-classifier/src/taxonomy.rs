use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use content_model::{Category, GENERAL_CATEGORY};

use crate::error::{ClassifierError, Result};

/// Read-only registry of content categories.
///
/// Categories are configuration data: the registry is built once (from the
/// built-in table or a JSON file) and never mutated afterwards. Semantic
/// regex patterns are kept alongside the categories, keyed by category id;
/// ids without patterns simply score zero on the semantic scorer.
pub struct Taxonomy {
    categories: Vec<Category>,
    by_id: HashMap<String, usize>,
    patterns: HashMap<String, Vec<Regex>>,
}

static BUILTIN: Lazy<Arc<Taxonomy>> = Lazy::new(|| {
    Arc::new(
        Taxonomy::from_categories(builtin_categories())
            .expect("built-in taxonomy is valid"),
    )
});

impl Taxonomy {
    /// Shared handle to the built-in registry
    pub fn builtin() -> Arc<Taxonomy> {
        Arc::clone(&BUILTIN)
    }

    /// Build a registry from a category list.
    ///
    /// Rejects empty/duplicate ids and empty keyword lists; appends the
    /// `general` fallback category when the list omits it.
    pub fn from_categories(mut categories: Vec<Category>) -> Result<Self> {
        if categories.is_empty() {
            return Err(ClassifierError::InvalidTaxonomy(
                "category list is empty".to_string(),
            ));
        }

        if !categories.iter().any(|c| c.id == GENERAL_CATEGORY) {
            categories.push(general_category());
        }

        let mut by_id = HashMap::with_capacity(categories.len());
        for (idx, category) in categories.iter().enumerate() {
            if category.id.trim().is_empty() {
                return Err(ClassifierError::InvalidTaxonomy(format!(
                    "category '{}' has an empty id",
                    category.name
                )));
            }
            if category.keywords.is_empty() {
                return Err(ClassifierError::InvalidTaxonomy(format!(
                    "category '{}' has no keywords",
                    category.id
                )));
            }
            if by_id.insert(category.id.clone(), idx).is_some() {
                return Err(ClassifierError::InvalidTaxonomy(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
        }

        let patterns = default_patterns();

        Ok(Self {
            categories,
            by_id,
            patterns,
        })
    }

    /// Load a replacement registry from a JSON file (array of categories,
    /// same shape as the built-in data).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let categories: Vec<Category> = serde_json::from_str(&content)?;
        let taxonomy = Self::from_categories(categories)?;
        info!(
            count = taxonomy.len(),
            path = %path.as_ref().display(),
            "Loaded taxonomy from file"
        );
        Ok(taxonomy)
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.by_id.get(id).map(|&idx| &self.categories[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// The category for `id`, or the `general` fallback for unknown ids
    pub fn get_or_general(&self, id: &str) -> &Category {
        self.get(id).unwrap_or_else(|| {
            self.get(GENERAL_CATEGORY)
                .expect("general category is always present")
        })
    }

    pub fn subcategories_of(&self, id: &str) -> &[String] {
        self.get(id).map(|c| c.subcategories.as_slice()).unwrap_or(&[])
    }

    /// Related categories, skipping ids the registry does not know
    pub fn related_to(&self, id: &str) -> Vec<&Category> {
        self.get(id)
            .map(|c| c.related.iter().filter_map(|r| self.get(r)).collect())
            .unwrap_or_default()
    }

    pub fn color_of(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(|c| c.color.as_deref())
    }

    pub fn icon_of(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(|c| c.icon.as_deref())
    }

    /// Every keyword of every category, flattened
    pub fn all_keywords(&self) -> Vec<&str> {
        self.categories
            .iter()
            .flat_map(|c| c.keywords.iter().map(String::as_str))
            .collect()
    }

    pub fn category_ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.id.as_str())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Semantic patterns for a category (empty when none are defined)
    pub fn patterns_for(&self, id: &str) -> &[Regex] {
        self.patterns.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn category(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    color: &str,
    subcategories: &[&str],
    keywords: &[&str],
    related: &[&str],
) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        icon: Some(icon.to_string()),
        color: Some(color.to_string()),
        subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        related: related.iter().map(|s| s.to_string()).collect(),
    }
}

fn general_category() -> Category {
    category(
        GENERAL_CATEGORY,
        "General",
        "General Islamic knowledge and uncategorized content",
        "book-open",
        "#6B7280",
        &["Articles", "Questions", "Announcements"],
        &["islam", "muslim", "knowledge", "islamic", "deen"],
        &[],
    )
}

/// Built-in category table for the knowledge platform
fn builtin_categories() -> Vec<Category> {
    vec![
        category(
            "quran",
            "Quran & Tafsir",
            "Recitation, memorization and exegesis of the Quran",
            "book",
            "#059669",
            &["Tafsir", "Tajwid", "Memorization", "Translation", "Qiraat"],
            &[
                "quran", "qur'an", "surah", "ayah", "ayat", "tafsir", "tajwid",
                "tajweed", "recitation", "hifz", "juz", "mushaf", "revelation",
            ],
            &["hadith", "arabic", "spirituality"],
        ),
        category(
            "hadith",
            "Hadith & Sunnah",
            "Prophetic traditions, their sciences and collections",
            "scroll",
            "#2563EB",
            &["Sahih Collections", "Hadith Sciences", "Commentary", "Forty Hadith"],
            &[
                "hadith", "sunnah", "bukhari", "muslim", "sahih", "narration",
                "isnad", "rawi", "tirmidhi", "abu dawud", "nasai", "ibn majah",
            ],
            &["quran", "seerah", "fiqh"],
        ),
        category(
            "fiqh",
            "Fiqh & Jurisprudence",
            "Islamic law, rulings and the four schools",
            "scale",
            "#7C3AED",
            &["Worship", "Transactions", "Family Law", "Usul al-Fiqh", "Fatawa"],
            &[
                "fiqh", "halal", "haram", "ruling", "madhab", "hanafi", "shafi",
                "maliki", "hanbali", "fatwa", "wudu", "salah", "prayer", "fasting",
                "zakat", "hajj", "umrah",
            ],
            &["hadith", "finance", "family"],
        ),
        category(
            "aqeedah",
            "Aqeedah & Theology",
            "Creed, belief and the articles of faith",
            "shield",
            "#DC2626",
            &["Tawhid", "Names and Attributes", "Eschatology", "Comparative Theology"],
            &[
                "aqeedah", "aqidah", "tawhid", "tawheed", "iman", "belief",
                "creed", "shirk", "kufr", "qadr", "afterlife", "akhirah",
            ],
            &["quran", "spirituality"],
        ),
        category(
            "seerah",
            "Seerah & Biography",
            "Life of the Prophet and his companions",
            "user",
            "#D97706",
            &["Prophetic Biography", "Companions", "Battles", "Makkan Period", "Madinan Period"],
            &[
                "seerah", "sirah", "prophet", "muhammad", "rasul", "messenger",
                "companions", "sahaba", "badr", "uhud", "hijrah", "makkah", "madinah",
            ],
            &["hadith", "history"],
        ),
        category(
            "arabic",
            "Arabic Language",
            "Grammar, morphology and vocabulary of classical Arabic",
            "languages",
            "#0891B2",
            &["Grammar", "Morphology", "Vocabulary", "Rhetoric", "Conversation"],
            &[
                "arabic", "nahw", "sarf", "grammar", "balagha", "vocabulary",
                "fusha", "language", "alphabet", "conjugation",
            ],
            &["quran", "general"],
        ),
        category(
            "history",
            "Islamic History",
            "Caliphates, dynasties and civilization",
            "landmark",
            "#92400E",
            &["Rightly Guided Caliphs", "Umayyads", "Abbasids", "Ottomans", "Andalus"],
            &[
                "history", "caliphate", "khilafah", "umayyad", "abbasid",
                "ottoman", "andalus", "dynasty", "civilization", "conquest",
            ],
            &["seerah", "general"],
        ),
        category(
            "spirituality",
            "Spirituality & Tazkiyah",
            "Purification of the heart, dhikr and devotion",
            "heart",
            "#DB2777",
            &["Purification", "Dhikr & Dua", "Patience & Gratitude", "Repentance"],
            &[
                "spirituality", "tazkiyah", "dhikr", "dua", "taqwa", "sabr",
                "patience", "gratitude", "shukr", "tawbah", "repentance",
                "heart", "soul", "ihsan",
            ],
            &["aqeedah", "quran"],
        ),
        category(
            "family",
            "Family & Relationships",
            "Marriage, parenting and household matters",
            "home",
            "#16A34A",
            &["Marriage", "Parenting", "Youth", "Elderly Care"],
            &[
                "family", "marriage", "nikah", "spouse", "husband", "wife",
                "parenting", "children", "divorce", "mahr", "upbringing",
            ],
            &["fiqh", "spirituality"],
        ),
        category(
            "finance",
            "Islamic Finance",
            "Halal earnings, zakat and interest-free economics",
            "coins",
            "#CA8A04",
            &["Zakat & Charity", "Halal Investment", "Banking", "Business Ethics"],
            &[
                "finance", "zakat", "sadaqah", "riba", "interest", "investment",
                "halal income", "business", "trade", "sukuk", "waqf",
            ],
            &["fiqh", "general"],
        ),
        general_category(),
    ]
}

/// Per-category semantic patterns.
///
/// Data, not control flow: the ruleset can grow without touching the scorer.
/// Patterns are matched against lowercased text.
fn default_patterns() -> HashMap<String, Vec<Regex>> {
    let table: [(&str, &[&str]); 10] = [
        (
            "quran",
            &[
                r"qur[''\u{2019}]?an",
                r"\bsurah?\s+\w+",
                r"\bayah?s?\b",
                r"\btafs[ei]r\b",
                r"\btajw[ei]e?d\b",
                r"\bjuz['z]?\b",
                r"\bverse\s+\d+",
            ],
        ),
        (
            "hadith",
            &[
                r"\bhad[ei]th\b",
                r"\bsah[ei]h\b",
                r"\bsunnah?\b",
                r"\b(al-)?bukhari\b",
                r"\bnarrat(ed|ion|or)\b",
                r"\bisnad\b",
                r"\bchain\s+of\s+narration",
            ],
        ),
        (
            "fiqh",
            &[
                r"\bfiqh\b",
                r"\b(is|are)\s+(it|this|they)\s+(halal|haram|permissible)",
                r"\bruling\s+(on|of|about)",
                r"\bfat(a?wa|awa)\b",
                r"\bmad(h?)hab\b",
                r"\b(hanafi|shafi['i]?|maliki|hanbali)\b",
            ],
        ),
        (
            "aqeedah",
            &[
                r"\baq[ei]e?dah?\b",
                r"\btaw[hh][ei]e?d\b",
                r"\barticles?\s+of\s+(faith|iman)",
                r"\bnames?\s+and\s+attributes\b",
                r"\bday\s+of\s+judge?ment\b",
            ],
        ),
        (
            "seerah",
            &[
                r"\bseerah?\b|\bsirah?\b",
                r"\bprophet\s+muhammad\b",
                r"\blife\s+of\s+the\s+prophet\b",
                r"\bcompanions?\b|\bsahabah?\b",
                r"\bbattle\s+of\s+\w+",
            ],
        ),
        (
            "arabic",
            &[
                r"\barabic\s+(grammar|language|alphabet)\b",
                r"\bnahw\b|\bsarf\b",
                r"\bbalaghah?\b",
                r"\bconjugat(e|ion)\b",
            ],
        ),
        (
            "history",
            &[
                r"\bcaliph(ate)?s?\b|\bkhilafah?\b",
                r"\b(umayyad|abbasid|ottoman)s?\b",
                r"\bislamic\s+(history|civili[sz]ation|empire)\b",
                r"\bal-andalus\b|\bandalus(ia)?\b",
            ],
        ),
        (
            "spirituality",
            &[
                r"\btazkiyah?\b",
                r"\bdhikr\b|\bdu[''\u{2019}]?a\b",
                r"\bpurif(y|ication)\s+of\s+the\s+heart\b",
                r"\btaqwa\b|\bihsan\b",
                r"\brepent(ance)?\b|\btawbah?\b",
            ],
        ),
        (
            "family",
            &[
                r"\bnikah\b|\bmarriage\s+in\s+islam\b",
                r"\bmuslim\s+(family|parent(s|ing)?|household)\b",
                r"\braising\s+(muslim\s+)?children\b",
                r"\brights\s+of\s+the\s+(husband|wife|spouse)\b",
            ],
        ),
        (
            "finance",
            &[
                r"\bzakat\b|\bsadaqah?\b",
                r"\briba\b|\binterest[- ]free\b",
                r"\bhalal\s+(income|invest(ment|ing)|earnings?)\b",
                r"\bislamic\s+(banking|finance|economics)\b",
                r"\bsukuk\b|\bwaqf\b",
            ],
        ),
    ];

    table
        .into_iter()
        .map(|(id, patterns)| {
            let compiled = patterns
                .iter()
                .map(|p| Regex::new(p).expect("semantic pattern is valid"))
                .collect();
            (id.to_string(), compiled)
        })
        .collect()
}
