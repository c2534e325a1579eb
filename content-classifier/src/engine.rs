use std::sync::Arc;

use tracing::{debug, warn};

use content_model::GENERAL_CATEGORY;

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::feedback::FeedbackHistory;
use crate::metadata::infer_hints;
use crate::models::{CategorizationResult, ContentAnalysis, Feedback, MetadataHints};
use crate::scoring::{context_score, keyword_score, semantic_score, term_set, tokenize};
use crate::tags::generate_tags;
use crate::taxonomy::Taxonomy;

/// Keyword/heuristic content categorization engine.
///
/// Explicit instance, constructed and owned by the caller; the only state
/// mutated by classification outcomes is the bounded feedback history.
/// `analyze` is infallible: malformed or empty input degrades to a
/// low-confidence "general" result instead of erroring (classification is a
/// ranking aid, not a validator).
pub struct CategorizationEngine {
    taxonomy: Arc<Taxonomy>,
    config: ClassifierConfig,
    feedback: FeedbackHistory,
}

impl CategorizationEngine {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        let config = ClassifierConfig::default();
        let feedback = FeedbackHistory::new(config.feedback_capacity);
        Self {
            taxonomy,
            config,
            feedback,
        }
    }

    pub fn with_config(taxonomy: Arc<Taxonomy>, config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let feedback = FeedbackHistory::new(config.feedback_capacity);
        Ok(Self {
            taxonomy,
            config,
            feedback,
        })
    }

    /// Score the text against every category and assemble the result.
    ///
    /// Four scorers are combined per category: keyword fraction, semantic
    /// pattern fraction, contextual bonuses and the feedback-history
    /// adjustment, weighted by the config and clamped to [0, 1].
    pub fn analyze(&mut self, input: &ContentAnalysis) -> CategorizationResult {
        let haystack = format!(
            "{} {} {}",
            input.title.to_lowercase(),
            input.body.to_lowercase(),
            input.existing_tags.join(" ").to_lowercase()
        );
        let terms = term_set(&haystack);

        let mut scored: Vec<(&str, f32)> = self
            .taxonomy
            .categories()
            .iter()
            .map(|category| {
                let kw = keyword_score(&haystack, &category.keywords);
                let sem = semantic_score(&haystack, self.taxonomy.patterns_for(&category.id));
                let ctx = context_score(
                    category,
                    input.author.as_deref(),
                    input.language.as_deref(),
                    &input.existing_tags,
                );
                let learn = self.feedback.adjustment(
                    &category.id,
                    &terms,
                    self.config.similarity_threshold,
                    self.config.feedback_nudge,
                );

                let combined = (self.config.keyword_weight * kw
                    + self.config.semantic_weight * sem
                    + self.config.context_weight * ctx
                    + self.config.learning_weight * learn)
                    .clamp(0.0, 1.0);

                debug!(
                    category = %category.id,
                    kw, sem, ctx, learn, combined,
                    "Scored category"
                );
                (category.id.as_str(), combined)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let (primary_id, confidence) = match scored.first() {
            Some(&(id, score)) if score > 0.0 => (id.to_string(), score),
            _ => {
                warn!("No category scored above zero, falling back to general");
                (GENERAL_CATEGORY.to_string(), 0.0)
            }
        };

        let suggested: Vec<String> = scored
            .iter()
            .filter(|(id, score)| *id != primary_id && *score > 0.0)
            .take(self.config.suggested_count)
            .map(|(id, _)| id.to_string())
            .collect();

        let primary = self.taxonomy.get_or_general(&primary_id);
        let subcategory = self.pick_subcategory(&terms, &primary_id);
        let tags = generate_tags(&input.title, &input.body, primary, self.config.max_tags);

        let mut metadata = infer_hints(&haystack);
        if let Some(known) = &input.metadata {
            // explicit caller knowledge beats inference
            metadata = MetadataHints {
                difficulty: Some(known.difficulty),
                kind: Some(known.kind),
                audience: Some(known.audience),
            };
        }

        let mut terms: Vec<String> = terms.into_iter().collect();
        terms.sort();

        CategorizationResult {
            primary_category: primary_id,
            subcategory,
            tags,
            confidence,
            suggested,
            metadata,
            terms,
        }
    }

    /// Token overlap between subcategory names and the text; the category's
    /// first subcategory is the default when nothing clears the threshold.
    fn pick_subcategory(
        &self,
        terms: &std::collections::HashSet<String>,
        category_id: &str,
    ) -> Option<String> {
        let subcategories = self.taxonomy.subcategories_of(category_id);

        let mut best: Option<(&String, f32)> = None;
        for name in subcategories {
            let tokens = tokenize(name);
            if tokens.is_empty() {
                continue;
            }
            let matched = tokens.iter().filter(|t| terms.contains(*t)).count();
            let score = matched as f32 / tokens.len() as f32;
            if score > self.config.subcategory_threshold
                && best.map(|(_, s)| score > s).unwrap_or(true)
            {
                best = Some((name, score));
            }
        }

        best.map(|(name, _)| name.clone())
            .or_else(|| subcategories.first().cloned())
    }

    /// Generate tags for an explicit category (unknown ids fall back to
    /// "general")
    pub fn generate_smart_tags(
        &self,
        title: &str,
        body: &str,
        category: &str,
    ) -> Vec<content_model::ContentTag> {
        if !self.taxonomy.contains(category) {
            warn!(category, "Unknown category for tag generation, using general");
        }
        let category = self.taxonomy.get_or_general(category);
        generate_tags(title, body, category, self.config.max_tags)
    }

    /// Sanity gate for a result; advisory, never enforced by the engine
    pub fn validate_categorization(&self, result: &CategorizationResult) -> bool {
        !result.primary_category.is_empty()
            && self.taxonomy.contains(&result.primary_category)
            && result.confidence >= self.config.min_confidence
            && !result.tags.is_empty()
    }

    /// Record a caller verdict on a result into the feedback history
    pub fn improve_categorization(&mut self, result: &CategorizationResult, feedback: Feedback) {
        let terms = result.terms.iter().cloned().collect();
        self.feedback
            .record(&result.primary_category, feedback, terms);
    }

    pub fn feedback_len(&self) -> usize {
        self.feedback.len()
    }

    /// Coarse verdict counters keyed by `"{category}-{feedback}"`
    pub fn feedback_counts(&self) -> &std::collections::HashMap<String, u32> {
        self.feedback.counts()
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }
}
