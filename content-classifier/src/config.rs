use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// Categorization engine configuration.
///
/// The four scorer weights combine keyword, semantic-pattern, contextual
/// and feedback-derived evidence into one confidence per category. They are
/// expected to sum to 1.0 so the combined score stays in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Weight of the keyword-list scorer
    pub keyword_weight: f32,
    /// Weight of the regex pattern scorer
    pub semantic_weight: f32,
    /// Weight of the author/language/tag context scorer
    pub context_weight: f32,
    /// Weight of the feedback-history adjustment
    pub learning_weight: f32,

    /// Minimum token-overlap score for a subcategory to beat the default
    pub subcategory_threshold: f32,
    /// Minimum Jaccard word overlap for a feedback record to apply
    pub similarity_threshold: f32,
    /// Score nudge applied per similar feedback record
    pub feedback_nudge: f32,
    /// Feedback records kept before the oldest are trimmed
    pub feedback_capacity: usize,

    /// Maximum number of generated tags
    pub max_tags: usize,
    /// Alternate categories reported alongside the primary
    pub suggested_count: usize,
    /// Confidence floor below which a result fails validation
    pub min_confidence: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 0.4,
            semantic_weight: 0.3,
            context_weight: 0.2,
            learning_weight: 0.1,
            subcategory_threshold: 0.3,
            similarity_threshold: 0.3,
            feedback_nudge: 0.1,
            feedback_capacity: 100,
            max_tags: 10,
            suggested_count: 3,
            min_confidence: 0.1,
        }
    }
}

impl ClassifierConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let weights = [
            self.keyword_weight,
            self.semantic_weight,
            self.context_weight,
            self.learning_weight,
        ];
        if weights.iter().any(|w| *w < 0.0 || *w > 1.0) {
            return Err(ClassifierError::InvalidConfig(
                "scorer weights must be in [0, 1]".to_string(),
            ));
        }

        let sum: f32 = weights.iter().sum();
        if (sum - 1.0).abs() > 0.01 {
            return Err(ClassifierError::InvalidConfig(format!(
                "scorer weights must sum to 1.0, got {sum:.3}"
            )));
        }

        for (name, value) in [
            ("subcategory_threshold", self.subcategory_threshold),
            ("similarity_threshold", self.similarity_threshold),
            ("min_confidence", self.min_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ClassifierError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }

        if self.feedback_nudge <= 0.0 || self.feedback_nudge > 1.0 {
            return Err(ClassifierError::InvalidConfig(format!(
                "feedback_nudge must be in (0, 1], got {}",
                self.feedback_nudge
            )));
        }

        if self.feedback_capacity == 0 {
            return Err(ClassifierError::InvalidConfig(
                "feedback_capacity must be positive".to_string(),
            ));
        }

        if self.max_tags == 0 {
            return Err(ClassifierError::InvalidConfig(
                "max_tags must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
