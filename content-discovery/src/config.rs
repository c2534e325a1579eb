use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

/// Trending score weights: recency, engagement and quality contributions.
///
/// score = recency_weight x max(0, 1 - age_hours / window_hours)
///       + engagement_weight x (views + 2 x likes + 3 x shares) / engagement_scale
///       + quality_weight x quality / 100
///
/// The engagement term is deliberately uncapped: heavily engaged items may
/// outscore the recency and quality contributions combined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingWeights {
    pub recency_weight: f64,
    pub engagement_weight: f64,
    pub quality_weight: f64,
    /// Linear recency window in hours (one week by default)
    pub window_hours: f64,
    pub engagement_scale: f64,
}

impl Default for TrendingWeights {
    fn default() -> Self {
        Self {
            recency_weight: 0.4,
            engagement_weight: 0.4,
            quality_weight: 0.2,
            window_hours: 168.0,
            engagement_scale: 100.0,
        }
    }
}

impl TrendingWeights {
    pub fn validate(&self) -> Result<()> {
        let sum = self.recency_weight + self.engagement_weight + self.quality_weight;
        if (sum - 1.0).abs() > 0.01 {
            return Err(DiscoveryError::InvalidConfig(format!(
                "trending weights must sum to 1.0, got {sum:.3}"
            )));
        }
        if self.window_hours <= 0.0 || self.engagement_scale <= 0.0 {
            return Err(DiscoveryError::InvalidConfig(
                "trending window and scale must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pairwise content similarity weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityWeights {
    pub category_weight: f64,
    pub subcategory_weight: f64,
    /// Weight of the tag-name Jaccard overlap
    pub tag_weight: f64,
    pub author_weight: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            category_weight: 0.4,
            subcategory_weight: 0.2,
            tag_weight: 0.3,
            author_weight: 0.1,
        }
    }
}

impl SimilarityWeights {
    pub fn validate(&self) -> Result<()> {
        let sum = self.category_weight
            + self.subcategory_weight
            + self.tag_weight
            + self.author_weight;
        if (sum - 1.0).abs() > 0.01 {
            return Err(DiscoveryError::InvalidConfig(format!(
                "similarity weights must sum to 1.0, got {sum:.3}"
            )));
        }
        Ok(())
    }
}

/// Personalized recommendation weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizationWeights {
    pub category_weight: f64,
    /// Per matching tag, not a fraction
    pub tag_weight: f64,
    pub quality_weight: f64,
    /// Per raw interaction (views + likes + shares)
    pub engagement_weight: f64,
    pub recency_weight: f64,
    /// Linear recency window in days
    pub recency_window_days: f64,
}

impl Default for PersonalizationWeights {
    fn default() -> Self {
        Self {
            category_weight: 0.3,
            tag_weight: 0.1,
            quality_weight: 0.2,
            engagement_weight: 0.001,
            recency_weight: 0.1,
            recency_window_days: 30.0,
        }
    }
}

impl PersonalizationWeights {
    pub fn validate(&self) -> Result<()> {
        let weights = [
            self.category_weight,
            self.tag_weight,
            self.quality_weight,
            self.engagement_weight,
            self.recency_weight,
        ];
        if weights.iter().any(|w| *w < 0.0) {
            return Err(DiscoveryError::InvalidConfig(
                "personalization weights must be non-negative".to_string(),
            ));
        }
        if self.recency_window_days <= 0.0 {
            return Err(DiscoveryError::InvalidConfig(
                "recency window must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Discovery engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Page size when the query leaves `limit` unset
    pub default_limit: usize,
    /// Hard cap on page size
    pub max_limit: usize,
    /// Fraction of query words that must match when the full phrase does not
    pub word_match_ratio: f32,
    /// Related items pulled per page item
    pub related_per_item: usize,
    /// Total related-content cap per search
    pub related_cap: usize,
    /// Search suggestion cap
    pub suggestion_cap: usize,
    /// Most frequent tags considered for suggestions
    pub suggestion_tag_pool: usize,
    /// Search records kept per user before the oldest are trimmed
    pub history_capacity: usize,
    /// Hard cap on `recent_searches` responses
    pub recent_searches_cap: usize,

    pub trending: TrendingWeights,
    pub similarity: SimilarityWeights,
    pub personalization: PersonalizationWeights,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
            word_match_ratio: 0.6,
            related_per_item: 2,
            related_cap: 10,
            suggestion_cap: 10,
            suggestion_tag_pool: 50,
            history_capacity: 100,
            recent_searches_cap: 20,
            trending: TrendingWeights::default(),
            similarity: SimilarityWeights::default(),
            personalization: PersonalizationWeights::default(),
        }
    }
}

impl DiscoveryConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 || self.max_limit == 0 {
            return Err(DiscoveryError::InvalidConfig(
                "page limits must be positive".to_string(),
            ));
        }
        if self.default_limit > self.max_limit {
            return Err(DiscoveryError::InvalidConfig(format!(
                "default_limit {} exceeds max_limit {}",
                self.default_limit, self.max_limit
            )));
        }
        if !(0.0..=1.0).contains(&self.word_match_ratio) {
            return Err(DiscoveryError::InvalidConfig(format!(
                "word_match_ratio must be in [0, 1], got {}",
                self.word_match_ratio
            )));
        }
        if self.history_capacity == 0 {
            return Err(DiscoveryError::InvalidConfig(
                "history_capacity must be positive".to_string(),
            ));
        }

        self.trending.validate()?;
        self.similarity.validate()?;
        self.personalization.validate()?;
        Ok(())
    }
}
