use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a tag was attached to a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagSource {
    /// Chosen by a human (author or moderator)
    Manual,
    /// Produced by an AI/LLM pipeline
    Ai,
    /// Produced by the keyword-based tag generator
    Auto,
}

impl TagSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagSource::Manual => "manual",
            TagSource::Ai => "ai",
            TagSource::Auto => "auto",
        }
    }
}

/// A weighted label attached to a content item.
///
/// `weight` expresses how strongly the tag applies, `confidence` how certain
/// the tagging source was. Both live in [0, 1]; the content item's quality
/// score is the only 0-100 scale in the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTag {
    pub id: Uuid,
    pub name: String,
    /// Owning category id
    pub category: String,
    /// Strength of the association (0.0 - 1.0)
    pub weight: f32,
    /// Certainty of the source (0.0 - 1.0)
    pub confidence: f32,
    pub source: TagSource,
}

impl ContentTag {
    pub fn new(name: impl Into<String>, category: impl Into<String>, source: TagSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            weight: 1.0,
            confidence: 1.0,
            source,
        }
    }

    /// Builder: set weight and confidence together, clamped to [0, 1]
    pub fn with_strength(mut self, weight: f32, confidence: f32) -> Self {
        self.weight = weight.clamp(0.0, 1.0);
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_is_clamped() {
        let tag = ContentTag::new("tajwid", "quran", TagSource::Auto).with_strength(1.7, -0.2);
        assert_eq!(tag.weight, 1.0);
        assert_eq!(tag.confidence, 0.0);
    }

    #[test]
    fn test_source_as_str() {
        assert_eq!(TagSource::Manual.as_str(), "manual");
        assert_eq!(TagSource::Ai.as_str(), "ai");
        assert_eq!(TagSource::Auto.as_str(), "auto");
    }
}
