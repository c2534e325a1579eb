use content_model::{ContentKind, ContentMetadata, ContentTag, Difficulty, TargetAudience};
use serde::{Deserialize, Serialize};

/// Input bundle for a categorization run
#[derive(Debug, Clone, Default)]
pub struct ContentAnalysis {
    pub title: String,
    pub body: String,
    pub author: Option<String>,
    /// Lowercase language code, when known
    pub language: Option<String>,
    /// Tags already attached to the content (manual or imported)
    pub existing_tags: Vec<String>,
    /// Metadata already known to the caller; takes precedence over inference
    pub metadata: Option<ContentMetadata>,
}

impl ContentAnalysis {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.existing_tags = tags;
        self
    }

    pub fn with_metadata(mut self, metadata: ContentMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata fields the engine could infer from the text.
///
/// Partial by design: a field stays `None` when no cue was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContentKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<TargetAudience>,
}

/// Output of a categorization run.
///
/// Produced fresh per `analyze` call and consumed by callers to populate a
/// content item before indexing; never stored by the engine itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizationResult {
    /// Best-scoring category id ("general" when nothing matched)
    pub primary_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub tags: Vec<ContentTag>,
    /// Combined score of the primary category (0.0 - 1.0)
    pub confidence: f32,
    /// Runner-up category ids, best first
    pub suggested: Vec<String>,
    pub metadata: MetadataHints,
    /// Normalized word set of the analyzed text; lets the feedback loop
    /// compare this outcome against future analyses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terms: Vec<String>,
}

/// Caller verdict on a categorization outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Correct => "correct",
            Feedback::Incorrect => "incorrect",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_builder() {
        let input = ContentAnalysis::new("Zakat guide", "How to calculate zakat on savings")
            .with_author("Mufti Kamal")
            .with_language("en")
            .with_tags(vec!["zakat".to_string()]);

        assert_eq!(input.author.as_deref(), Some("Mufti Kamal"));
        assert_eq!(input.language.as_deref(), Some("en"));
        assert_eq!(input.existing_tags.len(), 1);
    }

    #[test]
    fn test_feedback_as_str() {
        assert_eq!(Feedback::Correct.as_str(), "correct");
        assert_eq!(Feedback::Incorrect.as_str(), "incorrect");
    }
}
