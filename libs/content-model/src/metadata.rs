use serde::{Deserialize, Serialize};

/// Difficulty level of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Scholar,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Scholar => "scholar",
        }
    }
}

/// Delivery format of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFormat {
    Article,
    Video,
    Audio,
    Pdf,
    Course,
    Infographic,
}

impl ContentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Article => "article",
            ContentFormat::Video => "video",
            ContentFormat::Audio => "audio",
            ContentFormat::Pdf => "pdf",
            ContentFormat::Course => "course",
            ContentFormat::Infographic => "infographic",
        }
    }
}

/// Coarse consumption-time bucket
///
/// Short: under 5 minutes, Medium: 5-20, Long: 20-60, Extended: over an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    Short,
    Medium,
    Long,
    Extended,
}

impl DurationBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::Short => "short",
            DurationBucket::Medium => "medium",
            DurationBucket::Long => "long",
            DurationBucket::Extended => "extended",
        }
    }
}

/// Intended audience of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetAudience {
    General,
    Children,
    Youth,
    Adults,
    Women,
    NewMuslims,
    StudentsOfKnowledge,
}

impl TargetAudience {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetAudience::General => "general",
            TargetAudience::Children => "children",
            TargetAudience::Youth => "youth",
            TargetAudience::Adults => "adults",
            TargetAudience::Women => "women",
            TargetAudience::NewMuslims => "new_muslims",
            TargetAudience::StudentsOfKnowledge => "students_of_knowledge",
        }
    }
}

/// Editorial kind of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Educational,
    Practical,
    Devotional,
    Historical,
    Inspirational,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Educational => "educational",
            ContentKind::Practical => "practical",
            ContentKind::Devotional => "devotional",
            ContentKind::Historical => "historical",
            ContentKind::Inspirational => "inspirational",
        }
    }
}

/// Enumerated descriptors of a content item.
///
/// Pure value object with no identity. Every field is concrete; partial
/// knowledge lives in the classifier's `MetadataHints`, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub difficulty: Difficulty,
    pub format: ContentFormat,
    pub duration: DurationBucket,
    /// Lowercase language code ("en", "ar", ...)
    pub language: String,
    pub audience: TargetAudience,
    pub kind: ContentKind,
}

impl Default for ContentMetadata {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Beginner,
            format: ContentFormat::Article,
            duration: DurationBucket::Medium,
            language: "en".to_string(),
            audience: TargetAudience::General,
            kind: ContentKind::Educational,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Difficulty::Scholar).unwrap();
        assert_eq!(json, "\"scholar\"");

        let audience: TargetAudience = serde_json::from_str("\"new_muslims\"").unwrap();
        assert_eq!(audience, TargetAudience::NewMuslims);
    }

    #[test]
    fn test_default_metadata() {
        let meta = ContentMetadata::default();
        assert_eq!(meta.difficulty, Difficulty::Beginner);
        assert_eq!(meta.language, "en");
    }
}
