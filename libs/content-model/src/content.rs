use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metadata::ContentMetadata;
use crate::tag::ContentTag;

/// Engagement counters for a content item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementStats {
    pub views: u32,
    pub likes: u32,
    pub shares: u32,
}

impl EngagementStats {
    /// Total raw interactions, used by the personalization ranker
    pub fn total(&self) -> u32 {
        self.views + self.likes + self.shares
    }

    /// Weighted interaction score: shares count triple, likes double
    pub fn weighted(&self) -> f64 {
        self.views as f64 + 2.0 * self.likes as f64 + 3.0 * self.shares as f64
    }
}

/// A content item as held by the discovery index.
///
/// Items are created externally (UI, import flows) and handed to the index;
/// the index is volatile, process-lifetime state. `category` should be a
/// known taxonomy id but unknown ids are tolerated and treated as "general".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author: String,
    /// Taxonomy category id
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub tags: Vec<ContentTag>,
    pub metadata: ContentMetadata,
    /// Editorial quality score (0 - 100)
    pub quality_score: f32,
    #[serde(default)]
    pub engagement: EngagementStats,
    /// Lowercase language code, duplicated from metadata for fast filtering
    pub language: String,
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Create a minimal published item; the remaining fields take defaults
    /// and are typically filled in by the caller before indexing.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let metadata = ContentMetadata::default();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            author: author.into(),
            category: category.into(),
            subcategory: None,
            tags: Vec::new(),
            language: metadata.language.clone(),
            metadata,
            quality_score: 50.0,
            engagement: EngagementStats::default(),
            published: true,
            featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Tag names in index order
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }

    /// Apply a partial update. Returns true when any field changed.
    pub fn apply(&mut self, patch: ContentPatch) -> bool {
        let mut changed = false;

        macro_rules! set {
            ($field:ident) => {
                if let Some(value) = patch.$field {
                    self.$field = value;
                    changed = true;
                }
            };
        }

        set!(title);
        set!(body);
        set!(author);
        set!(category);
        set!(tags);
        set!(metadata);
        set!(quality_score);
        set!(engagement);
        set!(language);
        set!(published);
        set!(featured);

        // Option-typed field: Some(None) clears, Some(Some(_)) replaces
        if let Some(subcategory) = patch.subcategory {
            self.subcategory = subcategory;
            changed = true;
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Partial update for a stored content item.
///
/// Every field is optional; unset fields leave the stored value untouched.
/// `subcategory` is doubly wrapped so a patch can clear it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<ContentTag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ContentMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<EngagementStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl ContentPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.author.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.tags.is_none()
            && self.metadata.is_none()
            && self.quality_score.is_none()
            && self.engagement.is_none()
            && self.language.is_none()
            && self.published.is_none()
            && self.featured.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_empty_patch_is_noop() {
        let mut item = ContentItem::new("Tajwid basics", "Rules of recitation", "Aisha", "quran");
        let before = item.updated_at;

        let changed = item.apply(ContentPatch::default());
        assert!(!changed);
        assert_eq!(item.updated_at, before);
    }

    #[test]
    fn test_apply_merges_only_set_fields() {
        let mut item = ContentItem::new("Tajwid basics", "Rules of recitation", "Aisha", "quran");
        let patch = ContentPatch {
            quality_score: Some(88.0),
            featured: Some(true),
            ..Default::default()
        };

        assert!(item.apply(patch));
        assert_eq!(item.quality_score, 88.0);
        assert!(item.featured);
        assert_eq!(item.title, "Tajwid basics");
    }

    #[test]
    fn test_patch_can_clear_subcategory() {
        let mut item = ContentItem::new("Tajwid basics", "Rules of recitation", "Aisha", "quran");
        item.subcategory = Some("Tajwid".to_string());

        let patch = ContentPatch {
            subcategory: Some(None),
            ..Default::default()
        };
        assert!(item.apply(patch));
        assert!(item.subcategory.is_none());
    }

    #[test]
    fn test_weighted_engagement() {
        let stats = EngagementStats {
            views: 100,
            likes: 10,
            shares: 5,
        };
        assert_eq!(stats.weighted(), 100.0 + 20.0 + 15.0);
        assert_eq!(stats.total(), 115);
    }
}
