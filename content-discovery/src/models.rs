use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use content_model::{
    ContentFormat, ContentItem, ContentKind, Difficulty, DurationBucket, TargetAudience,
};

/// Sort key for search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Quality score stands in for relevance until real scoring exists
    #[default]
    Relevance,
    Date,
    Views,
    Likes,
    Quality,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Conjunctive filter bundle: every set field must match, unset fields
/// match everything. Set-valued fields match when the item hits any entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub difficulties: Vec<Difficulty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<ContentFormat>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub durations: Vec<DurationBucket>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audiences: Vec<TargetAudience>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kinds: Vec<ContentKind>,
    /// Inclusive creation-date range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_after: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_before: Option<DateTime<Utc>>,
    /// Inclusive quality-score range (0 - 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_quality: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quality: Option<f32>,
    /// Case-insensitive author substring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// A search request against the discovery index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query; absent means "list everything matching the filters"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// When present (and text is too), the search lands in this user's history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub filters: SearchFilters,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub direction: SortDirection,
    /// Page size; engine default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

impl SearchQuery {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Count breakdowns of the filtered (pre-pagination) result set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFacets {
    pub categories: HashMap<String, usize>,
    pub tags: HashMap<String, usize>,
    pub authors: HashMap<String, usize>,
    pub languages: HashMap<String, usize>,
    pub difficulties: HashMap<String, usize>,
}

/// A page of search results plus the discovery extras
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub items: Vec<ContentItem>,
    /// Matches before pagination
    pub total: usize,
    pub facets: SearchFacets,
    pub suggestions: Vec<String>,
    /// Same-category items related to the returned page
    pub related: Vec<ContentItem>,
}

/// Stored discovery preferences for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_tags: Vec<String>,
}

impl UserPreferences {
    pub fn is_empty(&self) -> bool {
        self.preferred_categories.is_empty() && self.preferred_tags.is_empty()
    }
}

/// One entry of a user's bounded search history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRecord {
    pub query: String,
    pub searched_at: DateTime<Utc>,
    pub result_count: usize,
}

/// Engagement counter to bump on a stored item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    View,
    Like,
    Share,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = SearchQuery::default();
        assert_eq!(query.sort_by, SortBy::Relevance);
        assert_eq!(query.direction, SortDirection::Desc);
        assert_eq!(query.offset, 0);
        assert!(query.limit.is_none());
    }

    #[test]
    fn test_query_serde_roundtrip() {
        let query = SearchQuery {
            text: Some("tafsir".to_string()),
            filters: SearchFilters {
                categories: vec!["quran".to_string()],
                min_quality: Some(60.0),
                ..Default::default()
            },
            sort_by: SortBy::Quality,
            ..Default::default()
        };

        let json = serde_json::to_string(&query).unwrap();
        let back: SearchQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(back.text.as_deref(), Some("tafsir"));
        assert_eq!(back.sort_by, SortBy::Quality);
        assert_eq!(back.filters.categories, vec!["quran"]);
    }

    #[test]
    fn test_empty_preferences() {
        assert!(UserPreferences::default().is_empty());
        let prefs = UserPreferences {
            preferred_categories: vec!["quran".to_string()],
            ..Default::default()
        };
        assert!(!prefs.is_empty());
    }
}
