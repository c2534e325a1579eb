use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use content_classifier::Taxonomy;
use content_model::{ContentItem, ContentPatch};

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};
use crate::models::{EngagementKind, SearchRecord, UserPreferences};

/// In-memory content index with per-user preference and search-history maps.
///
/// Single-owner state: every operation takes `&self`/`&mut self` and there
/// is no interior locking. A multi-threaded host must confine the engine to
/// one owning task or wrap it in one coarse lock, since the read-modify-write
/// sequences here (history trims, counter bumps) are not atomic across steps.
/// The index is volatile, process-lifetime state; persistence is the
/// caller's concern.
pub struct DiscoveryEngine {
    pub(crate) taxonomy: Arc<Taxonomy>,
    pub(crate) config: DiscoveryConfig,
    pub(crate) content: HashMap<Uuid, ContentItem>,
    pub(crate) preferences: HashMap<Uuid, UserPreferences>,
    pub(crate) history: HashMap<Uuid, Vec<SearchRecord>>,
}

impl DiscoveryEngine {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            taxonomy,
            config: DiscoveryConfig::default(),
            content: HashMap::new(),
            preferences: HashMap::new(),
            history: HashMap::new(),
        }
    }

    pub fn with_config(taxonomy: Arc<Taxonomy>, config: DiscoveryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            taxonomy,
            config,
            content: HashMap::new(),
            preferences: HashMap::new(),
            history: HashMap::new(),
        })
    }

    /// Add an item to the index. Re-adding an existing id replaces the
    /// stored item (upsert).
    pub fn add_content(&mut self, item: ContentItem) {
        let id = item.id;
        if self.content.insert(id, item).is_some() {
            debug!(%id, "Replaced existing content item");
        } else {
            info!(%id, total = self.content.len(), "Indexed content item");
        }
    }

    /// Shallow-merge a patch into a stored item.
    ///
    /// `updated_at` is bumped only when the patch actually changes a field,
    /// so an empty patch is a true no-op.
    pub fn update_content(&mut self, id: Uuid, patch: ContentPatch) -> Result<()> {
        let item = self
            .content
            .get_mut(&id)
            .ok_or(DiscoveryError::ContentNotFound(id))?;
        let changed = item.apply(patch);
        debug!(%id, changed, "Updated content item");
        Ok(())
    }

    pub fn remove_content(&mut self, id: Uuid) -> Option<ContentItem> {
        let removed = self.content.remove(&id);
        if removed.is_some() {
            info!(%id, total = self.content.len(), "Removed content item");
        }
        removed
    }

    /// Bump one engagement counter on a stored item
    pub fn record_engagement(&mut self, id: Uuid, kind: EngagementKind) -> Result<()> {
        let item = self
            .content
            .get_mut(&id)
            .ok_or(DiscoveryError::ContentNotFound(id))?;
        match kind {
            EngagementKind::View => item.engagement.views += 1,
            EngagementKind::Like => item.engagement.likes += 1,
            EngagementKind::Share => item.engagement.shares += 1,
        }
        Ok(())
    }

    pub fn get_content(&self, id: Uuid) -> Option<&ContentItem> {
        self.content.get(&id)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Tag frequency table across the whole index, most frequent first.
    /// This is the pool behind search suggestions.
    pub fn popular_tags(&self, limit: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for item in self.content.values() {
            for name in item.tag_names() {
                *counts.entry(name).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }

    pub fn set_user_preferences(&mut self, user_id: Uuid, preferences: UserPreferences) {
        debug!(%user_id, "Stored user preferences");
        self.preferences.insert(user_id, preferences);
    }

    pub fn user_preferences(&self, user_id: Uuid) -> Option<&UserPreferences> {
        self.preferences.get(&user_id)
    }

    /// Distinct recent search texts for a user, newest first
    pub fn recent_searches(&self, user_id: Uuid, limit: usize) -> Vec<String> {
        let limit = limit.min(self.config.recent_searches_cap);
        let Some(records) = self.history.get(&user_id) else {
            return Vec::new();
        };

        let mut seen = Vec::new();
        for record in records.iter().rev() {
            if seen.len() >= limit {
                break;
            }
            if seen.iter().any(|q| q == &record.query) {
                continue;
            }
            seen.push(record.query.clone());
        }
        seen
    }

    pub(crate) fn record_search(&mut self, user_id: Uuid, query: &str, result_count: usize) {
        let records = self.history.entry(user_id).or_default();
        records.push(SearchRecord {
            query: query.to_string(),
            searched_at: Utc::now(),
            result_count,
        });
        let capacity = self.config.history_capacity;
        if records.len() > capacity {
            let excess = records.len() - capacity;
            records.drain(..excess);
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_model::{ContentTag, TagSource};

    fn engine() -> DiscoveryEngine {
        DiscoveryEngine::new(Taxonomy::builtin())
    }

    fn item_with_tags(title: &str, tags: &[&str]) -> ContentItem {
        let mut item = ContentItem::new(title, "body", "Author", "quran");
        item.tags = tags
            .iter()
            .map(|t| ContentTag::new(*t, "quran", TagSource::Manual))
            .collect();
        item
    }

    #[test]
    fn test_add_get_remove() {
        let mut engine = engine();
        let item = ContentItem::new("Tajwid", "Rules", "Aisha", "quran");
        let id = item.id;

        engine.add_content(item);
        assert_eq!(engine.len(), 1);
        assert!(engine.get_content(id).is_some());

        let removed = engine.remove_content(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(engine.is_empty());
        assert!(engine.remove_content(id).is_none());
    }

    #[test]
    fn test_add_is_upsert() {
        let mut engine = engine();
        let mut item = ContentItem::new("First title", "body", "Author", "quran");
        let id = item.id;
        engine.add_content(item.clone());

        item.title = "Second title".to_string();
        engine.add_content(item);

        assert_eq!(engine.len(), 1);
        assert_eq!(engine.get_content(id).unwrap().title, "Second title");
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut engine = engine();
        let err = engine
            .update_content(Uuid::new_v4(), ContentPatch::default())
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::ContentNotFound(_)));
    }

    #[test]
    fn test_record_engagement() {
        let mut engine = engine();
        let item = ContentItem::new("Tajwid", "Rules", "Aisha", "quran");
        let id = item.id;
        engine.add_content(item);

        engine.record_engagement(id, EngagementKind::View).unwrap();
        engine.record_engagement(id, EngagementKind::View).unwrap();
        engine.record_engagement(id, EngagementKind::Like).unwrap();
        engine.record_engagement(id, EngagementKind::Share).unwrap();

        let stats = engine.get_content(id).unwrap().engagement;
        assert_eq!((stats.views, stats.likes, stats.shares), (2, 1, 1));
    }

    #[test]
    fn test_popular_tags_ranked_by_frequency() {
        let mut engine = engine();
        engine.add_content(item_with_tags("a", &["tafsir", "tajwid"]));
        engine.add_content(item_with_tags("b", &["tafsir"]));
        engine.add_content(item_with_tags("c", &["tafsir", "hifz"]));

        let tags = engine.popular_tags(2);
        assert_eq!(tags[0], ("tafsir".to_string(), 3));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_search_history_is_bounded_and_deduplicated() {
        let mut engine = engine();
        let user = Uuid::new_v4();

        for i in 0..150 {
            engine.record_search(user, &format!("query {}", i % 30), 0);
        }
        assert_eq!(engine.history[&user].len(), 100);

        let recent = engine.recent_searches(user, 50);
        // capped at 20 even when asked for more
        assert_eq!(recent.len(), 20);
        // newest first
        assert_eq!(recent[0], "query 29");
        // deduplicated
        let unique: std::collections::HashSet<_> = recent.iter().collect();
        assert_eq!(unique.len(), recent.len());
    }

    #[test]
    fn test_recent_searches_zero_limit_is_empty() {
        let mut engine = engine();
        let user = Uuid::new_v4();
        engine.record_search(user, "tajwid", 1);

        assert!(engine.recent_searches(user, 0).is_empty());
        assert_eq!(engine.recent_searches(user, 1).len(), 1);
    }

    #[test]
    fn test_preferences_roundtrip() {
        let mut engine = engine();
        let user = Uuid::new_v4();
        assert!(engine.user_preferences(user).is_none());

        engine.set_user_preferences(
            user,
            UserPreferences {
                preferred_categories: vec!["quran".to_string()],
                preferred_tags: vec!["tafsir".to_string()],
            },
        );
        let prefs = engine.user_preferences(user).unwrap();
        assert_eq!(prefs.preferred_categories, vec!["quran"]);
    }
}
