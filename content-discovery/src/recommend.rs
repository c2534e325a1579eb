//! Recommendation heuristics over the discovery index.
//!
//! Each operation is independent: personalized, similar, trending, featured
//! and new content each rank published items with their own score. Scoring
//! functions take an explicit `now` so tests stay deterministic.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use content_model::ContentItem;

use crate::config::{PersonalizationWeights, SimilarityWeights, TrendingWeights};
use crate::index::DiscoveryEngine;
use crate::models::UserPreferences;

impl DiscoveryEngine {
    /// Published items matching the user's stored preferences, ranked by the
    /// personalization score. The preference lists are a union: an item
    /// survives the filter by hitting either a preferred category or a
    /// preferred tag, and the score ranks full matches above partial ones.
    /// Without stored preferences every published item is a candidate.
    pub fn personalized_recommendations(&self, user_id: Uuid, limit: usize) -> Vec<ContentItem> {
        let now = Utc::now();
        let prefs = self.preferences.get(&user_id);

        let candidates = self.content.values().filter(|item| item.published).filter(
            |item| match prefs {
                Some(p) if !p.is_empty() => {
                    let category_match = p.preferred_categories.contains(&item.category);
                    let tag_match = item
                        .tag_names()
                        .any(|name| p.preferred_tags.iter().any(|t| t == name));
                    category_match || tag_match
                }
                _ => true,
            },
        );

        let empty = UserPreferences::default();
        let prefs = prefs.unwrap_or(&empty);
        let weights = &self.config.personalization;

        let mut scored: Vec<(&ContentItem, f64)> = candidates
            .map(|item| (item, personalization_score(item, prefs, now, weights)))
            .collect();
        sort_scored(&mut scored);

        debug!(%user_id, candidates = scored.len(), "Personalized recommendations");
        take_items(scored, limit)
    }

    /// Published items most similar to the given one; never includes the
    /// seed itself. Unknown ids yield an empty list.
    pub fn similar_content(&self, content_id: Uuid, limit: usize) -> Vec<ContentItem> {
        let Some(seed) = self.content.get(&content_id) else {
            return Vec::new();
        };
        let weights = &self.config.similarity;

        let mut scored: Vec<(&ContentItem, f64)> = self
            .content
            .values()
            .filter(|item| item.id != content_id && item.published)
            .map(|item| (item, similarity_score(seed, item, weights)))
            .filter(|(_, score)| *score > 0.0)
            .collect();
        sort_scored(&mut scored);

        take_items(scored, limit)
    }

    /// Published items ranked by the trending score, optionally restricted
    /// to one category
    pub fn trending_content(&self, category: Option<&str>, limit: usize) -> Vec<ContentItem> {
        let now = Utc::now();
        let weights = &self.config.trending;

        let mut scored: Vec<(&ContentItem, f64)> = self
            .content
            .values()
            .filter(|item| item.published)
            .filter(|item| category.map(|c| item.category == c).unwrap_or(true))
            .map(|item| (item, trending_score(item, now, weights)))
            .collect();
        sort_scored(&mut scored);

        take_items(scored, limit)
    }

    /// Published, featured items by quality score descending
    pub fn featured_content(&self, limit: usize) -> Vec<ContentItem> {
        let mut scored: Vec<(&ContentItem, f64)> = self
            .content
            .values()
            .filter(|item| item.published && item.featured)
            .map(|item| (item, item.quality_score as f64))
            .collect();
        sort_scored(&mut scored);

        take_items(scored, limit)
    }

    /// Published items by creation date, newest first
    pub fn new_content(&self, limit: usize) -> Vec<ContentItem> {
        let mut items: Vec<&ContentItem> = self
            .content
            .values()
            .filter(|item| item.published)
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        items.into_iter().take(limit).cloned().collect()
    }
}

fn sort_scored(scored: &mut [(&ContentItem, f64)]) {
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
}

fn take_items(scored: Vec<(&ContentItem, f64)>, limit: usize) -> Vec<ContentItem> {
    scored
        .into_iter()
        .take(limit)
        .map(|(item, _)| item.clone())
        .collect()
}

/// Linear decay from 1 at age zero to 0 at the window edge
fn linear_recency(created_at: DateTime<Utc>, now: DateTime<Utc>, window_hours: f64) -> f64 {
    let age_hours = (now - created_at).num_minutes().max(0) as f64 / 60.0;
    (1.0 - age_hours / window_hours).max(0.0)
}

/// Trending score: recency decay plus weighted engagement plus quality.
/// The engagement term is uncapped by design.
pub fn trending_score(item: &ContentItem, now: DateTime<Utc>, weights: &TrendingWeights) -> f64 {
    let recency = linear_recency(item.created_at, now, weights.window_hours);
    let engagement = item.engagement.weighted() / weights.engagement_scale;
    let quality = item.quality_score as f64 / 100.0;

    weights.recency_weight * recency
        + weights.engagement_weight * engagement
        + weights.quality_weight * quality
}

/// Pairwise similarity: category and subcategory identity, tag-name Jaccard
/// overlap and author identity
pub fn similarity_score(a: &ContentItem, b: &ContentItem, weights: &SimilarityWeights) -> f64 {
    let mut score = 0.0;

    if a.category == b.category {
        score += weights.category_weight;
    }
    if let (Some(sub_a), Some(sub_b)) = (&a.subcategory, &b.subcategory) {
        if sub_a == sub_b {
            score += weights.subcategory_weight;
        }
    }

    let tags_a: HashSet<&str> = a.tag_names().collect();
    let tags_b: HashSet<&str> = b.tag_names().collect();
    if !tags_a.is_empty() && !tags_b.is_empty() {
        let intersection = tags_a.intersection(&tags_b).count();
        let union = tags_a.len() + tags_b.len() - intersection;
        score += weights.tag_weight * intersection as f64 / union as f64;
    }

    if a.author == b.author {
        score += weights.author_weight;
    }

    score
}

/// Personalization score: preference matches plus quality, raw engagement
/// and a 30-day linear recency bonus
pub fn personalization_score(
    item: &ContentItem,
    prefs: &UserPreferences,
    now: DateTime<Utc>,
    weights: &PersonalizationWeights,
) -> f64 {
    let mut score = 0.0;

    if prefs.preferred_categories.contains(&item.category) {
        score += weights.category_weight;
    }

    let matching_tags = item
        .tag_names()
        .filter(|name| prefs.preferred_tags.iter().any(|t| t == name))
        .count();
    score += weights.tag_weight * matching_tags as f64;

    score += weights.quality_weight * item.quality_score as f64 / 100.0;
    score += weights.engagement_weight * item.engagement.total() as f64;
    score += weights.recency_weight
        * linear_recency(item.created_at, now, weights.recency_window_days * 24.0);

    score
}
