//! Search pipeline: text filter, conjunctive structured filters, sort,
//! pagination, facets, suggestions and related content.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use content_model::ContentItem;

use crate::index::DiscoveryEngine;
use crate::models::{SearchFacets, SearchFilters, SearchQuery, SearchResult, SortBy, SortDirection};

impl DiscoveryEngine {
    /// Run the full search pipeline over the index.
    ///
    /// Facets and `total` describe the filtered result set before
    /// pagination; `items` is the requested page. When the query names a
    /// user and carries text, the search lands in that user's history.
    pub fn search(&mut self, query: &SearchQuery) -> SearchResult {
        let mut matched: Vec<&ContentItem> = self
            .content
            .values()
            .filter(|item| self.matches_text(item, query.text.as_deref()))
            .filter(|item| matches_filters(item, &query.filters))
            .collect();

        sort_items(&mut matched, query.sort_by, query.direction);

        let total = matched.len();
        let facets = compute_facets(&matched);

        let limit = query
            .limit
            .unwrap_or(self.config.default_limit)
            .min(self.config.max_limit);
        let items: Vec<ContentItem> = matched
            .into_iter()
            .skip(query.offset)
            .take(limit)
            .cloned()
            .collect();

        let suggestions = self.suggestions(query.text.as_deref());
        let related = self.related_to_page(&items);

        debug!(
            total,
            page = items.len(),
            suggestions = suggestions.len(),
            "Search completed"
        );

        if let (Some(user_id), Some(text)) = (query.user_id, query.text.as_deref()) {
            if !text.trim().is_empty() {
                self.record_search(user_id, text, total);
            }
        }

        SearchResult {
            items,
            total,
            facets,
            suggestions,
            related,
        }
    }

    /// Full phrase match, or at least `word_match_ratio` of the individual
    /// query words (ceiling-rounded)
    fn matches_text(&self, item: &ContentItem, text: Option<&str>) -> bool {
        let Some(text) = text else { return true };
        let phrase = text.trim().to_lowercase();
        if phrase.is_empty() {
            return true;
        }

        let haystack = format!(
            "{} {} {} {}",
            item.title,
            item.body,
            item.author,
            item.tag_names().collect::<Vec<_>>().join(" ")
        )
        .to_lowercase();

        if haystack.contains(&phrase) {
            return true;
        }

        let words: Vec<&str> = phrase.split_whitespace().collect();
        if words.is_empty() {
            return true;
        }
        let required = ((words.len() as f32) * self.config.word_match_ratio).ceil() as usize;
        let matched = words.iter().filter(|w| haystack.contains(*w)).count();
        matched >= required.max(1)
    }

    /// Query-text substring match against category names, subcategory names
    /// and the most frequent tags, capped
    fn suggestions(&self, text: Option<&str>) -> Vec<String> {
        let Some(text) = text else { return Vec::new() };
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut suggestions: Vec<String> = Vec::new();
        let mut push = |candidate: &str| {
            if candidate.to_lowercase().contains(&needle)
                && !suggestions.iter().any(|s| s == candidate)
            {
                suggestions.push(candidate.to_string());
            }
        };

        for category in self.taxonomy.categories() {
            push(&category.name);
            for subcategory in &category.subcategories {
                push(subcategory);
            }
        }
        for (tag, _) in self.popular_tags(self.config.suggestion_tag_pool) {
            push(&tag);
        }

        suggestions.truncate(self.config.suggestion_cap);
        suggestions
    }

    /// Up to `related_per_item` other same-category items per page item,
    /// skipping everything already shown, capped overall
    fn related_to_page(&self, page: &[ContentItem]) -> Vec<ContentItem> {
        let mut excluded: HashSet<Uuid> = page.iter().map(|item| item.id).collect();
        let mut related = Vec::new();

        'outer: for item in page {
            let mut picked = 0;
            for candidate in self.content.values() {
                if picked >= self.config.related_per_item {
                    break;
                }
                if candidate.category != item.category || excluded.contains(&candidate.id) {
                    continue;
                }
                excluded.insert(candidate.id);
                related.push(candidate.clone());
                picked += 1;
                if related.len() >= self.config.related_cap {
                    break 'outer;
                }
            }
        }
        related
    }
}

/// Conjunctive filter check; unset criteria match everything
fn matches_filters(item: &ContentItem, filters: &SearchFilters) -> bool {
    if !filters.categories.is_empty() && !filters.categories.contains(&item.category) {
        return false;
    }
    if !filters.subcategories.is_empty() {
        match &item.subcategory {
            Some(sub) if filters.subcategories.contains(sub) => {}
            _ => return false,
        }
    }
    if !filters.tags.is_empty() {
        let any_match = item
            .tag_names()
            .any(|name| filters.tags.iter().any(|t| t == name));
        if !any_match {
            return false;
        }
    }
    if !filters.difficulties.is_empty() && !filters.difficulties.contains(&item.metadata.difficulty)
    {
        return false;
    }
    if !filters.formats.is_empty() && !filters.formats.contains(&item.metadata.format) {
        return false;
    }
    if !filters.durations.is_empty() && !filters.durations.contains(&item.metadata.duration) {
        return false;
    }
    if !filters.languages.is_empty() && !filters.languages.contains(&item.language) {
        return false;
    }
    if !filters.audiences.is_empty() && !filters.audiences.contains(&item.metadata.audience) {
        return false;
    }
    if !filters.kinds.is_empty() && !filters.kinds.contains(&item.metadata.kind) {
        return false;
    }
    if let Some(after) = filters.created_after {
        if item.created_at < after {
            return false;
        }
    }
    if let Some(before) = filters.created_before {
        if item.created_at > before {
            return false;
        }
    }
    if let Some(min) = filters.min_quality {
        if item.quality_score < min {
            return false;
        }
    }
    if let Some(max) = filters.max_quality {
        if item.quality_score > max {
            return false;
        }
    }
    if let Some(author) = &filters.author {
        if !item.author.to_lowercase().contains(&author.to_lowercase()) {
            return false;
        }
    }
    if let Some(published) = filters.published {
        if item.published != published {
            return false;
        }
    }
    if let Some(featured) = filters.featured {
        if item.featured != featured {
            return false;
        }
    }
    true
}

fn sort_items(items: &mut [&ContentItem], sort_by: SortBy, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ordering = match sort_by {
            // quality stands in for relevance until real text scoring exists
            SortBy::Relevance | SortBy::Quality => a
                .quality_score
                .partial_cmp(&b.quality_score)
                .unwrap_or(Ordering::Equal),
            SortBy::Date => a.created_at.cmp(&b.created_at),
            SortBy::Views => a.engagement.views.cmp(&b.engagement.views),
            SortBy::Likes => a.engagement.likes.cmp(&b.engagement.likes),
            SortBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Facet counts over the filtered, pre-pagination result set
fn compute_facets(items: &[&ContentItem]) -> SearchFacets {
    let mut facets = SearchFacets::default();
    for item in items {
        *facets.categories.entry(item.category.clone()).or_insert(0) += 1;
        *facets.authors.entry(item.author.clone()).or_insert(0) += 1;
        *facets.languages.entry(item.language.clone()).or_insert(0) += 1;
        *facets
            .difficulties
            .entry(item.metadata.difficulty.as_str().to_string())
            .or_insert(0) += 1;
        for tag in item.tag_names() {
            *facets.tags.entry(tag.to_string()).or_insert(0) += 1;
        }
    }
    facets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use content_classifier::Taxonomy;
    use content_model::{ContentTag, Difficulty, TagSource};

    fn engine() -> DiscoveryEngine {
        DiscoveryEngine::new(Taxonomy::builtin())
    }

    fn item(title: &str, category: &str, quality: f32) -> ContentItem {
        let mut item = ContentItem::new(title, "body text", "Author", category);
        item.quality_score = quality;
        item
    }

    #[test]
    fn test_no_text_no_filters_returns_everything() {
        let mut engine = engine();
        for i in 0..25 {
            engine.add_content(item(&format!("item {i}"), "quran", 50.0));
        }

        let result = engine.search(&SearchQuery::default());
        assert_eq!(result.total, 25);
        // default page size
        assert_eq!(result.items.len(), 20);
    }

    #[test]
    fn test_phrase_match_beats_word_ratio() {
        let mut engine = engine();
        let mut a = item("Tajwid rules explained", "quran", 50.0);
        a.body = "full guide".to_string();
        engine.add_content(a);
        engine.add_content(item("Unrelated", "fiqh", 50.0));

        let result = engine.search(&SearchQuery::with_text("tajwid rules"));
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].title, "Tajwid rules explained");
    }

    #[test]
    fn test_word_ratio_match() {
        let mut engine = engine();
        // 2 of 3 words (67% >= 60%) match, though not as a phrase
        engine.add_content(item("zakat rules for gold", "finance", 50.0));

        let result = engine.search(&SearchQuery::with_text("gold zakat nisab"));
        assert_eq!(result.total, 1);

        // 1 of 3 words (33% < 60%) is not enough
        let result = engine.search(&SearchQuery::with_text("silver nisab zakat"));
        assert_eq!(result.total, 0);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let mut engine = engine();
        let mut a = item("a", "quran", 90.0);
        a.metadata.difficulty = Difficulty::Advanced;
        engine.add_content(a);
        let b = item("b", "quran", 40.0);
        engine.add_content(b);
        engine.add_content(item("c", "fiqh", 90.0));

        let category_only = SearchQuery {
            filters: SearchFilters {
                categories: vec!["quran".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let both = SearchQuery {
            filters: SearchFilters {
                categories: vec!["quran".to_string()],
                min_quality: Some(60.0),
                ..Default::default()
            },
            ..Default::default()
        };

        let loose = engine.search(&category_only).total;
        let tight = engine.search(&both).total;
        assert_eq!(loose, 2);
        assert_eq!(tight, 1);
        assert!(tight <= loose);
    }

    #[test]
    fn test_sort_by_quality_and_direction() {
        let mut engine = engine();
        engine.add_content(item("low", "quran", 10.0));
        engine.add_content(item("high", "quran", 90.0));

        let desc = engine.search(&SearchQuery {
            sort_by: SortBy::Quality,
            ..Default::default()
        });
        assert_eq!(desc.items[0].title, "high");

        let asc = engine.search(&SearchQuery {
            sort_by: SortBy::Quality,
            direction: SortDirection::Asc,
            ..Default::default()
        });
        assert_eq!(asc.items[0].title, "low");
    }

    #[test]
    fn test_sort_by_title_is_lexicographic() {
        let mut engine = engine();
        engine.add_content(item("banana", "quran", 50.0));
        engine.add_content(item("Apple", "quran", 50.0));

        let result = engine.search(&SearchQuery {
            sort_by: SortBy::Title,
            direction: SortDirection::Asc,
            ..Default::default()
        });
        assert_eq!(result.items[0].title, "Apple");
    }

    #[test]
    fn test_pagination_reports_preslice_total() {
        let mut engine = engine();
        for i in 0..30 {
            engine.add_content(item(&format!("item {i}"), "quran", i as f32));
        }

        let result = engine.search(&SearchQuery {
            limit: Some(5),
            offset: 10,
            ..Default::default()
        });
        assert_eq!(result.total, 30);
        assert_eq!(result.items.len(), 5);

        // offset past the end: empty page, unchanged total
        let past = engine.search(&SearchQuery {
            offset: 100,
            ..Default::default()
        });
        assert_eq!(past.total, 30);
        assert!(past.items.is_empty());
    }

    #[test]
    fn test_limit_is_capped() {
        let mut engine = engine();
        for i in 0..150 {
            engine.add_content(item(&format!("item {i}"), "quran", 50.0));
        }

        let result = engine.search(&SearchQuery {
            limit: Some(10_000),
            ..Default::default()
        });
        assert_eq!(result.items.len(), 100);
    }

    #[test]
    fn test_facets_cover_prepagination_set() {
        let mut engine = engine();
        for _ in 0..3 {
            engine.add_content(item("q", "quran", 50.0));
        }
        for _ in 0..2 {
            engine.add_content(item("f", "fiqh", 50.0));
        }

        let result = engine.search(&SearchQuery {
            limit: Some(1),
            ..Default::default()
        });
        assert_eq!(result.facets.categories.get("quran"), Some(&3));
        assert_eq!(result.facets.categories.get("fiqh"), Some(&2));
        assert_eq!(result.facets.languages.get("en"), Some(&5));
    }

    #[test]
    fn test_suggestions_match_categories_and_tags() {
        let mut engine = engine();
        let mut a = item("a", "quran", 50.0);
        a.tags = vec![ContentTag::new("tajwid basics", "quran", TagSource::Manual)];
        engine.add_content(a);

        let result = engine.search(&SearchQuery::with_text("taj"));
        assert!(result.suggestions.iter().any(|s| s == "Tajwid"));
        assert!(result.suggestions.iter().any(|s| s == "tajwid basics"));
        assert!(result.suggestions.len() <= 10);

        let none = engine.search(&SearchQuery::default());
        assert!(none.suggestions.is_empty());
    }

    #[test]
    fn test_related_shares_category_and_excludes_shown() {
        let mut engine = engine();
        for i in 0..5 {
            engine.add_content(item(&format!("quran {i}"), "quran", 50.0));
        }
        engine.add_content(item("fiqh item", "fiqh", 50.0));

        let result = engine.search(&SearchQuery {
            filters: SearchFilters {
                categories: vec!["quran".to_string()],
                ..Default::default()
            },
            limit: Some(2),
            ..Default::default()
        });

        assert!(!result.related.is_empty());
        assert!(result.related.len() <= 10);
        let shown: HashSet<Uuid> = result.items.iter().map(|i| i.id).collect();
        for related in &result.related {
            assert_eq!(related.category, "quran");
            assert!(!shown.contains(&related.id));
        }
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let mut engine = engine();
        let mut old = item("old", "quran", 50.0);
        old.created_at = Utc::now() - Duration::days(10);
        let cutoff = old.created_at;
        engine.add_content(old);
        engine.add_content(item("new", "quran", 50.0));

        let result = engine.search(&SearchQuery {
            filters: SearchFilters {
                created_after: Some(cutoff),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(result.total, 2);

        let result = engine.search(&SearchQuery {
            filters: SearchFilters {
                created_before: Some(cutoff),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_author_filter_is_case_insensitive_substring() {
        let mut engine = engine();
        let mut a = item("a", "quran", 50.0);
        a.author = "Sheikh Abdullah".to_string();
        engine.add_content(a);

        let result = engine.search(&SearchQuery {
            filters: SearchFilters {
                author: Some("abdul".to_string()),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_search_with_user_records_history() {
        let mut engine = engine();
        engine.add_content(item("tajwid", "quran", 50.0));
        let user = Uuid::new_v4();

        engine.search(&SearchQuery {
            text: Some("tajwid".to_string()),
            user_id: Some(user),
            ..Default::default()
        });
        // no text, nothing recorded
        engine.search(&SearchQuery {
            user_id: Some(user),
            ..Default::default()
        });

        assert_eq!(engine.recent_searches(user, 10), vec!["tajwid".to_string()]);
    }
}
