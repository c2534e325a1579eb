//! Keyword-based tag generation.

use content_model::{Category, ContentTag, TagSource};

/// Bonus applied when the keyword also appears in the title
const TITLE_BONUS: f32 = 0.3;

/// Generate `Auto` tags for a category from the literal keywords present in
/// the text.
///
/// Weight and confidence are both min(1, relative-frequency x 10 + title
/// bonus): a keyword making up 10% of the words is already a certain tag.
/// Output is sorted by descending weight and capped at `max_tags`.
pub fn generate_tags(
    title: &str,
    body: &str,
    category: &Category,
    max_tags: usize,
) -> Vec<ContentTag> {
    let title_lower = title.to_lowercase();
    let text = format!("{title_lower} {}", body.to_lowercase());
    let word_count = text.split_whitespace().count().max(1);

    let mut tags: Vec<ContentTag> = category
        .keywords
        .iter()
        .filter_map(|keyword| {
            let keyword_lower = keyword.to_lowercase();
            let occurrences = text.matches(&keyword_lower).count();
            if occurrences == 0 {
                return None;
            }

            let frequency = occurrences as f32 / word_count as f32;
            let title_bonus = if title_lower.contains(&keyword_lower) {
                TITLE_BONUS
            } else {
                0.0
            };
            let strength = (frequency * 10.0 + title_bonus).min(1.0);

            Some(
                ContentTag::new(keyword_lower, &category.id, TagSource::Auto)
                    .with_strength(strength, strength),
            )
        })
        .collect();

    tags.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    tags.truncate(max_tags);
    tags
}
